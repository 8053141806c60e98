//! Purchase Batch Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a purchase batch came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Marketplace,
    Shop,
    TradeIn,
    Private,
}

/// A historical acquisition that contributed stock to a lot.
///
/// `quantity` is the number of units this batch contributed to the lot the
/// engine is allocating against, not the batch's total size.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseBatch {
    pub id: Uuid,
    /// Display name of the acquisition source
    pub source_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<SourceType>,
    /// When the batch was acquired
    pub purchased_at: DateTime<Utc>,
    /// Units contributed to the lot
    pub quantity: i64,
}

impl PurchaseBatch {
    pub fn new(id: Uuid, source_name: impl Into<String>, quantity: i64) -> Self {
        Self {
            id,
            source_name: source_name.into(),
            source_type: None,
            purchased_at: Utc::now(),
            quantity,
        }
    }
}
