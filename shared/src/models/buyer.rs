//! Buyer Model

use crate::types::Pence;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A buyer identified by marketplace handle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Buyer {
    pub id: Uuid,
    /// Marketplace username
    pub handle: String,
    /// Marketplace the handle belongs to ("ebay", "vinted", "whatnot", ...)
    pub platform: String,
    /// Completed orders, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_count: Option<i64>,
    /// Lifetime spend, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_spend_pence: Option<Pence>,
}

impl Buyer {
    pub fn new(id: Uuid, handle: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            id,
            handle: handle.into(),
            platform: platform.into(),
            order_count: None,
            total_spend_pence: None,
        }
    }
}
