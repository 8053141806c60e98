//! Sale submission payload

use super::line_item::PurchaseAllocation;
use super::totals::SaleTotals;
use crate::models::Buyer;
use crate::types::Pence;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One finalized line, ready to persist
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmittedItem {
    pub lot_id: Uuid,
    pub qty: i64,
    /// Final unit price; zero when the line was free
    pub unit_price_pence: Pence,
    pub is_free: bool,
    /// Final cost attribution across purchase batches
    pub allocations: Vec<PurchaseAllocation>,
}

/// Everything the persistence layer needs to record a sale.
///
/// Produced by `finalize_draft` after validation passes; the engine itself
/// never writes it anywhere.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleSubmission {
    pub order_number: String,
    pub buyer: Buyer,
    pub sold_at: DateTime<Utc>,
    pub items: Vec<SubmittedItem>,
    /// Deal applied to the sale, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_id: Option<Uuid>,
    /// Discount written to the sale record, rounded to whole pence
    pub discount_pence: Pence,
    pub totals: SaleTotals,
}
