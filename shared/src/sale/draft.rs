//! Sale draft - the in-progress sale state

use super::discount::DealDiscount;
use super::line_item::SaleLineItem;
use crate::models::{Buyer, ConsumableSelection};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Immutable value object holding an in-progress sale.
///
/// The front-end owns a reference and replaces it with the draft returned by
/// the reducer after each command; nothing here is mutated in place. Fee and
/// shipping amounts stay as the raw text the user typed; they are parsed
/// (fallback zero) only when totals are computed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleDraft {
    /// Human-facing order number ("ORD-0042")
    pub order_number: String,
    /// Buyer, once chosen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer: Option<Buyer>,
    /// Lines in the sale, in the order they were added
    pub items: Vec<SaleLineItem>,
    /// Raw fees input (pounds)
    #[serde(default)]
    pub fees_input: String,
    /// Raw shipping input (pounds)
    #[serde(default)]
    pub shipping_input: String,
    /// Packaging consumables attached to the sale
    #[serde(default)]
    pub consumables: Vec<ConsumableSelection>,
    /// Selected promotional deal, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_deal_id: Option<Uuid>,
    /// Discount computed for the selected deal against the current items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_discount: Option<DealDiscount>,
    /// When the sale happened
    pub sold_at: DateTime<Utc>,
}

impl SaleDraft {
    /// Create an empty draft
    pub fn new(order_number: impl Into<String>) -> Self {
        Self {
            order_number: order_number.into(),
            buyer: None,
            items: Vec::new(),
            fees_input: String::new(),
            shipping_input: String::new(),
            consumables: Vec::new(),
            selected_deal_id: None,
            deal_discount: None,
            sold_at: Utc::now(),
        }
    }

    /// Total units across all lines, free ones included.
    ///
    /// Deal eligibility windows are checked against this figure.
    pub fn total_card_count(&self) -> i64 {
        self.items.iter().map(|i| i.qty).sum()
    }

    /// Find a line by lot
    pub fn item(&self, lot_id: Uuid) -> Option<&SaleLineItem> {
        self.items.iter().find(|i| i.lot_id == lot_id)
    }

    /// Whether a lot is already in the sale
    pub fn contains_lot(&self, lot_id: Uuid) -> bool {
        self.items.iter().any(|i| i.lot_id == lot_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for SaleDraft {
    fn default() -> Self {
        Self::new(String::new())
    }
}
