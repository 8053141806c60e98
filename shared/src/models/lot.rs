//! Listed Lot Model

use super::purchase::PurchaseBatch;
use crate::types::Pence;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Card identity carried for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardSummary {
    pub name: String,
    pub set_name: String,
    /// Collector number within the set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
}

/// A grouped quantity of a specific card/condition/variation held in
/// inventory and listed for sale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListedLot {
    pub id: Uuid,
    pub card: CardSummary,
    pub condition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation: Option<String>,
    /// Total units the lot was listed with
    pub quantity: i64,
    /// Units still available to sell
    pub available_qty: i64,
    /// Units already sold
    #[serde(default)]
    pub sold_qty: i64,
    /// Asking price per unit
    pub list_price_pence: Pence,
    /// Purchase batches that contributed stock to this lot
    #[serde(default)]
    pub purchases: Vec<PurchaseBatch>,
}

impl ListedLot {
    /// Whether cost attribution needs a proportional split
    pub fn is_multi_source(&self) -> bool {
        self.purchases.len() > 1
    }

    /// Total stock contributed across all purchase batches
    pub fn total_purchase_qty(&self) -> i64 {
        self.purchases.iter().map(|p| p.quantity).sum()
    }
}
