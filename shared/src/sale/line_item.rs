//! Sale line item types

use crate::models::ListedLot;
use crate::types::Pence;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Assignment of part of a sold quantity to one purchase batch
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PurchaseAllocation {
    pub batch_id: Uuid,
    pub qty: i64,
}

/// One line in an in-progress sale
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleLineItem {
    /// Lot being sold
    pub lot_id: Uuid,
    /// Lot snapshot carried for display and allocation
    pub lot: ListedLot,
    /// Units being sold
    pub qty: i64,
    /// Unit price; None when cleared or not yet entered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price_pence: Option<Pence>,
    /// Given away for nothing (price treated as 0 regardless of stored price)
    #[serde(default)]
    pub is_free: bool,
    /// Whether the user took over allocation from the automatic split
    #[serde(default)]
    pub manual_allocation: bool,
    /// Per-batch cost attribution
    #[serde(default)]
    pub allocations: Vec<PurchaseAllocation>,
}

impl SaleLineItem {
    /// New line for a lot: one unit at the list price, automatic allocation
    pub fn from_lot(lot: ListedLot) -> Self {
        Self {
            lot_id: lot.id,
            unit_price_pence: Some(lot.list_price_pence),
            lot,
            qty: 1,
            is_free: false,
            manual_allocation: false,
            allocations: Vec::new(),
        }
    }

    /// Unit price with the free flag applied
    pub fn effective_unit_price(&self) -> Pence {
        if self.is_free {
            0
        } else {
            self.unit_price_pence.unwrap_or(0)
        }
    }

    /// Line revenue in pence
    pub fn revenue_pence(&self) -> Pence {
        self.effective_unit_price() * self.qty
    }

    /// Whether this line counts toward deal revenue (paid, positive price)
    pub fn is_revenue_line(&self) -> bool {
        !self.is_free && self.effective_unit_price() > 0
    }

    /// Units attributed across all batches so far
    pub fn allocated_qty(&self) -> i64 {
        self.allocations.iter().map(|a| a.qty).sum()
    }
}
