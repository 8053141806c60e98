//! Consumable Model

use crate::types::Pence;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Packaging consumable catalog entry (box, sleeve, tape)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Consumable {
    pub id: Uuid,
    pub name: String,
    /// Unit of measure ("each", "metre")
    pub unit: String,
    /// Rolling average cost per unit
    pub avg_cost_pence_per_unit: Pence,
}

/// A consumable line attached to a sale draft
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConsumableSelection {
    pub consumable_id: Uuid,
    pub name: String,
    pub qty: i64,
    /// Cost per unit frozen at selection time
    pub unit_cost_pence: Pence,
}

impl ConsumableSelection {
    /// Line cost in pence
    pub fn cost_pence(&self) -> Pence {
        self.qty * self.unit_cost_pence
    }
}
