//! Promotional Deal Model

use crate::types::Pence;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Deal type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DealType {
    PercentageOff,
    FixedOff,
    FreeShipping,
    BuyXGetY,
}

/// Promotional deal entity
///
/// Read-only reference data for the evaluator. Which optional fields must be
/// present depends on `deal_type`; `validate_deal` in the engine enforces
/// that when definitions are created or edited.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromotionalDeal {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub deal_type: DealType,
    /// Percentage for percentage_off and buy_x_get_y (100 = fully free)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<Decimal>,
    /// Flat amount for fixed_off
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount_pence: Option<Pence>,
    /// Units the customer must buy (buy_x_get_y)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buy_quantity: Option<i64>,
    /// Units discounted per cycle (buy_x_get_y)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get_quantity: Option<i64>,
    /// Minimum total card count for eligibility
    #[serde(default = "default_min_card_count")]
    pub min_card_count: i64,
    /// Optional upper bound on total card count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_card_count: Option<i64>,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_min_card_count() -> i64 {
    1
}

fn default_is_active() -> bool {
    true
}

impl PromotionalDeal {
    /// Create a deal with the card-count window left wide open
    pub fn new(id: Uuid, name: impl Into<String>, deal_type: DealType) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            deal_type,
            discount_percent: None,
            discount_amount_pence: None,
            buy_quantity: None,
            get_quantity: None,
            min_card_count: 1,
            max_card_count: None,
            is_active: true,
        }
    }
}
