//! Deal discount result

use crate::models::DealType;
use crate::types::Pence;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Outcome of evaluating a promotional deal against a set of line items.
///
/// `amount` is kept as exact decimal pence; percentage deals can produce
/// sub-pence fractions and those are not rounded away until the value is
/// folded into totals or persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DealDiscount {
    pub deal_type: DealType,
    /// Discount amount in pence, unrounded
    pub amount: Decimal,
}

impl DealDiscount {
    pub fn new(deal_type: DealType, amount: Decimal) -> Self {
        Self { deal_type, amount }
    }

    /// Amount rounded half-up to whole pence, for persistence and totals
    pub fn amount_pence(&self) -> Pence {
        self.amount
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap_or(0)
    }

    /// Whether this discount waives shipping rather than reducing revenue
    pub fn is_free_shipping(&self) -> bool {
        self.deal_type == DealType::FreeShipping
    }
}
