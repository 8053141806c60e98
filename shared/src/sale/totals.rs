//! Sale totals

use crate::types::Pence;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Full financial summary of a sale.
///
/// Every money field is integer pence; `margin_percent` is the only
/// fractional field. Conversion to pounds for display is the caller's job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleTotals {
    /// Gross revenue before any discount
    pub revenue: Pence,
    /// Deal discount actually applied (rounded half-up to pence)
    pub discount: Pence,
    /// Revenue after discount, floored at zero
    pub revenue_after_discount: Pence,
    /// Marketplace/payment fees
    pub fees_cost: Pence,
    /// Shipping cost (zero when a free-shipping deal is selected)
    pub shipping_cost: Pence,
    /// Packaging consumables cost
    pub consumables_cost: Pence,
    /// fees + shipping + consumables
    pub total_costs: Pence,
    /// revenue_after_discount - total_costs; may be negative
    pub net_profit: Pence,
    /// net_profit / revenue_after_discount * 100; zero when there is no
    /// revenue left after the discount
    pub margin_percent: Decimal,
}

impl Default for SaleTotals {
    fn default() -> Self {
        Self {
            revenue: 0,
            discount: 0,
            revenue_after_discount: 0,
            fees_cost: 0,
            shipping_cost: 0,
            consumables_cost: 0,
            total_costs: 0,
            net_profit: 0,
            margin_percent: Decimal::ZERO,
        }
    }
}
