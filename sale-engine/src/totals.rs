//! Sale totals calculation
//!
//! The last step of the pipeline: folds line revenue, the evaluated deal
//! discount, fee/shipping inputs and consumable costs into the financial
//! summary the caller displays and eventually persists. Recomputed in full
//! on every edit; nothing is cached.

use crate::money::parse_pounds_or_zero;
use rust_decimal::Decimal;
use shared::models::ConsumableSelection;
use shared::sale::{DealDiscount, SaleDraft, SaleLineItem, SaleTotals};
use shared::types::Pence;
use uuid::Uuid;

/// Compute the full financial summary for a sale.
///
/// Steps:
/// 1. Revenue: effective unit price x quantity over every line (free lines
///    contribute zero).
/// 2. Discount: the evaluated deal amount, rounded half-up to whole pence
///    here, the single place sub-pence fractions are resolved.
/// 3. Revenue after discount is floored at zero; a discount larger than
///    revenue never goes negative.
/// 4. Costs: fee and shipping pounds inputs parsed with fallback zero;
///    shipping is waived when the selected deal is a free-shipping deal;
///    consumables cost what their lines say.
/// 5. Net profit is not clamped and may be negative. Margin is zero when
///    nothing is left after the discount, never NaN or infinite.
///
/// This function never fails; malformed text inputs count as zero.
pub fn compute_totals(
    items: &[SaleLineItem],
    fees_input: &str,
    shipping_input: &str,
    consumables: &[ConsumableSelection],
    deal_discount: Option<&DealDiscount>,
    selected_deal_id: Option<Uuid>,
) -> SaleTotals {
    let revenue: Pence = items.iter().map(|i| i.revenue_pence()).sum();

    let discount: Pence = deal_discount.map(|d| d.amount_pence()).unwrap_or(0);
    let revenue_after_discount = (revenue - discount).max(0);

    let fees_cost = parse_pounds_or_zero(fees_input);
    let free_shipping = selected_deal_id.is_some()
        && deal_discount.is_some_and(|d| d.is_free_shipping());
    let shipping_cost = if free_shipping {
        0
    } else {
        parse_pounds_or_zero(shipping_input)
    };
    let consumables_cost: Pence = consumables.iter().map(|c| c.cost_pence()).sum();

    let total_costs = fees_cost + shipping_cost + consumables_cost;
    let net_profit = revenue_after_discount - total_costs;

    let margin_percent = if revenue_after_discount > 0 {
        Decimal::from(net_profit) / Decimal::from(revenue_after_discount) * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    SaleTotals {
        revenue,
        discount,
        revenue_after_discount,
        fees_cost,
        shipping_cost,
        consumables_cost,
        total_costs,
        net_profit,
        margin_percent,
    }
}

/// Totals for a draft's current state, for live display
pub fn draft_totals(draft: &SaleDraft) -> SaleTotals {
    compute_totals(
        &draft.items,
        &draft.fees_input,
        &draft.shipping_input,
        &draft.consumables,
        draft.deal_discount.as_ref(),
        draft.selected_deal_id,
    )
}
