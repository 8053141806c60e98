//! Promotional deal evaluation
//!
//! Decides whether a deal applies to the current set of sale lines and what
//! it is worth. Eligibility is judged on the total card count of all lines,
//! free ones included; the money side only ever looks at paid lines.

use crate::money::percent_of;
use rust_decimal::Decimal;
use shared::models::{DealType, PromotionalDeal};
use shared::sale::{DealDiscount, SaleLineItem};
use shared::types::Pence;

/// Deal definition failure, raised when a deal is created or edited
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DealValidationError {
    #[error("deal name is required")]
    MissingName,
    #[error("minimum card count must be at least 1, got {0}")]
    InvalidMinCardCount(i64),
    #[error("maximum card count {max} is below minimum {min}")]
    WindowInverted { min: i64, max: i64 },
    #[error("discount percent is required for this deal type")]
    MissingPercent,
    #[error("discount percent must be above 0 and at most 100, got {0}")]
    InvalidPercent(Decimal),
    #[error("fixed-amount deals need a positive discount amount")]
    MissingAmount,
    #[error("buy_x_get_y deals need buy and get quantities of at least 1")]
    InvalidBuyGet,
}

/// Evaluate a deal against the current sale lines.
///
/// Returns None when the deal is inactive or the total card count falls
/// outside its eligibility window. Otherwise the discount amount is computed
/// per deal type and returned as exact decimal pence; an eligible deal that
/// happens to discount nothing (buy_x_get_y below its buy threshold) still
/// returns Some with amount 0.
pub fn evaluate_deal(items: &[SaleLineItem], deal: &PromotionalDeal) -> Option<DealDiscount> {
    if !deal.is_active {
        return None;
    }

    let total_card_count: i64 = items.iter().map(|i| i.qty).sum();
    if total_card_count < deal.min_card_count {
        return None;
    }
    if let Some(max) = deal.max_card_count
        && total_card_count > max
    {
        return None;
    }

    let total_revenue: Pence = items
        .iter()
        .filter(|i| i.is_revenue_line())
        .map(|i| i.revenue_pence())
        .sum();

    let amount = match deal.deal_type {
        DealType::PercentageOff => {
            percent_of(total_revenue, deal.discount_percent.unwrap_or(Decimal::ZERO))
        }
        DealType::FixedOff => Decimal::from(deal.discount_amount_pence.unwrap_or(0)),
        // The waiver is expressed by the type alone; totals zeroes shipping
        DealType::FreeShipping => Decimal::ZERO,
        DealType::BuyXGetY => buy_x_get_y_amount(items, deal, total_card_count),
    };

    Some(DealDiscount::new(deal.deal_type, amount))
}

/// Discount amount for a buy-X-get-Y deal.
///
/// Every full multiple of `buy_quantity` in the total quantity earns
/// `get_quantity` discounted units. Discounted units are drawn from the
/// cheapest paid lines first: the policy minimises giveaway cost to the
/// business, not the customer's saving. Confirmed with product before any
/// change to dearest-first.
fn buy_x_get_y_amount(items: &[SaleLineItem], deal: &PromotionalDeal, total_qty: i64) -> Decimal {
    let buy = deal.buy_quantity.unwrap_or(0);
    let get = deal.get_quantity.unwrap_or(0);
    if buy <= 0 || get <= 0 || total_qty < buy {
        return Decimal::ZERO;
    }

    let cycles = total_qty / buy;
    // Saturate before the clamp: get_quantity is unbounded deal config
    let mut remaining = cycles.saturating_mul(get).min(total_qty);

    let mut paid_lines: Vec<&SaleLineItem> =
        items.iter().filter(|i| i.is_revenue_line()).collect();
    paid_lines.sort_by(|a, b| a.effective_unit_price().cmp(&b.effective_unit_price()));

    let percent = deal.discount_percent.unwrap_or(Decimal::ZERO);
    let mut amount = Decimal::ZERO;

    for line in paid_lines {
        if remaining <= 0 {
            break;
        }
        let discounted = line.qty.min(remaining);
        let value = line.effective_unit_price() * discounted;
        if percent == Decimal::ONE_HUNDRED {
            amount += Decimal::from(value);
        } else {
            amount += percent_of(value, percent);
        }
        remaining -= discounted;
    }

    amount
}

/// Validate a deal definition before it is saved.
///
/// The evaluator tolerates missing per-type fields by treating them as
/// worth nothing; this keeps such definitions out of the catalog entirely.
pub fn validate_deal(deal: &PromotionalDeal) -> Result<(), DealValidationError> {
    if deal.name.trim().is_empty() {
        return Err(DealValidationError::MissingName);
    }
    if deal.min_card_count < 1 {
        return Err(DealValidationError::InvalidMinCardCount(deal.min_card_count));
    }
    if let Some(max) = deal.max_card_count
        && max < deal.min_card_count
    {
        return Err(DealValidationError::WindowInverted {
            min: deal.min_card_count,
            max,
        });
    }

    match deal.deal_type {
        DealType::PercentageOff => validate_percent(deal)?,
        DealType::FixedOff => {
            if deal.discount_amount_pence.unwrap_or(0) <= 0 {
                return Err(DealValidationError::MissingAmount);
            }
        }
        DealType::FreeShipping => {}
        DealType::BuyXGetY => {
            if deal.buy_quantity.unwrap_or(0) < 1 || deal.get_quantity.unwrap_or(0) < 1 {
                return Err(DealValidationError::InvalidBuyGet);
            }
            validate_percent(deal)?;
        }
    }

    Ok(())
}

fn validate_percent(deal: &PromotionalDeal) -> Result<(), DealValidationError> {
    match deal.discount_percent {
        None => Err(DealValidationError::MissingPercent),
        Some(p) if p <= Decimal::ZERO || p > Decimal::ONE_HUNDRED => {
            Err(DealValidationError::InvalidPercent(p))
        }
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{CardSummary, ListedLot};
    use uuid::Uuid;

    fn make_lot(n: u128, price_pence: Pence) -> ListedLot {
        ListedLot {
            id: Uuid::from_u128(n),
            card: CardSummary {
                name: format!("Card {n}"),
                set_name: "Test Set".to_string(),
                number: None,
            },
            condition: "NM".to_string(),
            variation: None,
            quantity: 50,
            available_qty: 50,
            sold_qty: 0,
            list_price_pence: price_pence,
            purchases: Vec::new(),
        }
    }

    fn make_item(n: u128, qty: i64, price_pence: Pence) -> SaleLineItem {
        let mut item = SaleLineItem::from_lot(make_lot(n, price_pence));
        item.qty = qty;
        item
    }

    fn make_free_item(n: u128, qty: i64) -> SaleLineItem {
        let mut item = make_item(n, qty, 0);
        item.is_free = true;
        item.unit_price_pence = None;
        item
    }

    fn make_deal(deal_type: DealType) -> PromotionalDeal {
        PromotionalDeal::new(Uuid::from_u128(99), "Test Deal", deal_type)
    }

    #[test]
    fn test_inactive_deal_never_applies() {
        let mut deal = make_deal(DealType::PercentageOff);
        deal.discount_percent = Some(Decimal::from(50));
        deal.is_active = false;

        let items = vec![make_item(1, 10, 1000)];
        assert_eq!(evaluate_deal(&items, &deal), None);
    }

    #[test]
    fn test_below_min_card_count_is_ineligible() {
        // Deal wants 5 cards, two lines total 3
        let mut deal = make_deal(DealType::PercentageOff);
        deal.discount_percent = Some(Decimal::from(10));
        deal.min_card_count = 5;

        let items = vec![make_item(1, 2, 1000), make_item(2, 1, 500)];
        assert_eq!(evaluate_deal(&items, &deal), None);
    }

    #[test]
    fn test_above_max_card_count_is_ineligible() {
        let mut deal = make_deal(DealType::PercentageOff);
        deal.discount_percent = Some(Decimal::from(10));
        deal.max_card_count = Some(3);

        let items = vec![make_item(1, 4, 1000)];
        assert_eq!(evaluate_deal(&items, &deal), None);
    }

    #[test]
    fn test_free_lines_count_toward_eligibility() {
        let mut deal = make_deal(DealType::PercentageOff);
        deal.discount_percent = Some(Decimal::from(10));
        deal.min_card_count = 3;

        // 2 free + 1 paid reaches the window; revenue is the paid line only
        let items = vec![make_free_item(1, 2), make_item(2, 1, 1000)];
        let discount = evaluate_deal(&items, &deal).unwrap();
        assert_eq!(discount.amount, Decimal::from(100));
    }

    #[test]
    fn test_percentage_off_exact() {
        // 10% of 2x1000p = 200p
        let mut deal = make_deal(DealType::PercentageOff);
        deal.discount_percent = Some(Decimal::from(10));

        let items = vec![make_item(1, 2, 1000)];
        let discount = evaluate_deal(&items, &deal).unwrap();
        assert_eq!(discount.deal_type, DealType::PercentageOff);
        assert_eq!(discount.amount, Decimal::from(200));
        assert_eq!(discount.amount_pence(), 200);
    }

    #[test]
    fn test_percentage_off_keeps_subpence_fraction() {
        // 10% of 1999p = 199.9p, unrounded in the result
        let mut deal = make_deal(DealType::PercentageOff);
        deal.discount_percent = Some(Decimal::from(10));

        let items = vec![make_item(1, 1, 1999)];
        let discount = evaluate_deal(&items, &deal).unwrap();
        assert_eq!(discount.amount, Decimal::new(1999, 1)); // 199.9
        assert_eq!(discount.amount_pence(), 200);
    }

    #[test]
    fn test_fixed_off_ignores_revenue() {
        let mut deal = make_deal(DealType::FixedOff);
        deal.discount_amount_pence = Some(500);

        // Revenue well below the discount; capping is the totals side's job
        let items = vec![make_item(1, 1, 100)];
        let discount = evaluate_deal(&items, &deal).unwrap();
        assert_eq!(discount.amount, Decimal::from(500));
    }

    #[test]
    fn test_free_shipping_amount_is_zero() {
        let deal = make_deal(DealType::FreeShipping);
        let items = vec![make_item(1, 1, 1000)];
        let discount = evaluate_deal(&items, &deal).unwrap();
        assert_eq!(discount.deal_type, DealType::FreeShipping);
        assert_eq!(discount.amount, Decimal::ZERO);
        assert!(discount.is_free_shipping());
    }

    #[test]
    fn test_buy_x_get_y_one_unit_free() {
        // Buy 5 get 1 at 100% on 6x1000p: one unit free = 1000p
        let mut deal = make_deal(DealType::BuyXGetY);
        deal.buy_quantity = Some(5);
        deal.get_quantity = Some(1);
        deal.discount_percent = Some(Decimal::ONE_HUNDRED);

        let items = vec![make_item(1, 6, 1000)];
        let discount = evaluate_deal(&items, &deal).unwrap();
        assert_eq!(discount.amount, Decimal::from(1000));
    }

    #[test]
    fn test_buy_x_get_y_below_threshold_is_zero_not_none() {
        let mut deal = make_deal(DealType::BuyXGetY);
        deal.buy_quantity = Some(5);
        deal.get_quantity = Some(1);
        deal.discount_percent = Some(Decimal::ONE_HUNDRED);

        let items = vec![make_item(1, 4, 1000)];
        let discount = evaluate_deal(&items, &deal).unwrap();
        assert_eq!(discount.amount, Decimal::ZERO);
    }

    #[test]
    fn test_buy_x_get_y_discounts_cheapest_first() {
        // Three lines at 2000/500/1000; one discounted unit comes from the
        // 500p line, not the dearest
        let mut deal = make_deal(DealType::BuyXGetY);
        deal.buy_quantity = Some(2);
        deal.get_quantity = Some(1);
        deal.discount_percent = Some(Decimal::ONE_HUNDRED);

        let items = vec![
            make_item(1, 1, 2000),
            make_item(2, 1, 500),
            make_item(3, 1, 1000),
        ];
        let discount = evaluate_deal(&items, &deal).unwrap();
        assert_eq!(discount.amount, Decimal::from(500));
    }

    #[test]
    fn test_buy_x_get_y_multiple_cycles() {
        // Buy 2 get 1 on 5 units: 2 cycles = 2 discounted units
        let mut deal = make_deal(DealType::BuyXGetY);
        deal.buy_quantity = Some(2);
        deal.get_quantity = Some(1);
        deal.discount_percent = Some(Decimal::ONE_HUNDRED);

        let items = vec![make_item(1, 5, 1000)];
        let discount = evaluate_deal(&items, &deal).unwrap();
        assert_eq!(discount.amount, Decimal::from(2000));
    }

    #[test]
    fn test_buy_x_get_y_oversized_get_quantity_clamps() {
        // A get quantity far past the sale size is legal config; discounted
        // units still cap at the total quantity
        let mut deal = make_deal(DealType::BuyXGetY);
        deal.buy_quantity = Some(1);
        deal.get_quantity = Some(i64::MAX);
        deal.discount_percent = Some(Decimal::ONE_HUNDRED);
        assert_eq!(validate_deal(&deal), Ok(()));

        let items = vec![make_item(1, 2, 1000)];
        let discount = evaluate_deal(&items, &deal).unwrap();
        // Both units discounted, nothing more
        assert_eq!(discount.amount, Decimal::from(2000));
    }

    #[test]
    fn test_buy_x_get_y_partial_percent() {
        // 50% off one 999p unit = 499.5p, kept exact
        let mut deal = make_deal(DealType::BuyXGetY);
        deal.buy_quantity = Some(2);
        deal.get_quantity = Some(1);
        deal.discount_percent = Some(Decimal::from(50));

        let items = vec![make_item(1, 2, 999)];
        let discount = evaluate_deal(&items, &deal).unwrap();
        assert_eq!(discount.amount, Decimal::new(4995, 1)); // 499.5
    }

    #[test]
    fn test_buy_x_get_y_skips_free_lines() {
        // Free lines add eligibility quantity but are never discounted
        let mut deal = make_deal(DealType::BuyXGetY);
        deal.buy_quantity = Some(3);
        deal.get_quantity = Some(1);
        deal.discount_percent = Some(Decimal::ONE_HUNDRED);

        let items = vec![make_free_item(1, 2), make_item(2, 1, 800)];
        let discount = evaluate_deal(&items, &deal).unwrap();
        // 3 total units -> 1 discounted, drawn from the only paid line
        assert_eq!(discount.amount, Decimal::from(800));
    }

    // ==================== validate_deal ====================

    #[test]
    fn test_validate_rejects_blank_name() {
        let mut deal = make_deal(DealType::FreeShipping);
        deal.name = "   ".to_string();
        assert_eq!(validate_deal(&deal), Err(DealValidationError::MissingName));
    }

    #[test]
    fn test_validate_rejects_bad_window() {
        let mut deal = make_deal(DealType::FreeShipping);
        deal.min_card_count = 0;
        assert_eq!(
            validate_deal(&deal),
            Err(DealValidationError::InvalidMinCardCount(0))
        );

        deal.min_card_count = 5;
        deal.max_card_count = Some(3);
        assert_eq!(
            validate_deal(&deal),
            Err(DealValidationError::WindowInverted { min: 5, max: 3 })
        );
    }

    #[test]
    fn test_validate_percentage_requirements() {
        let mut deal = make_deal(DealType::PercentageOff);
        assert_eq!(validate_deal(&deal), Err(DealValidationError::MissingPercent));

        deal.discount_percent = Some(Decimal::from(150));
        assert_eq!(
            validate_deal(&deal),
            Err(DealValidationError::InvalidPercent(Decimal::from(150)))
        );

        deal.discount_percent = Some(Decimal::from(25));
        assert_eq!(validate_deal(&deal), Ok(()));
    }

    #[test]
    fn test_validate_fixed_requires_amount() {
        let mut deal = make_deal(DealType::FixedOff);
        assert_eq!(validate_deal(&deal), Err(DealValidationError::MissingAmount));

        deal.discount_amount_pence = Some(500);
        assert_eq!(validate_deal(&deal), Ok(()));
    }

    #[test]
    fn test_validate_buy_x_get_y_requirements() {
        let mut deal = make_deal(DealType::BuyXGetY);
        deal.discount_percent = Some(Decimal::ONE_HUNDRED);
        assert_eq!(validate_deal(&deal), Err(DealValidationError::InvalidBuyGet));

        deal.buy_quantity = Some(5);
        deal.get_quantity = Some(1);
        assert_eq!(validate_deal(&deal), Ok(()));
    }
}
