//! Money utilities for integer-pence arithmetic
//!
//! Every money value in the engine is an `i64` pence amount. `Decimal` is
//! used for the places fractions genuinely appear (percentage discounts,
//! margin) and for the pounds text inputs the front-end collects; nothing
//! here touches `f64`.

use rust_decimal::prelude::*;
use shared::types::Pence;

/// Decimal places of a pounds amount
const DECIMAL_PLACES: u32 = 2;

/// Parse a pounds text input ("2.50") into pence.
///
/// Returns None for blank or malformed input; callers that want the
/// fee/shipping fallback use `parse_pounds_or_zero`.
pub fn parse_pounds_input(input: &str) -> Option<Pence> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let pounds = Decimal::from_str(trimmed).ok()?;
    Some(pounds_to_pence(pounds))
}

/// Parse a pounds text input, treating blank/malformed as zero.
///
/// This is the contract for the fee and shipping fields: they are free text
/// in the UI and must never fail the calculation.
pub fn parse_pounds_or_zero(input: &str) -> Pence {
    parse_pounds_input(input).unwrap_or(0)
}

/// Convert a pounds amount to pence, rounding half-up to the nearest penny
#[inline]
pub fn pounds_to_pence(pounds: Decimal) -> Pence {
    (pounds * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

/// Convert pence to a pounds amount with two decimal places
#[inline]
pub fn pence_to_pounds(pence: Pence) -> Decimal {
    Decimal::new(pence, DECIMAL_PLACES)
}

/// Round a decimal pence amount half-up to whole pence
#[inline]
pub fn round_pence(value: Decimal) -> Pence {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

/// `amount * percent / 100` as exact decimal pence
#[inline]
pub fn percent_of(amount: Pence, percent: Decimal) -> Decimal {
    Decimal::from(amount) * percent / Decimal::ONE_HUNDRED
}
