//! Common types for the shared crate
//!
//! Utility types used across the workspace

/// Money amount in minor currency units (pence, 1/100 of a pound).
///
/// Every money value crossing a public boundary is an integer pence amount;
/// conversion to pounds happens only at the display edge.
pub type Pence = i64;

/// Upper bound for a single line's quantity
pub const MAX_QUANTITY: i64 = 100_000;

/// Upper bound for a unit price (1,000,000.00 in pence)
pub const MAX_PRICE_PENCE: Pence = 100_000_000;
