//! Sale calculation engine
//!
//! Pure domain logic for recording a sale: purchase allocation, promotional
//! deal evaluation, totals, the draft command reducer, and finalization.
//! Everything here is deterministic and side-effect free; persistence and
//! transport live elsewhere.

pub mod allocation;
pub mod deals;
pub mod money;
pub mod numbering;
pub mod packaging;
pub mod reducer;
pub mod submit;
pub mod totals;

// Re-exports
pub use allocation::{AllocationError, allocate_clamped, allocate_for_lot};
pub use deals::{DealValidationError, evaluate_deal, validate_deal};
pub use numbering::next_order_number;
pub use packaging::{select_packaging_rule, suggest_consumables};
pub use reducer::apply_command;
pub use submit::finalize_draft;
pub use totals::{compute_totals, draft_totals};
