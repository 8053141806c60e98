//! Sale Draft Module
//!
//! Types for the sale-recording flow:
//! - Commands: edits the front-end requests against an in-progress draft
//! - Draft: immutable value object holding the current sale state
//! - Results: discount, totals, and the final submission payload

pub mod command;
pub mod discount;
pub mod draft;
pub mod line_item;
pub mod submission;
pub mod totals;

// Re-exports
pub use command::{DraftCommand, DraftError, DraftErrorCode};
pub use discount::DealDiscount;
pub use draft::SaleDraft;
pub use line_item::{PurchaseAllocation, SaleLineItem};
pub use submission::{SaleSubmission, SubmittedItem};
pub use totals::SaleTotals;
