//! Shared types for the sale engine
//!
//! Domain models, sale-draft state, and command/error types used by the
//! engine crate and by any front-end embedding it.

pub mod models;
pub mod sale;
pub mod types;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Draft re-exports (for convenient access)
pub use sale::{DraftCommand, DraftError, DraftErrorCode, SaleDraft};
