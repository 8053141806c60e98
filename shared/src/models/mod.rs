//! Data models
//!
//! Reference data the engine reads but never writes: inventory lots,
//! purchase batches, promotional deals, consumables, buyers, packaging
//! rules. All IDs are `Uuid`; all money fields are integer pence.

pub mod buyer;
pub mod consumable;
pub mod deal;
pub mod lot;
pub mod packaging;
pub mod purchase;

// Re-exports
pub use buyer::*;
pub use consumable::*;
pub use deal::*;
pub use lot::*;
pub use packaging::*;
pub use purchase::*;
