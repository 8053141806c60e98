//! Draft commands and errors

use crate::models::{Buyer, ConsumableSelection, ListedLot};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Edit requested against a sale draft.
///
/// The reducer in the engine crate is the only place that matches on this
/// enum; adding a variant forces every edit path to be handled there.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DraftCommand {
    /// Add a lot to the sale (quantity 1, list price, automatic allocation)
    AddItem { lot: ListedLot },
    /// Remove a line
    RemoveItem { lot_id: Uuid },
    /// Change a line's quantity
    SetQuantity { lot_id: Uuid, qty: i64 },
    /// Change a line's unit price from a pounds text input
    SetPrice { lot_id: Uuid, input: String },
    /// Mark or unmark a line as given away free
    SetFree { lot_id: Uuid, is_free: bool },
    /// Switch a line between automatic and manual allocation
    SetManualAllocation { lot_id: Uuid, manual: bool },
    /// Set one batch's allocated quantity on a manually-allocated line
    SetAllocation {
        lot_id: Uuid,
        batch_id: Uuid,
        qty: i64,
    },
    /// Select or clear the promotional deal
    SelectDeal { deal_id: Option<Uuid> },
    /// Raw fees input (pounds text)
    SetFees { input: String },
    /// Raw shipping input (pounds text)
    SetShipping { input: String },
    /// Set or clear the buyer
    SetBuyer { buyer: Option<Buyer> },
    /// Override the order number
    SetOrderNumber { order_number: String },
    /// Attach a consumable line
    AddConsumable { selection: ConsumableSelection },
    /// Change a consumable's quantity; zero or negative removes it
    SetConsumableQty { consumable_id: Uuid, qty: i64 },
    /// Detach a consumable line
    RemoveConsumable { consumable_id: Uuid },
    /// Replace all consumables (applying a packaging suggestion)
    ReplaceConsumables {
        selections: Vec<ConsumableSelection>,
    },
}

impl DraftCommand {
    /// Stable name for logging
    pub fn label(&self) -> &'static str {
        match self {
            DraftCommand::AddItem { .. } => "add_item",
            DraftCommand::RemoveItem { .. } => "remove_item",
            DraftCommand::SetQuantity { .. } => "set_quantity",
            DraftCommand::SetPrice { .. } => "set_price",
            DraftCommand::SetFree { .. } => "set_free",
            DraftCommand::SetManualAllocation { .. } => "set_manual_allocation",
            DraftCommand::SetAllocation { .. } => "set_allocation",
            DraftCommand::SelectDeal { .. } => "select_deal",
            DraftCommand::SetFees { .. } => "set_fees",
            DraftCommand::SetShipping { .. } => "set_shipping",
            DraftCommand::SetBuyer { .. } => "set_buyer",
            DraftCommand::SetOrderNumber { .. } => "set_order_number",
            DraftCommand::AddConsumable { .. } => "add_consumable",
            DraftCommand::SetConsumableQty { .. } => "set_consumable_qty",
            DraftCommand::RemoveConsumable { .. } => "remove_consumable",
            DraftCommand::ReplaceConsumables { .. } => "replace_consumables",
        }
    }
}

/// Why a command was rejected
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DraftErrorCode {
    DuplicateLot,
    ItemNotFound,
    BatchNotFound,
    DealNotFound,
    InsufficientStock,
    InvalidQuantity,
    InvalidPrice,
    EmptyDraft,
    MissingPrice,
    MissingBuyer,
    MissingOrderNumber,
    AllocationMismatch,
}

/// Command rejection with a machine code and a user-facing message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct DraftError {
    pub code: DraftErrorCode,
    pub message: String,
}

impl DraftError {
    pub fn new(code: DraftErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn duplicate_lot() -> Self {
        Self::new(
            DraftErrorCode::DuplicateLot,
            "This card is already in the sale",
        )
    }

    pub fn item_not_found(lot_id: Uuid) -> Self {
        Self::new(
            DraftErrorCode::ItemNotFound,
            format!("No sale line for lot {lot_id}"),
        )
    }

    pub fn batch_not_found(batch_id: Uuid) -> Self {
        Self::new(
            DraftErrorCode::BatchNotFound,
            format!("No purchase batch {batch_id} on this lot"),
        )
    }

    pub fn deal_not_found(deal_id: Uuid) -> Self {
        Self::new(
            DraftErrorCode::DealNotFound,
            format!("Unknown promotional deal {deal_id}"),
        )
    }

    pub fn insufficient_stock(available: i64) -> Self {
        Self::new(
            DraftErrorCode::InsufficientStock,
            format!("Only {available} items available"),
        )
    }

    pub fn invalid_quantity(qty: i64) -> Self {
        Self::new(
            DraftErrorCode::InvalidQuantity,
            format!(
                "Quantity must be between 1 and {}, got {qty}",
                crate::types::MAX_QUANTITY
            ),
        )
    }

    pub fn invalid_price(pence: crate::types::Pence) -> Self {
        Self::new(
            DraftErrorCode::InvalidPrice,
            format!(
                "Price exceeds the maximum of {} pence, got {pence}",
                crate::types::MAX_PRICE_PENCE
            ),
        )
    }
}
