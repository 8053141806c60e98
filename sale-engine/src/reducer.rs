//! Draft command reducer
//!
//! The single entry point for editing a sale draft. Each command produces a
//! new draft; the caller owns the mutable reference and swaps it after every
//! successful apply. The selected deal's discount is re-evaluated against
//! the updated lines on every command, so eligibility windows react to
//! quantity edits immediately.

use crate::allocation::allocate_clamped;
use crate::deals::evaluate_deal;
use crate::money::parse_pounds_input;
use shared::models::{ConsumableSelection, ListedLot, PromotionalDeal};
use shared::sale::{DraftCommand, DraftError, PurchaseAllocation, SaleDraft, SaleLineItem};
use shared::types::{MAX_PRICE_PENCE, MAX_QUANTITY};
use tracing::debug;
use uuid::Uuid;

/// Apply one command to a draft, returning the updated draft.
///
/// This is the only place that matches on `DraftCommand`; adding a variant
/// forces a decision here. A rejected command leaves the input draft
/// untouched; the error carries a code and a user-facing message.
pub fn apply_command(
    draft: &SaleDraft,
    command: DraftCommand,
    deals: &[PromotionalDeal],
) -> Result<SaleDraft, DraftError> {
    debug!(
        command = command.label(),
        items = draft.items.len(),
        "applying draft command"
    );

    let mut next = draft.clone();
    match command {
        DraftCommand::AddItem { lot } => add_item(&mut next, lot)?,
        DraftCommand::RemoveItem { lot_id } => remove_item(&mut next, lot_id)?,
        DraftCommand::SetQuantity { lot_id, qty } => set_quantity(&mut next, lot_id, qty)?,
        DraftCommand::SetPrice { lot_id, input } => set_price(&mut next, lot_id, &input)?,
        DraftCommand::SetFree { lot_id, is_free } => set_free(&mut next, lot_id, is_free)?,
        DraftCommand::SetManualAllocation { lot_id, manual } => {
            set_manual_allocation(&mut next, lot_id, manual)?
        }
        DraftCommand::SetAllocation {
            lot_id,
            batch_id,
            qty,
        } => set_allocation(&mut next, lot_id, batch_id, qty)?,
        DraftCommand::SelectDeal { deal_id } => select_deal(&mut next, deal_id, deals)?,
        DraftCommand::SetFees { input } => next.fees_input = input,
        DraftCommand::SetShipping { input } => next.shipping_input = input,
        DraftCommand::SetBuyer { buyer } => next.buyer = buyer,
        DraftCommand::SetOrderNumber { order_number } => next.order_number = order_number,
        DraftCommand::AddConsumable { selection } => add_consumable(&mut next, selection),
        DraftCommand::SetConsumableQty {
            consumable_id,
            qty,
        } => set_consumable_qty(&mut next, consumable_id, qty),
        DraftCommand::RemoveConsumable { consumable_id } => {
            next.consumables.retain(|c| c.consumable_id != consumable_id)
        }
        DraftCommand::ReplaceConsumables { selections } => next.consumables = selections,
    }

    refresh_discount(&mut next, deals);
    Ok(next)
}

/// Re-evaluate the selected deal against the current lines.
///
/// Runs after every command so the discount can never go stale; a deal that
/// drops out of its card-count window clears to None.
fn refresh_discount(draft: &mut SaleDraft, deals: &[PromotionalDeal]) {
    draft.deal_discount = draft
        .selected_deal_id
        .and_then(|id| deals.iter().find(|d| d.id == id))
        .and_then(|deal| evaluate_deal(&draft.items, deal));
}

fn line_mut(draft: &mut SaleDraft, lot_id: Uuid) -> Result<&mut SaleLineItem, DraftError> {
    draft
        .items
        .iter_mut()
        .find(|i| i.lot_id == lot_id)
        .ok_or_else(|| DraftError::item_not_found(lot_id))
}

fn add_item(draft: &mut SaleDraft, lot: ListedLot) -> Result<(), DraftError> {
    if draft.contains_lot(lot.id) {
        return Err(DraftError::duplicate_lot());
    }
    let mut item = SaleLineItem::from_lot(lot);
    // Single-source lots stay implicit until a quantity edit fills them in
    if item.lot.is_multi_source() {
        item.allocations = allocate_clamped(&item.lot.purchases, item.qty);
    }
    draft.items.push(item);
    Ok(())
}

fn remove_item(draft: &mut SaleDraft, lot_id: Uuid) -> Result<(), DraftError> {
    if !draft.contains_lot(lot_id) {
        return Err(DraftError::item_not_found(lot_id));
    }
    draft.items.retain(|i| i.lot_id != lot_id);
    Ok(())
}

fn set_quantity(draft: &mut SaleDraft, lot_id: Uuid, qty: i64) -> Result<(), DraftError> {
    if !(1..=MAX_QUANTITY).contains(&qty) {
        return Err(DraftError::invalid_quantity(qty));
    }
    let item = line_mut(draft, lot_id)?;
    if qty > item.lot.available_qty {
        return Err(DraftError::insufficient_stock(item.lot.available_qty));
    }

    item.qty = qty;
    if item.manual_allocation {
        reconcile_allocations(item);
    } else {
        item.allocations = allocate_clamped(&item.lot.purchases, qty);
    }
    Ok(())
}

fn set_price(draft: &mut SaleDraft, lot_id: Uuid, input: &str) -> Result<(), DraftError> {
    let item = line_mut(draft, lot_id)?;
    match parse_pounds_input(input) {
        Some(pence) if pence > MAX_PRICE_PENCE => Err(DraftError::invalid_price(pence)),
        Some(pence) if pence > 0 => {
            item.unit_price_pence = Some(pence);
            item.is_free = false;
            Ok(())
        }
        // Blank, malformed, or non-positive input clears the price;
        // the free flag is left alone
        _ => {
            item.unit_price_pence = None;
            Ok(())
        }
    }
}

fn set_free(draft: &mut SaleDraft, lot_id: Uuid, is_free: bool) -> Result<(), DraftError> {
    let item = line_mut(draft, lot_id)?;
    item.is_free = is_free;
    if is_free {
        item.unit_price_pence = Some(0);
    }
    Ok(())
}

fn set_manual_allocation(
    draft: &mut SaleDraft,
    lot_id: Uuid,
    manual: bool,
) -> Result<(), DraftError> {
    let item = line_mut(draft, lot_id)?;
    item.manual_allocation = manual;
    // Seed from the automatic split so the user edits from a consistent base
    if manual && item.allocations.is_empty() {
        item.allocations = allocate_clamped(&item.lot.purchases, item.qty);
    }
    Ok(())
}

fn set_allocation(
    draft: &mut SaleDraft,
    lot_id: Uuid,
    batch_id: Uuid,
    qty: i64,
) -> Result<(), DraftError> {
    let item = line_mut(draft, lot_id)?;
    if !item.lot.purchases.iter().any(|p| p.id == batch_id) {
        return Err(DraftError::batch_not_found(batch_id));
    }

    let existing = item.allocations.iter().position(|a| a.batch_id == batch_id);
    if qty > 0 {
        match existing {
            Some(idx) => item.allocations[idx].qty = qty,
            None => item.allocations.push(PurchaseAllocation { batch_id, qty }),
        }
    } else if let Some(idx) = existing {
        item.allocations.remove(idx);
    }

    reconcile_allocations(item);
    Ok(())
}

/// Make the allocation total match the line quantity again.
///
/// The last allocation in list order absorbs the difference, floored at
/// zero. It is not capped at its batch's stock here; manual allocation is
/// the user's call and `finalize_draft` reports any remaining mismatch.
fn reconcile_allocations(item: &mut SaleLineItem) {
    let total = item.allocated_qty();
    if total == item.qty {
        return;
    }
    if let Some(last) = item.allocations.last_mut() {
        let diff = item.qty - total;
        last.qty = (last.qty + diff).max(0);
    }
}

fn select_deal(
    draft: &mut SaleDraft,
    deal_id: Option<Uuid>,
    deals: &[PromotionalDeal],
) -> Result<(), DraftError> {
    if let Some(id) = deal_id
        && !deals.iter().any(|d| d.id == id)
    {
        return Err(DraftError::deal_not_found(id));
    }
    draft.selected_deal_id = deal_id;
    Ok(())
}

fn add_consumable(draft: &mut SaleDraft, selection: ConsumableSelection) {
    match draft
        .consumables
        .iter_mut()
        .find(|c| c.consumable_id == selection.consumable_id)
    {
        Some(existing) => *existing = selection,
        None => draft.consumables.push(selection),
    }
}

fn set_consumable_qty(draft: &mut SaleDraft, consumable_id: Uuid, qty: i64) {
    if qty <= 0 {
        draft.consumables.retain(|c| c.consumable_id != consumable_id);
    } else if let Some(c) = draft
        .consumables
        .iter_mut()
        .find(|c| c.consumable_id == consumable_id)
    {
        c.qty = qty;
    }
}
