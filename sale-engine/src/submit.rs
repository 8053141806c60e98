//! Draft Finalization
//!
//! Validates a finished draft and turns it into the persistence payload.
//! The discount is re-evaluated against the final lines here, so a draft
//! that was edited outside the reducer still submits a consistent figure.

use crate::allocation::allocate_clamped;
use crate::deals::evaluate_deal;
use crate::totals::compute_totals;
use shared::models::PromotionalDeal;
use shared::sale::{
    DraftError, DraftErrorCode, PurchaseAllocation, SaleDraft, SaleLineItem, SaleSubmission,
    SubmittedItem,
};
use tracing::debug;

/// Validate a draft and produce the submission payload.
///
/// Checks run in the order the operator can fix them: draft-level fields
/// first, then each line. The first failure is returned; the draft is never
/// modified.
pub fn finalize_draft(
    draft: &SaleDraft,
    deals: &[PromotionalDeal],
) -> Result<SaleSubmission, DraftError> {
    if draft.items.is_empty() {
        return Err(DraftError::new(
            DraftErrorCode::EmptyDraft,
            "Please add at least one card to the sale",
        ));
    }
    if draft.order_number.trim().is_empty() {
        return Err(DraftError::new(
            DraftErrorCode::MissingOrderNumber,
            "Please enter an order number",
        ));
    }
    let buyer = match &draft.buyer {
        Some(b) if !b.handle.trim().is_empty() => b.clone(),
        _ => {
            return Err(DraftError::new(
                DraftErrorCode::MissingBuyer,
                "Please enter a buyer handle",
            ));
        }
    };

    let mut items = Vec::with_capacity(draft.items.len());
    for item in &draft.items {
        if !item.is_free && item.unit_price_pence.is_none_or(|p| p <= 0) {
            return Err(DraftError::new(
                DraftErrorCode::MissingPrice,
                "Please enter a price for all cards or mark them as free",
            ));
        }
        if item.qty < 1 {
            return Err(DraftError::new(
                DraftErrorCode::InvalidQuantity,
                "Please enter a valid quantity for all cards",
            ));
        }
        if item.qty > item.lot.available_qty {
            return Err(DraftError::insufficient_stock(item.lot.available_qty));
        }

        let allocations = resolve_allocations(item);
        if !item.lot.purchases.is_empty() {
            let allocated: i64 = allocations.iter().map(|a| a.qty).sum();
            if allocated != item.qty {
                return Err(DraftError::new(
                    DraftErrorCode::AllocationMismatch,
                    format!(
                        "Allocations cover {allocated} of {} items for {}",
                        item.qty, item.lot.card.name
                    ),
                ));
            }
        }

        items.push(SubmittedItem {
            lot_id: item.lot_id,
            qty: item.qty,
            unit_price_pence: item.effective_unit_price(),
            is_free: item.is_free,
            allocations,
        });
    }

    let discount = draft
        .selected_deal_id
        .and_then(|id| deals.iter().find(|d| d.id == id))
        .and_then(|deal| evaluate_deal(&draft.items, deal));
    let totals = compute_totals(
        &draft.items,
        &draft.fees_input,
        &draft.shipping_input,
        &draft.consumables,
        discount.as_ref(),
        draft.selected_deal_id,
    );

    let submission = SaleSubmission {
        order_number: draft.order_number.trim().to_string(),
        buyer,
        sold_at: draft.sold_at,
        items,
        deal_id: draft.selected_deal_id,
        discount_pence: discount.map(|d| d.amount_pence()).unwrap_or(0),
        totals,
    };
    debug!(
        order_number = %submission.order_number,
        items = submission.items.len(),
        revenue = submission.totals.revenue,
        net_profit = submission.totals.net_profit,
        "draft finalized"
    );
    Ok(submission)
}

/// Final cost attribution for one line.
///
/// Single-batch lots always get the full attribution; multi-batch lots keep
/// the operator's manual split when there is one, otherwise the automatic
/// split is rebuilt from the final quantity. Lots without purchase records
/// submit no attribution at all.
fn resolve_allocations(item: &SaleLineItem) -> Vec<PurchaseAllocation> {
    let purchases = &item.lot.purchases;
    match purchases.len() {
        0 => Vec::new(),
        1 => vec![PurchaseAllocation {
            batch_id: purchases[0].id,
            qty: item.qty,
        }],
        _ if item.manual_allocation && !item.allocations.is_empty() => item.allocations.clone(),
        _ => allocate_clamped(purchases, item.qty),
    }
}
