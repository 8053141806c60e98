//! Purchase-batch cost allocation
//!
//! When a lot sourced from several purchase batches is sold, the sold
//! quantity has to be attributed back to those batches so cost of goods
//! lands against the right acquisition. The split is proportional to each
//! batch's contributed stock.

use shared::models::PurchaseBatch;
use shared::sale::PurchaseAllocation;
use tracing::debug;

/// Allocation failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    /// Requested quantity exceeds the stock contributed by all batches
    #[error("requested {requested} units but only {available} available across purchase batches")]
    InsufficientStock { requested: i64, available: i64 },
}

/// Attribute a sold quantity across a lot's purchase batches.
///
/// - No batches: empty result, nothing to attribute against.
/// - One batch: the whole quantity goes to it, uncapped. Single-source lots
///   are taken at their word; the lot's own availability is checked
///   elsewhere.
/// - Several batches: proportional split (see `distribute`), after rejecting
///   requests the combined stock cannot cover.
pub fn allocate_for_lot(
    purchases: &[PurchaseBatch],
    sale_qty: i64,
) -> Result<Vec<PurchaseAllocation>, AllocationError> {
    if sale_qty <= 0 || purchases.is_empty() {
        return Ok(Vec::new());
    }
    if purchases.len() == 1 {
        return Ok(vec![PurchaseAllocation {
            batch_id: purchases[0].id,
            qty: sale_qty,
        }]);
    }

    let available: i64 = purchases.iter().map(|p| p.quantity).sum();
    if sale_qty > available {
        return Err(AllocationError::InsufficientStock {
            requested: sale_qty,
            available,
        });
    }

    Ok(distribute(purchases, sale_qty))
}

/// Truncating variant of `allocate_for_lot`.
///
/// Over-sized requests allocate until stock runs out instead of failing; the
/// shortfall is simply left unattributed. The reducer clamps quantities
/// before allocating, so this is for callers that have already accepted the
/// request and only want the best attribution available.
pub fn allocate_clamped(purchases: &[PurchaseBatch], sale_qty: i64) -> Vec<PurchaseAllocation> {
    if sale_qty <= 0 || purchases.is_empty() {
        return Vec::new();
    }
    if purchases.len() == 1 {
        return vec![PurchaseAllocation {
            batch_id: purchases[0].id,
            qty: sale_qty,
        }];
    }

    let available: i64 = purchases.iter().map(|p| p.quantity).sum();
    if sale_qty > available {
        debug!(
            requested = sale_qty,
            available, "allocation truncated at available stock"
        );
    }

    distribute(purchases, sale_qty)
}

/// Proportional split across two or more batches.
///
/// 1. Sort by contributed quantity, descending; ties keep input order
///    (stable sort), so results are deterministic for a given input order.
/// 2. Every batch except the last takes `floor(saleQty * batchQty / totalQty)`,
///    lifted to 1 so tiny contributors are not rounded out entirely, then
///    capped at its own stock and at what is still left to place.
/// 3. The last batch absorbs the remainder, capped at its own stock.
/// 4. Batches that end up with 0 are omitted.
///
/// The total placed never exceeds `min(saleQty, totalQty)`. It can fall a
/// few units short of `saleQty` when flooring starves the last batch past
/// its stock; `finalize_draft` reports that as an allocation mismatch rather
/// than guessing where the difference belongs.
fn distribute(purchases: &[PurchaseBatch], sale_qty: i64) -> Vec<PurchaseAllocation> {
    let total_available: i64 = purchases.iter().map(|p| p.quantity).sum();
    if total_available == 0 {
        return Vec::new();
    }

    let mut sorted: Vec<&PurchaseBatch> = purchases.iter().collect();
    sorted.sort_by(|a, b| b.quantity.cmp(&a.quantity));

    let last = sorted.len() - 1;
    let mut remaining = sale_qty;
    let mut allocations = Vec::new();

    for (idx, batch) in sorted.iter().enumerate() {
        if remaining <= 0 {
            break;
        }
        let share = if idx == last {
            remaining
        } else {
            ((sale_qty * batch.quantity) / total_available).max(1)
        };
        let qty = share.min(batch.quantity).min(remaining);
        if qty > 0 {
            allocations.push(PurchaseAllocation {
                batch_id: batch.id,
                qty,
            });
            remaining -= qty;
        }
    }

    allocations
}
