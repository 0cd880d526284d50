//! Merge-aware repositioning.
//!
//! [`calculate_switch_positions`] decides whether a merged item may be
//! dropped with its top-left corner on a target cell and, if so, builds the
//! resulting snapshot. Simple items found under the destination rectangle
//! are moved into the cells the mover leaves behind, pairing the i-th
//! displaced item (row-major discovery order over the destination) with the
//! i-th vacated cell (row-major over the mover's current footprint). No other
//! heuristic takes part in the pairing.
//!
//! The engine never mutates its input. Rejections return the input snapshot
//! itself (`Arc::ptr_eq` holds) together with a [`RejectReason`].

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::config::GridConfig;
use crate::model::{GridItem, GridPosition, ItemId, Items, area_cells};

/// Why a move was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    /// The destination rectangle leaves the grid.
    #[error("target rectangle exceeds grid bounds")]
    OutOfBounds,
    /// The destination rectangle overlaps another merged item.
    #[error("target rectangle overlaps merged item {blocker}")]
    BlockedByMerged { blocker: ItemId },
    /// More simple items would be displaced than there are vacated cells.
    #[error("{displaced} displaced items cannot fit into {capacity} vacated cells")]
    CapacityExceeded { displaced: usize, capacity: usize },
}

#[derive(Debug, Clone)]
pub struct SwitchOutcome<P = ()> {
    pub valid: bool,
    pub updated_items: Items<P>,
    pub affected_items: Vec<GridItem<P>>,
    pub rejection: Option<RejectReason>,
}

impl<P> SwitchOutcome<P> {
    fn rejected(items: &Items<P>, affected_items: Vec<GridItem<P>>, reason: RejectReason) -> Self {
        Self {
            valid: false,
            updated_items: Arc::clone(items),
            affected_items,
            rejection: Some(reason),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Compute the layout after dropping `merged_item` at `to_position`.
///
/// `merged_item` must be present in `items` (matched by id); its current
/// footprint is taken from the value passed in.
pub fn calculate_switch_positions<P: Clone>(
    config: GridConfig,
    items: &Items<P>,
    merged_item: &GridItem<P>,
    to_position: GridPosition,
) -> SwitchOutcome<P> {
    let col_span = merged_item.col_span();
    let row_span = merged_item.row_span();

    if !config.fits(to_position, col_span, row_span) {
        tracing::debug!(
            item_id = %merged_item.id,
            target = %to_position,
            "move rejected: out of bounds"
        );
        return SwitchOutcome::rejected(items, Vec::new(), RejectReason::OutOfBounds);
    }

    let target_area = area_cells(to_position, col_span, row_span);
    let mut affected_items = Vec::new();
    for cell in &target_area {
        for occupant in items.iter().filter(|item| item.covers(*cell)) {
            if occupant.id == merged_item.id {
                continue;
            }
            if occupant.is_merged() {
                tracing::debug!(
                    item_id = %merged_item.id,
                    target = %to_position,
                    blocker = %occupant.id,
                    "move rejected: blocked by merged item"
                );
                return SwitchOutcome::rejected(
                    items,
                    Vec::new(),
                    RejectReason::BlockedByMerged {
                        blocker: occupant.id.clone(),
                    },
                );
            }
            affected_items.push(occupant.clone());
        }
    }

    // Cells of the current footprint that the mover no longer covers after
    // the move. For disjoint moves this is the whole footprint.
    let vacated: Vec<GridPosition> = merged_item
        .cells()
        .into_iter()
        .filter(|cell| !target_area.contains(cell))
        .collect();

    if affected_items.len() > vacated.len() {
        let reason = RejectReason::CapacityExceeded {
            displaced: affected_items.len(),
            capacity: vacated.len(),
        };
        tracing::debug!(item_id = %merged_item.id, target = %to_position, %reason, "move rejected");
        return SwitchOutcome::rejected(items, affected_items, reason);
    }

    let relocations: HashMap<&ItemId, GridPosition> = affected_items
        .iter()
        .map(|item| &item.id)
        .zip(vacated.iter().copied())
        .collect();

    let updated_items: Items<P> = items
        .iter()
        .map(|item| {
            if item.id == merged_item.id {
                item.at(to_position)
            } else if let Some(cell) = relocations.get(&item.id) {
                item.at(*cell)
            } else {
                item.clone()
            }
        })
        .collect();

    tracing::trace!(
        item_id = %merged_item.id,
        target = %to_position,
        displaced = affected_items.len(),
        "move accepted"
    );

    SwitchOutcome {
        valid: true,
        updated_items,
        affected_items,
        rejection: None,
    }
}
