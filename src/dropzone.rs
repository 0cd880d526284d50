//! Hover-time helpers for drag gestures. Nothing here commits.

use crate::config::GridConfig;
use crate::engine::{RejectReason, calculate_switch_positions};
use crate::model::{GridItem, GridPosition, Items};

/// Every top-left cell the item's rectangle would fit at, except where it
/// already sits. Purely geometric: occupancy is not consulted, so the result
/// is a superset of the legal moves and is meant for highlighting only.
pub fn valid_dropzones<P>(config: GridConfig, item: &GridItem<P>) -> Vec<GridPosition> {
    let col_span = item.col_span();
    let row_span = item.row_span();
    if col_span > config.cols || row_span > config.rows {
        return Vec::new();
    }
    let current = item.position();
    let mut zones = Vec::new();
    for row in 0..=config.rows - row_span {
        for col in 0..=config.cols - col_span {
            let candidate = GridPosition::new(row, col);
            if candidate != current {
                zones.push(candidate);
            }
        }
    }
    zones
}

/// What a drop at a given cell would do.
#[derive(Debug, Clone)]
pub struct DropzonePreview<P = ()> {
    pub affected: Vec<GridItem<P>>,
    pub valid: bool,
    pub rejection: Option<RejectReason>,
}

/// Run the switch engine without committing. Safe to call on every pointer
/// move; the snapshot is only read.
pub fn dropzone_preview<P: Clone>(
    config: GridConfig,
    items: &Items<P>,
    merged_item: &GridItem<P>,
    drop_position: GridPosition,
) -> DropzonePreview<P> {
    let outcome = calculate_switch_positions(config, items, merged_item, drop_position);
    DropzonePreview {
        affected: outcome.affected_items,
        valid: outcome.valid,
        rejection: outcome.rejection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropzones_enumerate_fitting_corners() {
        let header = GridItem::merged("M", 0, 0, 2, 1);
        let zones = valid_dropzones(GridConfig::default(), &header);
        assert_eq!(
            zones,
            vec![
                GridPosition::new(0, 1),
                GridPosition::new(1, 0),
                GridPosition::new(1, 1),
                GridPosition::new(2, 0),
                GridPosition::new(2, 1),
            ]
        );
    }

    #[test]
    fn dropzones_for_square_block() {
        let block = GridItem::merged("B", 1, 1, 2, 2);
        let zones = valid_dropzones(GridConfig::default(), &block);
        assert_eq!(
            zones,
            vec![
                GridPosition::new(0, 0),
                GridPosition::new(0, 1),
                GridPosition::new(1, 0),
            ]
        );
    }

    #[test]
    fn dropzones_empty_when_item_fills_grid() {
        let full = GridItem::merged("F", 0, 0, 3, 3);
        assert!(valid_dropzones(GridConfig::default(), &full).is_empty());
        let too_wide = GridItem::merged("W", 0, 0, 4, 1);
        assert!(valid_dropzones(GridConfig::default(), &too_wide).is_empty());
    }

    #[test]
    fn preview_does_not_touch_snapshot() {
        let items: Items = vec![
            GridItem::merged("M", 0, 0, 2, 1),
            GridItem::simple("A", 1, 0),
            GridItem::simple("B", 1, 1),
        ]
        .into();
        let before = items.to_vec();
        let preview = dropzone_preview(
            GridConfig::default(),
            &items,
            &items[0],
            GridPosition::new(1, 0),
        );
        assert!(preview.valid);
        assert_eq!(preview.affected.len(), 2);
        assert_eq!(items.to_vec(), before);

        let blocked = dropzone_preview(
            GridConfig::default(),
            &items,
            &items[0],
            GridPosition::new(2, 2),
        );
        assert!(!blocked.valid);
        assert_eq!(blocked.rejection, Some(RejectReason::OutOfBounds));
    }
}
