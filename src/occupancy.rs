//! Read-only occupancy lookups over an item snapshot.
//!
//! [`item_at`] and [`items_in_area`] scan the snapshot linearly.
//! [`OccupancyIndex`] answers the same cell lookups from a dense row-major
//! table and doubles as the at-rest layout validator.

use std::collections::HashSet;

use crate::config::GridConfig;
use crate::error::{GridError, GridResult};
use crate::model::{GridItem, GridPosition, area_cells};

/// The item whose rectangle contains `position`, if any.
pub fn item_at<P>(items: &[GridItem<P>], position: GridPosition) -> Option<&GridItem<P>> {
    items.iter().find(|item| item.covers(position))
}

/// Simple items sitting exactly on a cell of the rectangle, row-major.
///
/// Merged items are never returned, even when they cover part of the area:
/// a cell covered only by a merged item contributes nothing. Callers that
/// need to know about merged items in the area must use [`item_at`].
pub fn items_in_area<P>(
    items: &[GridItem<P>],
    start: GridPosition,
    col_span: usize,
    row_span: usize,
) -> Vec<&GridItem<P>> {
    area_cells(start, col_span, row_span)
        .into_iter()
        .filter_map(|cell| {
            items
                .iter()
                .find(|item| !item.is_merged() && item.position() == cell)
        })
        .collect()
}

/// Dense cell → item-index table for one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyIndex {
    config: GridConfig,
    cells: Vec<Option<usize>>,
}

impl OccupancyIndex {
    /// Index `items`, rejecting layouts that break the at-rest invariants:
    /// zero spans, rectangles leaving the grid, duplicate ids, or two items
    /// sharing a cell.
    pub fn build<P>(config: GridConfig, items: &[GridItem<P>]) -> GridResult<Self> {
        config.validate()?;
        let mut cells: Vec<Option<usize>> = vec![None; config.cell_count()];
        let mut seen = HashSet::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            if !seen.insert(&item.id) {
                return Err(GridError::DuplicateId {
                    id: item.id.clone(),
                });
            }
            if item.col_span() == 0 || item.row_span() == 0 {
                return Err(GridError::ZeroSpan {
                    id: item.id.clone(),
                });
            }
            if !config.fits(item.position(), item.col_span(), item.row_span()) {
                return Err(GridError::ItemOutOfBounds {
                    id: item.id.clone(),
                });
            }
            for position in item.cells() {
                let slot = &mut cells[position.row * config.cols + position.col];
                if let Some(existing) = *slot {
                    return Err(GridError::Overlap {
                        first: items[existing].id.clone(),
                        second: item.id.clone(),
                        position,
                    });
                }
                *slot = Some(index);
            }
        }
        Ok(Self { config, cells })
    }

    pub fn config(&self) -> GridConfig {
        self.config
    }

    /// Index into the indexed snapshot of the item covering `position`.
    pub fn item_at(&self, position: GridPosition) -> Option<usize> {
        if !self.config.contains(position) {
            return None;
        }
        self.cells[position.row * self.config.cols + position.col]
    }

    pub fn is_free(&self, position: GridPosition) -> bool {
        self.config.contains(position) && self.item_at(position).is_none()
    }

    /// Unoccupied cells, row-major.
    pub fn free_cells(&self) -> Vec<GridPosition> {
        self.config
            .cells()
            .filter(|cell| self.is_free(*cell))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<GridItem> {
        vec![
            GridItem::merged("M", 0, 0, 2, 1),
            GridItem::simple("A", 1, 0),
            GridItem::simple("B", 1, 1),
            GridItem::simple("C", 1, 2),
        ]
    }

    #[test]
    fn item_at_resolves_merged_footprint() {
        let items = sample();
        assert_eq!(item_at(&items, GridPosition::new(0, 1)).unwrap().id.as_str(), "M");
        assert_eq!(item_at(&items, GridPosition::new(1, 2)).unwrap().id.as_str(), "C");
        assert!(item_at(&items, GridPosition::new(0, 2)).is_none());
        assert!(item_at(&items, GridPosition::new(2, 2)).is_none());
    }

    #[test]
    fn items_in_area_skips_merged_and_empty_cells() {
        let items = sample();
        let found: Vec<_> = items_in_area(&items, GridPosition::new(0, 0), 3, 2)
            .iter()
            .map(|item| item.id.as_str())
            .collect();
        assert_eq!(found, vec!["A", "B", "C"]);
        assert!(items_in_area(&items, GridPosition::new(0, 0), 2, 1).is_empty());
    }

    #[test]
    fn index_matches_linear_scan() {
        let items = sample();
        let config = GridConfig::default();
        let index = OccupancyIndex::build(config, &items).unwrap();
        for cell in config.cells() {
            let scanned = item_at(&items, cell).map(|item| item.id.clone());
            let indexed = index.item_at(cell).map(|i| items[i].id.clone());
            assert_eq!(scanned, indexed, "mismatch at {cell}");
        }
        assert_eq!(
            index.free_cells(),
            vec![
                GridPosition::new(0, 2),
                GridPosition::new(2, 0),
                GridPosition::new(2, 1),
                GridPosition::new(2, 2),
            ]
        );
        assert!(!index.is_free(GridPosition::new(3, 0)));
    }

    #[test]
    fn index_resolves_items_spanning_rows() {
        let items = vec![GridItem::merged("T", 0, 2, 1, 3), GridItem::simple("A", 1, 1)];
        let index = OccupancyIndex::build(GridConfig::default(), &items).unwrap();
        assert_eq!(index.item_at(GridPosition::new(2, 2)), Some(0));
        assert_eq!(index.item_at(GridPosition::new(1, 1)), Some(1));
        assert_eq!(index.config(), GridConfig::default());
    }

    #[test]
    fn build_reports_overlap() {
        let mut items = sample();
        items.push(GridItem::simple("X", 0, 1));
        let err = OccupancyIndex::build(GridConfig::default(), &items).unwrap_err();
        assert_eq!(
            err,
            GridError::Overlap {
                first: "M".into(),
                second: "X".into(),
                position: GridPosition::new(0, 1),
            }
        );
    }

    #[test]
    fn build_reports_bad_items() {
        let config = GridConfig::default();
        let wide = vec![GridItem::merged("W", 0, 2, 2, 1)];
        assert!(matches!(
            OccupancyIndex::build(config, &wide),
            Err(GridError::ItemOutOfBounds { .. })
        ));
        let flat = vec![GridItem::merged("Z", 0, 0, 0, 1)];
        assert!(matches!(
            OccupancyIndex::build(config, &flat),
            Err(GridError::ZeroSpan { .. })
        ));
        let dup = vec![GridItem::simple("A", 0, 0), GridItem::simple("A", 0, 1)];
        assert!(matches!(
            OccupancyIndex::build(config, &dup),
            Err(GridError::DuplicateId { .. })
        ));
    }
}
