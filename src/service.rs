//! Owner of the authoritative item collection.
//!
//! Everything that reads the grid works on a [`snapshot`](GridLayoutService::snapshot);
//! commits swap in a whole new collection, so snapshots handed out earlier
//! keep seeing the layout they were taken from.

use std::sync::Arc;

use crate::config::GridConfig;
use crate::dropzone::{DropzonePreview, dropzone_preview, valid_dropzones};
use crate::engine::{SwitchOutcome, calculate_switch_positions};
use crate::error::{GridError, GridResult};
use crate::model::{GridItem, GridPosition, ItemId, Items, seed_layout};
use crate::occupancy::{OccupancyIndex, item_at};

#[derive(Debug, Clone)]
pub struct GridLayoutService<P = ()> {
    config: GridConfig,
    items: Items<P>,
    generation: u64,
}

impl GridLayoutService<String> {
    /// The reference 3×3 board.
    pub fn seeded() -> GridResult<Self> {
        Self::new(GridConfig::default(), seed_layout())
    }
}

impl<P: Clone> GridLayoutService<P> {
    /// Validate and adopt an initial layout.
    pub fn new(config: GridConfig, items: impl Into<Items<P>>) -> GridResult<Self> {
        let items = items.into();
        OccupancyIndex::build(config, &items)?;
        tracing::debug!(
            rows = config.rows,
            cols = config.cols,
            items = items.len(),
            "grid layout ready"
        );
        Ok(Self {
            config,
            items,
            generation: 0,
        })
    }

    pub fn config(&self) -> GridConfig {
        self.config
    }

    pub fn snapshot(&self) -> Items<P> {
        Arc::clone(&self.items)
    }

    /// Number of successful commits so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn item(&self, id: &ItemId) -> Option<&GridItem<P>> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn item_at(&self, position: GridPosition) -> Option<&GridItem<P>> {
        item_at(&self.items, position)
    }

    pub fn occupancy(&self) -> GridResult<OccupancyIndex> {
        OccupancyIndex::build(self.config, &self.items)
    }

    pub fn valid_dropzones(&self, id: &ItemId) -> GridResult<Vec<GridPosition>> {
        let item = self.require(id)?;
        Ok(valid_dropzones(self.config, item))
    }

    pub fn preview(&self, id: &ItemId, position: GridPosition) -> GridResult<DropzonePreview<P>> {
        let item = self.require(id)?;
        Ok(dropzone_preview(self.config, &self.items, item, position))
    }

    /// Move a merged item, committing only when the engine accepts.
    ///
    /// The mover is looked up by id in the authoritative collection, so a
    /// stale copy held by the caller cannot desynchronise the footprint.
    pub fn try_move_merged_item(
        &mut self,
        id: &ItemId,
        to_position: GridPosition,
    ) -> GridResult<SwitchOutcome<P>> {
        let mover = self.require(id)?.clone();
        let outcome = calculate_switch_positions(self.config, &self.items, &mover, to_position);
        if outcome.valid {
            self.commit(Arc::clone(&outcome.updated_items));
            tracing::debug!(
                item_id = %id,
                target = %to_position,
                displaced = outcome.affected_items.len(),
                generation = self.generation,
                "committed merged move"
            );
        }
        Ok(outcome)
    }

    /// Boolean form of [`try_move_merged_item`](Self::try_move_merged_item):
    /// `false` for any rejection, including an unknown mover.
    pub fn move_merged_item(
        &mut self,
        merged_item: &GridItem<P>,
        to_position: GridPosition,
    ) -> bool {
        match self.try_move_merged_item(&merged_item.id, to_position) {
            Ok(outcome) => outcome.valid,
            Err(err) => {
                tracing::debug!(error = %err, "move ignored");
                false
            }
        }
    }

    /// Exchange two simple items. Empty cells and merged items make this a
    /// no-op; returns whether a swap happened.
    pub fn swap_items(&mut self, from_position: GridPosition, to_position: GridPosition) -> bool {
        let (Some(from), Some(to)) = (self.item_at(from_position), self.item_at(to_position)) else {
            tracing::trace!(from = %from_position, to = %to_position, "swap ignored: empty cell");
            return false;
        };
        if from.is_merged() || to.is_merged() {
            tracing::trace!(from = %from_position, to = %to_position, "swap ignored: merged item");
            return false;
        }
        if from.id == to.id {
            tracing::trace!(from = %from_position, to = %to_position, "swap ignored: same item");
            return false;
        }
        let (from_id, to_id) = (from.id.clone(), to.id.clone());
        let (from_cell, to_cell) = (from.position(), to.position());
        let updated: Items<P> = self
            .items
            .iter()
            .map(|item| {
                if item.id == from_id {
                    item.at(to_cell)
                } else if item.id == to_id {
                    item.at(from_cell)
                } else {
                    item.clone()
                }
            })
            .collect();
        self.commit(updated);
        tracing::debug!(
            from = %from_id,
            to = %to_id,
            generation = self.generation,
            "swapped items"
        );
        true
    }

    fn commit(&mut self, items: Items<P>) {
        self.items = items;
        self.generation += 1;
    }

    fn require(&self, id: &ItemId) -> GridResult<&GridItem<P>> {
        self.item(id)
            .ok_or_else(|| GridError::UnknownItem { id: id.clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RejectReason;

    fn service() -> GridLayoutService<String> {
        GridLayoutService::seeded().unwrap()
    }

    #[test]
    fn rejects_invalid_seed() {
        let items = vec![GridItem::simple("A", 0, 0), GridItem::merged("M", 0, 0, 2, 1)];
        assert!(matches!(
            GridLayoutService::<()>::new(GridConfig::default(), items),
            Err(GridError::Overlap { .. })
        ));
    }

    #[test]
    fn move_commits_and_bumps_generation() {
        let mut grid = service();
        let before = grid.snapshot();
        let header = grid.item(&"M".into()).unwrap().clone();
        assert!(grid.move_merged_item(&header, GridPosition::new(2, 1)));
        assert_eq!(grid.generation(), 1);
        assert_eq!(
            grid.item(&"M".into()).unwrap().position(),
            GridPosition::new(2, 1)
        );
        assert_eq!(grid.item(&"S3".into()).unwrap().position(), GridPosition::new(0, 0));
        assert_eq!(grid.item(&"S4".into()).unwrap().position(), GridPosition::new(0, 1));
        // Old snapshot still reflects the pre-move layout.
        assert_eq!(before[0].position(), GridPosition::new(0, 0));
        assert!(grid.occupancy().is_ok());
    }

    #[test]
    fn rejected_move_keeps_state() {
        let mut grid = service();
        let before = grid.snapshot();
        let outcome = grid
            .try_move_merged_item(&"M".into(), GridPosition::new(1, 0))
            .unwrap();
        assert_eq!(
            outcome.rejection,
            Some(RejectReason::BlockedByMerged { blocker: "T".into() })
        );
        assert!(Arc::ptr_eq(&grid.snapshot(), &before));
        assert_eq!(grid.generation(), 0);
    }

    #[test]
    fn unknown_mover_is_an_error() {
        let mut grid = service();
        assert_eq!(
            grid.try_move_merged_item(&"nope".into(), GridPosition::new(0, 0))
                .unwrap_err(),
            GridError::UnknownItem { id: "nope".into() }
        );
        let ghost = GridItem::merged("ghost", 0, 0, 2, 1).with_payload(String::new());
        assert!(!grid.move_merged_item(&ghost, GridPosition::new(1, 1)));
    }

    #[test]
    fn swap_exchanges_simple_items() {
        let mut grid = service();
        assert!(grid.swap_items(GridPosition::new(0, 2), GridPosition::new(2, 2)));
        assert_eq!(grid.item(&"C1".into()).unwrap().position(), GridPosition::new(2, 2));
        assert_eq!(grid.item(&"S4".into()).unwrap().position(), GridPosition::new(0, 2));
        assert_eq!(grid.generation(), 1);
    }

    #[test]
    fn swap_with_itself_does_not_commit() {
        let mut grid = service();
        let before = grid.snapshot();
        assert!(!grid.swap_items(GridPosition::new(1, 1), GridPosition::new(1, 1)));
        assert_eq!(grid.generation(), 0);
        assert!(Arc::ptr_eq(&grid.snapshot(), &before));
    }

    #[test]
    fn swap_ignores_merged_and_empty_cells() {
        let mut grid = service();
        let before = grid.snapshot();
        assert!(!grid.swap_items(GridPosition::new(0, 1), GridPosition::new(1, 1)));
        assert!(!grid.swap_items(GridPosition::new(1, 1), GridPosition::new(2, 0)));

        let mut sparse =
            GridLayoutService::<()>::new(GridConfig::default(), vec![GridItem::simple("A", 0, 0)])
                .unwrap();
        assert!(!sparse.swap_items(GridPosition::new(0, 0), GridPosition::new(1, 1)));
        assert!(Arc::ptr_eq(&grid.snapshot(), &before));
    }

    #[test]
    fn dropzones_and_preview_by_id() {
        let grid = service();
        let zones = grid.valid_dropzones(&"T".into()).unwrap();
        assert_eq!(zones.len(), 5);
        let preview = grid.preview(&"T".into(), GridPosition::new(1, 2)).unwrap();
        assert!(preview.valid);
        let ids: Vec<_> = preview.affected.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["S2", "S4"]);
        assert!(grid.valid_dropzones(&"X".into()).is_err());
    }
}
