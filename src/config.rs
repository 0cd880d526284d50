//! Grid dimensions.

use crate::constants::{DEFAULT_GRID_DIMENSION, MAX_GRID_DIMENSION};
use crate::error::{GridError, GridResult};
use crate::model::GridPosition;

/// Row and column count of a grid. Passed into every bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::square(DEFAULT_GRID_DIMENSION)
    }
}

impl GridConfig {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub const fn square(dimension: usize) -> Self {
        Self::new(dimension, dimension)
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn validate(&self) -> GridResult<()> {
        let valid = |side: usize| (1..=MAX_GRID_DIMENSION).contains(&side);
        if valid(self.rows) && valid(self.cols) {
            Ok(())
        } else {
            Err(GridError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
                max: MAX_GRID_DIMENSION,
            })
        }
    }

    pub fn contains(&self, position: GridPosition) -> bool {
        position.row < self.rows && position.col < self.cols
    }

    /// Whether a `col_span × row_span` rectangle rooted at `position` lies
    /// entirely inside the grid.
    pub fn fits(&self, position: GridPosition, col_span: usize, row_span: usize) -> bool {
        position
            .row
            .checked_add(row_span)
            .is_some_and(|bottom| bottom <= self.rows)
            && position
                .col
                .checked_add(col_span)
                .is_some_and(|right| right <= self.cols)
    }

    /// Every cell of the grid in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = GridPosition> + '_ {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| GridPosition::new(row, col)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_reference_square() {
        let config = GridConfig::default();
        assert_eq!(config, GridConfig::new(3, 3));
        assert_eq!(config.cell_count(), 9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_and_oversized() {
        assert!(matches!(
            GridConfig::new(0, 3).validate(),
            Err(GridError::InvalidDimensions { rows: 0, cols: 3, .. })
        ));
        assert!(GridConfig::square(MAX_GRID_DIMENSION + 1).validate().is_err());
        assert!(GridConfig::new(1, MAX_GRID_DIMENSION).validate().is_ok());
    }

    #[test]
    fn fits_checks_far_edges() {
        let config = GridConfig::default();
        assert!(config.fits(GridPosition::new(1, 1), 2, 2));
        assert!(!config.fits(GridPosition::new(1, 2), 2, 1));
        assert!(!config.fits(GridPosition::new(2, 0), 1, 2));
        assert!(!config.fits(GridPosition::new(usize::MAX, 0), 1, 1));
    }

    #[test]
    fn cells_are_row_major() {
        let cells: Vec<_> = GridConfig::new(2, 2).cells().collect();
        assert_eq!(
            cells,
            vec![
                GridPosition::new(0, 0),
                GridPosition::new(0, 1),
                GridPosition::new(1, 0),
                GridPosition::new(1, 1),
            ]
        );
    }
}
