//! Shared crate-wide constants.

/// Side length of the reference board grid.
///
/// The board ships as a square 3×3 layout. Anything else must be passed
/// explicitly through [`GridConfig`](crate::config::GridConfig).
pub const DEFAULT_GRID_DIMENSION: usize = 3;

/// Largest row or column count a [`GridConfig`](crate::config::GridConfig)
/// accepts.
///
/// Every engine operation is O(rows × cols), and occupancy maps are
/// allocated densely, so the grid is kept small and fixed.
pub const MAX_GRID_DIMENSION: usize = 16;

/// Glyph printed for an unoccupied cell in text dumps of the grid.
pub const EMPTY_CELL_GLYPH: &str = ".";
