//! Plain-text dumps of a layout for the command line and test fixtures.

use std::fmt::Write;

use crate::config::GridConfig;
use crate::constants::EMPTY_CELL_GLYPH;
use crate::model::{GridItem, GridPosition};
use crate::occupancy::item_at;

/// One line per grid row, each cell showing the id of the item covering it
/// (or [`EMPTY_CELL_GLYPH`]), left-aligned to the widest id.
pub fn occupancy_map<P>(config: GridConfig, items: &[GridItem<P>]) -> String {
    let labels: Vec<&str> = config
        .cells()
        .map(|cell| item_at(items, cell).map_or(EMPTY_CELL_GLYPH, |item| item.id.as_str()))
        .collect();
    let width = labels.iter().map(|label| label.len()).max().unwrap_or(1);
    let mut out = String::new();
    for row in labels.chunks(config.cols) {
        let line = row
            .iter()
            .map(|label| format!("{label:<width$}"))
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Comma-separated `(row,col)` list.
pub fn positions(list: &[GridPosition]) -> String {
    let mut out = String::new();
    for (i, position) in list.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{position}");
    }
    out
}
