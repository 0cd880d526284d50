//! Grid data: positions, items and the reference seed layout.
//!
//! Items are plain data. Nothing in this module mutates an item in place;
//! repositioning produces a new item through [`GridItem::at`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::GridError;

/// Zero-indexed cell coordinate. Orders row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct GridPosition {
    pub row: usize,
    pub col: usize,
}

impl GridPosition {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

impl From<(usize, usize)> for GridPosition {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// Opaque item identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ItemId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// A cell on the grid. Spans default to 1 when absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GridItem<P = ()> {
    pub id: ItemId,
    pub row: usize,
    pub col: usize,
    pub col_span: Option<usize>,
    pub row_span: Option<usize>,
    pub payload: P,
}

impl GridItem<()> {
    pub fn simple(id: impl Into<ItemId>, row: usize, col: usize) -> Self {
        Self {
            id: id.into(),
            row,
            col,
            col_span: None,
            row_span: None,
            payload: (),
        }
    }

    pub fn merged(
        id: impl Into<ItemId>,
        row: usize,
        col: usize,
        col_span: usize,
        row_span: usize,
    ) -> Self {
        Self {
            id: id.into(),
            row,
            col,
            col_span: Some(col_span),
            row_span: Some(row_span),
            payload: (),
        }
    }
}

impl<P> GridItem<P> {
    pub fn with_payload<Q>(self, payload: Q) -> GridItem<Q> {
        GridItem {
            id: self.id,
            row: self.row,
            col: self.col,
            col_span: self.col_span,
            row_span: self.row_span,
            payload,
        }
    }

    pub fn col_span(&self) -> usize {
        self.col_span.unwrap_or(1)
    }

    pub fn row_span(&self) -> usize {
        self.row_span.unwrap_or(1)
    }

    pub fn position(&self) -> GridPosition {
        GridPosition::new(self.row, self.col)
    }

    /// True when the item covers more than one unit cell.
    pub fn is_merged(&self) -> bool {
        self.col_span() > 1 || self.row_span() > 1
    }

    pub fn covers(&self, position: GridPosition) -> bool {
        position.row >= self.row
            && position.row < self.row + self.row_span()
            && position.col >= self.col
            && position.col < self.col + self.col_span()
    }

    /// Unit cells under the item, row-major.
    pub fn cells(&self) -> Vec<GridPosition> {
        area_cells(self.position(), self.col_span(), self.row_span())
    }

    pub fn overlaps(&self, other: &GridItem<P>) -> bool {
        self.row < other.row + other.row_span()
            && other.row < self.row + self.row_span()
            && self.col < other.col + other.col_span()
            && other.col < self.col + self.col_span()
    }
}

impl<P: Clone> GridItem<P> {
    /// A copy of this item rooted at `position`, spans unchanged.
    pub fn at(&self, position: GridPosition) -> Self {
        Self {
            row: position.row,
            col: position.col,
            ..self.clone()
        }
    }
}

/// Immutable snapshot of a grid's items.
pub type Items<P = ()> = Arc<[GridItem<P>]>;

/// The `col_span × row_span` cells rooted at `start`, outer loop rows, inner
/// loop columns. Relocation pairing depends on this order.
pub fn area_cells(start: GridPosition, col_span: usize, row_span: usize) -> Vec<GridPosition> {
    let mut cells = Vec::with_capacity(col_span * row_span);
    for row in start.row..start.row + row_span {
        for col in start.col..start.col + col_span {
            cells.push(GridPosition::new(row, col));
        }
    }
    cells
}

/// Parses `ID@ROW,COL[:COLSxROWS][=LABEL]`, e.g. `M@0,0:2x1=Header`.
impl FromStr for GridItem<String> {
    type Err = GridError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| GridError::InvalidItemSpec {
            spec: spec.to_string(),
            reason: reason.to_string(),
        };
        let (head, label) = match spec.split_once('=') {
            Some((head, label)) => (head, Some(label)),
            None => (spec, None),
        };
        let (id, placement) = head.split_once('@').ok_or_else(|| invalid("missing '@'"))?;
        if id.is_empty() {
            return Err(invalid("empty id"));
        }
        let (coords, spans) = match placement.split_once(':') {
            Some((coords, spans)) => (coords, Some(spans)),
            None => (placement, None),
        };
        let (row, col) = coords
            .split_once(',')
            .ok_or_else(|| invalid("position must be ROW,COL"))?;
        let parse = |raw: &str, what: &str| {
            raw.trim()
                .parse::<usize>()
                .map_err(|_| invalid(&format!("{what} is not a number")))
        };
        let row = parse(row, "row")?;
        let col = parse(col, "col")?;
        let (col_span, row_span) = match spans {
            Some(spans) => {
                let (cols, rows) = spans
                    .split_once('x')
                    .ok_or_else(|| invalid("span must be COLSxROWS"))?;
                (Some(parse(cols, "column span")?), Some(parse(rows, "row span")?))
            }
            None => (None, None),
        };
        Ok(GridItem {
            id: ItemId::new(id),
            row,
            col,
            col_span,
            row_span,
            payload: label.unwrap_or(id).to_string(),
        })
    }
}

/// The reference 3×3 board: a two-wide header, a two-tall sidebar and five
/// single cells. Every cell is covered.
pub fn seed_layout() -> Vec<GridItem<String>> {
    vec![
        GridItem::merged("M", 0, 0, 2, 1).with_payload("Lecture plan".to_string()),
        GridItem::simple("C1", 0, 2).with_payload("Schedule".to_string()),
        GridItem::merged("T", 1, 0, 1, 2).with_payload("Reports".to_string()),
        GridItem::simple("S1", 1, 1).with_payload("Photo 1".to_string()),
        GridItem::simple("S2", 1, 2).with_payload("Photo 2".to_string()),
        GridItem::simple("S3", 2, 1).with_payload("Photo 3".to_string()),
        GridItem::simple("S4", 2, 2).with_payload("Photo 4".to_string()),
    ]
}
