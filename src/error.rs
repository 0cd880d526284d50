//! Errors raised while building or addressing a grid layout.
//!
//! Move rejections are not errors: the engine reports them as
//! [`RejectReason`](crate::engine::RejectReason) values inside a
//! [`SwitchOutcome`](crate::engine::SwitchOutcome).

use thiserror::Error;

use crate::model::{GridPosition, ItemId};

pub type GridResult<T> = Result<T, GridError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("invalid grid dimensions {rows}x{cols} (each side must be within 1..={max})")]
    InvalidDimensions { rows: usize, cols: usize, max: usize },
    #[error("item {id} does not fit inside the grid")]
    ItemOutOfBounds { id: ItemId },
    #[error("item {id} has a zero span")]
    ZeroSpan { id: ItemId },
    #[error("items {first} and {second} both occupy {position}")]
    Overlap {
        first: ItemId,
        second: ItemId,
        position: GridPosition,
    },
    #[error("duplicate item id {id}")]
    DuplicateId { id: ItemId },
    #[error("no item with id {id}")]
    UnknownItem { id: ItemId },
    #[error("a {rows}x{cols} grid needs an explicit item layout")]
    MissingLayout { rows: usize, cols: usize },
    #[error("invalid item spec {spec:?}: {reason}")]
    InvalidItemSpec { spec: String, reason: String },
}
