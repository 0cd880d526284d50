//! Grid occupancy and merge-aware repositioning for board layouts.
//!
//! A board is a fixed grid of cells. Simple items take one cell; merged
//! items span a rectangle and can be dragged to a new top-left cell, pushing
//! the simple items they land on into the footprint they leave behind.

pub mod config;
pub mod constants;
pub mod dropzone;
pub mod engine;
pub mod error;
pub mod model;
pub mod occupancy;
pub mod render;
pub mod service;
pub mod tracing_sub;

pub use config::GridConfig;
pub use dropzone::{DropzonePreview, dropzone_preview, valid_dropzones};
pub use engine::{RejectReason, SwitchOutcome, calculate_switch_positions};
pub use error::{GridError, GridResult};
pub use model::{GridItem, GridPosition, ItemId, Items};
pub use occupancy::{OccupancyIndex, item_at, items_in_area};
pub use service::GridLayoutService;
