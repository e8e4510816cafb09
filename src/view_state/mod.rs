//! View-state layer - layout, coordinate mapping and scrolling
//!
//! Everything here is pure and synchronous: no terminal, no file access.
//! Hosts drive a [`LayoutEngine`] and draw what it reports.
//!
//! # Module Structure
//!
//! - `metrics`: Metrics - cell geometry from the host font
//! - `structure`: Structure - bytes per row and column positions within a row
//! - `dimensions`: Dimensions - component sub-rectangles and page counts
//! - `visibility`: Visibility - visible column ranges per section
//! - `scroll`: Scrolling - scroll position, stepping, reveal, scrollbar mapping
//! - `caret`: Caret - caret position, movement and blink
//! - `selection`: Selection - anchor/active byte range and its rectangles
//! - `layout`: LayoutSnapshot - document cells to pixels
//! - `hit_test`: pixels to caret positions
//! - `row_data`: RowData - decoded characters per visible row
//! - `engine`: LayoutEngine - owns all of the above and orders recomputation

pub mod caret;
pub mod dimensions;
pub mod engine;
pub mod layout;
pub mod metrics;
pub mod row_data;
pub mod scroll;
pub mod selection;
pub mod structure;
pub mod visibility;

pub use caret::{CaretPosition, MovementDirection, PositionOverflowMode};
pub use dimensions::{PixelRect, Zone};
pub use engine::{EngineConfig, LayoutEngine};
pub use metrics::{FontMetrics, Metrics};
pub use row_data::RowData;
pub use scroll::{ScrollAxis, ScrollBarState, ScrollPosition, ScrollingDirection};
pub use structure::StructureConfig;
