//! # Ledmap Core
//!
//! Core types, geometry, wiring resolution and error handling for the LED
//! panel mapper.
//!
//! This crate provides the foundational building blocks used throughout
//! the workspace, including:
//!
//! - **Types**: Geometric primitives (Position, Size, Rect) and panel wiring enums
//! - **Geometry**: Greatest-common-divisor unit inference and grid snapping
//! - **Wiring**: The pure resolver that derives entry/exit indicators for a panel
//! - **Traits**: `Validatable` and the `RectMeasure` rendering-surface query
//! - **Errors**: Unified error handling with `MapperError` and `MapperResult`
//!

pub mod error;
pub mod geometry;
pub mod traits;
pub mod types;
pub mod wiring;

// Re-export commonly used items at crate root
pub use error::{MapperError, MapperResult};
pub use geometry::{
    CommonUnit, canvas_to_real, common_offset_unit, gcd, infer_grid_unit, largest_common_unit,
    real_to_canvas, refine_unit, snap_to_grid,
};
pub use traits::{RectMeasure, Validatable};
pub use types::{Axis, Orientation, PanelId, Position, Rect, Size, StartH, StartV};
pub use wiring::{Corner, WiringIndicator, WiringIndicators, resolve_wiring};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
