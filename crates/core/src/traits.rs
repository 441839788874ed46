//! Core traits for the LED panel mapper
//!
//! This module defines the traits that sit at the seams between the core
//! and its collaborators: validation of loaded data, and the query the core
//! uses to measure panels on whatever surface renders them.

use crate::error::MapperResult;
use crate::types::{PanelId, Position, Rect};

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Types implementing this trait can check their internal consistency
/// and return validation errors if the state is invalid.
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or a `MapperError` describing the problem.
    fn validate(&self) -> MapperResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get all validation errors (for types that can have multiple errors)
    fn validation_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => vec![],
            Err(e) => vec![e.to_string()],
        }
    }
}

// ============================================================================
// RectMeasure Trait
// ============================================================================

/// Query for the rendered rectangle of a panel.
///
/// Implementations must be synchronous and free of side effects. A panel
/// that is not (yet) rendered reports `None`.
pub trait RectMeasure {
    /// Rendered rectangle of a panel, in canvas coordinates
    fn panel_rect(&self, id: PanelId) -> Option<Rect>;

    /// Current scroll offset of the surface hosting the canvas
    fn scroll_offset(&self) -> Position {
        Position::zero()
    }
}

impl<T: RectMeasure + ?Sized> RectMeasure for &T {
    fn panel_rect(&self, id: PanelId) -> Option<Rect> {
        (**self).panel_rect(id)
    }

    fn scroll_offset(&self) -> Position {
        (**self).scroll_offset()
    }
}

// ============================================================================
// Tests
// ============================================================================
