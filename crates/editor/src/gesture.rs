//! # Gesture State
//!
//! Pointer gestures on the canvas: dragging a panel and resizing it. The
//! states here are plain data; [`crate::controller::InteractionController`]
//! drives them and applies their results to the layout store.

use ledmap_core::{PanelId, Position, Rect, snap_to_grid};

// ============================================================================
// Drag State
// ============================================================================

/// State for dragging a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    /// The panel being dragged
    pub panel_id: PanelId,
    /// Pointer position when the drag began
    pub start_pointer: Position,
    /// Panel position when the drag began
    pub start_position: Position,
    /// Offset from the panel's corner to the pointer
    pub offset: Position,
}

impl DragState {
    /// Start dragging a panel grabbed at `pointer`
    pub fn new(panel_id: PanelId, pointer: Position, panel_position: Position) -> Self {
        Self {
            panel_id,
            start_pointer: pointer,
            start_position: panel_position,
            offset: pointer - panel_position,
        }
    }

    /// Panel position that keeps the grab point under the pointer
    pub fn panel_position(&self, pointer: Position) -> Position {
        pointer - self.offset
    }

    /// Panel position rounded to the grid
    pub fn snapped_position(&self, pointer: Position, step: i32) -> Position {
        let position = self.panel_position(pointer);
        Position::new(snap_to_grid(position.x, step), snap_to_grid(position.y, step))
    }
}

// ============================================================================
// Resize State
// ============================================================================

/// State for resizing a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeState {
    /// The panel being resized
    pub panel_id: PanelId,
    /// Panel rectangle when the resize began
    pub start_rect: Rect,
}

impl ResizeState {
    pub fn new(panel_id: PanelId, start_rect: Rect) -> Self {
        Self {
            panel_id,
            start_rect,
        }
    }
}

// ============================================================================
// Gesture
// ============================================================================

/// The gesture currently in progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging(DragState),
    Resizing(ResizeState),
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Gesture::Dragging(_))
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, Gesture::Resizing(_))
    }

    /// Panel the gesture acts on
    pub fn panel_id(&self) -> Option<PanelId> {
        match self {
            Gesture::Idle => None,
            Gesture::Dragging(drag) => Some(drag.panel_id),
            Gesture::Resizing(resize) => Some(resize.panel_id),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
