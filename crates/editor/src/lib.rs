//! # Ledmap Editor
//!
//! Headless editing for the LED panel mapper. A rendering surface forwards
//! pointer and keyboard events to the [`InteractionController`], which applies
//! them to the [`LayoutStore`](ledmap_ir::LayoutStore) and resolves drag
//! collisions against the rectangles the surface reports through
//! [`RectMeasure`](ledmap_core::RectMeasure).
//!
//! ## Modules
//!
//! - **gesture**: Drag and resize state
//! - **scheduler**: Sequence-numbered settle checks
//! - **controller**: The drag, resize, selection and keyboard protocol
//! - **session**: Store, controller and configuration for one open layout
//!

pub mod controller;
pub mod gesture;
pub mod scheduler;
pub mod session;

pub use controller::{DragOutcome, EditorKey, InteractionController};
pub use gesture::{DragState, Gesture, ResizeState};
pub use scheduler::{SettleQueue, SettleTask};
pub use session::EditorSession;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use ledmap_core::Position;

    #[test]
    fn test_session_exposes_controller() {
        let mut session = EditorSession::default();
        let (controller, store) = session.parts_mut();
        let id = controller.add_panel(store);
        assert!(controller.drag_start(store, id, Position::zero()));
        assert!(session.controller().gesture().is_dragging());
    }
}
