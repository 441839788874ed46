//! # Interaction Controller
//!
//! Turns pointer and keyboard events into layout store mutations.
//!
//! Dragging runs in two phases. `drag_move` applies the snapped, clamped
//! position to the store at once and schedules a settle check. The check runs
//! on the next [`InteractionController::tick`], once the surface has rendered
//! the new position, and compares the dragged panel's measured rectangle with
//! every other measured rectangle:
//!
//! - overlap marks a collision as pending
//! - no overlap clears the flag and records the position as safe
//!
//! Releasing the panel while a collision is pending puts it back on the last
//! safe position. Resizing snaps and clamps but never checks for collisions.

use crate::gesture::{DragState, Gesture, ResizeState};
use crate::scheduler::SettleQueue;
use ledmap_core::{PanelId, Position, Rect, RectMeasure, Size, snap_to_grid};
use ledmap_ir::{EditorConfig, LayoutStore, Panel};

// ============================================================================
// Keys and Outcomes
// ============================================================================

/// Keyboard keys the canvas reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    Delete,
    Backspace,
    Other,
}

impl EditorKey {
    /// Map a DOM-style key name
    pub fn from_name(name: &str) -> Self {
        match name {
            "Delete" => EditorKey::Delete,
            "Backspace" => EditorKey::Backspace,
            _ => EditorKey::Other,
        }
    }

    /// Whether the key removes the selected panel
    pub fn is_delete(&self) -> bool {
        matches!(self, EditorKey::Delete | EditorKey::Backspace)
    }
}

/// How a drag ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// The panel stays where it was dropped
    Committed(Position),
    /// The drop overlapped another panel; the panel went back to this position
    Reverted(Position),
}

impl DragOutcome {
    pub fn position(&self) -> Position {
        match self {
            DragOutcome::Committed(position) | DragOutcome::Reverted(position) => *position,
        }
    }

    pub fn is_reverted(&self) -> bool {
        matches!(self, DragOutcome::Reverted(_))
    }
}

// ============================================================================
// InteractionController
// ============================================================================

/// Gesture handling for one canvas
#[derive(Debug, Clone)]
pub struct InteractionController {
    gesture: Gesture,
    settle: SettleQueue,
    canvas: Rect,
}

impl InteractionController {
    /// Create a controller confined to the configured canvas
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            gesture: Gesture::Idle,
            settle: SettleQueue::new(),
            canvas: config.canvas_bounds(),
        }
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn canvas(&self) -> Rect {
        self.canvas
    }

    /// Number of settle checks waiting for the next tick
    pub fn pending_checks(&self) -> usize {
        self.settle.len()
    }

    /// Abandon any gesture in progress and drop pending checks
    pub fn reset(&mut self) {
        self.gesture = Gesture::Idle;
        self.settle.clear();
    }

    // ========================================================================
    // Selection and Keys
    // ========================================================================

    /// Pointer down on a panel selects it
    pub fn click_panel(&mut self, store: &mut LayoutStore, id: PanelId) -> bool {
        store.select(id)
    }

    /// Pointer down on the empty canvas clears the selection
    pub fn click_canvas(&mut self, store: &mut LayoutStore) {
        store.clear_selection();
    }

    /// Handle a key press; returns true when a panel was removed
    pub fn handle_key(&mut self, store: &mut LayoutStore, key: EditorKey) -> bool {
        if !key.is_delete() {
            return false;
        }
        let Some(removed) = store.remove_selected() else {
            return false;
        };
        if self.gesture.panel_id() == Some(removed.id) {
            self.reset();
        }
        true
    }

    // ========================================================================
    // Adding Panels
    // ========================================================================

    /// Add a default panel on the first free grid slot.
    ///
    /// Slots are scanned row by row inside the canvas; when none is free the
    /// panel goes to the origin.
    pub fn add_panel(&mut self, store: &mut LayoutStore) -> PanelId {
        let id = store.add_panel();
        let position = self.free_slot(store, id).unwrap_or_else(|| {
            tracing::warn!("No free slot for panel {}, placing it at the origin", id);
            self.canvas.position
        });
        store.move_panel(id, position);
        id
    }

    fn free_slot(&self, store: &LayoutStore, id: PanelId) -> Option<Position> {
        let size = store.panel(id)?.size;
        let step = usize::try_from(store.grid_step()).ok()?.max(1);
        let others = store.other_rects(id);
        let max_x = self.canvas.right().saturating_sub(size.width);
        let max_y = self.canvas.bottom().saturating_sub(size.height);

        (self.canvas.y()..=max_y)
            .step_by(step)
            .flat_map(|y| {
                (self.canvas.x()..=max_x)
                    .step_by(step)
                    .map(move |x| Position::new(x, y))
            })
            .find(|slot| {
                let rect = Rect::new(*slot, size);
                !others.iter().any(|(_, other)| other.intersects(&rect))
            })
    }

    // ========================================================================
    // Dragging
    // ========================================================================

    /// Begin dragging a panel grabbed at `pointer`
    pub fn drag_start(&mut self, store: &mut LayoutStore, id: PanelId, pointer: Position) -> bool {
        let Some(panel) = store.panel(id) else {
            tracing::warn!("Ignoring drag of unknown panel {}", id);
            return false;
        };
        let position = panel.position.unwrap_or(self.canvas.position);

        store.set_safe_position(position);
        store.set_collision_pending(false);
        store.select(id);
        self.settle.clear();
        self.gesture = Gesture::Dragging(DragState::new(id, pointer, position));
        tracing::debug!("Drag of panel {} started at {}", id, position);
        true
    }

    /// Apply a pointer move to the dragged panel and schedule a settle check
    pub fn drag_move(&mut self, store: &mut LayoutStore, pointer: Position) -> Option<Position> {
        let Gesture::Dragging(drag) = self.gesture else {
            return None;
        };
        let size = store.panel(drag.panel_id)?.size;
        let snapped = drag.snapped_position(pointer, store.grid_step());
        let position = self.clamp_position(snapped, size);

        store.move_panel(drag.panel_id, position);
        let sequence = self.settle.schedule(drag.panel_id, position);
        tracing::debug!(
            "Panel {} moved to {} (check #{})",
            drag.panel_id,
            position,
            sequence
        );
        Some(position)
    }

    /// Run pending settle checks with the store as the rendering surface
    pub fn tick(&mut self, store: &mut LayoutStore) -> usize {
        self.run_settle(store, None)
    }

    /// Run pending settle checks against a rendering surface
    pub fn tick_with(&mut self, store: &mut LayoutStore, measure: &dyn RectMeasure) -> usize {
        self.run_settle(store, Some(measure))
    }

    /// Release the dragged panel, measuring with the store itself
    pub fn drag_stop(&mut self, store: &mut LayoutStore) -> Option<DragOutcome> {
        self.finish_drag(store, None)
    }

    /// Release the dragged panel, measuring with a rendering surface
    pub fn drag_stop_with(
        &mut self,
        store: &mut LayoutStore,
        measure: &dyn RectMeasure,
    ) -> Option<DragOutcome> {
        self.finish_drag(store, Some(measure))
    }

    fn finish_drag(
        &mut self,
        store: &mut LayoutStore,
        measure: Option<&dyn RectMeasure>,
    ) -> Option<DragOutcome> {
        let Gesture::Dragging(drag) = self.gesture else {
            return None;
        };
        // Checks scheduled by the last moves must land before the verdict
        self.run_settle(store, measure);
        self.gesture = Gesture::Idle;

        let id = drag.panel_id;
        if store.collision_pending() {
            let safe = store.safe_position();
            store.move_panel(id, safe);
            store.set_collision_pending(false);
            tracing::info!("Panel {} overlapped another panel, returned to {}", id, safe);
            return Some(DragOutcome::Reverted(safe));
        }

        let position = store.panel(id)?.position?;
        store.recompute_bounding_rect();
        tracing::debug!("Panel {} dropped at {}", id, position);
        Some(DragOutcome::Committed(position))
    }

    fn run_settle(&mut self, store: &mut LayoutStore, measure: Option<&dyn RectMeasure>) -> usize {
        let mut checked = 0;
        for task in self.settle.drain() {
            if !self.settle.is_current(&task) {
                tracing::debug!("Discarding stale settle check #{}", task.sequence);
                continue;
            }

            let overlap = match measure {
                Some(measure) => overlaps_others(store, measure, task.panel_id),
                None => overlaps_others(store, &*store, task.panel_id),
            };
            match overlap {
                Some(true) => {
                    store.set_collision_pending(true);
                    tracing::debug!("Panel {} collides at {}", task.panel_id, task.position);
                }
                Some(false) => {
                    store.set_collision_pending(false);
                    store.set_safe_position(task.position);
                }
                None => {
                    tracing::debug!("Panel {} is not rendered, check skipped", task.panel_id);
                }
            }
            checked += 1;
        }
        checked
    }

    // ========================================================================
    // Resizing
    // ========================================================================

    /// Begin resizing a panel
    pub fn resize_start(&mut self, store: &mut LayoutStore, id: PanelId) -> bool {
        let Some(rect) = store.panel(id).map(Panel::rect) else {
            tracing::warn!("Ignoring resize of unknown panel {}", id);
            return false;
        };
        store.select(id);
        self.gesture = Gesture::Resizing(ResizeState::new(id, rect));
        true
    }

    /// Apply an intermediate rectangle reported by the resize handle
    pub fn resize_move(&mut self, store: &mut LayoutStore, proposed: Rect) -> Option<Rect> {
        let Gesture::Resizing(resize) = self.gesture else {
            return None;
        };
        let rect = self.fit_rect(proposed, store.grid_step());
        store.resize_panel(resize.panel_id, rect).then_some(rect)
    }

    /// Apply the final rectangle and end the resize.
    ///
    /// The result is accepted even when it overlaps another panel.
    pub fn resize_stop(&mut self, store: &mut LayoutStore, proposed: Rect) -> Option<Rect> {
        let rect = self.resize_move(store, proposed)?;
        self.gesture = Gesture::Idle;
        store.recompute_bounding_rect();
        tracing::debug!("Panel resized to {}", rect);
        Some(rect)
    }

    // ========================================================================
    // Canvas Bounds
    // ========================================================================

    fn clamp_position(&self, position: Position, size: Size) -> Position {
        let max_x = self.canvas.right().saturating_sub(size.width);
        let max_y = self.canvas.bottom().saturating_sub(size.height);
        Position::new(
            position.x.min(max_x).max(self.canvas.x()),
            position.y.min(max_y).max(self.canvas.y()),
        )
    }

    /// Snap a rectangle to the grid, at least one step in each direction,
    /// inside the canvas
    fn fit_rect(&self, proposed: Rect, step: i32) -> Rect {
        let snap = |value: i32| snap_to_grid(value, step);
        let x = snap(proposed.x())
            .min(self.canvas.right().saturating_sub(step))
            .max(self.canvas.x());
        let y = snap(proposed.y())
            .min(self.canvas.bottom().saturating_sub(step))
            .max(self.canvas.y());
        let width = snap(proposed.width()).max(step).min(self.canvas.right().saturating_sub(x));
        let height = snap(proposed.height()).max(step).min(self.canvas.bottom().saturating_sub(y));
        Rect::from_xywh(x, y, width, height)
    }
}

/// Whether the measured rectangle of `id` overlaps any other measured panel.
///
/// `None` when the panel itself is not rendered.
fn overlaps_others(store: &LayoutStore, measure: &dyn RectMeasure, id: PanelId) -> Option<bool> {
    let rect = measure.panel_rect(id)?;
    let overlap = store
        .ids()
        .into_iter()
        .filter(|other| *other != id)
        .filter_map(|other| measure.panel_rect(other))
        .any(|other| other.intersects(&rect));
    Some(overlap)
}

// ============================================================================
// Tests
// ============================================================================
