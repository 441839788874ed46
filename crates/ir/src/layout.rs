//! The layout store
//!
//! `LayoutStore` is the single authoritative collection of panels for one
//! editing session, together with the state derived from it: the current
//! selection, the per-axis grid factors, the drag collision flag and the
//! rectangle enclosing every panel.
//!
//! Every mutation that changes panel geometry or membership ends with an
//! explicit call to [`LayoutStore::recompute_bounding_rect`].

use crate::config::{EditorConfig, PanelDefaults};
use crate::panel::Panel;
use ledmap_core::{
    Axis, CommonUnit, PanelId, Position, Rect, RectMeasure, Size, WiringIndicators, snap_to_grid,
};
use std::collections::BTreeMap;

// ============================================================================
// LayoutStore
// ============================================================================

/// Panels of one editing session plus derived editor state
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutStore {
    /// Panels keyed (and ordered) by id
    panels: BTreeMap<PanelId, Panel>,

    /// At most one selected panel
    selected: Option<PanelId>,

    /// Real LED pixels per grid unit, horizontally
    grid_factor_x: u32,

    /// Real LED pixels per grid unit, vertically
    grid_factor_y: u32,

    /// Canvas pixels per grid unit
    scale_factor: u32,

    /// Set while the dragged panel overlaps another one
    collision_pending: bool,

    /// Last non-colliding position of the dragged panel
    safe_position: Position,

    /// Rectangle enclosing every placed panel
    bounding_rect: Option<Rect>,

    /// Size and wiring given to added panels
    defaults: PanelDefaults,

    /// Size of an added panel in canvas pixels
    default_size: Size,
}

impl Default for LayoutStore {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl LayoutStore {
    /// Create an empty layout for the given configuration
    pub fn new(config: EditorConfig) -> Self {
        Self {
            panels: BTreeMap::new(),
            selected: None,
            grid_factor_x: 1,
            grid_factor_y: 1,
            scale_factor: config.scale_factor.max(1),
            collision_pending: false,
            safe_position: Position::zero(),
            bounding_rect: None,
            default_size: config.default_panel_size(),
            defaults: config.panel,
        }
    }

    // ========================================================================
    // Panel Management
    // ========================================================================

    /// Id the next added panel will receive
    pub fn next_id(&self) -> PanelId {
        self.panels.keys().next_back().map_or(1, |max| max + 1)
    }

    /// Add an unplaced panel with the default size and wiring
    pub fn add_panel(&mut self) -> PanelId {
        let id = self.next_id();
        let panel = Panel::from_defaults(id, self.default_size, &self.defaults);
        self.panels.insert(id, panel);
        self.recompute_bounding_rect();
        tracing::debug!("Added panel {}", id);
        id
    }

    /// Insert a fully built panel, replacing any panel with the same id
    pub fn insert_panel(&mut self, panel: Panel) -> PanelId {
        let id = panel.id;
        self.panels.insert(id, panel);
        self.recompute_bounding_rect();
        id
    }

    /// Remove a panel, clearing the selection if it was selected
    pub fn remove_panel(&mut self, id: PanelId) -> Option<Panel> {
        let removed = self.panels.remove(&id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.recompute_bounding_rect();
        tracing::info!("Removed panel {}", id);
        Some(removed)
    }

    /// Remove the selected panel; does nothing without a selection
    pub fn remove_selected(&mut self) -> Option<Panel> {
        let id = self.selected?;
        self.remove_panel(id)
    }

    /// Replace every panel and the grid factors in one step
    pub fn replace_all(&mut self, panels: Vec<Panel>, grid: CommonUnit) {
        self.panels = panels.into_iter().map(|panel| (panel.id, panel)).collect();
        self.selected = None;
        self.collision_pending = false;
        self.safe_position = Position::zero();
        self.grid_factor_x = grid.x.max(1);
        self.grid_factor_y = grid.y.max(1);
        self.recompute_bounding_rect();
    }

    /// Remove every panel
    pub fn clear(&mut self) {
        self.panels.clear();
        self.selected = None;
        self.collision_pending = false;
        self.recompute_bounding_rect();
    }

    /// Get a panel by id
    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.panels.get(&id)
    }

    /// Iterate over the panels in id order
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.panels.values()
    }

    /// Ids of all panels in ascending order
    pub fn ids(&self) -> Vec<PanelId> {
        self.panels.keys().copied().collect()
    }

    pub fn contains(&self, id: PanelId) -> bool {
        self.panels.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    // ========================================================================
    // Geometry
    // ========================================================================

    /// Move a panel; returns false for an unknown id
    pub fn move_panel(&mut self, id: PanelId, position: Position) -> bool {
        let Some(panel) = self.panels.get_mut(&id) else {
            return false;
        };
        panel.position = Some(position);
        self.recompute_bounding_rect();
        true
    }

    /// Set a panel's rectangle; returns false for an unknown id
    pub fn resize_panel(&mut self, id: PanelId, rect: Rect) -> bool {
        let Some(panel) = self.panels.get_mut(&id) else {
            return false;
        };
        panel.position = Some(rect.position);
        panel.size = rect.size;
        self.recompute_bounding_rect();
        true
    }

    /// Round every placed panel to whole grid units, at least one unit each way.
    ///
    /// Returns how many panels changed.
    pub fn snap_panels_to_grid(&mut self) -> usize {
        let step = self.grid_step();
        let mut changed = 0;
        for panel in self.panels.values_mut() {
            let Some(rect) = panel.placed_rect() else {
                continue;
            };
            let snapped = Rect::from_xywh(
                snap_to_grid(rect.x(), step),
                snap_to_grid(rect.y(), step),
                snap_to_grid(rect.width(), step).max(step),
                snap_to_grid(rect.height(), step).max(step),
            );
            if snapped != rect {
                panel.position = Some(snapped.position);
                panel.size = snapped.size;
                changed += 1;
            }
        }
        self.recompute_bounding_rect();
        changed
    }

    /// Rectangles of every placed panel except `except`
    pub fn other_rects(&self, except: PanelId) -> Vec<(PanelId, Rect)> {
        self.panels
            .values()
            .filter(|panel| panel.id != except)
            .filter_map(|panel| panel.placed_rect().map(|rect| (panel.id, rect)))
            .collect()
    }

    /// Recompute the rectangle enclosing every placed panel
    pub fn recompute_bounding_rect(&mut self) {
        self.bounding_rect = Rect::enclosing(self.panels.values().filter_map(Panel::placed_rect));
    }

    /// Rectangle enclosing every placed panel
    pub fn bounding_rect(&self) -> Option<Rect> {
        self.bounding_rect
    }

    /// The enclosing rectangle is only shown for two or more panels
    pub fn is_bounding_rect_visible(&self) -> bool {
        self.panels.len() >= 2 && self.bounding_rect.is_some()
    }

    /// LED count implied by the area of the enclosing rectangle.
    ///
    /// This measures the envelope, not the sum of panel areas, so gaps
    /// between panels are counted.
    pub fn total_covered_leds(&self) -> u64 {
        let Some(rect) = self.bounding_rect else {
            return 0;
        };
        let scale = f64::from(self.scale_factor);
        let leds_x = f64::from(rect.width()) / scale * f64::from(self.grid_factor_x);
        let leds_y = f64::from(rect.height()) / scale * f64::from(self.grid_factor_y);
        (leds_x * leds_y).round().max(0.0) as u64
    }

    // ========================================================================
    // Wiring
    // ========================================================================

    /// Flip the horizontal start edge; `None` or unknown ids are ignored
    pub fn toggle_start_h(&mut self, id: Option<PanelId>) -> bool {
        self.update_panel(id, |panel| panel.start_h = panel.start_h.toggled())
    }

    /// Flip the vertical start edge; `None` or unknown ids are ignored
    pub fn toggle_start_v(&mut self, id: Option<PanelId>) -> bool {
        self.update_panel(id, |panel| panel.start_v = panel.start_v.toggled())
    }

    /// Switch between row and column runs; `None` or unknown ids are ignored
    pub fn toggle_orientation(&mut self, id: Option<PanelId>) -> bool {
        self.update_panel(id, |panel| panel.orientation = panel.orientation.toggled())
    }

    /// Flip serpentine wiring; `None` or unknown ids are ignored
    pub fn toggle_serpentine(&mut self, id: Option<PanelId>) -> bool {
        self.update_panel(id, |panel| panel.serpentine = !panel.serpentine)
    }

    fn update_panel(&mut self, id: Option<PanelId>, update: impl FnOnce(&mut Panel)) -> bool {
        match id.and_then(|id| self.panels.get_mut(&id)) {
            Some(panel) => {
                update(panel);
                true
            }
            None => false,
        }
    }

    /// Entry/exit indicators of a panel at the current grid factors
    pub fn wiring_for(&self, id: PanelId) -> Option<WiringIndicators> {
        self.panels
            .get(&id)
            .map(|panel| panel.wiring(self.scale_factor, self.grid_factor_x, self.grid_factor_y))
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Select a panel; unknown ids are ignored
    pub fn select(&mut self, id: PanelId) -> bool {
        if self.panels.contains_key(&id) {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<PanelId> {
        self.selected
    }

    pub fn is_selected(&self, id: PanelId) -> bool {
        self.selected == Some(id)
    }

    // ========================================================================
    // Grid
    // ========================================================================

    pub fn scale_factor(&self) -> u32 {
        self.scale_factor
    }

    /// Grid step in canvas pixels
    pub fn grid_step(&self) -> i32 {
        i32::try_from(self.scale_factor).unwrap_or(i32::MAX)
    }

    pub fn grid_factors(&self) -> CommonUnit {
        CommonUnit::new(self.grid_factor_x, self.grid_factor_y)
    }

    /// Adjust one grid factor by `delta`, never going below 1
    pub fn set_grid_factor(&mut self, axis: Axis, delta: i64) -> u32 {
        let factor = match axis {
            Axis::X => &mut self.grid_factor_x,
            Axis::Y => &mut self.grid_factor_y,
        };
        let adjusted = (i64::from(*factor) + delta).clamp(1, i64::from(u32::MAX));
        *factor = adjusted as u32;
        *factor
    }

    // ========================================================================
    // Drag State
    // ========================================================================

    pub fn collision_pending(&self) -> bool {
        self.collision_pending
    }

    pub fn set_collision_pending(&mut self, pending: bool) {
        self.collision_pending = pending;
    }

    pub fn safe_position(&self) -> Position {
        self.safe_position
    }

    pub fn set_safe_position(&mut self, position: Position) {
        self.safe_position = position;
    }
}

/// The store doubles as a headless rendering surface: a placed panel is
/// rendered exactly at its stored rectangle.
impl RectMeasure for LayoutStore {
    fn panel_rect(&self, id: PanelId) -> Option<Rect> {
        self.panels.get(&id).and_then(Panel::placed_rect)
    }
}

// ============================================================================
// Tests
// ============================================================================
