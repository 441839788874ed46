//! Panel definitions
//!
//! A `Panel` is one rectangular LED matrix on the canvas: where it sits, how
//! large it is in canvas pixels, and how its strip is wired.

use crate::config::PanelDefaults;
use ledmap_core::{
    Orientation, PanelId, Position, Rect, Size, StartH, StartV, WiringIndicators, canvas_to_real,
    resolve_wiring,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Panel
// ============================================================================

/// A rectangular LED panel on the canvas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    /// Identifier, unique within the layout
    pub id: PanelId,

    /// Top-left corner in canvas pixels; `None` until the panel is placed
    pub position: Option<Position>,

    /// Size in canvas pixels, a positive multiple of the grid step
    pub size: Size,

    /// Horizontal edge where the strip enters
    pub start_h: StartH,

    /// Vertical edge where the strip enters
    pub start_v: StartV,

    /// Whether the LEDs run along rows or columns
    pub orientation: Orientation,

    /// Whether alternating rows/columns reverse direction
    pub serpentine: bool,
}

impl Panel {
    /// Create an unplaced panel with the stock wiring (top-left, horizontal, serpentine)
    pub fn new(id: PanelId, size: Size) -> Self {
        Self::from_defaults(id, size, &PanelDefaults::default())
    }

    /// Create an unplaced panel with the given wiring defaults
    pub fn from_defaults(id: PanelId, size: Size, defaults: &PanelDefaults) -> Self {
        Self {
            id,
            position: None,
            size,
            start_h: defaults.start_h,
            start_v: defaults.start_v,
            orientation: defaults.orientation,
            serpentine: defaults.serpentine,
        }
    }

    /// Builder: place the panel
    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Builder: set the wiring configuration
    pub fn with_wiring(
        mut self,
        start_h: StartH,
        start_v: StartV,
        orientation: Orientation,
        serpentine: bool,
    ) -> Self {
        self.start_h = start_h;
        self.start_v = start_v;
        self.orientation = orientation;
        self.serpentine = serpentine;
        self
    }

    /// Whether a position has been assigned
    pub fn is_placed(&self) -> bool {
        self.position.is_some()
    }

    /// Canvas rectangle; an unplaced panel reports the origin
    pub fn rect(&self) -> Rect {
        Rect::new(self.position.unwrap_or_default(), self.size)
    }

    /// Canvas rectangle of a placed panel
    pub fn placed_rect(&self) -> Option<Rect> {
        self.position.map(|position| Rect::new(position, self.size))
    }

    /// Real LED counts along each axis for the given grid
    pub fn led_dimensions(
        &self,
        scale_factor: u32,
        grid_factor_x: u32,
        grid_factor_y: u32,
    ) -> (u32, u32) {
        let units = |pixels: i32, factor: u32| canvas_to_real(pixels, scale_factor, factor);
        (
            units(self.size.width, grid_factor_x),
            units(self.size.height, grid_factor_y),
        )
    }

    /// Entry and exit indicators for the panel's current wiring and size
    pub fn wiring(
        &self,
        scale_factor: u32,
        grid_factor_x: u32,
        grid_factor_y: u32,
    ) -> WiringIndicators {
        let (width_units, height_units) =
            self.led_dimensions(scale_factor, grid_factor_x, grid_factor_y);
        resolve_wiring(
            self.start_h,
            self.start_v,
            self.orientation,
            self.serpentine,
            width_units,
            height_units,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ledmap_core::Corner;

    #[test]
    fn test_new_panel_defaults() {
        let panel = Panel::new(1, Size::square(50));
        assert_eq!(panel.id, 1);
        assert!(!panel.is_placed());
        assert_eq!(panel.start_h, StartH::Left);
        assert_eq!(panel.start_v, StartV::Top);
        assert_eq!(panel.orientation, Orientation::Horizontal);
        assert!(panel.serpentine);
        assert_eq!(panel.placed_rect(), None);
        assert_eq!(panel.rect(), Rect::from_xywh(0, 0, 50, 50));
    }

    #[test]
    fn test_panel_builders() {
        let panel = Panel::new(3, Size::new(100, 50))
            .at(Position::new(50, 100))
            .with_wiring(StartH::Right, StartV::Bottom, Orientation::Vertical, false);
        assert_eq!(panel.placed_rect(), Some(Rect::from_xywh(50, 100, 100, 50)));
        assert_eq!(panel.start_h, StartH::Right);
        assert!(!panel.serpentine);
    }

    #[test]
    fn test_led_dimensions() {
        // 4x2 grid units at 8 LEDs per unit
        let panel = Panel::new(1, Size::new(200, 100));
        assert_eq!(panel.led_dimensions(50, 8, 8), (32, 16));
        assert_eq!(panel.led_dimensions(50, 1, 3), (4, 6));
    }

    #[test]
    fn test_wiring_uses_led_parity() {
        // 3 units high with one LED per unit: odd rows, diagonal exit
        let panel = Panel::new(1, Size::new(150, 150));
        let wiring = panel.wiring(50, 1, 1);
        assert_eq!(wiring.exit.corner, Corner::BottomRight);

        // Same panel at two LEDs per unit: 6 rows, adjacent exit
        let wiring = panel.wiring(50, 1, 2);
        assert_eq!(wiring.exit.corner, Corner::BottomLeft);
    }
}
