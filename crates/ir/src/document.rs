//! The device exchange document
//!
//! Devices persist their 2D panel matrix as compact JSON:
//!
//! ```json
//! { "panels": [ { "x": 0, "y": 0, "w": 32, "h": 32, "b": false, "r": false, "v": false, "s": true } ],
//!   "panelCount": 1 }
//! ```
//!
//! Coordinates are real LED pixels. Flags absent from a fetched document
//! default to `false` (top, left, horizontal, straight runs). Keys this
//! crate does not model are kept so a loaded document can be written back
//! without losing them.

use ledmap_core::{
    MapperError, MapperResult, Orientation, Rect, StartH, StartV, Validatable,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// PanelDescriptor
// ============================================================================

/// One panel as the device describes it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelDescriptor {
    /// Horizontal offset in LED pixels
    #[serde(default)]
    pub x: u32,

    /// Vertical offset in LED pixels
    #[serde(default)]
    pub y: u32,

    /// Width in LED pixels
    #[serde(rename = "w")]
    pub width: u32,

    /// Height in LED pixels
    #[serde(rename = "h")]
    pub height: u32,

    /// Strip starts at the bottom edge
    #[serde(rename = "b", default)]
    pub bottom_start: bool,

    /// Strip starts at the right edge
    #[serde(rename = "r", default)]
    pub right_start: bool,

    /// LEDs run in columns
    #[serde(rename = "v", default)]
    pub vertical: bool,

    /// Alternating runs reverse direction
    #[serde(rename = "s", default)]
    pub serpentine: bool,
}

impl PanelDescriptor {
    /// Create a descriptor with top-left, horizontal, straight wiring
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            bottom_start: false,
            right_start: false,
            vertical: false,
            serpentine: false,
        }
    }

    /// Builder: set the wiring flags from typed values
    pub fn with_wiring(
        mut self,
        start_h: StartH,
        start_v: StartV,
        orientation: Orientation,
        serpentine: bool,
    ) -> Self {
        self.right_start = start_h == StartH::Right;
        self.bottom_start = start_v == StartV::Bottom;
        self.vertical = orientation == Orientation::Vertical;
        self.serpentine = serpentine;
        self
    }

    pub fn start_h(&self) -> StartH {
        if self.right_start { StartH::Right } else { StartH::Left }
    }

    pub fn start_v(&self) -> StartV {
        if self.bottom_start { StartV::Bottom } else { StartV::Top }
    }

    pub fn orientation(&self) -> Orientation {
        if self.vertical {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }

    /// Footprint in LED-pixel space
    pub fn led_rect(&self) -> Rect {
        let clamp = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
        Rect::from_xywh(
            clamp(self.x),
            clamp(self.y),
            clamp(self.width),
            clamp(self.height),
        )
    }

    /// Number of LEDs on the panel
    pub fn led_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

// ============================================================================
// ExchangeDocument
// ============================================================================

/// The panel-matrix document read from and written to a device
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExchangeDocument {
    /// Panels in device order; a missing array reads as empty
    #[serde(default)]
    pub panels: Vec<PanelDescriptor>,

    /// Panel count written alongside the list
    #[serde(
        rename = "panelCount",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub panel_count: Option<usize>,

    /// Top-level keys this crate does not interpret
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ExchangeDocument {
    /// Create a document from a panel list, filling in the count
    pub fn from_panels(panels: Vec<PanelDescriptor>) -> Self {
        let panel_count = Some(panels.len());
        Self {
            panels,
            panel_count,
            extra: serde_json::Map::new(),
        }
    }

    /// Replace the panel list, keeping every other key
    pub fn with_panels(mut self, panels: Vec<PanelDescriptor>) -> Self {
        self.panel_count = Some(panels.len());
        self.panels = panels;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Sum of LEDs over all panels
    pub fn total_leds(&self) -> u64 {
        self.panels.iter().map(PanelDescriptor::led_count).sum()
    }

    /// Index pairs of panels whose footprints overlap
    pub fn overlapping_pairs(&self) -> Vec<(usize, usize)> {
        let rects: Vec<Rect> = self.panels.iter().map(PanelDescriptor::led_rect).collect();
        let mut pairs = Vec::new();
        for (i, a) in rects.iter().enumerate() {
            for (j, b) in rects.iter().enumerate().skip(i + 1) {
                if a.intersects(b) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }
}

impl Validatable for ExchangeDocument {
    fn validate(&self) -> MapperResult<()> {
        if self.panels.is_empty() {
            return Err(MapperError::EmptyDocument);
        }

        if let Some(count) = self.panel_count {
            if count != self.panels.len() {
                return Err(MapperError::invalid_document(format!(
                    "panelCount is {} but {} panels are listed",
                    count,
                    self.panels.len()
                )));
            }
        }

        for (index, panel) in self.panels.iter().enumerate() {
            if panel.width == 0 || panel.height == 0 {
                return Err(MapperError::invalid_panel(
                    index,
                    format!("size {}x{} must be positive", panel.width, panel.height),
                ));
            }
        }

        if let Some((a, b)) = self.overlapping_pairs().first() {
            return Err(MapperError::invalid_document(format!(
                "panels #{} and #{} overlap",
                a, b
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
