//! Editor configuration
//!
//! Display scale, canvas bounds and the wiring defaults applied to newly
//! added panels. The configuration is plain serde data and can be kept in a
//! TOML file next to the panel documents.

use ledmap_core::{
    MapperError, MapperResult, Orientation, Rect, Size, StartH, StartV, Validatable,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default canvas pixels per grid unit
pub const DEFAULT_SCALE_FACTOR: u32 = 50;

/// Default canvas width in pixels
pub const DEFAULT_CANVAS_WIDTH: i32 = 1600;

/// Default canvas height in pixels
pub const DEFAULT_CANVAS_HEIGHT: i32 = 900;

// ============================================================================
// EditorConfig
// ============================================================================

/// Settings for one editing session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Canvas pixels per grid unit
    pub scale_factor: u32,

    /// Width of the canvas panels are confined to, in pixels
    pub canvas_width: i32,

    /// Height of the canvas panels are confined to, in pixels
    pub canvas_height: i32,

    /// Defaults for newly added panels
    pub panel: PanelDefaults,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            panel: PanelDefaults::default(),
        }
    }
}

impl EditorConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the display scale
    pub fn with_scale_factor(mut self, scale_factor: u32) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Override the canvas size
    pub fn with_canvas(mut self, width: i32, height: i32) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    /// Grid step in canvas pixels
    pub fn grid_step(&self) -> i32 {
        i32::try_from(self.scale_factor).unwrap_or(i32::MAX)
    }

    /// Rectangle panels are confined to
    pub fn canvas_bounds(&self) -> Rect {
        Rect::from_xywh(0, 0, self.canvas_width, self.canvas_height)
    }

    /// Canvas size of a newly added panel, saturating at `i32::MAX`
    pub fn default_panel_size(&self) -> Size {
        let step = self.grid_step();
        let pixels = |units: u32| {
            i32::try_from(units.max(1))
                .ok()
                .and_then(|units| step.checked_mul(units))
                .unwrap_or(i32::MAX)
        };
        Size::new(pixels(self.panel.width_units), pixels(self.panel.height_units))
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> MapperResult<Self> {
        let config: EditorConfig = toml::from_str(text)
            .map_err(|e| MapperError::invalid_config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as TOML text
    pub fn to_toml_string(&self) -> MapperResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| MapperError::invalid_config(format!("Failed to serialize config: {}", e)))
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> MapperResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| MapperError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded editor config from {}", path.display());
        Ok(config)
    }
}

impl Validatable for EditorConfig {
    fn validate(&self) -> MapperResult<()> {
        if self.scale_factor == 0 {
            return Err(MapperError::invalid_config("scale_factor must be positive"));
        }
        let step = self.grid_step();
        if self.canvas_width < step || self.canvas_height < step {
            return Err(MapperError::invalid_config(format!(
                "canvas {}x{} is smaller than one grid unit ({} px)",
                self.canvas_width, self.canvas_height, step
            )));
        }
        if self.panel.width_units == 0 || self.panel.height_units == 0 {
            return Err(MapperError::invalid_config(
                "default panel size must be at least one grid unit",
            ));
        }
        let size = self.default_panel_size();
        if size.width > self.canvas_width || size.height > self.canvas_height {
            return Err(MapperError::invalid_config(format!(
                "default panel {}x{} units does not fit the {}x{} canvas",
                self.panel.width_units,
                self.panel.height_units,
                self.canvas_width,
                self.canvas_height
            )));
        }
        Ok(())
    }
}

// ============================================================================
// PanelDefaults
// ============================================================================

/// Size and wiring given to a panel created by the add action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelDefaults {
    /// Width in grid units
    pub width_units: u32,
    /// Height in grid units
    pub height_units: u32,
    pub start_h: StartH,
    pub start_v: StartV,
    pub orientation: Orientation,
    pub serpentine: bool,
}

impl Default for PanelDefaults {
    fn default() -> Self {
        Self {
            width_units: 1,
            height_units: 1,
            start_h: StartH::Left,
            start_v: StartV::Top,
            orientation: Orientation::Horizontal,
            serpentine: true,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
