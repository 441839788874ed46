//! # Ledmap IR
//!
//! The layout model of the LED panel mapper: the panels on the canvas, the
//! store that owns them, and the device document they are exchanged through.
//!
//! ## Core Concepts
//!
//! - **Panel**: A rectangular LED matrix with a position, a size and a wiring configuration
//! - **LayoutStore**: The authoritative set of panels plus selection, grid factors and derived state
//! - **ExchangeDocument**: The compact panel-matrix JSON a device reads and writes
//! - **Codec**: Import (with grid-unit normalization) and export between the two
//! - **EditorConfig**: Display scale, canvas bounds and defaults for new panels
//! - **LedGrid**: A cell grid numbered in lighting order, exported as a device LED map
//!

// Module declarations
pub mod codec;
pub mod config;
pub mod document;
pub mod layout;
pub mod ledmap;
pub mod panel;
pub mod serialization;

// Re-export commonly used types at crate root
pub use codec::{
    ImportOutcome, export_document, export_onto, export_panels, import_document, import_panels,
};
pub use config::{EditorConfig, PanelDefaults};
pub use document::{ExchangeDocument, PanelDescriptor};
pub use layout::LayoutStore;
pub use ledmap::{LedGrid, LedMap, PaintAction};
pub use panel::Panel;
pub use serialization::{
    backup_document, ensure_extension, is_document_file, load_document,
    load_document_from_bytes, load_document_from_string, save_document, save_document_compact,
    save_document_to_compact_string, save_document_to_string, save_led_map,
    save_led_map_to_string,
};

// Re-export core types that are commonly used with IR
pub use ledmap_core::{
    Axis, CommonUnit, MapperError, MapperResult, Orientation, PanelId, Position, Rect,
    RectMeasure, Size, StartH, StartV, Validatable, WiringIndicators,
};

/// File extension for panel documents
pub const DOCUMENT_FILE_EXTENSION: &str = "json";

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Prelude Module
// ============================================================================

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::codec::{ImportOutcome, export_document, import_document};
    pub use crate::config::EditorConfig;
    pub use crate::document::{ExchangeDocument, PanelDescriptor};
    pub use crate::layout::LayoutStore;
    pub use crate::panel::Panel;
    pub use ledmap_core::{
        MapperError, MapperResult, Orientation, PanelId, Position, Rect, RectMeasure, Size,
        StartH, StartV, Validatable,
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_extension() {
        assert_eq!(DOCUMENT_FILE_EXTENSION, "json");
    }

    #[test]
    fn test_prelude_builds_a_layout() {
        use crate::prelude::*;

        let mut store = LayoutStore::new(EditorConfig::default());
        let id = store.add_panel();
        assert_eq!(id, 1);
        assert!(store.panel(id).is_some());
    }
}
