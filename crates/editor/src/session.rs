//! Editing session
//!
//! An `EditorSession` owns everything one open layout needs: the store, the
//! interaction controller and the configuration they were built from. It is
//! the surface collaborators talk to when loading panels fetched from a
//! device and saving them back.

use crate::controller::InteractionController;
use ledmap_core::{MapperResult, Rect, RectMeasure};
use ledmap_ir::{
    EditorConfig, ExchangeDocument, ImportOutcome, LayoutStore, PanelDescriptor, export_onto,
    export_panels, import_panels, load_document, save_document,
};
use std::path::Path;

/// One open layout
#[derive(Debug, Clone)]
pub struct EditorSession {
    config: EditorConfig,
    store: LayoutStore,
    controller: InteractionController,
    /// Document the panels were loaded from; its other keys are written back
    document: ExchangeDocument,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorSession {
    /// Start an empty session
    pub fn new(config: EditorConfig) -> Self {
        Self {
            store: LayoutStore::new(config.clone()),
            controller: InteractionController::new(&config),
            config,
            document: ExchangeDocument::default(),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &LayoutStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut LayoutStore {
        &mut self.store
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// Borrow the controller and the store it mutates together
    pub fn parts_mut(&mut self) -> (&mut InteractionController, &mut LayoutStore) {
        (&mut self.controller, &mut self.store)
    }

    // ========================================================================
    // Collaborator Interface
    // ========================================================================

    /// Replace the layout with panels fetched from a device
    pub fn load_panels(&mut self, panels: &[PanelDescriptor]) -> ImportOutcome {
        let outcome = import_panels(&mut self.store, panels);
        if !outcome.is_empty() {
            self.controller.reset();
        }
        outcome
    }

    /// Panels to send to a device, sized as the surface renders them
    pub fn save_panels(&self, measure: &dyn RectMeasure) -> Vec<PanelDescriptor> {
        export_panels(&self.store, measure)
    }

    /// Load a document, keeping its other keys for the next save
    pub fn load_document(&mut self, document: ExchangeDocument) -> ImportOutcome {
        let outcome = self.load_panels(&document.panels);
        self.document = document;
        outcome
    }

    /// The loaded document with the current panels written into it
    pub fn to_document(&self, measure: &dyn RectMeasure) -> ExchangeDocument {
        export_onto(&self.store, measure, &self.document)
    }

    /// Load a document file
    pub fn open(&mut self, path: impl AsRef<Path>) -> MapperResult<ImportOutcome> {
        let document = load_document(path.as_ref())?;
        tracing::info!("Opened {}", path.as_ref().display());
        Ok(self.load_document(document))
    }

    /// Write the current panels to a document file
    pub fn save(&self, path: impl AsRef<Path>, measure: &dyn RectMeasure) -> MapperResult<()> {
        save_document(&self.to_document(measure), path)
    }

    // ========================================================================
    // Page Geometry
    // ========================================================================

    /// Rectangle enclosing the rendered panels, in page coordinates.
    ///
    /// The measured rectangles are relative to the scrolled viewport, so the
    /// surface's scroll offset is added back.
    pub fn page_bounding_rect(&self, measure: &dyn RectMeasure) -> Option<Rect> {
        let offset = measure.scroll_offset();
        Rect::enclosing(self.store.ids().into_iter().filter_map(|id| measure.panel_rect(id)))
            .map(|rect| rect.translate(offset.x, offset.y))
    }
}

// ============================================================================
// Tests
// ============================================================================
