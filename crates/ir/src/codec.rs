//! Import and export between the layout store and the exchange document
//!
//! Import infers the grid factors from the panel offsets (see
//! [`ledmap_core::infer_grid_unit`]) and scales every real coordinate
//! into canvas pixels with `value * scale_factor / grid_factor`. Export goes
//! the other way, `pixels / scale_factor * grid_factor`, reading each panel's
//! rendered size from a [`RectMeasure`] because an in-progress resize may not
//! have reached the store yet.
//!
//! Both conversions round to the nearest integer, so a round trip is exact
//! only when the grid factor divides every original value.

use crate::document::{ExchangeDocument, PanelDescriptor};
use crate::layout::LayoutStore;
use crate::panel::Panel;
use ledmap_core::{
    CommonUnit, PanelId, Position, RectMeasure, Size, canvas_to_real, infer_grid_unit,
    real_to_canvas,
};

/// Result of importing a panel list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The list was empty; the store was left untouched
    Empty,
    /// The store now holds `panels` panels on the given grid
    Imported { panels: usize, grid: CommonUnit },
}

impl ImportOutcome {
    pub fn is_empty(&self) -> bool {
        matches!(self, ImportOutcome::Empty)
    }
}

// ============================================================================
// Import
// ============================================================================

/// Replace the store's contents with the document's panels
pub fn import_document(store: &mut LayoutStore, document: &ExchangeDocument) -> ImportOutcome {
    import_panels(store, &document.panels)
}

/// Replace the store's contents with the given panel descriptors.
///
/// Ids are assigned `1..=n` in input order. An empty list is a no-op.
pub fn import_panels(store: &mut LayoutStore, descriptors: &[PanelDescriptor]) -> ImportOutcome {
    let footprints = descriptors.iter().map(|d| (d.x, d.y, d.width, d.height));
    let Some(raw_unit) = infer_grid_unit(footprints) else {
        tracing::warn!("Ignoring import of a document without panels");
        return ImportOutcome::Empty;
    };
    if raw_unit.x == 0 || raw_unit.y == 0 {
        tracing::debug!(
            "Degenerate grid unit {}x{} clamped to 1",
            raw_unit.x,
            raw_unit.y
        );
    }
    let grid = raw_unit.at_least_one();
    let scale = store.scale_factor();

    let panels: Vec<Panel> = descriptors
        .iter()
        .zip(1..)
        .map(|(descriptor, id): (&PanelDescriptor, PanelId)| {
            let position = Position::new(
                real_to_canvas(descriptor.x, scale, grid.x),
                real_to_canvas(descriptor.y, scale, grid.y),
            );
            let size = Size::new(
                real_to_canvas(descriptor.width, scale, grid.x),
                real_to_canvas(descriptor.height, scale, grid.y),
            );
            Panel::new(id, size).at(position).with_wiring(
                descriptor.start_h(),
                descriptor.start_v(),
                descriptor.orientation(),
                descriptor.serpentine,
            )
        })
        .collect();

    let count = panels.len();
    store.replace_all(panels, grid);
    tracing::info!(
        "Imported {} panels on a {}x{} LED grid unit",
        count,
        grid.x,
        grid.y
    );

    ImportOutcome::Imported {
        panels: count,
        grid,
    }
}

// ============================================================================
// Export
// ============================================================================

/// Convert every rendered panel back into real LED coordinates.
///
/// Panels whose rendered rectangle is unavailable or has no area are left
/// out of the result.
pub fn export_panels(store: &LayoutStore, measure: &dyn RectMeasure) -> Vec<PanelDescriptor> {
    let scale = store.scale_factor();
    let grid = store.grid_factors();

    store
        .panels()
        .filter_map(|panel| {
            let Some(rect) = measure.panel_rect(panel.id).filter(|rect| !rect.is_empty()) else {
                tracing::debug!("Panel {} is not rendered, leaving it out", panel.id);
                return None;
            };
            let position = panel.position.unwrap_or(rect.position);
            Some(
                PanelDescriptor::new(
                    canvas_to_real(position.x, scale, grid.x),
                    canvas_to_real(position.y, scale, grid.y),
                    canvas_to_real(rect.width(), scale, grid.x),
                    canvas_to_real(rect.height(), scale, grid.y),
                )
                .with_wiring(
                    panel.start_h,
                    panel.start_v,
                    panel.orientation,
                    panel.serpentine,
                ),
            )
        })
        .collect()
}

/// Build a fresh document from the rendered panels
pub fn export_document(store: &LayoutStore, measure: &dyn RectMeasure) -> ExchangeDocument {
    let panels = export_panels(store, measure);
    tracing::info!("Exported {} of {} panels", panels.len(), store.len());
    ExchangeDocument::from_panels(panels)
}

/// Write the rendered panels into an existing document, keeping its other keys
pub fn export_onto(
    store: &LayoutStore,
    measure: &dyn RectMeasure,
    base: &ExchangeDocument,
) -> ExchangeDocument {
    base.clone().with_panels(export_panels(store, measure))
}

// ============================================================================
// Tests
// ============================================================================
