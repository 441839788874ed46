//! Reading and writing panel documents
//!
//! Device documents are plain JSON. Files are written pretty-printed for
//! people; the compact variants produce the single-line form a device accepts
//! over the wire. LED index maps are always written compact.

use crate::DOCUMENT_FILE_EXTENSION;
use crate::document::ExchangeDocument;
use crate::ledmap::LedMap;
use ledmap_core::{MapperError, MapperResult};
use std::path::{Path, PathBuf};

// ============================================================================
// Save Functions
// ============================================================================

/// Save a document to a file as indented JSON, creating parent directories
/// as needed
pub fn save_document(document: &ExchangeDocument, path: impl AsRef<Path>) -> MapperResult<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(document).map_err(|e| serialize_failed(path, e))?;
    write_json(path, &json)?;

    tracing::debug!(
        "Saved {} panels to {}",
        document.panels.len(),
        path.display()
    );
    Ok(())
}

/// Save a document to a file as single-line JSON
pub fn save_document_compact(
    document: &ExchangeDocument,
    path: impl AsRef<Path>,
) -> MapperResult<()> {
    let path = path.as_ref();
    let json = serde_json::to_string(document).map_err(|e| serialize_failed(path, e))?;
    write_json(path, &json)?;

    tracing::debug!(
        "Saved {} panels to {}",
        document.panels.len(),
        path.display()
    );
    Ok(())
}

/// Save an LED index map to a file
pub fn save_led_map(map: &LedMap, path: impl AsRef<Path>) -> MapperResult<()> {
    let path = path.as_ref();
    let json = serde_json::to_string(map).map_err(|e| serialize_failed(path, e))?;
    write_json(path, &json)?;

    tracing::debug!("Saved {} LED slots to {}", map.leds.len(), path.display());
    Ok(())
}

/// Render a document as indented JSON
pub fn save_document_to_string(document: &ExchangeDocument) -> MapperResult<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Render a document as single-line JSON
pub fn save_document_to_compact_string(document: &ExchangeDocument) -> MapperResult<String> {
    Ok(serde_json::to_string(document)?)
}

/// Render an LED index map as single-line JSON
pub fn save_led_map_to_string(map: &LedMap) -> MapperResult<String> {
    Ok(serde_json::to_string(map)?)
}

fn serialize_failed(path: &Path, e: serde_json::Error) -> MapperError {
    MapperError::FileWrite {
        path: path.to_path_buf(),
        message: format!("Failed to serialize document: {}", e),
    }
}

fn write_json(path: &Path, json: &str) -> MapperResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| MapperError::DirectoryCreate {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }
    }

    std::fs::write(path, json).map_err(|e| MapperError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

// ============================================================================
// Load Functions
// ============================================================================

/// Load a document from a file
pub fn load_document(path: impl AsRef<Path>) -> MapperResult<ExchangeDocument> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(MapperError::DocumentNotFound(path.to_path_buf()));
    }

    let json = std::fs::read_to_string(path).map_err(|e| MapperError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    load_document_from_string(&json).map_err(|e| match e {
        MapperError::JsonSerialization(je) => MapperError::FileRead {
            path: path.to_path_buf(),
            message: format!("Invalid panel document: {}", je),
        },
        other => other,
    })
}

/// Parse a document from JSON text
pub fn load_document_from_string(json: &str) -> MapperResult<ExchangeDocument> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a document from raw bytes, as received from a device
pub fn load_document_from_bytes(bytes: &[u8]) -> MapperResult<ExchangeDocument> {
    let json = std::str::from_utf8(bytes)
        .map_err(|e| MapperError::invalid_document(format!("Invalid UTF-8: {}", e)))?;
    load_document_from_string(json)
}

// ============================================================================
// Utility Functions
// ============================================================================

/// Check whether a path names a readable panel document
pub fn is_document_file(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    if path.extension().is_none_or(|ext| ext != DOCUMENT_FILE_EXTENSION) {
        return false;
    }
    load_document(path).is_ok()
}

/// Give a path the document extension if it lacks it
pub fn ensure_extension(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.extension().is_none_or(|ext| ext != DOCUMENT_FILE_EXTENSION) {
        path.with_extension(DOCUMENT_FILE_EXTENSION)
    } else {
        path.to_path_buf()
    }
}

/// Copy an existing document aside before it is overwritten.
///
/// Returns the backup path, or `None` when there was nothing to back up.
pub fn backup_document(path: impl AsRef<Path>) -> MapperResult<Option<PathBuf>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }

    let backup_path = path.with_extension(format!("{}.backup", DOCUMENT_FILE_EXTENSION));
    std::fs::copy(path, &backup_path).map_err(|e| MapperError::FileWrite {
        path: backup_path.clone(),
        message: format!("Failed to create backup: {}", e),
    })?;

    Ok(Some(backup_path))
}

// ============================================================================
// Tests
// ============================================================================
