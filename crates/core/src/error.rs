//! Error types for the LED panel mapper
//!
//! This module provides unified error handling across the workspace,
//! including document errors, IO errors, serialization errors, and
//! configuration errors.
//!
//! Geometry and wiring functions are total and never produce these errors;
//! they surface only at the document and file boundaries.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the LED panel mapper
#[derive(Debug, Error)]
pub enum MapperError {
    // ========================================================================
    // Document Errors
    // ========================================================================
    /// The exchange document is structurally invalid
    #[error("Invalid panel document: {0}")]
    InvalidDocument(String),

    /// A single panel descriptor failed validation
    #[error("Invalid panel descriptor #{index}: {message}")]
    InvalidPanel { index: usize, message: String },

    /// The document carries no panels
    #[error("Panel document contains no panels")]
    EmptyDocument,

    /// An LED grid cell lies outside the grid
    #[error("Cell ({x}, {y}) is outside the {width}x{height} LED grid")]
    CellOutOfRange {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    /// Document file does not exist
    #[error("Panel document not found at path: {0}")]
    DocumentNotFound(PathBuf),

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// Directory creation failed
    #[error("Failed to create directory '{path}': {message}")]
    DirectoryCreate { path: PathBuf, message: String },

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl MapperError {
    /// Create an invalid document error
    pub fn invalid_document(msg: impl Into<String>) -> Self {
        MapperError::InvalidDocument(msg.into())
    }

    /// Create an invalid panel descriptor error
    pub fn invalid_panel(index: usize, msg: impl Into<String>) -> Self {
        MapperError::InvalidPanel {
            index,
            message: msg.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        MapperError::InvalidConfig(msg.into())
    }

    /// Check if this error describes a bad document
    pub fn is_document(&self) -> bool {
        matches!(
            self,
            MapperError::InvalidDocument(_)
                | MapperError::InvalidPanel { .. }
                | MapperError::EmptyDocument
                | MapperError::CellOutOfRange { .. }
                | MapperError::JsonSerialization(_)
        )
    }

    /// Check if this error is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, MapperError::DocumentNotFound(_))
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            MapperError::FileRead { .. }
                | MapperError::FileWrite { .. }
                | MapperError::DirectoryCreate { .. }
        )
    }
}

/// Result type alias using MapperError
pub type MapperResult<T> = Result<T, MapperError>;

// ============================================================================
// Tests
// ============================================================================
