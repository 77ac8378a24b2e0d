//! Error types for the catalog crate.
//!
//! Loading a list can fail in a handful of distinct ways: the fixture file
//! is missing, the bytes are not JSON, or the JSON is not shaped like a list.
//! Individual malformed attributes never surface here; they deserialize to
//! `None` and are handled downstream.

use thiserror::Error;

/// Errors that can occur while loading or parsing list payloads
#[derive(Error, Debug)]
pub enum CatalogError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading a payload
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Payload was not valid JSON, or an item could not be decoded
    #[error("JSON error in {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Payload was valid JSON but neither an array nor a list envelope
    #[error("Unexpected payload shape: expected {expected}, found {found}")]
    UnexpectedShape { expected: String, found: String },

    /// A textual value could not be mapped onto a known variant
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
