//! # Error Types
//!
//! Structured error types for area_core. The area engine itself cannot fail;
//! these errors come from the input layer (rejected measurements), project
//! lookups, and the export formatters.
//!
//! ## Example
//!
//! ```rust
//! use area_core::errors::{AreaError, AreaResult};
//!
//! fn validate_width(width: f64) -> AreaResult<()> {
//!     if width <= 0.0 {
//!         return Err(AreaError::invalid_input(
//!             "width",
//!             width.to_string(),
//!             "Width must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_width(-2.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for area_core operations
pub type AreaResult<T> = Result<T, AreaError>;

/// Structured error type for area_core operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum AreaError {
    /// An input value was rejected (non-positive dimension, bad quantity, ...)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// No room with the given id exists in the project
    #[error("Room not found: {room_id}")]
    RoomNotFound { room_id: String },

    /// No entry with the given id exists in the named collection
    #[error("No {collection} entry with id {entry_id}")]
    EntryNotFound {
        collection: String,
        entry_id: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// Report rendering failed (Typst compilation, PDF export)
    #[error("Failed to render {format} report: {reason}")]
    RenderFailed { format: String, reason: String },
}

impl AreaError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        AreaError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a RoomNotFound error
    pub fn room_not_found(room_id: impl ToString) -> Self {
        AreaError::RoomNotFound {
            room_id: room_id.to_string(),
        }
    }

    /// Create an EntryNotFound error
    pub fn entry_not_found(collection: impl Into<String>, entry_id: impl ToString) -> Self {
        AreaError::EntryNotFound {
            collection: collection.into(),
            entry_id: entry_id.to_string(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        AreaError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a RenderFailed error
    pub fn render_failed(format: impl Into<String>, reason: impl Into<String>) -> Self {
        AreaError::RenderFailed {
            format: format.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            AreaError::InvalidInput { .. } => "INVALID_INPUT",
            AreaError::RoomNotFound { .. } => "ROOM_NOT_FOUND",
            AreaError::EntryNotFound { .. } => "ENTRY_NOT_FOUND",
            AreaError::FileError { .. } => "FILE_ERROR",
            AreaError::RenderFailed { .. } => "RENDER_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = AreaError::invalid_input("height", "-5", "Height must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));

        let roundtrip: AreaError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AreaError::room_not_found("abc").error_code(), "ROOM_NOT_FOUND");
        assert_eq!(AreaError::entry_not_found("wall", "abc").error_code(), "ENTRY_NOT_FOUND");
        assert_eq!(AreaError::render_failed("PDF", "boom").error_code(), "RENDER_FAILED");
        assert_eq!(AreaError::file_error("write", "/tmp/x", "denied").error_code(), "FILE_ERROR");
        assert_eq!(
            AreaError::invalid_input("height", "-1", "too small").error_code(),
            "INVALID_INPUT"
        );
    }

    #[test]
    fn test_error_display() {
        let error = AreaError::entry_not_found("opening", "1234");
        assert_eq!(error.to_string(), "No opening entry with id 1234");
    }
}
