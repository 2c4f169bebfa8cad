//! # Error Types
//!
//! Structured error types for mix_core. Every error carries enough context
//! (field name, offending value, table name) for a caller to point the user
//! at the exact input that needs to change.
//!
//! ## Example
//!
//! ```rust
//! use mix_core::errors::{CalcError, CalcResult};
//!
//! fn validate_strength(strength_psi: f64) -> CalcResult<()> {
//!     if strength_psi <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "strength_psi",
//!             strength_psi.to_string(),
//!             "Target strength must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for mix_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for mix design operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, not finite, not a table size)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A table lookup landed on an entry ACI 211.1 marks as not recommended
    #[error("Unsupported combination in {table}: {reason}")]
    UnsupportedCombination { table: String, reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (report rendering, should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnsupportedCombination error
    pub fn unsupported(table: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::UnsupportedCombination {
            table: table.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::UnsupportedCombination { .. } => "UNSUPPORTED_COMBINATION",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("max_agg_size_in", "0.8", "Not a tabulated aggregate size");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CalcError::unsupported("water", "6-7 in slump with 6 in aggregate").error_code(),
            "UNSUPPORTED_COMBINATION"
        );
        assert_eq!(CalcError::file_error("read", "mix.json", "missing").error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_error_display() {
        let error = CalcError::unsupported("water-cement ratio", "7000 psi is not tabulated");
        assert_eq!(
            error.to_string(),
            "Unsupported combination in water-cement ratio: 7000 psi is not tabulated"
        );
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<f64>("not json").unwrap_err();
        let calc: CalcError = err.into();
        assert_eq!(calc.error_code(), "SERIALIZATION_ERROR");
    }
}
