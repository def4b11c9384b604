//! # Error Types
//!
//! Centralized error handling for carbon_core using `thiserror`.
//!
//! ## Design
//!
//! All fallible operations return [`CalcResult<T>`], an alias for
//! `Result<T, CalcError>`. Errors are serializable so they can be embedded
//! in analysis reports and round-tripped through JSON.
//!
//! During a batch run, per-material errors (a missing emission factor, an
//! unclassifiable material) are recorded and the run continues. Fatal errors
//! (an unreadable model file, an unknown database name) abort the run.
//! [`CalcError::is_recoverable`] distinguishes the two.
//!
//! ## Example
//!
//! ```rust
//! use carbon_core::errors::{CalcError, CalcResult};
//!
//! fn require_volume(volume: Option<f64>) -> CalcResult<f64> {
//!     volume.ok_or_else(|| CalcError::missing_field("volume"))
//! }
//!
//! let err = require_volume(None).unwrap_err();
//! assert_eq!(err.error_code(), "MISSING_FIELD");
//! assert!(err.is_recoverable());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias used throughout carbon_core
pub type CalcResult<T> = Result<T, CalcError>;

/// All errors that can occur during carbon analysis
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A value was present but failed validation
    #[error("Invalid input for {field}: '{value}' ({reason})")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field was absent from the input
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// No emission factor matched the lookup key, even after alias
    /// normalization
    #[error("No emission factor for '{material_key}' in database '{database}'")]
    FactorNotFound {
        material_key: String,
        database: String,
    },

    /// A database name did not match any known database of that family
    #[error("Unknown {family} database: '{name}'. Available databases: {available}")]
    UnknownDatabase {
        family: String,
        name: String,
        available: String,
    },

    /// A material could not be classified as concrete, metal, or wood
    #[error("Could not classify material '{name}'")]
    UnknownMaterial { name: String },

    /// The building model is structurally unusable
    #[error("Invalid model: {reason}")]
    InvalidModel { reason: String },

    /// A filesystem operation failed
    #[error("File {operation} failed for '{path}': {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization or deserialization failed
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an invalid input error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a factor-not-found error
    pub fn factor_not_found(
        material_key: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        CalcError::FactorNotFound {
            material_key: material_key.into(),
            database: database.into(),
        }
    }

    /// Create an unknown database error. `available` is the list of valid
    /// names for the family, joined into the message.
    pub fn unknown_database(
        family: impl Into<String>,
        name: impl Into<String>,
        available: &[&str],
    ) -> Self {
        CalcError::UnknownDatabase {
            family: family.into(),
            name: name.into(),
            available: available.join(", "),
        }
    }

    /// Create an unknown material error
    pub fn unknown_material(name: impl Into<String>) -> Self {
        CalcError::UnknownMaterial { name: name.into() }
    }

    /// Create an invalid model error
    pub fn invalid_model(reason: impl Into<String>) -> Self {
        CalcError::InvalidModel {
            reason: reason.into(),
        }
    }

    /// Create a file error with operation context
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code for each error kind
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::FactorNotFound { .. } => "FACTOR_NOT_FOUND",
            CalcError::UnknownDatabase { .. } => "UNKNOWN_DATABASE",
            CalcError::UnknownMaterial { .. } => "UNKNOWN_MATERIAL",
            CalcError::InvalidModel { .. } => "INVALID_MODEL",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }

    /// Whether a batch run can absorb this error and continue.
    ///
    /// Per-material conditions are recoverable: the material is reported as
    /// failed and the rest of the model is still processed. Everything else
    /// aborts the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CalcError::MissingField { .. }
                | CalcError::FactorNotFound { .. }
                | CalcError::UnknownMaterial { .. }
        )
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}
