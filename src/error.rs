//! Custom error types for SINI intake
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions. Step-level validation failures are not
//! errors: they come back as [`StepValidation`](crate::wizard::StepValidation)
//! values. Only finalization failures and misuse of a closed wizard surface here.

use thiserror::Error;

use crate::wizard::FinalizationError;

/// The main error type for SINI intake operations
#[derive(Error, Debug)]
pub enum SiniError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Input that does not fit any schema (malformed answer files, bad query values)
    #[error("Validation error: {0}")]
    Validation(String),

    /// One or more visible steps failed re-validation at submission time
    #[error("Submission blocked: {0}")]
    Finalization(FinalizationError),

    /// The wizard already reached its terminal state
    #[error("Wizard already submitted")]
    WizardClosed,

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Submission gateway errors
    #[error("Submission error: {0}")]
    Submission(String),
}

impl SiniError {
    /// Create a "not found" error for wizard steps
    pub fn step_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Step",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for drafts
    pub fn draft_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Draft",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Finalization(_))
    }
}

impl From<std::io::Error> for SiniError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SiniError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for SiniError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<csv::Error> for SiniError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

impl From<FinalizationError> for SiniError {
    fn from(err: FinalizationError) -> Self {
        Self::Finalization(err)
    }
}

/// Result type alias for SINI intake operations
pub type SiniResult<T> = Result<T, SiniError>;
