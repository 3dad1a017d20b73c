//! Error types for the DataQuill workbench.
//!
//! Query diagnostics are *not* errors in this sense: a failed query is an
//! ordinary value surfaced in the results panel (see [`crate::models::Diagnostic`]).
//! `QuillError` covers infrastructure failures: configuration, file access,
//! schema loading and unexpected internal conditions.

use thiserror::Error;

/// Main error type for the DataQuill core.
#[derive(Debug, Error)]
pub enum QuillError {
    /// Configuration could not be loaded or failed validation.
    #[error("Config error: {message}")]
    Config {
        /// Human-readable error message.
        message: String,
    },

    /// Filesystem access failed.
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message.
        message: String,
        /// Underlying I/O error.
        #[source]
        source: Option<std::io::Error>,
    },

    /// JSON (de)serialization failed.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Human-readable error message.
        message: String,
        /// Underlying serde error.
        #[source]
        source: Option<serde_json::Error>,
    },

    /// A schema snapshot could not be loaded or is structurally invalid.
    #[error("Schema error: {message}")]
    Schema {
        /// Human-readable error message.
        message: String,
        /// Actionable hint for the user.
        hint: Option<String>,
    },

    /// Unexpected internal error.
    #[error("Internal error: {message}")]
    Internal {
        /// Human-readable error message.
        message: String,
        /// Optional underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl QuillError {
    // ========== Constructors ==========

    /// Create a new config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    /// Create a new I/O error without an underlying source.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io { message: message.into(), source: None }
    }

    /// Create a new I/O error with its source.
    pub fn io_with_source(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { message: message.into(), source: Some(source) }
    }

    /// Create a new serialization error with its source.
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization { message: message.into(), source: Some(source) }
    }

    /// Create a new schema error.
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema { message: message.into(), hint: None }
    }

    /// Create a new schema error with an actionable hint.
    pub fn schema_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Schema { message: message.into(), hint: Some(hint.into()) }
    }

    /// Create a new internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into(), source: None }
    }

    /// Create a new internal error with source.
    pub fn internal_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Internal { message: message.into(), source: Some(Box::new(source)) }
    }

    // ========== Methods ==========

    /// Get the error category name.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config { .. } => "Config",
            Self::Io { .. } => "I/O",
            Self::Serialization { .. } => "Serialization",
            Self::Schema { .. } => "Schema",
            Self::Internal { .. } => "Internal",
        }
    }

    /// Get actionable hint for the user.
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Config { .. } => Some("Check the configuration file or remove it to use defaults"),
            Self::Io { .. } => Some("Check that the file exists and is readable"),
            Self::Serialization { .. } => Some("Check that the file contains valid JSON"),
            Self::Schema { hint, .. } => hint.as_deref(),
            Self::Internal { .. } => Some("Please report this issue"),
        }
    }
}

// ========== Error Conversions ==========

impl From<std::io::Error> for QuillError {
    fn from(err: std::io::Error) -> Self {
        Self::Io { message: err.to_string(), source: Some(err) }
    }
}

impl From<serde_json::Error> for QuillError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization { message: err.to_string(), source: Some(err) }
    }
}
