//! # Error Types
//!
//! Parse failures are the only errors fieldcheck produces. Unknown fields
//! are reported as paths in the result list and never surface here.
//!
//! `FieldCheckError::Parse` wraps the underlying parser error and keeps it
//! reachable through [`std::error::Error::source`].

use thiserror::Error;

use crate::document::DocumentFormat;

/// Top-level error type for fieldcheck operations.
#[derive(Error, Debug)]
pub enum FieldCheckError {
    /// The input bytes are not a well-formed document. No paths are
    /// reported when this happens.
    #[error("error while parsing {format} document: {source}")]
    Parse {
        /// Format the bytes were parsed as.
        format: DocumentFormat,
        /// Underlying parser or conversion error.
        #[source]
        source: DocumentError,
    },

    /// IO error while reading a document.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl FieldCheckError {
    /// Returns true if this error came from a malformed document.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

/// Error produced while turning raw bytes into a document tree.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The bytes are not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The bytes are not valid YAML.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The YAML parsed but uses a construct the JSON tree cannot hold.
    #[error("YAML-to-JSON conversion failed: {0}")]
    Conversion(String),
}
