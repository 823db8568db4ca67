//! # Entry Points
//!
//! Parse the input bytes, then walk the resulting tree from the root
//! prefix against the root schema. Parsing is all-or-nothing: a malformed
//! document yields `FieldCheckError::Parse` and no paths. Once parsing
//! succeeds the walk cannot fail.

use std::path::Path;

use fieldcheck_core::{
    parse_document, read_document, DocumentFormat, FieldCheckError, PathPrefix, UnknownPath,
};
use fieldcheck_schema::{Describe, Schema, SchemaProvider};
use serde_json::Value;

use crate::walker::walk;

/// Report the keys of the JSON document `bytes` that have no counterpart
/// in `schema`.
///
/// An empty list means every key at every depth resolved.
///
/// # Errors
///
/// Returns `FieldCheckError::Parse` if `bytes` is not valid JSON.
pub fn validate_unknown_fields<P: SchemaProvider>(
    bytes: &[u8],
    schema: &P,
) -> Result<Vec<UnknownPath>, FieldCheckError> {
    validate_document(bytes, DocumentFormat::Json, schema)
}

/// Same as [`validate_unknown_fields`] for a YAML document.
///
/// # Errors
///
/// Returns `FieldCheckError::Parse` if `bytes` is not valid YAML or holds
/// values the JSON tree cannot represent.
pub fn validate_unknown_fields_yaml<P: SchemaProvider>(
    bytes: &[u8],
    schema: &P,
) -> Result<Vec<UnknownPath>, FieldCheckError> {
    validate_document(bytes, DocumentFormat::Yaml, schema)
}

/// Parse `bytes` as `format` and report its unknown keys.
///
/// # Errors
///
/// Returns `FieldCheckError::Parse` if `bytes` is malformed.
pub fn validate_document<P: SchemaProvider>(
    bytes: &[u8],
    format: DocumentFormat,
    schema: &P,
) -> Result<Vec<UnknownPath>, FieldCheckError> {
    let document = parse_document(bytes, format)?;
    let unknown = unknown_fields(&document, schema);
    tracing::debug!(
        %format,
        len = bytes.len(),
        unknown = unknown.len(),
        "checked document for unknown fields"
    );
    Ok(unknown)
}

/// Read the file at `path`, parse it as `format`, and report its unknown
/// keys.
///
/// # Errors
///
/// Returns `FieldCheckError::Io` if the file cannot be read and
/// `FieldCheckError::Parse` if it is malformed.
pub fn validate_file<P: SchemaProvider>(
    path: &Path,
    format: DocumentFormat,
    schema: &P,
) -> Result<Vec<UnknownPath>, FieldCheckError> {
    let document = read_document(path, format)?;
    let unknown = unknown_fields(&document, schema);
    tracing::debug!(
        path = %path.display(),
        %format,
        unknown = unknown.len(),
        "checked file for unknown fields"
    );
    Ok(unknown)
}

/// Report the unknown keys of an already-parsed document.
pub fn unknown_fields<P: SchemaProvider>(document: &Value, schema: &P) -> Vec<UnknownPath> {
    walk(&PathPrefix::root(), document, Some(schema))
}

/// Report the unknown keys of the JSON document `bytes` against the
/// description of `T`.
///
/// # Errors
///
/// Returns `FieldCheckError::Parse` if `bytes` is not valid JSON.
pub fn unknown_fields_of<T: Describe + ?Sized>(
    bytes: &[u8],
) -> Result<Vec<UnknownPath>, FieldCheckError> {
    validate_unknown_fields(bytes, &Schema::of::<T>().settle())
}
