//! # Document Loading
//!
//! Converts raw input bytes into the generic document tree
//! (`serde_json::Value`) that the walker compares against a schema.
//!
//! JSON is parsed directly. YAML is parsed with `serde_yaml` and then
//! converted node by node into the equivalent JSON tree, so configuration
//! files written in either format are checked the same way.

use std::fmt;
use std::path::Path;

use serde_json::Value;

use crate::error::{DocumentError, FieldCheckError};

/// Input format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// JSON text.
    Json,
    /// YAML text (converted to the JSON tree before walking).
    Yaml,
}

impl DocumentFormat {
    /// Infer the format from a file extension: `.yaml` and `.yml` are YAML,
    /// everything else is treated as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }

    /// Lowercase name of the format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse `bytes` as a document of the given format.
///
/// # Errors
///
/// Returns `FieldCheckError::Parse` carrying the underlying parser error if
/// the bytes are not well-formed.
pub fn parse_document(bytes: &[u8], format: DocumentFormat) -> Result<Value, FieldCheckError> {
    tracing::debug!(%format, len = bytes.len(), "parsing document");
    match format {
        DocumentFormat::Json => parse_json(bytes),
        DocumentFormat::Yaml => parse_yaml(bytes),
    }
}

/// Read the file at `path` and parse it as a document of `format`.
///
/// # Errors
///
/// Returns `FieldCheckError::Io` if the file cannot be read and
/// `FieldCheckError::Parse` if its contents are malformed.
pub fn read_document(path: &Path, format: DocumentFormat) -> Result<Value, FieldCheckError> {
    let bytes = std::fs::read(path)?;
    parse_document(&bytes, format)
}

/// Parse `bytes` as a JSON document.
///
/// # Errors
///
/// Returns `FieldCheckError::Parse` if the bytes are not valid JSON.
pub fn parse_json(bytes: &[u8]) -> Result<Value, FieldCheckError> {
    serde_json::from_slice(bytes).map_err(|e| FieldCheckError::Parse {
        format: DocumentFormat::Json,
        source: DocumentError::Json(e),
    })
}

/// Parse `bytes` as a YAML document and convert it into the JSON tree.
///
/// # Errors
///
/// Returns `FieldCheckError::Parse` if the bytes are not valid YAML, hold a
/// malformed merge key, or use a construct with no JSON equivalent
/// (non-finite floats, complex keys).
pub fn parse_yaml(bytes: &[u8]) -> Result<Value, FieldCheckError> {
    let parse_err = |source: DocumentError| FieldCheckError::Parse {
        format: DocumentFormat::Yaml,
        source,
    };
    let mut yaml: serde_yaml::Value =
        serde_yaml::from_slice(bytes).map_err(|e| parse_err(DocumentError::Yaml(e)))?;
    // `<<: *anchor` merge keys are folded into their mapping, not kept as keys.
    yaml.apply_merge().map_err(|e| parse_err(DocumentError::Yaml(e)))?;
    yaml_to_json_value(&yaml).map_err(|reason| parse_err(DocumentError::Conversion(reason)))
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Scalar mapping keys are stringified the way a YAML-to-JSON converter
/// does it (`1: a` becomes `"1": "a"`). Tags are dropped and the tagged
/// value is converted in place.
fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(yaml_to_json_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    serde_yaml::Value::Null => "null".to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}
