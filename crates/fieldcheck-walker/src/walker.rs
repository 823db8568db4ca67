//! # Tree Walker
//!
//! Depth-first, pre-order walk over the document tree. The schema is only
//! consulted, never traversed on its own, so schema fields with no
//! matching document key are invisible here. Only document-side surplus
//! is detected.
//!
//! A `None` schema is the degenerate case reached when a sequence has no
//! element schema: every key below it is unknown, scalars below it are
//! silent.

use fieldcheck_core::{PathPrefix, UnknownPath};
use fieldcheck_schema::SchemaProvider;
use serde_json::Value;

/// Collect the unknown paths under `node`, which sits at `prefix` and is
/// described by `schema`.
pub fn walk<P: SchemaProvider>(
    prefix: &PathPrefix,
    node: &Value,
    schema: Option<&P>,
) -> Vec<UnknownPath> {
    let mut unknown = Vec::new();
    collect(prefix, node, schema, &mut unknown);
    unknown
}

fn collect<P: SchemaProvider>(
    prefix: &PathPrefix,
    node: &Value,
    schema: Option<&P>,
    unknown: &mut Vec<UnknownPath>,
) {
    match node {
        Value::Object(entries) => {
            for (key, value) in entries {
                let child = prefix.field(key);
                match schema.and_then(|s| s.resolve_field(key)) {
                    Some(sub) => collect(&child, value, Some(&sub), unknown),
                    None => {
                        let path = child.to_reported();
                        tracing::trace!(%path, "unknown field");
                        unknown.push(path);
                    }
                }
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                let element = schema.and_then(|s| s.element(index));
                collect(&prefix.index(index), value, element.as_ref(), unknown);
            }
        }
        // Scalars have no children to mismatch.
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}
