//! # JSON Schema Provider
//!
//! Resolves document keys against a JSON Schema document held in a
//! `serde_json::Value`. Only the structural keywords matter here; value
//! constraints (`type`, `pattern`, `minimum`, `required`, ...) are ignored.
//!
//! | Document access | Schema keywords consulted |
//! |-----------------|---------------------------|
//! | mapping key     | `properties`, then `allOf` branches, then `additionalProperties` |
//! | sequence index  | `prefixItems` / tuple `items`, then `items` / `additionalItems` |
//!
//! Before a node is inspected, local `$ref`s (`#/definitions/...`,
//! `#/$defs/...`, or any JSON pointer into the root document) are followed
//! and one nullable wrapper (`anyOf`/`oneOf` with a single non-null
//! branch) is unwrapped. `allOf` branches play the role of embedded
//! records: their properties are addressable as if declared on the node
//! itself, first branch wins.
//!
//! A node of `true`, or an object holding nothing but annotations (`{}`,
//! `{"description": ...}`), accepts anything below it.

use serde_json::{Map, Value};

use crate::provider::{SchemaProvider, MAX_INDIRECTIONS};

/// Shared schema node that accepts any value.
static PERMISSIVE: Value = Value::Bool(true);

/// Keywords that describe a node without constraining its shape.
const ANNOTATION_KEYWORDS: &[&str] = &[
    "$comment",
    "$id",
    "$schema",
    "default",
    "deprecated",
    "description",
    "examples",
    "readOnly",
    "title",
    "writeOnly",
];

/// A position inside a JSON Schema document.
#[derive(Debug, Clone, Copy)]
pub struct JsonSchema<'a> {
    root: &'a Value,
    node: &'a Value,
}

impl<'a> JsonSchema<'a> {
    /// Handle to the root of the schema document `root`.
    pub fn new(root: &'a Value) -> Self {
        Self { root, node: root }
    }

    /// The schema node this handle points at, before `$ref` resolution.
    pub fn node(&self) -> &'a Value {
        self.node
    }

    fn at(&self, node: &'a Value) -> Self {
        Self {
            root: self.root,
            node,
        }
    }

    fn permissive(&self) -> Self {
        self.at(&PERMISSIVE)
    }

    fn resolve_ref(&self, reference: &str) -> Option<&'a Value> {
        let Some(pointer) = reference.strip_prefix('#') else {
            tracing::debug!(reference, "ignoring non-local $ref");
            return None;
        };
        let target = self.root.pointer(pointer);
        if target.is_none() {
            tracing::debug!(reference, "unresolved $ref");
        }
        target
    }

    fn follow_refs(&self, node: &'a Value) -> Option<&'a Value> {
        let mut current = node;
        for _ in 0..MAX_INDIRECTIONS {
            match current.get("$ref").and_then(Value::as_str) {
                Some(reference) => current = self.resolve_ref(reference)?,
                None => return Some(current),
            }
        }
        tracing::warn!(limit = MAX_INDIRECTIONS, "$ref chain did not resolve to a schema");
        None
    }

    /// The concrete node behind `$ref` chains and at most one nullable
    /// wrapper.
    fn underlying(&self) -> Option<&'a Value> {
        let node = self.follow_refs(self.node)?;
        match nullable_inner(node) {
            Some(inner) => self.follow_refs(inner),
            None => Some(node),
        }
    }

    fn lookup(&self, name: &str, depth: usize) -> Option<Self> {
        if depth >= MAX_INDIRECTIONS {
            tracing::warn!(field = name, limit = MAX_INDIRECTIONS, "allOf nesting too deep");
            return None;
        }
        let node = self.underlying()?;
        if is_permissive(node) {
            return Some(self.permissive());
        }
        let schema = node.as_object()?;

        if let Some(property) = schema.get("properties").and_then(|p| p.get(name)) {
            return Some(self.at(property));
        }

        let promoted = schema
            .get("allOf")
            .and_then(Value::as_array)
            .and_then(|branches| {
                branches
                    .iter()
                    .find_map(|branch| self.at(branch).lookup(name, depth + 1))
            });
        if promoted.is_some() {
            return promoted;
        }

        match schema.get("additionalProperties") {
            Some(Value::Bool(true)) => Some(self.permissive()),
            Some(value) if value.is_object() => Some(self.at(value)),
            _ => None,
        }
    }

    fn items_schema(&self, items: &'a Value) -> Option<Self> {
        match items {
            Value::Bool(true) => Some(self.permissive()),
            Value::Object(_) => Some(self.at(items)),
            _ => None,
        }
    }
}

impl SchemaProvider for JsonSchema<'_> {
    fn resolve_field(&self, name: &str) -> Option<Self> {
        self.lookup(name, 0)
    }

    fn element(&self, index: usize) -> Option<Self> {
        let node = self.underlying()?;
        if is_permissive(node) {
            return Some(self.permissive());
        }
        let schema = node.as_object()?;

        // 2020-12 tuples: prefixItems, then items for the rest.
        if let Some(prefix) = schema.get("prefixItems").and_then(Value::as_array) {
            return match prefix.get(index) {
                Some(item) => Some(self.at(item)),
                None => schema.get("items").and_then(|items| self.items_schema(items)),
            };
        }

        match schema.get("items")? {
            Value::Array(tuple) => match tuple.get(index) {
                Some(item) => Some(self.at(item)),
                None => schema
                    .get("additionalItems")
                    .and_then(|items| self.items_schema(items)),
            },
            items => self.items_schema(items),
        }
    }
}

/// The single non-null branch of an `anyOf`/`oneOf` wrapper, if `node` is
/// such a wrapper and declares no structure of its own.
fn nullable_inner(node: &Value) -> Option<&Value> {
    let schema = node.as_object()?;
    if ["properties", "additionalProperties", "items", "prefixItems"]
        .iter()
        .any(|keyword| schema.contains_key(*keyword))
    {
        return None;
    }
    ["anyOf", "oneOf"].iter().find_map(|keyword| {
        let branches = schema.get(*keyword)?.as_array()?;
        let mut non_null = branches.iter().filter(|branch| !is_null_schema(branch));
        match (non_null.next(), non_null.next()) {
            (Some(inner), None) => Some(inner),
            _ => None,
        }
    })
}

fn is_null_schema(node: &Value) -> bool {
    node.get("type").and_then(Value::as_str) == Some("null")
}

fn is_permissive(node: &Value) -> bool {
    match node {
        Value::Bool(accept) => *accept,
        Value::Object(schema) => only_annotations(schema),
        _ => false,
    }
}

fn only_annotations(schema: &Map<String, Value>) -> bool {
    schema
        .keys()
        .all(|keyword| ANNOTATION_KEYWORDS.contains(&keyword.as_str()))
}
