//! # Schema Provider Interface
//!
//! The seam between the tree walker and whatever describes the target
//! type. Implementations decide how field names, embedding, map value
//! types, and sequence element types are looked up.

/// Upper bound on consecutive indirections (lazy type references, `$ref`
/// hops, embedded-record descent) followed while resolving one lookup.
///
/// A schema graph whose indirections form a cycle with no structure in
/// between resolves to `None` once the bound is reached.
pub const MAX_INDIRECTIONS: usize = 32;

/// A handle to a position in a schema that can resolve its children.
///
/// Handles are cheap values (`Clone` is expected to be inexpensive) and are
/// never mutated by the walker.
pub trait SchemaProvider: Sized {
    /// Resolve the mapping key `name` against this schema node.
    ///
    /// - A map schema resolves every key to its shared value schema.
    /// - A record schema resolves a key that matches a field's external
    ///   name, searching embedded records first in declaration order.
    /// - Every other shape returns `None`.
    fn resolve_field(&self, name: &str) -> Option<Self>;

    /// Resolve the element schema for sequence index `index`.
    ///
    /// Sequence schemas with a single element type return it for every
    /// index. Shapes that are not sequences return `None`.
    fn element(&self, index: usize) -> Option<Self>;
}
