//! # fieldcheck-schema: Schema Providers
//!
//! The walker never inspects a schema directly. It asks a
//! [`SchemaProvider`] two questions: "which sub-schema does mapping key
//! `name` resolve to?" and "which sub-schema does sequence index `i`
//! resolve to?". A `None` answer means the document location has no
//! schema counterpart.
//!
//! Two providers ship with this crate:
//!
//! - [`Schema`]: a description of a Rust type: records with tagged
//!   fields (`"name,omitempty"`, `"-"`), embedded records whose fields are
//!   promoted into the enclosing record, maps, sequences, and optional
//!   wrappers. Types describe themselves through the [`Describe`] trait.
//! - [`JsonSchema`]: a JSON Schema document (`properties`,
//!   `additionalProperties`, `items`, `allOf`, local `$ref`).
//!
//! ## Crate Policy
//!
//! - Resolution never fails loudly. Any shape that cannot answer a
//!   question answers `None`.
//! - Schemas are read-only during a walk and may be shared across threads.

pub mod describe;
pub mod json_schema;
pub mod provider;
pub mod tag;

pub use describe::{Describe, Field, Schema};
pub use json_schema::JsonSchema;
pub use provider::{SchemaProvider, MAX_INDIRECTIONS};
pub use tag::tag_name;
