//! # fieldcheck-walker: Unknown-Field Detection
//!
//! Catches configuration keys that a deserializer would silently drop:
//! typos (`verzion`), stale keys, and keys nested under the wrong parent.
//! The document is parsed into a generic tree, then walked against a
//! [`SchemaProvider`](fieldcheck_schema::SchemaProvider). Every mapping
//! key the schema cannot resolve is reported as a dotted/bracketed path.
//!
//! ```
//! use fieldcheck_schema::{Describe, Field, Schema};
//! use fieldcheck_walker::validate_unknown_fields;
//!
//! struct Config;
//!
//! impl Describe for Config {
//!     fn describe() -> Schema {
//!         Schema::record([Field::of::<i64>("version")])
//!     }
//! }
//!
//! let unknown = validate_unknown_fields(br#"{"verzion": 1}"#, &Schema::of::<Config>()).unwrap();
//! assert_eq!(unknown, ["verzion"]);
//! ```
//!
//! ## What Is Reported
//!
//! - Document keys with no matching field, at any depth.
//! - Keys inside sequence elements, as `prefix[i].key`.
//!
//! Missing fields, wrong value types, and schema fields absent from the
//! document are never reported.

pub mod validate;
pub mod walker;

pub use validate::{
    unknown_fields, unknown_fields_of, validate_document, validate_file, validate_unknown_fields,
    validate_unknown_fields_yaml,
};
pub use walker::walk;
