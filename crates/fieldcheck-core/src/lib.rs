//! # fieldcheck-core: Foundational Types for fieldcheck
//!
//! This crate holds the pieces every other fieldcheck crate shares: the
//! error taxonomy, the unknown-path formatting rules, and the loaders that
//! turn raw JSON or YAML bytes into the generic document tree the walker
//! consumes.
//!
//! ## Key Design Principles
//!
//! 1. **One document tree.** Every input format is converted into a
//!    `serde_json::Value` before any schema comparison happens. YAML is
//!    accepted only through the conversion in [`document`].
//!
//! 2. **Unknown fields are findings, not errors.** The only failure this
//!    layer reports is a malformed document. A document with unknown keys
//!    parses successfully and the keys show up as [`UnknownPath`] strings.
//!
//! 3. **Paths are plain strings.** `.key` for mapping access, `[i]` for
//!    sequence access, and the leading `.` stripped from reported paths
//!    (`size.xs`, `triggers[1].repoz`).
//!
//! ## Crate Policy
//!
//! - No dependencies on other `fieldcheck-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod document;
pub mod error;
pub mod path;

pub use document::{parse_document, parse_json, parse_yaml, read_document, DocumentFormat};
pub use error::{DocumentError, FieldCheckError};
pub use path::{PathPrefix, UnknownPath};
