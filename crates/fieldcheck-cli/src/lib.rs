//! # fieldcheck-cli: Command-Line Interface
//!
//! Provides the `fieldcheck` binary:
//!
//! ```bash
//! fieldcheck check plugins.yaml --schema plugins.schema.json
//! fieldcheck check a.json b.yaml --schema config.schema.json --output json
//! ```
//!
//! ## Exit Codes
//!
//! - `0`: every key in every document resolved against the schema.
//! - `1`: at least one unknown field was found.
//! - `2`: operational error (unreadable file, malformed document or schema).
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handler in [`check`].
//! - Detection logic lives in `fieldcheck-walker`; nothing here walks documents.

pub mod check;
