//! # Check Subcommand
//!
//! Loads a JSON Schema, parses each document (JSON or YAML), and reports
//! every document key that has no counterpart in the schema.
//!
//! Unknown fields are findings: they set exit code 1 but do not stop the
//! remaining documents from being checked. An unreadable or malformed
//! document or schema is an operational error and aborts the run.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;
use serde_json::Value;

use fieldcheck_core::{read_document, DocumentFormat, UnknownPath};
use fieldcheck_schema::JsonSchema;
use fieldcheck_walker::validate_file;

/// Arguments for the `fieldcheck check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Documents to check (.json, .yaml, .yml).
    #[arg(value_name = "DOCUMENT", required = true)]
    pub documents: Vec<PathBuf>,

    /// JSON Schema describing the expected document structure. May be
    /// written in JSON or YAML.
    #[arg(short, long, value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Document format. `auto` picks YAML for .yaml/.yml and JSON otherwise.
    #[arg(long, value_enum, default_value_t = FormatArg::Auto)]
    pub format: FormatArg,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

/// Document format selection.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    /// Infer from the file extension.
    Auto,
    /// Force JSON.
    Json,
    /// Force YAML.
    Yaml,
}

impl FormatArg {
    /// The concrete format for the document at `path`.
    pub fn resolve(self, path: &Path) -> DocumentFormat {
        match self {
            Self::Auto => DocumentFormat::from_path(path),
            Self::Json => DocumentFormat::Json,
            Self::Yaml => DocumentFormat::Yaml,
        }
    }
}

/// Report format.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per unknown field plus a summary.
    Text,
    /// A JSON array of per-document reports.
    Json,
}

/// Unknown fields found in one document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    /// Path of the document as given on the command line.
    pub document: String,
    /// Unknown paths, in document order.
    pub unknown_fields: Vec<UnknownPath>,
}

impl DocumentReport {
    /// Returns true if no unknown field was found.
    pub fn is_clean(&self) -> bool {
        self.unknown_fields.is_empty()
    }
}

/// Execute the check subcommand, writing the report to `out`.
///
/// Returns exit code: 0 when every document is clean, 1 when unknown
/// fields were found.
pub fn run_check(args: &CheckArgs, out: &mut impl Write) -> Result<u8> {
    let schema = load_schema(&args.schema)?;
    let provider = JsonSchema::new(&schema);

    let mut reports = Vec::with_capacity(args.documents.len());
    for path in &args.documents {
        reports.push(check_document(path, args.format.resolve(path), &provider)?);
    }

    match args.output {
        OutputFormat::Text => write_text(out, &reports)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &reports)?;
            writeln!(out)?;
        }
    }

    Ok(u8::from(reports.iter().any(|r| !r.is_clean())))
}

/// Read and parse the schema file at `path`.
pub fn load_schema(path: &Path) -> Result<Value> {
    let schema = read_document(path, DocumentFormat::from_path(path))
        .with_context(|| format!("cannot read schema {}", path.display()))?;
    tracing::info!(schema = %path.display(), "loaded schema");
    Ok(schema)
}

/// Check the document at `path` against `schema`.
pub fn check_document(
    path: &Path,
    format: DocumentFormat,
    schema: &JsonSchema<'_>,
) -> Result<DocumentReport> {
    let unknown_fields = validate_file(path, format, schema)
        .with_context(|| format!("cannot check {}", path.display()))?;

    tracing::info!(
        document = %path.display(),
        unknown = unknown_fields.len(),
        "checked document"
    );

    Ok(DocumentReport {
        document: path.display().to_string(),
        unknown_fields,
    })
}

fn write_text(out: &mut impl Write, reports: &[DocumentReport]) -> std::io::Result<()> {
    for report in reports {
        for field in &report.unknown_fields {
            writeln!(out, "  UNKNOWN: {} — {}", report.document, field)?;
        }
    }

    let clean = reports.iter().filter(|r| r.is_clean()).count();
    writeln!(out, "Documents: {}/{} clean", clean, reports.len())?;

    let unknown: usize = reports.iter().map(|r| r.unknown_fields.len()).sum();
    if unknown > 0 {
        writeln!(
            out,
            "\n{} unknown field(s) in {} document(s).",
            unknown,
            reports.len() - clean
        )?;
    }
    Ok(())
}
