//! # enctab-validator
//!
//! Validator for tabular x86 instruction encoding description files.
//!
//! The tables are TSV files consumed by a downstream encoder/decoder
//! generator; this crate checks their syntactic well-formedness against
//! fixed per-column grammars. Whether an encoding names a real instruction
//! is explicitly out of scope, as is any cross-row semantic check.
//!
//! Layered cleanly, leaves first:
//! - [`grammar`] — pure per-column field grammars over closed vocabularies
//! - [`schema`] — ordered `(name, grammar)` column layouts, one per
//!   file-format generation
//! - [`row`] / [`file`] — the row validator and the header/rows state
//!   machine that drives it per file
//! - [`validate_batch`] — the batch driver, producing a [`BatchReport`]
//!
//! Every layer returns its findings as values; there is no shared mutable
//! diagnostics state anywhere.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use enctab_validator::{SchemaVersion, validate_batch};
//!
//! let schema = SchemaVersion::V3.schema();
//! let paths = vec![PathBuf::from("encodings/base.tsv")];
//! let report = validate_batch(&paths, &schema).unwrap();
//! println!("diagnostics: {}", report.diagnostics_count());
//! std::process::exit(report.exit_code());
//! ```

mod error;
pub mod file;
pub mod grammar;
pub mod output;
mod report;
pub mod row;
pub mod schema;

pub use error::{Diagnostic, ValidateError};
pub use grammar::{FieldGrammar, Violation};
pub use report::{BatchReport, FileOutcome};
pub use schema::{Column, SchemaVersion, TableSchema};

use std::path::PathBuf;

/// Validate a batch of table files against one schema, in input order.
///
/// Each file is validated independently: one file's findings never halt
/// the batch or affect its siblings. A file is clean iff it contributed
/// zero diagnostics. Ordering is part of the contract: per-file outcomes
/// follow input order and diagnostics follow insertion order.
///
/// # Errors
///
/// Returns [`ValidateError::Io`] for an unreadable input path; this aborts
/// the batch (content problems of readable files never do).
pub fn validate_batch(
    paths: &[PathBuf],
    schema: &TableSchema,
) -> Result<BatchReport, ValidateError> {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut files = Vec::with_capacity(paths.len());

    for path in paths {
        let before = diagnostics.len();
        diagnostics.extend(file::validate_path(path, schema)?);
        files.push(FileOutcome {
            path: path.clone(),
            clean: diagnostics.len() == before,
        });
    }

    let ok = diagnostics.is_empty();
    Ok(BatchReport {
        files,
        diagnostics,
        ok,
    })
}
