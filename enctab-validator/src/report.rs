//! Batch validation report types.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::Diagnostic;

/// Per-file outcome within a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    /// The input path, as given.
    pub path: PathBuf,
    /// Whether the file contributed zero diagnostics.
    pub clean: bool,
}

/// Result of validating a whole batch of table files.
///
/// `files` preserves input order; `diagnostics` preserves insertion order
/// (column-then-row within a file, file order across the batch). Both
/// orders are part of the output contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// One outcome per input file, in input order.
    pub files: Vec<FileOutcome>,
    /// Every finding from the batch, in insertion order.
    pub diagnostics: Vec<Diagnostic>,
    /// Whether the batch produced zero diagnostics.
    pub ok: bool,
}

impl BatchReport {
    /// Number of diagnostics recorded across the batch.
    #[must_use]
    pub fn diagnostics_count(&self) -> usize {
        self.diagnostics.len()
    }

    /// Process exit status for this report: 0 when clean, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(!self.ok)
    }
}
