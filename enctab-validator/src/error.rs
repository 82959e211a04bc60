//! Error and diagnostic types.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// A fatal condition that aborts the whole batch.
///
/// Everything a table's *content* can do wrong is a [`Diagnostic`], never an
/// error; only an input that cannot be read at all stops the run.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// An input path could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The unreadable input path.
        path: PathBuf,
        /// The underlying storage failure.
        #[source]
        source: std::io::Error,
    },
}

/// One validation finding, tagged with the file it came from.
///
/// Diagnostics accumulate in strict insertion order across the whole batch;
/// that order is part of the output contract. There is no severity level;
/// any diagnostic fails the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// The file the finding belongs to.
    pub file: PathBuf,
    /// Human-readable description of the finding.
    pub message: String,
}

impl Diagnostic {
    /// Format the diagnostic for human-readable output: `<path>: <message>`.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        format!("{}: {}", self.file.display(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_diagnostic() {
        let diag = Diagnostic {
            file: PathBuf::from("encodings/base.tsv"),
            message: "Missing Opcode".to_owned(),
        };
        assert_eq!(
            diag.format_human_readable(),
            "encodings/base.tsv: Missing Opcode"
        );
    }

    #[test]
    fn test_io_error_names_the_path() {
        let err = ValidateError::Io {
            path: PathBuf::from("missing.tsv"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("missing.tsv"));
    }
}
