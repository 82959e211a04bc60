//! Shared output formatting for batch reports.
//!
//! Provides the plain-text and JSON formatters for [`BatchReport`].
//! Color/terminal concerns are intentionally excluded; they belong to the
//! CLI layer.

use std::io::Write;

use crate::report::BatchReport;

/// Write the report in the classic line-oriented form: `<path>: Ok!` for
/// every clean file in input order, then every diagnostic as
/// `<path>: <message>` in insertion order.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &BatchReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    for outcome in &report.files {
        if outcome.clean {
            writeln!(writer, "{}: Ok!", outcome.path.display())?;
        }
    }
    for diagnostic in &report.diagnostics {
        writeln!(writer, "{}", diagnostic.format_human_readable())?;
    }
    Ok(())
}

/// Write the report as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &BatchReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}
