//! File validation: the header/rows state machine over one TSV file.
//!
//! Input is tab-separated values with no quoting or escaping and `\n`
//! line termination. The first record is the header; it must equal the
//! schema's column names exactly, in order. A header failure is terminal
//! for the file: no row is validated, so header and row findings for one
//! file never mix. Row findings accumulate across every remaining record.
//!
//! Line numbers are not tracked: all findings from one file are
//! indistinguishable by row location.

use std::fs;
use std::path::Path;

use crate::error::{Diagnostic, ValidateError};
use crate::grammar::Violation;
use crate::row::validate_row;
use crate::schema::TableSchema;

/// Read and validate one table file.
///
/// # Errors
///
/// Returns [`ValidateError::Io`] when the path cannot be read; this is the
/// one fatal condition and aborts the batch.
pub fn validate_path(path: &Path, schema: &TableSchema) -> Result<Vec<Diagnostic>, ValidateError> {
    let content = fs::read_to_string(path).map_err(|source| ValidateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(validate_records(path, &content, schema))
}

/// Validate already-loaded table content, tagging findings with `context`.
#[must_use]
pub fn validate_records(context: &Path, content: &str, schema: &TableSchema) -> Vec<Diagnostic> {
    // Blank lines are not records.
    let mut records = content.lines().filter(|line| !line.is_empty());

    // HEADER state: one record, checked fail-fast.
    let Some(header) = records.next() else {
        return vec![diagnostic(context, Violation::new("Missing header row"))];
    };
    let header_fields: Vec<&str> = header.split('\t').collect();
    let header_violations = check_header(schema, &header_fields);
    if !header_violations.is_empty() {
        return header_violations
            .into_iter()
            .map(|v| diagnostic(context, v))
            .collect();
    }

    // ROWS state: stream every remaining record, fail-soft.
    let mut diagnostics = Vec::new();
    for record in records {
        let fields: Vec<&str> = record.split('\t').collect();
        diagnostics.extend(
            validate_row(schema, &fields)
                .into_iter()
                .map(|v| diagnostic(context, v)),
        );
    }
    diagnostics
}

/// Compare the header record field-by-field against the schema's names.
fn check_header(schema: &TableSchema, fields: &[&str]) -> Vec<Violation> {
    let columns = schema.columns();
    let mut violations = Vec::new();
    for (index, column) in columns.iter().enumerate() {
        match fields.get(index) {
            None => violations.push(Violation::new(format!("Missing header '{}'", column.name))),
            Some(value) if *value != column.name => violations.push(Violation::new(format!(
                "Expected header '{}', got '{}'",
                column.name, value
            ))),
            Some(_) => {}
        }
    }
    for extra in fields.iter().skip(columns.len()) {
        violations.push(Violation::new(format!("Unexpected header '{extra}'")));
    }
    violations
}

fn diagnostic(context: &Path, violation: Violation) -> Diagnostic {
    Diagnostic {
        file: context.to_path_buf(),
        message: violation.message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaVersion;
    use std::path::PathBuf;

    const V3_HEADER: &str =
        "Opcode\tOperand1\tOperand2\tOperand3\tOperand4\tOperandEncoding\tExtra\tForcedPrefix\tSupport";

    fn ctx() -> PathBuf {
        PathBuf::from("table.tsv")
    }

    #[test]
    fn test_valid_file_yields_no_diagnostics() {
        let schema = SchemaVersion::V3.schema();
        let content = format!(
            "{V3_HEADER}\n\
             0F,94/0\trm8\t\t\t\tM\t\t\tV,V\n\
             B8+\tr32\timm32\t\t\tOI\t\t\tV,V\n"
        );
        assert!(validate_records(&ctx(), &content, &schema).is_empty());
    }

    #[test]
    fn test_header_failure_suppresses_row_checks() {
        let schema = SchemaVersion::V3.schema();
        // Bad header AND a row that would fail its grammars.
        let content = "Opcode\tWrong\n\
                       not-hex\tbogus\n";
        let diagnostics = validate_records(&ctx(), content, &schema);
        assert!(!diagnostics.is_empty());
        assert!(
            diagnostics
                .iter()
                .all(|d| d.message.contains("header") || d.message.contains("Header")),
            "row findings leaked past a failed header: {diagnostics:?}"
        );
    }

    #[test]
    fn test_header_reports_each_mismatch() {
        let schema = SchemaVersion::V1.schema();
        let diagnostics = validate_records(&ctx(), "Opcode\tOperandX\n", &schema);
        // One wrong name, four missing names.
        assert_eq!(diagnostics.len(), 5);
        assert!(diagnostics[0].message.contains("Expected header 'Operand1'"));
        assert!(diagnostics[1].message.contains("Missing header 'Operand2'"));
    }

    #[test]
    fn test_extra_header_field_fails_the_file() {
        let schema = SchemaVersion::V1.schema();
        let content =
            "Opcode\tOperand1\tOperand2\tOperand3\tOperand4\tModifier\tSurplus\n90\t\t\t\t\t\n";
        let diagnostics = validate_records(&ctx(), content, &schema);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "Unexpected header 'Surplus'");
    }

    #[test]
    fn test_empty_input_is_missing_header_row() {
        let schema = SchemaVersion::V3.schema();
        let diagnostics = validate_records(&ctx(), "", &schema);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "Missing header row");
    }

    #[test]
    fn test_bad_row_does_not_suppress_later_rows() {
        let schema = SchemaVersion::V3.schema();
        let content = format!(
            "{V3_HEADER}\n\
             GG\trm8\t\t\t\tM\t\t\tV,V\n\
             0F\trm8\t\t\t\tM\t\t\tV,V\n\
             ZZ\trm8\t\t\t\tM\t\t\tV,V\n"
        );
        let diagnostics = validate_records(&ctx(), &content, &schema);
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics[0].message.contains("'GG'"));
        assert!(diagnostics[1].message.contains("'ZZ'"));
    }

    #[test]
    fn test_diagnostics_carry_the_file_context() {
        let schema = SchemaVersion::V3.schema();
        let content = format!("{V3_HEADER}\n\tXX\t\t\t\tM\t\t\tV,V\n");
        let diagnostics = validate_records(&ctx(), &content, &schema);
        assert!(!diagnostics.is_empty());
        assert!(diagnostics.iter().all(|d| d.file == ctx()));
    }
}
