//! Row validation: apply a schema's grammars to one record.

use crate::grammar::{FieldGrammar, Violation};
use crate::schema::TableSchema;

/// Validate one data record against the schema.
///
/// A record too short to contain the mandatory Opcode value invalidates the
/// whole row with a single finding. Otherwise every column's grammar runs
/// in schema order regardless of earlier columns' outcomes: one column's
/// failure never suppresses checks on its siblings. Structurally missing
/// non-Opcode fields are findings of their own; fields beyond the schema
/// width are ignored.
#[must_use]
pub fn validate_row(schema: &TableSchema, fields: &[&str]) -> Vec<Violation> {
    let columns = schema.columns();

    if let Some((index, _)) = columns
        .iter()
        .enumerate()
        .find(|(_, column)| column.grammar == FieldGrammar::Opcode)
        && fields.get(index).is_none()
    {
        return vec![Violation::new("Opcode is missing")];
    }

    let mut violations = Vec::new();
    for (index, column) in columns.iter().enumerate() {
        match fields.get(index) {
            Some(value) => violations.extend(column.grammar.check(value)),
            None => violations.push(Violation::new(format!("Missing field '{}'", column.name))),
        }
    }
    violations
}
