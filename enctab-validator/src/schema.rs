//! Table schemas: the ordered column layout of each file-format generation.
//!
//! A schema is a fixed list of `(name, grammar)` pairs. A file's header
//! record must match the schema's names exactly, in order; no reordering
//! or subsetting is tolerated. Which generation applies to a given file is
//! an external decision; the validator never auto-detects it.

use serde::Serialize;

use crate::grammar::FieldGrammar;

/// One column of a table schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Header name the file must carry for this column.
    pub name: &'static str,
    /// Grammar applied to this column's values.
    pub grammar: FieldGrammar,
}

impl Column {
    const fn new(name: &'static str, grammar: FieldGrammar) -> Self {
        Self { name, grammar }
    }
}

/// An ordered column layout for one file-format generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableSchema {
    version: SchemaVersion,
    columns: &'static [Column],
}

impl TableSchema {
    /// The generation this schema describes.
    #[must_use]
    pub fn version(&self) -> SchemaVersion {
        self.version
    }

    /// Columns in header order.
    #[must_use]
    pub fn columns(&self) -> &'static [Column] {
        self.columns
    }
}

/// The supported file-format generations. Each is a distinct file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SchemaVersion {
    /// Addressing-form operands plus a ModRM modifier column.
    V1,
    /// V1 plus a group-restricted `ForcedPrefix` column.
    V2,
    /// Current generation: name-form operands, encoding shape, extras,
    /// unrestricted `ForcedPrefix` and mode-support flags.
    V3,
}

const V1_COLUMNS: &[Column] = &[
    Column::new("Opcode", FieldGrammar::Opcode),
    Column::new("Operand1", FieldGrammar::OperandAddressing),
    Column::new("Operand2", FieldGrammar::OperandAddressing),
    Column::new("Operand3", FieldGrammar::OperandAddressing),
    Column::new("Operand4", FieldGrammar::OperandAddressing),
    Column::new("Modifier", FieldGrammar::Modifier),
];

const V2_COLUMNS: &[Column] = &[
    Column::new("Opcode", FieldGrammar::Opcode),
    Column::new("Operand1", FieldGrammar::OperandAddressing),
    Column::new("Operand2", FieldGrammar::OperandAddressing),
    Column::new("Operand3", FieldGrammar::OperandAddressing),
    Column::new("Operand4", FieldGrammar::OperandAddressing),
    Column::new("Modifier", FieldGrammar::Modifier),
    Column::new("ForcedPrefix", FieldGrammar::ForcedPrefix { restricted: true }),
];

const V3_COLUMNS: &[Column] = &[
    Column::new("Opcode", FieldGrammar::Opcode),
    Column::new("Operand1", FieldGrammar::OperandName),
    Column::new("Operand2", FieldGrammar::OperandName),
    Column::new("Operand3", FieldGrammar::OperandName),
    Column::new("Operand4", FieldGrammar::OperandName),
    Column::new("OperandEncoding", FieldGrammar::OperandEncoding),
    Column::new("Extra", FieldGrammar::Extra),
    Column::new("ForcedPrefix", FieldGrammar::ForcedPrefix { restricted: false }),
    Column::new("Support", FieldGrammar::Support),
];

impl SchemaVersion {
    /// The schema constant for this generation.
    #[must_use]
    pub fn schema(self) -> TableSchema {
        let columns = match self {
            Self::V1 => V1_COLUMNS,
            Self::V2 => V2_COLUMNS,
            Self::V3 => V3_COLUMNS,
        };
        TableSchema {
            version: self,
            columns,
        }
    }
}
