//! Per-column field grammars.
//!
//! Each grammar is a pure function from a raw field string to zero or more
//! [`Violation`]s. Grammars never see file context; tagging findings with
//! the originating file is the file validator's job.
//!
//! Sub-modules:
//! - `fields` — single-vocabulary columns (`OperandEncoding`, `Extra`,
//!   `ForcedPrefix`, `Support`, `Modifier`)
//! - `operand` — name-form operand grammar (current table generation)
//! - `addressing` — addressing-form operand grammar (older generations)

pub mod addressing;
pub mod fields;
pub mod operand;

use serde::Serialize;

/// A single grammar failure for one field value.
///
/// Immutable once created; carries the human-readable description only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Human-readable description of the failure.
    pub message: String,
}

impl Violation {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// The grammar applied to one table column.
///
/// The two operand flavors are distinct variants selected by the active
/// [`TableSchema`](crate::schema::TableSchema), never auto-detected from the
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldGrammar {
    /// A base-16 integer in `[0, 255]`.
    HexByte,
    /// Opcode byte list with optional `+` marker and `/digit` extension.
    Opcode,
    /// Name-form operand: operand class plus optional signedness attribute.
    OperandName,
    /// Addressing-form operand: `$register` or method letter plus type code.
    OperandAddressing,
    /// Operand-to-byte encoding shape code.
    OperandEncoding,
    /// Comma-separated encoding modifier tokens.
    Extra,
    /// Mandatory legacy prefix byte. When `restricted`, the byte must also
    /// belong to one of the four legacy prefix groups.
    ForcedPrefix { restricted: bool },
    /// 64-bit and legacy mode support flags.
    Support,
    /// ModRM reg-field modifier (`/0`..`/7` or `/r`).
    Modifier,
}

impl FieldGrammar {
    /// Run this grammar over one raw field value.
    #[must_use]
    pub fn check(self, raw: &str) -> Vec<Violation> {
        match self {
            Self::HexByte => check_hex_byte(raw),
            Self::Opcode => check_opcode(raw),
            Self::OperandName => operand::check(raw),
            Self::OperandAddressing => addressing::check(raw),
            Self::OperandEncoding => fields::check_operand_encoding(raw),
            Self::Extra => fields::check_extra(raw),
            Self::ForcedPrefix { restricted } => fields::check_forced_prefix(raw, restricted),
            Self::Support => fields::check_support(raw),
            Self::Modifier => fields::check_modifier(raw),
        }
    }
}

/// Why a string failed to parse as a hex byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HexByteError {
    NotHex,
    OutOfRange,
}

impl HexByteError {
    pub(crate) fn reason(self) -> &'static str {
        match self {
            Self::NotHex => "Not a valid hex integer",
            Self::OutOfRange => "Value out of range [0,255]",
        }
    }
}

/// Parse a base-16 integer and require it to fit in one byte.
///
/// Sign and magnitude are handled by hand so that any well-formed hex
/// numeral, however long or negative, reports the range failure rather
/// than a parse failure.
pub(crate) fn parse_hex_byte(raw: &str) -> Result<u8, HexByteError> {
    let (negative, digits) = split_sign(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(HexByteError::NotHex);
    }
    let magnitude = digits.trim_start_matches('0');
    if magnitude.is_empty() {
        return Ok(0);
    }
    if negative || magnitude.len() > 2 {
        return Err(HexByteError::OutOfRange);
    }
    u8::from_str_radix(magnitude, 16).map_err(|_| HexByteError::NotHex)
}

fn split_sign(raw: &str) -> (bool, &str) {
    match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    }
}

fn check_hex_byte(raw: &str) -> Vec<Violation> {
    match parse_hex_byte(raw) {
        Ok(_) => Vec::new(),
        Err(e) => vec![Violation::new(e.reason())],
    }
}

/// Opcode grammar: comma-separated hex bytes, optionally suffixed with `+`
/// (register embedded in the opcode byte) and `/n` (ModRM extension digit).
///
/// Empty input is fatal for the field: the single `Missing Opcode` finding
/// suppresses all further checks. Every byte token is checked even after an
/// earlier token failed.
fn check_opcode(raw: &str) -> Vec<Violation> {
    if raw.is_empty() {
        return vec![Violation::new("Missing Opcode")];
    }

    let field = raw.strip_suffix('+').unwrap_or(raw);
    let (bytes, extension) = match field.split_once('/') {
        Some((bytes, ext)) => (bytes, Some(ext)),
        None => (field, None),
    };

    let mut violations = Vec::new();
    for token in bytes.split(',') {
        if let Err(e) = parse_hex_byte(token) {
            violations.push(Violation::new(format!(
                "Invalid Opcode '{token}': {}",
                e.reason()
            )));
        }
    }

    // An absent or empty extension is fine; a present one is a base-10
    // digit in [0,7] selecting the ModRM reg field value.
    if let Some(ext) = extension
        && !ext.is_empty()
        && let Some(violation) = check_extension(ext)
    {
        violations.push(violation);
    }

    violations
}

/// A numeric extension outside [0,7] is a range failure even when the
/// numeral is too long for any fixed-width integer.
fn check_extension(ext: &str) -> Option<Violation> {
    let (negative, digits) = split_sign(ext);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Some(Violation::new(format!("Invalid Opcode extension '{ext}'")));
    }
    let magnitude = digits.trim_start_matches('0');
    let in_range =
        magnitude.is_empty() || (!negative && matches!(magnitude.as_bytes(), [b'1'..=b'7']));
    if in_range {
        None
    } else {
        Some(Violation::new(format!(
            "Opcode extension must be within [0,7], got {ext}"
        )))
    }
}
