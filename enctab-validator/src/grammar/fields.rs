//! Single-vocabulary column grammars: `OperandEncoding`, `Extra`,
//! `ForcedPrefix`, `Support` and `Modifier`.
//!
//! Every vocabulary is a closed enumeration with one `parse` function, so
//! extending the table format is an exhaustive-match change rather than a
//! string-list edit.

use super::{Violation, parse_hex_byte};

/// Shape of the operand-to-byte encoding for one instruction form.
///
/// The letters follow the reference manual's operand-encoding column:
/// `R` = ModRM reg, `M` = ModRM r/m, `I` = immediate, `O` = register
/// embedded in the opcode byte, `D` = offset/displacement, `FD`/`TD` =
/// moffs transfers, `ZO` = no operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandEncoding {
    Rmi,
    Rm,
    Mr,
    Fd,
    Td,
    Oi,
    Mi,
    Mc,
    M1,
    O,
    M,
    I,
    D,
    S,
    Zo,
}

impl OperandEncoding {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "RMI" => Some(Self::Rmi),
            "RM" => Some(Self::Rm),
            "MR" => Some(Self::Mr),
            "FD" => Some(Self::Fd),
            "TD" => Some(Self::Td),
            "OI" => Some(Self::Oi),
            "MI" => Some(Self::Mi),
            "MC" => Some(Self::Mc),
            "M1" => Some(Self::M1),
            "O" => Some(Self::O),
            "M" => Some(Self::M),
            "I" => Some(Self::I),
            "D" => Some(Self::D),
            "S" => Some(Self::S),
            "ZO" => Some(Self::Zo),
            _ => None,
        }
    }
}

/// Blank is not tolerated here: once the column exists, every row must name
/// its encoding shape.
pub(crate) fn check_operand_encoding(raw: &str) -> Vec<Violation> {
    if OperandEncoding::parse(raw).is_none() {
        return vec![Violation::new(format!(
            "'{raw}' is not a valid operand encoding"
        ))];
    }
    Vec::new()
}

/// Extra encoding requirements for one instruction form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingExtra {
    /// `66` operand-size override is part of the encoding.
    OperandSizeOverride,
    /// A REX prefix must be present.
    Rex,
    /// A REX prefix with the W bit set must be present.
    RexW,
}

impl EncodingExtra {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "OperandSizeOverride" => Some(Self::OperandSizeOverride),
            "REX" => Some(Self::Rex),
            "REX.W" => Some(Self::RexW),
            _ => None,
        }
    }
}

pub(crate) fn check_extra(raw: &str) -> Vec<Violation> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',')
        .filter(|token| EncodingExtra::parse(token).is_none())
        .map(|token| Violation::new(format!("Invalid Extra '{token}'")))
        .collect()
}

/// The four legacy prefix groups.
///
/// Mutual exclusivity between same-group prefixes across rows is
/// intentionally not checked; see DESIGN.md.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixGroup {
    /// Group 1: `F0`, `F2`, `F3`.
    Repeat,
    /// Group 2: `2E`, `36`, `3E`, `26`, `64`, `65`.
    SegmentOverride,
    /// Group 3: `66`.
    OperandSize,
    /// Group 4: `67`.
    AddressSize,
}

impl PrefixGroup {
    /// Classify a prefix byte into its group, if it is a legacy prefix.
    #[must_use]
    pub fn classify(byte: u8) -> Option<Self> {
        match byte {
            0xF0 | 0xF2 | 0xF3 => Some(Self::Repeat),
            0x2E | 0x36 | 0x3E | 0x26 | 0x64 | 0x65 => Some(Self::SegmentOverride),
            0x66 => Some(Self::OperandSize),
            0x67 => Some(Self::AddressSize),
            _ => None,
        }
    }
}

/// Blank means no forced prefix. Otherwise the value must be a hex byte;
/// `restricted` additionally requires membership in one of the legacy
/// prefix groups (the older table generations used the restricted form).
pub(crate) fn check_forced_prefix(raw: &str, restricted: bool) -> Vec<Violation> {
    if raw.is_empty() {
        return Vec::new();
    }
    let byte = match parse_hex_byte(raw) {
        Ok(byte) => byte,
        Err(e) => {
            return vec![Violation::new(format!(
                "Invalid ForcedPrefix '{raw}': {}",
                e.reason()
            ))];
        }
    };
    if restricted && PrefixGroup::classify(byte).is_none() {
        return vec![Violation::new(format!(
            "Invalid ForcedPrefix '{raw}': not a recognized legacy prefix"
        ))];
    }
    Vec::new()
}

/// Whether an instruction form is usable in 64-bit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Support64 {
    /// `V` — valid.
    Valid,
    /// `I` — invalid.
    Invalid,
    /// `NE` — not encodable.
    NotEncodable,
    /// `NP` — not preferred.
    NotPreferred,
    /// `NI` — not valid in 64-bit mode.
    NotValidIn64Bit,
    /// `NS` — not supported.
    NotSupported,
}

impl Support64 {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "V" => Some(Self::Valid),
            "I" => Some(Self::Invalid),
            "NE" => Some(Self::NotEncodable),
            "NP" => Some(Self::NotPreferred),
            "NI" => Some(Self::NotValidIn64Bit),
            "NS" => Some(Self::NotSupported),
            _ => None,
        }
    }
}

/// Whether an instruction form is usable in legacy/compatibility mode.
/// A strict subset of [`Support64`]: the 64-bit-specific codes do not apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportLegacy {
    Valid,
    Invalid,
    NotEncodable,
}

impl SupportLegacy {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "V" => Some(Self::Valid),
            "I" => Some(Self::Invalid),
            "NE" => Some(Self::NotEncodable),
            _ => None,
        }
    }
}

/// Exactly two comma-separated tokens: 64-bit support, then legacy support.
/// Wrong arity short-circuits: no per-token findings are produced.
pub(crate) fn check_support(raw: &str) -> Vec<Violation> {
    let tokens: Vec<&str> = raw.split(',').collect();
    if tokens.len() != 2 {
        return vec![Violation::new(format!(
            "Invalid Support: expected exactly 2 fields, got {}",
            tokens.len()
        ))];
    }
    let mut violations = Vec::new();
    if Support64::parse(tokens[0]).is_none() {
        violations.push(Violation::new(format!(
            "Invalid 64-bit Support field: {}",
            tokens[0]
        )));
    }
    if SupportLegacy::parse(tokens[1]).is_none() {
        violations.push(Violation::new(format!(
            "Invalid legacy Support field: {}",
            tokens[1]
        )));
    }
    violations
}

/// What the ModRM reg field means for one instruction form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegFieldUse {
    /// `/0`..`/7` — the reg field is an opcode extension digit.
    Extension(u8),
    /// `/r` — the reg field selects a register operand.
    Register,
}

impl RegFieldUse {
    /// Parse a full modifier value (`/0`..`/7` or `/r`).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let rest = raw.strip_prefix('/')?;
        match rest.as_bytes() {
            [digit @ b'0'..=b'7'] => Some(Self::Extension(digit - b'0')),
            [b'r'] => Some(Self::Register),
            _ => None,
        }
    }
}

/// Blank means no modifier. Otherwise: exactly two characters, a leading
/// slash, then a digit 0-7 or `r`. At most one violation is reported,
/// naming the first check that failed.
pub(crate) fn check_modifier(raw: &str) -> Vec<Violation> {
    if raw.is_empty() {
        return Vec::new();
    }
    if !raw.starts_with('/') {
        return vec![Violation::new(format!(
            "Invalid Modifier '{raw}': must begin with '/'"
        ))];
    }
    if raw.chars().count() != 2 {
        return vec![Violation::new(format!(
            "Invalid Modifier '{raw}': must be exactly 2 characters"
        ))];
    }
    if RegFieldUse::parse(raw).is_none() {
        return vec![Violation::new(format!(
            "Invalid Modifier '{raw}': expected a digit 0-7 or 'r' after '/'"
        ))];
    }
    Vec::new()
}
