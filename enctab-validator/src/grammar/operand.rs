//! Name-form operand grammar.
//!
//! The current table generation spells operands as readable class names
//! (`rm32`, `imm8`, `moffs64`, ...) with an optional signedness attribute,
//! e.g. `imm16,Signed`. Blank means the operand slot is unused.

use super::Violation;

/// Operand bit width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    W8,
    W16,
    W32,
    W64,
}

/// A specific segment register operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentReg {
    Cs,
    Ss,
    Ds,
    Es,
    Fs,
    Gs,
}

/// The closed vocabulary of operand classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandClass {
    /// `m` — any memory operand.
    Mem,
    /// `rm8`..`rm64` — register or memory.
    RegMem(Width),
    /// `r8`..`r64` — general-purpose register.
    Reg(Width),
    /// `Sreg` — any segment register.
    AnySegment,
    /// `cl`/`cx`/`ecx`/`rcx` — the fixed counter register.
    Counter(Width),
    /// `al`/`ax`/`eax`/`rax` — the fixed accumulator register.
    Accumulator(Width),
    /// A specific segment register.
    Segment(SegmentReg),
    /// `moffs8`..`moffs64` — absolute memory offset.
    MemOffset(Width),
    /// `imm8`..`imm64` — immediate.
    Immediate(Width),
    /// `ptr16:16` / `ptr16:32` — far pointer immediate.
    FarPointer16_16,
    FarPointer16_32,
    /// `m16:16` / `m16:32` / `m16:64` — far pointer in memory.
    FarMem16_16,
    FarMem16_32,
    FarMem16_64,
    /// `rel8`/`rel16`/`rel32` — relative branch offset.
    Relative(Width),
    /// The literal constant `1`.
    One,
}

impl OperandClass {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        use Width::{W8, W16, W32, W64};
        match raw {
            "m" => Some(Self::Mem),
            "rm8" => Some(Self::RegMem(W8)),
            "rm16" => Some(Self::RegMem(W16)),
            "rm32" => Some(Self::RegMem(W32)),
            "rm64" => Some(Self::RegMem(W64)),
            "r8" => Some(Self::Reg(W8)),
            "r16" => Some(Self::Reg(W16)),
            "r32" => Some(Self::Reg(W32)),
            "r64" => Some(Self::Reg(W64)),
            "Sreg" => Some(Self::AnySegment),
            "cl" => Some(Self::Counter(W8)),
            "cx" => Some(Self::Counter(W16)),
            "ecx" => Some(Self::Counter(W32)),
            "rcx" => Some(Self::Counter(W64)),
            "al" => Some(Self::Accumulator(W8)),
            "ax" => Some(Self::Accumulator(W16)),
            "eax" => Some(Self::Accumulator(W32)),
            "rax" => Some(Self::Accumulator(W64)),
            "cs" => Some(Self::Segment(SegmentReg::Cs)),
            "ss" => Some(Self::Segment(SegmentReg::Ss)),
            "ds" => Some(Self::Segment(SegmentReg::Ds)),
            "es" => Some(Self::Segment(SegmentReg::Es)),
            "fs" => Some(Self::Segment(SegmentReg::Fs)),
            "gs" => Some(Self::Segment(SegmentReg::Gs)),
            "moffs8" => Some(Self::MemOffset(W8)),
            "moffs16" => Some(Self::MemOffset(W16)),
            "moffs32" => Some(Self::MemOffset(W32)),
            "moffs64" => Some(Self::MemOffset(W64)),
            "imm8" => Some(Self::Immediate(W8)),
            "imm16" => Some(Self::Immediate(W16)),
            "imm32" => Some(Self::Immediate(W32)),
            "imm64" => Some(Self::Immediate(W64)),
            "ptr16:16" => Some(Self::FarPointer16_16),
            "ptr16:32" => Some(Self::FarPointer16_32),
            "m16:16" => Some(Self::FarMem16_16),
            "m16:32" => Some(Self::FarMem16_32),
            "m16:64" => Some(Self::FarMem16_64),
            "rel8" => Some(Self::Relative(W8)),
            "rel16" => Some(Self::Relative(W16)),
            "rel32" => Some(Self::Relative(W32)),
            "1" => Some(Self::One),
            _ => None,
        }
    }
}

/// Signedness attribute on an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandAttribute {
    Signed,
    Unsigned,
}

impl OperandAttribute {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Signed" => Some(Self::Signed),
            "Unsigned" => Some(Self::Unsigned),
            _ => None,
        }
    }
}

/// Blank is always valid (unused operand slot). At most two comma-separated
/// tokens: the class, then an optional attribute. Wrong arity
/// short-circuits: neither token is vocabulary-checked.
pub(crate) fn check(raw: &str) -> Vec<Violation> {
    if raw.is_empty() {
        return Vec::new();
    }
    let tokens: Vec<&str> = raw.split(',').collect();
    if tokens.len() > 2 {
        return vec![Violation::new("Too many fields in operand")];
    }

    let mut violations = Vec::new();
    if OperandClass::parse(tokens[0]).is_none() {
        violations.push(Violation::new(format!("Invalid operand '{}'", tokens[0])));
    }
    // Attribute validity is independent of the class token's validity.
    if let Some(attribute) = tokens.get(1)
        && OperandAttribute::parse(attribute).is_none()
    {
        violations.push(Violation::new(format!(
            "Invalid operand attribute '{attribute}'"
        )));
    }
    violations
}
