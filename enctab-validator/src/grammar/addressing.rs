//! Addressing-form operand grammar.
//!
//! The older table generations spell operands the way the reference
//! manual's opcode maps do: a one-letter addressing-method code followed by
//! a size/type code (`Ev`, `Gb`, `Ib`, ...), or `$` plus a concrete
//! register name (`$rax`, `$r11d`). Blank means the operand slot is unused.

use super::Violation;
use crate::grammar::operand::Width;

/// One-letter addressing-method codes from the opcode map notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMethod {
    DirectAddress,     // A
    MemFixed,          // B
    ControlReg,        // C
    DebugReg,          // D
    ModRmRegMem,       // E
    Flags,             // F
    ModRmReg,          // G
    VexReg,            // H
    Immediate,         // I
    RelativeOffset,    // J
    VectorImmediate,   // L
    MemOnly,           // M
    MmxRegMem,         // N
    MemOffset,         // O
    MmxReg,            // P
    MmxModRm,          // Q
    ModRmRegOnly,      // R
    SegmentReg,        // S
    XmmRegMem,         // U
    XmmReg,            // V
    XmmModRm,          // W
    StringSource,      // X
    StringDest,        // Y
    ImplicitOperand,   // %
}

impl AddressingMethod {
    #[must_use]
    pub fn parse(code: char) -> Option<Self> {
        match code {
            'A' => Some(Self::DirectAddress),
            'B' => Some(Self::MemFixed),
            'C' => Some(Self::ControlReg),
            'D' => Some(Self::DebugReg),
            'E' => Some(Self::ModRmRegMem),
            'F' => Some(Self::Flags),
            'G' => Some(Self::ModRmReg),
            'H' => Some(Self::VexReg),
            'I' => Some(Self::Immediate),
            'J' => Some(Self::RelativeOffset),
            'L' => Some(Self::VectorImmediate),
            'M' => Some(Self::MemOnly),
            'N' => Some(Self::MmxRegMem),
            'O' => Some(Self::MemOffset),
            'P' => Some(Self::MmxReg),
            'Q' => Some(Self::MmxModRm),
            'R' => Some(Self::ModRmRegOnly),
            'S' => Some(Self::SegmentReg),
            'U' => Some(Self::XmmRegMem),
            'V' => Some(Self::XmmReg),
            'W' => Some(Self::XmmModRm),
            'X' => Some(Self::StringSource),
            'Y' => Some(Self::StringDest),
            '%' => Some(Self::ImplicitOperand),
            _ => None,
        }
    }
}

/// Operand size/type codes that may follow an addressing method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandType {
    TwoWord,        // a
    Byte,           // b
    ByteOrWord,     // c
    Doubleword,     // d
    DoubleQuad,     // dq
    Pointer,        // p
    PackedDouble,   // pd
    PackedInt,      // pi
    PackedSingle,   // ps
    Quadword,       // q
    QuadQuad,       // qq
    PseudoDesc,     // s
    ScalarDouble,   // sd
    ScalarSingle,   // ss
    ScalarInt,      // si
    WordOrMore,     // v
    Word,           // w
    WideOr128,      // x
    WideOr64,       // y
    WordOrDword,    // z
}

impl OperandType {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "a" => Some(Self::TwoWord),
            "b" => Some(Self::Byte),
            "c" => Some(Self::ByteOrWord),
            "d" => Some(Self::Doubleword),
            "dq" => Some(Self::DoubleQuad),
            "p" => Some(Self::Pointer),
            "pd" => Some(Self::PackedDouble),
            "pi" => Some(Self::PackedInt),
            "ps" => Some(Self::PackedSingle),
            "q" => Some(Self::Quadword),
            "qq" => Some(Self::QuadQuad),
            "s" => Some(Self::PseudoDesc),
            "sd" => Some(Self::ScalarDouble),
            "ss" => Some(Self::ScalarSingle),
            "si" => Some(Self::ScalarInt),
            "v" => Some(Self::WordOrMore),
            "w" => Some(Self::Word),
            "x" => Some(Self::WideOr128),
            "y" => Some(Self::WideOr64),
            "z" => Some(Self::WordOrDword),
            _ => None,
        }
    }
}

/// Parse a general-purpose register name, returning its width.
///
/// Covers the eight legacy families at every width plus the numbered
/// registers `r8`..`r15` with their `l`/`w`/`d` sub-width suffixes.
#[must_use]
pub fn parse_register(name: &str) -> Option<Width> {
    match name {
        "al" | "cl" | "dl" | "bl" | "ah" | "ch" | "dh" | "bh" => Some(Width::W8),
        "ax" | "cx" | "dx" | "bx" | "sp" | "bp" | "si" | "di" => Some(Width::W16),
        "eax" | "ecx" | "edx" | "ebx" | "esp" | "ebp" | "esi" | "edi" => Some(Width::W32),
        "rax" | "rcx" | "rdx" | "rbx" | "rsp" | "rbp" | "rsi" | "rdi" => Some(Width::W64),
        _ => parse_numbered_register(name),
    }
}

fn parse_numbered_register(name: &str) -> Option<Width> {
    let rest = name.strip_prefix('r')?;
    let (digits, width) = if let Some(d) = rest.strip_suffix('l') {
        (d, Width::W8)
    } else if let Some(d) = rest.strip_suffix('w') {
        (d, Width::W16)
    } else if let Some(d) = rest.strip_suffix('d') {
        (d, Width::W32)
    } else {
        (rest, Width::W64)
    };
    // Canonical spellings only: "r08" or "r+9" are not in the vocabulary.
    matches!(digits, "8" | "9" | "10" | "11" | "12" | "13" | "14" | "15").then_some(width)
}

/// Addressing-form operand check.
///
/// `$name` must be a known register. Anything else starts with an
/// addressing-method letter; a one-character value is complete only for the
/// memory-only method `M`, and a longer value's remainder must be a valid
/// size/type code. Method and type findings accumulate independently.
pub(crate) fn check(raw: &str) -> Vec<Violation> {
    if raw.is_empty() {
        return Vec::new();
    }

    if let Some(register) = raw.strip_prefix('$') {
        if parse_register(register).is_none() {
            return vec![Violation::new(format!(
                "Invalid register name '{register}'"
            ))];
        }
        return Vec::new();
    }

    let mut violations = Vec::new();
    let Some(method_code) = raw.chars().next() else {
        return violations;
    };
    let method = AddressingMethod::parse(method_code);
    if method.is_none() {
        violations.push(Violation::new(format!(
            "Invalid addressing method '{method_code}'"
        )));
    }

    let rest = &raw[method_code.len_utf8()..];
    if rest.is_empty() {
        if method != Some(AddressingMethod::MemOnly) {
            violations.push(Violation::new("Missing operand type"));
        }
        return violations;
    }

    if OperandType::parse(rest).is_none() {
        violations.push(Violation::new(format!("Invalid operand type '{rest}'")));
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_operand_is_unused() {
        assert!(check("").is_empty());
    }

    #[test]
    fn test_method_and_type_pairs() {
        assert!(check("Ev").is_empty());
        assert!(check("Gb").is_empty());
        assert!(check("Ib").is_empty());
        assert!(check("Wps").is_empty());
        assert!(check("%z").is_empty());
    }

    #[test]
    fn test_bare_memory_only_method() {
        assert!(check("M").is_empty());
    }

    #[test]
    fn test_bare_other_method_is_missing_type() {
        let violations = check("E");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Missing operand type");
    }

    #[test]
    fn test_method_and_type_findings_accumulate() {
        // Bad method, valid type: one finding.
        assert_eq!(check("Kb").len(), 1);
        // Bad method and bad type: both reported.
        assert_eq!(check("Kk").len(), 2);
        // Valid method, bad type: one finding.
        let violations = check("Ek");
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("operand type 'k'"));
    }

    #[test]
    fn test_register_operands() {
        assert!(check("$rax").is_empty());
        assert!(check("$ah").is_empty());
        assert!(check("$r11d").is_empty());
        assert!(check("$r15").is_empty());
    }

    #[test]
    fn test_bad_register_name() {
        let violations = check("$rip");
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("'rip'"));
    }

    #[test]
    fn test_register_vocabulary_edges() {
        assert_eq!(parse_register("r8l"), Some(Width::W8));
        assert_eq!(parse_register("r15w"), Some(Width::W16));
        assert_eq!(parse_register("r9d"), Some(Width::W32));
        assert_eq!(parse_register("r10"), Some(Width::W64));
        assert_eq!(parse_register("r7"), None);
        assert_eq!(parse_register("r16"), None);
        assert_eq!(parse_register("r8x"), None);
    }

    #[test]
    fn test_numbered_register_spellings_are_canonical() {
        assert_eq!(parse_register("r08"), None);
        assert_eq!(parse_register("r010"), None);
        assert_eq!(parse_register("r+9"), None);
        assert_eq!(check("$r08").len(), 1);
        assert_eq!(check("$r010").len(), 1);
        assert_eq!(check("$r+9d").len(), 1);
    }
}
