//! Static instruction catalog.

#![allow(missing_docs)]

use smol_str::SmolStr;

use crate::store::RungType;

/// Which rung shapes an instruction may occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstrClass {
    /// Input instruction, hosted by any graphical rung.
    Input,
    /// Single-height output.
    Single,
    /// Double-height output.
    Double,
    /// Triple-height output.
    Triple,
}

impl InstrClass {
    /// The rung type a first-placed output of this class fixes on the
    /// rung; `None` for inputs.
    #[must_use]
    pub fn rung_type(self) -> Option<RungType> {
        match self {
            Self::Input => None,
            Self::Single => Some(RungType::Single),
            Self::Double => Some(RungType::Double),
            Self::Triple => Some(RungType::Triple),
        }
    }
}

/// Address-edit form variant an instruction requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddrEdit {
    None,
    Contact,
    CompareContact,
    Coil,
    DualCoil,
    Call,
    ForLoop,
    Counter,
    Timer,
    Copy,
    BlockCopy,
    Fill,
    Pack,
    Unpack,
    Find,
    MathDecimal,
    MathHex,
    Sum,
    ShiftRegister,
}

/// One catalog entry. `symbol` names the glyph template cloned on the
/// rendering surface; `defaultaddr` seeds a newly placed instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub code: &'static str,
    pub symbol: &'static str,
    pub class: InstrClass,
    pub addredit: AddrEdit,
    pub defaultaddr: &'static [&'static str],
}

impl Instruction {
    #[must_use]
    pub fn is_input(&self) -> bool {
        self.class == InstrClass::Input
    }

    #[must_use]
    pub fn is_output(&self) -> bool {
        !self.is_input()
    }

    /// Default address list for a freshly placed instance.
    #[must_use]
    pub fn default_addr(&self) -> Vec<SmolStr> {
        self.defaultaddr
            .iter()
            .map(|entry| SmolStr::new_static(entry))
            .collect()
    }
}

/// The full instruction table. Static and immutable for the process
/// lifetime.
pub const CATALOG: &[Instruction] = &[
    // Contacts
    instr("noc", "sym_noc", InstrClass::Input, AddrEdit::Contact, &["X1"]),
    instr("ncc", "sym_ncc", InstrClass::Input, AddrEdit::Contact, &["X1"]),
    instr("nocp", "sym_nocp", InstrClass::Input, AddrEdit::Contact, &["X1"]),
    instr("nccn", "sym_nccn", InstrClass::Input, AddrEdit::Contact, &["X1"]),
    // Compare contacts
    instr("cmpeq", "sym_cmpeq", InstrClass::Input, AddrEdit::CompareContact, &["DS1", "DS2"]),
    instr("cmpneq", "sym_cmpneq", InstrClass::Input, AddrEdit::CompareContact, &["DS1", "DS2"]),
    instr("cmpgt", "sym_cmpgt", InstrClass::Input, AddrEdit::CompareContact, &["DS1", "DS2"]),
    instr("cmpge", "sym_cmpge", InstrClass::Input, AddrEdit::CompareContact, &["DS1", "DS2"]),
    instr("cmplt", "sym_cmplt", InstrClass::Input, AddrEdit::CompareContact, &["DS1", "DS2"]),
    instr("cmple", "sym_cmple", InstrClass::Input, AddrEdit::CompareContact, &["DS1", "DS2"]),
    // Coils
    instr("out", "sym_out", InstrClass::Single, AddrEdit::Coil, &["Y1"]),
    instr("set", "sym_set", InstrClass::Single, AddrEdit::DualCoil, &["Y1", "Y2"]),
    instr("rst", "sym_rst", InstrClass::Single, AddrEdit::DualCoil, &["Y1", "Y2"]),
    instr("pd", "sym_pd", InstrClass::Single, AddrEdit::Coil, &["C1"]),
    // Timers
    instr("tmr", "sym_tmr", InstrClass::Single, AddrEdit::Timer, &["T1", "10"]),
    instr("tmra", "sym_tmra", InstrClass::Single, AddrEdit::Timer, &["T1", "10"]),
    // Counters
    instr("cntu", "sym_cntu", InstrClass::Double, AddrEdit::Counter, &["CT1", "10"]),
    instr("cntd", "sym_cntd", InstrClass::Double, AddrEdit::Counter, &["CT1", "10"]),
    instr("udc", "sym_udc", InstrClass::Triple, AddrEdit::Counter, &["CT1", "10"]),
    // Shift register
    instr("shfrg", "sym_shfrg", InstrClass::Triple, AddrEdit::ShiftRegister, &["C1", "C8"]),
    // Program control
    instr("call", "sym_call", InstrClass::Single, AddrEdit::Call, &["SUB1"]),
    instr("for", "sym_for", InstrClass::Single, AddrEdit::ForLoop, &["10"]),
    instr("next", "sym_next", InstrClass::Single, AddrEdit::None, &[]),
    instr("end", "sym_end", InstrClass::Single, AddrEdit::None, &[]),
    instr("rt", "sym_rt", InstrClass::Single, AddrEdit::None, &[]),
    // Data movement
    instr("copy", "sym_copy", InstrClass::Single, AddrEdit::Copy, &["DS1", "DS2"]),
    instr("cpyblk", "sym_cpyblk", InstrClass::Single, AddrEdit::BlockCopy, &["DS1", "DS2", "DD1"]),
    instr("fill", "sym_fill", InstrClass::Single, AddrEdit::Fill, &["0", "DS1", "DS2"]),
    instr("pack", "sym_pack", InstrClass::Single, AddrEdit::Pack, &["C1", "C16", "DS1"]),
    instr("unpack", "sym_unpack", InstrClass::Single, AddrEdit::Unpack, &["DS1", "C1", "C16"]),
    instr("find", "sym_find", InstrClass::Single, AddrEdit::Find, &["0", "DS1", "DS10", "DD1"]),
    // Math
    instr("mathdec", "sym_mathdec", InstrClass::Single, AddrEdit::MathDecimal, &["DS1", "DS1 + DS2"]),
    instr("mathhex", "sym_mathhex", InstrClass::Single, AddrEdit::MathHex, &["DH1", "DH1 + DH2"]),
    instr("sum", "sym_sum", InstrClass::Single, AddrEdit::Sum, &["DS1", "DS10", "DD1"]),
];

const fn instr(
    code: &'static str,
    symbol: &'static str,
    class: InstrClass,
    addredit: AddrEdit,
    defaultaddr: &'static [&'static str],
) -> Instruction {
    Instruction {
        code,
        symbol,
        class,
        addredit,
        defaultaddr,
    }
}

/// Find an instruction by code, case-insensitive. `"none"` denotes the
/// empty cell and is not a catalog entry.
#[must_use]
pub fn lookup(code: &str) -> Option<&'static Instruction> {
    CATALOG
        .iter()
        .find(|instruction| instruction.code.eq_ignore_ascii_case(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup("TMR").map(|i| i.code), Some("tmr"));
        assert!(lookup("none").is_none());
        assert!(lookup("bogus").is_none());
    }

    #[test]
    fn output_classes_fix_rung_types() {
        assert_eq!(lookup("tmr").map(|i| i.class.rung_type()), Some(Some(RungType::Single)));
        assert_eq!(lookup("cntu").map(|i| i.class.rung_type()), Some(Some(RungType::Double)));
        assert_eq!(lookup("udc").map(|i| i.class.rung_type()), Some(Some(RungType::Triple)));
        assert_eq!(lookup("noc").map(|i| i.class.rung_type()), Some(None));
    }
}
