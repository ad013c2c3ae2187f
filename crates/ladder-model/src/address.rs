//! Register-naming grammar for operand validation.
//!
//! The patterns are carried over verbatim from the HMI's address grammar
//! and must stay compatible with it; all matching is anchored and
//! expects uppercase input (the field editor uppercases before
//! validating).

use once_cell::sync::Lazy;
use regex::Regex;
use smol_str::SmolStr;

static CONTACT: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^[XYCT][0-9]+$|^CT[0-9]+$|^SC[0-9]+$").expect("contact pattern")
});
static COIL: Lazy<Regex> = Lazy::new(|| Regex::new("^Y[0-9]+$|^C[0-9]+$").expect("coil pattern"));
static TIMER: Lazy<Regex> = Lazy::new(|| Regex::new("^T[0-9]+$").expect("timer pattern"));
static COUNTER: Lazy<Regex> = Lazy::new(|| Regex::new("^CT[0-9]+$").expect("counter pattern"));
static NUMERIC_REGISTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^D[SDFH][0-9]+$|^[TS]D[0-9]+$|^CTD[0-9]+$|^[XY]S[0-9]+$|^[XY]D[0-9]+$")
        .expect("numeric register pattern")
});
static NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^[-+]?[0-9]+$|^[-+]?[0-9]+[.]?[0-9]+$|^[0-9A-F]+H$").expect("number pattern")
});
static TEXT_REGISTER: Lazy<Regex> =
    Lazy::new(|| Regex::new("^TXT[0-9]+$").expect("text register pattern"));
static TEXT_CONSTANT: Lazy<Regex> =
    Lazy::new(|| Regex::new("^\"[^\"]+\"$").expect("text constant pattern"));
static POINTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^D[SDFH]\[DS[0-9]+\]$").expect("pointer pattern"));
static SUBROUTINE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[A-Z][A-Z0-9_]{0,23}$").expect("subroutine name pattern"));
static MATH_EXPRESSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Z \[\]().+*/-]+$").expect("math expression pattern"));

/// Operand classes accepted by the address-edit forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKind {
    /// Boolean contact operand (X/Y/C/T/CT/SC).
    Contact,
    /// Coil operand (Y/C).
    Coil,
    /// Timer address (T).
    Timer,
    /// Counter address (CT).
    Counter,
    /// Word register (DS/DD/DF/DH/TD/SD/CTD/XS/YS/XD/YD).
    NumericRegister,
    /// Signed decimal, decimal fraction, or `H`-suffixed hex constant.
    Number,
    /// Text register (TXT).
    TextRegister,
    /// Double-quoted text constant.
    TextConstant,
    /// Register pointer (`DS[DSn]` style indirection).
    Pointer,
    /// CALL target name.
    SubroutineName,
    /// Free-form equation over registers, constants, and operators.
    MathExpression,
}

impl AddressKind {
    /// True when `text` belongs to this operand class. Matching is
    /// anchored and case-sensitive; callers uppercase first.
    #[must_use]
    pub fn matches(self, text: &str) -> bool {
        self.regex().is_match(text)
    }

    fn regex(self) -> &'static Regex {
        match self {
            Self::Contact => &CONTACT,
            Self::Coil => &COIL,
            Self::Timer => &TIMER,
            Self::Counter => &COUNTER,
            Self::NumericRegister => &NUMERIC_REGISTER,
            Self::Number => &NUMBER,
            Self::TextRegister => &TEXT_REGISTER,
            Self::TextConstant => &TEXT_CONSTANT,
            Self::Pointer => &POINTER,
            Self::SubroutineName => &SUBROUTINE_NAME,
            Self::MathExpression => &MATH_EXPRESSION,
        }
    }
}

/// True when `text` names live machine state the HMI can monitor.
///
/// Constants (numbers, quoted text, expressions) are not monitorable.
#[must_use]
pub fn is_monitorable(text: &str) -> bool {
    const MONITORABLE: [AddressKind; 7] = [
        AddressKind::Contact,
        AddressKind::Coil,
        AddressKind::Timer,
        AddressKind::Counter,
        AddressKind::NumericRegister,
        AddressKind::TextRegister,
        AddressKind::Pointer,
    ];
    MONITORABLE.iter().any(|kind| kind.matches(text))
}

/// The subset of an address list the HMI should monitor, `["none"]`
/// when nothing qualifies.
#[must_use]
pub fn monitor_addrs(addr: &[SmolStr]) -> Vec<SmolStr> {
    let monitored: Vec<SmolStr> = addr
        .iter()
        .filter(|entry| is_monitorable(entry))
        .cloned()
        .collect();
    if monitored.is_empty() {
        vec![SmolStr::new_static("none")]
    } else {
        monitored
    }
}
