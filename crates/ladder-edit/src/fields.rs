//! Address field editing and validation.
//!
//! Each address-edit variant has a fixed field layout; a group of
//! operator-entered values either validates as a whole or leaves the
//! stored addresses untouched. Per-field pass/fail travels back to the
//! caller so the form can color each field.

use ladder_model::AddressKind as K;
use ladder_model::{AddrEdit, AddressKind};
use smol_str::SmolStr;

/// One form field: display label plus the operand classes it accepts.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Label shown beside the field.
    pub label: &'static str,
    /// Operand classes accepted; a field passes when any class matches.
    pub accepts: &'static [AddressKind],
}

const fn field(label: &'static str, accepts: &'static [AddressKind]) -> FieldSpec {
    FieldSpec { label, accepts }
}

const PARAM: &[K] = &[K::NumericRegister, K::Number];
const SOURCE: &[K] = &[
    K::NumericRegister,
    K::Number,
    K::TextRegister,
    K::TextConstant,
    K::Pointer,
];
const DEST: &[K] = &[K::NumericRegister, K::TextRegister, K::Pointer];

const CONTACT: &[FieldSpec] = &[field("address", &[K::Contact])];
const COMPARE_CONTACT: &[FieldSpec] = &[field("param a", PARAM), field("param b", PARAM)];
const COIL: &[FieldSpec] = &[field("address", &[K::Coil])];
const DUAL_COIL: &[FieldSpec] = &[field("start", &[K::Coil]), field("end", &[K::Coil])];
const CALL: &[FieldSpec] = &[field("subroutine", &[K::SubroutineName])];
const FOR_LOOP: &[FieldSpec] = &[field("count", PARAM)];
const COUNTER: &[FieldSpec] = &[field("counter", &[K::Counter]), field("preset", PARAM)];
const TIMER: &[FieldSpec] = &[field("timer", &[K::Timer]), field("preset", PARAM)];
const COPY: &[FieldSpec] = &[field("source", SOURCE), field("destination", DEST)];
const BLOCK_COPY: &[FieldSpec] = &[
    field("source start", &[K::NumericRegister]),
    field("source end", &[K::NumericRegister]),
    field("destination", &[K::NumericRegister, K::Pointer]),
];
const FILL: &[FieldSpec] = &[
    field("value", PARAM),
    field("start", &[K::NumericRegister]),
    field("end", &[K::NumericRegister]),
];
const PACK: &[FieldSpec] = &[
    field("start", &[K::Contact]),
    field("end", &[K::Contact]),
    field("destination", &[K::NumericRegister]),
];
const UNPACK: &[FieldSpec] = &[
    field("source", &[K::NumericRegister]),
    field("start", &[K::Coil]),
    field("end", &[K::Coil]),
];
const FIND: &[FieldSpec] = &[
    field("value", PARAM),
    field("start", &[K::NumericRegister]),
    field("end", &[K::NumericRegister]),
    field("result", &[K::NumericRegister]),
];
const MATH: &[FieldSpec] = &[
    field("destination", &[K::NumericRegister]),
    field("equation", &[K::MathExpression]),
];
const SUM: &[FieldSpec] = &[
    field("start", &[K::NumericRegister]),
    field("end", &[K::NumericRegister]),
    field("destination", &[K::NumericRegister]),
];
const SHIFT_REGISTER: &[FieldSpec] = &[field("start", &[K::Coil]), field("end", &[K::Coil])];

/// Field layout for an address-edit variant.
#[must_use]
pub fn layout(edit: AddrEdit) -> &'static [FieldSpec] {
    match edit {
        AddrEdit::None => &[],
        AddrEdit::Contact => CONTACT,
        AddrEdit::CompareContact => COMPARE_CONTACT,
        AddrEdit::Coil => COIL,
        AddrEdit::DualCoil => DUAL_COIL,
        AddrEdit::Call => CALL,
        AddrEdit::ForLoop => FOR_LOOP,
        AddrEdit::Counter => COUNTER,
        AddrEdit::Timer => TIMER,
        AddrEdit::Copy => COPY,
        AddrEdit::BlockCopy => BLOCK_COPY,
        AddrEdit::Fill => FILL,
        AddrEdit::Pack => PACK,
        AddrEdit::Unpack => UNPACK,
        AddrEdit::Find => FIND,
        AddrEdit::MathDecimal | AddrEdit::MathHex => MATH,
        AddrEdit::Sum => SUM,
        AddrEdit::ShiftRegister => SHIFT_REGISTER,
    }
}

/// Result of validating one address form group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOutcome {
    /// True when every field passed.
    pub accepted: bool,
    /// Per-field pass/fail, in layout order.
    pub field_ok: Vec<bool>,
    /// Normalized values, present only when accepted.
    pub values: Option<Vec<SmolStr>>,
}

impl FieldOutcome {
    /// A rejection carrying no per-field detail.
    #[must_use]
    pub fn rejected() -> Self {
        Self {
            accepted: false,
            field_ok: Vec::new(),
            values: None,
        }
    }
}

/// Uppercase an entry for matching; quoted text constants keep their
/// content untouched.
#[must_use]
pub fn normalize(text: &str) -> SmolStr {
    let trimmed = text.trim();
    if trimmed.starts_with('"') {
        SmolStr::new(trimmed)
    } else {
        SmolStr::new(trimmed.to_ascii_uppercase())
    }
}

/// Validate `inputs` against the layout of `edit`.
///
/// All-or-nothing: one failing field rejects the whole group, and the
/// caller must not touch the stored addresses. An arity mismatch
/// rejects every field.
#[must_use]
pub fn validate_group(edit: AddrEdit, inputs: &[&str]) -> FieldOutcome {
    let layout = layout(edit);
    if inputs.len() != layout.len() {
        return FieldOutcome {
            accepted: false,
            field_ok: vec![false; layout.len()],
            values: None,
        };
    }

    let mut field_ok = Vec::with_capacity(layout.len());
    let mut values = Vec::with_capacity(layout.len());
    for (spec, input) in layout.iter().zip(inputs) {
        let value = normalize(input);
        field_ok.push(spec.accepts.iter().any(|kind| kind.matches(&value)));
        values.push(value);
    }

    let accepted = field_ok.iter().all(|ok| *ok);
    FieldOutcome {
        accepted,
        field_ok,
        values: accepted.then_some(values),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coil_entry_is_uppercased() {
        let outcome = validate_group(AddrEdit::Coil, &["c12"]);
        assert!(outcome.accepted);
        assert_eq!(outcome.values, Some(vec![SmolStr::new("C12")]));

        let outcome = validate_group(AddrEdit::Coil, &["12C"]);
        assert!(!outcome.accepted);
        assert_eq!(outcome.field_ok, vec![false]);
        assert_eq!(outcome.values, None);
    }

    #[test]
    fn one_bad_field_rejects_the_group() {
        let outcome = validate_group(AddrEdit::Timer, &["t3", "bogus"]);
        assert!(!outcome.accepted);
        assert_eq!(outcome.field_ok, vec![true, false]);
        assert_eq!(outcome.values, None);
    }

    #[test]
    fn text_constants_keep_their_case() {
        let outcome = validate_group(AddrEdit::Copy, &["\"hello\"", "txt4"]);
        assert!(outcome.accepted);
        assert_eq!(
            outcome.values,
            Some(vec![SmolStr::new("\"hello\""), SmolStr::new("TXT4")])
        );
    }
}
