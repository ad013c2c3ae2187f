//! Rung records and the per-subroutine store.

#![allow(missing_docs)]

use std::fmt;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::debug;

use crate::error::ModelError;
use crate::matrix::MatrixData;

/// Structural class of a rung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RungType {
    /// No output placed yet.
    Empty,
    /// Single-height outputs.
    Single,
    /// Double-height outputs.
    Double,
    /// Triple-height outputs.
    Triple,
    /// Instruction-list text only, no grid.
    Il,
}

impl RungType {
    pub fn parse(text: &str) -> Result<Self, ModelError> {
        match text.trim().to_ascii_lowercase().as_str() {
            "empty" => Ok(Self::Empty),
            "single" => Ok(Self::Single),
            "double" => Ok(Self::Double),
            "triple" => Ok(Self::Triple),
            "il" => Ok(Self::Il),
            _ => Err(ModelError::InvalidRungType(text.into())),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Single => "single",
            Self::Double => "double",
            Self::Triple => "triple",
            Self::Il => "il",
        }
    }
}

impl fmt::Display for RungType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<RungType> for SmolStr {
    fn from(value: RungType) -> Self {
        SmolStr::new_static(value.as_str())
    }
}

/// Stable rung identifier, assigned monotonically and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RungRef(pub u32);

impl fmt::Display for RungRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One rung of ladder logic.
#[derive(Debug, Clone, PartialEq)]
pub struct Rung {
    pub reference: RungRef,
    pub rungtype: RungType,
    pub comment: String,
    pub ildata: Vec<String>,
    pub matrixdata: MatrixData,
}

impl Rung {
    fn empty(reference: RungRef) -> Self {
        Self {
            reference,
            rungtype: RungType::Empty,
            comment: String::new(),
            ildata: Vec::new(),
            matrixdata: MatrixData::new(),
        }
    }
}

/// Ordered rung collection for one subroutine.
///
/// Rungs are addressed by [`RungRef`], which survives reordering; the
/// position index is rebuilt immediately after every structural change,
/// never lazily.
#[derive(Debug, Clone, Default)]
pub struct RungStore {
    rungs: Vec<Rung>,
    index: FxHashMap<RungRef, usize>,
    next_ref: u32,
}

impl RungStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty rung and return its new reference.
    pub fn append_empty_rung(&mut self) -> RungRef {
        let reference = self.alloc_ref();
        self.rungs.push(Rung::empty(reference));
        self.rebuild_ref_index();
        debug!(reference = reference.0, "appended empty rung");
        reference
    }

    /// Splice an empty rung immediately before `before` and return the
    /// new reference.
    pub fn insert_empty_rung_before(&mut self, before: RungRef) -> Result<RungRef, ModelError> {
        let position = self.position(before)?;
        let reference = self.alloc_ref();
        self.rungs.insert(position, Rung::empty(reference));
        self.rebuild_ref_index();
        debug!(
            reference = reference.0,
            before = before.0,
            "inserted empty rung"
        );
        Ok(reference)
    }

    /// Remove the rung at `reference`.
    pub fn delete_rung(&mut self, reference: RungRef) -> Result<(), ModelError> {
        let position = self.position(reference)?;
        self.rungs.remove(position);
        self.rebuild_ref_index();
        debug!(reference = reference.0, "deleted rung");
        Ok(())
    }

    pub fn rung(&self, reference: RungRef) -> Result<&Rung, ModelError> {
        let position = self.position(reference)?;
        Ok(&self.rungs[position])
    }

    pub fn rung_mut(&mut self, reference: RungRef) -> Result<&mut Rung, ModelError> {
        let position = self.position(reference)?;
        Ok(&mut self.rungs[position])
    }

    pub fn set_rung_matrix(
        &mut self,
        reference: RungRef,
        matrix: MatrixData,
    ) -> Result<(), ModelError> {
        self.rung_mut(reference)?.matrixdata = matrix;
        Ok(())
    }

    pub fn set_rung_il(
        &mut self,
        reference: RungRef,
        ildata: Vec<String>,
    ) -> Result<(), ModelError> {
        self.rung_mut(reference)?.ildata = ildata;
        Ok(())
    }

    pub fn set_rung_comment(
        &mut self,
        reference: RungRef,
        comment: impl Into<String>,
    ) -> Result<(), ModelError> {
        self.rung_mut(reference)?.comment = comment.into();
        Ok(())
    }

    pub fn set_rung_type(
        &mut self,
        reference: RungRef,
        rungtype: RungType,
    ) -> Result<(), ModelError> {
        self.rung_mut(reference)?.rungtype = rungtype;
        Ok(())
    }

    pub fn rung_type(&self, reference: RungRef) -> Result<RungType, ModelError> {
        Ok(self.rung(reference)?.rungtype)
    }

    /// All references in display order.
    #[must_use]
    pub fn rung_refs(&self) -> Vec<RungRef> {
        self.rungs.iter().map(|rung| rung.reference).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rung> {
        self.rungs.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rungs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rungs.is_empty()
    }

    fn alloc_ref(&mut self) -> RungRef {
        let reference = RungRef(self.next_ref);
        self.next_ref += 1;
        reference
    }

    fn position(&self, reference: RungRef) -> Result<usize, ModelError> {
        self.index
            .get(&reference)
            .copied()
            .ok_or(ModelError::UnknownRung(reference))
    }

    fn rebuild_ref_index(&mut self) {
        self.index.clear();
        for (position, rung) in self.rungs.iter().enumerate() {
            self.index.insert(rung.reference, position);
        }
    }
}
