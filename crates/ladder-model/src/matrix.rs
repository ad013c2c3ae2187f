//! Cell identity, matrix data, and per-rungtype structural limits.

use std::fmt;

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::store::RungType;

/// Highest input row/col and output row index the grid can hold.
pub const MAX_INDEX: u8 = 7;

/// Identity of one instruction slot in a rung matrix.
///
/// Rows and columns are always in `0..=MAX_INDEX`; outputs occupy a
/// single column, so only their row is significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CellId {
    /// Input cell at (row, col).
    Input {
        /// Grid row.
        row: u8,
        /// Grid column.
        col: u8,
    },
    /// Output cell at row.
    Output {
        /// Grid row.
        row: u8,
    },
}

impl CellId {
    /// True for input cells.
    #[must_use]
    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input { .. })
    }

    /// Grid row of the cell.
    #[must_use]
    pub fn row(&self) -> u8 {
        match self {
            Self::Input { row, .. } | Self::Output { row } => *row,
        }
    }

    /// True when the cell lies inside the given limits.
    #[must_use]
    pub fn in_bounds(&self, limits: &MatrixLimits) -> bool {
        match self {
            Self::Input { row, col } => {
                *row <= limits.max_input_row && *col <= limits.max_input_col
            }
            Self::Output { row } => *row <= limits.max_output_row,
        }
    }

    /// Element id used for this cell on the rendering surface.
    #[must_use]
    pub fn surface_id(&self) -> SmolStr {
        match self {
            Self::Input { row, col } => format!("inputedit{row}{col}").into(),
            Self::Output { row } => format!("outputedit{row}").into(),
        }
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.surface_id())
    }
}

/// Instruction content of one cell.
///
/// An empty cell holds the value `"none"` and exactly one empty address
/// string; both sides of that invariant are maintained by [`clear`].
///
/// [`clear`]: CellData::clear
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellData {
    /// Instruction code, `"none"` when the cell is empty.
    pub value: SmolStr,
    /// Ordered operand addresses; arity depends on the instruction kind.
    pub addr: Vec<SmolStr>,
}

impl CellData {
    /// Value marking an empty cell.
    pub const EMPTY_VALUE: &'static str = "none";

    /// A fresh empty cell.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            value: SmolStr::new(Self::EMPTY_VALUE),
            addr: vec![SmolStr::default()],
        }
    }

    /// A cell holding `value` with the given addresses.
    #[must_use]
    pub fn new(value: impl Into<SmolStr>, addr: Vec<SmolStr>) -> Self {
        Self {
            value: value.into(),
            addr,
        }
    }

    /// True when the cell holds no instruction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value == Self::EMPTY_VALUE
    }

    /// Reset the cell to the empty state.
    pub fn clear(&mut self) {
        *self = Self::empty();
    }
}

impl Default for CellData {
    fn default() -> Self {
        Self::empty()
    }
}

/// Sparse matrix content: only occupied cells are stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatrixData {
    cells: IndexMap<CellId, CellData>,
}

impl MatrixData {
    /// An empty matrix.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `data` under `id`; empty data removes the entry instead.
    pub fn set(&mut self, id: CellId, data: CellData) {
        if data.is_empty() {
            self.cells.shift_remove(&id);
        } else {
            self.cells.insert(id, data);
        }
    }

    /// The cell stored under `id`, if occupied.
    #[must_use]
    pub fn get(&self, id: CellId) -> Option<&CellData> {
        self.cells.get(&id)
    }

    /// True when `id` holds an instruction.
    #[must_use]
    pub fn contains(&self, id: CellId) -> bool {
        self.cells.contains_key(&id)
    }

    /// Occupied cells in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (CellId, &CellData)> {
        self.cells.iter().map(|(id, data)| (*id, data))
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when no cell is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Occupied extent of one input row: 1 + the last occupied column,
    /// 0 for an all-empty row.
    #[must_use]
    pub fn input_extent(&self, row: u8, limits: &MatrixLimits) -> usize {
        occupied_extent(
            (0..=limits.max_input_col).map(|col| self.contains(CellId::Input { row, col })),
        )
    }

    /// Occupied extent of the output column: 1 + the last occupied row,
    /// 0 for an all-empty column.
    #[must_use]
    pub fn output_extent(&self, limits: &MatrixLimits) -> usize {
        occupied_extent((0..=limits.max_output_row).map(|row| self.contains(CellId::Output { row })))
    }
}

/// Structural limits of the edit grid for one rungtype.
///
/// Exactly one limit set is active per edit session; switching rungtype
/// swaps the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixLimits {
    /// Highest usable input row.
    pub max_input_row: u8,
    /// Highest usable input column.
    pub max_input_col: u8,
    /// Highest usable output row.
    pub max_output_row: u8,
}

impl MatrixLimits {
    /// Limits for a rung of the given type. Double- and triple-height
    /// outputs shrink the usable output rows; IL rungs have no grid.
    #[must_use]
    pub fn for_rung_type(rung_type: RungType) -> Self {
        match rung_type {
            RungType::Empty | RungType::Single => Self {
                max_input_row: MAX_INDEX,
                max_input_col: MAX_INDEX,
                max_output_row: MAX_INDEX,
            },
            RungType::Double => Self {
                max_input_row: MAX_INDEX,
                max_input_col: MAX_INDEX,
                max_output_row: 3,
            },
            RungType::Triple => Self {
                max_input_row: MAX_INDEX,
                max_input_col: MAX_INDEX,
                max_output_row: 1,
            },
            RungType::Il => Self {
                max_input_row: 0,
                max_input_col: 0,
                max_output_row: 0,
            },
        }
    }
}

/// 1 + index of the last occupied slot, scanning from the far boundary
/// inward; 0 when every slot is empty.
///
/// Shared by the live edit matrix and the static renderer so both
/// compute identical rail extents.
pub fn occupied_extent<I>(slots: I) -> usize
where
    I: IntoIterator<Item = bool>,
    I::IntoIter: DoubleEndedIterator + ExactSizeIterator,
{
    let iter = slots.into_iter();
    let len = iter.len();
    for (offset, occupied) in iter.rev().enumerate() {
        if occupied {
            return len - offset;
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_scans_from_far_boundary() {
        assert_eq!(occupied_extent([false, true, false, false]), 2);
        assert_eq!(occupied_extent([false, false, false]), 0);
        assert_eq!(occupied_extent([true, true, true]), 3);
    }

    #[test]
    fn empty_cell_invariant() {
        let cell = CellData::empty();
        assert!(cell.is_empty());
        assert_eq!(cell.addr, vec![SmolStr::default()]);

        let mut cell = CellData::new("noc", vec!["X1".into()]);
        assert!(!cell.is_empty());
        cell.clear();
        assert_eq!(cell, CellData::empty());
    }
}
