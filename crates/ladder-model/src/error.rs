//! Model errors.

use smol_str::SmolStr;
use thiserror::Error;

use crate::store::RungRef;

/// Errors from the rung data model and wire transcoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Reference not present in the store.
    #[error("unknown rung reference {0}")]
    UnknownRung(RungRef),

    /// Instruction code not present in the catalog.
    #[error("unknown instruction '{0}'")]
    UnknownInstruction(SmolStr),

    /// Rung type string not recognized.
    #[error("invalid rung type '{0}'")]
    InvalidRungType(SmolStr),

    /// Cell lies outside the fixed grid.
    #[error("cell row {row} col {col} out of bounds")]
    CellOutOfBounds {
        /// Offending row.
        row: u32,
        /// Offending column (0 for outputs).
        col: u32,
    },

    /// Malformed wire-format cell record.
    #[error("invalid cell record '{0}'")]
    InvalidCellRecord(SmolStr),
}
