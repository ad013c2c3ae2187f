//! Edit errors.

use ladder_model::CellId;
use smol_str::SmolStr;
use thiserror::Error;

/// Errors from the live edit session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// Cell id outside the active matrix limits.
    #[error("unknown cell '{0}'")]
    UnknownCell(CellId),

    /// Stored value names an instruction the catalog does not know.
    #[error("unknown instruction '{0}'")]
    UnknownInstruction(SmolStr),

    /// Required element or template is not present on the surface.
    #[error("missing surface node '{0}'")]
    MissingNode(SmolStr),

    /// IL rungs carry text, not a grid; they cannot open an edit
    /// matrix.
    #[error("il rungs have no edit grid")]
    IlRung,
}
