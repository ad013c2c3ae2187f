//! View errors.

use smol_str::SmolStr;
use thiserror::Error;

/// Errors from rendering and display configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// Required element is not present on the surface.
    #[error("missing surface node '{0}'")]
    MissingNode(SmolStr),

    /// Symbol template is not present on the surface.
    #[error("missing symbol template '{0}'")]
    MissingTemplate(SmolStr),

    /// Stored cell names an instruction the catalog does not know.
    #[error("unknown instruction '{0}'")]
    UnknownInstruction(SmolStr),

    /// Display configuration rejected.
    #[error("invalid display config: {0}")]
    InvalidConfig(SmolStr),
}
