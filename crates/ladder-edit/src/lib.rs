//! `ladder-edit` - the live rung edit session.
//!
//! One rung at a time is open for editing. The [`EditMatrix`] keeps the
//! on-surface grid of instruction cells, their connecting rails, and
//! the selection consistent through every insert, delete, and shift;
//! the [`fields`] module validates operator-entered addresses per
//! instruction kind and commits them all-or-nothing.
//!
//! All operations are synchronous and complete within the caller's
//! event handler; boundary violations are silent no-ops (`false`
//! results), structural problems are explicit errors.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

/// Edit errors.
pub mod error;
/// Address field editing and validation.
pub mod fields;
/// The live edit matrix for one rung.
pub mod matrix;

pub use error::EditError;
pub use fields::{layout, validate_group, FieldOutcome, FieldSpec};
pub use matrix::{EditMatrix, InsertPos, CELL_TEMPLATE};
