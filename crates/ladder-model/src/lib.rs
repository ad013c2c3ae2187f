//! `ladder-model` - rung data model and wire format for ladder logic editing.
//!
//! This crate owns the data layer of the ladder editor:
//!
//! - **Catalog**: the static instruction table (codes, symbols, default
//!   addresses, address-edit variants)
//! - **Address grammar**: operand validation against the register-naming
//!   grammar
//! - **Store**: per-subroutine rung records addressable by stable
//!   reference numbers
//! - **Matrix**: cell identity, sparse matrix content, and per-rungtype
//!   structural limits
//! - **Wire**: import/export transcoding to the server interchange format
//!
//! Everything here is synchronous and free of rendering concerns; the
//! edit session and the display surface live in the sibling crates.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

/// Register-naming grammar for operand validation.
pub mod address;
/// Static instruction catalog.
pub mod catalog;
/// Model errors.
pub mod error;
/// Cell identity, matrix data, and structural limits.
pub mod matrix;
/// Rung records and the per-subroutine store.
pub mod store;
/// Subroutine wire format and transcoding.
pub mod wire;

pub use address::{monitor_addrs, AddressKind};
pub use catalog::{lookup, AddrEdit, InstrClass, Instruction};
pub use error::ModelError;
pub use matrix::{occupied_extent, CellData, CellId, MatrixData, MatrixLimits, MAX_INDEX};
pub use store::{Rung, RungRef, RungStore, RungType};
pub use wire::{CellRecord, RungRecord, Subroutine, SubroutineRecord};
