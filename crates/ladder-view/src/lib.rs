//! `ladder-view` - rendering surface facade and static rung display.
//!
//! The editor core never talks to a concrete UI toolkit. Everything it
//! draws goes through the [`Surface`] trait (element lookup, attribute
//! mutation, child-list mutation, node cloning); hosts adapt it to
//! whatever document model they render with. [`SceneGraph`] is the
//! built-in retained-mode implementation used by tests and headless
//! rendering.
//!
//! [`render_rung`] reconstructs a rung for monitoring or read-only
//! display from stored matrix data alone, with no edit session.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

/// Display geometry and theme configuration.
pub mod config;
/// View errors.
pub mod error;
/// Static rung rendering for monitor mode.
pub mod render;
/// Abstract document surface and the retained scene graph.
pub mod surface;

pub use config::{DisplayConfig, Geometry, Theme};
pub use error::ViewError;
pub use render::{
    address_text, cell_position, output_height, render_rung, HRAIL_TEMPLATE, ILTEXT_TEMPLATE,
    VRAIL_TEMPLATE,
};
pub use surface::{NodeId, SceneGraph, Surface};
