//! Display geometry and theme configuration.
//!
//! Hosts theme the editor with a small TOML file; every key has a
//! default, so an empty string (or no file at all) yields the stock
//! appearance. Unknown keys are rejected rather than ignored.

use serde::Deserialize;
use smol_str::SmolStr;

use crate::error::ViewError;

/// Pixel geometry of the rung display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Geometry {
    /// Horizontal pitch between input cells.
    pub input_pitch_x: u32,
    /// Vertical pitch between input rows.
    pub input_pitch_y: u32,
    /// X position of the output column.
    pub output_x: u32,
    /// Vertical pitch of one single-height output row.
    pub output_pitch_y: u32,
    /// Vertical pitch between IL text lines.
    pub il_pitch_y: u32,
    /// Rail length drawn for an all-empty row or column.
    pub min_rail_len: u32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            input_pitch_x: 100,
            input_pitch_y: 80,
            output_x: 900,
            output_pitch_y: 80,
            il_pitch_y: 24,
            min_rail_len: 20,
        }
    }
}

impl Geometry {
    /// Pixel length of a horizontal rail covering `extent` occupied
    /// input cells. The rail runs from the left power rail to the right
    /// edge of the last occupied cell, never into unoccupied space
    /// beyond it.
    #[must_use]
    pub fn h_rail_len(&self, extent: usize) -> u32 {
        if extent == 0 {
            self.min_rail_len
        } else {
            extent_len(extent, self.input_pitch_x, self.min_rail_len)
        }
    }

    /// Pixel length of the vertical output rail covering `extent`
    /// occupied output rows of the given height.
    #[must_use]
    pub fn v_rail_len(&self, extent: usize, height: u32) -> u32 {
        if extent == 0 {
            self.min_rail_len
        } else {
            extent_len(extent, self.output_pitch_y * height, self.min_rail_len)
        }
    }
}

fn extent_len(extent: usize, pitch: u32, fallback: u32) -> u32 {
    u32::try_from(extent)
        .ok()
        .and_then(|extent| extent.checked_mul(pitch))
        .unwrap_or(fallback)
}

/// Colors for cell and field states.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Theme {
    /// Stroke of an unselected cell.
    pub cell_stroke: String,
    /// Stroke of the selected cell.
    pub select_stroke: String,
    /// Background of a field that passed validation.
    pub field_valid: String,
    /// Background of a field that failed validation.
    pub field_invalid: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            cell_stroke: "black".to_owned(),
            select_stroke: "blue".to_owned(),
            field_valid: "white".to_owned(),
            field_invalid: "orange".to_owned(),
        }
    }
}

/// Complete display configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Pixel geometry.
    pub geometry: Geometry,
    /// Color theme.
    pub theme: Theme,
}

impl DisplayConfig {
    /// Parse a configuration document; absent keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ViewError> {
        toml::from_str(text).map_err(|err| ViewError::InvalidConfig(SmolStr::new(err.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_the_default() {
        let config = DisplayConfig::from_toml_str("").unwrap();
        assert_eq!(config, DisplayConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(DisplayConfig::from_toml_str("[geometry]\nrail_girth = 3\n").is_err());
    }

    #[test]
    fn rail_lengths() {
        let geometry = Geometry::default();
        assert_eq!(geometry.h_rail_len(0), geometry.min_rail_len);
        assert_eq!(geometry.h_rail_len(3), 300);
        assert_eq!(geometry.v_rail_len(2, 2), 320);
    }
}
