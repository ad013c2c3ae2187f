//! Static rung rendering for monitor mode.
//!
//! Reconstructs the visual of a rung from stored matrix data alone,
//! with no live edit session. Rail lengths come from the same extent
//! arithmetic the edit matrix uses, so monitor and edit views never
//! disagree about where a rail ends.

use ladder_model::{catalog, occupied_extent, CellId, MatrixLimits, Rung, RungType};
use smol_str::SmolStr;

use crate::config::DisplayConfig;
use crate::error::ViewError;
use crate::surface::Surface;

/// Template element id for horizontal rails.
pub const HRAIL_TEMPLATE: &str = "sym_hrail";
/// Template element id for the vertical output rail.
pub const VRAIL_TEMPLATE: &str = "sym_vrail";
/// Template element id for IL text lines.
pub const ILTEXT_TEMPLATE: &str = "sym_iltext";

/// Height of one output row, in single rows.
#[must_use]
pub fn output_height(rungtype: RungType) -> u32 {
    match rungtype {
        RungType::Double => 2,
        RungType::Triple => 3,
        RungType::Empty | RungType::Single | RungType::Il => 1,
    }
}

/// Pixel position of a cell for the given rungtype.
#[must_use]
pub fn cell_position(id: CellId, rungtype: RungType, config: &DisplayConfig) -> (u32, u32) {
    let geometry = &config.geometry;
    match id {
        CellId::Input { row, col } => (
            u32::from(col) * geometry.input_pitch_x,
            u32::from(row) * geometry.input_pitch_y,
        ),
        CellId::Output { row } => (
            geometry.output_x,
            u32::from(row) * geometry.output_pitch_y * output_height(rungtype),
        ),
    }
}

/// Address list as displayed under a glyph.
#[must_use]
pub fn address_text(addr: &[SmolStr]) -> String {
    addr.join(" ")
}

/// Render a read-only reconstruction of `rung` under the element
/// registered as `parent_id`.
///
/// Graphical rungs place one cloned glyph per occupied cell, one
/// horizontal rail per used input row, and the vertical output rail;
/// IL rungs render their text lines instead. All created elements get
/// ids prefixed with `parent_id`, so many rungs can share one document.
pub fn render_rung<S: Surface>(
    surface: &mut S,
    parent_id: &str,
    rung: &Rung,
    config: &DisplayConfig,
) -> Result<(), ViewError> {
    let parent = surface
        .lookup(parent_id)
        .ok_or_else(|| ViewError::MissingNode(parent_id.into()))?;

    if rung.rungtype == RungType::Il {
        return render_il(surface, parent_id, rung, config);
    }
    let limits = MatrixLimits::for_rung_type(rung.rungtype);

    for (id, cell) in rung.matrixdata.iter() {
        let instruction = catalog::lookup(&cell.value)
            .ok_or_else(|| ViewError::UnknownInstruction(cell.value.clone()))?;
        let template = surface
            .lookup(instruction.symbol)
            .ok_or_else(|| ViewError::MissingTemplate(instruction.symbol.into()))?;
        let node = surface.clone_node(template, &format!("{parent_id}_{}", id.surface_id()));
        let (x, y) = cell_position(id, rung.rungtype, config);
        surface.set_attr(node, "x", &x.to_string());
        surface.set_attr(node, "y", &y.to_string());
        surface.set_attr(node, "text", &address_text(&cell.addr));
        surface.append_child(parent, node);
    }

    let hrail_template = surface
        .lookup(HRAIL_TEMPLATE)
        .ok_or_else(|| ViewError::MissingTemplate(HRAIL_TEMPLATE.into()))?;
    let rows_used = occupied_extent(
        (0..=limits.max_input_row).map(|row| rung.matrixdata.input_extent(row, &limits) > 0),
    );
    for row in (0..=limits.max_input_row).take(rows_used) {
        let extent = rung.matrixdata.input_extent(row, &limits);
        let rail = surface.clone_node(hrail_template, &format!("{parent_id}_hrail{row}"));
        surface.set_attr(rail, "x", "0");
        surface.set_attr(
            rail,
            "y",
            &(u32::from(row) * config.geometry.input_pitch_y).to_string(),
        );
        surface.set_attr(rail, "length", &config.geometry.h_rail_len(extent).to_string());
        surface.append_child(parent, rail);
    }

    let vrail_template = surface
        .lookup(VRAIL_TEMPLATE)
        .ok_or_else(|| ViewError::MissingTemplate(VRAIL_TEMPLATE.into()))?;
    let extent = rung.matrixdata.output_extent(&limits);
    let rail = surface.clone_node(vrail_template, &format!("{parent_id}_vrail"));
    surface.set_attr(rail, "x", &config.geometry.output_x.to_string());
    surface.set_attr(rail, "y", "0");
    surface.set_attr(
        rail,
        "length",
        &config
            .geometry
            .v_rail_len(extent, output_height(rung.rungtype))
            .to_string(),
    );
    surface.append_child(parent, rail);
    Ok(())
}

fn render_il<S: Surface>(
    surface: &mut S,
    parent_id: &str,
    rung: &Rung,
    config: &DisplayConfig,
) -> Result<(), ViewError> {
    let parent = surface
        .lookup(parent_id)
        .ok_or_else(|| ViewError::MissingNode(parent_id.into()))?;
    let template = surface
        .lookup(ILTEXT_TEMPLATE)
        .ok_or_else(|| ViewError::MissingTemplate(ILTEXT_TEMPLATE.into()))?;
    for (index, line) in rung.ildata.iter().enumerate() {
        let node = surface.clone_node(template, &format!("{parent_id}_il{index}"));
        let y = u32::try_from(index).unwrap_or(0) * config.geometry.il_pitch_y;
        surface.set_attr(node, "y", &y.to_string());
        surface.set_attr(node, "text", line);
        surface.append_child(parent, node);
    }
    Ok(())
}
