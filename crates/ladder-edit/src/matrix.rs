//! The live edit matrix for one rung.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::debug;

use ladder_model::{
    catalog, occupied_extent, CellData, CellId, MatrixData, MatrixLimits, RungType, MAX_INDEX,
};
use ladder_view::{
    address_text, cell_position, output_height, DisplayConfig, NodeId, Surface, HRAIL_TEMPLATE,
    VRAIL_TEMPLATE,
};

use crate::error::EditError;
use crate::fields::{layout, validate_group, FieldOutcome};

/// Template element id for an empty cell box.
pub const CELL_TEMPLATE: &str = "sym_cell";

const GRID: usize = MAX_INDEX as usize + 1;

/// Where a new instruction lands relative to the current cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPos {
    /// One column left of the current cell.
    Left,
    /// One column right of the current cell.
    Right,
    /// One row below the current cell.
    Below,
    /// Into the current cell.
    Replace,
}

/// The rung currently open for editing.
///
/// Owns the full 8x8 input grid, the 8-slot output column, the active
/// [`MatrixLimits`], the selection, and the surface nodes mirroring all
/// of it. Every operation completes synchronously and leaves the
/// surface consistent with the grid; the rails are refixed after every
/// structural change.
#[derive(Debug)]
pub struct EditMatrix<S> {
    surface: S,
    config: DisplayConfig,
    rungtype: RungType,
    limits: MatrixLimits,
    inputs: [[CellData; GRID]; GRID],
    outputs: [CellData; GRID],
    current: Option<CellId>,
    cells: FxHashMap<CellId, NodeId>,
    hrails: Vec<NodeId>,
    vrail: NodeId,
}

impl<S: Surface> EditMatrix<S> {
    /// Build the edit grid under the element registered as `parent_id`,
    /// seeded from `matrix`. The surface must carry the cell and rail
    /// templates; IL rungs have no grid and are refused.
    pub fn new(
        mut surface: S,
        config: DisplayConfig,
        rungtype: RungType,
        matrix: &MatrixData,
        parent_id: &str,
    ) -> Result<Self, EditError> {
        if rungtype == RungType::Il {
            return Err(EditError::IlRung);
        }
        let root = surface
            .lookup(parent_id)
            .ok_or_else(|| EditError::MissingNode(parent_id.into()))?;
        let cell_template = surface
            .lookup(CELL_TEMPLATE)
            .ok_or_else(|| EditError::MissingNode(CELL_TEMPLATE.into()))?;
        let hrail_template = surface
            .lookup(HRAIL_TEMPLATE)
            .ok_or_else(|| EditError::MissingNode(HRAIL_TEMPLATE.into()))?;
        let vrail_template = surface
            .lookup(VRAIL_TEMPLATE)
            .ok_or_else(|| EditError::MissingNode(VRAIL_TEMPLATE.into()))?;

        let mut cells = FxHashMap::default();
        for row in 0..=MAX_INDEX {
            for col in 0..=MAX_INDEX {
                let id = CellId::Input { row, col };
                let node = surface.clone_node(cell_template, &id.surface_id());
                let (x, y) = cell_position(id, rungtype, &config);
                surface.set_attr(node, "x", &x.to_string());
                surface.set_attr(node, "y", &y.to_string());
                surface.set_attr(node, "stroke", &config.theme.cell_stroke);
                surface.set_attr(node, "symbol", CellData::EMPTY_VALUE);
                surface.set_attr(node, "text", "");
                surface.append_child(root, node);
                cells.insert(id, node);
            }
        }
        for row in 0..=MAX_INDEX {
            let id = CellId::Output { row };
            let node = surface.clone_node(cell_template, &id.surface_id());
            surface.set_attr(node, "stroke", &config.theme.cell_stroke);
            surface.set_attr(node, "symbol", CellData::EMPTY_VALUE);
            surface.set_attr(node, "text", "");
            surface.append_child(root, node);
            cells.insert(id, node);
        }

        let mut hrails = Vec::with_capacity(GRID);
        for row in 0..=MAX_INDEX {
            let rail = surface.clone_node(hrail_template, &format!("hrail{row}"));
            surface.set_attr(rail, "x", "0");
            surface.set_attr(
                rail,
                "y",
                &(u32::from(row) * config.geometry.input_pitch_y).to_string(),
            );
            surface.append_child(root, rail);
            hrails.push(rail);
        }
        let vrail = surface.clone_node(vrail_template, "vrail");
        surface.set_attr(vrail, "x", &config.geometry.output_x.to_string());
        surface.set_attr(vrail, "y", "0");
        surface.append_child(root, vrail);

        let mut this = Self {
            surface,
            config,
            rungtype,
            limits: MatrixLimits::for_rung_type(rungtype),
            inputs: std::array::from_fn(|_| std::array::from_fn(|_| CellData::empty())),
            outputs: std::array::from_fn(|_| CellData::empty()),
            current: None,
            cells,
            hrails,
            vrail,
        };
        this.layout_outputs();
        this.set_matrix_data(matrix)?;
        Ok(this)
    }

    /// The surface the session draws on.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Give the surface back, ending the session.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Rung type of the session.
    #[must_use]
    pub fn rung_type(&self) -> RungType {
        self.rungtype
    }

    /// Active structural limits.
    #[must_use]
    pub fn limits(&self) -> MatrixLimits {
        self.limits
    }

    /// The selected cell, if any.
    #[must_use]
    pub fn current_cell(&self) -> Option<CellId> {
        self.current
    }

    /// True when `id` holds no instruction (or lies off the grid).
    #[must_use]
    pub fn cell_is_empty(&self, id: CellId) -> bool {
        if !grid_bounds(id) {
            return true;
        }
        self.cell(id).is_empty()
    }

    /// Make `id` the single current cell, deselecting the previous one.
    pub fn select_cell(&mut self, id: CellId) -> Result<(), EditError> {
        if !id.in_bounds(&self.limits) {
            return Err(EditError::UnknownCell(id));
        }
        self.focus(id);
        Ok(())
    }

    /// Place an input instruction at or adjacent to the current cell.
    /// Returns false (and changes nothing) for unknown or non-input
    /// codes, with no input cell selected, or past the grid edge.
    pub fn add_input(&mut self, pos: InsertPos, code: &str) -> bool {
        let Some(instruction) = catalog::lookup(code) else {
            return false;
        };
        if !instruction.is_input() {
            return false;
        }
        let Some(CellId::Input { row, col }) = self.current else {
            return false;
        };
        let target = match pos {
            InsertPos::Replace => Some(CellId::Input { row, col }),
            InsertPos::Left => col.checked_sub(1).map(|col| CellId::Input { row, col }),
            InsertPos::Right => {
                (col < self.limits.max_input_col).then(|| CellId::Input { row, col: col + 1 })
            }
            InsertPos::Below => {
                (row < self.limits.max_input_row).then(|| CellId::Input { row: row + 1, col })
            }
        };
        let Some(target) = target else {
            debug!(code, "input placement past the grid edge ignored");
            return false;
        };
        self.set_cell(
            target,
            CellData::new(
                SmolStr::new_static(instruction.code),
                instruction.default_addr(),
            ),
        );
        self.focus(target);
        self.fix_h_rail(target.row());
        true
    }

    /// Place an output instruction at or below the current output cell.
    ///
    /// The first output placed on an empty rung fixes the rung type to
    /// its instruction class; an output whose class disagrees with a
    /// non-empty rung type is rejected with the grid unchanged.
    pub fn add_output(&mut self, pos: InsertPos, code: &str) -> bool {
        let Some(instruction) = catalog::lookup(code) else {
            return false;
        };
        let Some(class_type) = instruction.class.rung_type() else {
            return false;
        };
        if self.rungtype != RungType::Empty && self.rungtype != class_type {
            debug!(
                code,
                rungtype = self.rungtype.as_str(),
                "output height disagrees with rung type, ignored"
            );
            return false;
        }
        let Some(CellId::Output { row }) = self.current else {
            return false;
        };
        let limits = MatrixLimits::for_rung_type(class_type);
        let target_row = match pos {
            InsertPos::Replace => Some(row),
            InsertPos::Below => (row < limits.max_output_row).then(|| row + 1),
            InsertPos::Left | InsertPos::Right => None,
        };
        let Some(target_row) = target_row else {
            debug!(code, "output placement past the grid edge ignored");
            return false;
        };
        if target_row > limits.max_output_row {
            debug!(code, row = target_row, "output row outside the rung shape ignored");
            return false;
        }
        if self.rungtype == RungType::Empty {
            self.apply_rung_type(class_type);
        }
        let target = CellId::Output { row: target_row };
        self.set_cell(
            target,
            CellData::new(
                SmolStr::new_static(instruction.code),
                instruction.default_addr(),
            ),
        );
        self.focus(target);
        self.fix_v_rail();
        true
    }

    /// Shift the cells of `row` one position right starting at `col`;
    /// the boundary-column cell is dropped and `col` becomes empty.
    pub fn shift_inputs_right(&mut self, row: u8, col: u8) {
        if row > self.limits.max_input_row || col > self.limits.max_input_col {
            return;
        }
        let r = usize::from(row);
        let mut c = usize::from(self.limits.max_input_col);
        while c > usize::from(col) {
            self.inputs[r][c] = self.inputs[r][c - 1].clone();
            c -= 1;
        }
        self.inputs[r][usize::from(col)].clear();
        self.redisplay_row_from(row, col);
        self.fix_h_rail(row);
    }

    /// Shift the cells of `row` one position left starting at `col`;
    /// the cell at `col` is dropped and the boundary column becomes
    /// empty.
    pub fn shift_inputs_left(&mut self, row: u8, col: u8) {
        if row > self.limits.max_input_row || col > self.limits.max_input_col {
            return;
        }
        let r = usize::from(row);
        let max = usize::from(self.limits.max_input_col);
        let mut c = usize::from(col);
        while c < max {
            self.inputs[r][c] = self.inputs[r][c + 1].clone();
            c += 1;
        }
        self.inputs[r][max].clear();
        self.redisplay_row_from(row, col);
        self.fix_h_rail(row);
    }

    /// Shift whole rows down one position starting at `row`; the
    /// boundary row is dropped and `row` becomes empty.
    pub fn shift_inputs_down(&mut self, row: u8) {
        if row > self.limits.max_input_row {
            return;
        }
        let mut r = usize::from(self.limits.max_input_row);
        while r > usize::from(row) {
            self.inputs[r] = self.inputs[r - 1].clone();
            r -= 1;
        }
        for cell in &mut self.inputs[usize::from(row)] {
            cell.clear();
        }
        for moved in row..=self.limits.max_input_row {
            self.redisplay_row_from(moved, 0);
            self.fix_h_rail(moved);
        }
    }

    /// Shift whole rows up one position starting at `row`; the row at
    /// `row` is dropped and the boundary row becomes empty.
    pub fn shift_inputs_up(&mut self, row: u8) {
        if row > self.limits.max_input_row {
            return;
        }
        let max = usize::from(self.limits.max_input_row);
        let mut r = usize::from(row);
        while r < max {
            self.inputs[r] = self.inputs[r + 1].clone();
            r += 1;
        }
        for cell in &mut self.inputs[max] {
            cell.clear();
        }
        for moved in row..=self.limits.max_input_row {
            self.redisplay_row_from(moved, 0);
            self.fix_h_rail(moved);
        }
    }

    /// True when the boundary-column cell of `row` is occupied, so a
    /// right shift would push an instruction off the grid.
    #[must_use]
    pub fn row_is_full(&self, row: u8) -> bool {
        if row > self.limits.max_input_row {
            return false;
        }
        !self.inputs[usize::from(row)][usize::from(self.limits.max_input_col)].is_empty()
    }

    /// True when the boundary-row cell of `col` is occupied, so a down
    /// shift would push an instruction off the grid.
    #[must_use]
    pub fn col_is_full(&self, col: u8) -> bool {
        if col > self.limits.max_input_col {
            return false;
        }
        !self.inputs[usize::from(self.limits.max_input_row)][usize::from(col)].is_empty()
    }

    /// Open a gap at the current cell by shifting its row right.
    /// Refused when the row is full.
    pub fn insert_input_cell(&mut self) -> bool {
        let Some(CellId::Input { row, col }) = self.current else {
            return false;
        };
        if self.row_is_full(row) {
            debug!(row, "row full, cell insert refused");
            return false;
        }
        self.shift_inputs_right(row, col);
        true
    }

    /// Delete the current cell, closing the gap from the right; the
    /// boundary column becomes empty.
    pub fn remove_input_cell(&mut self) -> bool {
        let Some(CellId::Input { row, col }) = self.current else {
            return false;
        };
        self.shift_inputs_left(row, col);
        true
    }

    /// Open an empty row at the current row. Refused when any column
    /// holds an instruction in the boundary row.
    pub fn insert_input_row(&mut self) -> bool {
        let Some(CellId::Input { row, .. }) = self.current else {
            return false;
        };
        if (0..=self.limits.max_input_col).any(|col| self.col_is_full(col)) {
            debug!(row, "boundary row occupied, row insert refused");
            return false;
        }
        self.shift_inputs_down(row);
        true
    }

    /// Delete the current row, shifting the rows below it up.
    pub fn remove_input_row(&mut self) -> bool {
        let Some(CellId::Input { row, .. }) = self.current else {
            return false;
        };
        self.shift_inputs_up(row);
        true
    }

    /// Open an empty column at the current column. Refused when any row
    /// holds an instruction in the boundary column.
    pub fn insert_input_col(&mut self) -> bool {
        let Some(CellId::Input { col, .. }) = self.current else {
            return false;
        };
        if (0..=self.limits.max_input_row).any(|row| self.row_is_full(row)) {
            debug!(col, "boundary column occupied, column insert refused");
            return false;
        }
        for row in 0..=self.limits.max_input_row {
            self.shift_inputs_right(row, col);
        }
        true
    }

    /// Delete the current column, shifting the columns right of it
    /// left.
    pub fn remove_input_col(&mut self) -> bool {
        let Some(CellId::Input { col, .. }) = self.current else {
            return false;
        };
        for row in 0..=self.limits.max_input_row {
            self.shift_inputs_left(row, col);
        }
        true
    }

    /// Delete the current output cell, shifting the outputs below it
    /// up.
    pub fn remove_output_cell(&mut self) -> bool {
        let Some(CellId::Output { row }) = self.current else {
            return false;
        };
        let max = usize::from(self.limits.max_output_row);
        let mut r = usize::from(row);
        while r < max {
            self.outputs[r] = self.outputs[r + 1].clone();
            r += 1;
        }
        self.outputs[max].clear();
        for moved in row..=self.limits.max_output_row {
            self.display_cell(CellId::Output { row: moved });
        }
        self.fix_v_rail();
        true
    }

    /// Empty every cell and reset the rung to its untyped state.
    pub fn clear_rung(&mut self) {
        for row in 0..=MAX_INDEX {
            for col in 0..=MAX_INDEX {
                self.inputs[usize::from(row)][usize::from(col)].clear();
                self.display_cell(CellId::Input { row, col });
            }
        }
        for row in 0..=MAX_INDEX {
            self.outputs[usize::from(row)].clear();
            self.display_cell(CellId::Output { row });
        }
        self.apply_rung_type(RungType::Empty);
        self.fix_all_rails();
        debug!("rung cleared");
    }

    /// Recompute the horizontal rail of `row` from the boundary inward
    /// and update the surface; returns the occupied extent.
    pub fn fix_h_rail(&mut self, row: u8) -> usize {
        if row > self.limits.max_input_row {
            return 0;
        }
        let extent = self.input_extent(row);
        let length = self.config.geometry.h_rail_len(extent);
        if let Some(&rail) = self.hrails.get(usize::from(row)) {
            self.surface.set_attr(rail, "length", &length.to_string());
        }
        extent
    }

    /// Recompute the vertical output rail and update the surface;
    /// returns the occupied extent.
    pub fn fix_v_rail(&mut self) -> usize {
        let extent = self.output_extent();
        let length = self
            .config
            .geometry
            .v_rail_len(extent, output_height(self.rungtype));
        let rail = self.vrail;
        self.surface.set_attr(rail, "length", &length.to_string());
        extent
    }

    /// Serialize the occupied cells of the grid.
    #[must_use]
    pub fn matrix_data(&self) -> MatrixData {
        let mut data = MatrixData::new();
        for row in 0..=self.limits.max_input_row {
            for col in 0..=self.limits.max_input_col {
                let id = CellId::Input { row, col };
                let cell = self.cell(id);
                if !cell.is_empty() {
                    data.set(id, cell.clone());
                }
            }
        }
        for row in 0..=self.limits.max_output_row {
            let id = CellId::Output { row };
            let cell = self.cell(id);
            if !cell.is_empty() {
                data.set(id, cell.clone());
            }
        }
        data
    }

    /// Replace the grid contents with `matrix`. The whole load is
    /// validated before anything changes.
    pub fn set_matrix_data(&mut self, matrix: &MatrixData) -> Result<(), EditError> {
        for (id, cell) in matrix.iter() {
            if !id.in_bounds(&self.limits) {
                return Err(EditError::UnknownCell(id));
            }
            if catalog::lookup(&cell.value).is_none() {
                return Err(EditError::UnknownInstruction(cell.value.clone()));
            }
        }
        for row in 0..=MAX_INDEX {
            for col in 0..=MAX_INDEX {
                self.inputs[usize::from(row)][usize::from(col)].clear();
                self.display_cell(CellId::Input { row, col });
            }
        }
        for row in 0..=MAX_INDEX {
            self.outputs[usize::from(row)].clear();
            self.display_cell(CellId::Output { row });
        }
        for (id, cell) in matrix.iter() {
            self.set_cell(id, cell.clone());
        }
        self.fix_all_rails();
        Ok(())
    }

    /// The current cell's addresses, padded to its form layout arity.
    #[must_use]
    pub fn address_values(&self) -> Vec<SmolStr> {
        let Some(current) = self.current else {
            return Vec::new();
        };
        let cell = self.cell(current);
        let Some(instruction) = catalog::lookup(&cell.value) else {
            return Vec::new();
        };
        let arity = layout(instruction.addredit).len();
        let mut values = cell.addr.clone();
        values.resize(arity, SmolStr::default());
        values.truncate(arity);
        values
    }

    /// Validate the operator-entered fields for the current cell and
    /// commit them all-or-nothing. On rejection the stored addresses
    /// and the display are untouched.
    pub fn address_enter(&mut self, inputs: &[&str]) -> FieldOutcome {
        let Some(current) = self.current else {
            return FieldOutcome::rejected();
        };
        let Some(instruction) = catalog::lookup(&self.cell(current).value) else {
            return FieldOutcome::rejected();
        };
        let outcome = validate_group(instruction.addredit, inputs);
        if outcome.accepted {
            if let Some(values) = &outcome.values {
                self.cell_mut(current).addr = values.clone();
                self.display_cell(current);
            }
        }
        outcome
    }

    fn cell(&self, id: CellId) -> &CellData {
        match id {
            CellId::Input { row, col } => &self.inputs[usize::from(row)][usize::from(col)],
            CellId::Output { row } => &self.outputs[usize::from(row)],
        }
    }

    fn cell_mut(&mut self, id: CellId) -> &mut CellData {
        match id {
            CellId::Input { row, col } => &mut self.inputs[usize::from(row)][usize::from(col)],
            CellId::Output { row } => &mut self.outputs[usize::from(row)],
        }
    }

    fn set_cell(&mut self, id: CellId, data: CellData) {
        *self.cell_mut(id) = data;
        self.display_cell(id);
    }

    fn focus(&mut self, id: CellId) {
        if let Some(previous) = self.current.take() {
            self.set_cell_colour(previous, false);
        }
        self.current = Some(id);
        self.set_cell_colour(id, true);
    }

    fn display_cell(&mut self, id: CellId) {
        let Some(&node) = self.cells.get(&id) else {
            return;
        };
        let (symbol, text) = {
            let cell = self.cell(id);
            let symbol = if cell.is_empty() {
                SmolStr::new_static(CellData::EMPTY_VALUE)
            } else {
                catalog::lookup(&cell.value)
                    .map_or_else(|| cell.value.clone(), |i| SmolStr::new_static(i.symbol))
            };
            (symbol, address_text(&cell.addr))
        };
        self.surface.set_attr(node, "symbol", &symbol);
        self.surface.set_attr(node, "text", &text);
    }

    fn set_cell_colour(&mut self, id: CellId, selected: bool) {
        let Some(&node) = self.cells.get(&id) else {
            return;
        };
        let stroke = if selected {
            self.config.theme.select_stroke.clone()
        } else {
            self.config.theme.cell_stroke.clone()
        };
        self.surface.set_attr(node, "stroke", &stroke);
    }

    fn redisplay_row_from(&mut self, row: u8, col: u8) {
        for c in col..=self.limits.max_input_col {
            self.display_cell(CellId::Input { row, col: c });
        }
    }

    fn apply_rung_type(&mut self, rungtype: RungType) {
        self.rungtype = rungtype;
        self.limits = MatrixLimits::for_rung_type(rungtype);
        self.layout_outputs();
        debug!(rungtype = rungtype.as_str(), "rung type applied");
    }

    fn layout_outputs(&mut self) {
        for row in 0..=MAX_INDEX {
            let id = CellId::Output { row };
            let Some(&node) = self.cells.get(&id) else {
                continue;
            };
            if row <= self.limits.max_output_row {
                let (x, y) = cell_position(id, self.rungtype, &self.config);
                self.surface.set_attr(node, "x", &x.to_string());
                self.surface.set_attr(node, "y", &y.to_string());
                self.surface.set_attr(node, "display", "inline");
            } else {
                self.surface.set_attr(node, "display", "none");
            }
        }
    }

    fn fix_all_rails(&mut self) {
        for row in 0..=self.limits.max_input_row {
            self.fix_h_rail(row);
        }
        self.fix_v_rail();
    }

    fn input_extent(&self, row: u8) -> usize {
        occupied_extent(
            (0..=self.limits.max_input_col)
                .map(|col| !self.inputs[usize::from(row)][usize::from(col)].is_empty()),
        )
    }

    fn output_extent(&self) -> usize {
        occupied_extent(
            (0..=self.limits.max_output_row).map(|row| !self.outputs[usize::from(row)].is_empty()),
        )
    }
}

fn grid_bounds(id: CellId) -> bool {
    match id {
        CellId::Input { row, col } => row <= MAX_INDEX && col <= MAX_INDEX,
        CellId::Output { row } => row <= MAX_INDEX,
    }
}
