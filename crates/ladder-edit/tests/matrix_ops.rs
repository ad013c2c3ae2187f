use ladder_edit::{EditError, EditMatrix, InsertPos, CELL_TEMPLATE};
use ladder_model::{CellId, MatrixData, RungType};
use ladder_view::{DisplayConfig, SceneGraph, Surface, HRAIL_TEMPLATE, VRAIL_TEMPLATE};

fn surface() -> SceneGraph {
    let mut graph = SceneGraph::new();
    let root = graph.root();
    graph.register("editrung", root);
    graph.register(CELL_TEMPLATE, root);
    graph.register(HRAIL_TEMPLATE, root);
    graph.register(VRAIL_TEMPLATE, root);
    graph
}

fn empty_matrix() -> EditMatrix<SceneGraph> {
    EditMatrix::new(
        surface(),
        DisplayConfig::default(),
        RungType::Empty,
        &MatrixData::new(),
        "editrung",
    )
    .unwrap()
}

fn input(row: u8, col: u8) -> CellId {
    CellId::Input { row, col }
}

fn output(row: u8) -> CellId {
    CellId::Output { row }
}

#[test]
fn first_output_fixes_the_rung_type() {
    let mut matrix = empty_matrix();
    matrix.select_cell(output(0)).unwrap();

    assert!(matrix.add_output(InsertPos::Replace, "tmr"));
    assert_eq!(matrix.rung_type(), RungType::Single);

    // A double-height output on a single rung is a rejected no-op.
    let before = matrix.matrix_data();
    assert!(!matrix.add_output(InsertPos::Replace, "cntu"));
    assert_eq!(matrix.rung_type(), RungType::Single);
    assert_eq!(matrix.matrix_data(), before);
}

#[test]
fn clear_rung_reopens_the_type() {
    let mut matrix = empty_matrix();
    matrix.select_cell(output(0)).unwrap();
    assert!(matrix.add_output(InsertPos::Replace, "cntu"));
    assert_eq!(matrix.rung_type(), RungType::Double);
    assert_eq!(matrix.limits().max_output_row, 3);

    matrix.clear_rung();
    assert_eq!(matrix.rung_type(), RungType::Empty);
    assert!(matrix.matrix_data().is_empty());

    // And the type can be fixed afresh.
    matrix.select_cell(output(0)).unwrap();
    assert!(matrix.add_output(InsertPos::Replace, "udc"));
    assert_eq!(matrix.rung_type(), RungType::Triple);
}

#[test]
fn directional_placement_stops_at_the_grid_edge() {
    let mut matrix = empty_matrix();

    matrix.select_cell(input(0, 0)).unwrap();
    assert!(!matrix.add_input(InsertPos::Left, "noc"));
    assert!(matrix.cell_is_empty(input(0, 0)));

    matrix.select_cell(input(0, 7)).unwrap();
    assert!(!matrix.add_input(InsertPos::Right, "noc"));

    matrix.select_cell(input(7, 3)).unwrap();
    assert!(!matrix.add_input(InsertPos::Below, "noc"));

    // And output placement respects the shrunk shape of a triple rung.
    matrix.select_cell(output(5)).unwrap();
    assert!(!matrix.add_output(InsertPos::Replace, "udc"));
    assert_eq!(matrix.rung_type(), RungType::Empty);
}

#[test]
fn adjacent_placement_moves_the_selection() {
    let mut matrix = empty_matrix();
    matrix.select_cell(input(0, 0)).unwrap();
    assert!(matrix.add_input(InsertPos::Replace, "noc"));
    assert!(matrix.add_input(InsertPos::Right, "ncc"));
    assert_eq!(matrix.current_cell(), Some(input(0, 1)));
    assert!(matrix.add_input(InsertPos::Below, "cmpeq"));
    assert_eq!(matrix.current_cell(), Some(input(1, 1)));

    let data = matrix.matrix_data();
    assert_eq!(data.get(input(0, 0)).unwrap().value, "noc");
    assert_eq!(data.get(input(0, 1)).unwrap().value, "ncc");
    assert_eq!(data.get(input(1, 1)).unwrap().value, "cmpeq");
}

#[test]
fn shift_right_then_left_restores_a_non_full_row() {
    let mut matrix = empty_matrix();
    matrix.select_cell(input(0, 0)).unwrap();
    assert!(matrix.add_input(InsertPos::Replace, "noc"));
    assert!(matrix.add_input(InsertPos::Right, "ncc"));
    assert!(matrix.add_input(InsertPos::Right, "cmplt"));

    let before = matrix.matrix_data();
    matrix.shift_inputs_right(0, 1);
    assert!(matrix.cell_is_empty(input(0, 1)));
    assert_eq!(matrix.matrix_data().get(input(0, 2)).unwrap().value, "ncc");

    matrix.shift_inputs_left(0, 1);
    assert_eq!(matrix.matrix_data(), before);
}

#[test]
fn insert_cell_is_refused_when_the_row_is_full() {
    let mut matrix = empty_matrix();
    matrix.select_cell(input(0, 0)).unwrap();
    assert!(matrix.add_input(InsertPos::Replace, "noc"));
    for _ in 0..7 {
        assert!(matrix.add_input(InsertPos::Right, "noc"));
    }
    assert!(matrix.row_is_full(0));

    matrix.select_cell(input(0, 0)).unwrap();
    let before = matrix.matrix_data();
    assert!(!matrix.insert_input_cell());
    assert_eq!(matrix.matrix_data(), before);

    // Removal drops the current cell and frees the boundary column.
    assert!(matrix.remove_input_cell());
    assert!(!matrix.row_is_full(0));
    assert!(matrix.cell_is_empty(input(0, 7)));
}

#[test]
fn row_insert_shifts_occupied_rows_down() {
    let mut matrix = empty_matrix();
    matrix.select_cell(input(0, 0)).unwrap();
    assert!(matrix.add_input(InsertPos::Replace, "noc"));
    matrix.select_cell(input(1, 0)).unwrap();
    assert!(matrix.add_input(InsertPos::Replace, "ncc"));

    matrix.select_cell(input(0, 0)).unwrap();
    assert!(matrix.insert_input_row());
    let data = matrix.matrix_data();
    assert!(matrix.cell_is_empty(input(0, 0)));
    assert_eq!(data.get(input(1, 0)).unwrap().value, "noc");
    assert_eq!(data.get(input(2, 0)).unwrap().value, "ncc");

    assert!(matrix.remove_input_row());
    let data = matrix.matrix_data();
    assert_eq!(data.get(input(0, 0)).unwrap().value, "noc");
    assert_eq!(data.get(input(1, 0)).unwrap().value, "ncc");
}

#[test]
fn column_insert_is_refused_when_the_boundary_column_is_occupied() {
    let mut matrix = empty_matrix();
    matrix.select_cell(input(0, 7)).unwrap();
    assert!(matrix.add_input(InsertPos::Replace, "noc"));

    matrix.select_cell(input(0, 0)).unwrap();
    assert!(!matrix.insert_input_col());

    // Clearing the boundary column lets the insert through.
    matrix.select_cell(input(0, 7)).unwrap();
    assert!(matrix.remove_input_cell());
    matrix.select_cell(input(0, 0)).unwrap();
    assert!(matrix.insert_input_col());
}

#[test]
fn rails_track_the_occupied_extent() {
    let mut matrix = empty_matrix();
    matrix.select_cell(input(0, 0)).unwrap();
    assert!(matrix.add_input(InsertPos::Replace, "noc"));
    matrix.select_cell(input(0, 2)).unwrap();
    assert!(matrix.add_input(InsertPos::Replace, "ncc"));

    assert_eq!(matrix.fix_h_rail(0), 3);
    assert_eq!(matrix.fix_h_rail(1), 0);

    let config = DisplayConfig::default();
    let graph = matrix.surface();
    let rail0 = graph.lookup("hrail0").unwrap();
    assert_eq!(
        graph.attr(rail0, "length").unwrap(),
        (3 * config.geometry.input_pitch_x).to_string()
    );
    let rail1 = graph.lookup("hrail1").unwrap();
    assert_eq!(
        graph.attr(rail1, "length").unwrap(),
        config.geometry.min_rail_len.to_string()
    );

    matrix.select_cell(output(0)).unwrap();
    assert!(matrix.add_output(InsertPos::Replace, "out"));
    matrix.select_cell(output(2)).unwrap();
    assert!(matrix.add_output(InsertPos::Replace, "out"));
    assert_eq!(matrix.fix_v_rail(), 3);
}

#[test]
fn matrix_data_round_trips_into_a_fresh_matrix() {
    let mut matrix = empty_matrix();
    matrix.select_cell(input(0, 0)).unwrap();
    assert!(matrix.add_input(InsertPos::Replace, "noc"));
    matrix.select_cell(input(1, 2)).unwrap();
    assert!(matrix.add_input(InsertPos::Replace, "cmpeq"));
    matrix.select_cell(output(0)).unwrap();
    assert!(matrix.add_output(InsertPos::Replace, "tmr"));

    let data = matrix.matrix_data();
    let mut fresh = EditMatrix::new(
        surface(),
        DisplayConfig::default(),
        matrix.rung_type(),
        &MatrixData::new(),
        "editrung",
    )
    .unwrap();
    fresh.set_matrix_data(&data).unwrap();
    assert_eq!(fresh.matrix_data(), data);
}

#[test]
fn selection_is_single_and_validated() {
    let mut matrix = empty_matrix();
    matrix.select_cell(input(0, 0)).unwrap();
    matrix.select_cell(input(3, 3)).unwrap();
    assert_eq!(matrix.current_cell(), Some(input(3, 3)));

    assert_eq!(
        matrix.select_cell(input(9, 0)).unwrap_err(),
        EditError::UnknownCell(input(9, 0))
    );

    // A double rung only exposes output rows 0..=3.
    matrix.select_cell(output(0)).unwrap();
    assert!(matrix.add_output(InsertPos::Replace, "cntu"));
    assert_eq!(
        matrix.select_cell(output(5)).unwrap_err(),
        EditError::UnknownCell(output(5))
    );
}

#[test]
fn il_rungs_have_no_edit_grid() {
    let err = EditMatrix::new(
        surface(),
        DisplayConfig::default(),
        RungType::Il,
        &MatrixData::new(),
        "editrung",
    )
    .unwrap_err();
    assert_eq!(err, EditError::IlRung);
}
