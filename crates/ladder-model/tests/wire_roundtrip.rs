use ladder_model::{
    CellId, CellRecord, RungRecord, RungType, Subroutine, SubroutineRecord,
};
use smol_str::SmolStr;

fn cell(kind: &str, row: u32, col: u32, value: &str, addr: &[&str], monitor: &[&str]) -> CellRecord {
    CellRecord {
        kind: kind.into(),
        row,
        col,
        addr: addr.iter().map(|a| SmolStr::new(a)).collect(),
        value: value.into(),
        monitor: monitor.iter().map(|m| SmolStr::new(m)).collect(),
    }
}

fn single_rung_record() -> SubroutineRecord {
    SubroutineRecord {
        subrname: "pumps".into(),
        subrcomments: "pump station interlocks".to_owned(),
        signature: 41,
        subrdata: vec![RungRecord {
            rungtype: "single".into(),
            comment: "run permissive".to_owned(),
            ildata: Vec::new(),
            matrixdata: vec![
                cell("inp", 0, 0, "noc", &["X1"], &["X1"]),
                cell("inp", 0, 1, "cmpge", &["DS3", "100"], &["DS3"]),
                cell("outp", 0, 0, "out", &["Y2"], &["Y2"]),
            ],
        }],
    }
}

#[test]
fn import_then_export_is_a_semantic_round_trip() {
    let record = single_rung_record();
    let subroutine = Subroutine::import(&record).unwrap();
    let exported = subroutine.export();
    assert_eq!(exported, record);
}

#[test]
fn import_builds_the_cell_keyed_matrix() {
    let subroutine = Subroutine::import(&single_rung_record()).unwrap();
    let reference = subroutine.store.rung_refs()[0];
    let rung = subroutine.store.rung(reference).unwrap();

    assert_eq!(rung.rungtype, RungType::Single);
    assert_eq!(rung.comment, "run permissive");
    assert_eq!(rung.matrixdata.len(), 3);
    let compare = rung.matrixdata.get(CellId::Input { row: 0, col: 1 }).unwrap();
    assert_eq!(compare.value, "cmpge");
    assert_eq!(compare.addr, vec![SmolStr::new("DS3"), SmolStr::new("100")]);

    assert_eq!(
        subroutine.monitor_list(),
        [SmolStr::new("DS3"), SmolStr::new("X1"), SmolStr::new("Y2")]
    );
}

#[test]
fn oversize_rung_is_downgraded_to_il() {
    let record = SubroutineRecord {
        subrname: "toobig".into(),
        subrcomments: String::new(),
        signature: 7,
        subrdata: vec![RungRecord {
            rungtype: "single".into(),
            comment: String::new(),
            ildata: vec!["STR X1".to_owned()],
            matrixdata: vec![
                cell("inp", 0, 0, "noc", &["X1"], &["X1"]),
                cell("inp", 9, 0, "noc", &["X9"], &["X9"]),
            ],
        }],
    };
    let subroutine = Subroutine::import(&record).unwrap();
    let reference = subroutine.store.rung_refs()[0];
    let rung = subroutine.store.rung(reference).unwrap();

    // Deliberate capacity limit: the grid cannot represent row 9, so
    // the IL text carries the rung and the matrix is emptied.
    assert_eq!(rung.rungtype, RungType::Il);
    assert!(rung.matrixdata.is_empty());
    assert_eq!(rung.ildata, vec!["STR X1".to_owned()]);
}

#[test]
fn json_round_trip() {
    let record = single_rung_record();
    let text = record.to_json().unwrap();
    let parsed = SubroutineRecord::from_json(&text).unwrap();
    assert_eq!(parsed, record);
}

#[test]
fn export_orders_cells_row_major() {
    let record = SubroutineRecord {
        subrname: "order".into(),
        subrcomments: String::new(),
        signature: 0,
        subrdata: vec![RungRecord {
            rungtype: "single".into(),
            comment: String::new(),
            ildata: Vec::new(),
            // Deliberately scrambled on the way in.
            matrixdata: vec![
                cell("inp", 1, 0, "noc", &["X3"], &["X3"]),
                cell("inp", 0, 2, "noc", &["X2"], &["X2"]),
                cell("inp", 0, 0, "noc", &["X1"], &["X1"]),
            ],
        }],
    };
    let exported = Subroutine::import(&record).unwrap().export();
    let values: Vec<&str> = exported.subrdata[0]
        .matrixdata
        .iter()
        .map(|cell| cell.addr[0].as_str())
        .collect();
    assert_eq!(values, ["X1", "X2", "X3"]);
}
