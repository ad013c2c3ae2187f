use ladder_model::{MatrixData, ModelError, RungRef, RungStore, RungType};

#[test]
fn appends_allocate_monotonic_references() {
    let mut store = RungStore::new();
    let first = store.append_empty_rung();
    let second = store.append_empty_rung();
    let third = store.append_empty_rung();

    assert!(first < second && second < third);
    assert_eq!(store.rung_refs(), vec![first, second, third]);

    // Insertions elsewhere never disturb append order of the others.
    let inserted = store.insert_empty_rung_before(second).unwrap();
    assert_eq!(store.rung_refs(), vec![first, inserted, second, third]);
    assert!(inserted > third);
}

#[test]
fn references_survive_deletion_and_are_never_reused() {
    let mut store = RungStore::new();
    let first = store.append_empty_rung();
    let second = store.append_empty_rung();

    store.delete_rung(first).unwrap();
    assert_eq!(store.rung_refs(), vec![second]);
    assert_eq!(store.rung(first).unwrap_err(), ModelError::UnknownRung(first));

    let third = store.append_empty_rung();
    assert_ne!(third, first);
    assert!(third > second);
}

#[test]
fn unknown_references_are_explicit_errors() {
    let mut store = RungStore::new();
    let missing = RungRef(99);
    assert_eq!(
        store.insert_empty_rung_before(missing).unwrap_err(),
        ModelError::UnknownRung(missing)
    );
    assert_eq!(
        store.delete_rung(missing).unwrap_err(),
        ModelError::UnknownRung(missing)
    );
    assert_eq!(
        store.rung_type(missing).unwrap_err(),
        ModelError::UnknownRung(missing)
    );
}

#[test]
fn field_accessors_write_through_the_index() {
    let mut store = RungStore::new();
    let reference = store.append_empty_rung();

    assert_eq!(store.rung_type(reference).unwrap(), RungType::Empty);
    store.set_rung_type(reference, RungType::Single).unwrap();
    store.set_rung_comment(reference, "motor interlock").unwrap();
    store
        .set_rung_il(reference, vec!["STR X1".to_owned(), "OUT Y1".to_owned()])
        .unwrap();
    store.set_rung_matrix(reference, MatrixData::new()).unwrap();

    let rung = store.rung(reference).unwrap();
    assert_eq!(rung.rungtype, RungType::Single);
    assert_eq!(rung.comment, "motor interlock");
    assert_eq!(rung.ildata.len(), 2);
    assert!(rung.matrixdata.is_empty());
}
