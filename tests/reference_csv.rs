use std::path::Path;

use ro_projection_toolbox::{
    matching::header::table_headers,
    reference::{load_reference_csv, read_reference_rows, RawValue, ReferenceError},
};

#[test]
fn cells_are_typed_and_headers_trimmed() {
    let csv = " Feed pH ,Membrane,Note\n7.5,BW30,\n";
    let rows = read_reference_rows(csv.as_bytes()).expect("csv");
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.get("Feed pH"), Some(&RawValue::Number(7.5)));
    assert_eq!(row.get("Membrane"), Some(&RawValue::from("BW30")));
    assert_eq!(row.get("Note"), Some(&RawValue::Null));
    assert_eq!(row.columns().collect::<Vec<_>>(), vec!["Feed pH", "Membrane", "Note"]);
}

#[test]
fn blank_rows_are_skipped() {
    let csv = "A,B\n1,2\n , \n\n3,4\n";
    let rows = read_reference_rows(csv.as_bytes()).expect("csv");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].get("A").and_then(RawValue::as_number), Some(3.0));
}

#[test]
fn unreadable_rows_are_skipped_not_fatal() {
    let mut csv = b"A,B\n1,2\n".to_vec();
    csv.extend_from_slice(b"\xff\xfe,3\n");
    csv.extend_from_slice(b"5,6\n");
    let rows = read_reference_rows(csv.as_slice()).expect("csv");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].get("B").and_then(RawValue::as_number), Some(6.0));
}

#[test]
fn short_rows_keep_known_columns() {
    let csv = "A,B,C\n1,2,3\n4\n";
    let rows = read_reference_rows(csv.as_bytes()).expect("csv");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].len(), 1);
    assert!(rows[1].get("C").is_none());
    assert_eq!(table_headers(&rows), vec!["A", "B", "C"]);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_reference_csv(Path::new("does/not/exist/master.csv")).expect_err("missing");
    assert!(matches!(err, ReferenceError::Io(_)));
}
