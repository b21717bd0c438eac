use ro_projection_toolbox::{
    derivation::recompute,
    i18n::{keys, Translator},
    matching::{
        find_matches, key_names, key_parameters, resolve_column, KeyParameter, KeyValue,
        MatchOutcome, Matcher, NoMatchReason, ResolutionTier,
    },
    params::{names, ParameterSet},
    reference::{read_reference_rows, RawValue, ReferenceRow},
};

const HEADER: &str = "Feed Flow (m3/hr),Recovery(%),Feed Temperature,Feed water pH,Permeate TDS,Membrane";

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {tol})"
    );
}

fn table(rows: &[&str]) -> Vec<ReferenceRow> {
    let mut csv = String::from(HEADER);
    for row in rows {
        csv.push('\n');
        csv.push_str(row);
    }
    read_reference_rows(csv.as_bytes()).expect("csv")
}

fn keys_for(flow: f64, recovery: f64, temperature: f64, ph: f64) -> Vec<KeyParameter> {
    vec![
        KeyParameter::number(key_names::FEED_FLOW, flow),
        KeyParameter::number(key_names::RECOVERY, recovery),
        KeyParameter::number(key_names::FEED_TEMPERATURE, temperature),
        KeyParameter::number(key_names::FEED_PH, ph),
    ]
}

fn cell_number(row: &ReferenceRow, column: &str) -> f64 {
    row.get(column)
        .and_then(RawValue::as_number)
        .unwrap_or(f64::NAN)
}

#[test]
fn single_row_is_selected() {
    let rows = table(&[
        "40,75,25,7.5,120,BW30",
        "40,75,30,7.5,150,BW30",
        "60,50,25,7.5,200,SW30",
    ]);
    let outcome = find_matches(&keys_for(40.0, 75.0, 25.0, 7.5), &rows);
    let row = outcome.selected().expect("single match");
    assert_eq!(cell_number(row, "Permeate TDS"), 120.0);
    assert!(outcome.candidates().is_empty());
}

#[test]
fn multiple_rows_are_averaged_without_auto_select() {
    let rows = table(&[
        "40,75,25,7.5,10.0,BW30",
        "40,75,25,7.5,10.005,BW30",
        "60,50,25,7.5,200,SW30",
    ]);
    let outcome = find_matches(&keys_for(40.0, 75.0, 25.0, 7.5), &rows);
    assert!(outcome.selected().is_none());
    assert_eq!(outcome.candidates().len(), 2);

    let aggregate = outcome.aggregate().expect("aggregate row");
    assert_close("tds", cell_number(aggregate, "Permeate TDS"), 10.0025, 1e-9);
    assert_close("flow", cell_number(aggregate, "Feed Flow (m3/hr)"), 40.0, 1e-9);
    assert_eq!(aggregate.get("Membrane"), Some(&RawValue::from("BW30")));
}

#[test]
fn text_columns_take_most_common_value() {
    let rows = table(&[
        "40,75,25,7.5,10,BW30",
        "40,75,25,7.5,11,XLE",
        "40,75,25,7.5,12,XLE",
    ]);
    let outcome = find_matches(&keys_for(40.0, 75.0, 25.0, 7.5), &rows);
    let aggregate = outcome.aggregate().expect("aggregate row");
    assert_eq!(aggregate.get("Membrane"), Some(&RawValue::from("XLE")));
    assert_close("tds", cell_number(aggregate, "Permeate TDS"), 11.0, 1e-9);
}

#[test]
fn empty_table_reports_data_not_loaded() {
    let outcome = find_matches(&keys_for(40.0, 75.0, 25.0, 7.5), &[]);
    assert_eq!(outcome, MatchOutcome::NoMatch(NoMatchReason::DataNotLoaded));
}

#[test]
fn unresolvable_key_is_reported() {
    let rows: Vec<ReferenceRow> = read_reference_rows("A,B,C\n1,2,3\n".as_bytes()).expect("csv");
    let keys = vec![KeyParameter::number(key_names::FEED_PH, 7.5)];
    let outcome = find_matches(&keys, &rows);
    assert_eq!(
        outcome,
        MatchOutcome::NoMatch(NoMatchReason::UnresolvedColumns(vec![
            key_names::FEED_PH.to_string()
        ]))
    );
}

#[test]
fn tolerance_bounds_numeric_keys() {
    let rows = table(&["40,75,25.01,7.5,120,BW30"]);
    let near = find_matches(&keys_for(40.0, 75.0, 25.0, 7.5), &rows);
    assert!(near.selected().is_some());

    let rows = table(&["40,75,25.02,7.5,120,BW30"]);
    let far = find_matches(&keys_for(40.0, 75.0, 25.0, 7.5), &rows);
    assert!(matches!(far, MatchOutcome::NoMatch(_)));

    let loose = Matcher::new(0.05).find_matches(&keys_for(40.0, 75.0, 25.0, 7.5), &rows);
    assert!(loose.selected().is_some());
}

#[test]
fn values_present_separately_but_not_jointly() {
    let tr = Translator::new("en");
    let rows = table(&["40,75,30,7.5,120,BW30", "60,50,25,7.5,200,SW30"]);
    let outcome = find_matches(&keys_for(40.0, 75.0, 25.0, 7.5), &rows);
    let MatchOutcome::NoMatch(reason) = &outcome else {
        panic!("expected no match, got {outcome:?}");
    };
    assert!(reason.inputs_exist_individually());
    assert!(reason.absent_keys().is_empty());
    assert_eq!(outcome.describe(&tr), tr.t(keys::MATCH_NOT_JOINTLY));
}

#[test]
fn absent_values_are_named() {
    let rows = table(&["40,75,30,7.5,120,BW30", "60,50,25,7.5,200,SW30"]);
    let outcome = find_matches(&keys_for(40.0, 75.0, 99.0, 7.5), &rows);
    let MatchOutcome::NoMatch(reason) = &outcome else {
        panic!("expected no match, got {outcome:?}");
    };
    assert!(!reason.inputs_exist_individually());
    assert_eq!(reason.absent_keys(), vec![key_names::FEED_TEMPERATURE]);
    assert!(outcome
        .describe(&Translator::new("en"))
        .contains(key_names::FEED_TEMPERATURE));
}

#[test]
fn candidate_selection_collapses_to_single_match() {
    let rows = table(&["40,75,25,7.5,10,BW30", "40,75,25,7.5,11,BW30"]);
    let mut outcome = find_matches(&keys_for(40.0, 75.0, 25.0, 7.5), &rows);

    let before = outcome.clone();
    assert!(!outcome.select_candidate(2));
    assert_eq!(outcome, before);

    assert!(outcome.select_candidate(1));
    let row = outcome.selected().expect("selected row");
    assert_eq!(cell_number(row, "Permeate TDS"), 11.0);
    assert!(outcome.aggregate().is_none());
    assert!(!outcome.select_candidate(0));
}

#[test]
fn header_lookup_ignores_case_and_symbols() {
    for header in ["feed flow (m3/hr)", "FeedFlowM3Hr", "FEED FLOW (M³/HR)"] {
        let headers = vec!["Recovery".to_string(), header.to_string()];
        assert_eq!(
            resolve_column(key_names::FEED_FLOW, &headers),
            Some((header, ResolutionTier::Exact)),
            "header {header}"
        );
    }
}

#[test]
fn text_key_matches_case_insensitively() {
    let rows = table(&["40,75,25,7.5,120,BW30"]);
    let keys = vec![KeyParameter {
        name: "Membrane".to_string(),
        value: KeyValue::Text(" bw30 ".to_string()),
    }];
    assert!(find_matches(&keys, &rows).selected().is_some());
}

#[test]
fn key_parameters_follow_derived_flow() {
    let mut params = ParameterSet::new();
    params.set(names::DESIRED_PERMEATE_FLOW, 30.0).expect("set");
    params.set(names::RECOVERY_PERCENT, 75.0).expect("set");
    let keys = key_parameters(&recompute(&params));

    let values: Vec<(&str, f64)> = keys
        .iter()
        .map(|k| match k.value {
            KeyValue::Number(n) => (k.name.as_str(), n),
            KeyValue::Text(_) => (k.name.as_str(), f64::NAN),
        })
        .collect();
    assert_eq!(
        values,
        vec![
            (key_names::FEED_FLOW, 40.0),
            (key_names::RECOVERY, 75.0),
            (key_names::FEED_TEMPERATURE, 25.0),
            (key_names::FEED_PH, 7.5),
        ]
    );
}
