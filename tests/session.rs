use std::time::{Duration, Instant};

use ro_projection_toolbox::{
    config::Config,
    i18n::{keys, Translator},
    matching::MatchOutcome,
    params::{names, source_field, stage_field, Ion, ParameterSet, SourceField, StageField},
    reference::{read_reference_rows, ReferenceRow},
    session::{ProjectionSession, SubmitError},
};

const MASTER: &str = "\
Feed Flow (m3/hr),Recovery(%),Feed Temperature,Feed water pH,Permeate TDS
40,75,25,7.5,10
40,75,25,7.5,11
60,50,25,7.5,30
";

fn master() -> Vec<ReferenceRow> {
    read_reference_rows(MASTER.as_bytes()).expect("csv")
}

fn valid_params() -> ParameterSet {
    let mut params = ParameterSet::new();
    params.set(names::PROJECT_NAME, "Plant A").expect("set");
    params.set(names::DESIGNER_NAME, "Operator").expect("set");
    params.set(names::MEMBRANE_TYPE, "BW30-400").expect("set");
    params.set(names::DESIRED_PERMEATE_FLOW, 30.0).expect("set");
    params.set(names::RECOVERY_PERCENT, 75.0).expect("set");
    params.set(&source_field(SourceField::WaterSource, 1), "Well Water").expect("set");
    params.set(&source_field(SourceField::Sdi, 1), 3.0).expect("set");
    params.set(&stage_field(StageField::ElementsPerVessel, 1), 6.0).expect("set");
    params
}

fn session(params: ParameterSet) -> ProjectionSession {
    ProjectionSession::new(params, master(), &Config::default(), Translator::new("en"))
}

#[test]
fn edits_recompute_only_after_quiet_period() {
    let mut s = session(valid_params());
    assert_eq!(s.params().number(names::FEED_FLOW), 40.0);

    let t0 = Instant::now();
    s.edit(names::RECOVERY_PERCENT, 50.0, t0).expect("edit");
    assert!(s.is_pending());
    assert!(!s.poll(t0 + Duration::from_millis(100)));
    assert_eq!(s.params().number(names::FEED_FLOW), 40.0);

    // 두 번째 입력이 마감 시각을 다시 민다.
    s.edit(names::DESIRED_PERMEATE_FLOW, 30.0, t0 + Duration::from_millis(200)).expect("edit");
    assert!(!s.poll(t0 + Duration::from_millis(400)));
    assert!(s.poll(t0 + Duration::from_millis(500)));
    assert!(!s.is_pending());
    assert_eq!(s.params().number(names::FEED_FLOW), 60.0);
    assert!(!s.poll(t0 + Duration::from_millis(900)));
}

#[test]
fn closing_discards_pending_recompute() {
    let mut s = session(valid_params());
    s.edit(names::RECOVERY_PERCENT, 50.0, Instant::now()).expect("edit");
    let params = s.close();
    assert_eq!(params.number(names::RECOVERY_PERCENT), 50.0);
    assert_eq!(params.number(names::FEED_FLOW), 40.0);
}

#[test]
fn derived_fields_reject_edits() {
    let mut s = session(valid_params());
    assert!(s.edit(names::FEED_FLOW, 1.0, Instant::now()).is_err());
    assert!(s.edit("no_such_field", 1.0, Instant::now()).is_err());
    assert!(!s.is_pending());
}

#[test]
fn submit_refuses_invalid_input_and_reports_first_ten() {
    let mut params = ParameterSet::new();
    for ion in Ion::ALL.into_iter().take(12) {
        params.set(&source_field(SourceField::Ion(ion), 1), -1.0).expect("set");
    }
    let mut s = session(params);

    let err = s.submit().expect_err("invalid input");
    let mut expected: Vec<String> =
        [names::PROJECT_NAME, names::DESIGNER_NAME, names::MEMBRANE_TYPE]
            .iter()
            .map(|n| n.to_string())
            .collect();
    expected.push(source_field(SourceField::WaterSource, 1));
    expected.push(source_field(SourceField::Sdi, 1));
    expected.extend(
        Ion::ALL
            .into_iter()
            .take(5)
            .map(|ion| source_field(SourceField::Ion(ion), 1)),
    );
    assert_eq!(err, SubmitError::ValidationFailed(expected));
    assert!(s.outcome().is_none());
    assert!(s.message().contains(names::PROJECT_NAME));
}

#[test]
fn inactive_groups_are_not_validated() {
    // 2단 엘리먼트 수는 0(범위 밖)이지만 비활성이라 통과한다.
    let mut s = session(valid_params());
    assert!(s.submit().is_ok());

    s.edit(names::STAGE_COUNT, 2.0, Instant::now()).expect("edit");
    let err = s.submit().expect_err("stage 2 now active");
    assert_eq!(
        err,
        SubmitError::ValidationFailed(vec![stage_field(StageField::ElementsPerVessel, 2)])
    );
}

#[test]
fn submit_flushes_pending_edit_before_matching() {
    let mut s = session(valid_params());
    s.edit(names::RECOVERY_PERCENT, 50.0, Instant::now()).expect("edit");
    s.edit(names::DESIRED_PERMEATE_FLOW, 30.0, Instant::now()).expect("edit");
    let outcome = s.submit().expect("submit");
    // 60/50/25/7.5 행 하나만 맞는다.
    assert!(outcome.selected().is_some());
    assert!(!s.is_pending());
    assert!(s.submitted());
}

#[test]
fn submit_select_and_clear() {
    let tr = Translator::new("en");
    let mut s = session(valid_params());

    let outcome = s.submit().expect("submit");
    assert_eq!(outcome.candidates().len(), 2);
    assert!(matches!(outcome, MatchOutcome::MultipleMatches { .. }));

    assert!(!s.select_candidate(7));
    assert_eq!(s.outcome().map(|o| o.candidates().len()), Some(2));

    assert!(s.select_candidate(0));
    assert!(s.outcome().and_then(MatchOutcome::selected).is_some());
    assert_eq!(s.message(), tr.t(keys::MATCH_FOUND));

    s.clear_result();
    assert!(s.outcome().is_none());
    assert!(!s.submitted());
    assert!(s.message().is_empty());
}

#[test]
fn missing_table_reports_data_not_loaded() {
    let tr = Translator::new("en");
    let config = Config::default();
    let mut s = ProjectionSession::new(valid_params(), Vec::new(), &config, tr.clone());
    s.submit().expect("submit");
    assert_eq!(s.message(), tr.t(keys::MATCH_DATA_NOT_LOADED));

    s.set_table(master());
    assert!(s.submit().expect("submit").aggregate().is_some());
}
