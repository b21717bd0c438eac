//! 터미널 출력. 계산/검색 결과를 읽기 전용으로 보여준다.

use crate::i18n::{self, keys, Translator};
use crate::matching::{key_parameters, KeyValue, MatchOutcome, ResolutionTier};
use crate::params::{blended_ion, names, FieldValue, Ion, ParameterSet};
use crate::reference::ReferenceRow;

/// 계산 필드(유량 수지, 활성 그룹, 혼합 수질)를 출력한다.
pub fn print_derived(tr: &Translator, params: &ParameterSet) {
    let units = params.display_units();
    println!("{}", tr.t(keys::REPORT_DERIVED_HEADING));
    println!(
        "{} {} / {} / {} / {}",
        tr.t(keys::REPORT_UNITS),
        units.flow,
        units.pressure,
        units.flux,
        units.temperature
    );
    println!(
        "{} {:.2} {}",
        tr.t(keys::REPORT_FEED_FLOW),
        params.number(names::FEED_FLOW),
        units.flow
    );
    println!(
        "{} {:.2} {}",
        tr.t(keys::REPORT_CONCENTRATE_FLOW),
        params.number(names::CONCENTRATE_FLOW),
        units.flow
    );
    println!("{} {}", tr.t(keys::REPORT_STAGES), params.stage_count());
    println!("{} {}", tr.t(keys::REPORT_SOURCES), params.source_count());

    println!("{}", tr.t(keys::REPORT_ION_LOAD_HEADING));
    for ion in Ion::ALL {
        print_value(ion.label(), params.value(&blended_ion(ion)));
    }
    print_value(
        &format!("Temperature ({})", units.temperature),
        params.value(names::BLENDED_TEMPERATURE),
    );
    print_value("pH", params.value(names::BLENDED_PH));
    print_value("SDI", params.value(names::BLENDED_SDI));
    print_value("Water source", params.value(names::BLENDED_WATER_SOURCE));
}

fn print_value(label: &str, value: Option<&FieldValue>) {
    match value {
        Some(FieldValue::Number(n)) => println!("  {label:<16} {n:.2}"),
        Some(other) => println!("  {label:<16} {other}"),
        None => println!("  {label:<16} -"),
    }
}

/// 검색에 쓰이는 키 값을 출력한다.
pub fn print_keys(tr: &Translator, params: &ParameterSet) {
    println!("{}", tr.t(keys::REPORT_KEYS_HEADING));
    for key in key_parameters(params) {
        match key.value {
            KeyValue::Number(n) => println!("  {:<24} {n:.2}", key.name),
            KeyValue::Text(s) => println!("  {:<24} {s}", key.name),
        }
    }
}

/// 검색 결과와 진단 문구를 출력한다.
pub fn print_outcome(tr: &Translator, outcome: &MatchOutcome, message: &str) {
    println!("{}", tr.t(keys::REPORT_RESULT_HEADING));
    println!("{message}");
    match outcome {
        MatchOutcome::NoMatch(_) => {}
        MatchOutcome::SingleMatch(row) => print_row(row),
        MatchOutcome::MultipleMatches { rows, aggregate } => {
            for (i, row) in rows.iter().enumerate() {
                println!("\n[{} {i}]", tr.t(keys::REPORT_CANDIDATE));
                print_row(row);
            }
            println!("\n[{}]", tr.t(keys::REPORT_AGGREGATE));
            print_row(aggregate);
            println!("\n{}", tr.t(keys::REPORT_SELECT_HINT));
        }
    }
}

fn print_row(row: &ReferenceRow) {
    for (column, value) in row.cells() {
        println!("  {column}: {value}");
    }
}

pub fn print_submit_refused(tr: &Translator, message: &str) {
    println!("{}", tr.t(keys::SUBMIT_INVALID));
    println!("{message}");
}

/// 후보 선택 결과. 범위를 벗어난 번호는 결과를 바꾸지 않는다.
pub fn print_selection(tr: &Translator, index: usize, accepted: bool) {
    let key = if accepted {
        keys::MATCH_SELECTED
    } else {
        keys::MATCH_INVALID_SELECTION
    };
    println!("{}", i18n::fill_template(tr.t(key), &[("index", index.to_string())]));
}

pub fn print_header_heading(tr: &Translator) {
    println!("{}", tr.t(keys::REPORT_HEADERS_HEADING));
}

pub fn print_header_resolution(
    tr: &Translator,
    key: &str,
    resolution: Option<(&str, ResolutionTier)>,
) {
    match resolution {
        Some((column, tier)) => println!("  {key:<24} -> {column} ({tier:?})"),
        None => println!("  {key:<24} -> {}", tr.t(keys::REPORT_HEADER_MISSING)),
    }
}
