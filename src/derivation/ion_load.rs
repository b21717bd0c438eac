//! 원수 혼합 수질(이온 부하) 계산.

use crate::params::{blended_ion, names, source_field, FieldValue, Ion, ParameterSet, SourceField};

/// 여러 원수가 섞일 때 원수 종류 표기.
pub const MIXED_SOURCE_LABEL: &str = "Mixed";

/// 혼합 대상이 되는 (원수 필드, 계산 필드) 쌍. 이온 전체 + 온도 + pH.
fn blended_pairs() -> Vec<(SourceField, String)> {
    Ion::ALL
        .into_iter()
        .map(|ion| (SourceField::Ion(ion), blended_ion(ion)))
        .chain([
            (SourceField::Temperature, names::BLENDED_TEMPERATURE.to_string()),
            (SourceField::Ph, names::BLENDED_PH.to_string()),
        ])
        .collect()
}

/// 원수 개수에 따라 혼합 수질 필드를 갱신한다.
///
/// - 1개: 1번 원수 값을 그대로 복사한다.
/// - 2개 이상: 활성 원수의 수량 가중 평균. 총 수량이 0이면 기존 값을 유지한다.
///   SDI 는 최대값, 원수 종류는 항상 `Mixed`.
///
/// pH 도 선형 가중 평균으로 처리한다.
pub fn apply_blended_ion_load(params: &mut ParameterSet, source_count: u8) {
    if source_count <= 1 {
        copy_primary_source(params);
    } else {
        blend_sources(params, source_count);
    }
}

fn copy_primary_source(params: &mut ParameterSet) {
    let copy = |params: &mut ParameterSet, from: SourceField, to: &str| {
        let value = params
            .value(&source_field(from, 1))
            .cloned()
            .unwrap_or(FieldValue::Number(0.0));
        params.write_derived(to, value);
    };
    for (field, target) in blended_pairs() {
        copy(params, field, &target);
    }
    copy(params, SourceField::Sdi, names::BLENDED_SDI);
    copy(params, SourceField::WaterSource, names::BLENDED_WATER_SOURCE);
}

fn blend_sources(params: &mut ParameterSet, source_count: u8) {
    let sources: Vec<u8> = (1..=source_count).collect();
    let quantities: Vec<f64> = sources
        .iter()
        .map(|&i| params.number(&source_field(SourceField::Quantity, i)))
        .collect();
    let total: f64 = quantities.iter().sum();
    if total <= 0.0 {
        tracing::debug!(source_count, "total source quantity is zero; blended load unchanged");
        return;
    }

    for (field, target) in blended_pairs() {
        let weighted: f64 = sources
            .iter()
            .zip(&quantities)
            .map(|(&i, q)| params.number(&source_field(field, i)) * q)
            .sum();
        params.write_derived(&target, FieldValue::Number(weighted / total));
    }

    let sdi = sources
        .iter()
        .map(|&i| params.number(&source_field(SourceField::Sdi, i)))
        .fold(f64::NEG_INFINITY, f64::max);
    params.write_derived(names::BLENDED_SDI, FieldValue::Number(sdi));
    params.write_derived(names::BLENDED_WATER_SOURCE, FieldValue::from(MIXED_SOURCE_LABEL));
}
