//! 스테이지/원수 선택값에 따른 필드 그룹 활성화.

use crate::params::{
    source_field, stage_field, FieldValue, ParameterSet, Rule, SourceField, StageField,
    MAX_SOURCES, MAX_STAGES,
};

/// 선택 필드 값을 1..=max 개수로 해석한다. 비었거나 잘못된 값은 1.
pub fn selector_count(value: Option<&FieldValue>, max: u8) -> u8 {
    let n = value.map(FieldValue::as_number).unwrap_or(0.0).trunc();
    if n < 1.0 {
        1
    } else {
        n.min(f64::from(max)) as u8
    }
}

/// 스테이지 그룹 활성 상태를 갱신한다.
///
/// 비활성화 시 검증 규칙을 비우고, 재활성화 시 스테이지별 규칙을 되살린다.
/// 값은 건드리지 않는다.
pub fn apply_stage_activation(params: &mut ParameterSet, stage_count: u8) {
    for stage in 2..=MAX_STAGES {
        let active = stage_count >= stage;
        for field in StageField::ALL {
            let rule = if active {
                field.active_rule(stage)
            } else {
                Rule::NONE
            };
            params.set_activation(&stage_field(field, stage), active, Some(rule));
        }
    }
}

/// 원수 그룹 활성 상태를 갱신한다. 비활성화된 그룹은 수량과 원수 종류를 초기값으로 되돌린다.
pub fn apply_source_activation(params: &mut ParameterSet, source_count: u8) {
    for index in 2..=MAX_SOURCES {
        let active = source_count >= index;
        for field in SourceField::all() {
            params.set_activation(&source_field(field, index), active, None);
        }
        if !active {
            params.reset_to_default(&source_field(SourceField::Quantity, index));
            params.reset_to_default(&source_field(SourceField::WaterSource, index));
        }
    }
}
