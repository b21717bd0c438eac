//! 폼 입력에서 계산 필드를 다시 만드는 파생 엔진.
//!
//! `recompute`는 순수 함수다. 같은 입력에 대해 같은 결과를 내며, 결과를 다시 넣어도 바뀌지 않는다.

pub mod activation;
pub mod flow_balance;
pub mod ion_load;

pub use flow_balance::{flow_balance, FlowBalance};
pub use ion_load::MIXED_SOURCE_LABEL;

use crate::params::{names, FieldValue, ParameterSet};
use crate::units::DisplayUnits;

/// 단위 표시 → 유량 수지 → 스테이지 활성 → 원수 활성 → 혼합 수질 순으로 다시 계산한다.
pub fn recompute(params: &ParameterSet) -> ParameterSet {
    let mut next = params.clone();

    next.set_display_units(DisplayUnits::echo(&next));

    let flows = flow_balance(
        next.number(names::DESIRED_PERMEATE_FLOW),
        next.number(names::RECOVERY_PERCENT),
    );
    next.write_derived(names::FEED_FLOW, FieldValue::Number(flows.feed_flow));
    next.write_derived(
        names::CONCENTRATE_FLOW,
        FieldValue::Number(flows.concentrate_flow),
    );

    let stages = next.stage_count();
    activation::apply_stage_activation(&mut next, stages);

    let sources = next.source_count();
    activation::apply_source_activation(&mut next, sources);
    ion_load::apply_blended_ion_load(&mut next, sources);

    tracing::debug!(
        feed_flow = flows.feed_flow,
        concentrate_flow = flows.concentrate_flow,
        stages,
        sources,
        "recomputed derived fields"
    );
    next
}
