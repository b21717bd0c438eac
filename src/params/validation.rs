//! 활성 필드의 필수/최소/최대 검증.

use super::{FieldValue, ParameterSet};

/// 제출 거부 시 보고하는 필드 이름 최대 개수.
pub const MAX_REPORTED_ISSUES: usize = 10;

/// 검증 실패 종류.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidationProblem {
    Required,
    BelowMin(f64),
    AboveMax(f64),
}

/// 검증에 실패한 필드 하나.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub name: String,
    pub value: FieldValue,
    pub problem: ValidationProblem,
}

/// 활성 필드를 선언 순서로 훑어 규칙 위반을 모두 돌려준다.
///
/// 숫자로 해석되지 않는 값은 최소/최대 검사를 통과한다(필수 검사만 빈 값을 거부한다).
pub fn validate(params: &ParameterSet) -> Vec<ValidationIssue> {
    params
        .fields()
        .filter(|f| f.active)
        .filter_map(|f| {
            let problem = check(&f.value, f.rule.required, f.rule.min, f.rule.max)?;
            Some(ValidationIssue {
                name: f.name.clone(),
                value: f.value.clone(),
                problem,
            })
        })
        .collect()
}

fn check(
    value: &FieldValue,
    required: bool,
    min: Option<f64>,
    max: Option<f64>,
) -> Option<ValidationProblem> {
    if value.is_blank() {
        return required.then_some(ValidationProblem::Required);
    }
    let n = value.parse_number()?;
    if let Some(lo) = min {
        if n < lo {
            return Some(ValidationProblem::BelowMin(lo));
        }
    }
    if let Some(hi) = max {
        if n > hi {
            return Some(ValidationProblem::AboveMax(hi));
        }
    }
    None
}

/// 보고용으로 앞쪽 실패 필드 이름만 잘라낸다.
pub fn reported_names(issues: &[ValidationIssue]) -> Vec<String> {
    issues
        .iter()
        .take(MAX_REPORTED_ISSUES)
        .map(|i| i.name.clone())
        .collect()
}
