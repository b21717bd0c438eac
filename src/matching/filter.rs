//! 행 단위 허용오차 비교.

use super::header::ColumnResolution;
use super::{KeyParameter, KeyValue};
use crate::reference::{RawValue, ReferenceRow};

/// 부동소수 표현 오차 흡수용. `25.00` 과 `25.01` 의 차이가 0.01 을 살짝 넘는 경우가 있다.
const FLOAT_SLACK: f64 = 1e-9;

/// 셀 값이 키 값과 같은지 비교한다.
///
/// 숫자 키는 절대 허용오차 이내면 같다고 본다(셀이 숫자로 해석되지 않으면 불일치).
/// 문자열 키는 앞뒤 공백을 무시하고 대소문자 구분 없이 비교한다. 빈 셀은 항상 불일치.
pub fn value_matches(key: &KeyValue, cell: Option<&RawValue>, tolerance: f64) -> bool {
    let cell = match cell {
        Some(RawValue::Null) | None => return false,
        Some(c) => c,
    };
    match key {
        KeyValue::Number(expected) => match cell.as_number() {
            Some(actual) => (expected - actual).abs() <= tolerance + FLOAT_SLACK,
            None => false,
        },
        KeyValue::Text(expected) => {
            cell.to_string().trim().to_lowercase() == expected.trim().to_lowercase()
        }
    }
}

/// 모든 키가 연결된 열에서 일치하는 행인지.
pub fn row_matches(
    row: &ReferenceRow,
    keys: &[(&KeyParameter, &ColumnResolution)],
    tolerance: f64,
) -> bool {
    keys.iter()
        .all(|(key, res)| value_matches(&key.value, row.get(&res.column), tolerance))
}
