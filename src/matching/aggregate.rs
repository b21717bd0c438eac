use crate::numeric::round_to;
use crate::reference::{RawValue, ReferenceRow};

/// 여러 후보 행을 하나의 요약 행으로 합친다.
///
/// 첫 행의 열마다 비어 있지 않은 값을 모은다. 모두 숫자면 산술 평균(소수 넷째 자리 반올림),
/// 아니면 가장 많이 나온 문자열(동률이면 먼저 나온 값)을 쓴다. 모을 값이 없으면 빈 값.
pub fn aggregate_rows(rows: &[ReferenceRow]) -> ReferenceRow {
    let Some(first) = rows.first() else {
        return ReferenceRow::new();
    };
    first
        .columns()
        .map(|column| {
            let values: Vec<&RawValue> = rows
                .iter()
                .filter_map(|r| r.get(column))
                .filter(|v| !v.is_empty())
                .collect();
            (column.to_string(), summarize(&values))
        })
        .collect()
}

fn summarize(values: &[&RawValue]) -> RawValue {
    if values.is_empty() {
        return RawValue::Null;
    }
    let numbers: Option<Vec<f64>> = values.iter().map(|v| v.as_number()).collect();
    if let Some(numbers) = numbers {
        let mean = numbers.iter().sum::<f64>() / numbers.len() as f64;
        return RawValue::Number(round_to(mean, 4));
    }
    RawValue::Text(most_frequent(values))
}

fn most_frequent(values: &[&RawValue]) -> String {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for v in values {
        let s = v.to_string();
        match counts.iter_mut().find(|(k, _)| *k == s) {
            Some(entry) => entry.1 += 1,
            None => counts.push((s, 1)),
        }
    }
    let mut best: Option<&(String, usize)> = None;
    for entry in &counts {
        if best.map_or(true, |b| entry.1 > b.1) {
            best = Some(entry);
        }
    }
    best.map(|(s, _)| s.clone()).unwrap_or_default()
}
