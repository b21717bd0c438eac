//! 입력 키 파라미터로 결과 테이블에서 프로젝션 행을 찾는다.
//!
//! 흐름: 빈 테이블 확인 → 키 이름을 헤더에 연결 → 허용오차 비교로 행 필터 → 결과 분류.
//! 어떤 단계도 실패로 끝나지 않으며, 항상 `MatchOutcome` 중 하나를 돌려준다.

pub mod aggregate;
pub mod filter;
pub mod header;
pub mod outcome;

pub use aggregate::aggregate_rows;
pub use header::{normalize, resolve_column, tokenize, ColumnResolution, ResolutionTier};
pub use outcome::{KeyPresence, MatchOutcome, NoMatchReason};

use crate::numeric::round_to;
use crate::params::{names, source_field, ParameterSet, SourceField};
use crate::reference::ReferenceRow;

/// 숫자 비교 기본 허용오차(절대값).
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// 검색 키 이름.
pub mod key_names {
    pub const FEED_FLOW: &str = "Feed Flow (m³/hr)";
    pub const RECOVERY: &str = "Recovery (%)";
    pub const FEED_TEMPERATURE: &str = "Feed Temperature (°C)";
    pub const FEED_PH: &str = "Feed pH";
}

/// 키 값. 숫자는 허용오차 비교, 문자열은 대소문자 무시 비교.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyValue {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyParameter {
    pub name: String,
    pub value: KeyValue,
}

impl KeyParameter {
    pub fn number(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            value: KeyValue::Number(value),
        }
    }

    pub fn text(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: KeyValue::Text(value.to_string()),
        }
    }
}

/// 현재 파라미터에서 검색 키 4개(공급 유량, 회수율, 1번 원수 온도/pH)를 만든다.
/// 모두 소수 둘째 자리로 반올림한다.
pub fn key_parameters(params: &ParameterSet) -> Vec<KeyParameter> {
    let rounded = |v: f64| round_to(v, 2);
    vec![
        KeyParameter::number(key_names::FEED_FLOW, rounded(params.number(names::FEED_FLOW))),
        KeyParameter::number(
            key_names::RECOVERY,
            rounded(params.number(names::RECOVERY_PERCENT)),
        ),
        KeyParameter::number(
            key_names::FEED_TEMPERATURE,
            rounded(params.number(&source_field(SourceField::Temperature, 1))),
        ),
        KeyParameter::number(
            key_names::FEED_PH,
            rounded(params.number(&source_field(SourceField::Ph, 1))),
        ),
    ]
}

/// 결과 테이블 검색기.
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    tolerance: f64,
}

impl Default for Matcher {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl Matcher {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.abs(),
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// 키 파라미터로 테이블을 검색한다.
    pub fn find_matches(&self, keys: &[KeyParameter], table: &[ReferenceRow]) -> MatchOutcome {
        if table.is_empty() {
            tracing::warn!("reference table is empty; search skipped");
            return MatchOutcome::NoMatch(NoMatchReason::DataNotLoaded);
        }

        let headers = header::table_headers(table);
        let (resolved, missing) =
            header::resolve_columns(keys.iter().map(|k| k.name.as_str()), &headers);
        if !missing.is_empty() {
            tracing::warn!(?missing, "key parameters without a matching column");
            return MatchOutcome::NoMatch(NoMatchReason::UnresolvedColumns(missing));
        }
        for r in &resolved {
            tracing::debug!(key = %r.key, column = %r.column, tier = ?r.tier, "resolved column");
        }

        let pairs: Vec<(&KeyParameter, &ColumnResolution)> = keys.iter().zip(&resolved).collect();
        let matches: Vec<ReferenceRow> = table
            .iter()
            .filter(|row| filter::row_matches(row, &pairs, self.tolerance))
            .cloned()
            .collect();
        tracing::info!(rows = table.len(), matches = matches.len(), "reference search finished");

        match matches.len() {
            0 => MatchOutcome::NoMatch(NoMatchReason::NoRowMatched(self.presence(&pairs, table))),
            1 => {
                let mut matches = matches;
                MatchOutcome::SingleMatch(matches.remove(0))
            }
            _ => {
                let aggregate = aggregate_rows(&matches);
                MatchOutcome::MultipleMatches {
                    rows: matches,
                    aggregate,
                }
            }
        }
    }

    fn presence(
        &self,
        pairs: &[(&KeyParameter, &ColumnResolution)],
        table: &[ReferenceRow],
    ) -> Vec<KeyPresence> {
        pairs
            .iter()
            .map(|(key, res)| KeyPresence {
                key: key.name.clone(),
                column: res.column.clone(),
                found_in_column: table.iter().any(|row| {
                    filter::value_matches(&key.value, row.get(&res.column), self.tolerance)
                }),
            })
            .collect()
    }
}

/// 기본 허용오차로 검색한다.
pub fn find_matches(keys: &[KeyParameter], table: &[ReferenceRow]) -> MatchOutcome {
    Matcher::default().find_matches(keys, table)
}
