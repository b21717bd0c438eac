use crate::i18n::{self, keys, Translator};
use crate::reference::ReferenceRow;

/// 일치하는 행이 없을 때의 사유.
#[derive(Debug, Clone, PartialEq)]
pub enum NoMatchReason {
    /// 결과 테이블이 비어 있음(아직 로드되지 않음)
    DataNotLoaded,
    /// 헤더를 찾지 못한 키 이름 목록
    UnresolvedColumns(Vec<String>),
    /// 검색했지만 모든 키를 동시에 만족하는 행이 없음
    NoRowMatched(Vec<KeyPresence>),
}

/// 키 값 하나가 연결된 열 어딘가에 존재하는지(진단용).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPresence {
    pub key: String,
    pub column: String,
    pub found_in_column: bool,
}

impl NoMatchReason {
    /// 키 값들이 각각은 테이블에 있으나 한 행에 함께 있지 않은 경우.
    pub fn inputs_exist_individually(&self) -> bool {
        match self {
            NoMatchReason::NoRowMatched(presence) => presence.iter().all(|p| p.found_in_column),
            _ => false,
        }
    }

    /// 테이블 어디에도 없는 키 이름.
    pub fn absent_keys(&self) -> Vec<&str> {
        match self {
            NoMatchReason::NoRowMatched(presence) => presence
                .iter()
                .filter(|p| !p.found_in_column)
                .map(|p| p.key.as_str())
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// 검색 결과. 제출할 때마다 새로 만들어진다.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    NoMatch(NoMatchReason),
    SingleMatch(ReferenceRow),
    /// 후보 행과 평균 요약 행. 요약 행은 자동 선택되지 않는다.
    MultipleMatches {
        rows: Vec<ReferenceRow>,
        aggregate: ReferenceRow,
    },
}

impl MatchOutcome {
    /// 확정된 결과 행.
    pub fn selected(&self) -> Option<&ReferenceRow> {
        match self {
            MatchOutcome::SingleMatch(row) => Some(row),
            _ => None,
        }
    }

    /// 선택 대기 중인 후보 목록.
    pub fn candidates(&self) -> &[ReferenceRow] {
        match self {
            MatchOutcome::MultipleMatches { rows, .. } => rows,
            _ => &[],
        }
    }

    pub fn aggregate(&self) -> Option<&ReferenceRow> {
        match self {
            MatchOutcome::MultipleMatches { aggregate, .. } => Some(aggregate),
            _ => None,
        }
    }

    /// 후보 `index`(0부터)를 확정한다. 후보 목록과 요약 행은 버린다.
    /// 후보 상태가 아니거나 범위를 벗어나면 아무것도 바꾸지 않고 `false`.
    pub fn select_candidate(&mut self, index: usize) -> bool {
        let row = match self {
            MatchOutcome::MultipleMatches { rows, .. } if index < rows.len() => {
                rows.swap_remove(index)
            }
            _ => return false,
        };
        *self = MatchOutcome::SingleMatch(row);
        true
    }

    /// 화면/로그에 보여줄 진단 문구.
    pub fn describe(&self, tr: &Translator) -> String {
        match self {
            MatchOutcome::NoMatch(NoMatchReason::DataNotLoaded) => {
                tr.t(keys::MATCH_DATA_NOT_LOADED).to_string()
            }
            MatchOutcome::NoMatch(NoMatchReason::UnresolvedColumns(missing)) => i18n::fill_template(
                tr.t(keys::MATCH_UNRESOLVED_COLUMNS),
                &[("keys", missing.join(", "))],
            ),
            MatchOutcome::NoMatch(reason) if reason.inputs_exist_individually() => {
                tr.t(keys::MATCH_NOT_JOINTLY).to_string()
            }
            MatchOutcome::NoMatch(reason) => i18n::fill_template(
                tr.t(keys::MATCH_VALUES_ABSENT),
                &[("keys", reason.absent_keys().join(", "))],
            ),
            MatchOutcome::SingleMatch(_) => tr.t(keys::MATCH_FOUND).to_string(),
            MatchOutcome::MultipleMatches { rows, .. } => i18n::fill_template(
                tr.t(keys::MATCH_MULTIPLE),
                &[("count", rows.len().to_string())],
            ),
        }
    }
}
