//! 폼 호스트 세션.
//!
//! 파라미터 집합, 결과 테이블, 현재 검색 결과를 한 곳에서 소유한다. 입력이 들어오면 바로
//! 재계산하지 않고 디바운스 마감 시각만 갱신하며, 호스트가 `poll` 로 시간을 알려줄 때 실행한다.
//! 재계산은 몇 번을 호출해도 결과가 같으므로 `flush` 로 앞당겨도 된다.

use std::time::{Duration, Instant};

use crate::config::Config;
use crate::derivation::recompute;
use crate::i18n::{self, keys, Translator};
use crate::matching::{key_parameters, MatchOutcome, Matcher};
use crate::params::validation::reported_names;
use crate::params::{validate, FieldValue, ParamError, ParameterSet};
use crate::reference::ReferenceRow;

/// 제출 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitError {
    /// 검증 실패. 앞쪽 최대 10개 필드 이름.
    ValidationFailed(Vec<String>),
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::ValidationFailed(fields) => {
                write!(f, "입력값 검증 실패: {}", fields.join(", "))
            }
        }
    }
}

impl std::error::Error for SubmitError {}

/// 한 사용자 세션의 상태.
#[derive(Debug)]
pub struct ProjectionSession {
    params: ParameterSet,
    table: Vec<ReferenceRow>,
    matcher: Matcher,
    debounce: Duration,
    deadline: Option<Instant>,
    outcome: Option<MatchOutcome>,
    submitted: bool,
    message: String,
    tr: Translator,
}

impl ProjectionSession {
    /// 세션을 만들고 초기값으로 한 번 재계산한다.
    pub fn new(
        params: ParameterSet,
        table: Vec<ReferenceRow>,
        config: &Config,
        tr: Translator,
    ) -> Self {
        Self {
            params: recompute(&params),
            table,
            matcher: Matcher::new(config.match_tolerance),
            debounce: config.debounce(),
            deadline: None,
            outcome: None,
            submitted: false,
            message: String::new(),
            tr,
        }
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn table(&self) -> &[ReferenceRow] {
        &self.table
    }

    /// 결과 테이블을 교체한다(데이터 소스가 늦게 도착한 경우).
    pub fn set_table(&mut self, table: Vec<ReferenceRow>) {
        tracing::debug!(rows = table.len(), "reference table replaced");
        self.table = table;
    }

    pub fn outcome(&self) -> Option<&MatchOutcome> {
        self.outcome.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn submitted(&self) -> bool {
        self.submitted
    }

    /// 재계산 대기 중인지.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// 필드 값을 바꾸고 재계산 마감 시각을 `now + debounce` 로 다시 잡는다.
    pub fn edit(
        &mut self,
        name: &str,
        value: impl Into<FieldValue>,
        now: Instant,
    ) -> Result<(), ParamError> {
        self.params.set(name, value)?;
        self.deadline = Some(now + self.debounce);
        Ok(())
    }

    /// 마감 시각이 지났으면 재계산한다. 실행했으면 `true`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => self.flush(),
            _ => false,
        }
    }

    /// 대기 중인 재계산을 바로 실행한다. 대기 중이 아니면 아무것도 하지 않는다.
    pub fn flush(&mut self) -> bool {
        if self.deadline.take().is_none() {
            return false;
        }
        self.params = recompute(&self.params);
        true
    }

    /// 현재 입력으로 결과 테이블을 검색한다.
    ///
    /// 대기 중인 재계산을 먼저 반영하고, 활성 필드 검증에 실패하면 검색하지 않는다.
    pub fn submit(&mut self) -> Result<&MatchOutcome, SubmitError> {
        self.flush();
        self.submitted = true;
        self.outcome = None;
        self.message.clear();

        let issues = validate(&self.params);
        if !issues.is_empty() {
            let names = reported_names(&issues);
            tracing::warn!(invalid = issues.len(), ?names, "submission refused");
            self.message = i18n::fill_template(
                self.tr.t(keys::SUBMIT_INVALID_FIELDS),
                &[("fields", names.join(", "))],
            );
            return Err(SubmitError::ValidationFailed(names));
        }

        let key_params = key_parameters(&self.params);
        tracing::info!(?key_params, "searching reference table");
        let outcome = self.matcher.find_matches(&key_params, &self.table);
        self.message = outcome.describe(&self.tr);
        let outcome: &MatchOutcome = self.outcome.insert(outcome);
        Ok(outcome)
    }

    /// 여러 후보 중 `index`(0부터)를 확정한다. 범위를 벗어나면 아무것도 바꾸지 않는다.
    pub fn select_candidate(&mut self, index: usize) -> bool {
        let Some(outcome) = self.outcome.as_mut() else {
            return false;
        };
        if !outcome.select_candidate(index) {
            tracing::debug!(index, "candidate selection ignored");
            return false;
        }
        self.message = outcome.describe(&self.tr);
        true
    }

    /// 사용자가 결과를 지운다.
    pub fn clear_result(&mut self) {
        self.outcome = None;
        self.submitted = false;
        self.message.clear();
        tracing::debug!("result cleared");
    }

    /// 세션을 닫는다. 대기 중인 재계산은 실행하지 않고 버린다.
    pub fn close(self) -> ParameterSet {
        if self.deadline.is_some() {
            tracing::debug!("session closed with a pending recompute; discarded");
        }
        self.params
    }
}
