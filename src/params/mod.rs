//! 프로젝션 폼의 파라미터 집합.
//!
//! 폼 호스트가 보관하는 값/활성/검증 상태를 정적 필드 테이블 위에 표현한다.
//! 계산 필드(`FieldGroup::Derived`)는 파생 엔진만 쓸 수 있다.

pub mod schema;
pub mod validation;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::derivation::activation;
use crate::numeric;
use crate::units::DisplayUnits;

pub use schema::{
    blended_ion, names, source_field, stage_field, FieldGroup, FieldSpec, Ion, Rule, SourceField,
    StageField, MAX_SOURCES, MAX_STAGES,
};
pub use validation::{validate, ValidationIssue, ValidationProblem};

/// 필드 값. 폼 입력 그대로의 숫자/문자열/불리언.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Flag(bool),
    Text(String),
}

impl FieldValue {
    /// 숫자로 강제 변환한다. 변환할 수 없으면 0.
    pub fn as_number(&self) -> f64 {
        match self {
            FieldValue::Number(n) => numeric::finite_or_zero(*n),
            FieldValue::Flag(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            FieldValue::Text(s) => numeric::coerce_str(s),
        }
    }

    /// 숫자로 해석 가능한 경우에만 값을 돌려준다. 빈 문자열은 `None`.
    pub fn parse_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if n.is_finite() => Some(*n),
            FieldValue::Number(_) | FieldValue::Flag(_) => None,
            FieldValue::Text(s) => numeric::parse_str(s),
        }
    }

    /// 값이 비었는지(필수 검증 기준).
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Number(n) => n.is_nan(),
            FieldValue::Flag(_) => false,
            FieldValue::Text(s) => s.trim().is_empty(),
        }
    }

    /// 값이 비었거나 0/false 인지(JS falsy 판정과 같다).
    pub fn is_falsy(&self) -> bool {
        match self {
            FieldValue::Number(n) => *n == 0.0 || n.is_nan(),
            FieldValue::Flag(b) => !*b,
            FieldValue::Text(s) => s.is_empty(),
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Flag(b) => write!(f, "{b}"),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// 파라미터 조작 시 발생 가능한 오류.
#[derive(Debug)]
pub enum ParamError {
    /// 정의되지 않은 필드 이름
    UnknownField(String),
    /// 계산 필드에 대한 쓰기 시도
    ReadOnly(String),
    /// 파라미터 파일 파싱 오류
    Parse(toml::de::Error),
}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::UnknownField(name) => write!(f, "알 수 없는 필드: {name}"),
            ParamError::ReadOnly(name) => write!(f, "계산 필드는 직접 입력할 수 없습니다: {name}"),
            ParamError::Parse(e) => write!(f, "파라미터 파일 파싱 오류: {e}"),
        }
    }
}

impl std::error::Error for ParamError {}

impl From<toml::de::Error> for ParamError {
    fn from(value: toml::de::Error) -> Self {
        ParamError::Parse(value)
    }
}

/// 필드 하나의 현재 상태.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub group: FieldGroup,
    pub default: FieldValue,
    pub value: FieldValue,
    pub active: bool,
    pub rule: Rule,
}

impl From<FieldSpec> for Field {
    fn from(spec: FieldSpec) -> Self {
        let active = spec.initially_active();
        Self {
            name: spec.name,
            group: spec.group,
            value: spec.default.clone(),
            default: spec.default,
            active,
            rule: spec.rule,
        }
    }
}

/// 폼 전체 상태. 필드 순서는 `schema::field_specs` 선언 순서를 따른다.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    fields: Vec<Field>,
    display_units: DisplayUnits,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            fields: schema::field_specs().into_iter().map(Field::from).collect(),
            display_units: DisplayUnits::default(),
        }
    }
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// TOML 플랫 맵(`name = value`)을 기본값 위에 덮어쓴 파라미터 집합을 만든다.
    pub fn from_toml_str(src: &str) -> Result<Self, ParamError> {
        let overrides: BTreeMap<String, FieldValue> = toml::from_str(src)?;
        let mut params = Self::default();
        params.apply_overrides(overrides)?;
        Ok(params)
    }

    /// 여러 입력값을 한 번에 반영한다. 첫 오류에서 멈춘다.
    pub fn apply_overrides<I>(&mut self, values: I) -> Result<(), ParamError>
    where
        I: IntoIterator<Item = (String, FieldValue)>,
    {
        for (name, value) in values {
            self.set(&name, value)?;
        }
        Ok(())
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.field(name).map(|f| &f.value)
    }

    /// 숫자 값(강제 변환). 없는 필드는 0.
    pub fn number(&self, name: &str) -> f64 {
        self.value(name).map(FieldValue::as_number).unwrap_or(0.0)
    }

    /// 문자열 값. 없는 필드는 빈 문자열.
    pub fn text(&self, name: &str) -> String {
        self.value(name).map(|v| v.to_string()).unwrap_or_default()
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.field(name).is_some_and(|f| f.active)
    }

    /// 사용자 입력을 반영한다. 계산 필드와 정의되지 않은 이름은 거부한다.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<(), ParamError> {
        let field = self
            .field_mut(name)
            .ok_or_else(|| ParamError::UnknownField(name.to_string()))?;
        if field.group == FieldGroup::Derived {
            return Err(ParamError::ReadOnly(name.to_string()));
        }
        field.value = value.into();
        Ok(())
    }

    /// 비활성 필드를 포함한 전체 값 (폼의 raw value 읽기에 해당).
    pub fn raw_values(&self) -> Vec<(&str, &FieldValue)> {
        self.fields
            .iter()
            .map(|f| (f.name.as_str(), &f.value))
            .collect()
    }

    /// 현재 활성 필드 이름.
    pub fn active_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.active)
            .map(|f| f.name.as_str())
            .collect()
    }

    pub fn display_units(&self) -> &DisplayUnits {
        &self.display_units
    }

    /// 스테이지 선택값(1..=3).
    pub fn stage_count(&self) -> u8 {
        activation::selector_count(self.value(names::STAGE_COUNT), MAX_STAGES)
    }

    /// 원수 선택값(1..=3).
    pub fn source_count(&self) -> u8 {
        activation::selector_count(self.value(names::SOURCE_COUNT), MAX_SOURCES)
    }

    pub(crate) fn set_display_units(&mut self, units: DisplayUnits) {
        self.display_units = units;
    }

    pub(crate) fn write_derived(&mut self, name: &str, value: FieldValue) {
        if let Some(field) = self.field_mut(name) {
            debug_assert_eq!(field.group, FieldGroup::Derived);
            field.value = value;
        }
    }

    pub(crate) fn set_activation(&mut self, name: &str, active: bool, rule: Option<Rule>) {
        if let Some(field) = self.field_mut(name) {
            field.active = active;
            if let Some(rule) = rule {
                field.rule = rule;
            }
        }
    }

    pub(crate) fn reset_to_default(&mut self, name: &str) {
        if let Some(field) = self.field_mut(name) {
            field.value = field.default.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_fields_refuse_user_writes() {
        let mut params = ParameterSet::new();
        let err = params.set(names::FEED_FLOW, 12.0).unwrap_err();
        assert!(matches!(err, ParamError::ReadOnly(_)));
        assert!(matches!(
            params.set("no_such_field", 1.0),
            Err(ParamError::UnknownField(_))
        ));
    }

    #[test]
    fn toml_overrides_apply_on_defaults() {
        let params = ParameterSet::from_toml_str(
            "project_name = \"Plant A\"\nrecovery_percent = 75\nph_1 = \"7.2\"\n",
        )
        .expect("parse");
        assert_eq!(params.text(names::PROJECT_NAME), "Plant A");
        assert_eq!(params.number(names::RECOVERY_PERCENT), 75.0);
        assert_eq!(params.number("ph_1"), 7.2);
        assert_eq!(params.number(names::FOULING_FACTOR), 0.85);
    }

    #[test]
    fn coercion_degrades_to_zero() {
        assert_eq!(FieldValue::from("abc").as_number(), 0.0);
        assert_eq!(FieldValue::from("").as_number(), 0.0);
        assert_eq!(FieldValue::from(" 4.5 ").as_number(), 4.5);
        assert_eq!(FieldValue::Number(f64::NAN).as_number(), 0.0);
        assert_eq!(FieldValue::from(true).as_number(), 1.0);
    }
}
