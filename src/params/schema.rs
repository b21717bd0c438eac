//! 파라미터 필드 정의 테이블.
//!
//! 폼의 모든 입력/계산 필드를 정적으로 나열한다. 이름은 `names` 상수 또는
//! `source_field`/`stage_field` 헬퍼로 생성하며, 선언 순서가 곧 검증 보고 순서다.

use super::FieldValue;

/// 처리 스테이지 최대 개수.
pub const MAX_STAGES: u8 = 3;
/// 원수(water source) 최대 개수.
pub const MAX_SOURCES: u8 = 3;

/// 필드가 속한 그룹.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldGroup {
    /// 프로젝트 공통 입력
    Global,
    /// 엔진이 계산하는 읽기 전용 필드
    Derived,
    /// 원수별 입력 (1..=3)
    Source(u8),
    /// 스테이지별 입력 (1..=3)
    Stage(u8),
}

/// 필드 검증 규칙. 활성 필드에만 적용된다.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rule {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Rule {
    pub const NONE: Rule = Rule {
        required: false,
        min: None,
        max: None,
    };

    pub const fn required() -> Self {
        Rule {
            required: true,
            min: None,
            max: None,
        }
    }

    pub const fn min(min: f64) -> Self {
        Rule {
            required: false,
            min: Some(min),
            max: None,
        }
    }

    pub const fn required_range(min: f64, max: Option<f64>) -> Self {
        Rule {
            required: true,
            min: Some(min),
            max,
        }
    }

    pub const fn range(min: f64, max: f64) -> Self {
        Rule {
            required: false,
            min: Some(min),
            max: Some(max),
        }
    }
}

/// 공통/계산 필드 이름.
pub mod names {
    pub const PROJECT_NAME: &str = "project_name";
    pub const DESIGNER_NAME: &str = "designer_name";
    pub const FLOW_UNIT: &str = "flow_unit";
    pub const PRESSURE_UNIT: &str = "pressure_unit";
    pub const FLUX_UNIT: &str = "flux_unit";
    pub const TEMPERATURE_UNIT: &str = "temperature_unit";
    pub const DESIRED_PERMEATE_FLOW: &str = "desired_permeate_flow";
    pub const RECOVERY_PERCENT: &str = "recovery_percent";
    pub const DOSING_CHEMICAL: &str = "dosing_chemical";
    pub const STAGE_COUNT: &str = "stage_count";
    pub const SOURCE_COUNT: &str = "source_count";
    pub const MEMBRANE_TYPE: &str = "membrane_type";
    pub const FEED_INLET_PRESSURE: &str = "feed_inlet_pressure";
    pub const FOULING_FACTOR: &str = "fouling_factor";

    pub const FEED_FLOW: &str = "feed_flow";
    pub const CONCENTRATE_FLOW: &str = "concentrate_flow";
    pub const BLENDED_TEMPERATURE: &str = "blended_temperature";
    pub const BLENDED_PH: &str = "blended_ph";
    pub const BLENDED_SDI: &str = "blended_sdi";
    pub const BLENDED_WATER_SOURCE: &str = "blended_water_source";
}

/// 원수 분석 항목(이온 농도).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ion {
    SodiumMgL,
    SodiumCaCO3,
    CalciumMgL,
    CalciumCaCO3,
    Magnesium,
    Potassium,
    Ammonium,
    Barium,
    Strontium,
    Iron,
    Bicarbonate,
    Chloride,
    Sulphate,
    Nitrate,
    Silica,
    Fluoride,
    Boron,
    Phosphate,
}

impl Ion {
    pub const ALL: [Ion; 18] = [
        Ion::SodiumMgL,
        Ion::SodiumCaCO3,
        Ion::CalciumMgL,
        Ion::CalciumCaCO3,
        Ion::Magnesium,
        Ion::Potassium,
        Ion::Ammonium,
        Ion::Barium,
        Ion::Strontium,
        Ion::Iron,
        Ion::Bicarbonate,
        Ion::Chloride,
        Ion::Sulphate,
        Ion::Nitrate,
        Ion::Silica,
        Ion::Fluoride,
        Ion::Boron,
        Ion::Phosphate,
    ];

    /// 필드 이름에 쓰이는 키.
    pub fn key(self) -> &'static str {
        match self {
            Ion::SodiumMgL => "sodium_mgl",
            Ion::SodiumCaCO3 => "sodium_caco3",
            Ion::CalciumMgL => "calcium_mgl",
            Ion::CalciumCaCO3 => "calcium_caco3",
            Ion::Magnesium => "magnesium_mgl",
            Ion::Potassium => "potassium_mgl",
            Ion::Ammonium => "ammonium_mgl",
            Ion::Barium => "barium_mgl",
            Ion::Strontium => "strontium_mgl",
            Ion::Iron => "iron_mgl",
            Ion::Bicarbonate => "bicarbonate_mgl",
            Ion::Chloride => "chloride_mgl",
            Ion::Sulphate => "sulphate_mgl",
            Ion::Nitrate => "nitrate_mgl",
            Ion::Silica => "silica_mgl",
            Ion::Fluoride => "fluoride_mgl",
            Ion::Boron => "boron_mgl",
            Ion::Phosphate => "phosphate_mgl",
        }
    }

    /// 보고서용 표기.
    pub fn label(self) -> &'static str {
        match self {
            Ion::SodiumMgL => "Na (mg/l)",
            Ion::SodiumCaCO3 => "Na (as CaCO3)",
            Ion::CalciumMgL => "Ca (mg/l)",
            Ion::CalciumCaCO3 => "Ca (as CaCO3)",
            Ion::Magnesium => "Mg",
            Ion::Potassium => "K",
            Ion::Ammonium => "NH4",
            Ion::Barium => "Ba",
            Ion::Strontium => "Sr",
            Ion::Iron => "Fe",
            Ion::Bicarbonate => "HCO3",
            Ion::Chloride => "Cl",
            Ion::Sulphate => "SO4",
            Ion::Nitrate => "NO3",
            Ion::Silica => "SiO2",
            Ion::Fluoride => "F",
            Ion::Boron => "B",
            Ion::Phosphate => "PO4",
        }
    }
}

/// 원수 그룹에 반복되는 필드.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceField {
    WaterSource,
    Sdi,
    Temperature,
    Ph,
    Quantity,
    Ion(Ion),
}

impl SourceField {
    fn stem(self) -> &'static str {
        match self {
            SourceField::WaterSource => "water_source",
            SourceField::Sdi => "sdi",
            SourceField::Temperature => "temperature",
            SourceField::Ph => "ph",
            SourceField::Quantity => "quantity",
            SourceField::Ion(ion) => ion.key(),
        }
    }

    /// 원수 그룹의 모든 필드를 선언 순서대로 돌려준다.
    pub fn all() -> impl Iterator<Item = SourceField> {
        [
            SourceField::WaterSource,
            SourceField::Sdi,
            SourceField::Temperature,
            SourceField::Ph,
            SourceField::Quantity,
        ]
        .into_iter()
        .chain(Ion::ALL.into_iter().map(SourceField::Ion))
    }
}

/// 스테이지 그룹에 반복되는 필드.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageField {
    PressureVessels,
    ElementsPerVessel,
    BoostPressure,
    ForcedBackPressure,
}

impl StageField {
    pub const ALL: [StageField; 4] = [
        StageField::PressureVessels,
        StageField::ElementsPerVessel,
        StageField::BoostPressure,
        StageField::ForcedBackPressure,
    ];

    fn stem(self) -> &'static str {
        match self {
            StageField::PressureVessels => "pressure_vessels",
            StageField::ElementsPerVessel => "elements_per_vessel",
            StageField::BoostPressure => "boost_pressure",
            StageField::ForcedBackPressure => "forced_back_pressure",
        }
    }

    /// 활성 상태일 때의 검증 규칙. 베셀당 엘리먼트 수만 필수(1~8)이고 나머지는 0 이상이다.
    /// 1단 베셀 수는 항상 필수.
    pub fn active_rule(self, stage: u8) -> Rule {
        match self {
            StageField::ElementsPerVessel => Rule::required_range(1.0, Some(8.0)),
            StageField::PressureVessels if stage == 1 => Rule::required_range(0.0, None),
            _ => Rule::min(0.0),
        }
    }
}

/// 원수 i 의 필드 이름 (예: `sodium_mgl_2`).
pub fn source_field(field: SourceField, index: u8) -> String {
    format!("{}_{index}", field.stem())
}

/// 스테이지 s 의 필드 이름 (예: `elements_per_vessel_stage_3`).
pub fn stage_field(field: StageField, stage: u8) -> String {
    format!("{}_stage_{stage}", field.stem())
}

/// 혼합 이온 농도 필드 이름 (예: `blended_calcium_mgl`).
pub fn blended_ion(ion: Ion) -> String {
    format!("blended_{}", ion.key())
}

/// 필드 하나의 정적 정의.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub group: FieldGroup,
    pub default: FieldValue,
    pub rule: Rule,
}

impl FieldSpec {
    fn new(name: impl Into<String>, group: FieldGroup, default: FieldValue, rule: Rule) -> Self {
        Self {
            name: name.into(),
            group,
            default,
            rule,
        }
    }

    /// 초기 활성 여부. 1번 원수/1단 스테이지 외의 반복 그룹은 비활성으로 시작한다.
    pub fn initially_active(&self) -> bool {
        match self.group {
            FieldGroup::Global | FieldGroup::Derived => true,
            FieldGroup::Source(i) | FieldGroup::Stage(i) => i == 1,
        }
    }
}

fn global_specs() -> Vec<FieldSpec> {
    use names::*;
    let g = FieldGroup::Global;
    vec![
        FieldSpec::new(PROJECT_NAME, g, "".into(), Rule::required()),
        FieldSpec::new(DESIGNER_NAME, g, "".into(), Rule::required()),
        FieldSpec::new(FLOW_UNIT, g, "m³/hr".into(), Rule::required()),
        FieldSpec::new(PRESSURE_UNIT, g, "bar".into(), Rule::required()),
        FieldSpec::new(FLUX_UNIT, g, "lmh".into(), Rule::required()),
        FieldSpec::new(TEMPERATURE_UNIT, g, "°C".into(), Rule::required()),
        FieldSpec::new(
            DESIRED_PERMEATE_FLOW,
            g,
            0.0.into(),
            Rule::required_range(0.0, None),
        ),
        FieldSpec::new(
            RECOVERY_PERCENT,
            g,
            0.0.into(),
            Rule::required_range(0.0, Some(100.0)),
        ),
        FieldSpec::new(DOSING_CHEMICAL, g, "No".into(), Rule::NONE),
        FieldSpec::new(STAGE_COUNT, g, 1.0.into(), Rule::required()),
        FieldSpec::new(SOURCE_COUNT, g, 1.0.into(), Rule::required()),
        FieldSpec::new(MEMBRANE_TYPE, g, "".into(), Rule::required()),
        FieldSpec::new(FEED_INLET_PRESSURE, g, 0.0.into(), Rule::min(0.0)),
        FieldSpec::new(
            FOULING_FACTOR,
            g,
            0.85.into(),
            Rule::required_range(0.0, Some(1.0)),
        ),
    ]
}

fn derived_specs() -> Vec<FieldSpec> {
    use names::*;
    let d = FieldGroup::Derived;
    let mut specs = vec![
        FieldSpec::new(FEED_FLOW, d, 0.0.into(), Rule::NONE),
        FieldSpec::new(CONCENTRATE_FLOW, d, 0.0.into(), Rule::NONE),
    ];
    specs.extend(
        Ion::ALL
            .into_iter()
            .map(|ion| FieldSpec::new(blended_ion(ion), d, 0.0.into(), Rule::NONE)),
    );
    specs.push(FieldSpec::new(BLENDED_TEMPERATURE, d, 25.0.into(), Rule::NONE));
    specs.push(FieldSpec::new(BLENDED_PH, d, 7.5.into(), Rule::NONE));
    specs.push(FieldSpec::new(BLENDED_SDI, d, "".into(), Rule::NONE));
    specs.push(FieldSpec::new(BLENDED_WATER_SOURCE, d, "".into(), Rule::NONE));
    specs
}

fn source_specs(index: u8) -> Vec<FieldSpec> {
    let group = FieldGroup::Source(index);
    let primary = index == 1;
    SourceField::all()
        .map(|field| {
            let (default, rule): (FieldValue, Rule) = match field {
                SourceField::WaterSource | SourceField::Sdi => (
                    "".into(),
                    if primary { Rule::required() } else { Rule::NONE },
                ),
                SourceField::Temperature => (25.0.into(), Rule::required_range(0.0, None)),
                SourceField::Ph => (7.5.into(), Rule::required_range(0.0, Some(14.0))),
                SourceField::Quantity => (
                    FieldValue::from(if primary { 100.0 } else { 0.0 }),
                    Rule::required_range(0.0, None),
                ),
                SourceField::Ion(_) => (0.0.into(), Rule::min(0.0)),
            };
            FieldSpec::new(source_field(field, index), group, default, rule)
        })
        .collect()
}

fn stage_specs(stage: u8) -> Vec<FieldSpec> {
    let group = FieldGroup::Stage(stage);
    StageField::ALL
        .into_iter()
        .map(|field| {
            // 2/3단은 비활성으로 시작하므로 규칙도 비워 둔다.
            let rule = if stage == 1 {
                field.active_rule(stage)
            } else {
                Rule::NONE
            };
            FieldSpec::new(stage_field(field, stage), group, 0.0.into(), rule)
        })
        .collect()
}

/// 전체 필드 정의를 선언 순서대로 생성한다.
pub fn field_specs() -> Vec<FieldSpec> {
    let mut specs = global_specs();
    specs.extend(derived_specs());
    for index in 1..=MAX_SOURCES {
        specs.extend(source_specs(index));
    }
    for stage in 1..=MAX_STAGES {
        specs.extend(stage_specs(stage));
    }
    specs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn field_names_are_unique() {
        let specs = field_specs();
        let unique: HashSet<_> = specs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(unique.len(), specs.len());
    }

    #[test]
    fn stage_field_names_follow_pattern() {
        assert_eq!(
            stage_field(StageField::ElementsPerVessel, 2),
            "elements_per_vessel_stage_2"
        );
        assert_eq!(source_field(SourceField::Ion(Ion::Boron), 3), "boron_mgl_3");
    }
}
