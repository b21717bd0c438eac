use crate::params::{names, ParameterSet};

pub const DEFAULT_FLOW_UNIT: &str = "m³/hr";
pub const DEFAULT_PRESSURE_UNIT: &str = "bar";
pub const DEFAULT_FLUX_UNIT: &str = "lmh";
pub const DEFAULT_TEMPERATURE_UNIT: &str = "°C";

/// 보고서/화면에 표시할 단위 문자열. 선택값을 그대로 복사한다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayUnits {
    pub flow: String,
    pub pressure: String,
    pub flux: String,
    pub temperature: String,
}

impl Default for DisplayUnits {
    fn default() -> Self {
        Self {
            flow: DEFAULT_FLOW_UNIT.to_string(),
            pressure: DEFAULT_PRESSURE_UNIT.to_string(),
            flux: DEFAULT_FLUX_UNIT.to_string(),
            temperature: DEFAULT_TEMPERATURE_UNIT.to_string(),
        }
    }
}

impl DisplayUnits {
    /// 단위 선택 필드를 그대로 옮긴다. 비어 있으면 차원별 기본 단위를 쓴다.
    pub fn echo(params: &ParameterSet) -> Self {
        let pick = |name: &str, fallback: &str| match params.value(name) {
            Some(v) if !v.is_falsy() => v.to_string(),
            _ => fallback.to_string(),
        };
        Self {
            flow: pick(names::FLOW_UNIT, DEFAULT_FLOW_UNIT),
            pressure: pick(names::PRESSURE_UNIT, DEFAULT_PRESSURE_UNIT),
            flux: pick(names::FLUX_UNIT, DEFAULT_FLUX_UNIT),
            temperature: pick(names::TEMPERATURE_UNIT, DEFAULT_TEMPERATURE_UNIT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_falls_back_to_default_unit() {
        let mut params = ParameterSet::new();
        params.set(names::PRESSURE_UNIT, "").unwrap();
        params.set(names::FLOW_UNIT, "gpm").unwrap();
        let units = DisplayUnits::echo(&params);
        assert_eq!(units.pressure, "bar");
        assert_eq!(units.flow, "gpm");
    }
}
