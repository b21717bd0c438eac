//! 숫자 강제 변환/반올림 헬퍼.

/// 소수점 `places` 자리로 반올림한다.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// NaN/무한대는 0으로 바꾼다.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// 앞뒤 공백을 제거한 문자열을 유한한 숫자로 해석한다. 빈 문자열은 `None`.
pub fn parse_str(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// 문자열을 숫자로 강제 변환한다. 실패하면 0.
pub fn coerce_str(s: &str) -> f64 {
    parse_str(s).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_two_places() {
        assert_eq!(round_to(13.333_333, 2), 13.33);
        assert_eq!(round_to(3.336, 2), 3.34);
        assert_eq!(round_to(10.0025, 4), 10.0025);
    }

    #[test]
    fn parse_rejects_non_finite_words() {
        assert_eq!(parse_str("inf"), None);
        assert_eq!(parse_str("NaN"), None);
        assert_eq!(parse_str("  "), None);
        assert_eq!(parse_str("1e3"), Some(1000.0));
    }
}
