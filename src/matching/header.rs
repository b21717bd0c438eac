//! 키 파라미터 이름 ↔ CSV 헤더 연결.
//!
//! 헤더는 대소문자, 괄호/기호, `m³`/`m3` 같은 표기가 제각각이다. 정규화 문자열이 같으면 바로
//! 연결하고, 아니면 단어 토큰 집합의 포함 관계(상위 집합 → 부분 집합 순)로 찾는다.

use std::collections::BTreeSet;

use crate::reference::ReferenceRow;

/// 헤더 연결 단계. 앞선 단계가 우선한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ResolutionTier {
    /// 정규화 문자열 일치
    Exact,
    /// 헤더 토큰이 키 토큰을 모두 포함
    Superset,
    /// 헤더 토큰이 모두 키 토큰에 포함
    Subset,
}

/// 키 하나의 헤더 연결 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnResolution {
    pub key: String,
    pub column: String,
    pub tier: ResolutionTier,
}

fn substitute_symbols(s: &str) -> String {
    s.replace('³', "3")
        .replace('°', "")
        .replace(['µ', 'μ'], "u")
}

/// 기호를 치환하고 ASCII 영숫자만 남겨 소문자로 만든다.
///
/// `"Feed Flow (m³/hr)"` → `"feedflowm3hr"`
pub fn normalize(s: &str) -> String {
    substitute_symbols(s)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// 정규화 전에 단어 단위로 나눈 뒤 각 단어를 정규화한 토큰 집합.
///
/// 영숫자가 아닌 문자와, 소문자/숫자 뒤에서 시작하는 대문자 단어(`FeedFlow`, `M3Hr`)가
/// 경계가 된다. 대문자 뒤에 소문자/숫자가 오지 않으면 끊지 않으므로 `pH`, `SDI` 는 한 단어다.
pub fn tokenize(s: &str) -> BTreeSet<String> {
    let chars: Vec<char> = substitute_symbols(s).chars().collect();
    let mut tokens = BTreeSet::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                tokens.insert(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_ascii_uppercase() && i > 0 && !current.is_empty() {
            let prev = chars[i - 1];
            let next = chars.get(i + 1).copied();
            let after_word = prev.is_ascii_lowercase() || prev.is_ascii_digit();
            let starts_word = next.is_some_and(|n| n.is_ascii_lowercase() || n.is_ascii_digit());
            if after_word && starts_word {
                tokens.insert(std::mem::take(&mut current));
            }
        }
        current.push(c.to_ascii_lowercase());
    }
    if !current.is_empty() {
        tokens.insert(current);
    }
    tokens
}

/// 키 이름에 맞는 헤더를 찾는다. 각 단계에서 헤더 순서상 처음 맞는 것을 쓴다.
pub fn resolve_column<'a>(key: &str, headers: &'a [String]) -> Option<(&'a str, ResolutionTier)> {
    let normalized_key = normalize(key);
    if !normalized_key.is_empty() {
        if let Some(h) = headers.iter().find(|h| normalize(h) == normalized_key) {
            return Some((h.as_str(), ResolutionTier::Exact));
        }
    }

    let key_tokens = tokenize(key);
    if key_tokens.is_empty() {
        return None;
    }
    let header_tokens: Vec<(&String, BTreeSet<String>)> = headers
        .iter()
        .map(|h| (h, tokenize(h)))
        .filter(|(_, t)| !t.is_empty())
        .collect();

    if let Some((h, _)) = header_tokens
        .iter()
        .find(|(_, t)| t.is_superset(&key_tokens))
    {
        return Some((h.as_str(), ResolutionTier::Superset));
    }
    header_tokens
        .iter()
        .find(|(_, t)| t.is_subset(&key_tokens))
        .map(|(h, _)| (h.as_str(), ResolutionTier::Subset))
}

/// 여러 키를 한 번에 연결한다. 찾지 못한 키 이름은 두 번째 목록으로 돌려준다.
pub fn resolve_columns<'k, I>(keys: I, headers: &[String]) -> (Vec<ColumnResolution>, Vec<String>)
where
    I: IntoIterator<Item = &'k str>,
{
    let mut resolved = Vec::new();
    let mut missing = Vec::new();
    for key in keys {
        match resolve_column(key, headers) {
            Some((column, tier)) => resolved.push(ColumnResolution {
                key: key.to_string(),
                column: column.to_string(),
                tier,
            }),
            None => missing.push(key.to_string()),
        }
    }
    (resolved, missing)
}

/// 테이블에 등장하는 모든 헤더를 처음 등장한 순서대로 모은다.
pub fn table_headers(rows: &[ReferenceRow]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for row in rows {
        for column in row.columns() {
            if !headers.iter().any(|h| h == column) {
                headers.push(column.to_string());
            }
        }
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn normalize_folds_symbols_and_case() {
        assert_eq!(normalize("Feed Flow (m³/hr)"), "feedflowm3hr");
        assert_eq!(normalize("feed flow (m3/hr)"), "feedflowm3hr");
        assert_eq!(normalize("FeedFlowM3Hr"), "feedflowm3hr");
        assert_eq!(normalize("Feed Temperature (°C)"), "feedtemperaturec");
        assert_eq!(normalize("Conductivity (µS/cm)"), "conductivityuscm");
    }

    #[test]
    fn tokenize_splits_words_before_normalizing() {
        assert_eq!(tokenize("Feed water pH"), set(&["feed", "water", "ph"]));
        assert_eq!(tokenize("FeedFlowM3Hr"), set(&["feed", "flow", "m3", "hr"]));
        assert_eq!(tokenize("Recovery(%)"), set(&["recovery"]));
        assert_eq!(tokenize("SDI"), set(&["sdi"]));
        assert!(tokenize("(%)").is_empty());
    }

    #[test]
    fn exact_beats_token_tiers() {
        let headers = vec!["Feed water pH".to_string(), "feed ph".to_string()];
        assert_eq!(
            resolve_column("Feed pH", &headers),
            Some(("feed ph", ResolutionTier::Exact))
        );
    }

    #[test]
    fn superset_then_subset() {
        let headers = vec!["Feed Temperature".to_string(), "Feed water pH".to_string()];
        assert_eq!(
            resolve_column("Feed pH", &headers),
            Some(("Feed water pH", ResolutionTier::Superset))
        );
        assert_eq!(
            resolve_column("Feed Temperature (°C)", &headers),
            Some(("Feed Temperature", ResolutionTier::Subset))
        );
    }
}
