use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";

    pub const MATCH_DATA_NOT_LOADED: &str = "match.data_not_loaded";
    pub const MATCH_UNRESOLVED_COLUMNS: &str = "match.unresolved_columns";
    pub const MATCH_NOT_JOINTLY: &str = "match.not_jointly";
    pub const MATCH_VALUES_ABSENT: &str = "match.values_absent";
    pub const MATCH_FOUND: &str = "match.found";
    pub const MATCH_MULTIPLE: &str = "match.multiple";
    pub const MATCH_SELECTED: &str = "match.selected";
    pub const MATCH_INVALID_SELECTION: &str = "match.invalid_selection";

    pub const SUBMIT_INVALID: &str = "submit.invalid";
    pub const SUBMIT_INVALID_FIELDS: &str = "submit.invalid_fields";

    pub const REPORT_DERIVED_HEADING: &str = "report.derived_heading";
    pub const REPORT_UNITS: &str = "report.units";
    pub const REPORT_FEED_FLOW: &str = "report.feed_flow";
    pub const REPORT_CONCENTRATE_FLOW: &str = "report.concentrate_flow";
    pub const REPORT_STAGES: &str = "report.stages";
    pub const REPORT_SOURCES: &str = "report.sources";
    pub const REPORT_ION_LOAD_HEADING: &str = "report.ion_load_heading";
    pub const REPORT_KEYS_HEADING: &str = "report.keys_heading";
    pub const REPORT_RESULT_HEADING: &str = "report.result_heading";
    pub const REPORT_CANDIDATE: &str = "report.candidate";
    pub const REPORT_AGGREGATE: &str = "report.aggregate";
    pub const REPORT_SELECT_HINT: &str = "report.select_hint";
    pub const REPORT_HEADERS_HEADING: &str = "report.headers_heading";
    pub const REPORT_HEADER_MISSING: &str = "report.header_missing";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new("en")
    }
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.overrides
            .as_ref()
            .and_then(|m| m.get(key))
            .map(String::as_str)
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 순이며, 영어 번역이 없으면 한국어 문자열을 폴백한다.
    pub fn t(&self, key: &str) -> &str {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }
}

/// `{name}` 자리표시자를 값으로 바꾼다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "ko" => Some("ko".into()),
        "ko-kr" => Some("ko-kr".into()),
        "en" => Some("en".into()),
        "en-us" => Some("en-us".into()),
        "en-uk" => Some("en-us".into()),
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    for var in ["LANG", "LC_ALL"] {
        if let Ok(lang) = std::env::var(var) {
            if let Some(code) = normalize_locale_string(&lang) {
                return Some(code);
            }
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵(테이블은 점으로 이어 붙인다).
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        MATCH_DATA_NOT_LOADED => "프로젝션 데이터가 아직 로드되지 않았습니다.",
        MATCH_UNRESOLVED_COLUMNS => "데이터에서 다음 항목의 열을 찾을 수 없습니다: {keys}",
        MATCH_NOT_JOINTLY => {
            "입력값은 각각 데이터에 존재하지만, 모든 값을 동시에 만족하는 프로젝션이 없습니다."
        }
        MATCH_VALUES_ABSENT => "일치하는 프로젝션이 없습니다. 데이터에 없는 값: {keys}",
        MATCH_FOUND => "일치하는 프로젝션을 찾았습니다.",
        MATCH_MULTIPLE => "일치하는 프로젝션이 {count}건 있습니다. 하나를 선택하세요.",
        MATCH_SELECTED => "후보 {index}번을 선택했습니다.",
        MATCH_INVALID_SELECTION => "선택할 수 없는 후보 번호입니다: {index}",
        SUBMIT_INVALID => "필수 항목을 올바르게 입력하세요.",
        SUBMIT_INVALID_FIELDS => "다음 항목을 수정하세요: {fields}",
        REPORT_DERIVED_HEADING => "\n-- 계산 결과 --",
        REPORT_UNITS => "단위:",
        REPORT_FEED_FLOW => "공급수 유량:",
        REPORT_CONCENTRATE_FLOW => "농축수 유량:",
        REPORT_STAGES => "스테이지 수:",
        REPORT_SOURCES => "원수 수:",
        REPORT_ION_LOAD_HEADING => "\n-- 혼합 수질 --",
        REPORT_KEYS_HEADING => "\n-- 검색 키 --",
        REPORT_RESULT_HEADING => "\n-- 프로젝션 결과 --",
        REPORT_CANDIDATE => "후보",
        REPORT_AGGREGATE => "후보 평균(참고용)",
        REPORT_SELECT_HINT => "--select <번호> 로 후보를 선택할 수 있습니다.",
        REPORT_HEADERS_HEADING => "\n-- 헤더 연결 --",
        REPORT_HEADER_MISSING => "(찾을 수 없음)",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        ERROR_PREFIX => "Error",
        MATCH_DATA_NOT_LOADED => "Projection data is not loaded yet.",
        MATCH_UNRESOLVED_COLUMNS => "Could not find columns in the data for: {keys}",
        MATCH_NOT_JOINTLY => {
            "Each input value exists in the data, but no single projection matches all of them together."
        }
        MATCH_VALUES_ABSENT => "No matching projection found. Values not present in the data: {keys}",
        MATCH_FOUND => "Matching projection found.",
        MATCH_MULTIPLE => "{count} matching projections found. Select one to continue.",
        MATCH_SELECTED => "Selected candidate {index}.",
        MATCH_INVALID_SELECTION => "No candidate with index {index}.",
        SUBMIT_INVALID => "Please fill all required fields correctly.",
        SUBMIT_INVALID_FIELDS => "Please correct these fields: {fields}",
        REPORT_DERIVED_HEADING => "\n-- Derived values --",
        REPORT_UNITS => "Units:",
        REPORT_FEED_FLOW => "Feed flow:",
        REPORT_CONCENTRATE_FLOW => "Concentrate flow:",
        REPORT_STAGES => "Stages:",
        REPORT_SOURCES => "Water sources:",
        REPORT_ION_LOAD_HEADING => "\n-- Blended ion load --",
        REPORT_KEYS_HEADING => "\n-- Search keys --",
        REPORT_RESULT_HEADING => "\n-- Projection result --",
        REPORT_CANDIDATE => "Candidate",
        REPORT_AGGREGATE => "Candidate average (for reference)",
        REPORT_SELECT_HINT => "Use --select <index> to choose a candidate.",
        REPORT_HEADERS_HEADING => "\n-- Header resolution --",
        REPORT_HEADER_MISSING => "(not found)",
        _ => return None,
    };
    Some(s)
}
