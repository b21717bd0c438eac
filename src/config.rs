use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::matching::DEFAULT_TOLERANCE;

/// 기본 설정 파일 경로.
pub const CONFIG_PATH: &str = "config.toml";

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 표시 언어(auto/ko/en)
    pub language: String,
    /// 외부 언어팩 디렉터리
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_pack_dir: Option<String>,
    /// 프로젝션 결과 테이블(CSV) 경로
    pub reference_csv: String,
    /// 마지막 입력 후 재계산까지 대기 시간 [ms]
    pub debounce_ms: u64,
    /// 숫자 키 비교 허용오차(절대값)
    pub match_tolerance: f64,
    /// 로그 필터(tracing EnvFilter 형식). RUST_LOG 가 있으면 그쪽이 우선한다.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            language_pack_dir: None,
            reference_csv: "assets/data/master.csv".to_string(),
            debounce_ms: 300,
            match_tolerance: DEFAULT_TOLERANCE,
            log_filter: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 역직렬화 오류
    Serde(toml::de::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "파일 입출력 오류: {e}"),
            ConfigError::Serde(e) => write!(f, "설정 파싱 오류: {e}"),
            ConfigError::Serialize(e) => write!(f, "설정 직렬화 오류: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Serde(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_from(Path::new(CONFIG_PATH))
}

/// 지정 경로의 설정을 로드한다. 파일이 없으면 기본 설정을 그 경로에 저장한다.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        Ok(cfg)
    }
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg: Config = toml::from_str("debounce_ms = 50\nlanguage = \"ko\"\n").expect("parse");
        assert_eq!(cfg.debounce(), Duration::from_millis(50));
        assert_eq!(cfg.language, "ko");
        assert_eq!(cfg.match_tolerance, DEFAULT_TOLERANCE);
        assert_eq!(cfg.reference_csv, "assets/data/master.csv");
    }
}
