use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::{self, Config};
use crate::derivation::recompute;
use crate::i18n::Translator;
use crate::matching::{header, key_names};
use crate::params::{ParamError, ParameterSet};
use crate::reference::{self, ReferenceError, ReferenceRow};
use crate::session::{ProjectionSession, SubmitError};
use crate::ui_cli;

/// 명령행 인자.
#[derive(Debug, Parser)]
#[command(name = "ro_projection_toolbox", version, about = "RO membrane projection worksheet")]
pub struct Cli {
    /// 표시 언어 (auto/ko/en)
    #[arg(long, short = 'L', default_value = "auto")]
    pub lang: String,
    /// 설정 파일 경로. 없으면 config.toml
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 입력 파라미터(TOML)로 계산 필드를 다시 계산해 보여준다.
    Derive {
        #[arg(long)]
        params: Option<PathBuf>,
    },
    /// 결과 테이블에서 입력과 일치하는 프로젝션을 찾는다.
    Match {
        #[arg(long)]
        params: Option<PathBuf>,
        /// 결과 테이블 CSV. 없으면 설정의 reference_csv.
        #[arg(long)]
        data: Option<PathBuf>,
        /// 여러 후보가 나왔을 때 확정할 후보 번호(0부터)
        #[arg(long)]
        select: Option<usize>,
    },
    /// 검색 키가 결과 테이블의 어느 헤더에 연결되는지 보여준다.
    Headers {
        #[arg(long)]
        data: Option<PathBuf>,
    },
}

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(config::ConfigError),
    /// 파라미터 입력 오류
    Params(ParamError),
    /// 결과 테이블 로드 오류
    Reference(ReferenceError),
    /// 제출 거부
    Submit(SubmitError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Params(e) => write!(f, "파라미터 오류: {e}"),
            AppError::Reference(e) => write!(f, "결과 테이블 오류: {e}"),
            AppError::Submit(e) => write!(f, "제출 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(value: config::ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<ParamError> for AppError {
    fn from(value: ParamError) -> Self {
        AppError::Params(value)
    }
}

impl From<ReferenceError> for AppError {
    fn from(value: ReferenceError) -> Self {
        AppError::Reference(value)
    }
}

impl From<SubmitError> for AppError {
    fn from(value: SubmitError) -> Self {
        AppError::Submit(value)
    }
}

/// 하위 명령을 실행한다.
pub fn run(cli: &Cli, config: &Config, tr: &Translator) -> Result<(), AppError> {
    match &cli.command {
        Command::Derive { params } => {
            let params = load_params(params.as_deref())?;
            ui_cli::print_derived(tr, &recompute(&params));
        }
        Command::Match {
            params,
            data,
            select,
        } => {
            let params = load_params(params.as_deref())?;
            let table = load_table(config, data.as_deref());
            let mut session = ProjectionSession::new(params, table, config, tr.clone());
            if let Err(err) = session.submit().map(|_| ()) {
                ui_cli::print_submit_refused(tr, session.message());
                return Err(err.into());
            }
            if let Some(index) = *select {
                let accepted = session.select_candidate(index);
                ui_cli::print_selection(tr, index, accepted);
            }
            ui_cli::print_derived(tr, session.params());
            ui_cli::print_keys(tr, session.params());
            if let Some(outcome) = session.outcome() {
                ui_cli::print_outcome(tr, outcome, session.message());
            }
        }
        Command::Headers { data } => {
            let table = load_table(config, data.as_deref());
            let headers = header::table_headers(&table);
            ui_cli::print_header_heading(tr);
            for key in [
                key_names::FEED_FLOW,
                key_names::RECOVERY,
                key_names::FEED_TEMPERATURE,
                key_names::FEED_PH,
            ] {
                ui_cli::print_header_resolution(tr, key, header::resolve_column(key, &headers));
            }
        }
    }
    Ok(())
}

fn load_params(path: Option<&Path>) -> Result<ParameterSet, AppError> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            Ok(ParameterSet::from_toml_str(&content)?)
        }
        None => Ok(ParameterSet::default()),
    }
}

/// 결과 테이블을 읽는다. 읽지 못하면 경고만 남기고 빈 테이블로 진행한다.
fn load_table(config: &Config, data: Option<&Path>) -> Vec<ReferenceRow> {
    let path = data.unwrap_or_else(|| Path::new(&config.reference_csv));
    match reference::load_reference_csv(path) {
        Ok(rows) => rows,
        Err(err) => {
            tracing::warn!(path = %path.display(), "reference table unavailable: {err}");
            Vec::new()
        }
    }
}
