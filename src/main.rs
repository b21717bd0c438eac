use clap::Parser;
use ro_projection_toolbox::{app, config, i18n};
use tracing_subscriber::EnvFilter;

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    let cli = app::Cli::parse();
    if let Err(err) = try_run(&cli) {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run(cli: &app::Cli) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = match &cli.config {
        Some(path) => config::load_from(path)?,
        None => config::load_or_default()?,
    };
    init_logging(&cfg.log_filter);

    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = i18n::Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());
    tracing::debug!(lang = tr.language_code(), "starting");

    if let Err(err) = app::run(cli, &cfg, &tr) {
        eprintln!("{}: {err}", tr.t(i18n::keys::ERROR_PREFIX));
        std::process::exit(1);
    }
    Ok(())
}

/// RUST_LOG 가 있으면 그 필터를, 없으면 설정의 log_filter 를 쓴다. 로그는 stderr 로 보낸다.
fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
