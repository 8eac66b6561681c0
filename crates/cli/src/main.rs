//! studyreport - interactive exporter for learning-progress reports
//!
//! Usage: `studyreport [CONFIG_PATH]`. Without a path the configuration is
//! probed from the standard locations (or `STUDYREPORT_CONFIG`).

mod context;
mod menu;
mod prompt;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use studyreport_domain::StudyError;
use tracing_subscriber::EnvFilter;

use crate::context::AppContext;
use crate::menu::Menu;
use crate::prompt::Prompt;

const DEFAULT_LOG_FILTER: &str = "studyreport=info";

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn config_path() -> Option<PathBuf> {
    std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("STUDYREPORT_CONFIG").map(PathBuf::from))
}

fn run() -> Result<()> {
    let config = studyreport_infra::config::load(config_path())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;
    let ctx = AppContext::new(config)?;
    let prompt = Prompt::new().context("failed to open the terminal")?;

    Menu::new(ctx, prompt, runtime).run()
}

/// Exit status for a login the service refused: the low byte of its code,
/// the same truncation a process exit applies.
fn rejection_status(code: i64) -> u8 {
    (code & 0xFF) as u8
}

fn main() -> ExitCode {
    // .env may set RUST_LOG, so load it before the subscriber
    let dotenv = dotenvy::dotenv();
    init_tracing();
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(err) if err.not_found() => {}
        Err(err) => tracing::warn!(error = %err, "Could not load .env file"),
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<StudyError>() {
            Some(StudyError::LoginRejected { code, message }) => {
                eprintln!("登录失败（{code}）：{message}");
                ExitCode::from(rejection_status(*code))
            }
            _ => {
                tracing::error!(error = ?err, "studyreport stopped");
                eprintln!("错误：{err:#}");
                ExitCode::FAILURE
            }
        },
    }
}
