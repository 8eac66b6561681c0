//! Configuration loader
//!
//! Loads application configuration from a file, then layers environment
//! variables on top.
//!
//! ## Loading Strategy
//! 1. An explicitly given path must exist and parse
//! 2. Otherwise the standard locations are probed; no file means defaults
//! 3. Environment variables override whatever the file said
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `STUDYREPORT_BASE_URL`: Service base URL
//! - `STUDYREPORT_PAGE_SIZE`: Records per page
//! - `STUDYREPORT_MAX_RETRIES`: Attempts per logical request
//! - `STUDYREPORT_RETRY_DELAY_MS`: Pause between attempts
//! - `STUDYREPORT_TIMEOUT_SECS`: HTTP timeout
//! - `STUDYREPORT_DATA_DIR`: Directory of the credential and cookie files
//! - `STUDYREPORT_EXPORT_DIR`: Directory export files are written to
//! - `STUDYREPORT_VAULT_KEY_ENV`: Variable holding the vault key
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./studyreport.toml` or `./studyreport.json` (current working directory)
//! 2. `./config.toml` or `./config.json` (current working directory)
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use studyreport_domain::{Config, Result, StudyError};

const CONFIG_FILE_NAMES: [&str; 4] =
    ["studyreport.toml", "studyreport.json", "config.toml", "config.json"];

/// Load configuration: file (explicit or probed, else defaults) plus
/// environment overrides.
///
/// # Errors
/// Returns `StudyError::Config` if:
/// - An explicit path does not exist
/// - The file format is invalid
/// - An override variable has an unparsable value
pub fn load(path: Option<PathBuf>) -> Result<Config> {
    let mut config = match path {
        Some(path) => load_from_file(Some(path))?,
        None => match probe_config_paths() {
            Some(found) => load_from_file(Some(found))?,
            None => {
                tracing::info!("No config file found, using defaults");
                Config::default()
            }
        },
    };

    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `StudyError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(StudyError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            StudyError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| StudyError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Override file values with any `STUDYREPORT_*` variables that are set.
///
/// # Errors
/// Returns `StudyError::Config` for a numeric variable that does not parse.
pub fn apply_env_overrides(config: &mut Config) -> Result<()> {
    if let Some(url) = env_opt("STUDYREPORT_BASE_URL") {
        config.api.base_url = url;
    }
    if let Some(size) = env_parse("STUDYREPORT_PAGE_SIZE")? {
        config.api.page_size = size;
    }
    if let Some(attempts) = env_parse("STUDYREPORT_MAX_RETRIES")? {
        config.api.max_retries = attempts;
    }
    if let Some(delay) = env_parse("STUDYREPORT_RETRY_DELAY_MS")? {
        config.api.retry_delay_ms = delay;
    }
    if let Some(timeout) = env_parse("STUDYREPORT_TIMEOUT_SECS")? {
        config.api.timeout_secs = timeout;
    }
    if let Some(dir) = env_opt("STUDYREPORT_DATA_DIR") {
        config.storage.data_dir = PathBuf::from(dir);
    }
    if let Some(dir) = env_opt("STUDYREPORT_EXPORT_DIR") {
        config.storage.export_dir = PathBuf::from(dir);
    }
    if let Some(var) = env_opt("STUDYREPORT_VAULT_KEY_ENV") {
        config.vault.key_env = Some(var);
    }
    Ok(())
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `StudyError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| StudyError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| StudyError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(StudyError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe the standard locations for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Non-empty value of an environment variable
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Parse an optional environment variable
///
/// # Errors
/// Returns `StudyError::Config` if the variable is set but does not parse.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| StudyError::Config(format!("Invalid value for {}: {}", key, e)))
        })
        .transpose()
}
