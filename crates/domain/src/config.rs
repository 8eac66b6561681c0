//! Configuration structures
//!
//! Every section deserializes with defaults so a partial TOML/JSON file (or
//! no file at all) still yields a usable configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{
    COOKIE_FILE, CREDENTIALS_FILE, DEFAULT_BASE_URL, DEFAULT_EXPORT_DIR, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS,
};

/// Root configuration for the application
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub vault: VaultConfig,
}

/// Remote service access
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub page_size: u32,
    /// Total attempts per logical request (initial try included).
    pub max_retries: u32,
    /// Fixed pause between attempts; zero means retry immediately.
    pub retry_delay_ms: u64,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            max_retries: DEFAULT_MAX_ATTEMPTS,
            retry_delay_ms: 0,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// On-disk locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub credentials_file: String,
    pub cookie_file: String,
    pub export_dir: PathBuf,
}

impl StorageConfig {
    pub fn credentials_path(&self) -> PathBuf {
        self.data_dir.join(&self.credentials_file)
    }

    pub fn cookie_path(&self) -> PathBuf {
        self.data_dir.join(&self.cookie_file)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            credentials_file: CREDENTIALS_FILE.to_string(),
            cookie_file: COOKIE_FILE.to_string(),
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
        }
    }
}

/// Where the credential vault key comes from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// Read an encoded vault key from this environment variable instead of
    /// deriving one from the built-in passphrase.
    pub key_env: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "api": { "page_size": 50 } }"#).unwrap();

        assert_eq!(config.api.page_size, 50);
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.max_retries, 3);
        assert_eq!(config.storage.credentials_file, "account.data");
        assert!(config.vault.key_env.is_none());
    }

    #[test]
    fn storage_paths_join_data_dir() {
        let storage = StorageConfig { data_dir: PathBuf::from("/var/lib/sr"), ..Default::default() };

        assert_eq!(storage.credentials_path(), PathBuf::from("/var/lib/sr/account.data"));
        assert_eq!(storage.cookie_path(), PathBuf::from("/var/lib/sr/cookies.ptk"));
    }
}
