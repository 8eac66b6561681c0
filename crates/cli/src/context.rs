//! Application context - wires the infrastructure adapters into the services

use std::sync::Arc;

use studyreport_common::{KeyProvider, KeySource};
use studyreport_core::{PageAggregator, ReportService, SessionManager};
use studyreport_domain::constants::DEFAULT_VAULT_PASSPHRASE;
use studyreport_domain::{Config, Result};
use studyreport_infra::{FileCookieStore, FileCredentialVault, HttpClient, JsonExportSink};
use tracing::info;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub vault: Arc<FileCredentialVault>,
    pub sessions: SessionManager,
    pub aggregator: PageAggregator,
    pub reports: ReportService,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let client = Arc::new(HttpClient::from_config(&config.api)?);
        let base_url = config.api.base_url.clone();

        let cookies = Arc::new(FileCookieStore::new(config.storage.cookie_path()));
        let vault = Arc::new(FileCredentialVault::new(
            config.storage.credentials_path(),
            key_source(&config),
        ));

        let sessions = SessionManager::new(client.clone(), cookies, base_url.clone());
        let aggregator = PageAggregator::new(client, base_url, config.api.page_size);
        let sink = Arc::new(JsonExportSink::new(config.storage.export_dir.clone()));
        let reports = ReportService::new(aggregator.clone(), sink);

        info!(
            base_url = %config.api.base_url,
            data_dir = %config.storage.data_dir.display(),
            export_dir = %config.storage.export_dir.display(),
            "Application context ready"
        );

        Ok(Self { vault, sessions, aggregator, reports })
    }
}

fn key_source(config: &Config) -> Arc<dyn KeyProvider> {
    match &config.vault.key_env {
        Some(var) => Arc::new(KeySource::environment(var.clone())),
        None => Arc::new(KeySource::passphrase(DEFAULT_VAULT_PASSPHRASE)),
    }
}
