//! Cookie jar persisted as a JSON object

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use studyreport_core::CookieStore;
use studyreport_domain::{CookieJar, Result};
use tracing::debug;

use crate::errors::InfraError;

/// Stores the login cookies in a single JSON file
#[derive(Debug, Clone)]
pub struct FileCookieStore {
    path: PathBuf,
}

impl FileCookieStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CookieStore for FileCookieStore {
    async fn save(&self, cookies: &CookieJar) -> Result<()> {
        let json = serde_json::to_string_pretty(cookies).map_err(InfraError::from)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(InfraError::from)?;
        }
        tokio::fs::write(&self.path, json).await.map_err(InfraError::from)?;

        debug!(path = %self.path.display(), cookies = cookies.len(), "Cookie jar saved");
        Ok(())
    }

    async fn load(&self) -> Result<Option<CookieJar>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(InfraError::from(err).into()),
        };
        let jar = serde_json::from_str(&contents).map_err(InfraError::from)?;
        Ok(Some(jar))
    }
}
