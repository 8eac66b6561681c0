//! Encrypted credential file
//!
//! The file holds two lines, the sealed account then the sealed password.
//! Each line is a self-contained AES-256-GCM token, so the two fields never
//! share a nonce.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use studyreport_common::{KeyProvider, SymmetricEncryptionService};
use studyreport_core::CredentialStore;
use studyreport_domain::{Credentials, Result, StudyError};
use tracing::{debug, info, instrument};

use crate::errors::InfraError;

/// Credential vault sealed under a key from a [`KeyProvider`]
pub struct FileCredentialVault {
    path: PathBuf,
    keys: Arc<dyn KeyProvider>,
}

impl FileCredentialVault {
    pub fn new(path: impl Into<PathBuf>, keys: Arc<dyn KeyProvider>) -> Self {
        Self { path: path.into(), keys }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn cipher(&self) -> Result<SymmetricEncryptionService> {
        let key = self.keys.key().map_err(InfraError::from)?;
        Ok(SymmetricEncryptionService::from_encoded_key(key.expose()).map_err(InfraError::from)?)
    }

    fn open(cipher: &SymmetricEncryptionService, token: &str, field: &str) -> Result<String> {
        let plain = cipher.decrypt_from_string(token).map_err(InfraError::from)?;
        String::from_utf8(plain)
            .map_err(|_| StudyError::Decryption(format!("stored {field} is not valid UTF-8")))
    }
}

#[async_trait]
impl CredentialStore for FileCredentialVault {
    async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    #[instrument(skip_all, fields(path = %self.path.display()))]
    async fn save(&self, credentials: &Credentials) -> Result<()> {
        let cipher = self.cipher()?;
        let account =
            cipher.encrypt_to_string(credentials.account().as_bytes()).map_err(InfraError::from)?;
        let password =
            cipher.encrypt_to_string(credentials.password().as_bytes()).map_err(InfraError::from)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(InfraError::from)?;
        }
        tokio::fs::write(&self.path, format!("{account}\n{password}"))
            .await
            .map_err(InfraError::from)?;

        info!("Credentials saved");
        Ok(())
    }

    #[instrument(skip_all, fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Credentials> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(InfraError::from)?;
        let lines: Vec<&str> = contents.lines().filter(|l| !l.trim().is_empty()).collect();
        let [account_token, password_token] = lines.as_slice() else {
            return Err(StudyError::Decryption(format!(
                "expected 2 sealed fields, found {}",
                lines.len()
            )));
        };

        let cipher = self.cipher()?;
        let account = Self::open(&cipher, account_token, "account")?;
        let password = Self::open(&cipher, password_token, "password")?;

        debug!(account = %account, "Credentials loaded");
        Ok(Credentials::new(account, password))
    }
}
