//! Sources of the credential vault key
//!
//! A key is a URL-safe base64 string decoding to 32 bytes, the form
//! [`EncryptionService::from_encoded_key`] accepts.
//!
//! [`EncryptionService::from_encoded_key`]: crate::crypto::EncryptionService::from_encoded_key

use tracing::{debug, instrument, warn};

use super::SecureString;
use crate::crypto::derive_passphrase_key;
use crate::error::{CommonError, CommonResult};

/// Supplies the symmetric key used to seal stored credentials
pub trait KeyProvider: Send + Sync {
    fn key(&self) -> CommonResult<SecureString>;
}

/// Where the vault key comes from
#[derive(Clone, PartialEq, Eq)]
pub enum KeySource {
    /// SHA-256 of a passphrase compiled into the binary. Deterministic across
    /// runs, so it only obscures the file.
    Passphrase { passphrase: String },
    /// An already-encoded key read from an environment variable.
    Environment { var_name: String },
}

impl std::fmt::Debug for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passphrase { .. } => f.write_str("Passphrase(***)"),
            Self::Environment { var_name } => write!(f, "Environment({var_name})"),
        }
    }
}

impl KeySource {
    pub fn passphrase(passphrase: impl Into<String>) -> Self {
        Self::Passphrase { passphrase: passphrase.into() }
    }

    pub fn environment(var_name: impl Into<String>) -> Self {
        Self::Environment { var_name: var_name.into() }
    }
}

impl KeyProvider for KeySource {
    #[instrument(skip_all, fields(key_source = ?self))]
    fn key(&self) -> CommonResult<SecureString> {
        match self {
            Self::Passphrase { passphrase } => {
                debug!("Deriving vault key from passphrase");
                Ok(SecureString::new(derive_passphrase_key(passphrase)))
            }
            Self::Environment { var_name } => {
                debug!("Reading vault key from environment variable");
                let value = std::env::var(var_name).map_err(|e| {
                    warn!("Environment variable {} not found", var_name);
                    CommonError::config_field(
                        var_name.clone(),
                        format!("Environment variable not usable: {e}"),
                    )
                })?;
                if value.trim().is_empty() {
                    return Err(CommonError::config_field(var_name.clone(), "Vault key is empty"));
                }
                Ok(SecureString::new(value.trim().to_string()))
            }
        }
    }
}
