//! Port interfaces for session and credential persistence

use async_trait::async_trait;
use studyreport_domain::{CookieJar, Credentials, Result};

/// Persists the cookie jar issued at login
#[async_trait]
pub trait CookieStore: Send + Sync {
    /// Replace any previously stored jar.
    async fn save(&self, cookies: &CookieJar) -> Result<()>;

    /// `None` when nothing has been stored yet.
    async fn load(&self) -> Result<Option<CookieJar>>;
}

/// Encrypted credential storage
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn exists(&self) -> bool;

    async fn save(&self, credentials: &Credentials) -> Result<()>;

    /// Fails with `Decryption` when the stored data cannot be opened.
    async fn load(&self) -> Result<Credentials>;
}
