//! File-backed implementations of the session and credential ports

pub mod cookie_store;
pub mod vault;

pub use cookie_store::FileCookieStore;
pub use vault::FileCredentialVault;
