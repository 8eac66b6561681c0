//! # studyreport Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The reqwest-backed request executor
//! - The encrypted credential vault and the cookie file
//! - The JSON export sink
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `studyreport-core`
//! - Depends on `studyreport-common` for encryption and retry
//! - Contains all "impure" code (network and file I/O)

pub mod config;
pub mod errors;
pub mod export;
pub mod http;
pub mod storage;

// Re-export commonly used items
pub use errors::InfraError;
pub use export::JsonExportSink;
pub use http::{HttpClient, HttpClientBuilder};
pub use storage::{FileCookieStore, FileCredentialVault};
