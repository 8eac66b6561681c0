//! Modular common utilities shared across studyreport crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: error types
//! - `runtime`: symmetric encryption and the retry executor
//! - `platform`: vault key providers and zeroizing secure strings
//! - `observability`: tracing (pulled in by `runtime`)

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod error;

// Runtime tier
// --------------------------------------------------------------------
#[cfg(feature = "runtime")]
pub mod crypto;
#[cfg(feature = "runtime")]
pub mod resilience;

// Platform tier
// -------------------------------------------------------------------
#[cfg(feature = "platform")]
pub mod security;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "runtime")]
pub use crypto::{EncryptedData, EncryptionService as SymmetricEncryptionService};
#[cfg(feature = "foundation")]
pub use error::{CommonError, CommonResult};
#[cfg(feature = "runtime")]
pub use resilience::{
    BackoffStrategy, RetryConfig, RetryDecision, RetryError, RetryExecutor,
    RetryPolicy, RetryResult,
};
#[cfg(feature = "platform")]
pub use security::{KeyProvider, KeySource, SecureString};
