//! Common error types shared by the utility tiers
//!
//! Higher layers translate `CommonError` into their own error enums; the
//! vault, for example, reports every [`CommonError::Crypto`] raised while
//! opening a token as a decryption failure.

use thiserror::Error;

/// Standard result type using CommonError
pub type CommonResult<T> = Result<T, CommonError>;

/// Failures raised by the crypto primitives and key providers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommonError {
    /// A key source is missing or unusable
    #[error("Configuration error in field '{field}': {message}")]
    Config { field: String, message: String },

    /// Key material, cipher, encoding or authentication-tag failures
    #[error("Cryptographic error: {message}")]
    Crypto { message: String },
}

impl CommonError {
    /// Create a configuration error for a specific field
    pub fn config_field<F: Into<String>, S: Into<String>>(field: F, message: S) -> Self {
        Self::Config { field: field.into(), message: message.into() }
    }

    pub fn crypto<S: Into<String>>(message: S) -> Self {
        Self::Crypto { message: message.into() }
    }

    pub fn is_crypto(&self) -> bool {
        matches!(self, Self::Crypto { .. })
    }
}
