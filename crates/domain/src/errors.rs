//! Error types used throughout the application

use thiserror::Error;

/// Main error type for studyreport
#[derive(Error, Debug)]
pub enum StudyError {
    /// Non-200 HTTP status, connection failure, or a body that is not JSON.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The envelope `code` was not the success sentinel.
    #[error("API error {code}: {message}")]
    Business { code: i64, message: String },

    /// Every attempt of one logical request failed.
    #[error("Maximum retries reached after {attempts} attempts: {source}")]
    MaxRetriesExceeded {
        attempts: u32,
        #[source]
        source: Box<StudyError>,
    },

    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// Vault token corrupt, truncated, or sealed under another key.
    #[error("Decryption error: {0}")]
    Decryption(String),

    /// The service refused the credentials; `code` becomes the exit status.
    #[error("Login rejected ({code}): {message}")]
    LoginRejected { code: i64, message: String },

    /// A success envelope lacked a field this client relies on.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StudyError {
    /// Whether the request executor should spend another attempt on this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Business { .. })
    }

    /// The business rejection behind this error, looking through an exhausted
    /// retry wrapper.
    pub fn business_rejection(&self) -> Option<(i64, &str)> {
        match self {
            Self::Business { code, message } => Some((*code, message.as_str())),
            Self::MaxRetriesExceeded { source, .. } => source.business_rejection(),
            _ => None,
        }
    }
}

/// Result type alias for studyreport operations
pub type Result<T> = std::result::Result<T, StudyError>;
