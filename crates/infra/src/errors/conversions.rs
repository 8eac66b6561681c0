//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use studyreport_common::CommonError;
use studyreport_domain::StudyError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub StudyError);

impl From<InfraError> for StudyError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<StudyError> for InfraError {
    fn from(value: StudyError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoStudyError {
    fn into_study(self) -> StudyError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → StudyError */
/* -------------------------------------------------------------------------- */

impl IntoStudyError for HttpError {
    fn into_study(self) -> StudyError {
        if self.is_timeout() {
            return StudyError::Transport("HTTP request timed out".into());
        }

        if self.is_connect() {
            return StudyError::Transport(format!("HTTP connection failure: {self}"));
        }

        if self.is_builder() {
            return StudyError::Internal(format!("invalid HTTP request: {self}"));
        }

        if let Some(status) = self.status() {
            return StudyError::Transport(format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status")
            ));
        }

        StudyError::Transport(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_study())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → StudyError */
/* -------------------------------------------------------------------------- */

impl IntoStudyError for std::io::Error {
    fn into_study(self) -> StudyError {
        match self.kind() {
            std::io::ErrorKind::NotFound => StudyError::Storage(format!("file not found: {self}")),
            std::io::ErrorKind::PermissionDenied => {
                StudyError::Storage(format!("permission denied: {self}"))
            }
            _ => StudyError::Storage(self.to_string()),
        }
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(value.into_study())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → StudyError */
/* -------------------------------------------------------------------------- */

impl IntoStudyError for serde_json::Error {
    fn into_study(self) -> StudyError {
        StudyError::Storage(format!("invalid JSON document: {self}"))
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(value.into_study())
    }
}

/* -------------------------------------------------------------------------- */
/* CommonError → StudyError */
/* -------------------------------------------------------------------------- */

impl IntoStudyError for CommonError {
    fn into_study(self) -> StudyError {
        match self {
            CommonError::Crypto { message } => StudyError::Decryption(message),
            CommonError::Config { field, message } => {
                StudyError::Config(format!("{field}: {message}"))
            }
        }
    }
}

impl From<CommonError> for InfraError {
    fn from(value: CommonError) -> Self {
        InfraError(value.into_study())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
