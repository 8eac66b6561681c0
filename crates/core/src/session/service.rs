//! Session manager - exchanges credentials for a token and cookie jar

use std::sync::Arc;

use serde_json::json;
use studyreport_domain::constants::LOGIN_PATH;
use studyreport_domain::{ApiRequest, Credentials, Result, Session, StudyError};
use tracing::{info, warn};

use super::ports::CookieStore;
use crate::request::ports::RequestExecutor;
use crate::request::{endpoint_url, CONTENT_TYPE_JSON};

/// Logs in and persists the issued cookies
pub struct SessionManager {
    executor: Arc<dyn RequestExecutor>,
    cookie_store: Arc<dyn CookieStore>,
    base_url: String,
}

impl SessionManager {
    pub fn new(
        executor: Arc<dyn RequestExecutor>,
        cookie_store: Arc<dyn CookieStore>,
        base_url: impl Into<String>,
    ) -> Self {
        Self { executor, cookie_store, base_url: base_url.into() }
    }

    /// Authenticate and return a fresh session.
    ///
    /// A refusal by the service, whether it exhausted the retry budget or
    /// arrived as a non-success envelope, is reported as `LoginRejected`.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        info!(account = credentials.account(), "Logging in");

        let request = ApiRequest::post(endpoint_url(&self.base_url, LOGIN_PATH))
            .header("content-type", CONTENT_TYPE_JSON)
            .body(json!({
                "account": credentials.account(),
                "password": credentials.password(),
            }))
            .capture_cookies();

        let response = self.executor.execute(request).await.map_err(login_error)?;
        let envelope = response.envelope.into_checked().map_err(login_error)?;

        let token = envelope
            .data_at("/token")?
            .as_str()
            .ok_or_else(|| StudyError::InvalidResponse("data.token is not a string".into()))?
            .to_string();
        let user_name = envelope
            .data_at("/user/userName")?
            .as_str()
            .ok_or_else(|| {
                StudyError::InvalidResponse("data.user.userName is not a string".into())
            })?
            .to_string();

        let cookies = response.cookies.unwrap_or_default();
        self.cookie_store.save(&cookies).await?;

        info!(user = %user_name, cookies = cookies.len(), "Login succeeded");
        Ok(Session { token, user_name, cookies })
    }
}

fn login_error(err: StudyError) -> StudyError {
    let rejection = err.business_rejection().map(|(code, message)| (code, message.to_string()));
    match rejection {
        Some((code, message)) => {
            warn!(code, message = %message, "Login rejected");
            StudyError::LoginRejected { code, message }
        }
        None => err,
    }
}
