//! Request executor port and request decoration shared by the services

pub mod ports;

use studyreport_domain::{ApiRequest, Session};

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Join the configured base URL and an endpoint path.
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Attach the JSON content type, the session token and the session cookies.
pub fn authorized(session: &Session, request: ApiRequest) -> ApiRequest {
    let request = request
        .header("content-type", CONTENT_TYPE_JSON)
        .header("Authorization", session.token.clone());
    if session.cookies.is_empty() {
        request
    } else {
        request.cookies(session.cookies.clone())
    }
}
