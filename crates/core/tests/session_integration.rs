//! Integration tests for login through the session manager

mod support;

use std::sync::Arc;

use serde_json::json;
use studyreport_core::{CookieStore, SessionManager};
use studyreport_domain::{CookieJar, Credentials, HttpMethod, StudyError};
use support::{MemoryCookieStore, ScriptedExecutor};

fn manager(executor: &ScriptedExecutor, store: &MemoryCookieStore) -> SessionManager {
    SessionManager::new(Arc::new(executor.clone()), Arc::new(store.clone()), "https://service.test/api-org")
}

/// Successful login yields the token and persists the issued cookie jar.
#[tokio::test]
async fn login_returns_token_and_persists_cookies() {
    let cookies: CookieJar = [("sid", "X")].into_iter().collect();
    let executor = ScriptedExecutor::new()
        .ok_with_cookies(json!({ "token": "T", "user": { "userName": "U" } }), cookies);
    let store = MemoryCookieStore::default();

    let session = manager(&executor, &store)
        .login(&Credentials::new("13800000000", "pw"))
        .await
        .expect("login should succeed");

    assert_eq!(session.token, "T");
    assert_eq!(session.user_name, "U");
    assert_eq!(session.cookies.get("sid"), Some("X"));
    let persisted = store.load().await.expect("load").expect("jar persisted");
    assert_eq!(persisted.get("sid"), Some("X"));

    let request = &executor.requests()[0];
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.url, "https://service.test/api-org/user/login");
    assert_eq!(request.body, Some(json!({ "account": "13800000000", "password": "pw" })));
    assert!(request.need_cookies);
}

/// A business refusal behind exhausted retries becomes `LoginRejected`.
#[tokio::test]
async fn rejected_login_carries_service_code() {
    let executor = ScriptedExecutor::new().err(StudyError::MaxRetriesExceeded {
        attempts: 3,
        source: Box::new(StudyError::Business { code: 500, message: "账号或密码错误".into() }),
    });
    let store = MemoryCookieStore::default();

    let err = manager(&executor, &store)
        .login(&Credentials::new("13800000000", "wrong"))
        .await
        .expect_err("login should be rejected");

    match err {
        StudyError::LoginRejected { code, message } => {
            assert_eq!(code, 500);
            assert_eq!(message, "账号或密码错误");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(store.saved().is_none(), "no cookies persisted on rejection");
}

/// Transport exhaustion is not a rejection and passes through unchanged.
#[tokio::test]
async fn transport_failure_is_not_rejection() {
    let executor = ScriptedExecutor::new().err(StudyError::MaxRetriesExceeded {
        attempts: 3,
        source: Box::new(StudyError::Transport("HTTP error: 503".into())),
    });

    let err = manager(&executor, &MemoryCookieStore::default())
        .login(&Credentials::new("a", "b"))
        .await
        .expect_err("login should fail");

    assert!(matches!(err, StudyError::MaxRetriesExceeded { .. }));
}

#[tokio::test]
async fn missing_token_is_invalid_response() {
    let executor = ScriptedExecutor::new().ok(json!({ "user": { "userName": "U" } }));

    let err = manager(&executor, &MemoryCookieStore::default())
        .login(&Credentials::new("a", "b"))
        .await
        .expect_err("login should fail");

    assert!(matches!(err, StudyError::InvalidResponse(_)));
}
