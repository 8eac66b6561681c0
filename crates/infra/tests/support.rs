//! Shared helpers for `studyreport-infra` integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Once};

use serde_json::{json, Value};
use studyreport_core::{PageAggregator, SessionManager};
use studyreport_infra::{FileCookieStore, HttpClient};
use tempfile::TempDir;
use wiremock::{MockServer, ResponseTemplate};

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness so `--nocapture` shows it.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("studyreport=debug"))
            .with_test_writer()
            .try_init();
    });
}

pub fn envelope(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "code": 200, "msg": "成功", "data": data }))
}

pub fn rejection(code: i64, msg: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "code": code, "msg": msg }))
}

/// Listing page `current` of `total`, each holding `per_page` records.
pub fn listing_page(total: u32, current: u64, per_page: u64) -> Value {
    let first = (current - 1) * per_page;
    let records: Vec<Value> = (first..first + per_page)
        .map(|id| json!({ "id": id, "username": format!("user{id}"), "areaid1": "o1" }))
        .collect();
    json!({ "page": { "totalPages": total }, "data": records })
}

/// Real adapters wired against a mock server, with files in a temp dir.
pub struct Harness {
    pub server: MockServer,
    pub client: Arc<HttpClient>,
    pub cookies: Arc<FileCookieStore>,
    pub dir: TempDir,
}

impl Harness {
    pub async fn start() -> Self {
        init_tracing();
        let server = MockServer::start().await;
        let dir = TempDir::new().expect("temp dir");
        let client = Arc::new(HttpClient::builder().max_attempts(3).build().expect("client"));
        let cookies = Arc::new(FileCookieStore::new(dir.path().join("cookies.ptk")));
        Self { server, client, cookies, dir }
    }

    pub fn session_manager(&self) -> SessionManager {
        SessionManager::new(self.client.clone(), self.cookies.clone(), self.server.uri())
    }

    pub fn aggregator(&self, page_size: u32) -> PageAggregator {
        PageAggregator::new(self.client.clone(), self.server.uri(), page_size)
    }
}
