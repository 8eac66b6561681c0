//! Shared test helpers for `studyreport-core` integration tests.
//!
//! Lightweight in-memory fakes for the core ports so scenarios can script
//! server responses and inspect what the services sent.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use studyreport_core::{CookieStore, ExportSink, RequestExecutor};
use studyreport_domain::{
    ApiRequest, ApiResponse, CookieJar, Envelope, ExportFileName, ExportTable,
    Result as DomainResult, Session, StudyError,
};

/// Replays scripted outcomes in order and records every request.
#[derive(Default, Clone)]
pub struct ScriptedExecutor {
    outcomes: Arc<Mutex<VecDeque<DomainResult<ApiResponse>>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a success envelope carrying `data`.
    pub fn ok(self, data: Value) -> Self {
        self.push(Ok(ApiResponse { envelope: success(data), cookies: None }))
    }

    /// Queue a success envelope plus the cookies the server set.
    pub fn ok_with_cookies(self, data: Value, cookies: CookieJar) -> Self {
        self.push(Ok(ApiResponse { envelope: success(data), cookies: Some(cookies) }))
    }

    pub fn err(self, error: StudyError) -> Self {
        self.push(Err(error))
    }

    fn push(self, outcome: DomainResult<ApiResponse>) -> Self {
        self.outcomes.lock().unwrap().push_back(outcome);
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// `currentPage` of every recorded request body, in send order.
    pub fn pages_requested(&self) -> Vec<u64> {
        self.requests()
            .iter()
            .filter_map(|r| r.body.as_ref()?.get("currentPage")?.as_u64())
            .collect()
    }
}

#[async_trait]
impl RequestExecutor for ScriptedExecutor {
    async fn execute(&self, request: ApiRequest) -> DomainResult<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(StudyError::Internal("no scripted response left".into())))
    }
}

pub fn success(data: Value) -> Envelope {
    Envelope { code: 200, msg: "请求成功".into(), data }
}

/// One listing page with `count` records numbered from `first_id`.
pub fn page(total_pages: u32, first_id: u64, count: u64) -> Value {
    let records: Vec<Value> =
        (first_id..first_id + count).map(|id| json!({ "id": id, "username": format!("u{id}") })).collect();
    json!({ "page": { "totalPages": total_pages }, "data": records })
}

pub fn session() -> Session {
    Session {
        token: "T".into(),
        user_name: "U".into(),
        cookies: [("sid", "X")].into_iter().collect(),
    }
}

#[derive(Default, Clone)]
pub struct MemoryCookieStore {
    saved: Arc<Mutex<Option<CookieJar>>>,
}

impl MemoryCookieStore {
    pub fn saved(&self) -> Option<CookieJar> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl CookieStore for MemoryCookieStore {
    async fn save(&self, cookies: &CookieJar) -> DomainResult<()> {
        *self.saved.lock().unwrap() = Some(cookies.clone());
        Ok(())
    }

    async fn load(&self) -> DomainResult<Option<CookieJar>> {
        Ok(self.saved())
    }
}

/// Captures written tables instead of touching the file system.
#[derive(Default, Clone)]
pub struct MemorySink {
    written: Arc<Mutex<Vec<(String, ExportTable)>>>,
}

impl MemorySink {
    pub fn written(&self) -> Vec<(String, ExportTable)> {
        self.written.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExportSink for MemorySink {
    async fn write(&self, name: &ExportFileName, table: &ExportTable) -> DomainResult<PathBuf> {
        let stem = name.stem();
        self.written.lock().unwrap().push((stem.clone(), table.clone()));
        Ok(PathBuf::from(format!("{stem}.json")))
    }
}
