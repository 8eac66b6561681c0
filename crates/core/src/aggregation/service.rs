//! Page aggregator - assembles multi-page listings into one dataset
//!
//! Every listing is read in two steps: page 1 is requested to learn
//! `totalPages`, then pages `1..=totalPages` are requested in order and their
//! records concatenated. Page 1 is therefore fetched twice; the count read
//! from the first response is never re-derived from later pages.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use studyreport_domain::constants::{
    CLASS_LIST_PATH, CLASS_PROGRESS_PATH, ORG_CLASS_RECORD_PATH, ORG_DETAIL_PATH,
    ORG_NUMBERS_PATH,
};
use studyreport_domain::{
    ApiRequest, ClassCatalog, ClassInfo, ClassProgress, EntityId, Envelope, OrgDetail,
    OrgHierarchy, OrgNumbers, OrgSummary, Page, PageRequest, Record, RecordListing, Result,
    Session, StudyError,
};
use tracing::{debug, info, instrument};

use crate::request::ports::RequestExecutor;
use crate::request::{authorized, endpoint_url};

/// Drives the request executor for listings and summary queries
#[derive(Clone)]
pub struct PageAggregator {
    executor: Arc<dyn RequestExecutor>,
    base_url: String,
    page_size: u32,
}

impl PageAggregator {
    pub fn new(
        executor: Arc<dyn RequestExecutor>,
        base_url: impl Into<String>,
        page_size: u32,
    ) -> Self {
        Self { executor, base_url: base_url.into(), page_size }
    }

    /// Fetch every record of a listing, optionally scoped to one sub-org.
    ///
    /// Any page that exhausts its retries fails the whole aggregation; no
    /// partial dataset is returned.
    #[instrument(skip_all, fields(listing = %listing, class_id = %class_id))]
    pub async fn fetch_all(
        &self,
        listing: RecordListing,
        session: &Session,
        class_id: &EntityId,
        parent_id: Option<&EntityId>,
    ) -> Result<Vec<Record>> {
        let url = endpoint_url(&self.base_url, listing.path());
        let first = PageRequest::first(class_id.clone(), self.page_size, parent_id.cloned());

        let total_pages = self.fetch_page(session, &url, &first).await?.total_pages;
        debug!(total_pages, "Listing size probed");

        let mut records = Vec::new();
        for page in 1..=total_pages {
            let fetched = self.fetch_page(session, &url, &first.at(page)).await?;
            records.extend(fetched.records);
            info!(page, total_pages, records = records.len(), "Fetched page");
        }

        Ok(records)
    }

    /// Per-sub-org summaries for a class, in server order.
    pub async fn org_summaries(
        &self,
        session: &Session,
        class_id: &EntityId,
    ) -> Result<Vec<OrgSummary>> {
        let request = ApiRequest::post(endpoint_url(&self.base_url, ORG_CLASS_RECORD_PATH))
            .body(json!({ "classId": class_id }));
        let envelope = self.send(session, request).await?;
        decode_rows(envelope.data, "org class record")
    }

    /// Id to name and name to summary maps, rebuilt on every call.
    pub async fn org_hierarchy(
        &self,
        session: &Session,
        class_id: &EntityId,
    ) -> Result<OrgHierarchy> {
        let summaries = self.org_summaries(session, class_id).await?;
        Ok(OrgHierarchy::from_summaries(summaries))
    }

    pub async fn org_numbers(&self, session: &Session) -> Result<OrgNumbers> {
        let request = ApiRequest::get(endpoint_url(&self.base_url, ORG_NUMBERS_PATH));
        decode(self.send(session, request).await?.data, "org numbers")
    }

    pub async fn org_detail(&self, session: &Session) -> Result<OrgDetail> {
        let request = ApiRequest::get(endpoint_url(&self.base_url, ORG_DETAIL_PATH));
        decode(self.send(session, request).await?.data, "org detail")
    }

    /// Study periods, newest first.
    pub async fn classes(&self, session: &Session) -> Result<ClassCatalog> {
        let request = ApiRequest::get(endpoint_url(&self.base_url, CLASS_LIST_PATH));
        let classes: Vec<ClassInfo> =
            decode_rows(self.send(session, request).await?.data, "class list")?;
        Ok(ClassCatalog::from_classes(classes))
    }

    pub async fn class_progress(
        &self,
        session: &Session,
        class_id: &EntityId,
    ) -> Result<ClassProgress> {
        let request = ApiRequest::get(endpoint_url(&self.base_url, CLASS_PROGRESS_PATH))
            .body(json!({ "classId": class_id }));
        decode(self.send(session, request).await?.data, "class progress")
    }

    async fn fetch_page(&self, session: &Session, url: &str, body: &PageRequest) -> Result<Page> {
        let body = serde_json::to_value(body)
            .map_err(|e| StudyError::Internal(format!("Failed to encode page request: {e}")))?;
        let envelope = self.send(session, ApiRequest::post(url).body(body)).await?;
        Page::from_envelope(&envelope)
    }

    async fn send(&self, session: &Session, request: ApiRequest) -> Result<Envelope> {
        let response = self.executor.execute(authorized(session, request)).await?;
        Ok(response.envelope)
    }
}

/// Decode a list payload row by row; rows that are not objects are skipped.
fn decode_rows<T: DeserializeOwned>(data: Value, what: &str) -> Result<Vec<T>> {
    let items = match data {
        Value::Array(items) => items,
        Value::Null => return Ok(Vec::new()),
        other => {
            return Err(StudyError::InvalidResponse(format!(
                "Unexpected {what} payload: expected a list, got {other}"
            )))
        }
    };

    let mut rows = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            debug!(index, what, "Skipping non-object row");
            continue;
        }
        rows.push(decode(item, what)?);
    }
    Ok(rows)
}

/// `null` decodes like an empty object, so every field takes its default.
fn decode<T: DeserializeOwned>(data: Value, what: &str) -> Result<T> {
    let data = if data.is_null() { Value::Object(Map::new()) } else { data };
    serde_json::from_value(data)
        .map_err(|e| StudyError::InvalidResponse(format!("Unexpected {what} payload: {e}")))
}
