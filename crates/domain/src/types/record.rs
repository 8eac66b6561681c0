//! Sparse records and paged listings
//!
//! Record shapes differ per endpoint and are not fixed by this client, so a
//! record is a field map with tolerant accessors: absent and `null` fields
//! read as the empty string.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::http::Envelope;
use crate::constants::{FINISHED_RECORDS_PATH, UNFINISHED_RECORDS_PATH};
use crate::errors::{Result, StudyError};
use crate::impl_wire_name_conversions;

/// Render a JSON value the way it appears in an export cell.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// One per-user row as returned by a listing endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Field rendered as text; absent or null fields yield `""`.
    pub fn text(&self, field: &str) -> String {
        self.0.get(field).map(value_text).unwrap_or_default()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Identifier of a class or org, kept in the JSON type the server used
///
/// Ids come back as numbers from some endpoints and as strings from others;
/// they are echoed back verbatim and compared by their text form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Value);

impl EntityId {
    pub fn key(&self) -> String {
        value_text(&self.0)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self(Value::Null)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self(Value::from(id))
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(Value::from(id))
    }
}

impl From<Value> for EntityId {
    fn from(id: Value) -> Self {
        Self(id)
    }
}

/// The two paged per-user listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordListing {
    Finished,
    Unfinished,
}

impl_wire_name_conversions!(RecordListing {
    Finished => "finished",
    Unfinished => "unfinished",
});

impl RecordListing {
    pub fn path(self) -> &'static str {
        match self {
            Self::Finished => FINISHED_RECORDS_PATH,
            Self::Unfinished => UNFINISHED_RECORDS_PATH,
        }
    }
}

/// Body of one page request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub class_id: EntityId,
    pub page_size: u32,
    pub current_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<EntityId>,
}

impl PageRequest {
    pub fn first(class_id: EntityId, page_size: u32, parent_id: Option<EntityId>) -> Self {
        Self { class_id, page_size, current_page: 1, parent_id }
    }

    pub fn at(&self, page: u32) -> Self {
        Self { current_page: page, ..self.clone() }
    }
}

/// One page of a listing: `data.page.totalPages` and `data.data`
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub total_pages: u32,
    pub records: Vec<Record>,
}

impl Page {
    pub fn from_envelope(envelope: &Envelope) -> Result<Self> {
        let total = envelope.data_at("/page/totalPages")?;
        let total_pages = total
            .as_u64()
            .or_else(|| total.as_str().and_then(|s| s.trim().parse().ok()))
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| {
                StudyError::InvalidResponse(format!("totalPages is not a page count: {total}"))
            })?;

        let records = match envelope.data_at("/data")? {
            Value::Array(items) => items
                .iter()
                .filter_map(|item| item.as_object().cloned().map(Record::from))
                .collect(),
            Value::Null => Vec::new(),
            other => {
                return Err(StudyError::InvalidResponse(format!(
                    "data.data is not an array: {other}"
                )))
            }
        };

        Ok(Self { total_pages, records })
    }
}
