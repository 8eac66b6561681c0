//! Request and response shapes exchanged with the request executor

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::SUCCESS_CODE;
use crate::errors::{Result, StudyError};
use crate::impl_wire_name_conversions;
use crate::utils::serde::{lenient_i64, lenient_string};

/// HTTP methods the remote service accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl_wire_name_conversions!(HttpMethod {
    Get => "GET",
    Post => "POST",
});

impl HttpMethod {
    /// Parse a method name, rejecting anything but GET and POST.
    pub fn parse(method: &str) -> Result<Self> {
        method.parse().map_err(|_| StudyError::UnsupportedMethod(method.to_string()))
    }
}

/// Opaque cookie set returned at login and replayed on every later call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CookieJar(BTreeMap<String, String>);

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render the jar as a `Cookie` request header value.
    pub fn header_value(&self) -> Option<String> {
        if self.0.is_empty() {
            return None;
        }
        Some(self.iter().map(|(k, v)| format!("{k}={v}")).collect::<Vec<_>>().join("; "))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CookieJar {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// One logical request
///
/// GET bodies are sent as query parameters (one per top-level field of a JSON
/// object); POST bodies are serialized as JSON text.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
    pub cookies: Option<CookieJar>,
    pub need_cookies: bool,
}

impl ApiRequest {
    /// Build a request from a method name; only GET and POST are accepted.
    pub fn new(method: &str, url: impl Into<String>) -> Result<Self> {
        Ok(Self::with_method(HttpMethod::parse(method)?, url))
    }

    pub fn with_method(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            cookies: None,
            need_cookies: false,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::with_method(HttpMethod::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::with_method(HttpMethod::Post, url)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn cookies(mut self, cookies: CookieJar) -> Self {
        self.cookies = Some(cookies);
        self
    }

    /// Ask the executor to hand back the response cookies.
    pub fn capture_cookies(mut self) -> Self {
        self.need_cookies = true;
        self
    }

    /// Query pairs derived from the body; only meaningful for GET.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        match &self.body {
            Some(Value::Object(map)) => {
                map.iter().map(|(k, v)| (k.clone(), super::record::value_text(v))).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// Common `{code, msg, data}` envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Envelope {
    #[serde(deserialize_with = "lenient_i64")]
    pub code: i64,
    #[serde(deserialize_with = "lenient_string")]
    pub msg: String,
    pub data: Value,
}

impl Envelope {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Turn a non-success envelope into a business error.
    pub fn into_checked(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(StudyError::Business { code: self.code, message: self.msg })
        }
    }

    /// Look up a value under `data` by JSON pointer (e.g. `/page/totalPages`).
    pub fn data_at(&self, pointer: &str) -> Result<&Value> {
        self.data
            .pointer(pointer)
            .ok_or_else(|| StudyError::InvalidResponse(format!("missing data{pointer}")))
    }
}

/// Parsed response of a successful request
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub envelope: Envelope,
    /// Present only when the request asked for cookies.
    pub cookies: Option<CookieJar>,
}
