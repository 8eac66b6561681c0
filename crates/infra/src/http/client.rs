use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::COOKIE;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, StatusCode};
use studyreport_common::resilience::policies::PredicateRetry;
use studyreport_common::{BackoffStrategy, RetryConfig, RetryError, RetryExecutor};
use studyreport_core::RequestExecutor;
use studyreport_domain::{
    ApiConfig, ApiRequest, ApiResponse, CookieJar, Envelope, HttpMethod, Result, StudyError,
};
use tracing::{debug, error, instrument, warn};

use crate::errors::InfraError;

type RetryableOnly = PredicateRetry<fn(&StudyError, u32) -> bool>;

fn retryable(error: &StudyError, _attempt: u32) -> bool {
    error.is_retryable()
}

/// reqwest-backed request executor with bounded retry.
///
/// Each attempt checks the HTTP status, the JSON body and the envelope code;
/// any of the three failing spends one attempt of the budget.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    retry: RetryExecutor<RetryableOnly>,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Client configured from the `[api]` section.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .max_attempts(config.max_retries)
            .backoff(BackoffStrategy::from_millis(config.retry_delay_ms))
            .build()
    }

    fn prepare(&self, request: &ApiRequest) -> RequestBuilder {
        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };
        let mut builder = self.client.request(method, &request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(cookie) = request.cookies.as_ref().and_then(CookieJar::header_value) {
            builder = builder.header(COOKIE, cookie);
        }

        match (request.method, &request.body) {
            (HttpMethod::Get, _) => builder.query(&request.query_pairs()),
            (HttpMethod::Post, Some(body)) => builder.body(body.to_string()),
            (HttpMethod::Post, None) => builder,
        }
    }

    /// One attempt: send, then apply the status, JSON and envelope checks.
    async fn send_once(&self, request: &ApiRequest, attempt: u32) -> Result<ApiResponse> {
        debug!(attempt, method = %request.method, url = %request.url, "sending HTTP request");

        let response = self
            .prepare(request)
            .send()
            .await
            .map_err(|err| StudyError::from(InfraError::from(err)))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(StudyError::Transport(format!("HTTP error: {}", status.as_u16())));
        }

        let cookies = request.need_cookies.then(|| {
            response
                .cookies()
                .map(|c| (c.name().to_string(), c.value().to_string()))
                .collect::<CookieJar>()
        });

        let text = response.text().await.map_err(|err| StudyError::from(InfraError::from(err)))?;
        if request.need_cookies {
            // Login responses carry the bearer token.
            debug!(attempt, bytes = text.len(), "received HTTP response");
        } else {
            debug!(attempt, body = %text, "received HTTP response");
        }

        let envelope: Envelope = serde_json::from_str(&text)
            .map_err(|err| StudyError::Transport(format!("response body is not JSON: {err}")))?;
        let envelope = envelope.into_checked()?;

        Ok(ApiResponse { envelope, cookies })
    }
}

#[async_trait]
impl RequestExecutor for HttpClient {
    #[instrument(skip_all, fields(method = %request.method, url = %request.url))]
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let outcome = self.retry.execute(|attempt| self.send_once(&request, attempt)).await;

        match outcome {
            Ok(response) => Ok(response),
            Err(RetryError::AttemptsExhausted { attempts, last_error }) => {
                error!(attempts, error = %last_error, "request failed on every attempt");
                Err(StudyError::MaxRetriesExceeded { attempts, source: Box::new(last_error) })
            }
            Err(RetryError::NonRetryable { source }) => {
                warn!(error = %source, "request failed");
                Err(source)
            }
            Err(RetryError::InvalidConfiguration { message }) => Err(StudyError::Config(message)),
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    retry: RetryConfig,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(30), retry: RetryConfig::default() }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configure the total number of attempts (initial try + retries).
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.retry.max_attempts = attempts;
        self
    }

    pub fn backoff(mut self, backoff: BackoffStrategy) -> Self {
        self.retry.backoff = backoff;
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        self.retry.validate().map_err(|err| StudyError::Config(err.to_string()))?;

        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .no_proxy()
            .build()
            .map_err(|err| StudyError::from(InfraError::from(err)))?;

        let policy: RetryableOnly =
            PredicateRetry::new(retryable as fn(&StudyError, u32) -> bool);
        Ok(HttpClient { client, retry: RetryExecutor::new(self.retry, policy) })
    }
}
