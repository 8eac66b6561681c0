//! Port interface for the remote service transport

use async_trait::async_trait;
use studyreport_domain::{ApiRequest, ApiResponse, Result};

/// Executes one logical request against the remote service
///
/// Implementations own the retry budget: transport and business failures are
/// retried internally, and only the final outcome is returned. A returned
/// response always carries a success envelope.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;
}
