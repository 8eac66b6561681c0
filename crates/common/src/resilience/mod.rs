//! Resilience patterns for transient failures
//!
//! Only bounded retry lives here; the request executor builds on it.

pub mod retry;

// Re-export retry types
pub use retry::{
    policies, BackoffStrategy, RetryConfig, RetryDecision, RetryError,
    RetryExecutor, RetryPolicy, RetryResult,
};
