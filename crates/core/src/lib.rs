//! # studyreport Core
//!
//! Business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for the request executor, cookie and
//!   credential storage, and the export sink
//! - Services: login, page aggregation, report export
//! - Record-to-table transformations
//!
//! ## Architecture Principles
//! - Only depends on `studyreport-domain`
//! - No HTTP, file system, or terminal code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod aggregation;
pub mod report;
pub mod request;
pub mod session;
pub mod transform;

// Re-export specific items to avoid ambiguity
pub use aggregation::PageAggregator;
pub use report::ports::ExportSink;
pub use report::{ExportOutcome, ReportService};
pub use request::ports::RequestExecutor;
pub use session::ports::{CookieStore, CredentialStore};
pub use session::SessionManager;
pub use transform::UnfinishedScope;
