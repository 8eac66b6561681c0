//! Report exports: fetch, transform, hand to the sink

pub mod ports;
pub mod service;

pub use service::{ExportOutcome, ReportService};
