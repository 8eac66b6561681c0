//! Paged listing aggregation and the supplementary org/class queries

pub mod service;

pub use service::PageAggregator;
