//! # studyreport Domain
//!
//! Business domain types and models for studyreport.
//!
//! This crate contains:
//! - Wire shapes of the learning-progress service (envelope, pages, records)
//! - Credentials, sessions and the cookie jar
//! - Domain error types and Result definitions
//! - Configuration structures and constants
//! - Lenient deserializers for loosely typed payloads
//!
//! ## Architecture
//! - No dependencies on other studyreport crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
