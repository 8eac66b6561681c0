//! Utility helpers for domain types

pub mod serde;
