//! HTTP adapter for the request executor port

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
