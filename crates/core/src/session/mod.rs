//! Login and session establishment

pub mod ports;
pub mod service;

pub use service::SessionManager;
