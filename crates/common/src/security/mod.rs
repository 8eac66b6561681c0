//! Security primitives: vault key providers and zeroizing strings

pub mod encryption;

pub use encryption::{KeyProvider, KeySource, SecureString};
