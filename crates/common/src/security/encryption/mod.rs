//! Key management built on top of the primitives in `crypto::encryption`
//!
//! - **Secure Strings**: memory-safe string handling with automatic zeroing
//! - **Key Providers**: one interface for where a vault key comes from

pub mod key_provider;
pub mod secure_string;

// Re-export commonly used types
pub use key_provider::{KeyProvider, KeySource};
pub use secure_string::SecureString;

pub use crate::crypto::encryption::{
    EncryptedData, EncryptionService as SymmetricEncryptionService,
};
