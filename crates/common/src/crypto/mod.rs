//! Shared cryptographic primitives used by the credential vault.

pub mod encryption;

pub use encryption::{derive_passphrase_key, EncryptedData, EncryptionService};
