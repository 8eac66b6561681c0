//! Cryptographic primitives for symmetric encryption.
//!
//! - [`EncryptionService`]: AES-256-GCM encryption/decryption
//! - [`EncryptedData`]: nonce plus ciphertext (tag appended)
//! - [`derive_passphrase_key`]: SHA-256 passphrase digest as a key string
//!
//! String tokens are `base64url(nonce || ciphertext || tag)`, self-contained
//! so one token per line can be stored in a plain text file.
//!
//! ## Usage
//!
//! ```rust
//! use studyreport_common::crypto::encryption::{derive_passphrase_key, EncryptionService};
//!
//! let service = EncryptionService::from_encoded_key(&derive_passphrase_key("secret"))?;
//!
//! let token = service.encrypt_to_string(b"sensitive data")?;
//! let decrypted = service.decrypt_from_string(&token)?;
//! assert_eq!(decrypted, b"sensitive data");
//! # Ok::<(), studyreport_common::error::CommonError>(())
//! ```

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::error::{CommonError, CommonResult};

const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// Encrypted payload: a fresh 96-bit nonce and the ciphertext with its tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedData {
    pub nonce: Vec<u8>,
    pub ciphertext: Vec<u8>,
}

impl EncryptedData {
    /// `nonce || ciphertext || tag` as one byte string.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.nonce.len() + self.ciphertext.len());
        bytes.extend_from_slice(&self.nonce);
        bytes.extend_from_slice(&self.ciphertext);
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> CommonResult<Self> {
        if bytes.len() < NONCE_LEN + TAG_LEN {
            return Err(CommonError::crypto(format!(
                "Encrypted payload too short: {} bytes",
                bytes.len()
            )));
        }
        let (nonce, ciphertext) = bytes.split_at(NONCE_LEN);
        Ok(Self { nonce: nonce.to_vec(), ciphertext: ciphertext.to_vec() })
    }
}

/// Hash a passphrase with SHA-256 and encode the digest URL-safe base64.
///
/// The result is deterministic; anyone holding the passphrase holds the key.
pub fn derive_passphrase_key(passphrase: &str) -> String {
    let digest = Sha256::digest(passphrase.as_bytes());
    URL_SAFE.encode(digest)
}

/// AES-256-GCM encryption service.
pub struct EncryptionService {
    cipher: Aes256Gcm,
}

impl std::fmt::Debug for EncryptionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptionService").field("key", &"[REDACTED]").finish()
    }
}

impl EncryptionService {
    /// Create a new encryption service from a raw 32-byte key.
    pub fn new(key: Vec<u8>) -> CommonResult<Self> {
        if key.len() != KEY_LEN {
            return Err(CommonError::crypto("Encryption key must be exactly 32 bytes"));
        }

        let cipher = Aes256Gcm::new_from_slice(&key).map_err(|e| {
            CommonError::crypto(format!("Failed to create encryption cipher: {e}"))
        })?;

        Ok(Self { cipher })
    }

    /// Create a service from a URL-safe base64 key string (32 bytes decoded).
    pub fn from_encoded_key(encoded: &str) -> CommonResult<Self> {
        let key = URL_SAFE
            .decode(encoded.trim())
            .map_err(|e| CommonError::crypto(format!("Invalid key encoding: {e}")))?;
        Self::new(key)
    }

    /// Encrypt bytes under a fresh random nonce.
    pub fn encrypt(&self, data: &[u8]) -> CommonResult<EncryptedData> {
        let nonce_bytes = Self::generate_nonce();
        let ciphertext = self
            .cipher
            .encrypt(&Nonce::from(nonce_bytes), data)
            .map_err(|e| CommonError::crypto(format!("Encryption failed: {e}")))?;

        Ok(EncryptedData { nonce: nonce_bytes.to_vec(), ciphertext })
    }

    /// Decrypt an [`EncryptedData`] payload back into raw bytes.
    pub fn decrypt(&self, encrypted: &EncryptedData) -> CommonResult<Vec<u8>> {
        let nonce_array: [u8; NONCE_LEN] = encrypted
            .nonce
            .as_slice()
            .try_into()
            .map_err(|_| CommonError::crypto("Nonce must be exactly 12 bytes for AES-256-GCM"))?;

        self.cipher
            .decrypt(&Nonce::from(nonce_array), encrypted.ciphertext.as_ref())
            .map_err(|e| CommonError::crypto(format!("Decryption failed: {e}")))
    }

    /// Encrypt bytes into a URL-safe base64 token.
    pub fn encrypt_to_string(&self, data: &[u8]) -> CommonResult<String> {
        let encrypted = self.encrypt(data)?;
        Ok(URL_SAFE.encode(encrypted.to_bytes()))
    }

    /// Decode a URL-safe base64 token and decrypt it.
    pub fn decrypt_from_string(&self, token: &str) -> CommonResult<Vec<u8>> {
        let decoded = URL_SAFE
            .decode(token.trim())
            .map_err(|e| CommonError::crypto(format!("Base64 decode failed: {e}")))?;
        self.decrypt(&EncryptedData::from_bytes(&decoded)?)
    }

    fn generate_nonce() -> [u8; NONCE_LEN] {
        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce);
        nonce
    }
}
