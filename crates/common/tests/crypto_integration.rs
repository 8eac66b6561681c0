//! Integration tests for vault key material and token sealing
//!
//! Exercises the path the credential vault takes: a key source produces an
//! encoded key, the service seals each value into a standalone token, and
//! only the same key opens it again.

#![cfg(feature = "platform")]

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use studyreport_common::crypto::derive_passphrase_key;
use studyreport_common::{KeyProvider, KeySource, SymmetricEncryptionService};

/// Tokens carry their nonce, so a second service instance built from the same
/// key source decrypts them.
#[test]
fn tokens_round_trip_across_instances_of_same_key_source() {
    let source = KeySource::passphrase("JiangxiYouthStudyMaker");
    let sealer = SymmetricEncryptionService::from_encoded_key(
        source.key().expect("key derivation should succeed").expose(),
    )
    .expect("derived key should be valid");
    let opener = SymmetricEncryptionService::from_encoded_key(
        source.key().expect("key derivation should succeed").expose(),
    )
    .expect("derived key should be valid");

    let token = sealer.encrypt_to_string("账号13800000000".as_bytes()).expect("encrypt");
    let raw = URL_SAFE.decode(&token).expect("token should be URL-safe base64");
    assert_eq!(raw.len(), 12 + "账号13800000000".len() + 16, "nonce || ciphertext || tag");

    let opened = opener.decrypt_from_string(&token).expect("decrypt");
    assert_eq!(String::from_utf8(opened).expect("utf-8"), "账号13800000000");
}

/// A key read from the environment and a passphrase-derived key are
/// interchangeable when they encode the same bytes.
#[test]
fn environment_key_matches_equivalent_passphrase_key() {
    let encoded = derive_passphrase_key("shared-secret");
    std::env::set_var("STUDYREPORT_IT_VAULT_KEY", &encoded);

    let from_env = SymmetricEncryptionService::from_encoded_key(
        KeySource::environment("STUDYREPORT_IT_VAULT_KEY").key().expect("env key").expose(),
    )
    .expect("env key should be valid");
    let from_passphrase =
        SymmetricEncryptionService::from_encoded_key(&encoded).expect("passphrase key");

    let token = from_passphrase.encrypt_to_string(b"pw").expect("encrypt");
    assert_eq!(from_env.decrypt_from_string(&token).expect("decrypt"), b"pw");
    let reverse = from_env.encrypt_to_string(b"pw").expect("encrypt");
    assert_eq!(from_passphrase.decrypt_from_string(&reverse).expect("decrypt"), b"pw");

    std::env::remove_var("STUDYREPORT_IT_VAULT_KEY");
}

/// Flipping a single ciphertext byte must fail tag verification rather than
/// yield altered plaintext.
#[test]
fn tampered_token_fails_authentication() {
    let service = SymmetricEncryptionService::from_encoded_key(&derive_passphrase_key("tamper"))
        .expect("key");
    let token = service.encrypt_to_string(b"password").expect("encrypt");

    let mut raw = URL_SAFE.decode(&token).expect("decode");
    let last = raw.len() - 1;
    raw[last] ^= 0x01;
    let tampered = URL_SAFE.encode(raw);

    let err = service.decrypt_from_string(&tampered).expect_err("tampering must be detected");
    assert!(err.is_crypto());
}
