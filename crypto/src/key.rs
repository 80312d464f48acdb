//! secp256k1 public keys as they appear inside scripts.
//!
//! Keys are accepted in both compressed (33 bytes) and uncompressed (65 bytes) SEC1 form, but
//! the wallet always identifies a key by its compressed serialization.

use secp256k1::PublicKey;
use thiserror::Error;

use crate::hash::{calculate_hash160, HASH160_LEN};

/// Public Key
pub type PK = PublicKey;

/// Secret Key
pub type SK = secp256k1::SecretKey;

/// Errors produced while handling key material
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    /// The bytes are not a valid SEC1 encoded secp256k1 point
    #[error("invalid public key ({len} bytes): {source}")]
    InvalidPublicKey {
        /// Length of the rejected key blob
        len: usize,
        /// Underlying secp256k1 error
        source: secp256k1::Error,
    },
    /// The bytes are not a valid secp256k1 secret key
    #[error("invalid secret key: {0}")]
    InvalidSecretKey(secp256k1::Error),
}

/// Parse a SEC1 encoded public key.
pub fn parse_public_key(bytes: &[u8]) -> Result<PK, KeyError> {
    PublicKey::from_slice(bytes).map_err(|source| KeyError::InvalidPublicKey {
        len: bytes.len(),
        source,
    })
}

/// Canonical serialization of a public key: compressed SEC1, 33 bytes.
pub fn serialize_public_key(key: &PK) -> Vec<u8> {
    key.serialize().to_vec()
}

/// HASH160 digests of both the compressed and the uncompressed serialization of `key`.
///
/// A pay-to-public-key-hash output may commit to either form, so both must be recognized.
pub fn public_key_hashes(key: &PK) -> [[u8; HASH160_LEN]; 2] {
    [
        calculate_hash160(&key.serialize()),
        calculate_hash160(&key.serialize_uncompressed()),
    ]
}

/// Derive the public key for a 32-byte secret.
pub fn public_key_from_secret(secret: &[u8]) -> Result<PK, KeyError> {
    let secret_key = SK::from_slice(secret).map_err(KeyError::InvalidSecretKey)?;

    Ok(PublicKey::from_secret_key_global(&secret_key))
}
