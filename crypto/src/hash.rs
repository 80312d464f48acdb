//! Various hash functions

use ripemd::Ripemd160;
use sha2::{Digest, Sha256 as Sha256Hasher};

/// Length in bytes of a SHA-256 digest
pub const SHA256_LEN: usize = 32;

/// Length in bytes of a HASH160 digest (RIPEMD-160 over SHA-256)
pub const HASH160_LEN: usize = 20;

/// Secure hash function output: 32 bytes
#[derive(Debug, Default, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash)]
pub struct Sha256(pub [u8; SHA256_LEN]);

impl AsRef<[u8]> for Sha256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Calculate the SHA256 hash
pub fn calculate_sha256(bytes: &[u8]) -> Sha256 {
    let digest = Sha256Hasher::digest(bytes);
    let mut hash = [0; SHA256_LEN];
    hash.copy_from_slice(digest.as_slice());

    Sha256(hash)
}

/// Calculate SHA256(SHA256(bytes)), the hash used to identify transactions
pub fn calculate_double_sha256(bytes: &[u8]) -> Sha256 {
    let Sha256(first) = calculate_sha256(bytes);

    calculate_sha256(&first)
}

/// Calculate RIPEMD160(SHA256(bytes)), the digest committed to by pay-to-public-key-hash
/// output scripts
pub fn calculate_hash160(bytes: &[u8]) -> [u8; HASH160_LEN] {
    let Sha256(sha) = calculate_sha256(bytes);
    let digest = Ripemd160::digest(sha);
    let mut hash = [0; HASH160_LEN];
    hash.copy_from_slice(digest.as_slice());

    hash
}
