//! Base58Check display addresses

use crate::hash::HASH160_LEN;

/// Encode a public key hash as a Base58Check address with the given version byte.
pub fn pkh_address(version: u8, pkh: &[u8; HASH160_LEN]) -> String {
    bs58::encode(pkh).with_check_version(version).into_string()
}
