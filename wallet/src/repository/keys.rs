//! Storage keys used by the wallet.

use mona_storage::key;

/// Key of the persisted coin list of `address`.
#[inline]
pub fn coins(address: &[u8]) -> Vec<u8> {
    key!(address)
}
