//! Types stored by the wallet.

use serde::{Deserialize, Serialize};

use mona_data_structures::chain::{Hash, OutPoint};

/// Standard output template a coin was received through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoinKind {
    /// `DUP HASH160 <pkh> EQUALVERIFY CHECKSIG`
    PayToPubKeyHash,
    /// `<public key> CHECKSIG`
    PayToPubKey,
}

impl CoinKind {
    /// Numeric tag of the template: 0 for pay-to-public-key-hash, 1 for pay-to-public-key.
    pub fn tag(self) -> u8 {
        match self {
            CoinKind::PayToPubKeyHash => 0,
            CoinKind::PayToPubKey => 1,
        }
    }
}

/// Unspent output owned by one of the wallet keys. A coin is a snapshot of the output it was
/// created from and is never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    /// Serialized public key of the owner
    pub address: Vec<u8>,
    /// Hash of the transaction that created the output
    pub transaction_hash: Hash,
    /// Position of the output in that transaction
    pub output_index: u32,
    /// Amount in the smallest unit
    pub value: u64,
    /// Template the output matched
    pub kind: CoinKind,
}

impl Coin {
    /// Reference that a spending input would carry.
    pub fn out_point(&self) -> OutPoint {
        OutPoint {
            hash: self.transaction_hash,
            index: self.output_index,
        }
    }

    /// Whether this coin was created by output `index` of transaction `hash`.
    pub fn is_output(&self, hash: &Hash, index: u32) -> bool {
        self.transaction_hash == *hash && self.output_index == index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags() {
        assert_eq!(CoinKind::PayToPubKeyHash.tag(), 0);
        assert_eq!(CoinKind::PayToPubKey.tag(), 1);
    }

    #[test]
    fn test_kind_is_encoded_as_its_tag() {
        let encoded = bincode::serialize(&CoinKind::PayToPubKey).unwrap();

        assert_eq!(encoded, vec![1, 0, 0, 0]);
    }

    #[test]
    fn test_coin_identity() {
        let hash = Hash::SHA256([7; 32]);
        let coin = Coin {
            address: vec![0x02; 33],
            transaction_hash: hash,
            output_index: 3,
            value: 1_000,
            kind: CoinKind::PayToPubKeyHash,
        };

        assert!(coin.is_output(&hash, 3));
        assert!(!coin.is_output(&hash, 4));
        assert!(!coin.is_output(&Hash::default(), 3));
        assert_eq!(coin.out_point(), OutPoint { hash, index: 3 });
    }
}
