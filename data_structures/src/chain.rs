use std::fmt;

use serde::{Deserialize, Serialize};

use mona_crypto::hash::{calculate_double_sha256, Sha256, HASH160_LEN, SHA256_LEN};

/// SHA-256 Hash
pub type SHA256 = [u8; SHA256_LEN];

/// Public Key Hash: HASH160 of a serialized public key (20 bytes)
pub type PublicKeyHash = [u8; HASH160_LEN];

/// Output index used by the coinbase sentinel input
pub const COINBASE_INDEX: u32 = u32::MAX;

/// Hash
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Serialize, Deserialize, Hash)]
pub enum Hash {
    /// SHA-256 Hash
    SHA256(SHA256),
}

impl Default for Hash {
    fn default() -> Hash {
        Hash::SHA256([0; 32])
    }
}

impl Hash {
    /// Whether every byte of the hash is zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Hash::SHA256(h) => h.iter().all(|b| *b == 0),
        }
    }
}

/// Conversion between mona_crypto::Sha256 and mona_data_structures::Hash
impl From<Sha256> for Hash {
    fn from(x: Sha256) -> Self {
        Hash::SHA256(x.0)
    }
}

impl From<SHA256> for Hash {
    fn from(x: SHA256) -> Self {
        Hash::SHA256(x)
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        match self {
            Hash::SHA256(h) => &h[..],
        }
    }
}

/// Hashes are displayed byte-reversed, the way block explorers and node RPCs show them.
impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hash::SHA256(h) => h.iter().rev().try_for_each(|x| write!(f, "{:02x}", x)),
        }
    }
}

/// Reference to an output of a previous transaction
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Serialize, Deserialize, Hash)]
pub struct OutPoint {
    /// Hash of the transaction containing the output
    pub hash: Hash,
    /// Position of the output inside that transaction
    pub index: u32,
}

impl OutPoint {
    /// The null outpoint referenced by coinbase inputs: all-zero hash, maximum index.
    pub fn is_null(&self) -> bool {
        self.hash.is_zero() && self.index == COINBASE_INDEX
    }
}

/// Transaction input
#[derive(Debug, Eq, PartialEq, Clone, Serialize, Deserialize)]
pub struct TransactionInput {
    /// Output being spent
    pub previous_output: OutPoint,
    /// Raw signature script
    pub script: Vec<u8>,
    /// Sequence number
    pub sequence: u32,
}

impl TransactionInput {
    /// Whether this is the synthetic input of a block reward transaction.
    pub fn is_coinbase(&self) -> bool {
        self.previous_output.is_null()
    }
}

/// Transaction output
#[derive(Debug, Eq, PartialEq, Clone, Serialize, Deserialize)]
pub struct TransactionOutput {
    /// Amount in the smallest unit
    pub value: u64,
    /// Raw output script
    pub script: Vec<u8>,
}

/// Transaction data structure
#[derive(Debug, Eq, PartialEq, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction format version
    pub version: u32,
    /// Inputs
    pub inputs: Vec<TransactionInput>,
    /// Outputs
    pub outputs: Vec<TransactionOutput>,
    /// Lock time
    pub lock_time: u32,
}

impl Transaction {
    /// Transaction identifier: double SHA-256 of its wire serialization.
    pub fn hash(&self) -> Hash {
        calculate_double_sha256(&self.to_bytes()).into()
    }
}
