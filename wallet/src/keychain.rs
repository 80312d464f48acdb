//! Which public keys belong to the wallet.

use std::{
    collections::{HashMap, HashSet},
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use mona_crypto::{
    address::pkh_address,
    hash::calculate_hash160,
    key::{self, KeyError, PK},
};
use mona_data_structures::chain::PublicKeyHash;

use crate::params::Params;

/// Ownership registry consulted by the transaction processor
pub trait KeyOwnership {
    /// Parse a key found in a script.
    fn parse_public_key(&self, bytes: &[u8]) -> Result<PK, KeyError> {
        key::parse_public_key(bytes)
    }

    /// Bytes identifying `key` as the owner of a coin.
    fn serialize_public_key(&self, key: &PK) -> Vec<u8> {
        key::serialize_public_key(key)
    }

    /// Human readable address of a public key hash, used in diagnostics.
    fn pkh_address(&self, pkh: &PublicKeyHash) -> String;

    /// Human readable address of `key`.
    fn address(&self, key: &PK) -> String {
        self.pkh_address(&calculate_hash160(&self.serialize_public_key(key)))
    }

    /// Whether `key` belongs to the wallet.
    fn is_owned(&self, key: &PK) -> bool;

    /// Owned key whose HASH160 is `pkh`, if any.
    fn lookup_pkh(&self, pkh: &PublicKeyHash) -> Option<PK>;
}

#[derive(Debug, Default)]
struct Keys {
    owned: HashSet<PK>,
    by_pkh: HashMap<PublicKeyHash, PK>,
}

/// In-memory set of owned keys.
///
/// The hash index is only ever modified together with the key set, under the same lock, so a
/// hash resolves to a key exactly when that key is owned. Both the compressed and the
/// uncompressed serialization of every key are indexed.
#[derive(Debug)]
pub struct Keychain {
    address_version: u8,
    keys: RwLock<Keys>,
}

impl Keychain {
    /// Empty keychain displaying addresses with `address_version`.
    pub fn new(address_version: u8) -> Self {
        Self {
            address_version,
            keys: RwLock::new(Keys::default()),
        }
    }

    /// Empty keychain for the network described by `params`.
    pub fn from_params(params: &Params) -> Self {
        Self::new(params.address_version)
    }

    fn read(&self) -> RwLockReadGuard<'_, Keys> {
        self.keys.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Keys> {
        self.keys.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start tracking `key`. Returns `false` if it was already owned.
    pub fn insert(&self, key: PK) -> bool {
        let mut keys = self.write();
        if !keys.owned.insert(key) {
            return false;
        }
        for pkh in key::public_key_hashes(&key) {
            keys.by_pkh.insert(pkh, key);
        }
        log::debug!("Tracking key {}", self.address(&key));

        true
    }

    /// Stop tracking `key`. Returns `false` if it was not owned.
    pub fn remove(&self, key: &PK) -> bool {
        let mut keys = self.write();
        if !keys.owned.remove(key) {
            return false;
        }
        for pkh in key::public_key_hashes(key) {
            keys.by_pkh.remove(&pkh);
        }

        true
    }

    /// Every owned key, in no particular order.
    pub fn keys(&self) -> Vec<PK> {
        self.read().owned.iter().copied().collect()
    }

    /// Number of owned keys.
    pub fn len(&self) -> usize {
        self.read().owned.len()
    }

    /// Whether no key is owned.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyOwnership for Keychain {
    fn pkh_address(&self, pkh: &PublicKeyHash) -> String {
        pkh_address(self.address_version, pkh)
    }

    fn is_owned(&self, key: &PK) -> bool {
        self.read().owned.contains(key)
    }

    fn lookup_pkh(&self, pkh: &PublicKeyHash) -> Option<PK> {
        self.read().by_pkh.get(pkh).copied()
    }
}
