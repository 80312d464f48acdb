use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use mona_data_structures::chain::Hash;

use super::*;
use crate::model::Coin;

type Address = Vec<u8>;

/// Unspent coins of every wallet address.
///
/// One lock guards the lists of all addresses: mutations take it exclusively and reads share
/// it, so every read observes a consistent state. Coin order inside a list is not preserved
/// across removals.
#[derive(Debug, Default)]
pub struct UtxoRegistry {
    coins: RwLock<HashMap<Address, Vec<Coin>>>,
}

impl UtxoRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // a panic while holding the lock cannot leave a list half updated, every mutation is a
    // single push, swap_remove or insert
    fn read(&self) -> RwLockReadGuard<'_, HashMap<Address, Vec<Coin>>> {
        self.coins.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Address, Vec<Coin>>> {
        self.coins.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append `coin` to the list of its owner.
    ///
    /// Fails with [`Error::CoinExists`] and leaves the list untouched if the owner already
    /// holds the coin of the same output, so processing a transaction again adds nothing.
    pub fn add(&self, coin: Coin) -> Result<()> {
        let mut coins = self.write();
        let list = coins.entry(coin.address.clone()).or_default();
        if list
            .iter()
            .any(|held| held.is_output(&coin.transaction_hash, coin.output_index))
        {
            return Err(Error::CoinExists {
                hash: coin.transaction_hash,
                index: coin.output_index,
            });
        }
        list.push(coin);

        Ok(())
    }

    /// Remove the coin created by output `index` of transaction `hash` from the list of
    /// `address`, returning it.
    ///
    /// The last coin of the list takes the place of the removed one. Fails with
    /// [`Error::CoinNotFound`] and leaves the list untouched if there is no such coin.
    pub fn remove(&self, address: &[u8], hash: &Hash, index: u32) -> Result<Coin> {
        self.write()
            .get_mut(address)
            .and_then(|list| {
                let position = list.iter().position(|coin| coin.is_output(hash, index))?;

                Some(list.swap_remove(position))
            })
            .ok_or(Error::CoinNotFound {
                hash: *hash,
                index,
            })
    }

    /// Replace the whole list of `address`.
    pub fn restore(&self, address: Address, list: Vec<Coin>) {
        self.write().insert(address, list);
    }

    /// Coins of `address`.
    pub fn coins_of(&self, address: &[u8]) -> Vec<Coin> {
        self.read().get(address).cloned().unwrap_or_default()
    }

    /// Coins of `address`, smallest value first.
    pub fn coins_by_value(&self, address: &[u8]) -> Vec<Coin> {
        let mut coins = self.coins_of(address);
        coins.sort_by_key(|coin| coin.value);

        coins
    }

    /// Sum of the values of the coins of `address`.
    pub fn balance_of(&self, address: &[u8]) -> u64 {
        self.read()
            .get(address)
            .map(|list| {
                list.iter()
                    .fold(0u64, |balance, coin| balance.saturating_add(coin.value))
            })
            .unwrap_or(0)
    }

    /// Sum of the values of the coins of all addresses, read under a single lock.
    pub fn total_balance(&self) -> u64 {
        self.read()
            .values()
            .flatten()
            .fold(0u64, |balance, coin| balance.saturating_add(coin.value))
    }

    /// Addresses that have, or once had, coins.
    pub fn addresses(&self) -> Vec<Address> {
        self.read().keys().cloned().collect()
    }

    /// Number of coins of all addresses.
    pub fn len(&self) -> usize {
        self.read().values().map(Vec::len).sum()
    }

    /// Whether there are no coins at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the whole registry.
    pub fn snapshot(&self) -> HashMap<Address, Vec<Coin>> {
        self.read().clone()
    }
}
