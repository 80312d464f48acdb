use mona_config::{config::StorageBackend, Config};
use mona_data_structures::chain::Transaction;
use mona_storage::{backends::btreemap, db::Db, storage::Storage};

use super::*;
use crate::{
    keychain::{KeyOwnership, Keychain},
    params::Params,
};

#[cfg(test)]
mod tests;

/// Storage backend selected at runtime
pub type DynStorage = Box<dyn Storage + Send + Sync>;

/// Registry of owned coins kept in sync with a persistent store.
///
/// Transactions update the in-memory registry first. The addresses they touched are then
/// written to the store, after the registry lock has been released, so the store may briefly
/// lag behind the registry while several transactions are processed at once.
pub struct Wallet<S, K = Keychain> {
    registry: UtxoRegistry,
    keychain: K,
    store: UtxoStore<S>,
}

impl<S, K> Wallet<S, K>
where
    S: Storage,
    K: KeyOwnership,
{
    /// Build a wallet whose registry starts with the coins persisted in `store`.
    pub fn open(store: UtxoStore<S>, keychain: K) -> Result<Self> {
        let registry = UtxoRegistry::new();
        for (address, coins) in store.load()? {
            registry.restore(address, coins);
        }
        log::info!(
            "Loaded {} coins of {} addresses",
            registry.len(),
            registry.addresses().len()
        );

        Ok(Self {
            registry,
            keychain,
            store,
        })
    }

    /// Apply `transaction` to the registry and persist the coin lists it changed.
    ///
    /// Items that do not concern the wallet never make this fail, they are reported in the
    /// returned [`ProcessReport`]. Only a storage failure is an error, in which case the
    /// registry has already been updated.
    pub fn process_transaction(&self, transaction: &Transaction) -> Result<ProcessReport> {
        let report = TransactionProcessor::new(&self.registry, &self.keychain).process(transaction);
        self.store
            .mirror(&self.registry, &report.touched_addresses())?;

        Ok(report)
    }

    /// Sum of the values of every owned coin.
    pub fn balance(&self) -> u64 {
        self.registry.total_balance()
    }

    /// In-memory coin registry.
    pub fn registry(&self) -> &UtxoRegistry {
        &self.registry
    }

    /// Owned keys.
    pub fn keychain(&self) -> &K {
        &self.keychain
    }

    /// Persistent copy of the registry.
    pub fn store(&self) -> &UtxoStore<S> {
        &self.store
    }
}

impl<K> Wallet<DynStorage, K>
where
    K: KeyOwnership,
{
    /// Open the storage backend selected in `config` and load the wallet from it.
    pub fn from_config(config: &Config, keychain: K) -> Result<Self> {
        let params = Params::from_config(config);
        let db = Db::new(open_backend(config)?);

        Self::open(UtxoStore::new(db, params.coin_bucket), keychain)
    }
}

fn open_backend(config: &Config) -> Result<DynStorage> {
    match config.storage_backend() {
        StorageBackend::Memory => Ok(Box::new(btreemap::Backend::default())),
        #[cfg(feature = "rocksdb-backend")]
        StorageBackend::RocksDb => {
            let path = config.db_path();
            log::info!("Opening database at {}", path.display());

            Ok(Box::new(mona_storage::backends::rocksdb::open(path)?))
        }
        #[cfg(not(feature = "rocksdb-backend"))]
        backend @ StorageBackend::RocksDb => Err(Error::BackendUnavailable(backend)),
    }
}
