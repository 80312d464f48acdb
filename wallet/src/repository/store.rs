use mona_storage::{db::Db, storage::Storage};

use super::*;
use crate::model::Coin;

/// Persisted copy of the registry: one entry per address in the coin bucket, holding the
/// encoded coin list.
pub struct UtxoStore<S> {
    db: Db<S>,
    bucket: String,
}

impl<S> UtxoStore<S>
where
    S: Storage,
{
    /// Store keeping coin lists in `bucket` of `db`.
    pub fn new(db: Db<S>, bucket: impl Into<String>) -> Self {
        Self {
            db,
            bucket: bucket.into(),
        }
    }

    /// Underlying database.
    pub fn db(&self) -> &Db<S> {
        &self.db
    }

    /// Persisted coin list of `address`, empty if none.
    pub fn coins_of(&self, address: &[u8]) -> Result<Vec<Coin>> {
        match self.db.get_encoded(&self.bucket, &keys::coins(address)) {
            Ok(coins) => Ok(coins),
            Err(mona_storage::Error::BucketNotFound(_))
            | Err(mona_storage::Error::KeyNotFound { .. }) => Ok(vec![]),
            Err(e) => Err(e.into()),
        }
    }

    /// Every persisted coin list.
    pub fn load(&self) -> Result<Vec<(Vec<u8>, Vec<Coin>)>> {
        if !self.db.has_bucket(&self.bucket)? {
            return Ok(vec![]);
        }

        self.db
            .scan(&self.bucket, &[])?
            .into_iter()
            .map(|(address, value)| -> Result<(Vec<u8>, Vec<Coin>)> {
                Ok((address, mona_storage::values::decode(&value)?))
            })
            .collect()
    }

    /// Overwrite the persisted lists of `addresses` with their current state in `registry`,
    /// in one atomic write. Empty lists are deleted.
    pub fn mirror<'a, I>(&self, registry: &UtxoRegistry, addresses: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Vec<u8>>,
    {
        let mut batch = self.db.batch();
        for address in addresses {
            let coins = registry.coins_of(address);
            let key = keys::coins(address);
            if coins.is_empty() {
                batch.delete(&self.bucket, &key);
            } else {
                batch.put_encoded(&self.bucket, &key, &coins)?;
            }
        }

        if batch.is_empty() {
            return Ok(());
        }

        Ok(self.db.write(batch)?)
    }
}
