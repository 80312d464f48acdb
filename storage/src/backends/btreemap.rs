//! # BTreeMap storage backend
//!
//! Storage backend that keeps data in a heap-allocated BTreeMap. Keys are kept sorted, so
//! prefix iteration is a range scan.
use std::{collections::BTreeMap, sync::RwLock};

use crate::storage::{Result, Storage, StorageIterator, WriteBatch, WriteBatchItem};

/// BTreeMap backend
pub type Backend = RwLock<BTreeMap<Vec<u8>, Vec<u8>>>;

impl Storage for Backend {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.read()?.get(key).map(|slice| slice.to_vec()))
    }

    fn put(&self, key: Vec<u8>, value: Vec<u8>) -> Result<()> {
        self.write()?.insert(key, value);
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        self.write()?.remove(key);
        Ok(())
    }

    fn prefix_iterator<'a, 'b: 'a>(&'a self, prefix: &'b [u8]) -> Result<StorageIterator<'a>> {
        // Entries are copied out so that the read lock is not held by the iterator
        let entries: Vec<(Vec<u8>, Vec<u8>)> = self
            .read()?
            .range(prefix.to_vec()..)
            .take_while(|(k, _v)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(Box::new(entries.into_iter()))
    }

    fn write(&self, batch: WriteBatch) -> Result<()> {
        let mut map = self.write()?;

        for item in batch.batch {
            match item {
                WriteBatchItem::Put(key, value) => {
                    map.insert(key, value);
                }
                WriteBatchItem::Delete(key) => {
                    map.remove(&key);
                }
            }
        }

        Ok(())
    }
}
