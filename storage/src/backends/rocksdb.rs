//! # Rocksdb storage backend
//!
//! Storage backend that persists data in the file system using a RocksDB database.
use std::path::Path;

use crate::storage::{Result, Storage, StorageIterator, WriteBatch, WriteBatchItem};

/// Rocksdb backend
pub type Backend = rocksdb::DB;

/// Open (creating it if missing) a RocksDB database at `path`.
pub fn open<P: AsRef<Path>>(path: P) -> Result<Backend> {
    let db = Backend::open_default(path.as_ref())?;
    log::debug!("Opened RocksDB database at {}", path.as_ref().display());

    Ok(db)
}

impl Storage for Backend {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let result = Backend::get(self, key)?;
        Ok(result)
    }

    fn put(&self, key: Vec<u8>, value: Vec<u8>) -> Result<()> {
        Backend::put(self, key, value)?;
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        Backend::delete(self, key)?;
        Ok(())
    }

    fn prefix_iterator<'a, 'b: 'a>(&'a self, prefix: &'b [u8]) -> Result<StorageIterator<'a>> {
        let mut entries = vec![];
        let iter = Backend::iterator(
            self,
            rocksdb::IteratorMode::From(prefix, rocksdb::Direction::Forward),
        );
        for item in iter {
            let (k, v) = item?;
            if !k.starts_with(prefix) {
                break;
            }
            entries.push((k.into_vec(), v.into_vec()));
        }

        Ok(Box::new(entries.into_iter()))
    }

    /// Atomically write a batch of operations
    fn write(&self, batch: WriteBatch) -> Result<()> {
        let mut rocksdb_batch = rocksdb::WriteBatch::default();

        for item in batch.batch {
            match item {
                WriteBatchItem::Put(key, value) => {
                    rocksdb_batch.put(key, value);
                }
                WriteBatchItem::Delete(key) => {
                    rocksdb_batch.delete(key);
                }
            }
        }

        Backend::write(self, rocksdb_batch)?;

        Ok(())
    }
}
