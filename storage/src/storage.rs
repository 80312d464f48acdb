//! Module containing a `Storage` generic trait that can be implemented for different specific
//! storage backends.

use std::sync::Arc;

pub use crate::error::Result;

/// Iterator over the key/value pairs sharing a prefix, in ascending key order
pub type StorageIterator<'a> = Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)> + 'a>;

/// This is a generic trait that exposes a very simple key/value CRUD API for data storage.
/// This trait can be easily implemented for any specific storage backend solution (databases,
/// volatile memory, flat files, etc.)
pub trait Storage {
    /// Retrieve an entry from the storage, identified by its key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Create / update entries in the storage, identified by a key.
    fn put(&self, key: Vec<u8>, value: Vec<u8>) -> Result<()>;

    /// Delete an entry from the storage, identified by its key.
    fn delete(&self, key: &[u8]) -> Result<()>;

    /// Iterate over all the entries whose key starts with `prefix`.
    fn prefix_iterator<'a, 'b: 'a>(&'a self, prefix: &'b [u8]) -> Result<StorageIterator<'a>>;

    /// Atomically write a batch of operations.
    fn write(&self, batch: WriteBatch) -> Result<()>;
}

macro_rules! forward_storage {
    ($($pointer:ident),*) => {$(
        impl<T: Storage + ?Sized> Storage for $pointer<T> {
            fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
                (**self).get(key)
            }

            fn put(&self, key: Vec<u8>, value: Vec<u8>) -> Result<()> {
                (**self).put(key, value)
            }

            fn delete(&self, key: &[u8]) -> Result<()> {
                (**self).delete(key)
            }

            fn prefix_iterator<'a, 'b: 'a>(
                &'a self,
                prefix: &'b [u8],
            ) -> Result<StorageIterator<'a>> {
                (**self).prefix_iterator(prefix)
            }

            fn write(&self, batch: WriteBatch) -> Result<()> {
                (**self).write(batch)
            }
        }
    )*};
}

// backends chosen at runtime are boxed, shared ones are reference counted
forward_storage!(Box, Arc);

/// A list of put and delete operations to apply atomically
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WriteBatch {
    /// Operations in the order they were added
    pub batch: Vec<WriteBatchItem>,
}

/// A single operation of a [`WriteBatch`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteBatchItem {
    /// Insert or replace a value
    Put(Vec<u8>, Vec<u8>),
    /// Remove a value
    Delete(Vec<u8>),
}

impl WriteBatch {
    /// Queue a put operation.
    pub fn put(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.batch.push(WriteBatchItem::Put(key, value));
    }

    /// Queue a delete operation.
    pub fn delete(&mut self, key: Vec<u8>) {
        self.batch.push(WriteBatchItem::Delete(key));
    }

    /// Whether no operation has been queued.
    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }
}
