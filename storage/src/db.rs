//! Bucketed, typed access to a [`Storage`] backend.
//!
//! Every entry lives inside a named bucket: its physical key is the bucket name, a NUL byte
//! and the composite key built with [`key!`](crate::key). A bucket exists once something has
//! been written to it; reading from a bucket that was never written fails with
//! [`Error::BucketNotFound`].

use std::{collections::BTreeSet, sync::Mutex};

use serde::{de::DeserializeOwned, Serialize};

use crate::{
    error::{Error, Result},
    storage::{Storage, WriteBatch},
    values::{self, Storable},
};

const BUCKETS_PREFIX: &[u8] = b"\0buckets\0";

fn bucket_prefix(bucket: &str) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(bucket.len() + 1);
    prefix.extend_from_slice(bucket.as_bytes());
    prefix.push(0x00);
    prefix
}

fn bucket_marker(bucket: &str) -> Vec<u8> {
    [BUCKETS_PREFIX, bucket.as_bytes()].concat()
}

fn full_key(bucket: &str, key: &[u8]) -> Vec<u8> {
    [bucket_prefix(bucket).as_slice(), key].concat()
}

fn key_not_found(bucket: &str, key: &[u8]) -> Error {
    Error::KeyNotFound {
        bucket: bucket.to_string(),
        key: hex::encode(key),
    }
}

/// Typed key/value database organised in buckets
pub struct Db<S> {
    backend: S,
    // serializes read-modify-write sequences such as set updates
    rmw: Mutex<()>,
}

impl<S> Db<S>
where
    S: Storage,
{
    /// Wrap a storage backend.
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            rmw: Mutex::new(()),
        }
    }

    /// Access the underlying backend.
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Whether something has ever been written to `bucket`.
    pub fn has_bucket(&self, bucket: &str) -> Result<bool> {
        Ok(self.backend.get(&bucket_marker(bucket))?.is_some())
    }

    fn ensure_bucket(&self, bucket: &str) -> Result<()> {
        if self.has_bucket(bucket)? {
            Ok(())
        } else {
            Err(Error::BucketNotFound(bucket.to_string()))
        }
    }

    /// Raw bytes stored under `key`, if any.
    pub fn get_raw(&self, bucket: &str, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.ensure_bucket(bucket)?;

        self.backend.get(&full_key(bucket, key))
    }

    /// Get one value and convert it to `V`.
    pub fn get<V: Storable>(&self, bucket: &str, key: &[u8]) -> Result<V> {
        let bytes = self
            .get_raw(bucket, key)?
            .ok_or_else(|| key_not_found(bucket, key))?;

        V::from_bytes(&bytes)
    }

    /// Get one structured value.
    pub fn get_encoded<V: DeserializeOwned>(&self, bucket: &str, key: &[u8]) -> Result<V> {
        let bytes = self
            .get_raw(bucket, key)?
            .ok_or_else(|| key_not_found(bucket, key))?;

        values::decode(&bytes)
    }

    /// Set one key/value pair, creating the bucket if needed.
    pub fn put<V: Storable>(&self, bucket: &str, key: &[u8], value: &V) -> Result<()> {
        let mut batch = self.batch();
        batch.put(bucket, key, value);
        self.write(batch)
    }

    /// Set one key/structured value pair, creating the bucket if needed.
    pub fn put_encoded<V: Serialize + ?Sized>(
        &self,
        bucket: &str,
        key: &[u8],
        value: &V,
    ) -> Result<()> {
        let mut batch = self.batch();
        batch.put_encoded(bucket, key, value)?;
        self.write(batch)
    }

    /// Whether `key` exists in `bucket`. A missing bucket simply has no keys.
    pub fn has_key(&self, bucket: &str, key: &[u8]) -> Result<bool> {
        if !self.has_bucket(bucket)? {
            return Ok(false);
        }

        Ok(self.backend.get(&full_key(bucket, key))?.is_some())
    }

    /// Delete one key/value pair.
    pub fn delete(&self, bucket: &str, key: &[u8]) -> Result<()> {
        self.ensure_bucket(bucket)?;

        self.backend.delete(&full_key(bucket, key))
    }

    /// All entries of `bucket` whose key starts with `prefix`, with the bucket part stripped
    /// from the keys.
    pub fn scan(&self, bucket: &str, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        self.ensure_bucket(bucket)?;

        let bucket_len = bucket.len() + 1;
        let full_prefix = full_key(bucket, prefix);
        let entries = self
            .backend
            .prefix_iterator(&full_prefix)?
            .map(|(k, v)| (k[bucket_len..].to_vec(), v))
            .collect();

        Ok(entries)
    }

    /// Count the entries whose key has `prefix`.
    pub fn count(&self, bucket: &str, prefix: &[u8]) -> Result<usize> {
        Ok(self.scan(bucket, prefix)?.len())
    }

    /// String values whose key has `prefix`.
    pub fn get_strings(&self, bucket: &str, prefix: &[u8]) -> Result<Vec<String>> {
        self.scan(bucket, prefix)?
            .into_iter()
            .map(|(_k, v)| String::from_bytes(&v))
            .collect()
    }

    /// Every key of `bucket`, as a string.
    pub fn key_strings(&self, bucket: &str) -> Result<Vec<String>> {
        self.scan(bucket, &[])?
            .into_iter()
            .map(|(k, _v)| String::from_bytes(&k))
            .collect()
    }

    /// Distinct leading string components of the keys of `bucket`. Every key must start with
    /// a NUL-terminated string.
    pub fn string_prefixes(&self, bucket: &str) -> Result<Vec<String>> {
        let mut prefixes: Vec<String> = vec![];
        for (k, _v) in self.scan(bucket, &[])? {
            let end = k
                .iter()
                .position(|b| *b == 0x00)
                .ok_or(Error::NoStringPrefix)?;
            let prefix = String::from_bytes(&k[..end])?;
            if prefixes.last() != Some(&prefix) {
                prefixes.push(prefix);
            }
        }

        Ok(prefixes)
    }

    /// Members of the set stored under `key`.
    pub fn set_members(&self, bucket: &str, key: &[u8]) -> Result<BTreeSet<String>> {
        self.get_encoded(bucket, key)
    }

    /// Add `member` to the set stored under `key`, creating the set if needed.
    pub fn set_insert(&self, bucket: &str, key: &[u8], member: &str) -> Result<()> {
        let _guard = self.rmw.lock()?;
        let mut members = self.set_members(bucket, key).or_else(|e| match e {
            Error::BucketNotFound(_) | Error::KeyNotFound { .. } => Ok(BTreeSet::new()),
            e => Err(e),
        })?;
        members.insert(member.to_string());

        self.put_encoded(bucket, key, &members)
    }

    /// Remove `member` from the set stored under `key`. Removing the last member deletes the
    /// key.
    pub fn set_remove(&self, bucket: &str, key: &[u8], member: &str) -> Result<()> {
        let _guard = self.rmw.lock()?;
        let mut members = self.set_members(bucket, key)?;
        members.remove(member);

        if members.is_empty() {
            self.delete(bucket, key)
        } else {
            self.put_encoded(bucket, key, &members)
        }
    }

    /// Whether the set stored under `key` contains `member`. A missing set contains nothing.
    pub fn set_contains(&self, bucket: &str, key: &[u8], member: &str) -> Result<bool> {
        match self.set_members(bucket, key) {
            Ok(members) => Ok(members.contains(member)),
            Err(Error::BucketNotFound(_)) | Err(Error::KeyNotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Start a batch of operations to be applied atomically with [`Db::write`].
    pub fn batch(&self) -> Batch {
        Batch::default()
    }

    /// Atomically apply a batch.
    pub fn write(&self, batch: Batch) -> Result<()> {
        let mut write_batch = WriteBatch::default();
        for bucket in batch.buckets {
            write_batch.put(bucket_marker(&bucket), vec![]);
        }
        write_batch.batch.extend(batch.inner.batch);
        log::trace!("Writing a batch of {} operations", write_batch.batch.len());

        self.backend.write(write_batch)
    }
}

/// Bucketed write batch
#[derive(Debug, Default)]
pub struct Batch {
    buckets: BTreeSet<String>,
    inner: WriteBatch,
}

impl Batch {
    /// Queue a put of a value.
    pub fn put<V: Storable>(&mut self, bucket: &str, key: &[u8], value: &V) {
        self.buckets.insert(bucket.to_string());
        self.inner.put(full_key(bucket, key), value.to_bytes());
    }

    /// Queue a put of a structured value.
    pub fn put_encoded<V: Serialize + ?Sized>(
        &mut self,
        bucket: &str,
        key: &[u8],
        value: &V,
    ) -> Result<()> {
        let bytes = values::encode(value)?;
        self.buckets.insert(bucket.to_string());
        self.inner.put(full_key(bucket, key), bytes);

        Ok(())
    }

    /// Queue a delete.
    pub fn delete(&mut self, bucket: &str, key: &[u8]) {
        self.inner.delete(full_key(bucket, key));
    }

    /// Whether nothing has been queued.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
