//! Error type definitions for the Storage module.

use thiserror::Error;

/// Storage Errors while operating on database
#[derive(Debug, Error)]
pub enum Error {
    /// The bucket has never been written to
    #[error("bucket not found {0}")]
    BucketNotFound(String),
    /// The key does not exist in the bucket
    #[error("key not found (bucket: {bucket}, key: {key})")]
    KeyNotFound {
        /// Bucket name
        bucket: String,
        /// Hex encoded key
        key: String,
    },
    /// A stored value could not be converted back into the requested type
    #[error("cannot decode value: {0}")]
    Decode(String),
    /// A key enumerated by prefix does not start with a NUL-terminated string
    #[error("key does not have a string prefix")]
    NoStringPrefix,
    /// Errors when encoding or decoding structured values
    #[error("bincode failed: {0}")]
    Bincode(#[from] bincode::Error),
    /// A lock guarding a backend was poisoned by a panicking thread
    #[error("mutex poison error")]
    MutexPoison,
    /// RocksDB backend error
    #[cfg(feature = "rocksdb-backend")]
    #[error("rocksdb failed: {0}")]
    Rocksdb(#[from] rocksdb::Error),
}

impl<T> From<std::sync::PoisonError<T>> for Error {
    fn from(_err: std::sync::PoisonError<T>) -> Self {
        Error::MutexPoison
    }
}

/// Result type for the Storage module.
pub type Result<T> = std::result::Result<T, Error>;
