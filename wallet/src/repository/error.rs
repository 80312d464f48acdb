use thiserror::Error;

use mona_config::config::StorageBackend;
use mona_crypto::key::KeyError;
use mona_data_structures::chain::Hash;

use crate::script;

/// Errors of the wallet repository. Every variant but `Db` and `BackendUnavailable` is a
/// per-input or per-output outcome that transaction processing reports and moves past.
#[derive(Debug, Error)]
pub enum Error {
    /// A script did not match its template
    #[error("script mismatch: {0}")]
    Script(script::Error),
    /// An output script matched neither output template
    #[error("{0}")]
    UnrecognizedScript(script::UnrecognizedScript),
    /// A script carries bytes that are not a public key
    #[error("invalid public key: {0}")]
    Key(KeyError),
    /// The key or key hash does not belong to the wallet
    #[error("not concerned address {address}")]
    NotOwned {
        /// Display address of the key
        address: String,
    },
    /// An owned key spent a coin the registry does not hold
    #[error("coin was not found (transaction {hash}, output {index})")]
    CoinNotFound {
        /// Transaction of the missing coin
        hash: Hash,
        /// Output index of the missing coin
        index: u32,
    },
    /// The coin created by this output is already held
    #[error("coin already tracked (transaction {hash}, output {index})")]
    CoinExists {
        /// Transaction of the coin
        hash: Hash,
        /// Output index of the coin
        index: u32,
    },
    /// The storage mirror failed
    #[error("database failed: {0}")]
    Db(mona_storage::Error),
    /// The configured backend was not compiled in
    #[error("storage backend {0:?} is not available in this build")]
    BackendUnavailable(StorageBackend),
}

impl From<script::Error> for Error {
    fn from(err: script::Error) -> Self {
        Error::Script(err)
    }
}

impl From<script::UnrecognizedScript> for Error {
    fn from(err: script::UnrecognizedScript) -> Self {
        Error::UnrecognizedScript(err)
    }
}

impl From<KeyError> for Error {
    fn from(err: KeyError) -> Self {
        Error::Key(err)
    }
}

impl From<mona_storage::Error> for Error {
    fn from(err: mona_storage::Error) -> Self {
        Error::Db(err)
    }
}
