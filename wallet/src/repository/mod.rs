//! Coin bookkeeping: the shared registry, transaction processing and its persistent mirror.

mod error;
pub mod keys;
mod processor;
mod store;
mod utxo;
mod wallet;

pub use error::Error;
pub use processor::{InputOutcome, OutputOutcome, ProcessReport, TransactionProcessor};
pub use store::UtxoStore;
pub use utxo::UtxoRegistry;
pub use wallet::{DynStorage, Wallet};

/// Result type of the wallet repository
pub type Result<T> = std::result::Result<T, Error>;
