//! # Config
//!
//! This module contains the `Config` struct, which holds all the
//! configuration params of the wallet core. Every section is optional in
//! the configuration file: missing fields take the value given by the
//! [defaults](crate::defaults) of the selected network.
//!
//! ```
//! use mona_config::config::{Config, Network};
//!
//! let config = Config::default();
//! assert_eq!(config.network, Network::Mainnet);
//! assert_eq!(config.address_version(), 0x32);
//! ```
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::defaults::{self, Defaults};

/// Network whose addresses the wallet displays
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Main network
    #[default]
    Mainnet,
    /// Test network
    Testnet,
}

/// Storage backend selection
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Volatile in-memory map
    #[default]
    Memory,
    /// RocksDB database on disk
    RocksDb,
}

/// The total configuration object
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Network the wallet operates on
    pub network: Network,
    /// Logging configuration
    pub log: Log,
    /// Storage-related configuration
    pub storage: Storage,
    /// Wallet-related configuration
    pub wallet: Wallet,
}

/// Logging configuration
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Level for the wallet's own modules, `info` when unset
    pub level: Option<log::LevelFilter>,
}

/// Storage-related configuration
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Storage {
    /// Backend, in-memory when unset
    pub backend: Option<StorageBackend>,
    /// Path to the directory that will contain the database. Used only if the backend is
    /// RocksDB.
    pub db_path: Option<PathBuf>,
}

/// Wallet-related configuration
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Wallet {
    /// Override of the network's address version byte
    pub address_version: Option<u8>,
    /// Bucket where coin lists are persisted
    pub coin_bucket: Option<String>,
}

impl Config {
    fn defaults(&self) -> &'static dyn Defaults {
        defaults::for_network(self.network)
    }

    /// Effective log level.
    pub fn log_level(&self) -> log::LevelFilter {
        self.log.level.unwrap_or_else(|| self.defaults().log_level())
    }

    /// Effective storage backend.
    pub fn storage_backend(&self) -> StorageBackend {
        self.storage
            .backend
            .unwrap_or_else(|| self.defaults().storage_backend())
    }

    /// Effective database path.
    pub fn db_path(&self) -> PathBuf {
        self.storage
            .db_path
            .clone()
            .unwrap_or_else(|| self.defaults().storage_db_path())
    }

    /// Effective address version byte.
    pub fn address_version(&self) -> u8 {
        self.wallet
            .address_version
            .unwrap_or_else(|| self.defaults().wallet_address_version())
    }

    /// Effective coin bucket name.
    pub fn coin_bucket(&self) -> String {
        self.wallet
            .coin_bucket
            .clone()
            .unwrap_or_else(|| self.defaults().wallet_coin_bucket())
    }
}
