//! # Default per-network values
//!
//! This module contains per-network default values for the wallet params.
use std::path::PathBuf;

use crate::config::{Network, StorageBackend};

/// Trait defining all the configuration params that have a suitable
/// default value depending on the network (mainnet, testnet).
pub trait Defaults {
    /// Default log level
    fn log_level(&self) -> log::LevelFilter {
        log::LevelFilter::Info
    }

    /// Keep coins in memory only unless told otherwise
    fn storage_backend(&self) -> StorageBackend {
        StorageBackend::Memory
    }

    /// Default path for the database
    fn storage_db_path(&self) -> PathBuf;

    /// Version byte prepended to public key hashes in display addresses
    fn wallet_address_version(&self) -> u8;

    /// Bucket holding the persisted coin lists
    fn wallet_coin_bucket(&self) -> String {
        "coin".to_string()
    }
}

/// Mainnet defaults
pub struct Mainnet;

/// Testnet defaults
pub struct Testnet;

impl Defaults for Mainnet {
    fn storage_db_path(&self) -> PathBuf {
        PathBuf::from(".mona")
    }

    fn wallet_address_version(&self) -> u8 {
        0x32
    }
}

impl Defaults for Testnet {
    fn storage_db_path(&self) -> PathBuf {
        PathBuf::from(".mona_testnet")
    }

    fn wallet_address_version(&self) -> u8 {
        0x6f
    }
}

/// Defaults for `network`.
pub fn for_network(network: Network) -> &'static dyn Defaults {
    match network {
        Network::Mainnet => &Mainnet,
        Network::Testnet => &Testnet,
    }
}
