//! Per-wallet parameters derived from the configuration.

use mona_config::Config;

/// Initialization parameters that can be specific for each wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params {
    /// Version byte of displayed addresses
    pub address_version: u8,
    /// Bucket where coin lists are persisted
    pub coin_bucket: String,
}

impl Default for Params {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Params {
    /// Effective parameters for `config`.
    pub fn from_config(config: &Config) -> Self {
        Self {
            address_version: config.address_version(),
            coin_bucket: config.coin_bucket(),
        }
    }
}
