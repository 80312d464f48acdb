//! Load the configuration from a file or a `String` written in [Toml format](https://en.wikipedia.org/wiki/TOML)

use std::{fs, io, path::Path};

use thiserror::Error;

use crate::Config;

/// Error type denoting the different errors this module can fail with.
/// Parsing the configuration from Toml might fail with a
/// `toml::de::Error`, but loading that configuration from a file
/// might also fail with a `std::io::Error`.
#[derive(Debug, Error)]
pub enum Error {
    /// Indicates there was an error when trying to load configuration from a file.
    #[error("cannot read configuration file: {0}")]
    IOError(#[from] io::Error),
    /// Indicates there was an error when trying to build a
    /// `mona_config::Config` instance out of the Toml string given.
    #[error("cannot parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Just like `std::result::Result` but with the error param fixed to
/// `Error` type in this module.
pub type Result<T> = std::result::Result<T, Error>;

/// Load configuration from a file written in Toml format.
pub fn from_file<P: AsRef<Path>>(filename: P) -> Result<Config> {
    let contents = fs::read_to_string(filename)?;

    from_str(&contents)
}

/// Load configuration from a string written in Toml format.
pub fn from_str(contents: &str) -> Result<Config> {
    Ok(toml::from_str(contents)?)
}
