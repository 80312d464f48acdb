//! UTXO bookkeeping core of a lightweight Monacoin wallet.
//!
//! Incoming transactions are fed to a [`TransactionProcessor`](repository::TransactionProcessor),
//! which matches every input and output script against a small set of standard templates,
//! asks a [`KeyOwnership`](keychain::KeyOwnership) registry whether the key behind the script
//! belongs to the wallet and updates the shared [`UtxoRegistry`](repository::UtxoRegistry)
//! accordingly. Scripts are never executed and signatures are never verified.
//!
//! ```
//! use mona_crypto::key::public_key_from_secret;
//! use mona_wallet::{keychain::Keychain, repository::{TransactionProcessor, UtxoRegistry}};
//!
//! let registry = UtxoRegistry::default();
//! let keychain = Keychain::new(0x32);
//! keychain.insert(public_key_from_secret(&[1; 32]).unwrap());
//!
//! let processor = TransactionProcessor::new(&registry, &keychain);
//! # let _ = processor;
//! ```

#![deny(rust_2018_idioms)]
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]
#![deny(missing_docs)]

pub mod constants;
pub mod keychain;
pub mod logger;
pub mod model;
pub mod params;
pub mod repository;
pub mod script;

pub use repository::{Error, Result, Wallet};
