//! Cryptographic primitives used by the wallet: hash functions, public key parsing and
//! display addresses.

#![deny(rust_2018_idioms)]
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]
#![deny(missing_docs)]

pub mod address;
pub mod hash;
pub mod key;

pub use secp256k1;
