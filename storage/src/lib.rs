//! Storage module that conveniently abstracts a key/value API away from specific storage
//! backends.
//!
//! [`storage::Storage`] is the raw byte-level contract every backend implements.
//! [`db::Db`] layers buckets, composite keys and typed values on top of it.
#![deny(rust_2018_idioms)]
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]
#![deny(missing_docs)]

pub mod backends;
pub mod db;
pub mod error;
pub mod keys;
pub mod storage;
pub mod values;

pub use error::{Error, Result};
