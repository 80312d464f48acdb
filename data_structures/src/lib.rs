//! Chain data types understood by the wallet and the binary decoding primitives used to read
//! them from the wire.

#![deny(rust_2018_idioms)]
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]
#![deny(missing_docs)]

/// Module containing the chain data types: hashes, transactions, inputs and outputs
pub mod chain;

/// Module containing error definitions
pub mod error;

/// Positional cursor over untrusted byte buffers
pub mod reader;

/// Wire (de)serialization of transactions
pub mod serializers;
