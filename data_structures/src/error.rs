//! Error type definitions for the data structure module.

use thiserror::Error;

/// Failure while decoding a positional binary structure
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DecodeError {
    /// The buffer is shorter than the structure requires
    #[error("unexpected end of buffer at offset {offset}: needed {needed} bytes, {available} available")]
    UnexpectedEnd {
        /// Position of the cursor when the read was attempted
        offset: usize,
        /// Bytes requested by the read
        needed: usize,
        /// Bytes that were left in the buffer
        available: usize,
    },
    /// The structure was decoded but the buffer was not fully consumed
    #[error("{remaining} trailing bytes left unconsumed")]
    TrailingBytes {
        /// Number of bytes left after the structure
        remaining: usize,
    },
    /// A variable length prefix does not fit in memory
    #[error("length prefix {len} at offset {offset} is too large")]
    LengthOverflow {
        /// Position of the length prefix
        offset: usize,
        /// Decoded length
        len: u64,
    },
}

/// Result type for decoding operations
pub type DecodeResult<T> = Result<T, DecodeError>;
