//! Conversion of values to and from their stored bytes.
//!
//! Integers are stored as 8 little endian bytes, strings and raw bytes verbatim. Structured
//! values go through bincode, see [`encode`] and [`decode`].

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{Error, Result};

/// Trait which marks a type as storable with a fixed, non-serde encoding.
pub trait Storable: Sized {
    /// Convert `Self` into `Vec<u8>`
    fn to_bytes(&self) -> Vec<u8>;
    /// Convert stored bytes into `Self`
    fn from_bytes(bytes: &[u8]) -> Result<Self>;
}

impl Storable for u64 {
    fn to_bytes(&self) -> Vec<u8> {
        self.to_le_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let array: [u8; 8] = bytes
            .try_into()
            .map_err(|_| Error::Decode(format!("expected 8 bytes, got {}", bytes.len())))?;

        Ok(u64::from_le_bytes(array))
    }
}

impl Storable for i64 {
    fn to_bytes(&self) -> Vec<u8> {
        self.to_le_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        u64::from_bytes(bytes).map(|n| n as i64)
    }
}

impl Storable for String {
    fn to_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        String::from_utf8(bytes.to_vec()).map_err(|e| Error::Decode(e.to_string()))
    }
}

impl Storable for Vec<u8> {
    fn to_bytes(&self) -> Vec<u8> {
        self.clone()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bytes.to_vec())
    }
}

/// Encode a structured value.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    Ok(bincode::serialize(value)?)
}

/// Decode a structured value.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(bincode::deserialize(bytes)?)
}
