//! A strict, positional reader over a byte slice.
//!
//! Every read either returns exactly what was asked for or fails with
//! [`DecodeError::UnexpectedEnd`]; nothing is ever partially consumed. Structures that must
//! span the whole buffer call [`ByteReader::finish`] once decoded.

use crate::error::{DecodeError, DecodeResult};

/// Cursor over an untrusted byte buffer
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Start reading `data` from its first byte.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Fail with [`DecodeError::TrailingBytes`] unless the buffer was fully consumed.
    pub fn finish(&self) -> DecodeResult<()> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(DecodeError::TrailingBytes { remaining }),
        }
    }

    /// Read exactly `len` bytes.
    pub fn read_bytes(&mut self, len: usize) -> DecodeResult<&'a [u8]> {
        let available = self.remaining();
        if len > available {
            return Err(DecodeError::UnexpectedEnd {
                offset: self.pos,
                needed: len,
                available,
            });
        }

        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;

        Ok(bytes)
    }

    /// Read a fixed size array.
    pub fn read_array<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let mut array = [0; N];
        array.copy_from_slice(self.read_bytes(N)?);

        Ok(array)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        let [byte] = self.read_array::<1>()?;

        Ok(byte)
    }

    /// Read a little endian `u16`.
    pub fn read_u16_le(&mut self) -> DecodeResult<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Read a little endian `u32`.
    pub fn read_u32_le(&mut self) -> DecodeResult<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read a little endian `u64`.
    pub fn read_u64_le(&mut self) -> DecodeResult<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Read a one byte length followed by that many bytes.
    pub fn read_var_bytes(&mut self) -> DecodeResult<&'a [u8]> {
        let len = self.read_u8()?;

        self.read_bytes(usize::from(len))
    }

    /// Read a variable length integer (`CompactSize`): one byte below `0xfd`, otherwise a
    /// `0xfd`/`0xfe`/`0xff` marker followed by a 2, 4 or 8 byte little endian integer.
    pub fn read_compact_size(&mut self) -> DecodeResult<u64> {
        match self.read_u8()? {
            0xfd => self.read_u16_le().map(u64::from),
            0xfe => self.read_u32_le().map(u64::from),
            0xff => self.read_u64_le(),
            n => Ok(u64::from(n)),
        }
    }

    /// Read a `CompactSize` length followed by that many bytes.
    pub fn read_compact_bytes(&mut self) -> DecodeResult<&'a [u8]> {
        let offset = self.pos;
        let len = self.read_compact_size()?;
        let len = usize::try_from(len).map_err(|_| DecodeError::LengthOverflow { offset, len })?;

        self.read_bytes(len)
    }
}
