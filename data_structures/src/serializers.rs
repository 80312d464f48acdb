use log::trace;

use crate::{
    chain::{Hash, OutPoint, Transaction, TransactionInput, TransactionOutput},
    error::{DecodeError, DecodeResult},
    reader::ByteReader,
};

// previous hash, index, empty script length and sequence
const MIN_INPUT_SIZE: usize = 32 + 4 + 1 + 4;
// value and empty script length
const MIN_OUTPUT_SIZE: usize = 8 + 1;

impl Transaction {
    /// Decode a transaction from its wire serialization. The whole buffer must be consumed.
    pub fn from_bytes(data: &[u8]) -> DecodeResult<Self> {
        let mut reader = ByteReader::new(data);
        let transaction = Self::read(&mut reader)?;
        reader.finish()?;

        Ok(transaction)
    }

    /// Decode a transaction from the current position of `reader`.
    pub fn read(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
        let version = reader.read_u32_le()?;

        let input_count = read_count(reader)?;
        let mut inputs = Vec::with_capacity(capacity(input_count, reader, MIN_INPUT_SIZE));
        for _ in 0..input_count {
            let hash = Hash::SHA256(reader.read_array()?);
            let index = reader.read_u32_le()?;
            let script = reader.read_compact_bytes()?.to_vec();
            let sequence = reader.read_u32_le()?;
            inputs.push(TransactionInput {
                previous_output: OutPoint { hash, index },
                script,
                sequence,
            });
        }

        let output_count = read_count(reader)?;
        let mut outputs = Vec::with_capacity(capacity(output_count, reader, MIN_OUTPUT_SIZE));
        for _ in 0..output_count {
            let value = reader.read_u64_le()?;
            let script = reader.read_compact_bytes()?.to_vec();
            outputs.push(TransactionOutput { value, script });
        }

        let lock_time = reader.read_u32_le()?;
        trace!(
            "Decoded transaction with {} inputs and {} outputs",
            inputs.len(),
            outputs.len()
        );

        Ok(Transaction {
            version,
            inputs,
            outputs,
            lock_time,
        })
    }

    /// Wire serialization of this transaction.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&self.version.to_le_bytes());

        write_compact_size(&mut buf, self.inputs.len() as u64);
        for input in &self.inputs {
            buf.extend_from_slice(input.previous_output.hash.as_ref());
            buf.extend_from_slice(&input.previous_output.index.to_le_bytes());
            write_compact_size(&mut buf, input.script.len() as u64);
            buf.extend_from_slice(&input.script);
            buf.extend_from_slice(&input.sequence.to_le_bytes());
        }

        write_compact_size(&mut buf, self.outputs.len() as u64);
        for output in &self.outputs {
            buf.extend_from_slice(&output.value.to_le_bytes());
            write_compact_size(&mut buf, output.script.len() as u64);
            buf.extend_from_slice(&output.script);
        }

        buf.extend_from_slice(&self.lock_time.to_le_bytes());

        buf
    }
}

fn read_count(reader: &mut ByteReader<'_>) -> DecodeResult<usize> {
    let offset = reader.position();
    let len = reader.read_compact_size()?;

    usize::try_from(len).map_err(|_| DecodeError::LengthOverflow { offset, len })
}

// no more items than the remaining bytes could encode, whatever the declared count
fn capacity(count: usize, reader: &ByteReader<'_>, min_size: usize) -> usize {
    count.min(reader.remaining() / min_size)
}

/// Append `n` to `buf` as a `CompactSize` integer.
pub fn write_compact_size(buf: &mut Vec<u8>, n: u64) {
    match n {
        0..=0xfc => buf.push(n as u8),
        0xfd..=0xffff => {
            buf.push(0xfd);
            buf.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            buf.push(0xfe);
            buf.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            buf.push(0xff);
            buf.extend_from_slice(&n.to_le_bytes());
        }
    }
}
