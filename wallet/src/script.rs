//! Template matching of the standard script forms.
//!
//! Scripts are not executed. Each supported form is a fixed layout of marker bytes and
//! length-prefixed fields, decoded with a [`ByteReader`] that fails on short buffers and, where
//! the template must span the whole script, on trailing bytes. Decoding reads the fields and
//! `validate` checks the fixed opcodes and markers, so a partial match is never accepted.
//!
//! Recognized forms:
//!
//! * signature script: `<len> 0x30 <rs len> 0x02 <r len> <r> 0x02 <s len> <s> 0x01 <key len> <key>`
//! * pay-to-public-key-hash output: `DUP HASH160 0x14 <20 bytes> EQUALVERIFY CHECKSIG`
//! * pay-to-public-key output: `<key len> <key> CHECKSIG`

use thiserror::Error;

use mona_data_structures::{chain::PublicKeyHash, error::DecodeError, reader::ByteReader};

use crate::{
    constants::{
        DER_INTEGER, DER_SEQUENCE, OP_CHECKSIG, OP_DUP, OP_EQUALVERIFY, OP_HASH160,
        PUSH_PUBLIC_KEY_HASH, SIGHASH_ALL,
    },
    model::CoinKind,
};

/// Script matching errors
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum Error {
    /// The script does not have the layout of the template
    #[error("unknown script format: {0}")]
    Decode(#[from] DecodeError),
    /// A signature script carrying nothing after the signature: an older form the wallet does not
    /// handle
    #[error("old type of signature script, ignoring")]
    UnsupportedFormat,
    /// A fixed byte of the template holds another value
    #[error("unexpected {field} byte {found:#04x}, expected {expected:#04x}")]
    UnexpectedByte {
        /// Template field holding the byte
        field: &'static str,
        /// Value required by the template
        expected: u8,
        /// Value found in the script
        found: u8,
    },
    /// A field is too long for its one-byte length prefix
    #[error("{field} is {len} bytes long, at most {max} fit in the script")]
    TooLong {
        /// Template field
        field: &'static str,
        /// Length of the field
        len: usize,
        /// Longest length the template can encode
        max: usize,
    },
}

/// Result type for script matching
pub type Result<T> = std::result::Result<T, Error>;

/// Both reasons an output script matched no template
#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("unrecognized output script (as pay-to-public-key-hash: {pay_to_pubkey_hash}; as pay-to-public-key: {pay_to_pubkey})")]
pub struct UnrecognizedScript {
    /// Why the script is not pay-to-public-key-hash
    pub pay_to_pubkey_hash: Error,
    /// Why the script is not pay-to-public-key
    pub pay_to_pubkey: Error,
}

const MAX_PUSH_LENGTH: usize = u8::MAX as usize;

fn expect_byte(field: &'static str, expected: u8, found: u8) -> Result<()> {
    if found == expected {
        Ok(())
    } else {
        Err(Error::UnexpectedByte {
            field,
            expected,
            found,
        })
    }
}

fn check_length(field: &'static str, len: usize, max: usize) -> Result<()> {
    if len <= max {
        Ok(())
    } else {
        Err(Error::TooLong { field, len, max })
    }
}

// lengths are checked by the constructors and bounded by `read_var_bytes` when decoding
fn push_var_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    debug_assert!(bytes.len() <= usize::from(u8::MAX));
    buf.push(bytes.len() as u8);
    buf.extend_from_slice(bytes);
}

/// DER signature envelope at the start of a signature script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSigHeader {
    /// Length of the signature push, sighash byte included
    pub length: u8,
    /// DER sequence tag
    pub der_sequence: u8,
    /// Length of the R and S components with their tags
    pub rs_length: u8,
    /// DER integer tag of R
    pub r_marker: u8,
    /// R component
    pub r: Vec<u8>,
    /// DER integer tag of S
    pub s_marker: u8,
    /// S component
    pub s: Vec<u8>,
}

impl ScriptSigHeader {
    /// Longest `r` and `s` together: the length byte counts them plus seven marker and length
    /// bytes.
    pub const MAX_COMPONENTS_LENGTH: usize = u8::MAX as usize - 7;

    /// Well-formed header for a signature made of `r` and `s`.
    ///
    /// The total length must fit the leading length byte, so `r` and `s` together may not exceed
    /// [`ScriptSigHeader::MAX_COMPONENTS_LENGTH`] bytes.
    pub fn new(r: Vec<u8>, s: Vec<u8>) -> Result<Self> {
        let components = r.len() + s.len();
        check_length("signature", components, Self::MAX_COMPONENTS_LENGTH)?;
        let rs_length = (4 + components) as u8;

        Ok(Self {
            length: rs_length + 3,
            der_sequence: DER_SEQUENCE,
            rs_length,
            r_marker: DER_INTEGER,
            r,
            s_marker: DER_INTEGER,
            s,
        })
    }

    /// Read the header from the start of a signature script.
    ///
    /// A script that ends right after the header is an older form and fails with
    /// [`Error::UnsupportedFormat`], which callers are expected to skip rather than report.
    pub fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let header = Self {
            length: reader.read_u8()?,
            der_sequence: reader.read_u8()?,
            rs_length: reader.read_u8()?,
            r_marker: reader.read_u8()?,
            r: reader.read_var_bytes()?.to_vec(),
            s_marker: reader.read_u8()?,
            s: reader.read_var_bytes()?.to_vec(),
        };

        if reader.is_empty() {
            return Err(Error::UnsupportedFormat);
        }
        header.validate()?;

        Ok(header)
    }

    /// Check the DER markers.
    pub fn validate(&self) -> Result<()> {
        expect_byte("DER sequence", DER_SEQUENCE, self.der_sequence)?;
        expect_byte("R integer", DER_INTEGER, self.r_marker)?;
        expect_byte("S integer", DER_INTEGER, self.s_marker)
    }

    fn write(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&[self.length, self.der_sequence, self.rs_length, self.r_marker]);
        push_var_bytes(buf, &self.r);
        buf.push(self.s_marker);
        push_var_bytes(buf, &self.s);
    }
}

/// Sighash type and public key following the signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSigTail {
    /// Signature hash type
    pub sighash_type: u8,
    /// Serialized public key of the signer
    pub public_key: Vec<u8>,
}

impl ScriptSigTail {
    /// Read the rest of a signature script. Nothing may follow the public key.
    pub fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let tail = Self {
            sighash_type: reader.read_u8()?,
            public_key: reader.read_var_bytes()?.to_vec(),
        };
        reader.finish()?;

        Ok(tail)
    }

    /// Only `SIGHASH_ALL` signatures are accepted.
    pub fn validate(&self) -> Result<()> {
        expect_byte("sighash type", SIGHASH_ALL, self.sighash_type)
    }

    fn write(&self, buf: &mut Vec<u8>) {
        buf.push(self.sighash_type);
        push_var_bytes(buf, &self.public_key);
    }
}

/// Signature script of an input spending a standard output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSig {
    /// Signature envelope
    pub header: ScriptSigHeader,
    /// Sighash type and signer key
    pub tail: ScriptSigTail,
}

impl ScriptSig {
    /// `SIGHASH_ALL` signature script for `public_key`.
    pub fn new(r: Vec<u8>, s: Vec<u8>, public_key: Vec<u8>) -> Result<Self> {
        check_length("public key", public_key.len(), MAX_PUSH_LENGTH)?;

        Ok(Self {
            header: ScriptSigHeader::new(r, s)?,
            tail: ScriptSigTail {
                sighash_type: SIGHASH_ALL,
                public_key,
            },
        })
    }

    /// Decode and validate a whole signature script.
    pub fn decode(script: &[u8]) -> Result<Self> {
        let mut reader = ByteReader::new(script);
        let header = ScriptSigHeader::decode(&mut reader)?;
        let tail = ScriptSigTail::decode(&mut reader)?;
        tail.validate()?;

        Ok(Self { header, tail })
    }

    /// Serialize the script.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = vec![];
        self.header.write(&mut buf);
        self.tail.write(&mut buf);

        buf
    }
}

/// `DUP HASH160 <pkh> EQUALVERIFY CHECKSIG`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayToPubKeyHash {
    /// `OP_DUP`
    pub dup: u8,
    /// `OP_HASH160`
    pub hash160: u8,
    /// Push of the hash
    pub push: u8,
    /// HASH160 of the owner's serialized public key
    pub pkh: PublicKeyHash,
    /// `OP_EQUALVERIFY`
    pub equal_verify: u8,
    /// `OP_CHECKSIG`
    pub checksig: u8,
}

impl PayToPubKeyHash {
    /// Standard script paying to `pkh`.
    pub fn new(pkh: PublicKeyHash) -> Self {
        Self {
            dup: OP_DUP,
            hash160: OP_HASH160,
            push: PUSH_PUBLIC_KEY_HASH,
            pkh,
            equal_verify: OP_EQUALVERIFY,
            checksig: OP_CHECKSIG,
        }
    }

    /// Read the fields of the template. The script must be exactly 25 bytes long.
    pub fn decode(script: &[u8]) -> Result<Self> {
        let mut reader = ByteReader::new(script);
        let template = Self {
            dup: reader.read_u8()?,
            hash160: reader.read_u8()?,
            push: reader.read_u8()?,
            pkh: reader.read_array()?,
            equal_verify: reader.read_u8()?,
            checksig: reader.read_u8()?,
        };
        reader.finish()?;

        Ok(template)
    }

    /// Check the opcodes around the hash.
    pub fn validate(&self) -> Result<()> {
        expect_byte("OP_DUP", OP_DUP, self.dup)?;
        expect_byte("OP_HASH160", OP_HASH160, self.hash160)?;
        expect_byte("hash push", PUSH_PUBLIC_KEY_HASH, self.push)?;
        expect_byte("OP_EQUALVERIFY", OP_EQUALVERIFY, self.equal_verify)?;
        expect_byte("OP_CHECKSIG", OP_CHECKSIG, self.checksig)
    }

    /// Serialize the script.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(25);
        buf.extend_from_slice(&[self.dup, self.hash160, self.push]);
        buf.extend_from_slice(&self.pkh);
        buf.extend_from_slice(&[self.equal_verify, self.checksig]);

        buf
    }
}

/// `<public key> CHECKSIG`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayToPubKey {
    /// Serialized public key of the owner
    pub public_key: Vec<u8>,
    /// `OP_CHECKSIG`
    pub checksig: u8,
}

impl PayToPubKey {
    /// Standard script paying to `public_key`, which must fit a one-byte push.
    pub fn new(public_key: Vec<u8>) -> Result<Self> {
        check_length("public key", public_key.len(), MAX_PUSH_LENGTH)?;

        Ok(Self {
            public_key,
            checksig: OP_CHECKSIG,
        })
    }

    /// Read the fields of the template. Nothing may follow the final opcode.
    pub fn decode(script: &[u8]) -> Result<Self> {
        let mut reader = ByteReader::new(script);
        let template = Self {
            public_key: reader.read_var_bytes()?.to_vec(),
            checksig: reader.read_u8()?,
        };
        reader.finish()?;

        Ok(template)
    }

    /// Check the final opcode.
    pub fn validate(&self) -> Result<()> {
        expect_byte("OP_CHECKSIG", OP_CHECKSIG, self.checksig)
    }

    /// Serialize the script.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.public_key.len() + 2);
        push_var_bytes(&mut buf, &self.public_key);
        buf.push(self.checksig);

        buf
    }
}

/// Output script matching one of the standard templates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputScript {
    /// Pay to the HASH160 of a public key
    PayToPubKeyHash(PayToPubKeyHash),
    /// Pay to a public key
    PayToPubKey(PayToPubKey),
}

impl OutputScript {
    /// Match `script` against pay-to-public-key-hash, then against pay-to-public-key.
    ///
    /// Only the layout is checked here; call [`OutputScript::validate`] for the opcodes.
    pub fn decode(script: &[u8]) -> std::result::Result<Self, UnrecognizedScript> {
        let pay_to_pubkey_hash = match PayToPubKeyHash::decode(script) {
            Ok(template) => return Ok(OutputScript::PayToPubKeyHash(template)),
            Err(e) => e,
        };

        PayToPubKey::decode(script)
            .map(OutputScript::PayToPubKey)
            .map_err(|pay_to_pubkey| UnrecognizedScript {
                pay_to_pubkey_hash,
                pay_to_pubkey,
            })
    }

    /// Check the fixed opcodes of the matched template.
    pub fn validate(&self) -> Result<()> {
        match self {
            OutputScript::PayToPubKeyHash(template) => template.validate(),
            OutputScript::PayToPubKey(template) => template.validate(),
        }
    }

    /// Kind of coin received through this script.
    pub fn kind(&self) -> CoinKind {
        match self {
            OutputScript::PayToPubKeyHash(_) => CoinKind::PayToPubKeyHash,
            OutputScript::PayToPubKey(_) => CoinKind::PayToPubKey,
        }
    }

    /// Serialize the script.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            OutputScript::PayToPubKeyHash(template) => template.to_bytes(),
            OutputScript::PayToPubKey(template) => template.to_bytes(),
        }
    }
}
