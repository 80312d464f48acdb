//! Script opcodes and marker bytes recognized by the template matcher.

/// Duplicate the top stack item
pub const OP_DUP: u8 = 0x76;

/// Replace the top stack item with its HASH160
pub const OP_HASH160: u8 = 0xa9;

/// Fail unless the two top stack items are equal
pub const OP_EQUALVERIFY: u8 = 0x88;

/// Check a signature against a public key
pub const OP_CHECKSIG: u8 = 0xac;

/// Push of the 20 bytes of a public key hash
pub const PUSH_PUBLIC_KEY_HASH: u8 = 0x14;

/// DER sequence tag opening a signature
pub const DER_SEQUENCE: u8 = 0x30;

/// DER integer tag preceding the R and S components
pub const DER_INTEGER: u8 = 0x02;

/// The only signature hash type the wallet understands
pub const SIGHASH_ALL: u8 = 0x01;
