use mona_data_structures::{
    chain::{Hash, OutPoint, Transaction, TransactionInput, TransactionOutput, COINBASE_INDEX},
    error::DecodeError,
};

const GENESIS_COINBASE: &str = "01000000010000000000000000000000000000000000000000000000000000000000000000ffffffff4d04ffff001d0104455468652054696d65732030332f4a616e2f32303039204368616e63656c6c6f72206f6e206272696e6b206f66207365636f6e64206261696c6f757420666f722062616e6b73ffffffff0100f2052a01000000434104678afdb0fe5548271967f1a67130b7105cd6a828e03909a67962e0ea1f61deb649f6bc3f4cef38c4f35504e51ec112de5c384df7ba0b8d578a4c702b6bf11d5fac00000000";

fn genesis_bytes() -> Vec<u8> {
    hex::decode(GENESIS_COINBASE).unwrap()
}

#[test]
fn decode_genesis_coinbase() {
    let transaction = Transaction::from_bytes(&genesis_bytes()).unwrap();

    assert_eq!(transaction.version, 1);
    assert_eq!(transaction.inputs.len(), 1);
    assert!(transaction.inputs[0].is_coinbase());
    assert_eq!(transaction.inputs[0].script.len(), 0x4d);
    assert_eq!(transaction.outputs.len(), 1);
    assert_eq!(transaction.outputs[0].value, 5_000_000_000);
    assert_eq!(transaction.outputs[0].script.len(), 0x43);
    assert_eq!(transaction.outputs[0].script.last(), Some(&0xac));
    assert_eq!(transaction.lock_time, 0);
}

#[test]
fn genesis_coinbase_hash() {
    let transaction = Transaction::from_bytes(&genesis_bytes()).unwrap();

    assert_eq!(
        transaction.hash().to_string(),
        "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b"
    );
}

#[test]
fn reencoding_preserves_bytes() {
    let bytes = genesis_bytes();
    let transaction = Transaction::from_bytes(&bytes).unwrap();

    assert_eq!(transaction.to_bytes(), bytes);
}

#[test]
fn trailing_bytes_are_rejected() {
    let mut bytes = genesis_bytes();
    bytes.push(0x00);

    assert_eq!(
        Transaction::from_bytes(&bytes),
        Err(DecodeError::TrailingBytes { remaining: 1 })
    );
}

#[test]
fn truncated_transaction_is_rejected() {
    let bytes = genesis_bytes();

    assert!(matches!(
        Transaction::from_bytes(&bytes[..bytes.len() - 1]),
        Err(DecodeError::UnexpectedEnd { .. })
    ));
}

#[test]
fn bincode_serialization() {
    let transaction = Transaction {
        version: 1,
        inputs: vec![TransactionInput {
            previous_output: OutPoint {
                hash: Hash::default(),
                index: COINBASE_INDEX,
            },
            script: vec![0x51],
            sequence: u32::MAX,
        }],
        outputs: vec![TransactionOutput {
            value: 42,
            script: vec![0x76, 0xa9],
        }],
        lock_time: 0,
    };

    let bytes = bincode::serialize(&transaction).unwrap();
    let decoded: Transaction = bincode::deserialize(&bytes).unwrap();

    assert_eq!(decoded, transaction);
}
