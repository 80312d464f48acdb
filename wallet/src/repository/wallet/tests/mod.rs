use mona_crypto::{hash::calculate_hash160, key::PK};
use mona_data_structures::chain::Hash;

use super::*;
use crate::{
    model::{Coin, CoinKind},
    script,
};


use factories::{Input, Output, Tx};

// first output of the genesis block, paying to an uncompressed key
const GENESIS_COINBASE: &str = "01000000010000000000000000000000000000000000000000000000000000000000000000ffffffff4d04ffff001d0104455468652054696d65732030332f4a616e2f32303039204368616e63656c6c6f72206f6e206272696e6b206f66207365636f6e64206261696c6f757420666f722062616e6b73ffffffff0100f2052a01000000434104678afdb0fe5548271967f1a67130b7105cd6a828e03909a67962e0ea1f61deb649f6bc3f4cef38c4f35504e51ec112de5c384df7ba0b8d578a4c702b6bf11d5fac00000000";
const GENESIS_KEY: &str = "04678afdb0fe5548271967f1a67130b7105cd6a828e03909a67962e0ea1f61deb649f6bc3f4cef38c4f35504e51ec112de5c384df7ba0b8d578a4c702b6bf11d5f";

fn receive(wallet: &Wallet<factories::Backend>, key: &PK, value: u64) -> (Hash, Coin) {
    let transaction = Tx::default()
        .with_input(Input::default())
        .with_output(
            Output::default()
                .with_value(value)
                .with_script(factories::pay_to_pubkey_hash(key)),
        )
        .create();
    let report = wallet.process_transaction(&transaction).unwrap();
    let coin = report.received().next().cloned().unwrap();

    (report.transaction_hash, coin)
}

#[test]
fn test_owned_pay_to_pubkey_hash_output() {
    let key = factories::key();
    let (wallet, _backend) = factories::wallet(None, &[key]);
    let transaction = Tx::default()
        .with_input(Input::default())
        .with_output(
            Output::default()
                .with_value(125_000)
                .with_script(factories::pay_to_pubkey_hash(&key)),
        )
        .create();

    let report = wallet.process_transaction(&transaction).unwrap();

    let received: Vec<&Coin> = report.received().collect();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].kind.tag(), 0);
    assert_eq!(received[0].value, 125_000);
    assert_eq!(received[0].output_index, 0);
    assert_eq!(received[0].transaction_hash, transaction.hash());
    assert_eq!(received[0].address, key.serialize().to_vec());
    assert_eq!(
        wallet.registry().coins_of(&key.serialize()),
        vec![received[0].clone()]
    );
}

#[test]
fn test_pay_to_uncompressed_pubkey_hash_output() {
    let key = factories::key();
    let (wallet, _backend) = factories::wallet(None, &[key]);
    let template =
        script::PayToPubKeyHash::new(calculate_hash160(&key.serialize_uncompressed()));
    let transaction = Tx::default()
        .with_output(
            Output::default()
                .with_value(7)
                .with_script(template.to_bytes()),
        )
        .create();

    let report = wallet.process_transaction(&transaction).unwrap();

    assert_eq!(report.received().count(), 1);
    assert_eq!(wallet.registry().balance_of(&key.serialize()), 7);
}

#[test]
fn test_owned_pay_to_pubkey_output() {
    let key = factories::key();
    let (wallet, _backend) = factories::wallet(None, &[key]);
    let transaction = Tx::default()
        .with_output(
            Output::default()
                .with_value(42)
                .with_script(factories::pay_to_pubkey(&key)),
        )
        .create();

    let report = wallet.process_transaction(&transaction).unwrap();

    let coin = report.received().next().unwrap();
    assert_eq!(coin.kind, CoinKind::PayToPubKey);
    assert_eq!(coin.kind.tag(), 1);
    assert_eq!(coin.value, 42);
}

#[test]
fn test_processing_same_transaction_twice() {
    let key = factories::key();
    let (wallet, backend) = factories::wallet(None, &[key]);
    let transaction = Tx::default()
        .with_input(Input::default())
        .with_output(
            Output::default()
                .with_value(500)
                .with_script(factories::pay_to_pubkey_hash(&key)),
        )
        .create();

    let first = wallet.process_transaction(&transaction).unwrap();
    let second = wallet.process_transaction(&transaction).unwrap();

    assert_eq!(first.received().count(), 1);
    assert!(second.is_noop());
    match &second.outputs[..] {
        [OutputOutcome::Skipped(Error::CoinExists { hash, index: 0 })] => {
            assert_eq!(*hash, transaction.hash())
        }
        outcomes => panic!("unexpected outcomes {:?}", outcomes),
    }
    assert_eq!(wallet.registry().coins_of(&key.serialize()).len(), 1);
    assert_eq!(wallet.balance(), 500);

    let (reopened, _) = factories::wallet(Some(backend), &[key]);
    assert_eq!(reopened.registry().coins_of(&key.serialize()).len(), 1);
}

#[test]
fn test_balance_sums_every_address() {
    let (first, second) = (factories::key(), factories::key());
    let (wallet, _backend) = factories::wallet(None, &[first, second]);

    receive(&wallet, &first, 30);
    receive(&wallet, &first, 12);
    receive(&wallet, &second, 100);

    assert_eq!(wallet.balance(), 142);
    assert_eq!(wallet.balance(), wallet.registry().total_balance());
}

#[test]
fn test_genesis_coinbase() {
    let key = mona_crypto::key::parse_public_key(&hex::decode(GENESIS_KEY).unwrap()).unwrap();
    let (wallet, _backend) = factories::wallet(None, &[key]);
    let transaction = Transaction::from_bytes(&hex::decode(GENESIS_COINBASE).unwrap()).unwrap();

    let report = wallet.process_transaction(&transaction).unwrap();

    assert!(matches!(report.inputs[..], [InputOutcome::Coinbase]));
    let coin = report.received().next().unwrap();
    assert_eq!(coin.kind, CoinKind::PayToPubKey);
    assert_eq!(coin.value, 5_000_000_000);
    assert_eq!(
        coin.transaction_hash.to_string(),
        "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b"
    );
    assert_eq!(wallet.balance(), 5_000_000_000);
}

#[test]
fn test_outputs_of_other_keys_are_skipped() {
    let key = factories::key();
    let stranger = factories::key();
    let (wallet, _backend) = factories::wallet(None, &[key]);
    let transaction = Tx::default()
        .with_output(Output::default().with_script(factories::pay_to_pubkey_hash(&stranger)))
        .with_output(Output::default().with_script(factories::pay_to_pubkey(&stranger)))
        .create();

    let report = wallet.process_transaction(&transaction).unwrap();

    assert!(matches!(
        report.outputs[..],
        [
            OutputOutcome::Skipped(Error::NotOwned { .. }),
            OutputOutcome::Skipped(Error::NotOwned { .. })
        ]
    ));
    assert!(report.is_noop());
    assert!(wallet.registry().is_empty());
}

#[test]
fn test_unrecognized_output_keeps_both_errors() {
    let key = factories::key();
    let (wallet, _backend) = factories::wallet(None, &[key]);
    let transaction = Tx::default()
        .with_output(Output::default().with_script(vec![0x6a, 0x01, 0x00]))
        .with_output(
            Output::default()
                .with_value(3)
                .with_script(factories::pay_to_pubkey(&key)),
        )
        .create();

    let report = wallet.process_transaction(&transaction).unwrap();

    match &report.outputs[0] {
        OutputOutcome::Skipped(Error::UnrecognizedScript(e)) => {
            assert!(matches!(e.pay_to_pubkey_hash, script::Error::Decode(_)));
            assert!(matches!(e.pay_to_pubkey, script::Error::Decode(_)));
        }
        outcome => panic!("unexpected outcome {:?}", outcome),
    }
    assert!(matches!(report.outputs[1], OutputOutcome::Received(_)));
}

#[test]
fn test_output_with_wrong_opcode_is_skipped() {
    let key = factories::key();
    let (wallet, _backend) = factories::wallet(None, &[key]);
    let mut bytes = factories::pay_to_pubkey_hash(&key);
    bytes[0] = 0x75;
    let transaction = Tx::default()
        .with_output(Output::default().with_script(bytes))
        .create();

    let report = wallet.process_transaction(&transaction).unwrap();

    assert!(matches!(
        report.outputs[..],
        [OutputOutcome::Skipped(Error::Script(
            script::Error::UnexpectedByte { .. }
        ))]
    ));
    assert!(wallet.registry().is_empty());
}

#[test]
fn test_spend_owned_coin() {
    let key = factories::key();
    let (wallet, _backend) = factories::wallet(None, &[key]);
    let (hash, coin) = receive(&wallet, &key, 500);
    let transaction = Tx::default()
        .with_input(
            Input::default()
                .with_previous_output(hash, 0)
                .with_script(factories::script_sig(&key)),
        )
        .create();

    let report = wallet.process_transaction(&transaction).unwrap();

    assert_eq!(report.spent().collect::<Vec<_>>(), vec![&coin]);
    assert!(wallet.registry().coins_of(&key.serialize()).is_empty());
    assert_eq!(wallet.balance(), 0);
}

#[test]
fn test_spend_of_unknown_coin_is_skipped() {
    let key = factories::key();
    let (wallet, _backend) = factories::wallet(None, &[key]);
    let (hash, _coin) = receive(&wallet, &key, 500);
    let before = wallet.registry().snapshot();
    let transaction = Tx::default()
        .with_input(
            Input::default()
                .with_previous_output(hash, 1)
                .with_script(factories::script_sig(&key)),
        )
        .create();

    let report = wallet.process_transaction(&transaction).unwrap();

    assert!(matches!(
        report.inputs[..],
        [InputOutcome::Skipped(Error::CoinNotFound { index: 1, .. })]
    ));
    assert_eq!(wallet.registry().snapshot(), before);
}

#[test]
fn test_spend_by_other_key_is_skipped() {
    let key = factories::key();
    let (wallet, _backend) = factories::wallet(None, &[key]);
    let (hash, _coin) = receive(&wallet, &key, 500);
    let transaction = Tx::default()
        .with_input(
            Input::default()
                .with_previous_output(hash, 0)
                .with_script(factories::script_sig(&factories::key())),
        )
        .create();

    let report = wallet.process_transaction(&transaction).unwrap();

    assert!(matches!(
        report.inputs[..],
        [InputOutcome::Skipped(Error::NotOwned { .. })]
    ));
    assert_eq!(wallet.balance(), 500);
}

#[test]
fn test_legacy_script_sig_does_not_stop_processing() {
    let key = factories::key();
    let (wallet, _backend) = factories::wallet(None, &[key]);
    let (hash, coin) = receive(&wallet, &key, 500);
    let full = factories::script_sig(&key);
    // signature push only, as in scripts spending pay-to-public-key outputs
    let header_len = full.len() - 1 - 1 - 33;
    let legacy = full[..header_len].to_vec();
    let transaction = Tx::default()
        .with_input(
            Input::default()
                .with_previous_output(hash, 0)
                .with_script(legacy),
        )
        .with_input(
            Input::default()
                .with_previous_output(hash, 0)
                .with_script(full),
        )
        .with_output(
            Output::default()
                .with_value(9)
                .with_script(factories::pay_to_pubkey(&key)),
        )
        .create();

    let report = wallet.process_transaction(&transaction).unwrap();

    assert!(matches!(
        report.inputs[0],
        InputOutcome::Skipped(Error::Script(script::Error::UnsupportedFormat))
    ));
    assert!(matches!(&report.inputs[1], InputOutcome::Spent(spent) if *spent == coin));
    assert_eq!(report.received().count(), 1);
    assert_eq!(wallet.balance(), 9);
}

#[test]
fn test_coinbase_input_is_not_a_spend() {
    let key = factories::key();
    let (wallet, _backend) = factories::wallet(None, &[key]);
    let transaction = Tx::default()
        .with_input(Input::default().coinbase())
        .create();

    let report = wallet.process_transaction(&transaction).unwrap();

    assert!(matches!(report.inputs[..], [InputOutcome::Coinbase]));
    assert!(report.is_noop());
}

#[test]
fn test_coins_survive_reopening() {
    let key = factories::key();
    let (wallet, backend) = factories::wallet(None, &[key]);
    let (hash, _coin) = receive(&wallet, &key, 500);
    receive(&wallet, &key, 300);
    wallet
        .process_transaction(
            &Tx::default()
                .with_input(
                    Input::default()
                        .with_previous_output(hash, 0)
                        .with_script(factories::script_sig(&key)),
                )
                .create(),
        )
        .unwrap();
    let expected = wallet.registry().coins_of(&key.serialize());
    drop(wallet);

    let (reopened, _backend) = factories::wallet(Some(backend), &[key]);

    assert_eq!(reopened.registry().coins_of(&key.serialize()), expected);
    assert_eq!(reopened.balance(), 300);
}

#[test]
fn test_spent_out_address_is_deleted_from_store() {
    let key = factories::key();
    let (wallet, _backend) = factories::wallet(None, &[key]);
    let (hash, _coin) = receive(&wallet, &key, 500);
    assert_eq!(wallet.store().coins_of(&key.serialize()).unwrap().len(), 1);

    wallet
        .process_transaction(
            &Tx::default()
                .with_input(
                    Input::default()
                        .with_previous_output(hash, 0)
                        .with_script(factories::script_sig(&key)),
                )
                .create(),
        )
        .unwrap();

    assert!(wallet.store().load().unwrap().is_empty());
}

#[test]
fn test_from_config_in_memory() {
    let key = factories::key();
    let config = Config::default();

    let wallet = Wallet::from_config(&config, factories::keychain(&[key])).unwrap();
    let transaction = Tx::default()
        .with_output(
            Output::default()
                .with_value(1)
                .with_script(factories::pay_to_pubkey(&key)),
        )
        .create();

    assert_eq!(
        wallet
            .process_transaction(&transaction)
            .unwrap()
            .received()
            .count(),
        1
    );
}

#[cfg(not(feature = "rocksdb-backend"))]
#[test]
fn test_from_config_without_rocksdb() {
    let config = mona_config::loaders::toml::from_str("[storage]\nbackend = \"rocksdb\"").unwrap();

    let result = Wallet::from_config(&config, factories::keychain(&[]));

    assert!(matches!(
        result,
        Err(Error::BackendUnavailable(StorageBackend::RocksDb))
    ));
}
