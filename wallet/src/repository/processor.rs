use std::collections::BTreeSet;

use mona_data_structures::chain::{Hash, Transaction, TransactionInput, TransactionOutput};

use super::*;
use crate::{
    keychain::KeyOwnership,
    model::Coin,
    script::{OutputScript, ScriptSig},
};

/// What processing did with one input
#[derive(Debug)]
pub enum InputOutcome {
    /// Block reward input, nothing is spent
    Coinbase,
    /// An owned coin was spent and removed from the registry
    Spent(Coin),
    /// The input does not concern the wallet, or spends an unknown coin
    Skipped(Error),
}

/// What processing did with one output
#[derive(Debug)]
pub enum OutputOutcome {
    /// A new coin was added to the registry
    Received(Coin),
    /// The output does not concern the wallet, or its coin is already held
    Skipped(Error),
}

/// Per-item result of processing a transaction, inputs and outputs in transaction order
#[derive(Debug)]
pub struct ProcessReport {
    /// Hash of the processed transaction
    pub transaction_hash: Hash,
    /// One outcome per input
    pub inputs: Vec<InputOutcome>,
    /// One outcome per output
    pub outputs: Vec<OutputOutcome>,
}

impl ProcessReport {
    /// Coins removed from the registry.
    pub fn spent(&self) -> impl Iterator<Item = &Coin> {
        self.inputs.iter().filter_map(|outcome| match outcome {
            InputOutcome::Spent(coin) => Some(coin),
            _ => None,
        })
    }

    /// Coins added to the registry.
    pub fn received(&self) -> impl Iterator<Item = &Coin> {
        self.outputs.iter().filter_map(|outcome| match outcome {
            OutputOutcome::Received(coin) => Some(coin),
            OutputOutcome::Skipped(_) => None,
        })
    }

    /// Addresses whose coin list was modified.
    pub fn touched_addresses(&self) -> BTreeSet<Vec<u8>> {
        self.spent()
            .chain(self.received())
            .map(|coin| coin.address.clone())
            .collect()
    }

    /// Whether the registry was left as it was.
    pub fn is_noop(&self) -> bool {
        self.spent().next().is_none() && self.received().next().is_none()
    }
}

/// Applies transactions to a [`UtxoRegistry`].
///
/// Processing is a best-effort scan: every input and output is handled on its own, anything
/// that does not concern the wallet is logged and skipped, and no error ever aborts the rest
/// of the transaction.
pub struct TransactionProcessor<'a, K: ?Sized> {
    registry: &'a UtxoRegistry,
    keychain: &'a K,
}

impl<'a, K> TransactionProcessor<'a, K>
where
    K: KeyOwnership + ?Sized,
{
    /// Processor updating `registry` for the keys owned by `keychain`.
    pub fn new(registry: &'a UtxoRegistry, keychain: &'a K) -> Self {
        Self { registry, keychain }
    }

    /// Spend the owned coins consumed by the inputs of `transaction` and add its owned outputs.
    pub fn process(&self, transaction: &Transaction) -> ProcessReport {
        let transaction_hash = transaction.hash();

        let inputs = transaction
            .inputs
            .iter()
            .enumerate()
            .map(|(position, input)| self.process_input(&transaction_hash, position, input))
            .collect();
        let outputs = transaction
            .outputs
            .iter()
            .zip(0u32..)
            .map(|(output, index)| self.process_output(&transaction_hash, index, output))
            .collect();

        ProcessReport {
            transaction_hash,
            inputs,
            outputs,
        }
    }

    fn process_input(
        &self,
        transaction_hash: &Hash,
        position: usize,
        input: &TransactionInput,
    ) -> InputOutcome {
        if input.is_coinbase() {
            return InputOutcome::Coinbase;
        }

        match self.spend(input) {
            Ok(coin) => InputOutcome::Spent(coin),
            Err(e) => {
                match e {
                    Error::CoinNotFound { .. } => log::warn!(
                        "Transaction {} input {}: owned key spends a coin that is not tracked: {}",
                        transaction_hash,
                        position,
                        e
                    ),
                    _ => log::debug!(
                        "Transaction {} input {} skipped: {}",
                        transaction_hash,
                        position,
                        e
                    ),
                }

                InputOutcome::Skipped(e)
            }
        }
    }

    fn spend(&self, input: &TransactionInput) -> Result<Coin> {
        let script_sig = ScriptSig::decode(&input.script)?;
        let key = self
            .keychain
            .parse_public_key(&script_sig.tail.public_key)?;
        let address = self.keychain.address(&key);
        if !self.keychain.is_owned(&key) {
            return Err(Error::NotOwned { address });
        }

        let owner = self.keychain.serialize_public_key(&key);
        let previous = &input.previous_output;
        let coin = self
            .registry
            .remove(&owner, &previous.hash, previous.index)?;
        log::info!(
            "Spent {} from {} (output {} of transaction {})",
            coin.value,
            address,
            previous.index,
            previous.hash
        );

        Ok(coin)
    }

    fn process_output(
        &self,
        transaction_hash: &Hash,
        index: u32,
        output: &TransactionOutput,
    ) -> OutputOutcome {
        match self.receive(transaction_hash, index, output) {
            Ok(coin) => OutputOutcome::Received(coin),
            Err(e) => {
                log::debug!(
                    "Transaction {} output {} skipped: {}",
                    transaction_hash,
                    index,
                    e
                );

                OutputOutcome::Skipped(e)
            }
        }
    }

    fn receive(
        &self,
        transaction_hash: &Hash,
        index: u32,
        output: &TransactionOutput,
    ) -> Result<Coin> {
        let script = OutputScript::decode(&output.script)?;
        script.validate()?;

        let key = match &script {
            OutputScript::PayToPubKeyHash(template) => {
                self.keychain
                    .lookup_pkh(&template.pkh)
                    .ok_or_else(|| Error::NotOwned {
                        address: self.keychain.pkh_address(&template.pkh),
                    })?
            }
            OutputScript::PayToPubKey(template) => {
                let key = self.keychain.parse_public_key(&template.public_key)?;
                if !self.keychain.is_owned(&key) {
                    return Err(Error::NotOwned {
                        address: self.keychain.address(&key),
                    });
                }

                key
            }
        };

        let coin = Coin {
            address: self.keychain.serialize_public_key(&key),
            transaction_hash: *transaction_hash,
            output_index: index,
            value: output.value,
            kind: script.kind(),
        };
        self.registry.add(coin.clone())?;
        log::info!(
            "Received {} to {} (output {} of transaction {})",
            coin.value,
            self.keychain.address(&key),
            index,
            transaction_hash
        );

        Ok(coin)
    }
}
