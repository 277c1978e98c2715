use alloy_primitives::{Address, Log, B256};
use alloy_sol_types::SolEvent;

/// Outcome of a successful transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    /// Hash identifying the transaction.
    pub transaction_hash: B256,
    /// Sender of the transaction.
    pub from: Address,
    /// Recipient of the transaction, `None` for deployments.
    pub to: Option<Address>,
    /// Address of the created contract, for deployments.
    pub contract_address: Option<Address>,
    /// Logs emitted by the transaction, in emission order.
    pub logs: Vec<Log>,
}

impl Receipt {
    /// Decodes every log of type `E`, skipping logs of other types.
    #[must_use]
    pub fn decode_logs<E: SolEvent>(&self) -> Vec<E> {
        self.logs
            .iter()
            .filter_map(|log| E::decode_log_data(&log.data).ok())
            .collect()
    }

    /// Checks that the transaction emitted the `expected` event.
    pub fn emits<E>(&self, expected: &E) -> bool
    where
        E: SolEvent + PartialEq,
    {
        self.decode_logs::<E>().iter().any(|event| event == expected)
    }
}
