use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Transaction options forwarded verbatim to every transaction a deployer or
/// a wrapper sends.
///
/// Unset fields are left to the network: the sender defaults to the
/// network's account, gas is estimated, and no value is attached.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TxParams {
    /// Sender of the transactions.
    pub from: Option<Address>,
    /// Gas limit.
    pub gas: Option<u64>,
    /// Gas price, in wei.
    pub gas_price: Option<u128>,
    /// Value attached to the transactions, in wei.
    pub value: Option<U256>,
}

impl TxParams {
    /// Sets the sender.
    #[must_use]
    pub fn with_from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    /// Sets the gas limit.
    #[must_use]
    pub fn with_gas(mut self, gas: u64) -> Self {
        self.gas = Some(gas);
        self
    }

    /// Sets the gas price.
    #[must_use]
    pub fn with_gas_price(mut self, gas_price: u128) -> Self {
        self.gas_price = Some(gas_price);
        self
    }

    /// Sets the attached value.
    #[must_use]
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }
}
