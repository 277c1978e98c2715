//! World state of the [`crate::Vm`].
use std::{collections::HashMap, sync::Arc};

use alloy_primitives::{Address, B256, U256};

use crate::contract::Contract;

/// A single account: an externally owned account when `code` is `None`.
#[derive(Clone, Debug, Default)]
pub(crate) struct Account {
    pub(crate) balance: U256,
    pub(crate) nonce: u64,
    pub(crate) code: Option<Arc<dyn Contract>>,
    pub(crate) storage: HashMap<B256, B256>,
}

/// All accounts known to the chain.
///
/// Cloning the state is how call frames snapshot it, so everything in here
/// must stay cheap to clone (code is shared behind an [`Arc`]).
#[derive(Clone, Debug, Default)]
pub(crate) struct State {
    accounts: HashMap<Address, Account>,
}

impl State {
    pub(crate) fn account(&self, address: Address) -> Option<&Account> {
        self.accounts.get(&address)
    }

    pub(crate) fn account_mut(&mut self, address: Address) -> &mut Account {
        self.accounts.entry(address).or_default()
    }

    pub(crate) fn balance(&self, address: Address) -> U256 {
        self.account(address).map(|account| account.balance).unwrap_or_default()
    }

    pub(crate) fn nonce(&self, address: Address) -> u64 {
        self.account(address).map(|account| account.nonce).unwrap_or_default()
    }

    pub(crate) fn code(&self, address: Address) -> Option<Arc<dyn Contract>> {
        self.account(address).and_then(|account| account.code.clone())
    }

    pub(crate) fn sload(&self, address: Address, slot: B256) -> B256 {
        self.account(address)
            .and_then(|account| account.storage.get(&slot).copied())
            .unwrap_or_default()
    }

    pub(crate) fn sstore(&mut self, address: Address, slot: B256, value: B256) {
        let storage = &mut self.account_mut(address).storage;
        if value.is_zero() {
            storage.remove(&slot);
        } else {
            storage.insert(slot, value);
        }
    }

    /// Moves `value` from `from` to `to`.
    ///
    /// Returns `false`, leaving balances untouched, when `from` cannot cover
    /// the transfer.
    pub(crate) fn transfer(
        &mut self,
        from: Address,
        to: Address,
        value: U256,
    ) -> bool {
        if value.is_zero() {
            return true;
        }
        let Some(remaining) = self.balance(from).checked_sub(value) else {
            return false;
        };
        self.account_mut(from).balance = remaining;
        let recipient = self.account_mut(to);
        recipient.balance = recipient.balance.saturating_add(value);
        true
    }
}
