//! Execution context of a single message call.
use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::SolEvent;

use crate::{revert::Revert, storage::Word, vm::Vm};

/// Execution context handed to [`crate::Contract`] code.
///
/// `address` is the account whose storage and balance the code operates on,
/// `code_address` is the account the running code was loaded from. The two
/// differ only inside a delegate call.
pub struct Frame<'a> {
    pub(crate) vm: &'a mut Vm,
    pub(crate) sender: Address,
    pub(crate) value: U256,
    pub(crate) address: Address,
    pub(crate) code_address: Address,
    pub(crate) depth: usize,
}

impl Frame<'_> {
    /// Caller of the current frame (`msg.sender`).
    #[must_use]
    pub fn sender(&self) -> Address {
        self.sender
    }

    /// Value attached to the current frame (`msg.value`).
    #[must_use]
    pub fn value(&self) -> U256 {
        self.value
    }

    /// Account whose storage is being executed against (`address(this)`).
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Account the running code belongs to.
    #[must_use]
    pub fn code_address(&self) -> Address {
        self.code_address
    }

    /// Reads the word at `slot` of the current storage context.
    #[must_use]
    pub fn load<W: Word>(&self, slot: B256) -> W {
        W::from_word(self.vm.state.sload(self.address, slot))
    }

    /// Writes `value` to `slot` of the current storage context.
    pub fn store<W: Word>(&mut self, slot: B256, value: W) {
        self.vm.state.sstore(self.address, slot, value.into_word());
    }

    /// Emits `event` from the current storage context.
    pub fn emit<E: SolEvent>(&mut self, event: &E) {
        self.vm.emit(self.address, event.encode_log_data());
    }

    /// Balance of `account`.
    #[must_use]
    pub fn balance(&self, account: Address) -> U256 {
        self.vm.state.balance(account)
    }

    /// Whether `account` holds code.
    #[must_use]
    pub fn has_code(&self, account: Address) -> bool {
        self.vm.state.code(account).is_some()
    }

    /// Message call into `to`, sent from the current storage context.
    ///
    /// # Errors
    ///
    /// Returns the revert data of the callee. The callee's state changes have
    /// already been rolled back when this returns an error.
    pub fn call(
        &mut self,
        to: Address,
        input: &[u8],
        value: U256,
    ) -> Result<Vec<u8>, Revert> {
        self.vm.execute(
            self.address,
            to,
            to,
            value,
            true,
            input,
            self.depth + 1,
        )
    }

    /// Runs the code of `target` against the current storage context,
    /// keeping the current sender and value.
    ///
    /// # Errors
    ///
    /// Returns the revert data of the delegated code. State changes made by
    /// it have already been rolled back when this returns an error.
    pub fn delegate_call(
        &mut self,
        target: Address,
        input: &[u8],
    ) -> Result<Vec<u8>, Revert> {
        self.vm.execute(
            self.sender,
            self.address,
            target,
            self.value,
            false,
            input,
            self.depth + 1,
        )
    }
}
