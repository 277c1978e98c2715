use std::{
    panic::{self, AssertUnwindSafe},
    sync::Arc,
    thread,
};

use alloy_primitives::{keccak256, Address, Bytes, Log, LogData, B256, U256};
use alloy_sol_types::{SolCall, SolType, SolValue};
use tracing::{debug, trace, warn};

use crate::{
    contract::Contract, error::Error, frame::Frame, receipt::Receipt,
    revert::Revert, state::State,
};

/// Maximum nesting of message calls. A call at this depth reverts.
pub const MAX_CALL_DEPTH: usize = 1024;

/// Native stack of the thread running a transaction. Holds
/// [`MAX_CALL_DEPTH`] nested calls through a proxy with room to spare.
const EXECUTION_STACK_SIZE: usize = 256 * 1024 * 1024;

/// In-memory chain executing [`Contract`] code.
#[derive(Debug, Default)]
pub struct Vm {
    pub(crate) state: State,
    logs: Vec<Log>,
}

impl Vm {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `amount` to `account`, creating it when needed.
    pub fn fund(&mut self, account: Address, amount: U256) {
        let account = self.state.account_mut(account);
        account.balance = account.balance.saturating_add(amount);
    }

    /// Balance of `account`.
    #[must_use]
    pub fn balance(&self, account: Address) -> U256 {
        self.state.balance(account)
    }

    /// Number of transactions sent by `account`.
    #[must_use]
    pub fn nonce(&self, account: Address) -> u64 {
        self.state.nonce(account)
    }

    /// Code installed at `account`, if any.
    #[must_use]
    pub fn code(&self, account: Address) -> Option<Arc<dyn Contract>> {
        self.state.code(account)
    }

    /// Reads the raw word at `slot` of `account` (`eth_getStorageAt`).
    #[must_use]
    pub fn storage_at(&self, account: Address, slot: B256) -> B256 {
        self.state.sload(account, slot)
    }

    /// Deploys `code` from `from`, running its constructor with `args`.
    ///
    /// The new contract lives at the CREATE address of `from` and its nonce.
    ///
    /// # Errors
    ///
    /// * [`Error::InsufficientFunds`] - If `from` cannot cover `value`.
    /// * [`Error::Reverted`] - If the constructor reverts.
    pub fn deploy(
        &mut self,
        from: Address,
        code: Arc<dyn Contract>,
        args: &[u8],
        value: U256,
    ) -> Result<Receipt, Error> {
        self.ensure_funds(from, value)?;

        let nonce = self.bump_nonce(from);
        let address = from.create(nonce);
        let transaction_hash = transaction_hash(from, nonce, address, args);
        debug!(%from, %address, ?code, "deploying contract");

        self.logs.clear();
        let result = self.on_execution_stack(|vm| {
            let snapshot = vm.state.clone();
            vm.state.account_mut(address).code = Some(code.clone());
            let result = if vm.state.transfer(from, address, value) {
                let mut frame = Frame {
                    vm: &mut *vm,
                    sender: from,
                    value,
                    address,
                    code_address: address,
                    depth: 0,
                };
                code.construct(&mut frame, args)
            } else {
                Err(Revert::empty())
            };
            if result.is_err() {
                vm.rollback(snapshot, 0);
            }
            result
        });

        match result {
            Ok(()) => Ok(Receipt {
                transaction_hash,
                from,
                to: None,
                contract_address: Some(address),
                logs: std::mem::take(&mut self.logs),
            }),
            Err(revert) => {
                debug!(%from, %revert, "deployment reverted");
                Err(Error::Reverted(revert))
            }
        }
    }

    /// Sends a state-changing message call from `from` to `to`.
    ///
    /// # Errors
    ///
    /// * [`Error::InsufficientFunds`] - If `from` cannot cover `value`.
    /// * [`Error::Reverted`] - If execution reverts. The sender's nonce is
    ///   still consumed, every other change is discarded.
    pub fn transact(
        &mut self,
        from: Address,
        to: Address,
        input: &[u8],
        value: U256,
    ) -> Result<Receipt, Error> {
        self.ensure_funds(from, value)?;

        let nonce = self.bump_nonce(from);
        let transaction_hash = transaction_hash(from, nonce, to, input);
        debug!(%from, %to, %value, "sending transaction");

        self.logs.clear();
        let result = self.on_execution_stack(|vm| {
            vm.execute(from, to, to, value, true, input, 0)
        });
        match result {
            Ok(_) => Ok(Receipt {
                transaction_hash,
                from,
                to: Some(to),
                contract_address: None,
                logs: std::mem::take(&mut self.logs),
            }),
            Err(revert) => {
                debug!(%from, %to, %revert, "transaction reverted");
                Err(Error::Reverted(revert))
            }
        }
    }

    /// Executes a message call and discards every change it made
    /// (`eth_call`).
    ///
    /// # Errors
    ///
    /// * [`Error::Reverted`] - If execution reverts.
    pub fn call(
        &mut self,
        from: Address,
        to: Address,
        input: &[u8],
    ) -> Result<Bytes, Error> {
        let snapshot = self.state.clone();
        let logs = std::mem::take(&mut self.logs);

        let result = self.on_execution_stack(|vm| {
            vm.execute(from, to, to, U256::ZERO, false, input, 0)
        });

        self.state = snapshot;
        self.logs = logs;
        result.map(Bytes::from).map_err(Error::Reverted)
    }

    /// Sends the ABI-encoded `call` to `to`.
    ///
    /// # Errors
    ///
    /// See [`Vm::transact`].
    pub fn send<C: SolCall>(
        &mut self,
        from: Address,
        to: Address,
        call: &C,
        value: U256,
    ) -> Result<Receipt, Error> {
        self.transact(from, to, &call.abi_encode(), value)
    }

    /// Evaluates the ABI-encoded `call` without committing and decodes its
    /// single return value.
    ///
    /// # Errors
    ///
    /// * [`Error::Reverted`] - If execution reverts.
    /// * [`Error::InvalidReturnData`] - If the output does not decode as `T`.
    pub fn read<T, C>(
        &mut self,
        from: Address,
        to: Address,
        call: &C,
    ) -> Result<T, Error>
    where
        T: SolValue + From<<T::SolType as SolType>::RustType>,
        C: SolCall,
    {
        let output = self.call(from, to, &call.abi_encode())?;
        T::abi_decode(&output).map_err(|_| Error::InvalidReturnData(output))
    }

    /// Runs `code_address`'s code against the storage of `address`.
    ///
    /// All changes made by the call, including the value transfer, are undone
    /// when it reverts.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn execute(
        &mut self,
        sender: Address,
        address: Address,
        code_address: Address,
        value: U256,
        transfer: bool,
        input: &[u8],
        depth: usize,
    ) -> Result<Vec<u8>, Revert> {
        if depth >= MAX_CALL_DEPTH {
            debug!(%address, depth, "call depth exceeded");
            return Err(Revert::empty());
        }

        let snapshot = self.state.clone();
        let logs = self.logs.len();

        if transfer && !self.state.transfer(sender, address, value) {
            return Err(Revert::empty());
        }

        let result = match self.state.code(code_address) {
            // Calls to accounts without code succeed and do nothing.
            None => Ok(Vec::new()),
            Some(code) => {
                trace!(%sender, %address, %code_address, ?code, "executing");
                let mut frame = Frame {
                    vm: self,
                    sender,
                    value,
                    address,
                    code_address,
                    depth,
                };
                code.call(&mut frame, input)
            }
        };

        if result.is_err() {
            self.rollback(snapshot, logs);
        }
        result
    }

    /// Runs `f` on a thread whose stack fits [`MAX_CALL_DEPTH`] nested
    /// calls, or on the current thread if none can be spawned.
    ///
    /// If `f` panics, the state it started from is restored before the panic
    /// is resumed.
    fn on_execution_stack<R: Send>(
        &mut self,
        f: impl Fn(&mut Self) -> R + Sync,
    ) -> R {
        let snapshot = self.state.clone();
        let logs = self.logs.len();

        let spawned = thread::scope(|scope| {
            let handle = thread::Builder::new()
                .name("zos-vm".into())
                .stack_size(EXECUTION_STACK_SIZE)
                .spawn_scoped(scope, || f(&mut *self));
            match handle {
                Ok(handle) => Some(handle.join()),
                Err(error) => {
                    warn!(%error, "running transaction on the caller's stack");
                    None
                }
            }
        });
        let outcome = match spawned {
            Some(outcome) => outcome,
            None => panic::catch_unwind(AssertUnwindSafe(|| f(&mut *self))),
        };

        outcome.unwrap_or_else(|payload| {
            self.rollback(snapshot, logs);
            panic::resume_unwind(payload)
        })
    }

    pub(crate) fn emit(&mut self, address: Address, data: LogData) {
        self.logs.push(Log { address, data });
    }

    fn rollback(&mut self, snapshot: State, logs: usize) {
        self.state = snapshot;
        self.logs.truncate(logs);
    }

    fn ensure_funds(&self, from: Address, value: U256) -> Result<(), Error> {
        let balance = self.state.balance(from);
        if balance < value {
            return Err(Error::InsufficientFunds {
                account: from,
                balance,
                needed: value,
            });
        }
        Ok(())
    }

    fn bump_nonce(&mut self, account: Address) -> u64 {
        let account = self.state.account_mut(account);
        let nonce = account.nonce;
        account.nonce += 1;
        nonce
    }
}

fn transaction_hash(
    from: Address,
    nonce: u64,
    to: Address,
    input: &[u8],
) -> B256 {
    keccak256(
        [from.as_slice(), &nonce.to_be_bytes(), to.as_slice(), input].concat(),
    )
}
