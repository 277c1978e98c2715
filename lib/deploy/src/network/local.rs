use std::sync::{Arc, Mutex, MutexGuard};

use alloy_primitives::{Address, Bytes, B256, U256};
use async_trait::async_trait;
use tracing::{debug, warn};
use zos_contracts::{
    mocks::{
        ClashingImplementation, DummyImplementation, Implementation1,
        Implementation2, Implementation3, Implementation4, MigratableMock,
        MigratableMockV1, MigratableMockV2, MigratableMockV3,
    },
    package::{ImplementationDirectory, Package},
    proxy::{AdminUpgradeabilityProxy, UpgradeabilityProxy},
};
use zos_vm::{Contract, Receipt, Vm};

use super::Network;
use crate::{error::Error, params::TxParams, registry::ContractRegistry};

/// In-memory chain shared by every clone.
///
/// Transactions are executed one at a time, in the order they reach the
/// chain. Gas parameters are ignored.
#[derive(Clone, Debug)]
pub struct LocalNetwork {
    vm: Arc<Mutex<Vm>>,
    sender: Address,
}

impl LocalNetwork {
    /// Creates an empty chain whose default sender is `sender`.
    #[must_use]
    pub fn new(sender: Address) -> Self {
        Self { vm: Arc::new(Mutex::new(Vm::new())), sender }
    }

    /// Registry of every contract this crate's dependencies ship.
    #[must_use]
    pub fn registry() -> ContractRegistry<Arc<dyn Contract>> {
        ContractRegistry::new()
            .with("Package", native(Package))
            .with("ImplementationDirectory", native(ImplementationDirectory))
            .with("AdminUpgradeabilityProxy", native(AdminUpgradeabilityProxy))
            .with("UpgradeabilityProxy", native(UpgradeabilityProxy))
            .with("DummyImplementation", native(DummyImplementation))
            .with("ClashingImplementation", native(ClashingImplementation))
            .with("Implementation1", native(Implementation1))
            .with("Implementation2", native(Implementation2))
            .with("Implementation3", native(Implementation3))
            .with("Implementation4", native(Implementation4))
            .with("MigratableMock", native(MigratableMock))
            .with("MigratableMockV1", native(MigratableMockV1))
            .with("MigratableMockV2", native(MigratableMockV2))
            .with("MigratableMockV3", native(MigratableMockV3))
    }

    /// Credits `amount` to `account`.
    pub fn fund(&self, account: Address, amount: U256) {
        self.vm().fund(account, amount);
    }

    /// Runs `f` with exclusive access to the chain.
    pub fn with_vm<R>(&self, f: impl FnOnce(&mut Vm) -> R) -> R {
        f(&mut self.vm())
    }

    /// Locks the chain.
    ///
    /// A transaction that panicked poisons the lock after the [`Vm`] has
    /// restored the state it started from, so the chain stays usable.
    fn vm(&self) -> MutexGuard<'_, Vm> {
        self.vm.lock().unwrap_or_else(|poisoned| {
            warn!(
                "a transaction panicked on the local network, \
                 its changes were rolled back"
            );
            self.vm.clear_poison();
            poisoned.into_inner()
        })
    }

    fn sender(&self, params: &TxParams) -> Address {
        params.from.unwrap_or(self.sender)
    }
}

fn native(contract: impl Contract + 'static) -> Arc<dyn Contract> {
    Arc::new(contract)
}

#[async_trait]
impl Network for LocalNetwork {
    type Artifact = Arc<dyn Contract>;

    fn default_sender(&self) -> Address {
        self.sender
    }

    async fn deploy(
        &self,
        artifact: &Self::Artifact,
        args: &[u8],
        params: &TxParams,
    ) -> Result<Receipt, Error> {
        let from = self.sender(params);
        debug!(%from, ?artifact, "deploying on the local network");
        let value = params.value.unwrap_or_default();
        Ok(self.vm().deploy(from, Arc::clone(artifact), args, value)?)
    }

    async fn send(
        &self,
        to: Address,
        input: &[u8],
        params: &TxParams,
    ) -> Result<Receipt, Error> {
        let from = self.sender(params);
        debug!(%from, %to, "sending on the local network");
        let value = params.value.unwrap_or_default();
        Ok(self.vm().transact(from, to, input, value)?)
    }

    async fn call(
        &self,
        to: Address,
        input: &[u8],
        params: &TxParams,
    ) -> Result<Bytes, Error> {
        let from = self.sender(params);
        debug!(%from, %to, "calling on the local network");
        Ok(self.vm().call(from, to, input)?)
    }

    async fn storage_at(
        &self,
        address: Address,
        slot: B256,
    ) -> Result<B256, Error> {
        Ok(self.vm().storage_at(address, slot))
    }

    async fn balance(&self, address: Address) -> Result<U256, Error> {
        Ok(self.vm().balance(address))
    }
}
