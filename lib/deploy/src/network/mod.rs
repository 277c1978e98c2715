//! Chains a deployer can talk to.
//!
//! [`LocalNetwork`] runs native contracts on an in-memory [`zos_vm::Vm`].
//! [`RpcNetwork`] deploys bytecode artifacts through a JSON-RPC node.
use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::{SolCall, SolType, SolValue};
use async_trait::async_trait;
use zos_vm::Receipt;

use crate::{error::Error, params::TxParams};

mod local;
mod rpc;

pub use local::LocalNetwork;
pub use rpc::RpcNetwork;

/// A chain accepting deployments, transactions and reads.
#[async_trait]
pub trait Network: Clone + Send + Sync {
    /// What the network deploys.
    type Artifact: Send + Sync;

    /// Sender of transactions whose [`TxParams::from`] is unset.
    fn default_sender(&self) -> Address;

    /// Deploys `artifact` with ABI-encoded constructor `args`.
    ///
    /// # Errors
    ///
    /// * [`Error::Rejected`] - If the deployment is refused or reverts.
    /// * [`Error::Transport`] - If the network can't be reached.
    async fn deploy(
        &self,
        artifact: &Self::Artifact,
        args: &[u8],
        params: &TxParams,
    ) -> Result<Receipt, Error>;

    /// Sends a state-changing transaction to `to`.
    ///
    /// # Errors
    ///
    /// * [`Error::Rejected`] - If the transaction is refused or reverts.
    /// * [`Error::Transport`] - If the network can't be reached.
    async fn send(
        &self,
        to: Address,
        input: &[u8],
        params: &TxParams,
    ) -> Result<Receipt, Error>;

    /// Executes a call against the latest state without committing it.
    ///
    /// # Errors
    ///
    /// * [`Error::Rejected`] - If the call reverts.
    /// * [`Error::Transport`] - If the network can't be reached.
    async fn call(
        &self,
        to: Address,
        input: &[u8],
        params: &TxParams,
    ) -> Result<Bytes, Error>;

    /// Reads the raw storage word at `slot` of `address`.
    ///
    /// # Errors
    ///
    /// * [`Error::Transport`] - If the network can't be reached.
    async fn storage_at(&self, address: Address, slot: B256)
        -> Result<B256, Error>;

    /// Balance of `address`, in wei.
    ///
    /// # Errors
    ///
    /// * [`Error::Transport`] - If the network can't be reached.
    async fn balance(&self, address: Address) -> Result<U256, Error>;
}

/// Sends the ABI-encoded `call` to `to`.
pub(crate) async fn send_call<N: Network, C: SolCall>(
    network: &N,
    to: Address,
    call: &C,
    params: &TxParams,
) -> Result<Receipt, Error> {
    network.send(to, &call.abi_encode(), params).await
}

/// Evaluates the ABI-encoded `call` and decodes its single return value.
pub(crate) async fn read_call<N, C, T>(
    network: &N,
    to: Address,
    call: &C,
    params: &TxParams,
) -> Result<T, Error>
where
    N: Network,
    C: SolCall,
    T: SolValue + From<<T::SolType as SolType>::RustType>,
{
    let output = network.call(to, &call.abi_encode(), params).await?;
    Ok(T::abi_decode(&output)?)
}
