use std::str::FromStr;

use alloy::{
    network::{EthereumWallet, ReceiptResponse, TransactionBuilder},
    providers::{DynProvider, PendingTransactionError, Provider, ProviderBuilder},
    rpc::types::{TransactionReceipt, TransactionRequest},
    signers::local::PrivateKeySigner,
    transports::{http::reqwest::Url, TransportErrorKind},
};
use alloy_primitives::{Address, Bytes, B256, U256};
use async_trait::async_trait;
use tracing::debug;
use zos_vm::Receipt;

use super::Network;
use crate::{
    error::{Error, Rejection},
    params::TxParams,
    registry::Artifact,
};

/// A JSON-RPC node, signing transactions with a local private key.
#[derive(Clone)]
pub struct RpcNetwork {
    provider: DynProvider,
    sender: Address,
}

impl std::fmt::Debug for RpcNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcNetwork")
            .field("sender", &self.sender)
            .finish_non_exhaustive()
    }
}

impl RpcNetwork {
    /// Connects to the node at `rpc_url`, signing with `private_key`.
    ///
    /// # Errors
    ///
    /// * [`Error::Config`] - If `rpc_url` or `private_key` are malformed.
    pub fn new(rpc_url: &str, private_key: &str) -> Result<Self, Error> {
        let url = Url::parse(rpc_url).map_err(|e| {
            Error::Config(format!("invalid RPC URL `{rpc_url}`: {e}"))
        })?;
        let signer = PrivateKeySigner::from_str(private_key)
            .map_err(|e| Error::Config(format!("invalid private key: {e}")))?;
        let sender = signer.address();

        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(url)
            .erased();

        Ok(Self { provider, sender })
    }

    fn request(&self, params: &TxParams) -> TransactionRequest {
        let mut request = TransactionRequest::default()
            .with_from(params.from.unwrap_or(self.sender));
        if let Some(gas) = params.gas {
            request.set_gas_limit(gas);
        }
        if let Some(gas_price) = params.gas_price {
            request.set_gas_price(gas_price);
        }
        if let Some(value) = params.value {
            request.set_value(value);
        }
        request
    }

    async fn submit(
        &self,
        request: TransactionRequest,
    ) -> Result<Receipt, Error> {
        let pending = self
            .provider
            .send_transaction(request)
            .await
            .map_err(Error::from_rpc)?;
        let receipt = pending.get_receipt().await.map_err(|e| match e {
            PendingTransactionError::TransportError(e) => Error::from_rpc(e),
            e => Error::Transport(TransportErrorKind::custom(e)),
        })?;

        if !receipt.status() {
            return Err(Rejection::Reverted {
                transaction_hash: receipt.transaction_hash,
            }
            .into());
        }

        Ok(into_receipt(&receipt))
    }
}

fn into_receipt(receipt: &TransactionReceipt) -> Receipt {
    Receipt {
        transaction_hash: receipt.transaction_hash,
        from: receipt.from,
        to: receipt.to,
        contract_address: receipt.contract_address,
        logs: receipt
            .inner
            .logs()
            .iter()
            .map(|log| log.inner.clone())
            .collect(),
    }
}

#[async_trait]
impl Network for RpcNetwork {
    type Artifact = Artifact;

    fn default_sender(&self) -> Address {
        self.sender
    }

    async fn deploy(
        &self,
        artifact: &Self::Artifact,
        args: &[u8],
        params: &TxParams,
    ) -> Result<Receipt, Error> {
        debug!(name = %artifact.contract_name, "deploying through RPC");
        let code = [artifact.bytecode.as_ref(), args].concat();
        let request = self.request(params).with_deploy_code(code);
        self.submit(request).await
    }

    async fn send(
        &self,
        to: Address,
        input: &[u8],
        params: &TxParams,
    ) -> Result<Receipt, Error> {
        debug!(%to, "sending through RPC");
        let request = self
            .request(params)
            .with_to(to)
            .with_input(Bytes::copy_from_slice(input));
        self.submit(request).await
    }

    async fn call(
        &self,
        to: Address,
        input: &[u8],
        params: &TxParams,
    ) -> Result<Bytes, Error> {
        debug!(%to, "calling through RPC");
        let request = self
            .request(params)
            .with_to(to)
            .with_input(Bytes::copy_from_slice(input));
        self.provider.call(request).await.map_err(Error::from_rpc)
    }

    async fn storage_at(
        &self,
        address: Address,
        slot: B256,
    ) -> Result<B256, Error> {
        let value = self
            .provider
            .get_storage_at(address, U256::from_be_bytes(slot.0))
            .await
            .map_err(Error::from_rpc)?;
        Ok(B256::from(value.to_be_bytes::<32>()))
    }

    async fn balance(&self, address: Address) -> Result<U256, Error> {
        self.provider.get_balance(address).await.map_err(Error::from_rpc)
    }
}
