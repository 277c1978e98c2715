use alloy_primitives::Address;
use tracing::info;

use crate::{
    error::{Error, Rejection},
    network::Network,
    params::TxParams,
    registry::ContractRegistry,
};

/// Name the package contract is registered under.
pub const PACKAGE: &str = "Package";

/// Wrapper constructed around a freshly deployed package.
pub trait FromPackage<N: Network>: Sized {
    /// Binds the wrapper to the package at `package`, sending its
    /// transactions with `tx_params`.
    fn from_package(network: N, package: Address, tx_params: TxParams)
        -> Self;
}

/// Deploys packages and hands back typed wrappers around them.
///
/// The deployer never changes its [`TxParams`]: every transaction it sends,
/// and every transaction the wrappers it builds send, carries the same
/// parameters.
#[derive(Debug)]
pub struct PackageDeployer<N: Network> {
    network: N,
    registry: ContractRegistry<N::Artifact>,
    tx_params: TxParams,
    package: Option<Address>,
}

impl<N: Network> PackageDeployer<N> {
    /// Creates a deployer sending its transactions to `network`.
    pub fn new(
        network: N,
        registry: ContractRegistry<N::Artifact>,
        tx_params: TxParams,
    ) -> Self {
        Self { network, registry, tx_params, package: None }
    }

    /// Transaction parameters of the deployer.
    pub fn tx_params(&self) -> &TxParams {
        &self.tx_params
    }

    /// Network the deployer sends its transactions to.
    pub fn network(&self) -> &N {
        &self.network
    }

    /// Address of the last package this deployer created.
    pub fn package(&self) -> Option<Address> {
        self.package
    }

    /// Deploys a new package and wraps it in `W`.
    ///
    /// Every call creates a new, independent package.
    ///
    /// # Errors
    ///
    /// * [`Error::Resolution`] - If no `Package` contract is registered. No
    ///   transaction is sent in that case.
    /// * [`Error::Rejected`] - If the deployment is refused or reverts.
    /// * [`Error::Transport`] - If the network can't be reached.
    pub async fn deploy<W: FromPackage<N>>(&mut self) -> Result<W, Error> {
        let package = self.create_package().await?;
        Ok(W::from_package(self.network.clone(), package, self.tx_params.clone()))
    }

    async fn create_package(&mut self) -> Result<Address, Error> {
        info!("Deploying new Package...");
        let artifact = self.registry.resolve(PACKAGE)?;

        let receipt = self.network.deploy(artifact, &[], &self.tx_params).await?;
        let package = receipt.contract_address.ok_or(Rejection::NoContract {
            transaction_hash: receipt.transaction_hash,
        })?;

        info!("Deployed Package {package}");
        self.package = Some(package);
        Ok(package)
    }
}
