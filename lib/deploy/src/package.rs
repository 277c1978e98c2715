//! Typed access to a deployed [`zos_contracts::package::Package`].
use alloy_primitives::Address;
use zos_contracts::{
    access::IOwnable,
    package::IPackage::{
        addVersionCall, getImplementationCall, getVersionCall, hasVersionCall,
    },
};
use zos_vm::Receipt;

use crate::{
    deployer::FromPackage,
    error::Error,
    network::{read_call, send_call, Network},
    params::TxParams,
};

/// Client of a package living on `N`.
///
/// Transactions are sent with the parameters the client was created with.
#[derive(Clone, Debug)]
pub struct PackageClient<N> {
    network: N,
    address: Address,
    tx_params: TxParams,
}

impl<N: Network> FromPackage<N> for PackageClient<N> {
    fn from_package(network: N, package: Address, tx_params: TxParams) -> Self {
        Self { network, address: package, tx_params }
    }
}

impl<N: Network> PackageClient<N> {
    /// Address of the package.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Current owner of the package.
    ///
    /// # Errors
    ///
    /// See [`Network::call`].
    pub async fn owner(&self) -> Result<Address, Error> {
        read_call(
            &self.network,
            self.address,
            &IOwnable::ownerCall {},
            &self.tx_params,
        )
        .await
    }

    /// Registers `provider` as the implementation provider of `version`.
    ///
    /// # Errors
    ///
    /// * [`Error::Rejected`] - If the sender is not the owner, the version
    ///   already exists or `provider` is the zero address.
    /// * [`Error::Transport`] - If the network can't be reached.
    pub async fn add_version(
        &self,
        version: &str,
        provider: Address,
    ) -> Result<Receipt, Error> {
        let call = addVersionCall { version: version.to_owned(), provider };
        send_call(&self.network, self.address, &call, &self.tx_params).await
    }

    /// Whether `version` is registered.
    ///
    /// # Errors
    ///
    /// See [`Network::call`].
    pub async fn has_version(&self, version: &str) -> Result<bool, Error> {
        let call = hasVersionCall { version: version.to_owned() };
        read_call(&self.network, self.address, &call, &self.tx_params).await
    }

    /// Provider of `version`, or the zero address.
    ///
    /// # Errors
    ///
    /// See [`Network::call`].
    pub async fn get_version(&self, version: &str) -> Result<Address, Error> {
        let call = getVersionCall { version: version.to_owned() };
        read_call(&self.network, self.address, &call, &self.tx_params).await
    }

    /// Implementation of `contract_name` in `version`.
    ///
    /// # Errors
    ///
    /// * [`Error::Rejected`] - If `version` is unknown.
    /// * [`Error::Transport`] - If the network can't be reached.
    pub async fn get_implementation(
        &self,
        version: &str,
        contract_name: &str,
    ) -> Result<Address, Error> {
        let call = getImplementationCall {
            version: version.to_owned(),
            contractName: contract_name.to_owned(),
        };
        read_call(&self.network, self.address, &call, &self.tx_params).await
    }
}
