//! Registries keeping track of implementations.
//!
//! A [`Package`] maps version names to implementation providers. An
//! [`ImplementationDirectory`] is such a provider: it maps contract names to
//! the addresses of their implementations.
use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::{SolCall, SolValue};
use zos_vm::{
    storage::{mapping_slot, slot},
    Contract, Frame, Revert,
};

mod directory;

pub use directory::{
    DirectoryInvalidImplementation, IImplementationDirectory,
    ImplementationChanged, ImplementationDirectory,
};
pub use sol::*;

use crate::{
    access::ownable::Ownable,
    utils::{decode_call, returns},
};

mod sol {
    #![allow(missing_docs)]

    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when a new version is registered in a [`super::Package`].
        ///
        /// * `version` - Name of the version.
        /// * `provider` - Implementation provider of the version.
        #[derive(Debug, PartialEq, Eq)]
        event VersionAdded(string version, address provider);
    }

    sol! {
        /// The version is already registered.
        ///
        /// * `version` - Name of the version.
        #[derive(Debug, PartialEq, Eq)]
        error PackageVersionAlreadyExists(string version);

        /// The provider of a version is the zero address.
        ///
        /// * `provider` - Address of the invalid provider.
        #[derive(Debug, PartialEq, Eq)]
        error PackageInvalidProvider(address provider);

        /// The version is not registered.
        ///
        /// * `version` - Name of the version.
        #[derive(Debug, PartialEq, Eq)]
        error PackageUnknownVersion(string version);
    }

    sol! {
        /// Contract resolving contract names to implementations.
        interface IImplementationProvider {
            function getImplementation(string contractName) external view returns (address);
        }

        /// Public surface of a [`super::Package`], on top of
        /// [`crate::access::IOwnable`].
        interface IPackage {
            function getVersion(string version) external view returns (address);
            function hasVersion(string version) external view returns (bool);
            function addVersion(string version, address provider) external;
            function getImplementation(string version, string contractName) external view returns (address);
        }
    }
}

/// A [`Package`] error.
#[derive(Debug, PartialEq, Eq, derive_more::From)]
pub enum Error {
    /// The version is already registered.
    VersionAlreadyExists(PackageVersionAlreadyExists),
    /// The provider of a version is the zero address.
    InvalidProvider(PackageInvalidProvider),
    /// The version is not registered.
    UnknownVersion(PackageUnknownVersion),
    /// Error from the [`Ownable`] base.
    Ownable(crate::access::OwnableError),
}

impl From<Error> for Revert {
    fn from(error: Error) -> Self {
        match error {
            Error::VersionAlreadyExists(e) => e.into(),
            Error::InvalidProvider(e) => e.into(),
            Error::UnknownVersion(e) => e.into(),
            Error::Ownable(e) => e.into(),
        }
    }
}

const OWNABLE: Ownable = Ownable::new(slot(0));
const VERSIONS: u64 = 1;

/// Registry of versions, each backed by an implementation provider such as
/// an [`ImplementationDirectory`]. Versions can only be added, by the owner.
#[derive(Debug, Default)]
pub struct Package;

impl Package {
    /// Returns the provider of `version`, or the zero address if it is not
    /// registered.
    #[must_use]
    pub fn get_version(&self, frame: &Frame<'_>, version: &str) -> Address {
        frame.load(version_slot(version))
    }

    /// Whether `version` is registered.
    #[must_use]
    pub fn has_version(&self, frame: &Frame<'_>, version: &str) -> bool {
        !self.get_version(frame, version).is_zero()
    }

    /// Registers `provider` as the implementation provider of `version`.
    ///
    /// # Errors
    ///
    /// * [`Error::Ownable`] - If not called by the owner.
    /// * [`Error::VersionAlreadyExists`] - If `version` is registered.
    /// * [`Error::InvalidProvider`] - If `provider` is the zero address.
    ///
    /// # Events
    ///
    /// * [`VersionAdded`].
    pub fn add_version(
        &self,
        frame: &mut Frame<'_>,
        version: String,
        provider: Address,
    ) -> Result<(), Error> {
        OWNABLE.only_owner(frame)?;

        if self.has_version(frame, &version) {
            return Err(PackageVersionAlreadyExists { version }.into());
        }
        if provider.is_zero() {
            return Err(PackageInvalidProvider { provider }.into());
        }

        frame.store(version_slot(&version), provider);
        frame.emit(&VersionAdded { version, provider });

        Ok(())
    }

    /// Asks the provider of `version` for the implementation of
    /// `contract_name`.
    ///
    /// # Errors
    ///
    /// * [`Error::UnknownVersion`] - If `version` is not registered.
    /// * The revert data of the provider, if it fails.
    pub fn get_implementation(
        &self,
        frame: &mut Frame<'_>,
        version: String,
        contract_name: String,
    ) -> Result<Address, Revert> {
        let provider = self.get_version(frame, &version);
        if provider.is_zero() {
            return Err(Error::from(PackageUnknownVersion { version }).into());
        }

        let call = IImplementationProvider::getImplementationCall {
            contractName: contract_name,
        };
        let output = frame.call(provider, &call.abi_encode(), U256::ZERO)?;
        Address::abi_decode(&output).map_err(|_| Revert::empty())
    }
}

impl Contract for Package {
    fn construct(
        &self,
        frame: &mut Frame<'_>,
        _args: &[u8],
    ) -> Result<(), Revert> {
        OWNABLE.initialize(frame);
        Ok(())
    }

    fn call(
        &self,
        frame: &mut Frame<'_>,
        input: &[u8],
    ) -> Result<Vec<u8>, Revert> {
        use IPackage::IPackageCalls as Calls;

        if let Some(result) = OWNABLE.route(frame, input) {
            return result;
        }

        let Some(call) = decode_call::<Calls>(input)? else {
            return Err(Revert::empty());
        };

        match call {
            Calls::getVersion(call) => {
                returns(&self.get_version(frame, &call.version))
            }
            Calls::hasVersion(call) => {
                returns(&self.has_version(frame, &call.version))
            }
            Calls::addVersion(call) => {
                self.add_version(frame, call.version, call.provider)?;
                Ok(Vec::new())
            }
            Calls::getImplementation(call) => returns(
                &self.get_implementation(frame, call.version, call.contractName)?,
            ),
        }
    }
}

fn version_slot(version: &str) -> B256 {
    mapping_slot(version.as_bytes(), slot(VERSIONS))
}
