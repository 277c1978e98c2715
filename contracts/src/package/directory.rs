//! Implementation provider mapping contract names to implementations.
use alloy_primitives::{Address, B256};
use zos_vm::{
    storage::{mapping_slot, slot},
    Contract, Frame, Revert,
};

pub use sol::*;

use crate::{
    access::{ownable::Ownable, OwnableError},
    utils::{decode_call, returns},
};

mod sol {
    #![allow(missing_docs)]

    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when the implementation of a contract changes.
        ///
        /// * `contractName` - Name of the contract.
        /// * `implementation` - New implementation, zero when unset.
        #[derive(Debug, PartialEq, Eq)]
        event ImplementationChanged(string contractName, address implementation);

        /// The implementation is not a contract.
        ///
        /// * `implementation` - Address of the invalid implementation.
        #[derive(Debug, PartialEq, Eq)]
        error DirectoryInvalidImplementation(address implementation);

        /// Public surface of an [`super::ImplementationDirectory`], on top
        /// of [`crate::access::IOwnable`].
        interface IImplementationDirectory {
            function getImplementation(string contractName) external view returns (address);
            function setImplementation(string contractName, address implementation) external;
            function unsetImplementation(string contractName) external;
        }
    }
}

/// An [`ImplementationDirectory`] error.
#[derive(Debug, PartialEq, Eq, derive_more::From)]
pub enum Error {
    /// The implementation is not a contract.
    InvalidImplementation(DirectoryInvalidImplementation),
    /// Error from the [`Ownable`] base.
    Ownable(OwnableError),
}

impl From<Error> for Revert {
    fn from(error: Error) -> Self {
        match error {
            Error::InvalidImplementation(e) => e.into(),
            Error::Ownable(e) => e.into(),
        }
    }
}

const OWNABLE: Ownable = Ownable::new(slot(0));
const IMPLEMENTATIONS: u64 = 1;

/// Ownable registry of implementations by contract name.
#[derive(Debug, Default)]
pub struct ImplementationDirectory;

impl ImplementationDirectory {
    /// Returns the implementation of `contract_name`, or the zero address.
    #[must_use]
    pub fn get_implementation(
        &self,
        frame: &Frame<'_>,
        contract_name: &str,
    ) -> Address {
        frame.load(implementation_slot(contract_name))
    }

    /// Sets the implementation of `contract_name`.
    ///
    /// # Errors
    ///
    /// * [`Error::Ownable`] - If not called by the owner.
    /// * [`Error::InvalidImplementation`] - If `implementation` holds no code.
    ///
    /// # Events
    ///
    /// * [`ImplementationChanged`].
    pub fn set_implementation(
        &self,
        frame: &mut Frame<'_>,
        contract_name: String,
        implementation: Address,
    ) -> Result<(), Error> {
        OWNABLE.only_owner(frame)?;

        if implementation.is_zero() || !frame.has_code(implementation) {
            return Err(DirectoryInvalidImplementation { implementation }.into());
        }

        self.write(frame, contract_name, implementation);
        Ok(())
    }

    /// Removes the implementation of `contract_name`.
    ///
    /// # Errors
    ///
    /// * [`Error::Ownable`] - If not called by the owner.
    ///
    /// # Events
    ///
    /// * [`ImplementationChanged`].
    pub fn unset_implementation(
        &self,
        frame: &mut Frame<'_>,
        contract_name: String,
    ) -> Result<(), Error> {
        OWNABLE.only_owner(frame)?;
        self.write(frame, contract_name, Address::ZERO);
        Ok(())
    }

    fn write(
        &self,
        frame: &mut Frame<'_>,
        contract_name: String,
        implementation: Address,
    ) {
        frame.store(implementation_slot(&contract_name), implementation);
        frame.emit(&ImplementationChanged {
            contractName: contract_name,
            implementation,
        });
    }
}

impl Contract for ImplementationDirectory {
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
        use IImplementationDirectory::IImplementationDirectoryCalls as Calls;

        if let Some(result) = OWNABLE.route(frame, input) {
            return result;
        }

        let Some(call) = decode_call::<Calls>(input)? else {
            return Err(Revert::empty());
        };

        match call {
            Calls::getImplementation(call) => {
                returns(&self.get_implementation(frame, &call.contractName))
            }
            Calls::setImplementation(call) => {
                self.set_implementation(
                    frame,
                    call.contractName,
                    call.implementation,
                )?;
                Ok(Vec::new())
            }
            Calls::unsetImplementation(call) => {
                self.unset_implementation(frame, call.contractName)?;
                Ok(Vec::new())
            }
        }
    }
}

fn implementation_slot(contract_name: &str) -> B256 {
    mapping_slot(contract_name.as_bytes(), slot(IMPLEMENTATIONS))
}
