//! Contract module which provides a basic access control mechanism, where
//! there is an account (an owner) that can be granted exclusive access to
//! specific functions.
//!
//! The initial owner is the account that deploys the contract. This can
//! later be changed with [`Ownable::transfer_ownership`].
//!
//! This module is used through composition. Contracts embed an [`Ownable`]
//! bound to the slot holding their owner, call [`Ownable::only_owner`] to
//! restrict operations, and forward unknown calls to [`Ownable::route`] to
//! expose [`IOwnable`].
use alloy_primitives::{Address, B256};
use zos_vm::{Frame, Revert};

pub use sol::*;

use crate::utils::{decode_call, returns};

mod sol {
    #![allow(missing_docs)]

    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when ownership gets transferred between accounts.
        ///
        /// * `previous_owner` - Address of the previous owner.
        /// * `new_owner` - Address of the new owner.
        #[derive(Debug, PartialEq, Eq)]
        event OwnershipTransferred(address indexed previous_owner, address indexed new_owner);
    }

    sol! {
        /// The caller account is not authorized to perform an operation.
        ///
        /// * `account` - Account that was found to not be authorized.
        #[derive(Debug, PartialEq, Eq)]
        error OwnableUnauthorizedAccount(address account);
        /// The owner is not a valid owner account. (eg. [`Address::ZERO`])
        ///
        /// * `owner` - Account that's not allowed to become the owner.
        #[derive(Debug, PartialEq, Eq)]
        error OwnableInvalidOwner(address owner);
    }

    sol! {
        /// Public surface of an [`super::Ownable`] contract.
        interface IOwnable {
            function owner() external view returns (address);
            function transferOwnership(address newOwner) external;
            function renounceOwnership() external;
        }
    }
}

/// An error that occurred in the implementation of an [`Ownable`] contract.
#[derive(Debug, PartialEq, Eq, derive_more::From)]
pub enum Error {
    /// The caller account is not authorized to perform an operation.
    UnauthorizedAccount(OwnableUnauthorizedAccount),
    /// The owner is not a valid owner account. (eg. [`Address::ZERO`])
    InvalidOwner(OwnableInvalidOwner),
}

impl From<Error> for Revert {
    fn from(error: Error) -> Self {
        match error {
            Error::UnauthorizedAccount(e) => e.into(),
            Error::InvalidOwner(e) => e.into(),
        }
    }
}

/// State of an [`Ownable`] contract: the slot holding its owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ownable {
    owner: B256,
}

impl Ownable {
    /// Binds the owner to `slot`.
    #[must_use]
    pub const fn new(slot: B256) -> Self {
        Self { owner: slot }
    }

    /// Sets the deployer as the initial owner.
    ///
    /// # Arguments
    ///
    /// * `&self` - The owner slot.
    /// * `frame` - Execution context of the constructor.
    ///
    /// # Events
    ///
    /// * [`OwnershipTransferred`].
    pub fn initialize(&self, frame: &mut Frame<'_>) {
        let owner = frame.sender();
        self._transfer_ownership(frame, owner);
    }

    /// Returns the address of the current owner.
    ///
    /// # Arguments
    ///
    /// * `&self` - The owner slot.
    /// * `frame` - Read access to the contract's state.
    #[must_use]
    pub fn owner(&self, frame: &Frame<'_>) -> Address {
        frame.load(self.owner)
    }

    /// Transfers ownership of the contract to a new account (`new_owner`).
    /// Can only be called by the current owner.
    ///
    /// # Arguments
    ///
    /// * `&self` - The owner slot.
    /// * `frame` - Write access to the contract's state.
    /// * `new_owner` - The next owner of this contract.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedAccount`] - If not called by the owner.
    /// * [`Error::InvalidOwner`] - If `new_owner` is the [`Address::ZERO`].
    ///
    /// # Events
    ///
    /// * [`OwnershipTransferred`].
    pub fn transfer_ownership(
        &self,
        frame: &mut Frame<'_>,
        new_owner: Address,
    ) -> Result<(), Error> {
        self.only_owner(frame)?;

        if new_owner.is_zero() {
            return Err(Error::InvalidOwner(OwnableInvalidOwner {
                owner: Address::ZERO,
            }));
        }

        self._transfer_ownership(frame, new_owner);

        Ok(())
    }

    /// Leaves the contract without owner. It will not be possible to call
    /// functions that require `only_owner`. Can only be called by the current
    /// owner.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedAccount`] - If not called by the owner.
    ///
    /// # Events
    ///
    /// * [`OwnershipTransferred`].
    pub fn renounce_ownership(&self, frame: &mut Frame<'_>) -> Result<(), Error> {
        self.only_owner(frame)?;
        self._transfer_ownership(frame, Address::ZERO);
        Ok(())
    }

    /// Checks that the caller is the owner.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedAccount`] - If called by any account other than
    ///   the owner.
    pub fn only_owner(&self, frame: &Frame<'_>) -> Result<(), Error> {
        let account = frame.sender();
        if self.owner(frame) != account {
            return Err(Error::UnauthorizedAccount(
                OwnableUnauthorizedAccount { account },
            ));
        }

        Ok(())
    }

    /// Transfers ownership of the contract to a new account (`new_owner`).
    /// Internal function without access restriction.
    ///
    /// # Events
    ///
    /// * [`OwnershipTransferred`].
    pub fn _transfer_ownership(&self, frame: &mut Frame<'_>, new_owner: Address) {
        let previous_owner = self.owner(frame);
        frame.store(self.owner, new_owner);
        frame.emit(&OwnershipTransferred { previous_owner, new_owner });
    }

    /// Dispatches `input` if it is one of the [`IOwnable`] calls.
    ///
    /// Returns `None` for any other selector.
    pub fn route(
        &self,
        frame: &mut Frame<'_>,
        input: &[u8],
    ) -> Option<Result<Vec<u8>, Revert>> {
        use IOwnable::IOwnableCalls;

        let call = match decode_call::<IOwnableCalls>(input) {
            Ok(Some(call)) => call,
            Ok(None) => return None,
            Err(revert) => return Some(Err(revert)),
        };

        Some(match call {
            IOwnableCalls::owner(_) => returns(&self.owner(frame)),
            IOwnableCalls::transferOwnership(call) => self
                .transfer_ownership(frame, call.newOwner)
                .map(|()| Vec::new())
                .map_err(Revert::from),
            IOwnableCalls::renounceOwnership(_) => self
                .renounce_ownership(frame)
                .map(|()| Vec::new())
                .map_err(Revert::from),
        })
    }
}
