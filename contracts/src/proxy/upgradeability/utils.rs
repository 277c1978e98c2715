//! Getters and event emitting update functions for the proxy management
//! slots.
//!
//! The implementation and the admin are stored at slots derived from the hash
//! of fixed strings, so that they can't collide with the sequential slots
//! used by the implementation behind the proxy.
use alloy_primitives::{Address, B256};
use tracing::debug;
use zos_vm::{Frame, Revert};

pub use sol::*;

use super::{AdminChanged, Upgraded};

mod sol {
    #![allow(missing_docs)]

    use alloy_sol_macro::sol;

    sol! {
        /// The `implementation` of the proxy is invalid: it is the zero
        /// address or an account without code.
        ///
        /// * `implementation` - Address of the invalid implementation.
        #[derive(Debug, PartialEq, Eq)]
        error ProxyInvalidImplementation(address implementation);

        /// The `admin` of the proxy is invalid.
        ///
        /// * `admin` - Address of the invalid admin.
        #[derive(Debug, PartialEq, Eq)]
        error ProxyInvalidAdmin(address admin);

        /// The caller is not the admin of the proxy.
        ///
        /// * `account` - Account that was found to not be authorized.
        #[derive(Debug, PartialEq, Eq)]
        error ProxyUnauthorizedAccount(address account);

        /// The admin tried to reach the implementation behind the proxy.
        #[derive(Debug, PartialEq, Eq)]
        error ProxyAdminCannotFallback();

        /// A non-payable management function received value.
        #[derive(Debug, PartialEq, Eq)]
        error ProxyNonPayable();
    }
}

/// An [`UpgradeabilityUtils`] error.
#[derive(Debug, PartialEq, Eq, derive_more::From)]
pub enum Error {
    /// The `implementation` of the proxy is invalid.
    InvalidImplementation(ProxyInvalidImplementation),
    /// The `admin` of the proxy is invalid.
    InvalidAdmin(ProxyInvalidAdmin),
    /// The caller is not the admin of the proxy.
    UnauthorizedAccount(ProxyUnauthorizedAccount),
    /// A non-payable management function received value.
    NonPayable(ProxyNonPayable),
}

impl From<Error> for Revert {
    fn from(error: Error) -> Self {
        match error {
            Error::InvalidImplementation(e) => e.into(),
            Error::InvalidAdmin(e) => e.into(),
            Error::UnauthorizedAccount(e) => e.into(),
            Error::NonPayable(e) => e.into(),
        }
    }
}

/// Storage slot with the address of the current implementation.
/// This is the keccak-256 hash of "org.zeppelinos.proxy.implementation".
pub const IMPLEMENTATION_SLOT: B256 = B256::new(
    keccak_const::Keccak256::new()
        .update(b"org.zeppelinos.proxy.implementation")
        .finalize(),
);

/// Storage slot with the admin of the proxy.
/// This is the keccak-256 hash of "org.zeppelinos.proxy.admin".
pub const ADMIN_SLOT: B256 = B256::new(
    keccak_const::Keccak256::new()
        .update(b"org.zeppelinos.proxy.admin")
        .finalize(),
);

/// Getters and event emitting update functions for the proxy slots.
pub struct UpgradeabilityUtils;

impl UpgradeabilityUtils {
    /// Returns the current implementation address.
    #[must_use]
    pub fn get_implementation(frame: &Frame<'_>) -> Address {
        frame.load(IMPLEMENTATION_SLOT)
    }

    /// Upgrades the implementation of the proxy.
    ///
    /// # Arguments
    ///
    /// * `frame` - Write access to the proxy's state.
    /// * `new_implementation` - The new implementation address.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidImplementation`] - If `new_implementation` is the
    ///   zero address or holds no code.
    ///
    /// # Events
    ///
    /// * [`Upgraded`].
    pub fn upgrade_to(
        frame: &mut Frame<'_>,
        new_implementation: Address,
    ) -> Result<(), Error> {
        Self::set_implementation(frame, new_implementation)?;
        debug!(proxy = %frame.address(), implementation = %new_implementation, "upgraded");
        frame.emit(&Upgraded { implementation: new_implementation });
        Ok(())
    }

    /// Upgrades the implementation, then runs `data` against the proxy's
    /// storage through a delegate call into `new_implementation`. The value
    /// attached to the current call stays with the proxy and is visible to
    /// the delegated code.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidImplementation`] - If `new_implementation` is the
    ///   zero address or holds no code.
    /// * The revert data of the delegated call, if it fails. The upgrade is
    ///   undone with the rest of the call in that case.
    ///
    /// # Events
    ///
    /// * [`Upgraded`].
    pub fn upgrade_to_and_call(
        frame: &mut Frame<'_>,
        new_implementation: Address,
        data: &[u8],
    ) -> Result<Vec<u8>, Revert> {
        Self::upgrade_to(frame, new_implementation)?;
        frame.delegate_call(new_implementation, data)
    }

    /// Returns the current admin.
    #[must_use]
    pub fn get_admin(frame: &Frame<'_>) -> Address {
        frame.load(ADMIN_SLOT)
    }

    /// Changes the admin of the proxy.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidAdmin`] - If `new_admin` is the zero address.
    ///
    /// # Events
    ///
    /// * [`AdminChanged`].
    pub fn change_admin(
        frame: &mut Frame<'_>,
        new_admin: Address,
    ) -> Result<(), Error> {
        let previous_admin = Self::get_admin(frame);
        Self::set_admin(frame, new_admin)?;
        debug!(proxy = %frame.address(), admin = %new_admin, "admin changed");
        frame.emit(&AdminChanged {
            previousAdmin: previous_admin,
            newAdmin: new_admin,
        });
        Ok(())
    }

    /// Checks that the caller is the admin.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedAccount`] - If the sender is not the admin.
    pub fn only_admin(frame: &Frame<'_>) -> Result<(), Error> {
        let account = frame.sender();
        if Self::get_admin(frame) != account {
            return Err(ProxyUnauthorizedAccount { account }.into());
        }
        Ok(())
    }

    /// Reverts if the current call carries value.
    ///
    /// # Errors
    ///
    /// * [`Error::NonPayable`] - If the attached value is not zero.
    pub fn check_non_payable(frame: &Frame<'_>) -> Result<(), Error> {
        if frame.value().is_zero() {
            Ok(())
        } else {
            Err(ProxyNonPayable {}.into())
        }
    }

    /// Stores a new address in the implementation slot.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidImplementation`] - If `new_implementation` is the
    ///   zero address or holds no code.
    pub fn set_implementation(
        frame: &mut Frame<'_>,
        new_implementation: Address,
    ) -> Result<(), Error> {
        if new_implementation.is_zero() || !frame.has_code(new_implementation)
        {
            return Err(ProxyInvalidImplementation {
                implementation: new_implementation,
            }
            .into());
        }

        frame.store(IMPLEMENTATION_SLOT, new_implementation);

        Ok(())
    }

    /// Stores a new address in the admin slot.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidAdmin`] - If `new_admin` is the zero address.
    pub fn set_admin(
        frame: &mut Frame<'_>,
        new_admin: Address,
    ) -> Result<(), Error> {
        if new_admin.is_zero() {
            return Err(ProxyInvalidAdmin { admin: new_admin }.into());
        }

        frame.store(ADMIN_SLOT, new_admin);

        Ok(())
    }
}
