//! Transparent upgradeability proxy managed by an admin account.
//!
//! Calls are split on the sender before anything else is looked at:
//!
//! - the admin only reaches the management functions of
//!   [`IAdminUpgradeabilityProxy`]. Any other call from the admin, including
//!   one with empty calldata, reverts with [`ProxyAdminCannotFallback`].
//! - every other account is delegated to the implementation, whatever the
//!   selector is. A function of the implementation whose selector clashes
//!   with a management function is therefore still reachable.
use alloy_primitives::{Address, Bytes};
use zos_vm::{Contract, Frame, Revert};

pub use sol::*;

use super::{
    upgradeability::utils::{
        ProxyAdminCannotFallback, UpgradeabilityUtils as Utils,
    },
    IProxy,
};
use crate::utils::{decode_args, decode_call, returns};

mod sol {
    #![allow(missing_docs)]

    use alloy_sol_macro::sol;

    sol! {
        /// Management surface of an [`super::AdminUpgradeabilityProxy`].
        interface IAdminUpgradeabilityProxy {
            function implementation() external view returns (address);
            function admin() external view returns (address);
            function upgradeTo(address newImplementation) external;
            function upgradeToAndCall(address newImplementation, bytes data) external payable;
            function changeAdmin(address newAdmin) external;
        }
    }
}

use IAdminUpgradeabilityProxy::IAdminUpgradeabilityProxyCalls as Calls;

/// Where a call to the proxy ends up.
enum Route {
    /// One of the management functions, run by the proxy itself.
    Admin(Calls),
    /// The implementation, through a delegate call.
    Delegate,
}

/// Upgradeable proxy with an authorization mechanism for administrative
/// tasks.
///
/// Constructor arguments: `(address implementation)`. The deployer becomes
/// the admin.
#[derive(Debug, Default)]
pub struct AdminUpgradeabilityProxy;

impl AdminUpgradeabilityProxy {
    /// Returns the current admin.
    ///
    /// # Errors
    ///
    /// * [`super::Error::UnauthorizedAccount`] - If the sender is not the
    ///   admin.
    pub fn admin(&self, frame: &Frame<'_>) -> Result<Address, super::Error> {
        Utils::only_admin(frame)?;
        Ok(Utils::get_admin(frame))
    }

    /// Returns the current implementation.
    ///
    /// # Errors
    ///
    /// * [`super::Error::UnauthorizedAccount`] - If the sender is not the
    ///   admin.
    pub fn implementation(
        &self,
        frame: &Frame<'_>,
    ) -> Result<Address, super::Error> {
        Utils::only_admin(frame)?;
        Ok(Utils::get_implementation(frame))
    }

    /// Upgrades the implementation of the proxy. Only the admin can call this
    /// function.
    ///
    /// # Errors
    ///
    /// * [`super::Error::UnauthorizedAccount`] - If the sender is not the
    ///   admin.
    /// * [`super::Error::InvalidImplementation`] - If `new_implementation` is
    ///   the zero address or holds no code.
    ///
    /// # Events
    ///
    /// * [`super::Upgraded`].
    pub fn upgrade_to(
        &self,
        frame: &mut Frame<'_>,
        new_implementation: Address,
    ) -> Result<(), super::Error> {
        Utils::only_admin(frame)?;
        Utils::upgrade_to(frame, new_implementation)
    }

    /// Upgrades the implementation of the proxy and calls a function of the
    /// new implementation with `data`. The call runs against the proxy's
    /// storage with the value sent along, which is useful to initialize the
    /// proxied contract.
    ///
    /// # Errors
    ///
    /// * [`super::Error::UnauthorizedAccount`] - If the sender is not the
    ///   admin.
    /// * [`super::Error::InvalidImplementation`] - If `new_implementation` is
    ///   the zero address or holds no code.
    /// * The revert data of the call to the new implementation. Nothing is
    ///   upgraded in that case.
    ///
    /// # Events
    ///
    /// * [`super::Upgraded`].
    pub fn upgrade_to_and_call(
        &self,
        frame: &mut Frame<'_>,
        new_implementation: Address,
        data: &Bytes,
    ) -> Result<Vec<u8>, Revert> {
        Utils::only_admin(frame)?;
        Utils::upgrade_to_and_call(frame, new_implementation, data)
    }

    /// Changes the admin of the proxy. Only the current admin can call this
    /// function.
    ///
    /// # Errors
    ///
    /// * [`super::Error::UnauthorizedAccount`] - If the sender is not the
    ///   admin.
    /// * [`super::Error::InvalidAdmin`] - If `new_admin` is the zero address.
    ///
    /// # Events
    ///
    /// * [`super::AdminChanged`].
    pub fn change_admin(
        &self,
        frame: &mut Frame<'_>,
        new_admin: Address,
    ) -> Result<(), super::Error> {
        Utils::only_admin(frame)?;
        Utils::change_admin(frame, new_admin)
    }

    fn route(frame: &Frame<'_>, input: &[u8]) -> Result<Route, Revert> {
        if frame.sender() != Utils::get_admin(frame) {
            return Ok(Route::Delegate);
        }

        match decode_call::<Calls>(input)? {
            Some(call) => Ok(Route::Admin(call)),
            None => Err(ProxyAdminCannotFallback {}.into()),
        }
    }

    fn dispatch(
        &self,
        frame: &mut Frame<'_>,
        call: Calls,
    ) -> Result<Vec<u8>, Revert> {
        if !matches!(call, Calls::upgradeToAndCall(_)) {
            Utils::check_non_payable(frame)?;
        }

        match call {
            Calls::implementation(_) => returns(&self.implementation(frame)?),
            Calls::admin(_) => returns(&self.admin(frame)?),
            Calls::upgradeTo(call) => {
                self.upgrade_to(frame, call.newImplementation)?;
                Ok(Vec::new())
            }
            Calls::upgradeToAndCall(call) => self.upgrade_to_and_call(
                frame,
                call.newImplementation,
                &call.data,
            ),
            Calls::changeAdmin(call) => {
                self.change_admin(frame, call.newAdmin)?;
                Ok(Vec::new())
            }
        }
    }
}

impl IProxy for AdminUpgradeabilityProxy {
    fn implementation(&self, frame: &Frame<'_>) -> Address {
        Utils::get_implementation(frame)
    }
}

impl Contract for AdminUpgradeabilityProxy {
    fn construct(
        &self,
        frame: &mut Frame<'_>,
        args: &[u8],
    ) -> Result<(), Revert> {
        let implementation: Address = decode_args(args)?;
        Utils::set_implementation(frame, implementation)?;
        let admin = frame.sender();
        Utils::set_admin(frame, admin)?;
        Ok(())
    }

    fn call(
        &self,
        frame: &mut Frame<'_>,
        input: &[u8],
    ) -> Result<Vec<u8>, Revert> {
        match Self::route(frame, input)? {
            Route::Admin(call) => self.dispatch(frame, call),
            Route::Delegate => self.do_fallback(frame, input),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use alloy_primitives::U256;
    use alloy_sol_types::{SolCall, SolValue};
    use zos_vm::Vm;

    use super::*;
    use crate::{
        mocks::DummyImplementation,
        proxy::upgradeability::utils::ProxyNonPayable,
    };

    const ADMIN: Address = Address::repeat_byte(0xAD);
    const BOB: Address = Address::repeat_byte(0xB0);

    fn setup() -> (Vm, Address) {
        let mut vm = Vm::new();
        let implementation = vm
            .deploy(ADMIN, Arc::new(DummyImplementation), &[], U256::ZERO)
            .expect("should deploy implementation")
            .contract_address
            .expect("should create a contract");
        let proxy = vm
            .deploy(
                ADMIN,
                Arc::new(AdminUpgradeabilityProxy),
                &implementation.abi_encode(),
                U256::ZERO,
            )
            .expect("should deploy proxy")
            .contract_address
            .expect("should create a contract");
        (vm, proxy)
    }

    #[test]
    fn routes_admin_to_management_functions() {
        let (mut vm, proxy) = setup();
        let admin: Address = vm
            .read(ADMIN, proxy, &IAdminUpgradeabilityProxy::adminCall {})
            .expect("admin should reach the proxy");

        assert_eq!(admin, ADMIN);
    }

    #[test]
    fn routes_other_accounts_to_the_implementation() {
        let (mut vm, proxy) = setup();
        // The dummy implementation has no `admin()`, so the delegated call
        // reverts without data.
        let input = IAdminUpgradeabilityProxy::adminCall {}.abi_encode();
        let err = vm
            .call(BOB, proxy, &input)
            .expect_err("should delegate to the implementation");

        assert_eq!(err.revert(), Some(&Revert::empty()));
    }

    #[test]
    fn admin_cannot_fallback() {
        let (mut vm, proxy) = setup();
        let err = vm
            .transact(ADMIN, proxy, &[], U256::ZERO)
            .expect_err("admin should not reach the implementation");

        assert!(err
            .revert()
            .is_some_and(|revert| revert.is(&ProxyAdminCannotFallback {})));
    }

    #[test]
    fn management_functions_reject_value() {
        let (mut vm, proxy) = setup();
        vm.fund(ADMIN, U256::from(10));

        let err = vm
            .send(
                ADMIN,
                proxy,
                &IAdminUpgradeabilityProxy::changeAdminCall { newAdmin: BOB },
                U256::from(1),
            )
            .expect_err("should reject value");

        assert!(err.revert().is_some_and(|revert| revert
            .is(&ProxyNonPayable {})));
        assert_eq!(vm.balance(ADMIN), U256::from(10));
    }

    #[test]
    fn management_selectors_are_fixed() {
        assert_eq!(
            IAdminUpgradeabilityProxy::upgradeToCall::SELECTOR,
            [0x36, 0x59, 0xcf, 0xe6]
        );
        assert_eq!(
            IAdminUpgradeabilityProxy::upgradeToAndCallCall::SELECTOR,
            [0x4f, 0x1e, 0xf2, 0x86]
        );
        assert_eq!(
            IAdminUpgradeabilityProxy::changeAdminCall::SELECTOR,
            [0x8f, 0x28, 0x39, 0x70]
        );
        assert_eq!(
            IAdminUpgradeabilityProxy::implementationCall::SELECTOR,
            [0x5c, 0x60, 0xda, 0x1b]
        );
        assert_eq!(
            IAdminUpgradeabilityProxy::adminCall::SELECTOR,
            [0xf8, 0x51, 0xa4, 0x40]
        );
    }
}
