//! Proxies delegating calls to an implementation whose code runs against the
//! proxy's own storage.
use alloy_primitives::Address;
use zos_vm::{Frame, Revert};

pub mod admin;
pub mod upgradeability;

pub use admin::{AdminUpgradeabilityProxy, IAdminUpgradeabilityProxy};
pub use upgradeability::{
    utils::{Error, UpgradeabilityUtils, ADMIN_SLOT, IMPLEMENTATION_SLOT},
    AdminChanged, UpgradeabilityProxy, Upgraded,
};

/// Forwarding half of a proxy: whatever the proxy doesn't handle itself is
/// delegated to the contract returned by [`IProxy::implementation`].
///
/// [`IProxy::do_fallback`] forwards to the current implementation, and
/// [`IProxy::delegate`] to an arbitrary contract. Output and revert data of
/// the delegated code reach the caller of the proxy untouched.
pub trait IProxy {
    /// Delegates `calldata` to `implementation`.
    ///
    /// # Arguments
    ///
    /// * `&self` - The proxy code.
    /// * `frame` - Execution context of the proxy.
    /// * `implementation` - The address of the implementation contract.
    /// * `calldata` - The calldata to delegate to the implementation contract.
    ///
    /// # Errors
    ///
    /// The revert data of the implementation, unchanged.
    fn delegate(
        &self,
        frame: &mut Frame<'_>,
        implementation: Address,
        calldata: &[u8],
    ) -> Result<Vec<u8>, Revert> {
        frame.delegate_call(implementation, calldata)
    }

    /// Returns the address to which the fallback function and
    /// [`IProxy::do_fallback`] should delegate.
    fn implementation(&self, frame: &Frame<'_>) -> Address;

    /// Fallback function that delegates calls to the address returned by
    /// [`IProxy::implementation`].
    ///
    /// # Errors
    ///
    /// The revert data of the implementation, unchanged.
    fn do_fallback(
        &self,
        frame: &mut Frame<'_>,
        calldata: &[u8],
    ) -> Result<Vec<u8>, Revert> {
        let implementation = self.implementation(frame);
        self.delegate(frame, implementation, calldata)
    }
}
