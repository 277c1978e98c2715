//! Proxies whose implementation lives at a hash-derived storage slot, and
//! the events they emit.
//!
//! [`UpgradeabilityProxy`] always delegates. It carries no management
//! surface, so its implementation can only be changed by the implementation
//! itself (through [`utils::UpgradeabilityUtils`]).
use alloy_primitives::Address;
use zos_vm::{Contract, Frame, Revert};

pub mod utils;

pub use sol::*;
use utils::UpgradeabilityUtils;

use crate::{proxy::IProxy, utils::decode_args};

mod sol {
    #![allow(missing_docs)]

    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when the implementation is upgraded.
        ///
        /// * `implementation` - Address of the new implementation.
        #[derive(Debug, PartialEq, Eq)]
        event Upgraded(address indexed implementation);

        /// Emitted when the admin account has changed.
        ///
        /// * `previousAdmin` - Address of the previous admin.
        /// * `newAdmin` - Address of the new admin.
        #[derive(Debug, PartialEq, Eq)]
        event AdminChanged(address previousAdmin, address newAdmin);
    }
}

/// Proxy delegating every call to the implementation stored at
/// [`utils::IMPLEMENTATION_SLOT`].
///
/// Constructor arguments: `(address implementation)`.
#[derive(Debug, Default)]
pub struct UpgradeabilityProxy;

impl IProxy for UpgradeabilityProxy {
    fn implementation(&self, frame: &Frame<'_>) -> Address {
        UpgradeabilityUtils::get_implementation(frame)
    }
}

impl Contract for UpgradeabilityProxy {
    fn construct(
        &self,
        frame: &mut Frame<'_>,
        args: &[u8],
    ) -> Result<(), Revert> {
        let implementation: Address = decode_args(args)?;
        UpgradeabilityUtils::set_implementation(frame, implementation)?;
        Ok(())
    }

    fn call(
        &self,
        frame: &mut Frame<'_>,
        input: &[u8],
    ) -> Result<Vec<u8>, Revert> {
        self.do_fallback(frame, input)
    }
}
