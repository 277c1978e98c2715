use alloy_primitives::{address, Address};
use zos_vm::{Contract, Frame, Revert};

pub use sol::*;

use crate::utils::{decode_call, returns};

mod sol {
    #![allow(missing_docs)]

    use alloy_sol_macro::sol;

    sol! {
        interface IClashingImplementation {
            function admin() external pure returns (address);
            function delegatedFunction() external pure returns (bool);
        }
    }
}

/// Implementation whose `admin()` clashes with the management function of
/// [`crate::proxy::AdminUpgradeabilityProxy`].
#[derive(Debug, Default)]
pub struct ClashingImplementation;

impl ClashingImplementation {
    /// What `admin()` answers.
    pub const ADMIN: Address =
        address!("0000000000000000000000000000000011111142");
}

impl Contract for ClashingImplementation {
    fn call(
        &self,
        _frame: &mut Frame<'_>,
        input: &[u8],
    ) -> Result<Vec<u8>, Revert> {
        use IClashingImplementation::IClashingImplementationCalls as Calls;

        match decode_call::<Calls>(input)? {
            Some(Calls::admin(_)) => returns(&Self::ADMIN),
            Some(Calls::delegatedFunction(_)) => returns(&true),
            None => Err(Revert::empty()),
        }
    }
}
