use zos_vm::{Contract, Frame, Revert};

pub use sol::*;

use crate::utils::{decode_call, returns};

mod sol {
    #![allow(missing_docs)]

    use alloy_sol_macro::sol;

    sol! {
        interface IDummyImplementation {
            function get() external pure returns (bool);
        }
    }
}

/// Implementation answering `get()` with `true`.
#[derive(Debug, Default)]
pub struct DummyImplementation;

impl Contract for DummyImplementation {
    fn call(
        &self,
        _frame: &mut Frame<'_>,
        input: &[u8],
    ) -> Result<Vec<u8>, Revert> {
        use IDummyImplementation::IDummyImplementationCalls as Calls;

        match decode_call::<Calls>(input)? {
            Some(Calls::get(_)) => returns(&true),
            None => Err(Revert::empty()),
        }
    }
}
