//! Implementations sharing a single `uint256 value` at slot `0`, each with a
//! different public surface.
use alloy_primitives::U256;
use zos_vm::{storage::slot, Contract, Frame, Revert};

pub use sol::*;

use crate::utils::{decode_call, returns};

mod sol {
    #![allow(missing_docs)]

    use alloy_sol_macro::sol;

    sol! {
        interface IImplementation1 {
            function setValue(uint256 number) external;
        }

        interface IImplementation2 {
            function setValue(uint256 number) external;
            function getValue() external view returns (uint256);
        }

        interface IImplementation3 {
            function setValue(uint256 number) external;
            function getValue(uint256 number) external view returns (uint256);
        }

        interface IImplementation4 {
            function setValue(uint256 number) external;
            function getValue() external view returns (uint256);
        }
    }
}

const VALUE: u64 = 0;

fn value(frame: &Frame<'_>) -> U256 {
    frame.load(slot(VALUE))
}

fn set_value(frame: &mut Frame<'_>, number: U256) -> Vec<u8> {
    frame.store(slot(VALUE), number);
    Vec::new()
}

/// Only sets the value.
#[derive(Debug, Default)]
pub struct Implementation1;

impl Contract for Implementation1 {
    fn call(
        &self,
        frame: &mut Frame<'_>,
        input: &[u8],
    ) -> Result<Vec<u8>, Revert> {
        use IImplementation1::IImplementation1Calls as Calls;

        match decode_call::<Calls>(input)? {
            Some(Calls::setValue(call)) => Ok(set_value(frame, call.number)),
            None => Err(Revert::empty()),
        }
    }
}

/// Sets the value and reads it back with `getValue()`.
#[derive(Debug, Default)]
pub struct Implementation2;

impl Contract for Implementation2 {
    fn call(
        &self,
        frame: &mut Frame<'_>,
        input: &[u8],
    ) -> Result<Vec<u8>, Revert> {
        use IImplementation2::IImplementation2Calls as Calls;

        match decode_call::<Calls>(input)? {
            Some(Calls::setValue(call)) => Ok(set_value(frame, call.number)),
            Some(Calls::getValue(_)) => returns(&value(frame)),
            None => Err(Revert::empty()),
        }
    }
}

/// `getValue(n)` answers the value plus `n`, wrapping on overflow.
#[derive(Debug, Default)]
pub struct Implementation3;

impl Contract for Implementation3 {
    fn call(
        &self,
        frame: &mut Frame<'_>,
        input: &[u8],
    ) -> Result<Vec<u8>, Revert> {
        use IImplementation3::IImplementation3Calls as Calls;

        match decode_call::<Calls>(input)? {
            Some(Calls::setValue(call)) => Ok(set_value(frame, call.number)),
            Some(Calls::getValue(call)) => {
                returns(&value(frame).wrapping_add(call.number))
            }
            None => Err(Revert::empty()),
        }
    }
}

/// Like [`Implementation2`], with a fallback setting the value to `1`.
#[derive(Debug, Default)]
pub struct Implementation4;

impl Contract for Implementation4 {
    fn call(
        &self,
        frame: &mut Frame<'_>,
        input: &[u8],
    ) -> Result<Vec<u8>, Revert> {
        use IImplementation4::IImplementation4Calls as Calls;

        match decode_call::<Calls>(input)? {
            Some(Calls::setValue(call)) => Ok(set_value(frame, call.number)),
            Some(Calls::getValue(_)) => returns(&value(frame)),
            None => Ok(set_value(frame, U256::from(1))),
        }
    }
}
