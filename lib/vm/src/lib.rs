//! # zos-vm - In-memory chain for proxy tests
//!
//! This crate provides a small, deterministic execution environment in which
//! contracts are native Rust types implementing [`Contract`]. It keeps the
//! parts of the EVM execution model that upgradeable proxies rely on:
//!
//! - word-addressed storage per account,
//! - `CALL` and `DELEGATECALL` semantics (a delegate call runs the target's
//!   code against the caller's storage, keeping `msg.sender` and
//!   `msg.value`),
//! - native value transfers,
//! - logs attributed to the executing storage context,
//! - all-or-nothing execution: every transaction and every sub-call restores
//!   the state it started from when it reverts.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use alloy_primitives::{Address, U256};
//! use zos_vm::Vm;
//!
//! let mut vm = Vm::new();
//! let alice = Address::repeat_byte(0xA1);
//! vm.fund(alice, U256::from(1_000_000));
//!
//! let receipt = vm.deploy(alice, Arc::new(MyContract), &[], U256::ZERO)?;
//! let address = receipt.contract_address.expect("contract was created");
//! let output = vm.call(alice, address, &calldata)?;
//! ```
mod contract;
mod error;
mod frame;
mod receipt;
mod revert;
mod state;
pub mod storage;
mod vm;

pub use contract::Contract;
pub use error::Error;
pub use frame::Frame;
pub use receipt::Receipt;
pub use revert::Revert;
pub use storage::Word;
pub use vm::{Vm, MAX_CALL_DEPTH};
