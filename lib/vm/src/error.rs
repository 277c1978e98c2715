use alloy_primitives::{Address, Bytes, U256};

use crate::revert::Revert;

/// Reasons a transaction submitted to the [`crate::Vm`] is rejected.
///
/// Either the transaction never executes ([`Error::InsufficientFunds`]) or it
/// executes and rolls back completely ([`Error::Reverted`]).
#[derive(Clone, Debug, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum Error {
    /// Execution reverted, all state changes were discarded.
    #[display("{_0}")]
    Reverted(#[error(not(source))] Revert),
    /// The sender cannot cover the value attached to the transaction.
    #[display(
        "insufficient funds: account {account} has {balance}, needs {needed}"
    )]
    InsufficientFunds {
        /// Sender of the transaction.
        account: Address,
        /// Balance of the sender.
        balance: U256,
        /// Value attached to the transaction.
        needed: U256,
    },
    /// The call succeeded but its output is not of the expected type.
    #[display("invalid return data: {_0}")]
    InvalidReturnData(#[error(not(source))] Bytes),
}

impl Error {
    /// Revert data, if the transaction executed and reverted.
    #[must_use]
    pub fn revert(&self) -> Option<&Revert> {
        match self {
            Error::Reverted(revert) => Some(revert),
            Error::InsufficientFunds { .. } | Error::InvalidReturnData(_) => {
                None
            }
        }
    }
}

impl From<Revert> for Error {
    fn from(revert: Revert) -> Self {
        Error::Reverted(revert)
    }
}
