use std::path::PathBuf;

use alloy::transports::{RpcError, TransportError};
use alloy_primitives::{Bytes, B256};

/// Reasons a deployment or a call through a network fails.
///
/// [`Error::Rejected`] and [`Error::Resolution`] are the domain failures.
/// The other variants report problems with the plumbing around them.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum Error {
    /// The network rejected the transaction or the transaction reverted.
    #[display("transaction rejected: {_0}")]
    #[from]
    Rejected(Rejection),
    /// No contract is registered under `name`. Nothing was sent.
    #[display("contract `{name}` is not registered")]
    Resolution {
        /// The name that failed to resolve.
        name: String,
    },
    /// The node could not be reached or answered with garbage.
    #[display("transport error: {_0}")]
    #[from]
    Transport(TransportError),
    /// A call succeeded but returned data of an unexpected type.
    #[display("failed to decode return data: {_0}")]
    #[from]
    Decode(alloy_sol_types::Error),
    /// A contract artifact could not be loaded.
    #[display("invalid artifact {}: {reason}", path.display())]
    Artifact {
        /// Location of the artifact.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },
    /// The configuration is missing a value or holds an invalid one.
    #[display("invalid configuration: {_0}")]
    Config(#[error(not(source))] String),
}

/// Why a transaction was rejected.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum Rejection {
    /// The in-memory chain refused or reverted the transaction.
    #[display("{_0}")]
    Local(zos_vm::Error),
    /// The transaction was mined and reverted.
    #[display("transaction {transaction_hash} reverted")]
    Reverted {
        /// Hash of the reverted transaction.
        transaction_hash: B256,
    },
    /// A call reverted on the node.
    #[display("execution reverted: {_0}")]
    CallReverted(#[error(not(source))] Bytes),
    /// The node refused the transaction (insufficient funds, bad nonce...).
    #[display("{_0}")]
    Node(#[error(not(source))] String),
    /// A deployment succeeded without creating a contract.
    #[display("transaction {transaction_hash} created no contract")]
    NoContract {
        /// Hash of the deployment transaction.
        transaction_hash: B256,
    },
}

impl From<zos_vm::Error> for Error {
    fn from(error: zos_vm::Error) -> Self {
        Error::Rejected(Rejection::Local(error))
    }
}

impl Error {
    /// Sorts an RPC failure into a node rejection or a transport error.
    ///
    /// Error responses of the node are rejections of the request, revert
    /// data included. Everything else is a transport problem.
    pub(crate) fn from_rpc(error: TransportError) -> Self {
        match error {
            RpcError::ErrorResp(payload) => {
                match payload.as_revert_data() {
                    Some(data) => Rejection::CallReverted(data).into(),
                    None => Rejection::Node(payload.message.to_string()).into(),
                }
            }
            error => Error::Transport(error),
        }
    }

    /// Revert data of the rejected transaction, when the chain reported it.
    #[must_use]
    pub fn revert_data(&self) -> Option<&Bytes> {
        match self {
            Error::Rejected(Rejection::Local(error)) => {
                error.revert().map(zos_vm::Revert::data)
            }
            Error::Rejected(Rejection::CallReverted(data)) => Some(data),
            _ => None,
        }
    }
}
