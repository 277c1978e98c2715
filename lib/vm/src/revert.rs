use alloy_primitives::Bytes;
use alloy_sol_types::{SolError, SolInterface};

/// Revert data returned by a failed call.
#[derive(Clone, Debug, Default, PartialEq, Eq, derive_more::Display)]
#[display("execution reverted: {data}")]
pub struct Revert {
    data: Bytes,
}

impl Revert {
    /// Creates a revert carrying raw `data`.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    /// Revert without data, like a bare `revert()` or an unknown selector.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Revert with an `Error(string)` reason.
    #[must_use]
    pub fn with_reason(reason: &str) -> Self {
        Self::from(alloy_sol_types::Revert { reason: reason.to_string() })
    }

    /// Raw revert data.
    #[must_use]
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Whether the revert carries no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Decodes an `Error(string)` reason, if that is what the data holds.
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        alloy_sol_types::Revert::abi_decode(&self.data)
            .ok()
            .map(|revert| revert.reason)
    }

    /// Checks that the revert data is the ABI encoding of `expected`.
    pub fn is<E: SolError>(&self, expected: &E) -> bool {
        self.data.as_ref() == expected.abi_encode().as_slice()
    }

    /// Decodes the data as one of the errors of a `sol!` interface.
    pub fn decode<I: SolInterface>(&self) -> Option<I> {
        I::abi_decode(&self.data).ok()
    }
}

impl<E: SolError> From<E> for Revert {
    fn from(error: E) -> Self {
        Self::new(error.abi_encode())
    }
}
