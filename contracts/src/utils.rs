//! Plumbing shared by the contracts of this crate.
use alloy_sol_types::{SolInterface, SolType, SolValue};
use zos_vm::Revert;

/// Decodes `input` as one of the calls of a `sol!` interface.
///
/// Returns `None` when the selector belongs to another interface, and an
/// empty revert when the selector is known but the arguments are malformed.
pub(crate) fn decode_call<I: SolInterface>(
    input: &[u8],
) -> Result<Option<I>, Revert> {
    let Some(selector) = selector(input) else {
        return Ok(None);
    };
    if !I::valid_selector(selector) {
        return Ok(None);
    }
    I::abi_decode(input).map(Some).map_err(|_| Revert::empty())
}

/// The first four bytes of `input`, if there are that many.
pub(crate) fn selector(input: &[u8]) -> Option<[u8; 4]> {
    input.get(..4).and_then(|bytes| bytes.try_into().ok())
}

/// Decodes ABI-encoded constructor arguments.
pub(crate) fn decode_args<T>(args: &[u8]) -> Result<T, Revert>
where
    T: SolValue + From<<T::SolType as SolType>::RustType>,
{
    T::abi_decode(args).map_err(|_| Revert::with_reason("invalid arguments"))
}

/// ABI-encodes a single return value.
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn returns<T: SolValue>(value: &T) -> Result<Vec<u8>, Revert> {
    Ok(value.abi_encode())
}
