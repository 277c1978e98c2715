use std::fmt::Debug;

use crate::{frame::Frame, revert::Revert};

/// Code that can be installed at an address of the [`crate::Vm`].
///
/// A [`Contract`] is stateless, the same way deployed bytecode is: every
/// piece of state is read from and written to the storage of the frame it
/// runs in. This is what lets a proxy run an implementation's code against
/// its own storage.
pub trait Contract: Debug + Send + Sync {
    /// Runs once, when the contract is deployed.
    ///
    /// # Arguments
    ///
    /// * `frame` - Execution context of the deployment.
    /// * `args` - ABI-encoded constructor arguments.
    ///
    /// # Errors
    ///
    /// Any [`Revert`] aborts the deployment.
    fn construct(
        &self,
        frame: &mut Frame<'_>,
        args: &[u8],
    ) -> Result<(), Revert> {
        let _ = (frame, args);
        Ok(())
    }

    /// Entry point for every message call, including calls with empty or
    /// unknown calldata.
    ///
    /// # Arguments
    ///
    /// * `frame` - Execution context of the call.
    /// * `input` - Raw calldata.
    ///
    /// # Errors
    ///
    /// Returns the revert data of the call.
    fn call(&self, frame: &mut Frame<'_>, input: &[u8])
        -> Result<Vec<u8>, Revert>;
}
