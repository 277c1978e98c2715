//! Versioned implementations initialized and migrated through
//! `upgradeToAndCall`.
//!
//! [`Migratable`] keeps a `contract name -> migration id -> bool` mapping at
//! slot `0`, so the state of each version starts at slot `1`.
use alloy_primitives::{B256, U256};
use zos_vm::{
    storage::{mapping_slot, slot},
    Contract, Frame, Revert,
};

pub use sol::*;

use crate::utils::{decode_call, returns};

mod sol {
    #![allow(missing_docs)]

    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when a migration completes.
        ///
        /// * `contractName` - Name of the migrated contract.
        /// * `migrationId` - Identifier of the completed migration.
        #[derive(Debug, PartialEq, Eq)]
        event Migrated(string contractName, string migrationId);

        /// The migration already ran.
        #[derive(Debug, PartialEq, Eq)]
        error MigratableAlreadyMigrated(string contractName, string migrationId);

        /// The migration a new migration builds on did not run.
        #[derive(Debug, PartialEq, Eq)]
        error MigratableMissingMigration(string contractName, string requiredMigrationId);

        interface IMigratable {
            function isMigrated(string contractName, string migrationId) external view returns (bool);
        }

        interface IMigratableMock {
            function initialize(uint256 value) external payable;
            function x() external view returns (uint256);
            function fail() external pure;
        }

        interface IMigratableMockV1 {
            function initialize(uint256 value) external payable;
            function x() external view returns (uint256);
        }

        interface IMigratableMockV2 {
            function migrate(uint256 newX, uint256 newY) external payable;
            function y() external view returns (uint256);
        }

        interface IMigratableMockV3 {
            function migrate() external payable;
        }
    }
}

const CONTRACT_NAME: &str = "MigratableMock";
const X: u64 = 1;
const Y: u64 = 2;

/// Tracks which migrations ran against the current storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Migratable {
    migrated: B256,
}

impl Migratable {
    /// Binds the migration mapping to `slot`.
    #[must_use]
    pub const fn new(slot: B256) -> Self {
        Self { migrated: slot }
    }

    /// Whether `migration_id` of `contract_name` ran.
    #[must_use]
    pub fn is_migrated(
        &self,
        frame: &Frame<'_>,
        contract_name: &str,
        migration_id: &str,
    ) -> bool {
        frame.load(self.slot(contract_name, migration_id))
    }

    /// Runs `body` as the initializer `migration_id` of `contract_name`. It
    /// can only run once.
    ///
    /// # Errors
    ///
    /// * [`MigratableAlreadyMigrated`] - If the initializer already ran.
    /// * Any error of `body`.
    ///
    /// # Events
    ///
    /// * [`Migrated`].
    pub fn is_initializer<T>(
        &self,
        frame: &mut Frame<'_>,
        contract_name: &str,
        migration_id: &str,
        body: impl FnOnce(&mut Frame<'_>) -> Result<T, Revert>,
    ) -> Result<T, Revert> {
        self.ensure_pending(frame, contract_name, migration_id)?;
        let output = body(frame)?;
        self.complete(frame, contract_name, migration_id);
        Ok(output)
    }

    /// Runs `body` as the migration `new_migration_id` of `contract_name`,
    /// which requires `required_migration_id` to have run before.
    ///
    /// # Errors
    ///
    /// * [`MigratableMissingMigration`] - If `required_migration_id` did not
    ///   run.
    /// * [`MigratableAlreadyMigrated`] - If `new_migration_id` already ran.
    /// * Any error of `body`.
    ///
    /// # Events
    ///
    /// * [`Migrated`].
    pub fn is_migration<T>(
        &self,
        frame: &mut Frame<'_>,
        contract_name: &str,
        required_migration_id: &str,
        new_migration_id: &str,
        body: impl FnOnce(&mut Frame<'_>) -> Result<T, Revert>,
    ) -> Result<T, Revert> {
        if !self.is_migrated(frame, contract_name, required_migration_id) {
            return Err(MigratableMissingMigration {
                contractName: contract_name.to_string(),
                requiredMigrationId: required_migration_id.to_string(),
            }
            .into());
        }
        self.is_initializer(frame, contract_name, new_migration_id, body)
    }

    /// Dispatches the [`IMigratable`] calls. Returns `None` for any other
    /// selector.
    pub fn route(
        &self,
        frame: &Frame<'_>,
        input: &[u8],
    ) -> Option<Result<Vec<u8>, Revert>> {
        use IMigratable::IMigratableCalls as Calls;

        match decode_call::<Calls>(input) {
            Ok(Some(Calls::isMigrated(call))) => Some(returns(
                &self.is_migrated(frame, &call.contractName, &call.migrationId),
            )),
            Ok(None) => None,
            Err(revert) => Some(Err(revert)),
        }
    }

    fn ensure_pending(
        &self,
        frame: &Frame<'_>,
        contract_name: &str,
        migration_id: &str,
    ) -> Result<(), Revert> {
        if self.is_migrated(frame, contract_name, migration_id) {
            return Err(MigratableAlreadyMigrated {
                contractName: contract_name.to_string(),
                migrationId: migration_id.to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn complete(
        &self,
        frame: &mut Frame<'_>,
        contract_name: &str,
        migration_id: &str,
    ) {
        frame.emit(&Migrated {
            contractName: contract_name.to_string(),
            migrationId: migration_id.to_string(),
        });
        frame.store(self.slot(contract_name, migration_id), true);
    }

    fn slot(&self, contract_name: &str, migration_id: &str) -> B256 {
        let inner = mapping_slot(contract_name.as_bytes(), self.migrated);
        mapping_slot(migration_id.as_bytes(), inner)
    }
}

const MIGRATABLE: Migratable = Migratable::new(slot(0));

fn x(frame: &Frame<'_>) -> U256 {
    frame.load(slot(X))
}

fn y(frame: &Frame<'_>) -> U256 {
    frame.load(slot(Y))
}

fn initialize(
    frame: &mut Frame<'_>,
    migration_id: &str,
    value: U256,
) -> Result<Vec<u8>, Revert> {
    MIGRATABLE.is_initializer(frame, CONTRACT_NAME, migration_id, |frame| {
        frame.store(slot(X), value);
        Ok(Vec::new())
    })
}

fn unknown(
    frame: &Frame<'_>,
    input: &[u8],
) -> Result<Vec<u8>, Revert> {
    MIGRATABLE.route(frame, input).unwrap_or_else(|| Err(Revert::empty()))
}

/// Initializable implementation with a function that always fails.
#[derive(Debug, Default)]
pub struct MigratableMock;

impl Contract for MigratableMock {
    fn call(
        &self,
        frame: &mut Frame<'_>,
        input: &[u8],
    ) -> Result<Vec<u8>, Revert> {
        use IMigratableMock::IMigratableMockCalls as Calls;

        match decode_call::<Calls>(input)? {
            Some(Calls::initialize(call)) => {
                initialize(frame, "0", call.value)
            }
            Some(Calls::x(_)) => returns(&x(frame)),
            Some(Calls::fail(_)) => Err(Revert::empty()),
            None => unknown(frame, input),
        }
    }
}

/// First version: initializes `x`.
#[derive(Debug, Default)]
pub struct MigratableMockV1;

impl Contract for MigratableMockV1 {
    fn call(
        &self,
        frame: &mut Frame<'_>,
        input: &[u8],
    ) -> Result<Vec<u8>, Revert> {
        use IMigratableMockV1::IMigratableMockV1Calls as Calls;

        match decode_call::<Calls>(input)? {
            Some(Calls::initialize(call)) => {
                initialize(frame, "V1", call.value)
            }
            Some(Calls::x(_)) => returns(&x(frame)),
            None => unknown(frame, input),
        }
    }
}

/// Second version: adds `y` and migrates from V1 by setting both values.
#[derive(Debug, Default)]
pub struct MigratableMockV2;

impl Contract for MigratableMockV2 {
    fn call(
        &self,
        frame: &mut Frame<'_>,
        input: &[u8],
    ) -> Result<Vec<u8>, Revert> {
        use IMigratableMockV2::IMigratableMockV2Calls as Calls;

        match decode_call::<Calls>(input)? {
            Some(Calls::migrate(call)) => MIGRATABLE.is_migration(
                frame,
                CONTRACT_NAME,
                "V1",
                "V2",
                |frame| {
                    frame.store(slot(X), call.newX);
                    frame.store(slot(Y), call.newY);
                    Ok(Vec::new())
                },
            ),
            Some(Calls::y(_)) => returns(&y(frame)),
            None => MigratableMockV1.call(frame, input),
        }
    }
}

/// Third version: migrates from V2 by swapping `x` and `y`.
#[derive(Debug, Default)]
pub struct MigratableMockV3;

impl Contract for MigratableMockV3 {
    fn call(
        &self,
        frame: &mut Frame<'_>,
        input: &[u8],
    ) -> Result<Vec<u8>, Revert> {
        use IMigratableMockV3::IMigratableMockV3Calls as Calls;

        match decode_call::<Calls>(input)? {
            Some(Calls::migrate(_)) => MIGRATABLE.is_migration(
                frame,
                CONTRACT_NAME,
                "V2",
                "V3",
                |frame| {
                    let (old_x, old_y) = (x(frame), y(frame));
                    frame.store(slot(X), old_y);
                    frame.store(slot(Y), old_x);
                    Ok(Vec::new())
                },
            ),
            None => MigratableMockV2.call(frame, input),
        }
    }
}
