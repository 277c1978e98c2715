//! Implementations placed behind proxies to exercise upgrades.
//!
//! They mirror how upgradeable contracts are usually written: state lives at
//! sequential slots from `0`, and initialization happens in regular functions
//! instead of constructors, so that it can run against a proxy's storage.
mod clashing;
mod dummy;
mod migratable;
mod regression;

pub use clashing::{ClashingImplementation, IClashingImplementation};
pub use dummy::{DummyImplementation, IDummyImplementation};
pub use migratable::{
    IMigratable, IMigratableMock, IMigratableMockV1, IMigratableMockV2,
    IMigratableMockV3, Migratable, MigratableAlreadyMigrated,
    MigratableMissingMigration, MigratableMock, MigratableMockV1,
    MigratableMockV2, MigratableMockV3, Migrated,
};
pub use regression::{
    IImplementation1, IImplementation2, IImplementation3, IImplementation4,
    Implementation1, Implementation2, Implementation3, Implementation4,
};
