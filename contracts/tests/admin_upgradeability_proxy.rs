use std::sync::Arc;

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{SolCall, SolValue};
use eyre::{ContextCompat, Result};
use zos_contracts::{
    mocks::{
        ClashingImplementation, DummyImplementation, IClashingImplementation,
        IDummyImplementation, IImplementation1, IImplementation2,
        IImplementation3, IImplementation4, IMigratableMock,
        IMigratableMockV1, IMigratableMockV2, IMigratableMockV3,
        Implementation1, Implementation2, Implementation3, Implementation4,
        MigratableMock, MigratableMockV1, MigratableMockV2, MigratableMockV3,
    },
    proxy::{
        upgradeability::utils::{
            ProxyAdminCannotFallback, ProxyInvalidAdmin,
            ProxyInvalidImplementation,
        },
        AdminChanged, AdminUpgradeabilityProxy, IAdminUpgradeabilityProxy,
        Upgraded, ADMIN_SLOT, IMPLEMENTATION_SLOT,
    },
};
use zos_vm::{storage::slot, Contract, Error, Receipt, Revert, Vm, Word};

const ADMIN: Address = Address::repeat_byte(0xAD);
const ANOTHER_ACCOUNT: Address = Address::repeat_byte(0xB0);
const VALUE: u64 = 100_000;

fn deploy(vm: &mut Vm, code: Arc<dyn Contract>) -> Result<Address> {
    vm.deploy(ADMIN, code, &[], U256::ZERO)?
        .contract_address
        .context("should create a contract")
}

fn deploy_proxy(vm: &mut Vm, implementation: Address) -> Result<Address> {
    vm.deploy(
        ADMIN,
        Arc::new(AdminUpgradeabilityProxy),
        &implementation.abi_encode(),
        U256::ZERO,
    )?
    .contract_address
    .context("should create a contract")
}

fn implementation(vm: &mut Vm, proxy: Address) -> Result<Address> {
    Ok(vm.read(
        ADMIN,
        proxy,
        &IAdminUpgradeabilityProxy::implementationCall {},
    )?)
}

fn upgrade_to(
    vm: &mut Vm,
    proxy: Address,
    from: Address,
    new_implementation: Address,
) -> Result<Receipt, Error> {
    vm.send(
        from,
        proxy,
        &IAdminUpgradeabilityProxy::upgradeToCall {
            newImplementation: new_implementation,
        },
        U256::ZERO,
    )
}

fn upgrade_to_and_call<C: SolCall>(
    vm: &mut Vm,
    proxy: Address,
    from: Address,
    new_implementation: Address,
    call: &C,
    value: U256,
) -> Result<Receipt, Error> {
    vm.send(
        from,
        proxy,
        &IAdminUpgradeabilityProxy::upgradeToAndCallCall {
            newImplementation: new_implementation,
            data: Bytes::from(call.abi_encode()),
        },
        value,
    )
}

fn reverted_with<E>(err: &Error, expected: &E) -> bool
where
    E: alloy_sol_types::SolError,
{
    err.revert().is_some_and(|revert| revert.is(expected))
}

/// Proxy in front of a dummy implementation, plus a second dummy to upgrade
/// to.
struct Fixture {
    vm: Vm,
    proxy: Address,
    implementation_v0: Address,
    implementation_v1: Address,
}

impl Fixture {
    fn new() -> Result<Self> {
        let mut vm = Vm::new();
        vm.fund(ADMIN, U256::from(10 * VALUE));
        vm.fund(ANOTHER_ACCOUNT, U256::from(10 * VALUE));
        let implementation_v0 = deploy(&mut vm, Arc::new(DummyImplementation))?;
        let implementation_v1 = deploy(&mut vm, Arc::new(DummyImplementation))?;
        let proxy = deploy_proxy(&mut vm, implementation_v0)?;
        Ok(Self { vm, proxy, implementation_v0, implementation_v1 })
    }
}

// implementation

#[test]
fn returns_the_current_implementation_address() -> Result<()> {
    let mut f = Fixture::new()?;

    assert_eq!(implementation(&mut f.vm, f.proxy)?, f.implementation_v0);
    Ok(())
}

#[test]
fn delegates_to_the_implementation() -> Result<()> {
    let mut f = Fixture::new()?;

    let value: bool = f.vm.read(
        ANOTHER_ACCOUNT,
        f.proxy,
        &IDummyImplementation::getCall {},
    )?;
    assert!(value);
    Ok(())
}

// upgradeTo

#[test]
fn admin_upgrades_to_the_requested_implementation() -> Result<()> {
    let mut f = Fixture::new()?;

    upgrade_to(&mut f.vm, f.proxy, ADMIN, f.implementation_v1)?;

    assert_eq!(implementation(&mut f.vm, f.proxy)?, f.implementation_v1);
    Ok(())
}

#[test]
fn upgrade_emits_one_event() -> Result<()> {
    let mut f = Fixture::new()?;

    let receipt = upgrade_to(&mut f.vm, f.proxy, ADMIN, f.implementation_v1)?;

    assert_eq!(receipt.logs.len(), 1);
    assert_eq!(
        receipt.decode_logs::<Upgraded>(),
        vec![Upgraded { implementation: f.implementation_v1 }]
    );
    Ok(())
}

#[test]
fn upgrade_to_the_zero_address_reverts() -> Result<()> {
    let mut f = Fixture::new()?;

    let err = upgrade_to(&mut f.vm, f.proxy, ADMIN, Address::ZERO)
        .expect_err("should reject the zero address");

    assert!(reverted_with(
        &err,
        &ProxyInvalidImplementation { implementation: Address::ZERO }
    ));
    assert_eq!(implementation(&mut f.vm, f.proxy)?, f.implementation_v0);
    Ok(())
}

#[test]
fn upgrade_to_an_account_without_code_reverts() -> Result<()> {
    let mut f = Fixture::new()?;

    let err = upgrade_to(&mut f.vm, f.proxy, ADMIN, ANOTHER_ACCOUNT)
        .expect_err("should reject an account without code");

    assert!(reverted_with(
        &err,
        &ProxyInvalidImplementation { implementation: ANOTHER_ACCOUNT }
    ));
    Ok(())
}

#[test]
fn non_admin_cannot_upgrade() -> Result<()> {
    let mut f = Fixture::new()?;

    upgrade_to(&mut f.vm, f.proxy, ANOTHER_ACCOUNT, f.implementation_v1)
        .expect_err("should revert");

    assert_eq!(implementation(&mut f.vm, f.proxy)?, f.implementation_v0);
    Ok(())
}

#[test]
fn non_admin_upgrade_to_the_zero_address_changes_nothing() -> Result<()> {
    let mut f = Fixture::new()?;

    upgrade_to(&mut f.vm, f.proxy, ANOTHER_ACCOUNT, Address::ZERO)
        .expect_err("should reach the implementation and revert");

    assert_slots(&f.vm, f.proxy, f.implementation_v0, ADMIN);
    Ok(())
}

#[test]
fn non_admin_change_admin_to_the_zero_address_changes_nothing() -> Result<()>
{
    let mut f = Fixture::new()?;

    f.vm.send(
        ANOTHER_ACCOUNT,
        f.proxy,
        &IAdminUpgradeabilityProxy::changeAdminCall { newAdmin: Address::ZERO },
        U256::ZERO,
    )
    .expect_err("should reach the implementation and revert");

    assert_slots(&f.vm, f.proxy, f.implementation_v0, ADMIN);
    Ok(())
}

#[test]
fn non_admin_management_calls_run_the_implementation_fallback() -> Result<()>
{
    let mut vm = Vm::new();
    let instance4 = deploy(&mut vm, Arc::new(Implementation4))?;
    let proxy = deploy_proxy(&mut vm, instance4)?;

    let receipt = upgrade_to(&mut vm, proxy, ANOTHER_ACCOUNT, Address::ZERO)?;
    vm.send(
        ANOTHER_ACCOUNT,
        proxy,
        &IAdminUpgradeabilityProxy::changeAdminCall { newAdmin: Address::ZERO },
        U256::ZERO,
    )?;

    assert!(receipt.decode_logs::<Upgraded>().is_empty());
    assert_slots(&vm, proxy, instance4, ADMIN);
    let value: U256 =
        vm.read(ANOTHER_ACCOUNT, proxy, &IImplementation4::getValueCall {})?;
    assert_eq!(value, U256::from(1));
    Ok(())
}

#[test]
fn proxy_upgraded_to_itself_reverts_instead_of_recursing() -> Result<()> {
    let mut f = Fixture::new()?;

    upgrade_to(&mut f.vm, f.proxy, ADMIN, f.proxy)?;
    let err = f
        .vm
        .read::<bool, _>(
            ANOTHER_ACCOUNT,
            f.proxy,
            &IDummyImplementation::getCall {},
        )
        .expect_err("should exceed the call depth");

    assert!(matches!(err, Error::Reverted(_)));
    assert_eq!(implementation(&mut f.vm, f.proxy)?, f.proxy);
    Ok(())
}

#[test]
fn proxies_pointing_at_each_other_revert() -> Result<()> {
    let mut f = Fixture::new()?;
    let other = deploy_proxy(&mut f.vm, f.implementation_v1)?;

    upgrade_to(&mut f.vm, f.proxy, ADMIN, other)?;
    upgrade_to(&mut f.vm, other, ADMIN, f.proxy)?;
    let err = f
        .vm
        .transact(
            ANOTHER_ACCOUNT,
            other,
            &IDummyImplementation::getCall {}.abi_encode(),
            U256::ZERO,
        )
        .expect_err("should exceed the call depth");

    assert!(matches!(err, Error::Reverted(_)));
    Ok(())
}

fn assert_slots(
    vm: &Vm,
    proxy: Address,
    implementation: Address,
    admin: Address,
) {
    assert_eq!(
        vm.storage_at(proxy, IMPLEMENTATION_SLOT),
        implementation.into_word()
    );
    assert_eq!(vm.storage_at(proxy, ADMIN_SLOT), admin.into_word());
}

// upgradeToAndCall without migrations

#[test]
fn upgrade_to_and_call_initializes_through_the_proxy() -> Result<()> {
    let mut f = Fixture::new()?;
    let behavior = deploy(&mut f.vm, Arc::new(MigratableMock))?;

    let receipt = upgrade_to_and_call(
        &mut f.vm,
        f.proxy,
        ADMIN,
        behavior,
        &IMigratableMock::initializeCall { value: U256::from(42) },
        U256::from(VALUE),
    )?;

    // upgrades to the requested implementation
    assert_eq!(implementation(&mut f.vm, f.proxy)?, behavior);
    // emits an event
    assert_eq!(
        receipt.decode_logs::<Upgraded>(),
        vec![Upgraded { implementation: behavior }]
    );
    // calls the 'initialize' function
    let x: U256 =
        f.vm.read(ANOTHER_ACCOUNT, f.proxy, &IMigratableMock::xCall {})?;
    assert_eq!(x, U256::from(42));
    // sends given value to the proxy
    assert_eq!(f.vm.balance(f.proxy), U256::from(VALUE));
    // uses the storage of the proxy
    assert_eq!(f.vm.storage_at(f.proxy, slot(1)), U256::from(42).into_word());
    assert_eq!(f.vm.storage_at(behavior, slot(1)), U256::ZERO.into_word());
    Ok(())
}

#[test]
fn non_admin_cannot_upgrade_and_call() -> Result<()> {
    let mut f = Fixture::new()?;
    let behavior = deploy(&mut f.vm, Arc::new(MigratableMock))?;

    upgrade_to_and_call(
        &mut f.vm,
        f.proxy,
        ANOTHER_ACCOUNT,
        behavior,
        &IMigratableMock::initializeCall { value: U256::from(42) },
        U256::ZERO,
    )
    .expect_err("should revert");

    assert_eq!(implementation(&mut f.vm, f.proxy)?, f.implementation_v0);
    Ok(())
}

#[test]
fn failing_call_reverts_the_whole_upgrade() -> Result<()> {
    let mut f = Fixture::new()?;
    let behavior = deploy(&mut f.vm, Arc::new(MigratableMock))?;

    let err = upgrade_to_and_call(
        &mut f.vm,
        f.proxy,
        ADMIN,
        behavior,
        &IMigratableMock::failCall {},
        U256::from(VALUE),
    )
    .expect_err("should revert");

    assert_eq!(err.revert(), Some(&Revert::empty()));
    assert_eq!(implementation(&mut f.vm, f.proxy)?, f.implementation_v0);
    assert_eq!(f.vm.balance(f.proxy), U256::ZERO);
    assert_eq!(f.vm.balance(ADMIN), U256::from(10 * VALUE));
    Ok(())
}

// upgradeToAndCall with migrations

fn assert_upgraded(
    vm: &mut Vm,
    proxy: Address,
    receipt: &Receipt,
    behavior: Address,
) -> Result<()> {
    assert_eq!(implementation(vm, proxy)?, behavior);
    assert_eq!(
        receipt.decode_logs::<Upgraded>(),
        vec![Upgraded { implementation: behavior }]
    );
    Ok(())
}

#[test]
fn migrates_through_every_version() -> Result<()> {
    let mut f = Fixture::new()?;
    let value = U256::from(VALUE);

    // V1
    let behavior_v1 = deploy(&mut f.vm, Arc::new(MigratableMockV1))?;
    let balance_previous_v1 = f.vm.balance(f.proxy);
    let receipt = upgrade_to_and_call(
        &mut f.vm,
        f.proxy,
        ADMIN,
        behavior_v1,
        &IMigratableMockV1::initializeCall { value: U256::from(42) },
        value,
    )?;
    assert_upgraded(&mut f.vm, f.proxy, &receipt, behavior_v1)?;
    let x: U256 =
        f.vm.read(ANOTHER_ACCOUNT, f.proxy, &IMigratableMockV1::xCall {})?;
    assert_eq!(x, U256::from(42));
    assert_eq!(f.vm.balance(f.proxy), balance_previous_v1 + value);

    // V2
    let behavior_v2 = deploy(&mut f.vm, Arc::new(MigratableMockV2))?;
    let balance_previous_v2 = f.vm.balance(f.proxy);
    let receipt = upgrade_to_and_call(
        &mut f.vm,
        f.proxy,
        ADMIN,
        behavior_v2,
        &IMigratableMockV2::migrateCall {
            newX: U256::from(10),
            newY: U256::from(42),
        },
        value,
    )?;
    assert_upgraded(&mut f.vm, f.proxy, &receipt, behavior_v2)?;
    let x: U256 =
        f.vm.read(ANOTHER_ACCOUNT, f.proxy, &IMigratableMockV1::xCall {})?;
    let y: U256 =
        f.vm.read(ANOTHER_ACCOUNT, f.proxy, &IMigratableMockV2::yCall {})?;
    assert_eq!((x, y), (U256::from(10), U256::from(42)));
    assert_eq!(f.vm.balance(f.proxy), balance_previous_v2 + value);

    // V3
    let behavior_v3 = deploy(&mut f.vm, Arc::new(MigratableMockV3))?;
    let balance_previous_v3 = f.vm.balance(f.proxy);
    let receipt = upgrade_to_and_call(
        &mut f.vm,
        f.proxy,
        ADMIN,
        behavior_v3,
        &IMigratableMockV3::migrateCall {},
        value,
    )?;
    assert_upgraded(&mut f.vm, f.proxy, &receipt, behavior_v3)?;
    let x: U256 =
        f.vm.read(ANOTHER_ACCOUNT, f.proxy, &IMigratableMockV1::xCall {})?;
    let y: U256 =
        f.vm.read(ANOTHER_ACCOUNT, f.proxy, &IMigratableMockV2::yCall {})?;
    assert_eq!((x, y), (U256::from(42), U256::from(10)));
    assert_eq!(f.vm.balance(f.proxy), balance_previous_v3 + value);
    Ok(())
}

#[test]
fn migration_cannot_skip_a_version() -> Result<()> {
    let mut f = Fixture::new()?;
    let behavior_v2 = deploy(&mut f.vm, Arc::new(MigratableMockV2))?;

    upgrade_to_and_call(
        &mut f.vm,
        f.proxy,
        ADMIN,
        behavior_v2,
        &IMigratableMockV2::migrateCall {
            newX: U256::from(10),
            newY: U256::from(42),
        },
        U256::ZERO,
    )
    .expect_err("should require V1");

    assert_eq!(implementation(&mut f.vm, f.proxy)?, f.implementation_v0);
    Ok(())
}

#[test]
fn non_admin_cannot_migrate() -> Result<()> {
    let mut f = Fixture::new()?;
    let behavior_v1 = deploy(&mut f.vm, Arc::new(MigratableMockV1))?;

    upgrade_to_and_call(
        &mut f.vm,
        f.proxy,
        ANOTHER_ACCOUNT,
        behavior_v1,
        &IMigratableMockV1::initializeCall { value: U256::from(42) },
        U256::ZERO,
    )
    .expect_err("should revert");

    assert_eq!(implementation(&mut f.vm, f.proxy)?, f.implementation_v0);
    Ok(())
}

// changeAdmin

#[test]
fn admin_assigns_new_proxy_admin() -> Result<()> {
    let mut f = Fixture::new()?;

    let receipt = f.vm.send(
        ADMIN,
        f.proxy,
        &IAdminUpgradeabilityProxy::changeAdminCall {
            newAdmin: ANOTHER_ACCOUNT,
        },
        U256::ZERO,
    )?;

    let admin: Address = f.vm.read(
        ANOTHER_ACCOUNT,
        f.proxy,
        &IAdminUpgradeabilityProxy::adminCall {},
    )?;
    assert_eq!(admin, ANOTHER_ACCOUNT);
    assert_eq!(receipt.logs.len(), 1);
    assert!(receipt.emits(&AdminChanged {
        previousAdmin: ADMIN,
        newAdmin: ANOTHER_ACCOUNT,
    }));
    Ok(())
}

#[test]
fn non_admin_cannot_change_admin() -> Result<()> {
    let mut f = Fixture::new()?;

    f.vm.send(
        ANOTHER_ACCOUNT,
        f.proxy,
        &IAdminUpgradeabilityProxy::changeAdminCall {
            newAdmin: ANOTHER_ACCOUNT,
        },
        U256::ZERO,
    )
    .expect_err("should revert");

    assert_eq!(f.vm.storage_at(f.proxy, ADMIN_SLOT), ADMIN.into_word());
    Ok(())
}

#[test]
fn change_admin_to_the_zero_address_reverts() -> Result<()> {
    let mut f = Fixture::new()?;

    let err = f
        .vm
        .send(
            ADMIN,
            f.proxy,
            &IAdminUpgradeabilityProxy::changeAdminCall {
                newAdmin: Address::ZERO,
            },
            U256::ZERO,
        )
        .expect_err("should revert");

    assert!(reverted_with(&err, &ProxyInvalidAdmin { admin: Address::ZERO }));
    assert_eq!(f.vm.storage_at(f.proxy, ADMIN_SLOT), ADMIN.into_word());
    Ok(())
}

// storage

#[test]
fn stores_the_implementation_in_its_slot() -> Result<()> {
    let f = Fixture::new()?;

    assert_eq!(
        f.vm.storage_at(f.proxy, IMPLEMENTATION_SLOT),
        f.implementation_v0.into_word()
    );
    Ok(())
}

#[test]
fn stores_the_admin_in_its_slot() -> Result<()> {
    let f = Fixture::new()?;

    assert_eq!(f.vm.storage_at(f.proxy, ADMIN_SLOT), ADMIN.into_word());
    Ok(())
}

#[test]
fn keeps_sequential_slots_free() -> Result<()> {
    let f = Fixture::new()?;

    assert!(f.vm.storage_at(f.proxy, slot(0)).is_zero());
    assert!(f.vm.storage_at(f.proxy, slot(1)).is_zero());
    Ok(())
}

// transparent proxy

fn clashing_fixture() -> Result<(Vm, Address)> {
    let mut vm = Vm::new();
    let implementation = deploy(&mut vm, Arc::new(ClashingImplementation))?;
    let proxy = deploy_proxy(&mut vm, implementation)?;
    Ok((vm, proxy))
}

#[test]
fn proxy_admin_cannot_call_delegated_functions() -> Result<()> {
    let (mut vm, proxy) = clashing_fixture()?;

    let err = vm
        .send(
            ADMIN,
            proxy,
            &IClashingImplementation::delegatedFunctionCall {},
            U256::ZERO,
        )
        .expect_err("admin should not reach the implementation");

    assert!(reverted_with(&err, &ProxyAdminCannotFallback {}));
    Ok(())
}

#[test]
fn admin_runs_the_proxy_function_on_clash() -> Result<()> {
    let (mut vm, proxy) = clashing_fixture()?;

    let admin: Address =
        vm.read(ADMIN, proxy, &IAdminUpgradeabilityProxy::adminCall {})?;

    assert_eq!(admin, ADMIN);
    Ok(())
}

#[test]
fn other_accounts_reach_the_implementation_on_clash() -> Result<()> {
    let (mut vm, proxy) = clashing_fixture()?;

    let admin: Address = vm.read(
        ANOTHER_ACCOUNT,
        proxy,
        &IAdminUpgradeabilityProxy::adminCall {},
    )?;
    let delegated: bool = vm.read(
        ANOTHER_ACCOUNT,
        proxy,
        &IClashingImplementation::delegatedFunctionCall {},
    )?;

    assert_eq!(admin, ClashingImplementation::ADMIN);
    assert!(delegated);
    Ok(())
}

// regression

fn set_value(vm: &mut Vm, proxy: Address, value: u64) -> Result<()> {
    vm.send(
        ANOTHER_ACCOUNT,
        proxy,
        &IImplementation1::setValueCall { number: U256::from(value) },
        U256::ZERO,
    )?;
    Ok(())
}

#[test]
fn should_add_new_function() -> Result<()> {
    let mut vm = Vm::new();
    let instance1 = deploy(&mut vm, Arc::new(Implementation1))?;
    let proxy = deploy_proxy(&mut vm, instance1)?;
    set_value(&mut vm, proxy, 42)?;

    let instance2 = deploy(&mut vm, Arc::new(Implementation2))?;
    upgrade_to(&mut vm, proxy, ADMIN, instance2)?;

    let res: U256 = vm.read(
        ANOTHER_ACCOUNT,
        proxy,
        &IImplementation2::getValueCall {},
    )?;
    assert_eq!(res, U256::from(42));
    Ok(())
}

#[test]
fn should_remove_function() -> Result<()> {
    let mut vm = Vm::new();
    let instance2 = deploy(&mut vm, Arc::new(Implementation2))?;
    let proxy = deploy_proxy(&mut vm, instance2)?;
    set_value(&mut vm, proxy, 42)?;
    let res: U256 = vm.read(
        ANOTHER_ACCOUNT,
        proxy,
        &IImplementation2::getValueCall {},
    )?;
    assert_eq!(res, U256::from(42));

    let instance1 = deploy(&mut vm, Arc::new(Implementation1))?;
    upgrade_to(&mut vm, proxy, ADMIN, instance1)?;

    vm.read::<U256, _>(
        ANOTHER_ACCOUNT,
        proxy,
        &IImplementation2::getValueCall {},
    )
    .expect_err("getValue should be gone");
    Ok(())
}

#[test]
fn should_change_function_signature() -> Result<()> {
    let mut vm = Vm::new();
    let instance1 = deploy(&mut vm, Arc::new(Implementation1))?;
    let proxy = deploy_proxy(&mut vm, instance1)?;
    set_value(&mut vm, proxy, 42)?;

    let instance3 = deploy(&mut vm, Arc::new(Implementation3))?;
    upgrade_to(&mut vm, proxy, ADMIN, instance3)?;

    let res: U256 = vm.read(
        ANOTHER_ACCOUNT,
        proxy,
        &IImplementation3::getValueCall { number: U256::from(8) },
    )?;
    assert_eq!(res, U256::from(50));
    Ok(())
}

#[test]
fn should_add_fallback_function() -> Result<()> {
    let mut vm = Vm::new();
    let instance1 = deploy(&mut vm, Arc::new(Implementation1))?;
    let proxy = deploy_proxy(&mut vm, instance1)?;

    let instance4 = deploy(&mut vm, Arc::new(Implementation4))?;
    upgrade_to(&mut vm, proxy, ADMIN, instance4)?;

    vm.transact(ANOTHER_ACCOUNT, proxy, &[], U256::ZERO)?;

    let res: U256 = vm.read(
        ANOTHER_ACCOUNT,
        proxy,
        &IImplementation4::getValueCall {},
    )?;
    assert_eq!(res, U256::from(1));
    Ok(())
}

#[test]
fn should_remove_fallback_function() -> Result<()> {
    let mut vm = Vm::new();
    let instance4 = deploy(&mut vm, Arc::new(Implementation4))?;
    let proxy = deploy_proxy(&mut vm, instance4)?;

    let instance2 = deploy(&mut vm, Arc::new(Implementation2))?;
    upgrade_to(&mut vm, proxy, ADMIN, instance2)?;

    vm.transact(ANOTHER_ACCOUNT, proxy, &[], U256::ZERO)
        .expect_err("fallback should be gone");

    let res: U256 = vm.read(
        ANOTHER_ACCOUNT,
        proxy,
        &IImplementation2::getValueCall {},
    )?;
    assert_eq!(res, U256::ZERO);
    Ok(())
}
