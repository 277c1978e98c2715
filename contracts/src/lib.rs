/*!
# zOS upgradeability contracts

Upgradeable proxies and the registry contracts that keep track of their
implementations, written as native contracts for the [`zos_vm`] execution
environment.

- [`proxy`] holds the proxies: [`proxy::UpgradeabilityProxy`], which always
  delegates, and [`proxy::AdminUpgradeabilityProxy`], a transparent proxy whose
  admin manages the implementation.
- [`package`] holds [`package::Package`], which maps versions to
  implementation providers, and [`package::ImplementationDirectory`], the
  provider mapping contract names to implementations.
- [`access`] holds [`access::ownable::Ownable`], shared by the registries.
- [`mocks`] holds implementations used to exercise upgrades.

## Usage

```ignore
use std::sync::Arc;

use alloy_primitives::U256;
use alloy_sol_types::SolValue;
use zos_contracts::proxy::AdminUpgradeabilityProxy;
use zos_vm::Vm;

let mut vm = Vm::new();
let proxy = vm
    .deploy(
        admin,
        Arc::new(AdminUpgradeabilityProxy),
        &implementation.abi_encode(),
        U256::ZERO,
    )?
    .contract_address;
```
*/

pub mod access;
pub mod mocks;
pub mod package;
pub mod proxy;
mod utils;
