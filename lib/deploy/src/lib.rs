/*!
# zOS package deployment

Deploys a fresh [`zos_contracts::package::Package`] and hands back a typed
client bound to it.

```ignore
use zos_deploy::{LocalNetwork, PackageClient, PackageDeployer, TxParams};

let network = LocalNetwork::new(owner);
let mut deployer =
    PackageDeployer::new(network, LocalNetwork::registry(), TxParams::default());
let package: PackageClient<_> = deployer.deploy().await?;
package.add_version("1.0", directory).await?;
```

The same deployer runs against a node through [`RpcNetwork`], with the
contracts loaded from Truffle-style artifacts by
[`ContractRegistry::from_artifacts_dir`].
*/

pub mod config;
pub mod deployer;
pub mod error;
pub mod network;
pub mod package;
pub mod params;
pub mod registry;
pub mod telemetry;

pub use config::Config;
pub use deployer::{FromPackage, PackageDeployer};
pub use error::{Error, Rejection};
pub use network::{LocalNetwork, Network, RpcNetwork};
pub use package::PackageClient;
pub use params::TxParams;
pub use registry::{Artifact, ContractRegistry};
