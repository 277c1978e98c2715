//! Deploys a new package and prints its address.
use std::path::PathBuf;

use alloy_primitives::Address;
use clap::Parser;
use eyre::WrapErr;
use tracing::info;
use zos_deploy::{
    telemetry, Config, ContractRegistry, LocalNetwork, Network,
    PackageClient, PackageDeployer, RpcNetwork,
};

/// Sender of the local chain.
const LOCAL_SENDER: Address = Address::repeat_byte(0x01);

#[derive(Parser, Debug)]
#[command(name = "zos-deploy", version, about = "Deploys a zOS package")]
struct Cli {
    #[arg(long, help = "TOML configuration file")]
    config: Option<PathBuf>,
    #[arg(long, help = "JSON-RPC endpoint, overrides RPC_URL")]
    rpc_url: Option<String>,
    #[arg(long, help = "Directory holding the contract artifacts")]
    artifacts: Option<PathBuf>,
    #[arg(
        long,
        default_value_t = false,
        conflicts_with_all = ["rpc_url", "artifacts"],
        help = "Deploy to an in-memory chain instead of a node"
    )]
    local: bool,
}

impl Cli {
    fn config(&self) -> eyre::Result<Config> {
        let config = match &self.config {
            Some(path) => Config::from_path(path)?,
            None => Config::default(),
        };
        let mut config = config.with_env();
        if let Some(rpc_url) = &self.rpc_url {
            config.rpc_url = Some(rpc_url.clone());
        }
        if let Some(artifacts) = &self.artifacts {
            config.artifacts_dir = Some(artifacts.clone());
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    telemetry::init()?;
    let cli = Cli::parse();
    let config = cli.config()?;

    let package = if cli.local {
        let network = LocalNetwork::new(LOCAL_SENDER);
        deploy(network, LocalNetwork::registry(), &config).await?
    } else {
        let network =
            RpcNetwork::new(config.rpc_url()?, config.private_key()?)?;
        let registry =
            ContractRegistry::from_artifacts_dir(config.artifacts_dir()?)?;
        deploy(network, registry, &config).await?
    };

    println!("{package}");
    Ok(())
}

async fn deploy<N: Network>(
    network: N,
    registry: ContractRegistry<N::Artifact>,
    config: &Config,
) -> eyre::Result<Address> {
    let sender = config.tx.from.unwrap_or(network.default_sender());
    info!("Sending transactions from {sender}");

    let mut deployer = PackageDeployer::new(network, registry, config.tx.clone());
    let package: PackageClient<N> =
        deployer.deploy().await.wrap_err("failed to deploy the package")?;

    let owner = package.owner().await?;
    info!("Package {} is owned by {owner}", package.address());
    Ok(package.address())
}
