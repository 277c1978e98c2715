//! Settings of the `zos-deploy` binary.
//!
//! Values come from a TOML file, then from the environment, then from the
//! command line, each source overriding the previous one.
use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{error::Error, params::TxParams};

/// Environment variable holding the node's JSON-RPC endpoint.
pub const RPC_URL: &str = "RPC_URL";
/// Environment variable holding the deployer's private key.
pub const PRIVATE_KEY: &str = "PRIVATE_KEY";

/// Deployment settings.
///
/// ```toml
/// rpc_url = "http://localhost:8545"
/// artifacts_dir = "build/contracts"
///
/// [tx]
/// gas = 6000000
/// gas_price = 20000000000
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// JSON-RPC endpoint of the node.
    pub rpc_url: Option<String>,
    /// Hex-encoded private key signing the transactions.
    pub private_key: Option<String>,
    /// Directory holding the compiled contract artifacts.
    pub artifacts_dir: Option<PathBuf>,
    /// Parameters of every transaction.
    #[serde(default)]
    pub tx: TxParams,
}

impl Config {
    /// Reads the TOML file at `path`.
    ///
    /// # Errors
    ///
    /// * [`Error::Config`] - If the file can't be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::parse(&contents)
    }

    /// Parses TOML `contents`.
    ///
    /// # Errors
    ///
    /// * [`Error::Config`] - If `contents` is not a valid configuration.
    pub fn parse(contents: &str) -> Result<Self, Error> {
        toml::from_str(contents).map_err(|e| Error::Config(e.to_string()))
    }

    /// Overrides the endpoint and the key with the values `lookup` returns
    /// for [`RPC_URL`] and [`PRIVATE_KEY`].
    #[must_use]
    pub fn apply_env(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        if let Some(rpc_url) = lookup(RPC_URL) {
            self.rpc_url = Some(rpc_url);
        }
        if let Some(private_key) = lookup(PRIVATE_KEY) {
            self.private_key = Some(private_key);
        }
        self
    }

    /// [`Config::apply_env`] with the process environment.
    #[must_use]
    pub fn with_env(self) -> Self {
        self.apply_env(|name| std::env::var(name).ok())
    }

    /// The JSON-RPC endpoint.
    ///
    /// # Errors
    ///
    /// * [`Error::Config`] - If no endpoint is configured.
    pub fn rpc_url(&self) -> Result<&str, Error> {
        self.rpc_url.as_deref().ok_or_else(|| missing("rpc_url", RPC_URL))
    }

    /// The private key.
    ///
    /// # Errors
    ///
    /// * [`Error::Config`] - If no key is configured.
    pub fn private_key(&self) -> Result<&str, Error> {
        self.private_key
            .as_deref()
            .ok_or_else(|| missing("private_key", PRIVATE_KEY))
    }

    /// The artifacts directory.
    ///
    /// # Errors
    ///
    /// * [`Error::Config`] - If no directory is configured.
    pub fn artifacts_dir(&self) -> Result<&Path, Error> {
        self.artifacts_dir.as_deref().ok_or_else(|| {
            Error::Config("`artifacts_dir` is not set".to_owned())
        })
    }
}

fn missing(key: &str, var: &str) -> Error {
    Error::Config(format!("`{key}` is not set, and neither is {var}"))
}
