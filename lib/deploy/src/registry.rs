//! Name-keyed registry of deployable contracts, built once at startup.
use std::{
    collections::HashMap,
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use alloy_primitives::Bytes;
use serde::Deserialize;
use tracing::debug;

use crate::error::Error;

/// Compiled contract, as found in a Truffle-style build artifact.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// Name of the contract.
    pub contract_name: String,
    /// Creation bytecode.
    pub bytecode: Bytes,
}

/// Maps logical contract names to handles a network knows how to deploy.
#[derive(Clone, Debug)]
pub struct ContractRegistry<A> {
    contracts: HashMap<String, A>,
}

impl<A> Default for ContractRegistry<A> {
    fn default() -> Self {
        Self { contracts: HashMap::new() }
    }
}

impl<A> ContractRegistry<A> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `artifact` under `name`, replacing any previous entry.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, artifact: A) -> Self {
        self.insert(name, artifact);
        self
    }

    /// Registers `artifact` under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, artifact: A) {
        self.contracts.insert(name.into(), artifact);
    }

    /// Looks `name` up.
    ///
    /// # Errors
    ///
    /// * [`Error::Resolution`] - If nothing is registered under `name`.
    pub fn resolve(&self, name: &str) -> Result<&A, Error> {
        self.contracts
            .get(name)
            .ok_or_else(|| Error::Resolution { name: name.to_owned() })
    }

    /// Whether something is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.contracts.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> =
            self.contracts.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl ContractRegistry<Artifact> {
    /// Loads every `*.json` artifact in `dir`, keyed by its `contractName`.
    ///
    /// Artifacts without bytecode (interfaces, abstract contracts) are
    /// skipped.
    ///
    /// # Errors
    ///
    /// * [`Error::Artifact`] - If `dir` or one of its artifacts can't be
    ///   read or parsed.
    pub fn from_artifacts_dir(dir: impl AsRef<Path>) -> Result<Self, Error> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|e| artifact_error(dir, e))?;

        let mut registry = Self::new();
        for entry in entries {
            let path = entry.map_err(|e| artifact_error(dir, e))?.path();
            if path.extension() != Some(OsStr::new("json")) {
                continue;
            }

            let artifact = read_artifact(&path)?;
            if artifact.bytecode.is_empty() {
                debug!(path = %path.display(), "skipping artifact without bytecode");
                continue;
            }
            debug!(name = %artifact.contract_name, "registered artifact");
            registry.insert(artifact.contract_name.clone(), artifact);
        }

        Ok(registry)
    }
}

fn read_artifact(path: &Path) -> Result<Artifact, Error> {
    let contents =
        fs::read_to_string(path).map_err(|e| artifact_error(path, e))?;
    serde_json::from_str(&contents).map_err(|e| artifact_error(path, e))
}

fn artifact_error(path: &Path, reason: impl ToString) -> Error {
    Error::Artifact { path: PathBuf::from(path), reason: reason.to_string() }
}
