//! Log output of the `zos-deploy` binary.
use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError,
    EnvFilter,
};

/// Installs a global subscriber printing deployment progress to stderr.
///
/// Filtering follows `RUST_LOG` and defaults to `zos_deploy=info`.
///
/// # Errors
///
/// * [`TryInitError`] - If a global subscriber is already installed.
pub fn init() -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zos_deploy=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
}
