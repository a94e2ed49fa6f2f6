//! Process bootstrap shared by the server and admin binaries.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt};

use lessons_core::{load_config, load_config_from_env, validate_config, Config};

/// Env variable naming the config file.
pub const CONFIG_ENV: &str = "LESSONS_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Initialize logging to stdout. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    init_tracing_with_writer(std::io::stdout);
}

/// Initialize logging to `writer`.
///
/// The admin CLI logs to stderr so stdout carries only command output.
pub fn init_tracing_with_writer<W>(writer: W)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .init();
}

/// Load and validate configuration.
///
/// An explicit path (argument or `LESSONS_CONFIG`) must exist. When neither is
/// given and `config.toml` is absent, defaults plus environment are used.
pub fn load_runtime_config(explicit: Option<PathBuf>) -> Result<Config> {
    let explicit = explicit.or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from));

    let config = match explicit {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(&path)
                .with_context(|| format!("Failed to load config from {:?}", path))?
        }
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_PATH);
            if path.exists() {
                info!("Loading configuration from {:?}", path);
                load_config(&path)
                    .with_context(|| format!("Failed to load config from {:?}", path))?
            } else {
                info!("No config file found, using defaults and environment");
                load_config_from_env().context("Failed to load config from environment")?
            }
        }
    };

    validate_config(&config).context("Configuration validation failed")?;
    Ok(config)
}
