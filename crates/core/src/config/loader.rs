use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Env prefix for structured overrides, e.g. `LESSONS_SERVER__PORT=8080`.
const ENV_PREFIX: &str = "LESSONS_";

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    extract(Figment::new().merge(Toml::file(path)))
}

/// Load configuration from defaults and environment variables only
pub fn load_config_from_env() -> Result<Config, ConfigError> {
    extract(Figment::new())
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn extract(figment: Figment) -> Result<Config, ConfigError> {
    with_env(figment)
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Layer environment providers on top of a base figment.
///
/// The unprefixed variables are the ones the service has always honoured
/// and take precedence over everything else.
fn with_env(figment: Figment) -> Figment {
    figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .merge(Env::raw().only(&["PORT"]).map(|_| "server.port".into()))
        .merge(
            Env::raw()
                .only(&["GEMINI_API_KEY"])
                .map(|_| "enhancer.api_key".into()),
        )
        .merge(
            Env::raw()
                .only(&["OPENROUTER_API_KEY"])
                .map(|_| "enhancer.routing_key".into()),
        )
}
