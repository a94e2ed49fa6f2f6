use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Search threshold lies in [0, 1], distance is positive, at least one key
/// - Import batch size is positive
/// - Enhancer timeout is positive and its URL is http(s)
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    let search = &config.search;
    if !(0.0..=1.0).contains(&search.threshold) {
        return Err(ConfigError::ValidationError(format!(
            "search.threshold must be between 0 and 1, got {}",
            search.threshold
        )));
    }
    if search.distance == 0 {
        return Err(ConfigError::ValidationError(
            "search.distance cannot be 0".to_string(),
        ));
    }
    if search.keys.is_empty() {
        return Err(ConfigError::ValidationError(
            "search.keys must name at least one field".to_string(),
        ));
    }

    if config.import.batch_size == 0 {
        return Err(ConfigError::ValidationError(
            "import.batch_size cannot be 0".to_string(),
        ));
    }

    let enhancer = &config.enhancer;
    if enhancer.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "enhancer.timeout_secs cannot be 0".to_string(),
        ));
    }
    if !(enhancer.url.starts_with("http://") || enhancer.url.starts_with("https://")) {
        return Err(ConfigError::ValidationError(format!(
            "enhancer.url must be an http(s) URL, got {:?}",
            enhancer.url
        )));
    }

    Ok(())
}
