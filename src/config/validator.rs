//! Sanity checks on a loaded config.

use crate::config::AppConfig;
use crate::error::ConfigError;

pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.database.path.trim().is_empty() {
        return Err(ConfigError::Validation("database.path must not be empty".into()));
    }
    if config.database.max_connections == 0 {
        return Err(ConfigError::Validation("database.max_connections must be at least 1".into()));
    }
    if config.request_timeout_ms == 0 {
        return Err(ConfigError::Validation("request_timeout_ms must be positive".into()));
    }
    if config.body_limit_bytes == 0 {
        return Err(ConfigError::Validation("body_limit_bytes must be positive".into()));
    }
    Ok(())
}
