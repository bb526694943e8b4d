//! Load config from the environment-selected `todo-main.json`, then apply env overrides.

use crate::config::types::{AppConfig, DEFAULT_ENV};
use crate::config::validate;
use crate::error::ConfigError;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const CONFIG_FILE_NAME: &str = "todo-main.json";

/// Where the config for `env` may live, in lookup order.
pub fn config_candidates(env: &str) -> Vec<PathBuf> {
    vec![
        PathBuf::from("files/etc/config").join(env).join(CONFIG_FILE_NAME),
        PathBuf::from("/etc/config").join(env).join(CONFIG_FILE_NAME),
    ]
}

pub fn find_config_file(env: &str) -> Option<PathBuf> {
    config_candidates(env).into_iter().find(|p| p.is_file())
}

pub fn load_from_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Full startup load. `explicit` bypasses the search; a missing searched file means defaults.
pub fn load(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let env = std::env::var("APP_ENV")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ENV.to_string());
    let mut config = match explicit {
        Some(path) => load_from_file(path)?,
        None => match find_config_file(&env) {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading config file");
                load_from_file(&path)?
            }
            None => {
                tracing::info!(env = %env, "no config file found, using defaults");
                AppConfig::default()
            }
        },
    };
    config.server.env = env;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate(&config)?;
    Ok(config)
}

fn parse_var<T: FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { var, value })
}

/// Overwrite fields from `HOST`, `PORT`, `DATABASE_PATH`, `DATABASE_MAX_CONNECTIONS`,
/// `CORS_ALLOWED_ORIGIN`, `REQUEST_TIMEOUT_MS`.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("HOST") {
        config.server.host = v;
    }
    if let Some(v) = lookup("PORT") {
        config.server.port = parse_var("PORT", v)?;
    }
    if let Some(v) = lookup("DATABASE_PATH") {
        config.database.path = v;
    }
    if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
        config.database.max_connections = parse_var("DATABASE_MAX_CONNECTIONS", v)?;
    }
    if let Some(v) = lookup("CORS_ALLOWED_ORIGIN") {
        config.cors.allowed_origin = v;
    }
    if let Some(v) = lookup("REQUEST_TIMEOUT_MS") {
        config.request_timeout_ms = parse_var("REQUEST_TIMEOUT_MS", v)?;
    }
    Ok(())
}
