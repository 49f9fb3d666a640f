mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

/// Loads the YAML config (if present) and applies environment overrides.
pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    let config = load_file(&config_path).await?;
    apply_env_overrides(config, |key| env::var(key).ok())
}

/// Reads a YAML config file. A missing file yields the defaults.
pub async fn load_file(config_path: impl AsRef<Path>) -> Result<Config> {
    let config_path = config_path.as_ref();
    debug!("Loading configuration from: {}", config_path.display());

    match tokio::fs::read_to_string(config_path).await {
        Ok(config_str) => Ok(serde_yaml::from_str(&config_str)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(
                "No configuration file at {}, using defaults",
                config_path.display()
            );
            Ok(Config::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// Builds the tracing filter from a level or a full directive string such as
/// `food_classifier=debug,tower_http=info`.
pub fn log_filter(directives: &str) -> Result<tracing_subscriber::EnvFilter> {
    tracing_subscriber::EnvFilter::try_new(directives).map_err(|e| {
        Error::config(format!(
            "Invalid log filter '{}': {}. Use a level (error, warn, info, debug, trace) or target=level directives",
            directives, e
        ))
    })
}

/// Applies environment variable overrides through `lookup`.
///
/// `OPENROUTER_API_KEY` wins over `OPENAI_API_KEY`. Empty values are ignored.
pub fn apply_env_overrides<F>(mut config: Config, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(key) = get("OPENROUTER_API_KEY").or_else(|| get("OPENAI_API_KEY")) {
        config.upstream.api_key = key;
    }
    if let Some(url) = get("OPENROUTER_BASE_URL") {
        config.upstream.base_url = url;
    }
    if let Some(url) = get("OPENROUTER_SITE_URL") {
        config.upstream.site_url = url;
    }
    if let Some(name) = get("OPENROUTER_APP_NAME") {
        config.upstream.app_name = name;
    }
    if let Some(model) = get("OPENROUTER_MODEL") {
        config.upstream.model = model;
    }
    if let Some(host) = get("HOST") {
        config.server.host = host;
    }
    if let Some(port) = get("PORT") {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|_| Error::config(format!("Invalid PORT value: '{}'", port)))?;
    }

    Ok(config)
}
