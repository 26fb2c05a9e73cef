mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads the optional YAML file and layers the process environment on top.
pub async fn load() -> Result<Config> {
    let (config_path, explicit) = match env::var("CONFIG_PATH") {
        Ok(path) => (path, true),
        Err(_) => (DEFAULT_CONFIG_PATH.to_string(), false),
    };

    let mut config = load_file(&config_path, explicit).await?;
    config.apply_env(|key| env::var(key).ok())?;

    Ok(config)
}

/// Reads a YAML config file. A missing file only fails when it was asked for by name.
pub async fn load_file(path: impl AsRef<Path>, required: bool) -> Result<Config> {
    let path = path.as_ref();

    if !required && !tokio::fs::try_exists(path).await.unwrap_or(false) {
        debug!("No configuration file at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    debug!("Loading configuration from: {}", path.display());

    let config_str = tokio::fs::read_to_string(path).await?;
    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }

    let config: Config = serde_yaml::from_str(&config_str)?;
    Ok(config)
}

impl Config {
    /// Applies environment overrides using `lookup` to resolve variable names.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| Error::config(format!("Invalid PORT value: '{}'", port)))?;
        }

        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            self.server.logs.level = level;
        }

        if let Some(origins) = lookup("ALLOWED_ORIGINS") {
            self.server.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect();
        }

        if let Some(key) = lookup("OPENAI_API_KEY") {
            self.llm.api_key = Some(key);
        }

        if let Some(model) = lookup("OPENAI_MODEL") {
            self.llm.model = model;
        }

        if let Some(base_url) = lookup("OPENAI_BASE_URL") {
            self.llm.base_url = base_url;
        }

        Ok(())
    }
}
