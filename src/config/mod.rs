mod types;

pub use types::*;

use crate::Result;
use std::{env, io::ErrorKind};
use tracing::debug;

pub const DEFAULT_CONFIG_PATH: &str = "chatbot-probe.yaml";

/// Loads the configuration.
///
/// An explicit `path` wins over `CONFIG_PATH`. When neither is given and
/// the default file does not exist, built-in defaults are used.
pub async fn load(path: Option<&str>) -> Result<Config> {
    let explicit = path
        .map(str::to_string)
        .or_else(|| env::var("CONFIG_PATH").ok());

    let config_path = explicit
        .clone()
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    debug!("Loading configuration from: {}", config_path);

    let config_str = match tokio::fs::read_to_string(&config_path).await {
        Ok(s) => s,
        Err(e) if e.kind() == ErrorKind::NotFound && explicit.is_none() => {
            debug!("No configuration file found, using defaults");
            return Ok(Config::default());
        }
        Err(e) => return Err(e.into()),
    };

    parse(&config_str)
}

pub fn parse(config_str: &str) -> Result<Config> {
    // An empty document deserializes to unit, not to a mapping.
    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_yaml::from_str(config_str)?;
    Ok(config)
}
