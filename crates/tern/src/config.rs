use anyhow::{Context, Result};
use std::path::Path;
use tern_core::ServiceConfig;
use tokio::fs;

pub async fn load_config(path: &Path) -> Result<ServiceConfig> {
    let contents = fs::read_to_string(path)
        .await
        .context("Failed to read configuration file")?;

    let config: ServiceConfig =
        toml::from_str(&contents).context("Failed to parse configuration file")?;

    config.validate().context("Invalid configuration")?;

    Ok(config)
}
