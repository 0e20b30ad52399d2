use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use tern_bridge::{AuditEvent, TransferBridge};

use crate::config::load_config;

/// Create the state root and every configured user's jail folders.
pub async fn run(config_path: &Path) -> Result<()> {
    let config = load_config(config_path).await?;

    std::fs::create_dir_all(&config.state_folder)
        .with_context(|| format!("Failed to create state folder {}", config.state_folder.display()))?;
    std::fs::create_dir_all(&config.base_folder)
        .with_context(|| format!("Failed to create base folder {}", config.base_folder.display()))?;

    let bridge = TransferBridge::from_config(&config);
    for user in bridge.registry().users() {
        user.prepare_folders(&config.base_folder)
            .with_context(|| format!("Failed to prepare folders for '{}'", user.username()))?;
        AuditEvent::folders_prepared(user.username(), user.folders().len().max(1)).log();
    }

    info!(
        users = bridge.registry().len(),
        base_folder = %config.base_folder.display(),
        state_folder = %config.state_folder.display(),
        "Service folders prepared"
    );
    println!(
        "Prepared folders for {} users under {}",
        bridge.registry().len(),
        config.base_folder.display()
    );

    Ok(())
}
