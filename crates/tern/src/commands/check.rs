use anyhow::Result;
use std::path::Path;
use tracing::warn;

use tern_bridge::TransferBridge;

use crate::config::load_config;

/// Validate the configuration file and report the registry it produces.
pub async fn run(config_path: &Path) -> Result<()> {
    let config = load_config(config_path).await?;
    let bridge = TransferBridge::from_config(&config);
    let registry = bridge.registry();

    println!("Configuration OK: {}", config_path.display());
    println!("  base folder:  {}", config.base_folder.display());
    println!("  state folder: {}", config.state_folder.display());
    println!("  store:        {:?}", config.store);
    println!("  credentials:  {:?}", config.credential_scheme);
    println!("  users:        {}", registry.len());

    let mut usernames = registry.usernames();
    usernames.sort();
    for username in &usernames {
        if let Some(user) = registry.lookup(username) {
            let jail = if user.folders().is_empty() {
                "whole root".to_string()
            } else {
                format!("{} folders", user.folders().len())
            };
            println!(
                "    {:<16} {} keys, {}",
                username,
                user.ssh_keys().len(),
                jail
            );
        }
    }

    for duplicate in registry.duplicate_usernames() {
        warn!(username = %duplicate, "Username configured more than once, last entry wins");
        println!("  WARNING: duplicate username '{}'", duplicate);
    }

    Ok(())
}
