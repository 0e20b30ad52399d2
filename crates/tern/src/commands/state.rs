use anyhow::Result;
use std::path::Path;

use tern_bridge::TransferBridge;

use crate::StateCommands;
use crate::config::load_config;

/// Inspect or update persisted resume state through the configured store.
pub async fn handle(config_path: &Path, cmd: StateCommands) -> Result<()> {
    let config = load_config(config_path).await?;
    let bridge = TransferBridge::from_config(&config);

    match cmd {
        StateCommands::Get { username, folder } => {
            let state = bridge.fetch_state(&username, &folder).await;
            if state.is_empty() {
                println!("(no state recorded)");
            } else {
                println!("{state}");
            }
        }
        StateCommands::Set {
            username,
            value,
            folder,
        } => {
            bridge.save_state(&username, &folder, &value).await;
            println!("Recorded state for '{username}'");
        }
    }

    Ok(())
}
