mod commands;
mod config;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tern")]
#[command(about = "Authorization and transfer-resume backend for FTP/SFTP file services", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "/etc/tern/config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration and report the resulting user registry
    CheckConfig,

    /// Create the state root and every user's jail folders
    Prepare,

    /// Inspect or update persisted resume state
    #[command(subcommand)]
    State(StateCommands),

    /// Hash a credential for use with the sha256 scheme
    HashCredential {
        /// Secret to hash (read from stdin when omitted)
        secret: Option<String>,
    },
}

#[derive(Subcommand)]
enum StateCommands {
    /// Print the recorded checkpoint for a user
    Get {
        /// Username the checkpoint belongs to
        username: String,

        /// Target folder (folder-map store only)
        #[arg(short, long, default_value = "")]
        folder: String,
    },

    /// Record a checkpoint for a user
    Set {
        /// Username the checkpoint belongs to
        username: String,

        /// Checkpoint value to record
        value: String,

        /// Target folder (folder-map store only)
        #[arg(short, long, default_value = "")]
        folder: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tern=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::CheckConfig => {
            commands::check::run(&cli.config).await?;
        }
        Commands::Prepare => {
            commands::prepare::run(&cli.config).await?;
        }
        Commands::State(cmd) => {
            commands::state::handle(&cli.config, cmd).await?;
        }
        Commands::HashCredential { secret } => {
            commands::hash::run(secret.as_deref())?;
        }
    }

    Ok(())
}
