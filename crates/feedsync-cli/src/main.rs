use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use feedsync_core::{storage::Database, AppConfig};

mod commands;

#[derive(Parser)]
#[command(name = "feedsync")]
#[command(author, version, about = "Incremental RSS feed synchronizer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch all configured sources and persist new articles
    Sync,
    /// Fetch a single feed URL and print it as JSON
    Inspect {
        /// Feed URL to inspect
        url: String,
    },
    /// List the configured feed sources
    Sources,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    match cli.command {
        Commands::Sync => {
            let db = Database::connect(&config).await?;
            commands::sync::run(&db, &config).await
        }
        Commands::Inspect { url } => commands::inspect::run(&config, &url).await,
        Commands::Sources => {
            let db = Database::connect(&config).await?;
            commands::sources::run(&db).await
        }
    }
}
