//! Cordwain CLI - Database migrations and operational tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the storefront session schema
//! cw-cli migrate storefront
//!
//! # Create the admin session schema
//! cw-cli migrate admin
//!
//! # Create both
//! cw-cli migrate all
//!
//! # Probe commerce API connectivity
//! cw-cli check
//! ```
//!
//! # Commands
//!
//! - `migrate` - Create the tower-sessions schema in each server's database
//! - `check` - Probe the commerce API health endpoint

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cw-cli")]
#[command(author, version, about = "Cordwain CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        target: MigrateTarget,
    },
    /// Probe commerce API connectivity
    Check,
}

#[derive(Subcommand)]
enum MigrateTarget {
    /// Create the storefront session schema
    Storefront,
    /// Create the admin session schema
    Admin,
    /// Create both session schemas
    All,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate { target } => match target {
            MigrateTarget::Storefront => commands::migrate::storefront().await?,
            MigrateTarget::Admin => commands::migrate::admin().await?,
            MigrateTarget::All => {
                commands::migrate::storefront().await?;
                commands::migrate::admin().await?;
            }
        },
        Commands::Check => commands::check::commerce_api().await?,
    }
    Ok(())
}
