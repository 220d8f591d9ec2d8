//! Cevichería CLI - Database migrations and seeding.
//!
//! # Usage
//!
//! ```bash
//! # Create or update the productos, usuarios and pedidos tables
//! cevicheria-cli migrate
//!
//! # Load the house menu into an empty catalog
//! cevicheria-cli seed
//!
//! # Load the house menu even if the catalog already has products
//! cevicheria-cli seed --force
//! ```
//!
//! Both commands read `DATABASE_URL` (a `.env` file is honored).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cevicheria-cli")]
#[command(author, version, about = "Cevichería CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert the house menu into the catalog
    Seed {
        /// Seed even when the catalog is not empty
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { force } => {
            commands::seed::menu(force).await?;
        }
    }
    Ok(())
}
