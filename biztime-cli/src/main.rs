//! biztime CLI - serve the companies/invoices/industries API and manage its database
//!
//! - `serve`: run the HTTP server
//! - `migrate`: create missing tables
//! - `seed`: reset tables to the sample dataset

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use commands::db::{MigrateArgs, SeedArgs};
use commands::serve::ServeArgs;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "biztime",
    author,
    version,
    about = "Companies, invoices and industries over HTTP + PostgreSQL"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(ServeArgs),
    /// Create missing tables and indexes
    Migrate(MigrateArgs),
    /// Reset all tables to the sample dataset
    Seed(SeedArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Values from .env are visible to clap's `env = ...` lookups
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
        Commands::Migrate(args) => commands::db::run_migrate(args).await,
        Commands::Seed(args) => commands::db::run_seed(args).await,
    }
}
