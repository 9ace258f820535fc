//! Schema and sample-data commands

use anyhow::{Context, Result};
use biztime_server::db::{schema, seed};
use clap::Parser;

use super::DatabaseArgs;

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,
}

#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// Skip creating missing tables first
    #[arg(long)]
    pub skip_migrations: bool,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Create missing tables and indexes
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let pool = args.db.connect().await?;
    schema::migrate(&pool)
        .await
        .context("Failed to run schema migrations")?;
    println!("Schema is up to date ({} tables)", schema::TABLES.len());
    Ok(())
}

/// Replace all rows with the sample dataset
pub async fn run_seed(args: SeedArgs) -> Result<()> {
    let pool = args.db.connect().await?;
    if !args.skip_migrations {
        schema::migrate(&pool)
            .await
            .context("Failed to run schema migrations")?;
    }
    seed::load_sample_data(&pool)
        .await
        .context("Failed to load sample data")?;
    println!("Sample data loaded");
    Ok(())
}
