pub mod db;
pub mod serve;

use anyhow::{Context, Result};
use biztime_server::db::pool::DEFAULT_MAX_CONNECTIONS;
use biztime_server::db::{create_pool_with_options, PgPool};
use clap::Args;

/// Database connection options shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Maximum connections in the pool
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

impl DatabaseArgs {
    pub async fn connect(&self) -> Result<PgPool> {
        create_pool_with_options(&self.database_url, self.max_connections)
            .await
            .context("Failed to create database pool")
    }
}
