//! HTTP server command

use std::net::SocketAddr;

use anyhow::{Context, Result};
use biztime_server::db::schema;
use biztime_server::http::{run_server, ServerConfig};
use clap::Parser;

use super::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "BIZTIME_BIND", default_value = "127.0.0.1:3030")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Don't create missing tables on startup
    #[arg(long)]
    pub skip_migrations: bool,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            cors_permissive: self.cors_permissive,
        }
    }
}

/// Run the HTTP server (blocks until shutdown)
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting biztime server on {}", args.bind);

    let pool = args.db.connect().await?;

    if args.skip_migrations {
        tracing::info!("Skipping schema migrations");
    } else {
        schema::migrate(&pool)
            .await
            .context("Failed to run schema migrations")?;
    }

    run_server(pool, args.server_config())
        .await
        .context("Server error")?;

    Ok(())
}
