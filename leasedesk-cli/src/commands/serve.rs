//! HTTP server command
//!
//! Runs the inquiry service against a SQLite database, creating the file
//! and schema on first start.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use leasedesk_core::DEFAULT_UTC_OFFSET_HOURS;
use leasedesk_server::{create_pool, run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "LEASEDESK_BIND", default_value = "127.0.0.1:8788")]
    pub bind: SocketAddr,

    /// Database URL, e.g. sqlite://leasedesk.db
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Offset from UTC, in hours, used to stamp created_at
    #[arg(
        long,
        env = "LEASEDESK_UTC_OFFSET_HOURS",
        default_value_t = DEFAULT_UTC_OFFSET_HOURS,
        allow_hyphen_values = true
    )]
    pub utc_offset_hours: i32,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let database_url = args
        .database_url
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

    tracing::info!(bind = %args.bind, utc_offset_hours = args.utc_offset_hours, "starting leasedesk server");

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    let config = ServerConfig {
        bind_addr: args.bind,
        utc_offset_hours: args.utc_offset_hours,
    };

    // Blocks until shutdown
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
