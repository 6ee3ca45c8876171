//! learnhub-server entry point
//!
//! Parses flags, loads `.env`, initializes tracing, and runs the HTTP
//! server until Ctrl+C/SIGTERM.

use std::net::SocketAddr;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use learnhub_server::db::{Db, DbConfig};
use learnhub_server::http::{run_server, ServerConfig};

#[derive(Parser, Debug)]
#[command(
    name = "learnhub-server",
    author,
    version,
    about = "HTTP backend for LearnHub - users, course catalog, quizzes, and enrollments"
)]
struct Cli {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "0.0.0.0:8000")]
    bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    cors_permissive: bool,

    /// Enable debug logging (an explicit RUST_LOG still wins)
    #[arg(long)]
    debug: bool,
}

fn init_tracing(debug: bool) -> Result<()> {
    let default_filter = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Database credentials commonly live in a .env next to the compose file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.debug).ok();

    let db = Db::new(DbConfig::from_env());
    let config = ServerConfig {
        bind_addr: cli.bind,
        cors_permissive: cli.cors_permissive,
    };

    run_server(db, config).await.context("Server error")?;
    Ok(())
}
