//! CLI entry point for the PetCare client.
//!
//! This binary provides the `petcare` command: sign in once, then manage
//! pets, feeding schedules, and vet visits against the configured server.
//! The session token is persisted under the PetCare home directory and
//! reused until `petcare logout`.

mod cli;
mod commands;
mod context;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::context::Context;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("warn");

    let cli = Cli::parse();
    let ctx = Context::from_env()?;

    match cli.command {
        Commands::Register(args) => commands::register(&ctx, args).await,
        Commands::Login(args) => commands::login(&ctx, args).await,
        Commands::Logout => commands::logout(&ctx).await,
        Commands::Whoami => commands::whoami(&ctx).await,
        Commands::Pets(cmd) => commands::pets(&ctx, cmd).await,
        Commands::Schedule(cmd) => commands::schedule(&ctx, cmd).await,
        Commands::Visits(cmd) => commands::visits(&ctx, cmd).await,
    }
}

/// Initialize the tracing subscriber with the given default log level.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
