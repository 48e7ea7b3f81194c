//! ChainID CLI: entry point.
//!
//! Subcommands: init, validate, register, verify, status, history,
//! revoke.
//!
//! The register/verify/history/revoke commands run against the
//! in-memory providers, so each invocation is a fresh sandbox: they
//! seed an identity and exercise the full flow within one process.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// ChainID: privacy-preserving decentralized identity.
#[derive(Parser, Debug)]
#[command(name = "chainid", version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default configuration file.
    Init(commands::init::InitArgs),
    /// Validate registration-form input without registering.
    Validate(commands::validate::ValidateArgs),
    /// Register an identity: validate, encrypt, store, mint, audit.
    Register(commands::register::RegisterArgs),
    /// Verify an identity attribute through a gasless session.
    Verify(commands::verify::VerifyArgs),
    /// Show the identity record and its derived credentials.
    Status(commands::status::StatusArgs),
    /// Register, verify, and print the verification history.
    History(commands::history::HistoryArgs),
    /// Register and then revoke an identity.
    Revoke(commands::revoke::RevokeArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    tracing::debug!(command = ?cli.command, "parsed arguments");

    match &cli.command {
        Commands::Init(args) => commands::init::run(args),
        Commands::Validate(args) => commands::validate::run(args),
        Commands::Register(args) => commands::register::run(args).await,
        Commands::Verify(args) => commands::verify::run(args).await,
        Commands::Status(args) => commands::status::run(args).await,
        Commands::History(args) => commands::history::run(args).await,
        Commands::Revoke(args) => commands::revoke::run(args).await,
    }
}
