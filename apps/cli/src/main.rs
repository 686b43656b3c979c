//! # MASA POS Counter Terminal
//!
//! Entry point for the `masa` binary.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Parse arguments (clap) ─────────────────────────────────────────► │
//! │                                                                         │
//! │  2. Resolve configuration ──────────────────────────────────────────► │
//! │     • --db, else MASA_DB_PATH, else ./customers.db                     │
//! │                                                                         │
//! │  3. Initialize Logging ─────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter, written to stderr            │
//! │     • Default: warn, --verbose for database activity                  │
//! │                                                                         │
//! │  4. Bootstrap schema ───────────────────────────────────────────────► │
//! │     • CREATE TABLE IF NOT EXISTS invoices                              │
//! │                                                                         │
//! │  5. Dispatch ───────────────────────────────────────────────────────► │
//! │     • menu (default) / list / create / init                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use config::AppConfig;
use error::CliResult;
use masa_db::InvoiceRepository;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = AppConfig::from_env(cli.db.clone(), cli.verbose);

    init_tracing(&config);
    info!(db = %config.db_path.display(), "Starting MASA POS");

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            output::error(&e.to_string());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(command: Option<Commands>, config: &AppConfig) -> CliResult<()> {
    let repo = InvoiceRepository::new(config.db_config());

    let command = command.unwrap_or(Commands::Menu);

    // `init` bootstraps on its own and reports it
    if !matches!(command, Commands::Init) {
        repo.bootstrap_schema().await?;
    }

    match command {
        Commands::Menu => commands::menu::execute(&repo).await,
        Commands::List(args) => commands::list::execute(&repo, &args).await,
        Commands::Create(args) => commands::create::execute(&repo, &args).await.map(|_| ()),
        Commands::Init => commands::init::execute(&repo).await,
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=masa_db=trace` - Show trace for the database layer only
/// - Default: see [`AppConfig::log_filter`]
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
