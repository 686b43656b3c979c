//! Command-line interface definitions.

use clap::{Parser, Subcommand};
use masa_core::{CoreError, PhoneType};
use std::path::PathBuf;

/// MASA Telecommunications - phone order invoicing.
#[derive(Parser, Debug)]
#[command(name = "masa")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the invoice database (overrides MASA_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Log database activity to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to the interactive menu
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive menu: read or create invoices
    Menu,

    /// Print every stored invoice
    List(ListArgs),

    /// Create an invoice without prompting
    Create(CreateArgs),

    /// Create the invoice table and exit
    Init,
}

/// Arguments for the `list` subcommand.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `create` subcommand.
#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Company name (must not already have an invoice)
    #[arg(long)]
    pub company: String,

    /// Company phone number, UK mobile (07… or 447…)
    #[arg(long)]
    pub number: String,

    /// Phone type: Basic, Standard or Superior
    #[arg(long, value_parser = parse_phone_type)]
    pub phone: PhoneType,

    /// 1 = Option A (5 apps), 2 = Option B (10 apps), 3 = None
    #[arg(long, default_value_t = 3)]
    pub option: u8,

    /// Number of phones, 5 to 100 in steps of 5
    #[arg(long)]
    pub quantity: u32,
}

fn parse_phone_type(value: &str) -> Result<PhoneType, String> {
    value.parse().map_err(|e: CoreError| e.to_string())
}
