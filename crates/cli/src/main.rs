//! Janus CLI - import brokerage statements into a local ledger

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use uuid::Uuid;

mod commands;
mod config;
mod output;

use commands::{batches, import, quote, transactions, GlobalArgs};

/// Janus - brokerage statement importer
#[derive(Parser)]
#[command(name = "janus", version, about, long_about = None)]
struct Cli {
    /// Settings file (defaults to ./janus.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Ledger file holding imported transactions
    #[arg(long, global = true, env = "JANUS_LEDGER")]
    ledger: Option<PathBuf>,

    /// Owner of the imported transactions
    #[arg(long, global = true, env = "JANUS_USER", default_value_t = Uuid::nil())]
    user: Uuid,

    /// Debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a brokerage statement (xlsx, xls or ods)
    Import {
        /// Path to the statement file
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List stored transactions, newest first
    Transactions {
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Transactions per page (1-500)
        #[arg(long, default_value_t = 50)]
        page_size: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect or delete import batches
    Batches {
        #[command(subcommand)]
        command: batches::BatchCommands,
    },

    /// Fetch the latest quote for a symbol (e.g. AAPL.US)
    Quote {
        symbol: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let args = GlobalArgs {
        config: cli.config,
        ledger: config::ledger_path(cli.ledger),
        user: cli.user,
    };

    match cli.command {
        Commands::Import { file, json } => import::run(&args, &file, json).await,
        Commands::Transactions { page, page_size, json } => {
            transactions::run(&args, page, page_size, json).await
        }
        Commands::Batches { command } => batches::run(&args, command).await,
        Commands::Quote { symbol, json } => quote::run(&args, &symbol, json).await,
    }
}
