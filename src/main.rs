//! Binary entry point: set up logging, resolve where the catalog lives, make
//! sure the table exists, then either run one subcommand or hand the terminal
//! to the TUI until the user exits.
use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{Context, Result};
use book_catalog::cli::{self, Cli};
use book_catalog::{run_app, App, BookStore, Config};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Subcommands only log problems unless RUST_LOG asks for more.
const CLI_LOG_FILTER: &str = "book_catalog=warn";
const TUI_LOG_FILTER: &str = "book_catalog=info";

fn main() -> Result<()> {
    let args = Cli::parse();
    let config = Config::resolve(args.db.as_deref())?;

    match args.command {
        Some(command) => {
            init_stderr_logging();
            let store = open_store(&config)?;
            cli::run(&store, command)
        }
        None => {
            init_file_logging(&config)?;
            let store = open_store(&config)?;
            let mut app = App::new(store);
            run_app(&mut app)
        }
    }
}

/// Every action needs the table, so a broken location fails here, before any
/// screen is drawn.
fn open_store(config: &Config) -> Result<BookStore> {
    let store = BookStore::new(&config.db_path);
    store
        .initialize()
        .with_context(|| format!("failed to open catalog at {}", config.db_path.display()))?;
    Ok(store)
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into())
}

fn init_stderr_logging() {
    tracing_subscriber::registry()
        .with(env_filter(CLI_LOG_FILTER))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// The TUI owns stdout and stderr, so logs go to a file beside the database.
fn init_file_logging(config: &Config) -> Result<()> {
    let log_path = config.log_path();
    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(env_filter(TUI_LOG_FILTER))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}
