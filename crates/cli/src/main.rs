//! Postable command-line tool
//!
//! Creates, inspects and transitions records in a JSON document store.
//!
//! Usage:
//!   postable new article --title "Hello"
//!   postable publish article 1

mod commands;
mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use postable::{JsonFileStore, PostId};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::CommandContext;
use crate::config::Config;

/// Manage content records in a JSON document store.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a record and print its id.
    New {
        record_type: String,
        #[arg(long)]
        title: Option<String>,
    },
    /// Print a record as JSON.
    Show { record_type: String, id: PostId },
    /// Set a record's title.
    Title {
        record_type: String,
        id: PostId,
        title: String,
    },
    /// Set a record's status to any value.
    Status {
        record_type: String,
        id: PostId,
        status: String,
    },
    /// Publish a record.
    Publish { record_type: String, id: PostId },
    /// Move a record back to draft.
    Draft { record_type: String, id: PostId },
    /// List all stored records.
    List,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let args = Args::parse();
    let config = Config::from_env().context("failed to load configuration")?;

    let store = JsonFileStore::open(&config.store_path)
        .with_context(|| format!("failed to open store {}", config.store_path.display()))?;
    info!(path = %config.store_path.display(), "store opened");

    let ctx = CommandContext {
        store: Arc::new(store),
        defaults: config.record_defaults(),
    };

    match args.command {
        Command::New { record_type, title } => {
            commands::cmd_new(&ctx, &record_type, title.as_deref())
        }
        Command::Show { record_type, id } => commands::cmd_show(&ctx, &record_type, id),
        Command::Title {
            record_type,
            id,
            title,
        } => commands::cmd_title(&ctx, &record_type, id, &title),
        Command::Status {
            record_type,
            id,
            status,
        } => commands::cmd_status(&ctx, &record_type, id, &status),
        Command::Publish { record_type, id } => commands::cmd_publish(&ctx, &record_type, id),
        Command::Draft { record_type, id } => commands::cmd_draft(&ctx, &record_type, id),
        Command::List => commands::cmd_list(&ctx),
    }
}

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info";

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
