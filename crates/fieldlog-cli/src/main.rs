//! fieldlog CLI - Command-line interface for recording field observations
//!
//! Each subcommand drives one of the core screen controllers against the
//! local record store.

mod cli;
mod commands;
mod error;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::common::{load_config, open_store, resolve_offset};
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::list::run_list;
use crate::commands::map::run_map;
use crate::commands::settings::{run_clear, run_export, run_seed};
use crate::commands::show::run_show;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "fieldlog=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.db_path)?;
    let db_path = config.resolved_db_path()?;
    tracing::debug!("Using database at {}", db_path.display());
    let store = open_store(&db_path)?;

    match cli.command {
        Commands::Add { fields } => {
            run_add(&fields, &store).await?;
        }
        Commands::List {
            page,
            offset,
            limit,
            json,
        } => {
            let limit = limit.unwrap_or_else(|| config.table_page_size());
            let offset = resolve_offset(page, offset, limit)?;
            run_list(offset, limit, json, &store).await?;
        }
        Commands::Map { page, limit, json } => {
            let limit = limit.unwrap_or_else(|| config.map_page_size());
            let offset = resolve_offset(page, None, limit)?;
            run_map(offset, limit, json, &store).await?;
        }
        Commands::Show { id, json } => run_show(&id, json, &store).await?,
        Commands::Edit {
            id,
            fields,
            clear_location,
            clear_image,
        } => run_edit(&id, &fields, clear_location, clear_image, &store).await?,
        Commands::Delete { id, offset, limit } => {
            let limit = limit.unwrap_or_else(|| config.table_page_size());
            run_delete(&id, offset, limit, &store).await?;
        }
        Commands::Clear { yes } => run_clear(yes, &store).await?,
        Commands::Seed { yes } => run_seed(yes, &store).await?,
        Commands::Export => run_export(&store)?,
    }

    Ok(())
}
