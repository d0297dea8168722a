mod db;
mod error;
mod models;
mod query;
mod report;
mod run;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = run::Cli::parse_from(run::normalize_args(std::env::args()));
    match try_main(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            println!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: &run::Cli) -> Result<()> {
    let Some(command) = cli.command.as_ref().filter(|c| c.needs_ledger()) else {
        return Ok(());
    };

    let data_dir = get_data_dir();
    let log_path = data_dir.as_ref().ok().map(|dir| dir.join("expenses.log"));
    init_tracing(&cli.log_level, log_path.as_deref());

    let db_path = match &cli.db {
        Some(path) => path.clone(),
        None => data_dir?.join("expenses.db"),
    };
    tracing::debug!(path = %db_path.display(), "opening database");
    let db = db::Database::open(&db_path)?;

    let mut console = run::Console::new(io::stdin().lock(), io::stdout().lock());
    run::as_cli(command, &db, &mut console)
}

/// Install the process-wide subscriber. Events go to `log_path` when it can
/// be opened and to stderr otherwise.
fn init_tracing(filter: &str, log_path: Option<&Path>) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false);

    let file = log_path.and_then(|path| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()
    });
    match file {
        Some(file) => builder.with_ansi(false).with_writer(Mutex::new(file)).init(),
        None => builder.with_writer(io::stderr).init(),
    }
}

fn get_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "expenses", "Expenses")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}
