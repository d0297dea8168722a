mod cli;
mod commands;
mod console;

use anyhow::Result;
use std::io::{BufRead, Write};

use crate::db::Database;

pub(crate) use cli::{normalize_args, Cli, Command};
pub(crate) use console::Console;

pub(crate) fn as_cli<R: BufRead, W: Write>(
    command: &Command,
    db: &Database,
    console: &mut Console<R, W>,
) -> Result<()> {
    match command {
        Command::Add(args) => commands::add(args, db, console),
        Command::Upd(args) => commands::update(args, db, console),
        Command::Del(args) => commands::delete(args, db, console),
        Command::List(args) => commands::list(args, db, console),
        Command::Rep(args) => commands::report(args, db, console),
        Command::Other(args) => {
            tracing::debug!(?args, "ignoring unknown command");
            Ok(())
        }
    }
}
