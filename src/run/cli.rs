use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Flag names that may also be written with a single dash, e.g. `-datefilled`
/// or `-df`.
const LONG_FLAGS: &[&str] = &[
    "multiple",
    "date",
    "datefilled",
    "df",
    "id",
    "name",
    "category",
    "value",
    "daterange",
    "dr",
    "categories",
    "cs",
    "limit",
    "csv",
    "db",
    "log-level",
];

#[derive(Parser, Debug)]
#[command(name = "expenses")]
#[command(about = "Personal expense ledger", version)]
pub(crate) struct Cli {
    /// Database file (defaults to expenses.db in the user data directory).
    #[arg(long, global = true, env = "EXPENSES_DB", value_name = "PATH")]
    pub(crate) db: Option<PathBuf>,

    /// Log filter, e.g. `info` or `expenses=debug`.
    #[arg(
        long,
        global = true,
        env = "EXPENSES_LOG",
        default_value = "warn",
        value_name = "FILTER"
    )]
    pub(crate) log_level: String,

    #[command(subcommand)]
    pub(crate) command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Add expense entries
    Add(AddArgs),
    /// Update columns of an entry
    Upd(UpdArgs),
    /// Delete an entry
    Del(DelArgs),
    /// List entries
    List(ListArgs),
    /// Summarize entries by category
    Rep(RepArgs),
    #[command(external_subcommand)]
    Other(Vec<String>),
}

impl Command {
    /// Unknown subcommands are a no-op and must not create the data
    /// directory, log file or database.
    pub(crate) fn needs_ledger(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct AddArgs {
    /// Keep prompting for entries until an empty name is entered
    #[arg(short, long)]
    pub(crate) multiple: bool,

    /// Prompt for the date (when the expense is not from today)
    #[arg(short, long)]
    pub(crate) date: bool,

    /// Use this date (YYYY-MM-DD) for the entries
    #[arg(long = "datefilled", visible_alias = "df", value_name = "DATE")]
    pub(crate) date_filled: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct UpdArgs {
    /// ID of the entry to update
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) id: i64,

    /// Prompt for a new name
    #[arg(short, long)]
    pub(crate) name: bool,

    /// Prompt for a new category
    #[arg(short, long)]
    pub(crate) category: bool,

    /// Prompt for a new value
    #[arg(short, long)]
    pub(crate) value: bool,

    /// Prompt for a new date
    #[arg(short, long)]
    pub(crate) date: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DelArgs {
    /// ID of the entry to delete
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) id: i64,
}

#[derive(Args, Debug, Default)]
pub(crate) struct FilterArgs {
    /// Prompt for a single date
    #[arg(short, long)]
    pub(crate) date: bool,

    /// Prompt for a date range
    #[arg(long = "daterange", visible_alias = "dr")]
    pub(crate) date_range: bool,

    /// Prompt for a single category
    #[arg(short, long)]
    pub(crate) category: bool,

    /// Prompt for categories until an empty line
    #[arg(long, visible_alias = "cs")]
    pub(crate) categories: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ListArgs {
    #[command(flatten)]
    pub(crate) filter: FilterArgs,

    /// Maximum number of entries to print
    #[arg(short, long, default_value_t = 100, allow_negative_numbers = true)]
    pub(crate) limit: i64,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RepArgs {
    #[command(flatten)]
    pub(crate) filter: FilterArgs,

    /// Also write the matching entries to this CSV file
    #[arg(long, value_name = "PATH")]
    pub(crate) csv: Option<PathBuf>,
}

/// Rewrite single-dash spellings of multi-letter flags (`-df`, `-limit=5`)
/// to their double-dash form so clap can parse them.
pub(crate) fn normalize_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    args.into_iter()
        .map(|arg| {
            let Some(rest) = arg.strip_prefix('-') else {
                return arg;
            };
            if rest.starts_with('-') {
                return arg;
            }
            let name = rest.split_once('=').map_or(rest, |(n, _)| n);
            if name.len() > 1 && LONG_FLAGS.contains(&name) {
                format!("-{arg}")
            } else {
                arg
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
