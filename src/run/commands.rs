use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use super::cli::{AddArgs, DelArgs, FilterArgs, ListArgs, RepArgs, UpdArgs};
use super::console::Console;
use crate::db::{Database, Listing};
use crate::error::QueryError;
use crate::models::{parse_date, today, Expense};
use crate::query::{
    ensure_any_column, ensure_compatible, ensure_limit, Changes, DateRange, Filter,
};
use crate::report::{write_csv, Report};

/// Upper bound on categories collected for a single `--categories` filter.
const MAX_CATEGORIES: usize = 256;

pub(crate) fn add<R: BufRead, W: Write>(
    args: &AddArgs,
    db: &Database,
    console: &mut Console<R, W>,
) -> Result<()> {
    if args.date && args.date_filled.is_some() {
        return Err(QueryError::ConflictingFlags("date", "datefilled").into());
    }
    let filled = args.date_filled.as_deref().map(parse_date).transpose()?;

    if args.multiple {
        console.say("Adding expense entries")?;
    } else {
        console.say("Adding expense entry")?;
    }

    loop {
        let name = console.ask("Name")?;
        if name.is_empty() {
            break;
        }
        let category = console.ask("Category")?;
        let value = console.ask_value("Value")?;
        let date = if args.date {
            console.ask_date("Date")?
        } else {
            filled.unwrap_or_else(today)
        };

        let id = db.insert_expense(&Expense::new(name, category, value, date))?;
        tracing::info!(id, "added expense");
        console.say(format!("Added entry with id {id}"))?;

        if !args.multiple {
            break;
        }
    }
    Ok(())
}

pub(crate) fn update<R: BufRead, W: Write>(
    args: &UpdArgs,
    db: &Database,
    console: &mut Console<R, W>,
) -> Result<()> {
    console.say(format!("Updating entry with id {}", args.id))?;
    ensure_any_column(args.name, args.category, args.value, args.date)?;

    let mut changes = Changes::default();
    if args.name {
        changes.name = Some(console.ask("Name")?);
    }
    if args.category {
        changes.category = Some(console.ask("Category")?);
    }
    if args.value {
        changes.value = Some(console.ask_value("Value")?);
    }
    if args.date {
        changes.date = Some(console.ask_date("Date")?);
    }

    let count = db
        .update_expense(args.id, &changes, today())
        .with_context(|| format!("Failed to update entry {}", args.id))?;
    tracing::info!(id = args.id, count, "updated expense");
    console.say(format!("Updated {count} entries"))?;

    match db.get_expense(args.id) {
        Ok(Some(expense)) => {
            console.say(Expense::header())?;
            console.say(expense)?;
        }
        Ok(None) => {}
        Err(e) => tracing::warn!(id = args.id, "could not read back updated entry: {e:#}"),
    }
    Ok(())
}

pub(crate) fn delete<R: BufRead, W: Write>(
    args: &DelArgs,
    db: &Database,
    console: &mut Console<R, W>,
) -> Result<()> {
    console.say(format!("Deleting entry with id {}", args.id))?;
    let count = db
        .delete_expense(args.id)
        .with_context(|| format!("Failed to delete entry {}", args.id))?;
    tracing::info!(id = args.id, count, "deleted expense");
    console.say(format!("Deleted {count} entries"))?;
    Ok(())
}

pub(crate) fn list<R: BufRead, W: Write>(
    args: &ListArgs,
    db: &Database,
    console: &mut Console<R, W>,
) -> Result<()> {
    console.say("Listing expense entries")?;
    ensure_limit(args.limit)?;

    let mut filter = collect_filter(&args.filter, console)?;
    filter.limit = Some(args.limit);

    let listing = db.list_expenses(&filter)?;
    report_skipped(&listing, console)?;

    console.say(Expense::header())?;
    for expense in &listing.expenses {
        console.say(expense)?;
    }
    Ok(())
}

pub(crate) fn report<R: BufRead, W: Write>(
    args: &RepArgs,
    db: &Database,
    console: &mut Console<R, W>,
) -> Result<()> {
    console.say("Reporting expense entries")?;

    let filter = collect_filter(&args.filter, console)?;
    let listing = db.list_expenses(&filter)?;
    report_skipped(&listing, console)?;

    Report::from_expenses(&listing.expenses).render(console.out())?;

    if let Some(path) = &args.csv {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let count = write_csv(file, &listing.expenses)?;
        console.say(format!("Exported {count} entries to {}", path.display()))?;
    }
    Ok(())
}

/// Prompt for the value of every active filter directive. Conflicting
/// directives are rejected before anything is asked.
fn collect_filter<R: BufRead, W: Write>(
    args: &FilterArgs,
    console: &mut Console<R, W>,
) -> Result<Filter> {
    ensure_compatible(args.date, args.date_range, args.category, args.categories)?;

    let mut filter = Filter::default();
    if args.date {
        filter.on_date = Some(console.ask_date("Date")?);
    }
    if args.date_range {
        let from = console.ask_date("Date from")?;
        let to = console.ask_date("Date to")?;
        filter.date_range = Some(DateRange {
            from: Some(from),
            to: Some(to),
        });
    }
    if args.category {
        let category = console.ask("Category")?;
        if !category.is_empty() {
            filter.category = Some(category);
        }
    }
    if args.categories {
        let categories = console.ask_until_empty("Category", MAX_CATEGORIES)?;
        if categories.len() == MAX_CATEGORIES {
            tracing::warn!(max = MAX_CATEGORIES, "category set truncated");
            console.say(format!(
                "Stopped after {MAX_CATEGORIES} categories; remaining input ignored"
            ))?;
        }
        filter.categories = Some(categories);
    }
    Ok(filter)
}

fn report_skipped<R: BufRead, W: Write>(
    listing: &Listing,
    console: &mut Console<R, W>,
) -> Result<()> {
    for err in &listing.skipped {
        console.say(format!("Skipped {err}"))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
