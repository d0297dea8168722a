mod schema;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::types::ValueRef;
use rusqlite::{params, params_from_iter, Connection, Row};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::error::RowError;
use crate::models::{format_date, parse_date, Expense};
use crate::query::{Changes, Filter, SELECT_EXPENSES};

/// Rows returned by a listing, plus the rows that could not be mapped.
#[derive(Debug, Default)]
pub(crate) struct Listing {
    pub(crate) expenses: Vec<Expense>,
    pub(crate) skipped: Vec<RowError>,
}

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        let db = Self { conn };
        db.bootstrap().context("Failed to create expenses table")?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.bootstrap()?;
        Ok(db)
    }

    fn bootstrap(&self) -> Result<()> {
        self.conn.execute_batch(schema::SCHEMA)?;
        Ok(())
    }

    pub(crate) fn insert_expense(&self, expense: &Expense) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO expenses (Name, Category, Value, Date, Created, Updated)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                expense.name,
                expense.category,
                expense.value.to_string(),
                format_date(expense.date),
                format_date(expense.created),
                format_date(expense.updated),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, name = %expense.name, "inserted expense");
        Ok(id)
    }

    /// Apply `changes` to the row with `id`. Returns the number of rows
    /// changed, which is zero when no such row exists.
    pub(crate) fn update_expense(
        &self,
        id: i64,
        changes: &Changes,
        today: NaiveDate,
    ) -> Result<usize> {
        let stmt = changes.to_statement(id, today)?;
        let count = self
            .conn
            .execute(&stmt.sql, params_from_iter(stmt.params.iter()))?;
        tracing::debug!(id, count, "updated expense");
        Ok(count)
    }

    pub(crate) fn delete_expense(&self, id: i64) -> Result<usize> {
        let count = self
            .conn
            .execute("DELETE FROM expenses WHERE ID = ?1", params![id])?;
        tracing::debug!(id, count, "deleted expense");
        Ok(count)
    }

    pub(crate) fn get_expense(&self, id: i64) -> Result<Option<Expense>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_EXPENSES} WHERE ID = ?1"))?;
        let mut rows = stmt.query(params![id])?;
        let expense = match rows.next()? {
            Some(row) => Some(map_row(row)?),
            None => None,
        };
        Ok(expense)
    }

    /// Run the query described by `filter`. A row that fails to map is
    /// reported in [`Listing::skipped`] and does not stop the rest.
    pub(crate) fn list_expenses(&self, filter: &Filter) -> Result<Listing> {
        let query = filter.to_query()?;
        tracing::debug!(sql = %query.sql, params = query.params.len(), "listing expenses");

        let mut stmt = self.conn.prepare(&query.sql)?;
        let mut rows = stmt.query(params_from_iter(query.params.iter()))?;

        let mut listing = Listing::default();
        while let Some(row) = rows.next()? {
            match map_row(row) {
                Ok(expense) => listing.expenses.push(expense),
                Err(e) => {
                    tracing::warn!("skipping row: {e}");
                    listing.skipped.push(e);
                }
            }
        }
        Ok(listing)
    }
}

fn map_row(row: &Row<'_>) -> std::result::Result<Expense, RowError> {
    let id: i64 = row.get(0)?;
    Ok(Expense {
        id: Some(id),
        name: row.get(1)?,
        category: row.get(2)?,
        value: read_value(row, 3, id)?,
        date: read_date(row, 4, "Date", id)?,
        created: read_date(row, 5, "Created", id)?,
        updated: read_date(row, 6, "Updated", id)?,
    })
}

/// Values are written as decimal text; older ledgers stored them as REAL.
fn read_value(row: &Row<'_>, idx: usize, id: i64) -> std::result::Result<Decimal, RowError> {
    let invalid = |raw: String| RowError::Value { id, raw };
    match row.get_ref(idx)? {
        ValueRef::Text(bytes) => {
            let raw = String::from_utf8_lossy(bytes);
            Decimal::from_str(raw.trim()).map_err(|_| invalid(raw.into_owned()))
        }
        ValueRef::Real(f) => Decimal::from_f64(f).ok_or_else(|| invalid(f.to_string())),
        ValueRef::Integer(i) => Ok(Decimal::from(i)),
        ValueRef::Null => Err(invalid("NULL".into())),
        ValueRef::Blob(_) => Err(invalid("<blob>".into())),
    }
}

fn read_date(
    row: &Row<'_>,
    idx: usize,
    column: &'static str,
    id: i64,
) -> std::result::Result<NaiveDate, RowError> {
    let raw: String = row.get(idx)?;
    parse_date(&raw).map_err(|_| RowError::Date { id, column, raw })
}
