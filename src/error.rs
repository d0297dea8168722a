//! Typed errors raised by the ledger core.
//!
//! - [`QueryError`] covers everything detected before the database is
//!   touched: conflicting directives, a bad limit, an empty update and
//!   unparseable user input.
//! - [`RowError`] describes a single stored row that could not be turned back
//!   into an [`Expense`](crate::models::Expense).
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum QueryError {
    #[error("Can't have `{0}` and `{1}` flags both present")]
    ConflictingFlags(&'static str, &'static str),
    #[error("Limit flag must be > 0, but entered {0}")]
    InvalidLimit(i64),
    #[error("No columns were passed (expected at least one of --name, --category, --value, --date)")]
    NoColumns,
    #[error("Invalid date '{input}': {reason} (expected YYYY-MM-DD)")]
    InvalidDate { input: String, reason: String },
    #[error("Invalid value '{0}': expected a decimal number")]
    InvalidValue(String),
}

#[derive(Error, Debug)]
pub enum RowError {
    #[error("row could not be read: {0}")]
    Scan(#[from] rusqlite::Error),
    #[error("row {id}: invalid value '{raw}'")]
    Value { id: i64, raw: String },
    #[error("row {id}: invalid {column} '{raw}'")]
    Date {
        id: i64,
        column: &'static str,
        raw: String,
    },
}
