use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use std::sync::LazyLock;

use crate::error::QueryError;

/// Storage and display format shared by every date column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: Option<i64>,
    pub name: String,
    pub category: String,
    pub value: Decimal,
    pub date: NaiveDate,
    pub created: NaiveDate,
    pub updated: NaiveDate,
}

impl Expense {
    /// An unsaved expense stamped with today's date as created and updated.
    pub fn new(name: String, category: String, value: Decimal, date: NaiveDate) -> Self {
        let today = today();
        Self {
            id: None,
            name,
            category,
            value,
            date,
            created: today,
            updated: today,
        }
    }

    /// Column header matching the widths used by `Display`.
    pub fn header() -> String {
        format!(
            " {:>3} | {:>15} | {:>15} | {:>7} | {:>10} | {:>10} | {:>10}",
            "ID", "Name", "Category", "Value", "Date", "Created", "Updated"
        )
    }
}

impl std::fmt::Display for Expense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = format!("{:.2}", self.value);
        write!(
            f,
            "#{:03} | {:>15} | {:>15} | {:>7} | {} | {} | {}",
            self.id.unwrap_or(0),
            self.name,
            self.category,
            value,
            format_date(self.date),
            format_date(self.created),
            format_date(self.updated),
        )
    }
}

/// Current calendar date in UTC.
pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(s: &str) -> Result<NaiveDate, QueryError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| QueryError::InvalidDate {
        input: s.to_string(),
        reason: e.to_string(),
    })
}

/// Optional sign, optional leading `$`, then either plain digits or digits in
/// comma-separated groups of three, then an optional fraction.
static AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([-+]?)\$?((?:[0-9]{1,3}(?:,[0-9]{3})+|[0-9]*)(?:\.[0-9]+)?)$")
        .unwrap_or_else(|_| unreachable!("amount pattern is valid"))
});

/// Parse a user-entered amount such as `3.50`, `-$12` or `$1,234.56`. A comma
/// is only accepted as a thousands separator and `$` only as a prefix.
pub fn parse_value(s: &str) -> Result<Decimal, QueryError> {
    let invalid = || QueryError::InvalidValue(s.to_string());
    let trimmed = s.trim();
    let caps = AMOUNT.captures(trimmed).ok_or_else(invalid)?;
    let digits = caps[2].replace(',', "");
    if !digits.bytes().any(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let value = digits.parse::<Decimal>().map_err(|_| invalid())?;
    Ok(if &caps[1] == "-" { -value } else { value })
}
