use chrono::NaiveDate;
use rusqlite::types::Value;

use crate::error::QueryError;
use crate::models::format_date;

pub(crate) const SELECT_EXPENSES: &str =
    "SELECT ID, Name, Category, Value, Date, Created, Updated FROM expenses";

/// Inclusive date bounds. Either side may be open.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct DateRange {
    pub(crate) from: Option<NaiveDate>,
    pub(crate) to: Option<NaiveDate>,
}

/// Read-side directives collected from the command line. Every field is
/// optional; an absent field places no constraint on the result.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Filter {
    pub(crate) on_date: Option<NaiveDate>,
    pub(crate) date_range: Option<DateRange>,
    pub(crate) category: Option<String>,
    pub(crate) categories: Option<Vec<String>>,
    pub(crate) limit: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Predicate {
    DateOn(NaiveDate),
    DateFrom(NaiveDate),
    DateTo(NaiveDate),
    Category(String),
    CategoryIn(Vec<String>),
}

/// A complete SELECT with its bound values in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SelectQuery {
    pub(crate) sql: String,
    pub(crate) params: Vec<Value>,
}

/// Reject directive combinations that cannot be satisfied together. Called
/// on the raw flags so nothing is prompted for or queried when they clash.
pub(crate) fn ensure_compatible(
    on_date: bool,
    date_range: bool,
    category: bool,
    categories: bool,
) -> Result<(), QueryError> {
    if on_date && date_range {
        return Err(QueryError::ConflictingFlags("date", "daterange"));
    }
    if category && categories {
        return Err(QueryError::ConflictingFlags("category", "categories"));
    }
    Ok(())
}

pub(crate) fn ensure_limit(limit: i64) -> Result<(), QueryError> {
    if limit <= 0 {
        return Err(QueryError::InvalidLimit(limit));
    }
    Ok(())
}

impl Predicate {
    /// Render this fragment, numbering placeholders after the values
    /// already in `params`.
    fn render(&self, params: &mut Vec<Value>) -> String {
        match self {
            Self::DateOn(d) => bind(params, "Date =", Value::Text(format_date(*d))),
            Self::DateFrom(d) => bind(params, "Date >=", Value::Text(format_date(*d))),
            Self::DateTo(d) => bind(params, "Date <=", Value::Text(format_date(*d))),
            Self::Category(c) => bind(params, "Category =", Value::Text(c.clone())),
            Self::CategoryIn(cs) => {
                let placeholders: Vec<String> = cs
                    .iter()
                    .map(|c| {
                        params.push(Value::Text(c.clone()));
                        format!("?{}", params.len())
                    })
                    .collect();
                format!("Category IN ({})", placeholders.join(", "))
            }
        }
    }
}

fn bind(params: &mut Vec<Value>, lhs: &str, value: Value) -> String {
    params.push(value);
    format!("{lhs} ?{}", params.len())
}

impl Filter {
    pub(crate) fn validate(&self) -> Result<(), QueryError> {
        ensure_compatible(
            self.on_date.is_some(),
            self.date_range.is_some(),
            self.category.is_some(),
            self.categories.is_some(),
        )?;
        if let Some(limit) = self.limit {
            ensure_limit(limit)?;
        }
        Ok(())
    }

    /// Predicates in their fixed evaluation order: exact date, date range,
    /// category, category set.
    pub(crate) fn predicates(&self) -> Vec<Predicate> {
        let mut out = Vec::new();
        if let Some(d) = self.on_date {
            out.push(Predicate::DateOn(d));
        }
        if let Some(range) = &self.date_range {
            if let Some(from) = range.from {
                out.push(Predicate::DateFrom(from));
            }
            if let Some(to) = range.to {
                out.push(Predicate::DateTo(to));
            }
        }
        if let Some(c) = &self.category {
            out.push(Predicate::Category(c.clone()));
        }
        if let Some(cs) = &self.categories {
            if !cs.is_empty() {
                out.push(Predicate::CategoryIn(cs.clone()));
            }
        }
        out
    }

    pub(crate) fn to_query(&self) -> Result<SelectQuery, QueryError> {
        self.validate()?;

        let mut params = Vec::new();
        let clauses: Vec<String> = self
            .predicates()
            .iter()
            .map(|p| p.render(&mut params))
            .collect();

        let mut sql = String::from(SELECT_EXPENSES);
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY Date");
        if let Some(limit) = self.limit {
            params.push(Value::Integer(limit));
            sql.push_str(&format!(" LIMIT ?{}", params.len()));
        }

        Ok(SelectQuery { sql, params })
    }
}

#[cfg(test)]
#[path = "predicate_tests.rs"]
mod tests;
