use chrono::NaiveDate;
use rust_decimal::Decimal;
use rusqlite::types::Value;

use crate::error::QueryError;
use crate::models::format_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Column {
    Name,
    Category,
    Value,
    Date,
    Updated,
}

impl Column {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Category => "Category",
            Self::Value => "Value",
            Self::Date => "Date",
            Self::Updated => "Updated",
        }
    }
}

/// New values for the columns selected on the command line. `None` leaves
/// the stored column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Changes {
    pub(crate) name: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) value: Option<Decimal>,
    pub(crate) date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Assignment {
    pub(crate) column: Column,
    pub(crate) value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct UpdateStatement {
    pub(crate) sql: String,
    pub(crate) params: Vec<Value>,
}

pub(crate) fn ensure_any_column(
    name: bool,
    category: bool,
    value: bool,
    date: bool,
) -> Result<(), QueryError> {
    if !(name || category || value || date) {
        return Err(QueryError::NoColumns);
    }
    Ok(())
}

impl Changes {
    pub(crate) fn is_empty(&self) -> bool {
        self.name.is_none() && self.category.is_none() && self.value.is_none() && self.date.is_none()
    }

    /// Assignments for every supplied column followed by the `Updated` stamp.
    pub(crate) fn assignments(&self, today: NaiveDate) -> Result<Vec<Assignment>, QueryError> {
        if self.is_empty() {
            return Err(QueryError::NoColumns);
        }

        let mut out = Vec::with_capacity(5);
        if let Some(name) = &self.name {
            out.push(Assignment {
                column: Column::Name,
                value: Value::Text(name.clone()),
            });
        }
        if let Some(category) = &self.category {
            out.push(Assignment {
                column: Column::Category,
                value: Value::Text(category.clone()),
            });
        }
        if let Some(value) = self.value {
            out.push(Assignment {
                column: Column::Value,
                value: Value::Text(value.to_string()),
            });
        }
        if let Some(date) = self.date {
            out.push(Assignment {
                column: Column::Date,
                value: Value::Text(format_date(date)),
            });
        }
        out.push(Assignment {
            column: Column::Updated,
            value: Value::Text(format_date(today)),
        });
        Ok(out)
    }

    pub(crate) fn to_statement(
        &self,
        id: i64,
        today: NaiveDate,
    ) -> Result<UpdateStatement, QueryError> {
        let assignments = self.assignments(today)?;

        let set: Vec<String> = assignments
            .iter()
            .enumerate()
            .map(|(i, a)| format!("{} = ?{}", a.column.as_str(), i + 1))
            .collect();
        let mut params: Vec<Value> = assignments.into_iter().map(|a| a.value).collect();
        params.push(Value::Integer(id));

        let sql = format!(
            "UPDATE expenses SET {} WHERE ID = ?{}",
            set.join(", "),
            params.len()
        );
        Ok(UpdateStatement { sql, params })
    }
}

#[cfg(test)]
#[path = "mutation_tests.rs"]
mod tests;
