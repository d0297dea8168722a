use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::io::Write;

use crate::models::{format_date, Expense};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryTotal {
    pub(crate) category: String,
    pub(crate) count: usize,
    pub(crate) total: Decimal,
}

/// Per-category totals over a set of expenses, ordered by category name.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Report {
    pub(crate) categories: Vec<CategoryTotal>,
    pub(crate) count: usize,
    pub(crate) total: Decimal,
}

impl Report {
    pub(crate) fn from_expenses(expenses: &[Expense]) -> Self {
        let mut by_category: BTreeMap<&str, (usize, Decimal)> = BTreeMap::new();
        for e in expenses {
            let entry = by_category
                .entry(e.category.as_str())
                .or_insert((0, Decimal::ZERO));
            entry.0 += 1;
            entry.1 += e.value;
        }

        let categories: Vec<CategoryTotal> = by_category
            .into_iter()
            .map(|(category, (count, total))| CategoryTotal {
                category: category.to_string(),
                count,
                total,
            })
            .collect();

        Self {
            count: expenses.len(),
            total: categories.iter().map(|c| c.total).sum(),
            categories,
        }
    }

    pub(crate) fn render<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, " {:<20} | {:>5} | {:>10}", "Category", "Count", "Total")?;
        writeln!(out, "{}", "─".repeat(43))?;
        for c in &self.categories {
            let label = if c.category.is_empty() {
                "(none)"
            } else {
                c.category.as_str()
            };
            let total = format!("{:.2}", c.total);
            writeln!(out, " {label:<20} | {:>5} | {total:>10}", c.count)?;
        }
        writeln!(out, "{}", "─".repeat(43))?;
        let total = format!("{:.2}", self.total);
        writeln!(out, " {:<20} | {:>5} | {total:>10}", "Total", self.count)?;
        Ok(())
    }
}

/// Write the given expenses as CSV with a header row.
pub(crate) fn write_csv<W: Write>(writer: W, expenses: &[Expense]) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["ID", "Name", "Category", "Value", "Date", "Created", "Updated"])
        .context("Failed to write CSV header")?;
    for e in expenses {
        wtr.write_record([
            e.id.unwrap_or(0).to_string(),
            e.name.clone(),
            e.category.clone(),
            e.value.to_string(),
            format_date(e.date),
            format_date(e.created),
            format_date(e.updated),
        ])
        .context("Failed to write CSV record")?;
    }
    wtr.flush().context("Failed to flush CSV output")?;
    Ok(expenses.len())
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
