mod expense;

pub use expense::{format_date, parse_date, parse_value, today, Expense};
