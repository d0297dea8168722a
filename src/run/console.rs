use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt::Display;
use std::io::{BufRead, Write};

use crate::models::{parse_date, parse_value};

/// Line-oriented prompting over any reader/writer pair. End of input reads
/// as an empty line.
pub(crate) struct Console<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub(crate) fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    pub(crate) fn out(&mut self) -> &mut W {
        &mut self.out
    }

    pub(crate) fn say(&mut self, line: impl Display) -> Result<()> {
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    pub(crate) fn ask(&mut self, label: &str) -> Result<String> {
        write!(self.out, "{:<10}", format!("{label}:"))?;
        self.out.flush()?;

        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .with_context(|| format!("Failed to read {label}"))?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    pub(crate) fn ask_date(&mut self, label: &str) -> Result<NaiveDate> {
        let raw = self.ask(label)?;
        Ok(parse_date(&raw)?)
    }

    pub(crate) fn ask_value(&mut self, label: &str) -> Result<Decimal> {
        let raw = self.ask(label)?;
        Ok(parse_value(&raw)?)
    }

    /// Ask repeatedly until an empty line, collecting at most `max` entries.
    pub(crate) fn ask_until_empty(&mut self, label: &str, max: usize) -> Result<Vec<String>> {
        let mut entries = Vec::new();
        while entries.len() < max {
            let entry = self.ask(label)?;
            if entry.is_empty() {
                break;
            }
            entries.push(entry);
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_ask_strips_line_endings() {
        let mut c = console("Coffee\r\nfood\n");
        assert_eq!(c.ask("Name").unwrap(), "Coffee");
        assert_eq!(c.ask("Category").unwrap(), "food");
        let shown = String::from_utf8(c.out().clone()).unwrap();
        assert_eq!(shown, "Name:     Category: ");
    }

    #[test]
    fn test_ask_at_eof_is_empty() {
        let mut c = console("");
        assert_eq!(c.ask("Name").unwrap(), "");
    }

    #[test]
    fn test_ask_date_and_value() {
        let mut c = console("2024-01-15\n3.50\nnope\n");
        assert_eq!(
            c.ask_date("Date").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert_eq!(c.ask_value("Value").unwrap(), Decimal::new(350, 2));
        assert!(c.ask_value("Value").is_err());
    }

    #[test]
    fn test_ask_until_empty() {
        let mut c = console("food\ntransport\n\nignored\n");
        assert_eq!(
            c.ask_until_empty("Category", 10).unwrap(),
            vec!["food", "transport"]
        );
    }

    #[test]
    fn test_ask_until_empty_is_bounded() {
        let mut c = console("a\nb\nc\n");
        assert_eq!(c.ask_until_empty("Category", 2).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_ask_until_empty_at_eof() {
        let mut c = console("food\n");
        assert_eq!(c.ask_until_empty("Category", 10).unwrap(), vec!["food"]);
    }
}
