//! Output formatting for the gradebook.
//!
//! Supports the sorted display listing, debug pretty-printing, and a JSON report.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::display::display_lines;
use crate::gradebook::Gradebook;
use crate::record::{Grade, Score};

/// One row of the JSON report.
#[derive(Debug, Serialize)]
pub struct ReportEntry<'a> {
    pub name: &'a str,
    pub score: Score,
    pub grade: Option<Grade>,
}

/// Snapshot of the whole roster, in insertion order.
#[derive(Debug, Serialize)]
pub struct RosterReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub high_score: Option<Score>,
    pub entries: Vec<ReportEntry<'a>>,
}

impl<'a> RosterReport<'a> {
    pub fn from_book(book: &'a Gradebook) -> Self {
        RosterReport {
            generated_at: Utc::now(),
            high_score: book.high_score(),
            entries: book
                .iter()
                .map(|(name, record)| ReportEntry {
                    name,
                    score: record.score,
                    grade: record.grade,
                })
                .collect(),
        }
    }
}

/// Logs the gradebook using Rust's debug pretty-print format.
pub fn print_pretty(book: &Gradebook) {
    debug!("{:#?}", book);
}

/// Writes one display line per entry, sorted.
pub fn write_lines<W: Write>(out: &mut W, book: &Gradebook) -> Result<()> {
    for line in display_lines(book) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Writes the roster as a pretty-printed JSON report.
pub fn write_json<W: Write>(out: &mut W, book: &Gradebook) -> Result<()> {
    let report = RosterReport::from_book(book);
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Gradebook {
        let mut book = Gradebook::new();
        book.add("Bob", "80").unwrap();
        book.add("Alice", "95").unwrap();
        book
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&sample());
    }

    #[test]
    fn test_write_lines_sorted() {
        let mut buf = Vec::new();
        write_lines(&mut buf, &sample()).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "Alice : 95 : A\nBob : 80 : B\n");
    }

    #[test]
    fn test_write_lines_empty() {
        let mut buf = Vec::new();
        write_lines(&mut buf, &Gradebook::new()).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_write_json_report() {
        let mut buf = Vec::new();
        write_json(&mut buf, &sample()).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["high_score"], 95);
        assert_eq!(value["entries"][0]["name"], "Bob");
        assert_eq!(value["entries"][0]["grade"], "B");
        assert_eq!(value["entries"][1]["score"], 95);
        assert!(value["generated_at"].is_string());
    }
}
