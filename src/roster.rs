//! CSV persistence for the gradebook.
//!
//! Files carry a `Name,Score,Grade` header. Loading is permissive: rows that
//! lack a name or a usable score are skipped rather than failing the load.

use std::fs::File;
use std::io;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{GradebookError, Result};
use crate::gradebook::Gradebook;
use crate::record::{Grade, GradeRecord, Score};

pub const HEADER: [&str; 3] = ["Name", "Score", "Grade"];

/// A row as it appears on disk, before validation.
#[derive(Debug, Default)]
struct RawRow<'r> {
    name: Option<&'r str>,
    score: Option<&'r str>,
    grade: Option<&'r str>,
}

#[derive(Debug, Serialize)]
struct RosterRow<'a> {
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Score")]
    score: u8,
    #[serde(rename = "Grade")]
    grade: &'a str,
}

/// Column positions resolved from the header row. Any column may be absent.
#[derive(Debug, Default)]
struct Columns {
    name: Option<usize>,
    score: Option<usize>,
    grade: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let find = |wanted: &str| headers.iter().position(|h| h == wanted);
        Columns {
            name: find(HEADER[0]),
            score: find(HEADER[1]),
            grade: find(HEADER[2]),
        }
    }

    fn row<'r>(&self, record: &'r StringRecord) -> RawRow<'r> {
        let field = |idx: Option<usize>| idx.and_then(|i| record.get(i));
        RawRow {
            name: field(self.name),
            score: field(self.score),
            grade: field(self.grade),
        }
    }
}

/// Converts a raw row into an entry, or `None` if the row should be skipped.
fn parse_row(line: u64, row: RawRow<'_>) -> Option<(String, GradeRecord)> {
    let (Some(name), Some(score)) = (row.name, row.score) else {
        debug!(line, "Skipping row without name or score");
        return None;
    };
    if name.is_empty() || score.trim().is_empty() {
        debug!(line, "Skipping row without name or score");
        return None;
    }

    let score = match Score::parse(score) {
        Ok(score) => score,
        Err(e) => {
            warn!(line, name, error = %e, "Skipping row with invalid score");
            return None;
        }
    };

    let mut record = GradeRecord::new(score);
    match row.grade.map(str::trim) {
        None | Some("") => {}
        Some(letter) => match letter.parse::<Grade>() {
            Ok(grade) => record.grade = Some(grade),
            Err(e) => warn!(line, name, error = %e, "Dropping unrecognized grade"),
        },
    }

    Some((name.to_string(), record))
}

/// Reads a roster from any CSV source. Stored grades are kept, not recomputed.
pub fn read_from<R: io::Read>(reader: R) -> std::result::Result<Gradebook, csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = Columns::from_headers(rdr.headers()?);
    let mut records = IndexMap::new();
    let mut skipped = 0usize;

    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        match parse_row(line, columns.row(&record)) {
            Some((name, entry)) => {
                records.insert(name, entry);
            }
            None => skipped += 1,
        }
    }

    debug!(rows = records.len(), skipped, "Roster parsed");
    Ok(Gradebook::from_records(records))
}

/// Writes `book` as CSV in its current iteration order. Does not regrade.
pub fn write_to<W: io::Write>(book: &Gradebook, writer: W) -> std::result::Result<(), csv::Error> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    wtr.write_record(HEADER)?;
    for (name, record) in book.iter() {
        wtr.serialize(RosterRow {
            name,
            score: record.score.value(),
            grade: record.grade.map(Grade::as_str).unwrap_or(""),
        })?;
    }
    wtr.flush()?;

    Ok(())
}

/// Loads a roster file from disk.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load(path: &Path) -> Result<Gradebook> {
    let file = File::open(path).map_err(|e| GradebookError::io(path, e))?;
    let book = read_from(file).map_err(|e| GradebookError::csv(path, e))?;

    info!(entries = book.len(), "Gradebook loaded");
    Ok(book)
}

/// Replaces the contents of `book` with the roster at `path`.
///
/// On failure `book` is left exactly as it was.
pub fn load_into(book: &mut Gradebook, path: &Path) -> Result<()> {
    let loaded = load(path)?;
    book.clear();
    book.replace(loaded);
    Ok(())
}

/// Like [`load`], but a file that does not exist yet yields an empty gradebook.
pub fn load_or_default(path: &Path) -> Result<Gradebook> {
    match load(path) {
        Err(GradebookError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "No roster file yet, starting empty");
            Ok(Gradebook::new())
        }
        other => other,
    }
}

/// Regrades `book` and writes it to `path`.
#[tracing::instrument(skip_all, fields(path = %path.display(), entries = book.len()))]
pub fn save(book: &mut Gradebook, path: &Path) -> Result<()> {
    book.recompute();

    let file = File::create(path).map_err(|e| GradebookError::io(path, e))?;
    write_to(book, file).map_err(|e| GradebookError::csv(path, e))?;

    info!("Gradebook saved");
    Ok(())
}
