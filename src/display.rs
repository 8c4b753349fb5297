//! Display line codec used by the presentation layer.
//!
//! Entries render as `"Name : Score"` or `"Name : Score : Grade"`. A selected
//! line can be parsed back into its name and score so it can be edited.

use crate::error::ValidationError;
use crate::gradebook::Gradebook;
use crate::record::{GradeRecord, Score};

pub const SEPARATOR: &str = " : ";

/// Name and score recovered from a display line. Any grade on the line is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayEntry {
    pub name: String,
    pub score: Score,
}

pub fn format_line(name: &str, record: &GradeRecord) -> String {
    match record.grade {
        Some(grade) => format!("{name}{SEPARATOR}{}{SEPARATOR}{grade}", record.score),
        None => format!("{name}{SEPARATOR}{}", record.score),
    }
}

/// All entries as display lines, sorted by line text.
pub fn display_lines(book: &Gradebook) -> Vec<String> {
    let mut lines: Vec<String> = book
        .iter()
        .map(|(name, record)| format_line(name, record))
        .collect();
    lines.sort();
    lines
}

/// The name portion of a display line.
pub fn line_name(line: &str) -> &str {
    line.split(SEPARATOR).next().unwrap_or(line)
}

pub fn parse_line(line: &str) -> Result<DisplayEntry, ValidationError> {
    let mut fields = line.split(SEPARATOR);
    let (Some(name), Some(score)) = (fields.next(), fields.next()) else {
        return Err(ValidationError::MalformedLine(line.to_string()));
    };
    if name.is_empty() {
        return Err(ValidationError::MalformedLine(line.to_string()));
    }

    Ok(DisplayEntry {
        name: name.to_string(),
        score: Score::parse(score)?,
    })
}
