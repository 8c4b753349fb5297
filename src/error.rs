use std::path::PathBuf;

use thiserror::Error;

/// Rejected user input. The gradebook is never mutated when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter your name and your score")]
    MissingField,

    #[error("Score must be a number: {0:?}")]
    NotANumber(String),

    #[error("Score must be between 0 and 100, got {0}")]
    OutOfRange(i64),

    #[error("Please select a line to {0}")]
    NoSelection(&'static str),

    #[error("Malformed display line: {0:?}")]
    MalformedLine(String),
}

#[derive(Debug, Error)]
pub enum GradebookError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl GradebookError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GradebookError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        GradebookError::Csv {
            path: path.into(),
            source,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, GradebookError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, GradebookError>;
