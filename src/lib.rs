pub mod config;
pub mod curve;
pub mod display;
pub mod error;
pub mod gradebook;
pub mod output;
pub mod record;
pub mod roster;

pub use error::{GradebookError, Result, ValidationError};
pub use gradebook::Gradebook;
pub use record::{Grade, GradeRecord, Score};
