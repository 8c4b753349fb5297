//! Curve grading relative to the highest score on the roster.

use indexmap::IndexMap;

use crate::record::{Grade, GradeRecord, Score};

/// Width of each letter band below the high score.
pub const BAND_WIDTH: i16 = 10;

/// Converts a score into a letter given the current high score.
///
/// | Distance below high | Grade |
/// |---------------------|-------|
/// | <= 10               | A     |
/// | <= 20               | B     |
/// | <= 30               | C     |
/// | <= 40               | D     |
/// | > 40                | F     |
pub fn letter(score: Score, high: Score) -> Grade {
    let score = i16::from(score.value());
    let high = i16::from(high.value());
    match score {
        s if s >= high - BAND_WIDTH => Grade::A,
        s if s >= high - 2 * BAND_WIDTH => Grade::B,
        s if s >= high - 3 * BAND_WIDTH => Grade::C,
        s if s >= high - 4 * BAND_WIDTH => Grade::D,
        _ => Grade::F,
    }
}

/// Highest score among `records`, or `None` when there are none.
pub fn high_score<'a>(records: impl IntoIterator<Item = &'a GradeRecord>) -> Option<Score> {
    records.into_iter().map(|r| r.score).max()
}

/// Reassigns every record's grade from the current high score. No-op when empty.
pub fn recompute(records: &mut IndexMap<String, GradeRecord>) {
    let Some(high) = high_score(records.values()) else {
        return;
    };

    for record in records.values_mut() {
        record.grade = Some(letter(record.score, high));
    }
}
