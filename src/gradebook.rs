//! The in-memory gradebook model.
//!
//! [`Gradebook`] owns an insertion-ordered map from student name to
//! [`GradeRecord`]. Every mutating operation validates its input before
//! touching the map and re-runs the curve afterwards, so grades always agree
//! with the current high score.

use indexmap::IndexMap;
use tracing::debug;

use crate::curve;
use crate::display::line_name;
use crate::error::{Result, ValidationError};
use crate::record::{GradeRecord, Score};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gradebook {
    records: IndexMap<String, GradeRecord>,
}

/// Trims raw name/score text and validates it into a key and a [`Score`].
pub fn validate_entry(
    name: &str,
    score: &str,
) -> std::result::Result<(String, Score), ValidationError> {
    let name = name.trim();
    let score = score.trim();

    if name.is_empty() || score.is_empty() {
        return Err(ValidationError::MissingField);
    }

    Ok((name.to_string(), Score::parse(score)?))
}

impl Gradebook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a gradebook from already-validated records without running the curve.
    pub fn from_records(records: IndexMap<String, GradeRecord>) -> Self {
        Self { records }
    }

    /// Inserts or overwrites `name` with a fresh, ungraded record, then regrades.
    pub fn add(&mut self, name: &str, score: &str) -> Result<()> {
        let (name, score) = validate_entry(name, score)?;
        debug!(name = %name, score = score.value(), "Adding entry");

        self.records.insert(name, GradeRecord::new(score));
        self.recompute();
        Ok(())
    }

    /// Replaces the entry at `old_name` with `new_name`/`new_score`, then regrades.
    ///
    /// A missing `old_name` is not an error; the new entry is inserted anyway.
    pub fn edit(&mut self, old_name: &str, new_name: &str, new_score: &str) -> Result<()> {
        let (new_name, score) = validate_entry(new_name, new_score)?;
        debug!(old_name, new_name = %new_name, score = score.value(), "Editing entry");

        if old_name != new_name {
            self.records.shift_remove(old_name);
        }
        self.records.insert(new_name, GradeRecord::new(score));
        self.recompute();
        Ok(())
    }

    /// Removes `name` if present, then regrades.
    pub fn delete(&mut self, name: &str) {
        if self.records.shift_remove(name).is_some() {
            debug!(name, "Deleted entry");
        }
        self.recompute();
    }

    /// Edits the entry named by the currently selected display line.
    pub fn edit_selected(
        &mut self,
        selection: Option<&str>,
        new_name: &str,
        new_score: &str,
    ) -> Result<()> {
        let line = selection.ok_or(ValidationError::NoSelection("edit"))?;
        self.edit(line_name(line), new_name, new_score)
    }

    /// Deletes the entry named by the currently selected display line.
    pub fn delete_selected(&mut self, selection: Option<&str>) -> Result<()> {
        let line = selection.ok_or(ValidationError::NoSelection("delete"))?;
        self.delete(line_name(line));
        Ok(())
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Swaps in a whole new roster. Grades are kept as given.
    pub fn replace(&mut self, other: Gradebook) {
        self.records = other.records;
    }

    pub fn recompute(&mut self) {
        curve::recompute(&mut self.records);
    }

    pub fn get(&self, name: &str) -> Option<&GradeRecord> {
        self.records.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn high_score(&self) -> Option<Score> {
        curve::high_score(self.records.values())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GradeRecord)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GradebookError;
    use crate::record::Grade;

    fn names(book: &Gradebook) -> Vec<&str> {
        book.iter().map(|(name, _)| name).collect()
    }

    fn validation(result: Result<()>) -> ValidationError {
        match result {
            Err(GradebookError::Validation(e)) => e,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_add_valid_entry() {
        let mut book = Gradebook::new();
        book.add("  Alice ", " 95 ").unwrap();

        assert_eq!(book.len(), 1);
        let record = book.get("Alice").unwrap();
        assert_eq!(record.score.value(), 95);
        assert_eq!(record.grade, Some(Grade::A));
    }

    #[test]
    fn test_add_overwrites_in_place() {
        let mut book = Gradebook::new();
        book.add("Alice", "95").unwrap();
        book.add("Bob", "80").unwrap();
        book.add("Alice", "50").unwrap();

        assert_eq!(book.len(), 2);
        assert_eq!(names(&book), vec!["Alice", "Bob"]);
        assert_eq!(book.get("Alice").unwrap().score.value(), 50);
        assert_eq!(book.get("Alice").unwrap().grade, Some(Grade::C));
        assert_eq!(book.get("Bob").unwrap().grade, Some(Grade::A));
    }

    #[test]
    fn test_add_rejects_invalid_input() {
        let mut book = Gradebook::new();
        book.add("Alice", "95").unwrap();
        let before = book.clone();

        assert_eq!(validation(book.add("", "90")), ValidationError::MissingField);
        assert_eq!(validation(book.add("Bob", " ")), ValidationError::MissingField);
        assert_eq!(
            validation(book.add("Bob", "abc")),
            ValidationError::NotANumber("abc".to_string())
        );
        assert_eq!(
            validation(book.add("Bob", "101")),
            ValidationError::OutOfRange(101)
        );
        assert_eq!(
            validation(book.add("Bob", "-3")),
            ValidationError::OutOfRange(-3)
        );

        assert_eq!(book, before);
    }

    #[test]
    fn test_curve_example() {
        let mut book = Gradebook::new();
        book.add("Alice", "95").unwrap();
        book.add("Bob", "80").unwrap();

        assert_eq!(book.high_score().unwrap().value(), 95);
        assert_eq!(book.get("Alice").unwrap().grade, Some(Grade::A));
        assert_eq!(book.get("Bob").unwrap().grade, Some(Grade::B));
    }

    #[test]
    fn test_edit_renames() {
        let mut book = Gradebook::new();
        book.add("Alice", "95").unwrap();
        book.add("Bob", "80").unwrap();
        book.add("Cara", "70").unwrap();

        book.edit("Alice", "Alicia", "60").unwrap();

        assert!(!book.contains("Alice"));
        assert_eq!(names(&book), vec!["Bob", "Cara", "Alicia"]);
        // Bob is now the top score
        assert_eq!(book.get("Bob").unwrap().grade, Some(Grade::A));
        assert_eq!(book.get("Alicia").unwrap().grade, Some(Grade::B));
    }

    #[test]
    fn test_edit_same_name_updates_score() {
        let mut book = Gradebook::new();
        book.add("Alice", "95").unwrap();
        book.add("Bob", "80").unwrap();

        book.edit("Bob", "Bob", "99").unwrap();

        assert_eq!(names(&book), vec!["Alice", "Bob"]);
        assert_eq!(book.get("Bob").unwrap().score.value(), 99);
    }

    #[test]
    fn test_edit_missing_old_name_inserts() {
        let mut book = Gradebook::new();
        book.edit("Ghost", "Dana", "88").unwrap();
        assert_eq!(book.get("Dana").unwrap().score.value(), 88);
    }

    #[test]
    fn test_edit_invalid_leaves_book_unchanged() {
        let mut book = Gradebook::new();
        book.add("Alice", "95").unwrap();
        let before = book.clone();

        assert_eq!(
            validation(book.edit("Carol", "Carol", "101")),
            ValidationError::OutOfRange(101)
        );
        assert_eq!(
            validation(book.edit("Alice", "", "90")),
            ValidationError::MissingField
        );
        assert_eq!(book, before);
    }

    #[test]
    fn test_delete() {
        let mut book = Gradebook::new();
        book.add("Alice", "95").unwrap();
        book.add("Bob", "80").unwrap();

        book.delete("Alice");

        assert_eq!(book.len(), 1);
        // Bob becomes the top score and is regraded
        assert_eq!(book.get("Bob").unwrap().grade, Some(Grade::A));

        book.delete("Nobody");
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_delete_selected_requires_selection() {
        let mut book = Gradebook::new();
        book.add("Alice", "95").unwrap();
        let before = book.clone();

        assert_eq!(
            validation(book.delete_selected(None)),
            ValidationError::NoSelection("delete")
        );
        assert_eq!(book, before);

        book.delete_selected(Some("Alice : 95 : A")).unwrap();
        assert!(book.is_empty());
    }

    #[test]
    fn test_edit_selected() {
        let mut book = Gradebook::new();
        book.add("Alice", "95").unwrap();

        assert_eq!(
            validation(book.edit_selected(None, "Al", "90")),
            ValidationError::NoSelection("edit")
        );

        book.edit_selected(Some("Alice : 95 : A"), "Al", "90").unwrap();
        assert!(book.contains("Al"));
        assert!(!book.contains("Alice"));
    }

    #[test]
    fn test_grades_match_curve_after_mutations() {
        let mut book = Gradebook::new();
        for (name, score) in [("a", "100"), ("b", "89"), ("c", "75"), ("d", "61"), ("e", "12")] {
            book.add(name, score).unwrap();
        }
        book.edit("a", "a", "70").unwrap();
        book.delete("e");

        let high = book.high_score().unwrap();
        for (_, record) in book.iter() {
            assert_eq!(record.grade, Some(curve::letter(record.score, high)));
        }
    }

    #[test]
    fn test_clear_and_replace() {
        let mut book = Gradebook::new();
        book.add("Alice", "95").unwrap();

        let mut other = Gradebook::new();
        other.add("Zed", "10").unwrap();
        book.replace(other);
        assert_eq!(names(&book), vec!["Zed"]);

        book.clear();
        assert!(book.is_empty());
        assert_eq!(book.high_score(), None);
    }
}
