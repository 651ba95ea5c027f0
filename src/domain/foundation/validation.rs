//! Field-level validation helpers.
//!
//! Aggregates validate themselves with plain functions that collect every
//! violation instead of stopping at the first one, so callers can surface
//! the complete list to the user in one round trip.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A single field-level violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl From<ValidationError> for FieldViolation {
    fn from(err: ValidationError) -> Self {
        FieldViolation::new(err.field().to_string(), err.to_string())
    }
}

/// Checks that a text field is non-blank and within `max` characters.
pub fn require_text(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    let len = trimmed.chars().count();
    if len > max {
        return Err(ValidationError::too_long(field, max, len));
    }
    Ok(())
}

/// Checks that no entry of a list is blank, reporting `field[i]` for each.
pub fn blank_entries(field: &str, values: &[String]) -> Vec<FieldViolation> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(i, _)| FieldViolation::new(format!("{}[{}]", field, i), "entry cannot be blank"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_text_accepts_valid_value() {
        assert!(require_text("title", "Pick a database", 10_usize.pow(3)).is_ok());
    }

    #[test]
    fn require_text_rejects_whitespace() {
        assert_eq!(
            require_text("title", "   ", 10),
            Err(ValidationError::empty_field("title"))
        );
    }

    #[test]
    fn require_text_counts_chars_not_bytes() {
        assert!(require_text("name", "ééé", 3).is_ok());
        assert!(require_text("name", "éééé", 3).is_err());
    }

    #[test]
    fn blank_entries_reports_each_index() {
        let values = vec!["a".to_string(), " ".to_string(), "".to_string()];
        let violations = blank_entries("options", &values);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].field, "options[1]");
        assert_eq!(violations[1].field, "options[2]");
    }
}
