//! Typed admin forms and their validation.
//!
//! Each form deserializes leniently (missing fields become empty values) so
//! that every problem is reported as a field error instead of a body parse
//! failure. `validate()` either yields the normalized record fields or the
//! full list of field errors; nothing is written when it fails.

pub mod account;
pub mod drama;
pub mod genre;
pub mod part;

pub use account::{Credentials, LoginForm, SignUpForm};
pub use drama::{DramaFields, DramaForm};
pub use genre::{GenreFields, GenreForm};
pub use part::{PartFields, PartForm};

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every field that failed validation, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Trims `value` and records `message` when nothing is left.
    pub fn required(&mut self, field: &'static str, value: &str, message: &str) -> String {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.push(field, message);
        }
        trimmed.to_string()
    }

    /// Finishes validation, returning `value` only if no error was recorded.
    pub fn finish<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_trims_and_records() {
        let mut errors = ValidationErrors::default();
        assert_eq!(errors.required("title", "  Moon  ", "Title is required"), "Moon");
        assert!(errors.is_empty());

        errors.required("title", "   ", "Title is required");
        assert!(errors.has("title"));
        assert_eq!(errors.to_string(), "title: Title is required");
    }

    #[test]
    fn finish_fails_with_errors() {
        let mut errors = ValidationErrors::default();
        errors.push("a", "bad");
        errors.push("b", "worse");
        let err = errors.finish(()).unwrap_err();
        assert_eq!(err.len(), 2);
        assert_eq!(err.to_string(), "a: bad; b: worse");
    }
}
