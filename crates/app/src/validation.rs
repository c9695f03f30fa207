//! Field-level input validation.
//!
//! Validators here are pure: they never touch the database, and they run
//! before any repository call so a rejected payload leaves no partial state.

use std::{slice, sync::LazyLock, vec};

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

static PHONE_NUMBER: LazyLock<Regex> = LazyLock::new(|| compile(r"^[0-9]{10}$"));

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*@[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*(\.[A-Za-z0-9_]{2,3})+$",
    )
});

static CLOCK_TIME: LazyLock<Regex> = LazyLock::new(|| compile(r"^([01]?[0-9]|2[0-3]):[0-5][0-9]$"));

#[expect(
    clippy::expect_used,
    reason = "patterns are string literals covered by unit tests"
)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("validation pattern should compile")
}

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Wire name of the field, e.g. `stoppages[0].arrivalTime`.
    pub field: String,

    /// Human-readable reason.
    pub message: String,
}

/// Ordered collection of field errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `field`.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
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

    /// Whether any error was recorded against `field`.
    #[must_use]
    pub fn contains_field(&self, field: &str) -> bool {
        self.0.iter().any(|error| error.field == field)
    }

    /// Return `value` when nothing failed, otherwise the collected errors.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field failed.
    pub fn finish<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl Extend<FieldError> for ValidationErrors {
    fn extend<I: IntoIterator<Item = FieldError>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Exactly ten ASCII digits.
#[must_use]
pub fn is_phone_number(value: &str) -> bool {
    PHONE_NUMBER.is_match(value)
}

#[must_use]
pub fn is_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// 24-hour `H:MM` or `HH:MM`.
#[must_use]
pub fn is_clock_time(value: &str) -> bool {
    CLOCK_TIME.is_match(value)
}

/// Trim `value` in place and check its length in characters.
pub(crate) fn trimmed_length(
    errors: &mut ValidationErrors,
    field: &str,
    value: &mut String,
    min: usize,
    max: usize,
    message: &str,
) {
    trim_in_place(value);

    let length = value.chars().count();

    if length < min || length > max {
        errors.push(field, message);
    }
}

/// Trim `value` in place and reject it when nothing is left.
pub(crate) fn required(errors: &mut ValidationErrors, field: &str, value: &mut String, message: &str) {
    trim_in_place(value);

    if value.is_empty() {
        errors.push(field, message);
    }
}

pub(crate) fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();

    if trimmed.len() != value.len() {
        *value = trimmed.to_owned();
    }
}
