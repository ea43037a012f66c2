//! Domain records for the four Mentorize verticals.
//!
//! # Responsibility
//! - Define the persisted shape of notes, study sessions, goals and tasks.
//! - Own field validation and the derived-field rules of each record.
//!
//! # Invariants
//! - Every record is identified by a store-generated integer id; `0` marks a
//!   record that has not been persisted yet.
//! - Deletion is a hard delete; records carry no tombstone state.
//! - Goal completion and `progress == 100` always agree.
//! - Task `completed_at` is set iff the task is completed.

use chrono::{Local, NaiveDateTime, SubsecRound};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod goal;
pub mod note;
pub mod study_session;
pub mod task;

/// Identifier value carried by records that were never stored.
pub const UNSAVED_ID: i64 = 0;

/// Field-level validation failure raised before any write reaches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field was not provided.
    Missing { field: &'static str },
    /// Required text field is empty or whitespace-only.
    Blank { field: &'static str },
    /// Text field exceeds its character budget.
    TooLong {
        field: &'static str,
        max_chars: usize,
        actual_chars: usize,
    },
    /// Numeric field must be strictly positive.
    NotPositive { field: &'static str, value: i64 },
    /// Numeric field is outside its closed range.
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        value: i64,
    },
    /// Enum-backed field received an unknown value.
    UnknownVariant { field: &'static str, value: String },
    /// Two fields disagree with a record invariant.
    Inconsistent(&'static str),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{field} is required"),
            Self::Blank { field } => write!(f, "{field} must not be blank"),
            Self::TooLong {
                field,
                max_chars,
                actual_chars,
            } => write!(
                f,
                "{field} must have at most {max_chars} characters, got {actual_chars}"
            ),
            Self::NotPositive { field, value } => {
                write!(f, "{field} must be greater than zero, got {value}")
            }
            Self::OutOfRange {
                field,
                min,
                max,
                value,
            } => write!(f, "{field} must be between {min} and {max}, got {value}"),
            Self::UnknownVariant { field, value } => {
                write!(f, "unknown {field} value `{value}`")
            }
            Self::Inconsistent(details) => write!(f, "inconsistent record: {details}"),
        }
    }
}

impl Error for ValidationError {}

/// Returns the current local wall-clock time truncated to whole seconds.
///
/// Stored timestamps never carry sub-second precision so they round-trip
/// through the `yyyy-MM-dd HH:mm:ss` wire format unchanged.
pub fn current_timestamp() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

pub(crate) fn require_text(
    field: &'static str,
    value: &str,
    max_chars: usize,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { field });
    }
    check_len(field, value, max_chars)
}

pub(crate) fn check_optional_text(
    field: &'static str,
    value: Option<&str>,
    max_chars: usize,
) -> Result<(), ValidationError> {
    match value {
        Some(value) => check_len(field, value, max_chars),
        None => Ok(()),
    }
}

fn check_len(field: &'static str, value: &str, max_chars: usize) -> Result<(), ValidationError> {
    let actual_chars = value.chars().count();
    if actual_chars > max_chars {
        return Err(ValidationError::TooLong {
            field,
            max_chars,
            actual_chars,
        });
    }
    Ok(())
}
