//! Study session domain model.
//!
//! # Invariants
//! - `title` and `subject` are non-blank.
//! - `duration_minutes` is strictly positive.
//! - Sessions start pending; completion only flips to `true` through
//!   explicit actions or updates.

use super::{check_optional_text, require_text, ValidationError, UNSAVED_ID};
use chrono::{NaiveDate, NaiveDateTime};

pub type StudySessionId = i64;

/// Record of study time planned or spent on a subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudySession {
    pub id: StudySessionId,
    pub title: String,
    pub description: Option<String>,
    pub subject: String,
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
    pub duration_minutes: i64,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

impl StudySession {
    pub const TITLE_MAX_CHARS: usize = 255;
    pub const DESCRIPTION_MAX_CHARS: usize = 1000;
    pub const SUBJECT_MAX_CHARS: usize = 100;
    pub const NOTES_MAX_CHARS: usize = 2000;
    pub const DEFAULT_DURATION_MINUTES: i64 = 30;

    /// Creates an unsaved, pending session with the default duration.
    pub fn new(
        title: impl Into<String>,
        subject: impl Into<String>,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: UNSAVED_ID,
            title: title.into(),
            description: None,
            subject: subject.into(),
            due_date: None,
            completed: false,
            duration_minutes: Self::DEFAULT_DURATION_MINUTES,
            notes: None,
            created_at,
        }
    }

    /// Flags the session as done. Idempotent.
    pub fn mark_completed(&mut self) {
        self.completed = true;
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title, Self::TITLE_MAX_CHARS)?;
        check_optional_text(
            "description",
            self.description.as_deref(),
            Self::DESCRIPTION_MAX_CHARS,
        )?;
        require_text("subject", &self.subject, Self::SUBJECT_MAX_CHARS)?;
        check_optional_text("notes", self.notes.as_deref(), Self::NOTES_MAX_CHARS)?;
        if self.duration_minutes <= 0 {
            return Err(ValidationError::NotPositive {
                field: "duration",
                value: self.duration_minutes,
            });
        }
        Ok(())
    }
}

/// Field set accepted by study session create/update use-cases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudySessionInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub subject: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub completed: Option<bool>,
    pub duration_minutes: Option<i64>,
    pub notes: Option<String>,
}

/// Number of sessions recorded for one subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectCount {
    pub subject: String,
    pub sessions: i64,
}

#[cfg(test)]
mod tests {
    use super::StudySession;
    use crate::model::ValidationError;
    use chrono::NaiveDate;

    fn sample() -> StudySession {
        let created = NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .unwrap();
        StudySession::new("Chapter 3", "Physics", created)
    }

    #[test]
    fn new_session_is_pending_with_default_duration() {
        let session = sample();
        assert!(!session.completed);
        assert_eq!(session.duration_minutes, 30);
        assert!(session.validate().is_ok());
    }

    #[test]
    fn zero_duration_is_rejected() {
        let mut session = sample();
        session.duration_minutes = 0;
        assert_eq!(
            session.validate().unwrap_err(),
            ValidationError::NotPositive {
                field: "duration",
                value: 0
            }
        );
    }

    #[test]
    fn blank_subject_is_rejected() {
        let mut session = sample();
        session.subject = " ".to_string();
        assert_eq!(
            session.validate().unwrap_err(),
            ValidationError::Blank { field: "subject" }
        );
    }
}
