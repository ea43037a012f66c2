//! Note domain model.
//!
//! # Invariants
//! - `title` is non-blank and at most 255 characters.
//! - `updated_at` is refreshed on every edit and never precedes `created_at`.

use super::{check_optional_text, require_text, ValidationError, UNSAVED_ID};
use chrono::NaiveDateTime;

pub type NoteId = i64;

/// Free-text annotation with a title and an optional body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Note {
    pub const TITLE_MAX_CHARS: usize = 255;
    pub const CONTENT_MAX_CHARS: usize = 5000;

    /// Creates an unsaved note stamped with `now` for both timestamps.
    pub fn new(title: impl Into<String>, content: Option<String>, now: NaiveDateTime) -> Self {
        Self {
            id: UNSAVED_ID,
            title: title.into(),
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the note as edited at `now`.
    pub fn touch(&mut self, now: NaiveDateTime) {
        self.updated_at = now.max(self.created_at);
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title, Self::TITLE_MAX_CHARS)?;
        check_optional_text("content", self.content.as_deref(), Self::CONTENT_MAX_CHARS)?;
        Ok(())
    }
}

/// Field set accepted by note create/update use-cases.
///
/// `None` means "not provided": create requires `title`, update leaves the
/// stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteInput {
    pub title: Option<String>,
    pub content: Option<String>,
}
