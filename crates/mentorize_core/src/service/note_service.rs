//! Note use-case service.
//!
//! # Responsibility
//! - Provide note create/update/get/list/delete APIs.
//! - Expose title/content search, the recent feed and the total count.
//!
//! # Invariants
//! - `updated_at` is refreshed on every successful update.
//! - `created_at` is never modified after creation.

use super::{required, ServiceError, ServiceResult};
use crate::model::current_timestamp;
use crate::model::note::{Note, NoteId, NoteInput};
use crate::repo::note_repo::{NoteListQuery, NoteRepository};

/// Size of the recent-notes feed.
pub const RECENT_NOTES_LIMIT: u32 = 5;

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all notes, newest first.
    pub fn list_notes(&self) -> ServiceResult<Vec<Note>> {
        Ok(self.repo.list_notes(&NoteListQuery::default())?)
    }

    pub fn get_note(&self, id: NoteId) -> ServiceResult<Note> {
        self.repo
            .get_note(id)?
            .ok_or(ServiceError::NotFound { entity: "note", id })
    }

    /// Creates one note. `title` is required.
    pub fn create_note(&self, input: NoteInput) -> ServiceResult<Note> {
        let title = required("title", input.title)?;
        let note = Note::new(title, input.content, current_timestamp());

        let id = self.repo.create_note(&note)?;
        log::info!("event=note_create module=service status=ok id={id}");
        self.repo
            .get_note(id)?
            .ok_or(ServiceError::InconsistentState(
                "created note not found in read-back",
            ))
    }

    /// Applies the fields present in `input` and refreshes `updated_at`.
    pub fn update_note(&self, id: NoteId, input: NoteInput) -> ServiceResult<Note> {
        let mut note = self.get_note(id)?;
        if let Some(title) = input.title {
            note.title = title;
        }
        if let Some(content) = input.content {
            note.content = Some(content);
        }
        note.touch(current_timestamp());

        self.repo.update_note(&note)?;
        log::info!("event=note_update module=service status=ok id={id}");
        self.repo
            .get_note(id)?
            .ok_or(ServiceError::InconsistentState(
                "updated note not found in read-back",
            ))
    }

    pub fn delete_note(&self, id: NoteId) -> ServiceResult<()> {
        self.repo.delete_note(id)?;
        log::info!("event=note_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Case-insensitive substring search on titles.
    pub fn search_by_title(&self, fragment: &str) -> ServiceResult<Vec<Note>> {
        let query = NoteListQuery {
            title_contains: Some(fragment.to_string()),
            ..NoteListQuery::default()
        };
        Ok(self.repo.list_notes(&query)?)
    }

    /// Case-insensitive substring search on note bodies.
    pub fn search_by_content(&self, term: &str) -> ServiceResult<Vec<Note>> {
        let query = NoteListQuery {
            content_contains: Some(term.to_string()),
            ..NoteListQuery::default()
        };
        Ok(self.repo.list_notes(&query)?)
    }

    pub fn recent_notes(&self) -> ServiceResult<Vec<Note>> {
        let query = NoteListQuery {
            limit: Some(RECENT_NOTES_LIMIT),
            ..NoteListQuery::default()
        };
        Ok(self.repo.list_notes(&query)?)
    }

    pub fn count_notes(&self) -> ServiceResult<i64> {
        Ok(self.repo.count_notes()?)
    }
}
