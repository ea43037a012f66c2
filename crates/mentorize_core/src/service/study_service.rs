//! Study session use-case service.
//!
//! # Responsibility
//! - Provide study session CRUD plus pending/subject/recent listings.
//! - Expose completion and the duration aggregates.

use super::{required, ServiceError, ServiceResult};
use crate::model::current_timestamp;
use crate::model::study_session::{
    StudySession, StudySessionId, StudySessionInput, SubjectCount,
};
use crate::repo::study_repo::{StudySessionListQuery, StudySessionRepository};

/// Size of the recent-sessions feed.
pub const RECENT_SESSIONS_LIMIT: u32 = 10;

/// Study session service facade over repository implementations.
pub struct StudySessionService<R: StudySessionRepository> {
    repo: R,
}

impl<R: StudySessionRepository> StudySessionService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_sessions(&self) -> ServiceResult<Vec<StudySession>> {
        Ok(self.repo.list_sessions(&StudySessionListQuery::default())?)
    }

    pub fn get_session(&self, id: StudySessionId) -> ServiceResult<StudySession> {
        self.repo.get_session(id)?.ok_or(ServiceError::NotFound {
            entity: "study session",
            id,
        })
    }

    /// Creates one session. `title`, `subject` and `duration_minutes` are
    /// required; the session starts pending unless `completed` says otherwise.
    pub fn create_session(&self, input: StudySessionInput) -> ServiceResult<StudySession> {
        let title = required("title", input.title)?;
        let subject = required("subject", input.subject)?;
        let duration_minutes = required("duration", input.duration_minutes)?;

        let mut session = StudySession::new(title, subject, current_timestamp());
        session.description = input.description;
        session.due_date = input.due_date;
        session.duration_minutes = duration_minutes;
        session.notes = input.notes;
        session.completed = input.completed.unwrap_or(false);

        let id = self.repo.create_session(&session)?;
        log::info!("event=study_create module=service status=ok id={id}");
        self.read_back(id, "created study session not found in read-back")
    }

    /// Applies the fields present in `input`.
    pub fn update_session(
        &self,
        id: StudySessionId,
        input: StudySessionInput,
    ) -> ServiceResult<StudySession> {
        let mut session = self.get_session(id)?;
        if let Some(title) = input.title {
            session.title = title;
        }
        if let Some(description) = input.description {
            session.description = Some(description);
        }
        if let Some(subject) = input.subject {
            session.subject = subject;
        }
        if let Some(due_date) = input.due_date {
            session.due_date = Some(due_date);
        }
        if let Some(completed) = input.completed {
            session.completed = completed;
        }
        if let Some(duration_minutes) = input.duration_minutes {
            session.duration_minutes = duration_minutes;
        }
        if let Some(notes) = input.notes {
            session.notes = Some(notes);
        }

        self.repo.update_session(&session)?;
        log::info!("event=study_update module=service status=ok id={id}");
        self.read_back(id, "updated study session not found in read-back")
    }

    pub fn delete_session(&self, id: StudySessionId) -> ServiceResult<()> {
        self.repo.delete_session(id)?;
        log::info!("event=study_delete module=service status=ok id={id}");
        Ok(())
    }

    pub fn pending_sessions(&self) -> ServiceResult<Vec<StudySession>> {
        let query = StudySessionListQuery {
            completed: Some(false),
            ..StudySessionListQuery::default()
        };
        Ok(self.repo.list_sessions(&query)?)
    }

    pub fn sessions_by_subject(&self, subject: &str) -> ServiceResult<Vec<StudySession>> {
        let query = StudySessionListQuery {
            subject: Some(subject.to_string()),
            ..StudySessionListQuery::default()
        };
        Ok(self.repo.list_sessions(&query)?)
    }

    pub fn recent_sessions(&self) -> ServiceResult<Vec<StudySession>> {
        let query = StudySessionListQuery {
            limit: Some(RECENT_SESSIONS_LIMIT),
            ..StudySessionListQuery::default()
        };
        Ok(self.repo.list_sessions(&query)?)
    }

    /// Marks the session as done. Completing twice is not an error.
    pub fn complete_session(&self, id: StudySessionId) -> ServiceResult<StudySession> {
        let mut session = self.get_session(id)?;
        session.mark_completed();
        self.repo.update_session(&session)?;
        log::info!("event=study_complete module=service status=ok id={id}");
        self.read_back(id, "completed study session not found in read-back")
    }

    /// Sum of durations over completed sessions, in minutes.
    pub fn total_completed_minutes(&self) -> ServiceResult<i64> {
        Ok(self.repo.total_completed_minutes()?)
    }

    pub fn count_completed(&self) -> ServiceResult<i64> {
        Ok(self.repo.count_completed()?)
    }

    /// Average duration over completed sessions; `None` when there are none.
    pub fn average_completed_minutes(&self) -> ServiceResult<Option<f64>> {
        Ok(self.repo.average_completed_minutes()?)
    }

    pub fn count_by_subject(&self) -> ServiceResult<Vec<SubjectCount>> {
        Ok(self.repo.count_by_subject()?)
    }

    fn read_back(&self, id: StudySessionId, details: &'static str) -> ServiceResult<StudySession> {
        self.repo
            .get_session(id)?
            .ok_or(ServiceError::InconsistentState(details))
    }
}
