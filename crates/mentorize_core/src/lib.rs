//! Core domain logic for Mentorize.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::goal::{Goal, GoalId, GoalInput, GoalStats};
pub use model::note::{Note, NoteId, NoteInput};
pub use model::study_session::{StudySession, StudySessionId, StudySessionInput, SubjectCount};
pub use model::task::{Task, TaskCategory, TaskId, TaskInput, TaskPriority, TaskStats};
pub use model::{current_timestamp, ValidationError};
pub use repo::goal_repo::{GoalRepository, SqliteGoalRepository};
pub use repo::note_repo::{NoteRepository, SqliteNoteRepository};
pub use repo::study_repo::{SqliteStudySessionRepository, StudySessionRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use repo::{RepoError, RepoResult};
pub use service::goal_service::GoalService;
pub use service::note_service::NoteService;
pub use service::study_service::StudySessionService;
pub use service::task_service::TaskService;
pub use service::{ServiceError, ServiceResult};

