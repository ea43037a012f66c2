//! Study session repository contract and SQLite implementation.
//!
//! # Invariants
//! - Lists are ordered `created_at DESC, id DESC`.
//! - Aggregates only consider completed sessions, except `count_by_subject`.

use super::{
    bool_to_int, ensure_connection_ready, int_to_bool, invalid_row, RepoError, RepoResult,
};
use crate::model::study_session::{StudySession, StudySessionId, SubjectCount};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const STUDY_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    subject,
    due_date,
    completed,
    duration_minutes,
    notes,
    created_at
FROM study_sessions";

const STUDY_COLUMNS: &[&str] = &[
    "id",
    "title",
    "description",
    "subject",
    "due_date",
    "completed",
    "duration_minutes",
    "notes",
    "created_at",
];

/// Query options for listing study sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudySessionListQuery {
    pub completed: Option<bool>,
    /// Exact subject match.
    pub subject: Option<String>,
    pub limit: Option<u32>,
}

/// Repository interface for study session persistence and aggregates.
pub trait StudySessionRepository {
    fn create_session(&self, session: &StudySession) -> RepoResult<StudySessionId>;
    fn update_session(&self, session: &StudySession) -> RepoResult<()>;
    fn get_session(&self, id: StudySessionId) -> RepoResult<Option<StudySession>>;
    fn list_sessions(&self, query: &StudySessionListQuery) -> RepoResult<Vec<StudySession>>;
    fn delete_session(&self, id: StudySessionId) -> RepoResult<()>;
    /// Sum of `duration_minutes` over completed sessions; `0` when none.
    fn total_completed_minutes(&self) -> RepoResult<i64>;
    fn count_completed(&self) -> RepoResult<i64>;
    /// Mean duration of completed sessions; `None` when none.
    fn average_completed_minutes(&self) -> RepoResult<Option<f64>>;
    /// Session counts grouped by subject, ordered by subject.
    fn count_by_subject(&self) -> RepoResult<Vec<SubjectCount>>;
}

/// SQLite-backed study session repository.
pub struct SqliteStudySessionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStudySessionRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "study_sessions", STUDY_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl StudySessionRepository for SqliteStudySessionRepository<'_> {
    fn create_session(&self, session: &StudySession) -> RepoResult<StudySessionId> {
        session.validate()?;

        self.conn.execute(
            "INSERT INTO study_sessions (
                title,
                description,
                subject,
                due_date,
                completed,
                duration_minutes,
                notes,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                session.title.as_str(),
                session.description.as_deref(),
                session.subject.as_str(),
                session.due_date,
                bool_to_int(session.completed),
                session.duration_minutes,
                session.notes.as_deref(),
                session.created_at,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_session(&self, session: &StudySession) -> RepoResult<()> {
        session.validate()?;

        let changed = self.conn.execute(
            "UPDATE study_sessions
             SET
                title = ?1,
                description = ?2,
                subject = ?3,
                due_date = ?4,
                completed = ?5,
                duration_minutes = ?6,
                notes = ?7
             WHERE id = ?8;",
            params![
                session.title.as_str(),
                session.description.as_deref(),
                session.subject.as_str(),
                session.due_date,
                bool_to_int(session.completed),
                session.duration_minutes,
                session.notes.as_deref(),
                session.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "study session",
                id: session.id,
            });
        }

        Ok(())
    }

    fn get_session(&self, id: StudySessionId) -> RepoResult<Option<StudySession>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDY_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_session_row(row)?));
        }

        Ok(None)
    }

    fn list_sessions(&self, query: &StudySessionListQuery) -> RepoResult<Vec<StudySession>> {
        let mut sql = format!("{STUDY_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(completed) = query.completed {
            sql.push_str(" AND completed = ?");
            bind_values.push(Value::Integer(bool_to_int(completed)));
        }

        if let Some(subject) = query.subject.as_ref() {
            sql.push_str(" AND subject = ?");
            bind_values.push(Value::Text(subject.clone()));
        }

        sql.push_str(" ORDER BY created_at DESC, id DESC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut sessions = Vec::new();
        while let Some(row) = rows.next()? {
            sessions.push(parse_session_row(row)?);
        }

        Ok(sessions)
    }

    fn delete_session(&self, id: StudySessionId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM study_sessions WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "study session",
                id,
            });
        }

        Ok(())
    }

    fn total_completed_minutes(&self) -> RepoResult<i64> {
        let total = self.conn.query_row(
            "SELECT COALESCE(SUM(duration_minutes), 0)
             FROM study_sessions
             WHERE completed = 1;",
            [],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    fn count_completed(&self) -> RepoResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM study_sessions WHERE completed = 1;",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn average_completed_minutes(&self) -> RepoResult<Option<f64>> {
        let average = self.conn.query_row(
            "SELECT AVG(duration_minutes) FROM study_sessions WHERE completed = 1;",
            [],
            |row| row.get(0),
        )?;
        Ok(average)
    }

    fn count_by_subject(&self) -> RepoResult<Vec<SubjectCount>> {
        let mut stmt = self.conn.prepare(
            "SELECT subject, COUNT(*) AS sessions
             FROM study_sessions
             GROUP BY subject
             ORDER BY subject ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut counts = Vec::new();
        while let Some(row) = rows.next()? {
            counts.push(SubjectCount {
                subject: row.get("subject")?,
                sessions: row.get("sessions")?,
            });
        }
        Ok(counts)
    }
}

fn parse_session_row(row: &Row<'_>) -> RepoResult<StudySession> {
    let id: StudySessionId = row.get("id")?;
    let session = StudySession {
        id,
        title: row.get("title")?,
        description: row.get("description")?,
        subject: row.get("subject")?,
        due_date: row.get("due_date")?,
        completed: int_to_bool("study_sessions.completed", row.get("completed")?)?,
        duration_minutes: row.get("duration_minutes")?,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
    };
    session
        .validate()
        .map_err(|err| invalid_row("study_sessions", id, err))?;
    Ok(session)
}
