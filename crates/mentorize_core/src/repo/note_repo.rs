//! Note repository contract and SQLite implementation.
//!
//! # Invariants
//! - Lists are ordered `created_at DESC, id DESC`.
//! - Title/content search is a substring match, ASCII case-insensitive.

use super::{ensure_connection_ready, invalid_row, like_pattern, RepoError, RepoResult};
use crate::model::note::{Note, NoteId};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    created_at,
    updated_at
FROM notes";

const NOTE_COLUMNS: &[&str] = &["id", "title", "content", "created_at", "updated_at"];

/// Query options for listing notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteListQuery {
    pub title_contains: Option<String>,
    pub content_contains: Option<String>,
    pub limit: Option<u32>,
}

/// Repository interface for note persistence.
pub trait NoteRepository {
    fn create_note(&self, note: &Note) -> RepoResult<NoteId>;
    fn update_note(&self, note: &Note) -> RepoResult<()>;
    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>>;
    fn list_notes(&self, query: &NoteListQuery) -> RepoResult<Vec<Note>>;
    fn count_notes(&self) -> RepoResult<i64>;
    fn delete_note(&self, id: NoteId) -> RepoResult<()>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Builds a repository over a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "notes", NOTE_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(&self, note: &Note) -> RepoResult<NoteId> {
        note.validate()?;

        self.conn.execute(
            "INSERT INTO notes (title, content, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                note.title.as_str(),
                note.content.as_deref(),
                note.created_at,
                note.updated_at,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_note(&self, note: &Note) -> RepoResult<()> {
        note.validate()?;

        let changed = self.conn.execute(
            "UPDATE notes
             SET
                title = ?1,
                content = ?2,
                updated_at = ?3
             WHERE id = ?4;",
            params![
                note.title.as_str(),
                note.content.as_deref(),
                note.updated_at,
                note.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "note",
                id: note.id,
            });
        }

        Ok(())
    }

    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }

        Ok(None)
    }

    fn list_notes(&self, query: &NoteListQuery) -> RepoResult<Vec<Note>> {
        let mut sql = format!("{NOTE_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(fragment) = query.title_contains.as_deref() {
            sql.push_str(" AND fold_case(title) LIKE ? ESCAPE '\\'");
            bind_values.push(Value::Text(like_pattern(fragment)));
        }

        if let Some(fragment) = query.content_contains.as_deref() {
            sql.push_str(" AND fold_case(content) LIKE ? ESCAPE '\\'");
            bind_values.push(Value::Text(like_pattern(fragment)));
        }

        sql.push_str(" ORDER BY created_at DESC, id DESC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }

        Ok(notes)
    }

    fn count_notes(&self) -> RepoResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM notes;", [], |row| row.get(0))?;
        Ok(count)
    }

    fn delete_note(&self, id: NoteId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: "note", id });
        }

        Ok(())
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let note = Note {
        id: row.get("id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    note.validate().map_err(|err| invalid_row("notes", note.id, err))?;
    Ok(note)
}
