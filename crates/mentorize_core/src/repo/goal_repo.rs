//! Goal repository contract and SQLite implementation.
//!
//! # Invariants
//! - Lists are ordered `start_date DESC, id DESC`.
//! - Persisted rows always satisfy `completed == (progress == 100)`.

use super::{
    bool_to_int, ensure_connection_ready, int_to_bool, invalid_row, RepoError, RepoResult,
};
use crate::model::goal::{Goal, GoalId, GoalStats};
use chrono::NaiveDateTime;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const GOAL_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    progress,
    category,
    start_date,
    due_date,
    completed
FROM goals";

const GOAL_COLUMNS: &[&str] = &[
    "id",
    "name",
    "description",
    "progress",
    "category",
    "start_date",
    "due_date",
    "completed",
];

/// Query options for listing goals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalListQuery {
    pub completed: Option<bool>,
    /// Exact category tag match.
    pub category: Option<String>,
    /// Only goals whose due date is strictly before this instant.
    pub due_before: Option<NaiveDateTime>,
}

/// Repository interface for goal persistence.
pub trait GoalRepository {
    fn create_goal(&self, goal: &Goal) -> RepoResult<GoalId>;
    fn update_goal(&self, goal: &Goal) -> RepoResult<()>;
    fn get_goal(&self, id: GoalId) -> RepoResult<Option<Goal>>;
    fn list_goals(&self, query: &GoalListQuery) -> RepoResult<Vec<Goal>>;
    fn delete_goal(&self, id: GoalId) -> RepoResult<()>;
    fn goal_stats(&self) -> RepoResult<GoalStats>;
}

/// SQLite-backed goal repository.
pub struct SqliteGoalRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteGoalRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "goals", GOAL_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl GoalRepository for SqliteGoalRepository<'_> {
    fn create_goal(&self, goal: &Goal) -> RepoResult<GoalId> {
        goal.validate()?;

        self.conn.execute(
            "INSERT INTO goals (
                name,
                description,
                progress,
                category,
                start_date,
                due_date,
                completed
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                goal.name.as_str(),
                goal.description.as_deref(),
                goal.progress(),
                goal.category.as_deref(),
                goal.start_date,
                goal.due_date,
                bool_to_int(goal.is_completed()),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_goal(&self, goal: &Goal) -> RepoResult<()> {
        goal.validate()?;

        let changed = self.conn.execute(
            "UPDATE goals
             SET
                name = ?1,
                description = ?2,
                progress = ?3,
                category = ?4,
                due_date = ?5,
                completed = ?6
             WHERE id = ?7;",
            params![
                goal.name.as_str(),
                goal.description.as_deref(),
                goal.progress(),
                goal.category.as_deref(),
                goal.due_date,
                bool_to_int(goal.is_completed()),
                goal.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "goal",
                id: goal.id,
            });
        }

        Ok(())
    }

    fn get_goal(&self, id: GoalId) -> RepoResult<Option<Goal>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{GOAL_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_goal_row(row)?));
        }

        Ok(None)
    }

    fn list_goals(&self, query: &GoalListQuery) -> RepoResult<Vec<Goal>> {
        let mut sql = format!("{GOAL_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(completed) = query.completed {
            sql.push_str(" AND completed = ?");
            bind_values.push(Value::Integer(bool_to_int(completed)));
        }

        if let Some(category) = query.category.as_ref() {
            sql.push_str(" AND category = ?");
            bind_values.push(Value::Text(category.clone()));
        }

        if let Some(due_before) = query.due_before {
            sql.push_str(" AND due_date IS NOT NULL AND due_date < ?");
            // Same text layout rusqlite uses when storing `NaiveDateTime`.
            bind_values.push(Value::Text(due_before.format("%F %T%.f").to_string()));
        }

        sql.push_str(" ORDER BY start_date DESC, id DESC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut goals = Vec::new();
        while let Some(row) = rows.next()? {
            goals.push(parse_goal_row(row)?);
        }

        Ok(goals)
    }

    fn delete_goal(&self, id: GoalId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM goals WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: "goal", id });
        }

        Ok(())
    }

    fn goal_stats(&self) -> RepoResult<GoalStats> {
        let stats = self.conn.query_row(
            "SELECT
                COUNT(*) AS total,
                COALESCE(SUM(completed), 0) AS completed,
                AVG(CASE WHEN completed = 0 THEN progress END) AS average_active_progress
             FROM goals;",
            [],
            |row| {
                Ok(GoalStats {
                    total: row.get("total")?,
                    completed: row.get("completed")?,
                    average_active_progress: row.get("average_active_progress")?,
                })
            },
        )?;
        Ok(stats)
    }
}

fn parse_goal_row(row: &Row<'_>) -> RepoResult<Goal> {
    let id: GoalId = row.get("id")?;
    let goal = Goal::from_parts(
        id,
        row.get("name")?,
        row.get("description")?,
        row.get("progress")?,
        row.get("category")?,
        row.get("start_date")?,
        row.get("due_date")?,
        int_to_bool("goals.completed", row.get("completed")?)?,
    );
    goal.validate().map_err(|err| invalid_row("goals", id, err))?;
    Ok(goal)
}
