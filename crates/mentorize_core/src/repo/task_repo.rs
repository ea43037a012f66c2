//! Task repository contract and SQLite implementation.
//!
//! # Invariants
//! - Priority and category are stored as their stable upper-case codes.
//! - `completed_at` is written exactly as the model holds it; the edge rule
//!   lives in the model, not in SQL.

use super::{
    bool_to_int, ensure_connection_ready, int_to_bool, invalid_row, like_pattern, RepoError,
    RepoResult,
};
use crate::model::task::{Task, TaskCategory, TaskId, TaskPriority, TaskStats};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    completed,
    due_date,
    priority,
    category,
    created_at,
    updated_at,
    completed_at
FROM tasks";

const TASK_COLUMNS: &[&str] = &[
    "id",
    "title",
    "description",
    "completed",
    "due_date",
    "priority",
    "category",
    "created_at",
    "updated_at",
    "completed_at",
];

/// Result ordering for task lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskOrder {
    /// `created_at DESC, id DESC`.
    #[default]
    NewestFirst,
    /// `due_date ASC, id ASC`; undated tasks last.
    DueDateAscending,
}

/// Query options for listing tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListQuery {
    pub completed: Option<bool>,
    pub priority: Option<TaskPriority>,
    pub category: Option<TaskCategory>,
    pub has_due_date: bool,
    /// Only tasks due strictly before this date.
    pub due_before: Option<NaiveDate>,
    /// Substring match on title or description.
    pub keyword: Option<String>,
    pub order: TaskOrder,
}

/// Repository interface for task persistence.
pub trait TaskRepository {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId>;
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<Task>>;
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
    fn task_stats(&self) -> RepoResult<TaskStats>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "tasks", TASK_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (
                title,
                description,
                completed,
                due_date,
                priority,
                category,
                created_at,
                updated_at,
                completed_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                task.title.as_str(),
                task.description.as_deref(),
                bool_to_int(task.is_completed()),
                task.due_date,
                task.priority.as_str(),
                task.category.as_str(),
                task.created_at,
                task.updated_at,
                task.completed_at(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                title = ?1,
                description = ?2,
                completed = ?3,
                due_date = ?4,
                priority = ?5,
                category = ?6,
                updated_at = ?7,
                completed_at = ?8
             WHERE id = ?9;",
            params![
                task.title.as_str(),
                task.description.as_deref(),
                bool_to_int(task.is_completed()),
                task.due_date,
                task.priority.as_str(),
                task.category.as_str(),
                task.updated_at,
                task.completed_at(),
                task.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "task",
                id: task.id,
            });
        }

        Ok(())
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<Task>> {
        let mut sql = format!("{TASK_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(completed) = query.completed {
            sql.push_str(" AND completed = ?");
            bind_values.push(Value::Integer(bool_to_int(completed)));
        }

        if let Some(priority) = query.priority {
            sql.push_str(" AND priority = ?");
            bind_values.push(Value::Text(priority.as_str().to_string()));
        }

        if let Some(category) = query.category {
            sql.push_str(" AND category = ?");
            bind_values.push(Value::Text(category.as_str().to_string()));
        }

        if query.has_due_date {
            sql.push_str(" AND due_date IS NOT NULL");
        }

        if let Some(due_before) = query.due_before {
            sql.push_str(" AND due_date IS NOT NULL AND due_date < ?");
            bind_values.push(Value::Text(due_before.format("%F").to_string()));
        }

        if let Some(keyword) = query.keyword.as_deref() {
            sql.push_str(
                " AND (fold_case(title) LIKE ? ESCAPE '\\' \
                 OR fold_case(description) LIKE ? ESCAPE '\\')",
            );
            let pattern = like_pattern(keyword);
            bind_values.push(Value::Text(pattern.clone()));
            bind_values.push(Value::Text(pattern));
        }

        match query.order {
            TaskOrder::NewestFirst => sql.push_str(" ORDER BY created_at DESC, id DESC"),
            TaskOrder::DueDateAscending => {
                sql.push_str(" ORDER BY due_date IS NULL, due_date ASC, id ASC")
            }
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM tasks WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: "task", id });
        }

        Ok(())
    }

    fn task_stats(&self) -> RepoResult<TaskStats> {
        let stats = self.conn.query_row(
            "SELECT
                COALESCE(SUM(completed), 0) AS completed,
                COALESCE(SUM(1 - completed), 0) AS pending
             FROM tasks;",
            [],
            |row| {
                Ok(TaskStats {
                    completed: row.get("completed")?,
                    pending: row.get("pending")?,
                })
            },
        )?;
        Ok(stats)
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let id: TaskId = row.get("id")?;

    let priority_text: String = row.get("priority")?;
    let priority = priority_text.parse::<TaskPriority>().map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid priority `{priority_text}` in tasks.priority"
        ))
    })?;

    let category_text: String = row.get("category")?;
    let category = category_text.parse::<TaskCategory>().map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid category `{category_text}` in tasks.category"
        ))
    })?;

    let created_at = row.get("created_at")?;
    let task = Task::from_parts(
        id,
        row.get("title")?,
        row.get("description")?,
        int_to_bool("tasks.completed", row.get("completed")?)?,
        row.get("due_date")?,
        priority,
        category,
        created_at,
        row.get::<_, Option<_>>("updated_at")?.unwrap_or(created_at),
        row.get("completed_at")?,
    );
    task.validate().map_err(|err| invalid_row("tasks", id, err))?;
    Ok(task)
}
