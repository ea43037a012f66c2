//! Task use-case service.
//!
//! # Responsibility
//! - Provide task CRUD plus the priority/category/deadline listings.
//! - Drive completion through the model's edge-triggered timestamp rule.
//!
//! # Invariants
//! - `updated_at` is refreshed on every successful write.
//! - Overdue is evaluated against the current local date.

use super::{required, ServiceError, ServiceResult};
use crate::model::current_timestamp;
use crate::model::task::{
    Task, TaskCategory, TaskId, TaskInput, TaskPriority, TaskStats,
};
use crate::repo::task_repo::{TaskListQuery, TaskOrder, TaskRepository};

/// Task service facade over repository implementations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all tasks, newest first.
    pub fn list_tasks(&self) -> ServiceResult<Vec<Task>> {
        Ok(self.repo.list_tasks(&TaskListQuery::default())?)
    }

    pub fn get_task(&self, id: TaskId) -> ServiceResult<Task> {
        self.repo
            .get_task(id)?
            .ok_or(ServiceError::NotFound { entity: "task", id })
    }

    /// Creates one task. Priority defaults to low and category to study.
    pub fn create_task(&self, input: TaskInput) -> ServiceResult<Task> {
        let title = required("title", input.title)?;
        let now = current_timestamp();
        let mut task = Task::new(title, now);
        task.description = input.description;
        task.due_date = input.due_date;
        task.priority = input.priority.unwrap_or_default();
        task.category = input.category.unwrap_or_default();
        if let Some(completed) = input.completed {
            task.set_completed(completed, now);
        }

        let id = self.repo.create_task(&task)?;
        log::info!("event=task_create module=service status=ok id={id}");
        self.read_back(id, "created task not found in read-back")
    }

    /// Applies the fields present in `input` and refreshes `updated_at`.
    pub fn update_task(&self, id: TaskId, input: TaskInput) -> ServiceResult<Task> {
        let mut task = self.get_task(id)?;
        let now = current_timestamp();
        if let Some(title) = input.title {
            task.title = title;
        }
        if let Some(description) = input.description {
            task.description = Some(description);
        }
        if let Some(due_date) = input.due_date {
            task.due_date = Some(due_date);
        }
        if let Some(priority) = input.priority {
            task.priority = priority;
        }
        if let Some(category) = input.category {
            task.category = category;
        }
        if let Some(completed) = input.completed {
            task.set_completed(completed, now);
        }
        task.touch(now);

        self.repo.update_task(&task)?;
        log::info!("event=task_update module=service status=ok id={id}");
        self.read_back(id, "updated task not found in read-back")
    }

    pub fn delete_task(&self, id: TaskId) -> ServiceResult<()> {
        self.repo.delete_task(id)?;
        log::info!("event=task_delete module=service status=ok id={id}");
        Ok(())
    }

    pub fn pending_tasks(&self) -> ServiceResult<Vec<Task>> {
        let query = TaskListQuery {
            completed: Some(false),
            ..TaskListQuery::default()
        };
        Ok(self.repo.list_tasks(&query)?)
    }

    pub fn tasks_by_priority(&self, priority: TaskPriority) -> ServiceResult<Vec<Task>> {
        let query = TaskListQuery {
            priority: Some(priority),
            ..TaskListQuery::default()
        };
        Ok(self.repo.list_tasks(&query)?)
    }

    pub fn tasks_by_category(&self, category: TaskCategory) -> ServiceResult<Vec<Task>> {
        let query = TaskListQuery {
            category: Some(category),
            ..TaskListQuery::default()
        };
        Ok(self.repo.list_tasks(&query)?)
    }

    /// Pending tasks that carry a deadline, earliest deadline first.
    pub fn tasks_with_due_date(&self) -> ServiceResult<Vec<Task>> {
        let query = TaskListQuery {
            completed: Some(false),
            has_due_date: true,
            order: TaskOrder::DueDateAscending,
            ..TaskListQuery::default()
        };
        Ok(self.repo.list_tasks(&query)?)
    }

    /// Pending tasks whose deadline is before today.
    pub fn overdue_tasks(&self) -> ServiceResult<Vec<Task>> {
        let query = TaskListQuery {
            completed: Some(false),
            due_before: Some(current_timestamp().date()),
            order: TaskOrder::DueDateAscending,
            ..TaskListQuery::default()
        };
        Ok(self.repo.list_tasks(&query)?)
    }

    /// Case-insensitive substring search on title or description.
    pub fn search_tasks(&self, term: &str) -> ServiceResult<Vec<Task>> {
        let query = TaskListQuery {
            keyword: Some(term.to_string()),
            ..TaskListQuery::default()
        };
        Ok(self.repo.list_tasks(&query)?)
    }

    pub fn complete_task(&self, id: TaskId) -> ServiceResult<Task> {
        self.set_task_completed(id, true)
    }

    pub fn reopen_task(&self, id: TaskId) -> ServiceResult<Task> {
        self.set_task_completed(id, false)
    }

    pub fn task_stats(&self) -> ServiceResult<TaskStats> {
        Ok(self.repo.task_stats()?)
    }

    fn set_task_completed(&self, id: TaskId, completed: bool) -> ServiceResult<Task> {
        let mut task = self.get_task(id)?;
        let now = current_timestamp();
        let changed = task.set_completed(completed, now);
        task.touch(now);
        self.repo.update_task(&task)?;
        log::info!(
            "event=task_completion module=service status=ok id={id} completed={completed} changed={changed}"
        );
        self.read_back(id, "task not found in read-back after completion toggle")
    }

    fn read_back(&self, id: TaskId, details: &'static str) -> ServiceResult<Task> {
        self.repo
            .get_task(id)?
            .ok_or(ServiceError::InconsistentState(details))
    }
}
