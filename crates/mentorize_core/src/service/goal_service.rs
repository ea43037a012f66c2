//! Goal use-case service.
//!
//! # Responsibility
//! - Provide goal CRUD plus pending/category/overdue listings.
//! - Route every progress and completion change through the model rules.
//!
//! # Invariants
//! - Progress carried in a create/update body must already be in `0..=100`;
//!   only [`GoalService::set_goal_progress`] clamps.
//! - Partial updates apply progress before the completion flag, so a body
//!   with `completed = true` always ends at progress 100.

use super::{required, ServiceError, ServiceResult};
use crate::model::current_timestamp;
use crate::model::goal::{check_progress_range, Goal, GoalId, GoalInput, GoalStats};
use crate::repo::goal_repo::{GoalListQuery, GoalRepository};

/// Goal service facade over repository implementations.
pub struct GoalService<R: GoalRepository> {
    repo: R,
}

impl<R: GoalRepository> GoalService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all goals, newest start date first.
    pub fn list_goals(&self) -> ServiceResult<Vec<Goal>> {
        Ok(self.repo.list_goals(&GoalListQuery::default())?)
    }

    pub fn get_goal(&self, id: GoalId) -> ServiceResult<Goal> {
        self.repo
            .get_goal(id)?
            .ok_or(ServiceError::NotFound { entity: "goal", id })
    }

    /// Creates one goal starting now. Progress defaults to 0.
    pub fn create_goal(&self, input: GoalInput) -> ServiceResult<Goal> {
        let name = required("name", input.name)?;
        let mut goal = Goal::new(name, current_timestamp());
        goal.description = input.description;
        goal.category = input.category;
        goal.due_date = input.due_date;
        if let Some(progress) = input.progress {
            check_progress_range(progress)?;
            goal.set_progress(progress);
        }
        if let Some(completed) = input.completed {
            goal.set_completed(completed);
        }

        let id = self.repo.create_goal(&goal)?;
        log::info!("event=goal_create module=service status=ok id={id}");
        self.read_back(id, "created goal not found in read-back")
    }

    /// Applies the fields present in `input`. `start_date` never changes.
    pub fn update_goal(&self, id: GoalId, input: GoalInput) -> ServiceResult<Goal> {
        let mut goal = self.get_goal(id)?;
        if let Some(name) = input.name {
            goal.name = name;
        }
        if let Some(description) = input.description {
            goal.description = Some(description);
        }
        if let Some(category) = input.category {
            goal.category = Some(category);
        }
        if let Some(due_date) = input.due_date {
            goal.due_date = Some(due_date);
        }
        if let Some(progress) = input.progress {
            check_progress_range(progress)?;
            goal.set_progress(progress);
        }
        if let Some(completed) = input.completed {
            goal.set_completed(completed);
        }

        self.repo.update_goal(&goal)?;
        log::info!("event=goal_update module=service status=ok id={id}");
        self.read_back(id, "updated goal not found in read-back")
    }

    pub fn delete_goal(&self, id: GoalId) -> ServiceResult<()> {
        self.repo.delete_goal(id)?;
        log::info!("event=goal_delete module=service status=ok id={id}");
        Ok(())
    }

    pub fn pending_goals(&self) -> ServiceResult<Vec<Goal>> {
        let query = GoalListQuery {
            completed: Some(false),
            ..GoalListQuery::default()
        };
        Ok(self.repo.list_goals(&query)?)
    }

    pub fn goals_by_category(&self, category: &str) -> ServiceResult<Vec<Goal>> {
        let query = GoalListQuery {
            category: Some(category.to_string()),
            ..GoalListQuery::default()
        };
        Ok(self.repo.list_goals(&query)?)
    }

    /// Open goals whose deadline is already behind the current time.
    pub fn overdue_goals(&self) -> ServiceResult<Vec<Goal>> {
        let query = GoalListQuery {
            completed: Some(false),
            due_before: Some(current_timestamp()),
            ..GoalListQuery::default()
        };
        Ok(self.repo.list_goals(&query)?)
    }

    /// Sets progress, clamped into `0..=100`.
    pub fn set_goal_progress(&self, id: GoalId, progress: i64) -> ServiceResult<Goal> {
        let mut goal = self.get_goal(id)?;
        goal.set_progress(progress);
        self.repo.update_goal(&goal)?;
        log::info!(
            "event=goal_progress module=service status=ok id={id} progress={}",
            goal.progress()
        );
        self.read_back(id, "goal not found in read-back after progress update")
    }

    /// Forces completion, raising progress to 100.
    pub fn complete_goal(&self, id: GoalId) -> ServiceResult<Goal> {
        let mut goal = self.get_goal(id)?;
        goal.set_completed(true);
        self.repo.update_goal(&goal)?;
        log::info!("event=goal_complete module=service status=ok id={id}");
        self.read_back(id, "completed goal not found in read-back")
    }

    pub fn goal_stats(&self) -> ServiceResult<GoalStats> {
        Ok(self.repo.goal_stats()?)
    }

    fn read_back(&self, id: GoalId, details: &'static str) -> ServiceResult<Goal> {
        self.repo
            .get_goal(id)?
            .ok_or(ServiceError::InconsistentState(details))
    }
}
