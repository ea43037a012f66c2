//! Task domain model.
//!
//! # Responsibility
//! - Define the to-do record with priority, category and deadline.
//! - Own the edge-triggered completion timestamp rule.
//!
//! # Invariants
//! - `completed_at.is_some() == completed`.
//! - `completed_at` only changes on a completion transition, never on a
//!   repeated toggle to the same state.

use super::{check_optional_text, require_text, ValidationError, UNSAVED_ID};
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub type TaskId = i64;

/// Task urgency level.
///
/// `MediumAccented` mirrors the accented `MÉDIA` spelling accepted from
/// clients; it ranks the same as `Medium`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TaskPriority {
    #[default]
    Low,
    Medium,
    MediumAccented,
    High,
}

impl TaskPriority {
    /// Stable storage/wire code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "BAIXA",
            Self::Medium => "MEDIA",
            Self::MediumAccented => "MEDIA_ACENTUADA",
            Self::High => "ALTA",
        }
    }

    /// Sort weight: low=1, medium=2, high=3.
    pub fn weight(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium | Self::MediumAccented => 2,
            Self::High => 3,
        }
    }
}

impl Display for TaskPriority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = ValidationError;

    /// Parses case-insensitively; accepts `MÉDIA` as the accented medium.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_uppercase().as_str() {
            "BAIXA" => Ok(Self::Low),
            "MEDIA" => Ok(Self::Medium),
            "MÉDIA" | "MEDIA_ACENTUADA" => Ok(Self::MediumAccented),
            "ALTA" => Ok(Self::High),
            _ => Err(ValidationError::UnknownVariant {
                field: "priority",
                value: value.to_string(),
            }),
        }
    }
}

/// Area of life a task belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TaskCategory {
    #[default]
    Study,
    Work,
    Personal,
    Other,
}

impl TaskCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Study => "STUDY",
            Self::Work => "WORK",
            Self::Personal => "PERSONAL",
            Self::Other => "OTHER",
        }
    }
}

impl Display for TaskCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskCategory {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_uppercase().as_str() {
            "STUDY" => Ok(Self::Study),
            "WORK" => Ok(Self::Work),
            "PERSONAL" => Ok(Self::Personal),
            "OTHER" => Ok(Self::Other),
            _ => Err(ValidationError::UnknownVariant {
                field: "category",
                value: value.to_string(),
            }),
        }
    }
}

/// To-do item with deadline and completion bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    completed: bool,
    pub due_date: Option<NaiveDate>,
    pub priority: TaskPriority,
    pub category: TaskCategory,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    completed_at: Option<NaiveDateTime>,
}

impl Task {
    pub const TITLE_MAX_CHARS: usize = 255;
    pub const DESCRIPTION_MAX_CHARS: usize = 1000;

    /// Creates an unsaved, open task with default priority and category.
    pub fn new(title: impl Into<String>, now: NaiveDateTime) -> Self {
        Self {
            id: UNSAVED_ID,
            title: title.into(),
            description: None,
            completed: false,
            due_date: None,
            priority: TaskPriority::default(),
            category: TaskCategory::default(),
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// Rebuilds a task from persisted columns. Callers must validate.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        id: TaskId,
        title: String,
        description: Option<String>,
        completed: bool,
        due_date: Option<NaiveDate>,
        priority: TaskPriority,
        category: TaskCategory,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
        completed_at: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            completed,
            due_date,
            priority,
            category,
            created_at,
            updated_at,
            completed_at,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn completed_at(&self) -> Option<NaiveDateTime> {
        self.completed_at
    }

    /// Sets the completion flag.
    ///
    /// Stamps `completed_at = now` on open→done and clears it on done→open.
    /// Returns whether the state actually changed.
    pub fn set_completed(&mut self, completed: bool, now: NaiveDateTime) -> bool {
        if self.completed == completed {
            return false;
        }
        self.completed = completed;
        self.completed_at = completed.then_some(now);
        true
    }

    pub fn mark_completed(&mut self, now: NaiveDateTime) -> bool {
        self.set_completed(true, now)
    }

    pub fn reopen(&mut self, now: NaiveDateTime) -> bool {
        self.set_completed(false, now)
    }

    pub fn touch(&mut self, now: NaiveDateTime) {
        self.updated_at = now.max(self.created_at);
    }

    /// True when still open and `today` is past the due date.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date.is_some_and(|due| today > due)
    }

    /// Days from `today` until the due date, floored at zero.
    ///
    /// `None` for tasks without a due date or already completed.
    pub fn days_until_due(&self, today: NaiveDate) -> Option<i64> {
        if self.completed {
            return None;
        }
        let due = self.due_date?;
        Some((due - today).num_days().max(0))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title, Self::TITLE_MAX_CHARS)?;
        check_optional_text(
            "description",
            self.description.as_deref(),
            Self::DESCRIPTION_MAX_CHARS,
        )?;
        if self.completed != self.completed_at.is_some() {
            return Err(ValidationError::Inconsistent(
                "task completed_at must be set iff the task is completed",
            ));
        }
        Ok(())
    }
}

/// Field set accepted by task create/update use-cases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<TaskPriority>,
    pub category: Option<TaskCategory>,
}

/// Completed vs. pending task counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    pub completed: i64,
    pub pending: i64,
}
