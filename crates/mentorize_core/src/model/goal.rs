//! Goal domain model.
//!
//! # Responsibility
//! - Track progress toward an objective on a 0..=100 scale.
//! - Derive overdue state and days remaining from the due date.
//!
//! # Invariants
//! - `progress` is always clamped into `0..=100`.
//! - `completed == (progress == 100)`: reaching 100 completes the goal and
//!   completing the goal raises progress to 100.

use super::{check_optional_text, require_text, ValidationError, UNSAVED_ID};
use chrono::NaiveDateTime;

pub type GoalId = i64;

/// Progress-tracked objective with an optional deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goal {
    pub id: GoalId,
    pub name: String,
    pub description: Option<String>,
    progress: i64,
    /// Free-form tag such as `academica`, `pessoal` or `profissional`.
    pub category: Option<String>,
    pub start_date: NaiveDateTime,
    pub due_date: Option<NaiveDateTime>,
    completed: bool,
}

impl Goal {
    pub const NAME_MAX_CHARS: usize = 255;
    pub const DESCRIPTION_MAX_CHARS: usize = 1000;
    pub const CATEGORY_MAX_CHARS: usize = 50;
    pub const PROGRESS_MIN: i64 = 0;
    pub const PROGRESS_MAX: i64 = 100;

    /// Creates an unsaved goal with zero progress starting at `start_date`.
    pub fn new(name: impl Into<String>, start_date: NaiveDateTime) -> Self {
        Self {
            id: UNSAVED_ID,
            name: name.into(),
            description: None,
            progress: Self::PROGRESS_MIN,
            category: None,
            start_date,
            due_date: None,
            completed: false,
        }
    }

    /// Rebuilds a goal from persisted columns without re-applying rules.
    ///
    /// Callers must run [`Goal::validate`] on the result.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        id: GoalId,
        name: String,
        description: Option<String>,
        progress: i64,
        category: Option<String>,
        start_date: NaiveDateTime,
        due_date: Option<NaiveDateTime>,
        completed: bool,
    ) -> Self {
        Self {
            id,
            name,
            description,
            progress,
            category,
            start_date,
            due_date,
            completed,
        }
    }

    pub fn progress(&self) -> i64 {
        self.progress
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Sets progress, clamped into `0..=100`. Reaching 100 completes the goal.
    pub fn set_progress(&mut self, progress: i64) {
        self.progress = progress.clamp(Self::PROGRESS_MIN, Self::PROGRESS_MAX);
        self.completed = self.progress == Self::PROGRESS_MAX;
    }

    pub fn add_progress(&mut self, delta: i64) {
        self.set_progress(self.progress.saturating_add(delta));
    }

    pub fn subtract_progress(&mut self, delta: i64) {
        self.set_progress(self.progress.saturating_sub(delta));
    }

    /// Forces the completion flag.
    ///
    /// Completing raises progress to 100. Reopening is only effective once
    /// progress is below 100; a goal at 100 stays completed.
    pub fn set_completed(&mut self, completed: bool) {
        if completed {
            self.progress = Self::PROGRESS_MAX;
            self.completed = true;
        } else {
            self.completed = self.progress == Self::PROGRESS_MAX;
        }
    }

    /// True when the goal is still open and its deadline has passed.
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < now)
    }

    /// Whole days left until the deadline.
    ///
    /// `None` for goals without a deadline or already completed; `0` once the
    /// deadline has passed.
    pub fn days_remaining(&self, now: NaiveDateTime) -> Option<i64> {
        if self.completed {
            return None;
        }
        let due = self.due_date?;
        if now > due {
            return Some(0);
        }
        Some((due - now).num_days())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name, Self::NAME_MAX_CHARS)?;
        check_optional_text(
            "description",
            self.description.as_deref(),
            Self::DESCRIPTION_MAX_CHARS,
        )?;
        check_optional_text(
            "category",
            self.category.as_deref(),
            Self::CATEGORY_MAX_CHARS,
        )?;
        check_progress_range(self.progress)?;
        if self.completed != (self.progress == Self::PROGRESS_MAX) {
            return Err(ValidationError::Inconsistent(
                "goal completion must match progress == 100",
            ));
        }
        Ok(())
    }
}

/// Rejects progress values outside `0..=100` instead of clamping them.
///
/// Used for request bodies, where an out-of-range value is a client error.
pub fn check_progress_range(progress: i64) -> Result<(), ValidationError> {
    if !(Goal::PROGRESS_MIN..=Goal::PROGRESS_MAX).contains(&progress) {
        return Err(ValidationError::OutOfRange {
            field: "progress",
            min: Goal::PROGRESS_MIN,
            max: Goal::PROGRESS_MAX,
            value: progress,
        });
    }
    Ok(())
}

/// Field set accepted by goal create/update use-cases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub progress: Option<i64>,
    pub category: Option<String>,
    pub due_date: Option<NaiveDateTime>,
    pub completed: Option<bool>,
}

/// Aggregate view over all stored goals.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalStats {
    pub total: i64,
    pub completed: i64,
    /// Mean progress of goals not yet completed; `None` when there are none.
    pub average_active_progress: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::Goal;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .unwrap()
    }

    #[test]
    fn new_goal_starts_at_zero_and_open() {
        let goal = Goal::new("Read 12 books", at(1, 8));
        assert_eq!(goal.progress(), 0);
        assert!(!goal.is_completed());
        assert!(goal.validate().is_ok());
    }

    #[test]
    fn progress_above_range_clamps_and_completes() {
        let mut goal = Goal::new("Ship it", at(1, 8));
        goal.set_progress(150);
        assert_eq!(goal.progress(), 100);
        assert!(goal.is_completed());
    }

    #[test]
    fn negative_progress_clamps_to_zero() {
        let mut goal = Goal::new("Ship it", at(1, 8));
        goal.set_progress(-20);
        assert_eq!(goal.progress(), 0);
        assert!(!goal.is_completed());
    }

    #[test]
    fn forcing_completion_raises_progress() {
        let mut goal = Goal::new("Ship it", at(1, 8));
        goal.set_progress(40);
        goal.set_completed(true);
        assert_eq!(goal.progress(), 100);
        assert!(goal.is_completed());
    }

    #[test]
    fn reopening_needs_progress_below_hundred() {
        let mut goal = Goal::new("Ship it", at(1, 8));
        goal.set_completed(true);
        goal.set_completed(false);
        assert!(goal.is_completed());

        goal.set_progress(80);
        goal.set_completed(false);
        assert!(!goal.is_completed());
        assert_eq!(goal.progress(), 80);
    }

    #[test]
    fn add_and_subtract_progress_stay_in_range() {
        let mut goal = Goal::new("Ship it", at(1, 8));
        goal.add_progress(70);
        goal.add_progress(70);
        assert_eq!(goal.progress(), 100);
        goal.subtract_progress(300);
        assert_eq!(goal.progress(), 0);
        assert!(!goal.is_completed());
    }

    #[test]
    fn past_deadline_reports_overdue_and_zero_days() {
        let mut goal = Goal::new("Ship it", at(1, 8));
        goal.due_date = Some(at(3, 12));
        let now = at(10, 9);
        assert!(goal.is_overdue(now));
        assert_eq!(goal.days_remaining(now), Some(0));
    }

    #[test]
    fn days_remaining_truncates_partial_days() {
        let mut goal = Goal::new("Ship it", at(1, 8));
        let now = at(10, 9);
        goal.due_date = Some(now + Duration::hours(71));
        assert_eq!(goal.days_remaining(now), Some(2));
        assert!(!goal.is_overdue(now));
    }

    #[test]
    fn completed_or_undated_goal_has_no_days_remaining() {
        let now = at(10, 9);
        let mut goal = Goal::new("Ship it", at(1, 8));
        assert_eq!(goal.days_remaining(now), None);

        goal.due_date = Some(at(3, 12));
        goal.set_completed(true);
        assert_eq!(goal.days_remaining(now), None);
        assert!(!goal.is_overdue(now));
    }
}
