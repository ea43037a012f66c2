//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Apply partial-update semantics and stamp timestamps.
//! - Keep the HTTP layer decoupled from storage details.
//!
//! # Invariants
//! - Every create/update returns the record as read back from storage.
//! - A missing id surfaces as [`ServiceError::NotFound`] on every path.

use crate::model::ValidationError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod goal_service;
pub mod note_service;
pub mod study_service;
pub mod task_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error shared by all use-case services.
#[derive(Debug)]
pub enum ServiceError {
    /// Target record does not exist.
    NotFound { entity: &'static str, id: i64 },
    /// Input rejected by field rules.
    Validation(ValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{entity} not found with id: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Unwraps a required create-time field.
fn required<T>(field: &'static str, value: Option<T>) -> ServiceResult<T> {
    value.ok_or(ServiceError::Validation(ValidationError::Missing { field }))
}

#[cfg(test)]
mod tests {
    use super::ServiceError;
    use crate::model::ValidationError;
    use crate::repo::RepoError;

    #[test]
    fn repo_not_found_keeps_entity_and_id() {
        let err = ServiceError::from(RepoError::NotFound {
            entity: "goal",
            id: 7,
        });
        assert!(matches!(
            err,
            ServiceError::NotFound {
                entity: "goal",
                id: 7
            }
        ));
        assert_eq!(err.to_string(), "goal not found with id: 7");
    }

    #[test]
    fn repo_validation_is_lifted() {
        let err = ServiceError::from(RepoError::Validation(ValidationError::Blank {
            field: "title",
        }));
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
