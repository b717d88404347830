//! Error taxonomy for the scheduling services.

use crate::api::{AssignmentId, Role};
use crate::db::repository::RepositoryError;
use crate::scheduling::{Conflict, ConflictKind};

/// Result type for service operations
pub type ServiceResult<T> = Result<T, SchedulingError>;

/// Recoverable errors surfaced by the scheduling services.
///
/// Every variant maps to a user-facing message; none terminates the process
/// and a failed operation leaves the store in its prior state.
#[derive(Debug, thiserror::Error)]
pub enum SchedulingError {
    /// Malformed input or a dangling catalog reference.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The operation target does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The laboratory is already booked in the requested slot.
    #[error("Laboratory already booked by assignment {with}")]
    LabConflict { with: AssignmentId },

    /// The instructor is already booked in the requested slot.
    #[error("Instructor already booked by assignment {with}")]
    InstructorConflict { with: AssignmentId },

    /// The viewer's role does not permit the operation.
    #[error("Role {role} is not permitted to {action}")]
    Unauthorized { role: Role, action: String },

    /// The storage layer failed for reasons unrelated to the domain rules.
    #[error("Repository failure: {0}")]
    Repository(RepositoryError),
}

impl From<Conflict> for SchedulingError {
    fn from(conflict: Conflict) -> Self {
        match conflict.kind {
            ConflictKind::LabBooked => SchedulingError::LabConflict {
                with: conflict.with,
            },
            ConflictKind::InstructorBooked => SchedulingError::InstructorConflict {
                with: conflict.with,
            },
        }
    }
}

impl From<RepositoryError> for SchedulingError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::SlotConflict { conflict, .. } => conflict.into(),
            RepositoryError::NotFound { message, .. } => SchedulingError::NotFound(message),
            RepositoryError::ValidationError { message, .. } => {
                SchedulingError::Validation(message)
            }
            other => SchedulingError::Repository(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::ErrorContext;

    #[test]
    fn test_conflict_maps_to_typed_variant() {
        let err: SchedulingError = Conflict {
            kind: ConflictKind::LabBooked,
            with: AssignmentId::new(3),
        }
        .into();
        assert!(matches!(
            err,
            SchedulingError::LabConflict { with } if with == AssignmentId::new(3)
        ));
    }

    #[test]
    fn test_repository_slot_conflict_is_unwrapped() {
        let repo_err = RepositoryError::slot_conflict(
            Conflict {
                kind: ConflictKind::InstructorBooked,
                with: AssignmentId::new(9),
            },
            ErrorContext::new("insert_assignment"),
        );
        let err: SchedulingError = repo_err.into();
        assert!(matches!(
            err,
            SchedulingError::InstructorConflict { with } if with == AssignmentId::new(9)
        ));
    }

    #[test]
    fn test_repository_not_found_becomes_not_found() {
        let err: SchedulingError = RepositoryError::not_found("assignment 4 not found").into();
        assert!(matches!(err, SchedulingError::NotFound(_)));
    }

    #[test]
    fn test_opaque_repository_errors_stay_wrapped() {
        let err: SchedulingError = RepositoryError::internal("boom").into();
        assert!(matches!(err, SchedulingError::Repository(_)));
    }
}
