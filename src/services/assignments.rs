//! Assignment lifecycle: create, update, delete.
//!
//! Each operation gates on the viewer's role, validates catalog references,
//! runs the conflict pre-check over a store snapshot for a friendly error,
//! then commits through the repository, whose own exclusivity regime is the
//! authoritative check against racing writers. A failed operation leaves the
//! store unchanged.

use crate::api::{Assignment, AssignmentDraft, AssignmentId, Viewer};
use crate::db::repository::{
    AssignmentRepository, CatalogRepository, FullRepository, RepositoryError,
};
use crate::scheduling::find_conflict;
use crate::services::access::{self, SCHEDULE_EDITORS};
use crate::services::error::{SchedulingError, ServiceResult};

/// Verify every catalog reference in the draft resolves (referential
/// integrity at the moment of the write). A missing record is a validation
/// failure on the input, not a missing operation target.
async fn validate_references(
    repo: &dyn FullRepository,
    draft: &AssignmentDraft,
) -> ServiceResult<()> {
    if let Err(err) = repo.get_course(draft.course_id).await {
        return Err(dangling(err, format!("Course {} does not exist", draft.course_id)));
    }
    if let Err(err) = repo.get_instructor(draft.instructor_id).await {
        return Err(dangling(
            err,
            format!("Instructor {} does not exist", draft.instructor_id),
        ));
    }
    if let Err(err) = repo.get_laboratory(draft.lab_id).await {
        return Err(dangling(
            err,
            format!("Laboratory {} does not exist", draft.lab_id),
        ));
    }
    Ok(())
}

fn dangling(err: RepositoryError, message: String) -> SchedulingError {
    match err {
        RepositoryError::NotFound { .. } => SchedulingError::Validation(message),
        other => other.into(),
    }
}

/// Create a new assignment.
///
/// Returns the stored record with its fresh identifier and creation
/// timestamp, or the first rule the candidate violates.
pub async fn create_assignment(
    repo: &dyn FullRepository,
    viewer: &Viewer,
    draft: &AssignmentDraft,
) -> ServiceResult<Assignment> {
    access::require_role(viewer, SCHEDULE_EDITORS, "create assignments")?;
    validate_references(repo, draft).await?;

    let snapshot = repo.list_assignments().await?;
    if let Some(conflict) = find_conflict(draft, None, &snapshot, repo.conflict_scope()) {
        return Err(conflict.into());
    }

    let stored = repo.insert_assignment(draft).await?;
    log::info!(
        "assignment {} created: lab {} {} {}",
        stored.id,
        stored.lab_id,
        stored.day,
        stored.time_slot
    );
    Ok(stored)
}

/// Replace the scheduling fields of an existing assignment.
///
/// The identifier and creation timestamp are preserved; the target itself is
/// excluded from conflict comparison so re-submitting its current slot is
/// not a conflict.
pub async fn update_assignment(
    repo: &dyn FullRepository,
    viewer: &Viewer,
    id: AssignmentId,
    draft: &AssignmentDraft,
) -> ServiceResult<Assignment> {
    access::require_role(viewer, SCHEDULE_EDITORS, "update assignments")?;

    // Surface NotFound before validation so a bad id on a bad payload reports
    // the missing target.
    repo.get_assignment(id).await?;
    validate_references(repo, draft).await?;

    let snapshot = repo.list_assignments().await?;
    if let Some(conflict) = find_conflict(draft, Some(id), &snapshot, repo.conflict_scope()) {
        return Err(conflict.into());
    }

    let stored = repo.update_assignment(id, draft).await?;
    log::info!("assignment {} updated", stored.id);
    Ok(stored)
}

/// Delete an assignment. Deleting an unknown identifier reports `NotFound`
/// and never alters the store; there are no cascading side effects.
pub async fn delete_assignment(
    repo: &dyn FullRepository,
    viewer: &Viewer,
    id: AssignmentId,
) -> ServiceResult<()> {
    access::require_role(viewer, SCHEDULE_EDITORS, "delete assignments")?;
    repo.delete_assignment(id).await?;
    log::info!("assignment {} deleted", id);
    Ok(())
}
