//! Visibility and filter engine for listing assignments.

use std::collections::HashSet;

use crate::api::{Assignment, AssignmentFilter, CourseId, Role, Viewer};
use crate::db::repository::{AssignmentRepository, CatalogRepository, FullRepository};
use crate::services::error::ServiceResult;

/// Produce the assignments a viewer is permitted and asked to see.
///
/// Lecturer viewers are restricted to their own assignments before any
/// user-supplied filter runs; this is a security boundary, so no filter
/// combination can widen a lecturer's result set. Remaining filters are
/// exact-match predicates composed by logical AND; the semester filter joins
/// the course catalog read-only. Results are ordered by assignment id.
pub async fn list_assignments(
    repo: &dyn FullRepository,
    viewer: &Viewer,
    filter: &AssignmentFilter,
) -> ServiceResult<Vec<Assignment>> {
    let mut rows = repo.list_assignments().await?;

    if viewer.role == Role::Lecturer {
        rows.retain(|a| a.instructor_id == viewer.id);
    }

    if let Some(lab_id) = filter.lab_id {
        rows.retain(|a| a.lab_id == lab_id);
    }
    if let Some(day) = filter.day {
        rows.retain(|a| a.day == day);
    }
    if let Some(time_slot) = filter.time_slot {
        rows.retain(|a| a.time_slot == time_slot);
    }
    if let Some(ref section) = filter.section {
        rows.retain(|a| a.section.as_deref() == Some(section.as_str()));
    }
    if let Some(semester) = filter.semester {
        let matching: HashSet<CourseId> = repo
            .list_courses()
            .await?
            .into_iter()
            .filter(|c| c.semester == Some(semester))
            .map(|c| c.id)
            .collect();
        rows.retain(|a| matching.contains(&a.course_id));
    }

    rows.sort_by_key(|a| a.id);
    Ok(rows)
}
