//! Role-gated maintenance of the reference catalogs.
//!
//! Listing a catalog is open to any authenticated viewer (the schedule views
//! need the names and the filter options); mutation requires catalog editor
//! roles, and the instructor directory only accepts administrators.

use crate::api::{
    Course, CourseDraft, CourseId, Instructor, InstructorDraft, InstructorId, Laboratory,
    LaboratoryDraft, LaboratoryId, Viewer,
};
use crate::db::repository::{CatalogRepository, FullRepository};
use crate::services::access::{self, CATALOG_EDITORS, DIRECTORY_ADMINS};
use crate::services::error::{SchedulingError, ServiceResult};

fn require_nonempty(value: &str, field: &str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        return Err(SchedulingError::Validation(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(())
}

pub async fn list_instructors(repo: &dyn FullRepository) -> ServiceResult<Vec<Instructor>> {
    Ok(repo.list_instructors().await?)
}

pub async fn create_instructor(
    repo: &dyn FullRepository,
    viewer: &Viewer,
    draft: &InstructorDraft,
) -> ServiceResult<Instructor> {
    access::require_role(viewer, DIRECTORY_ADMINS, "manage instructors")?;
    require_nonempty(&draft.full_name, "Instructor name")?;
    Ok(repo.insert_instructor(draft).await?)
}

pub async fn update_instructor(
    repo: &dyn FullRepository,
    viewer: &Viewer,
    id: InstructorId,
    draft: &InstructorDraft,
) -> ServiceResult<Instructor> {
    access::require_role(viewer, DIRECTORY_ADMINS, "manage instructors")?;
    require_nonempty(&draft.full_name, "Instructor name")?;
    Ok(repo.update_instructor(id, draft).await?)
}

pub async fn delete_instructor(
    repo: &dyn FullRepository,
    viewer: &Viewer,
    id: InstructorId,
) -> ServiceResult<()> {
    access::require_role(viewer, DIRECTORY_ADMINS, "manage instructors")?;
    Ok(repo.delete_instructor(id).await?)
}

pub async fn list_laboratories(repo: &dyn FullRepository) -> ServiceResult<Vec<Laboratory>> {
    Ok(repo.list_laboratories().await?)
}

pub async fn create_laboratory(
    repo: &dyn FullRepository,
    viewer: &Viewer,
    draft: &LaboratoryDraft,
) -> ServiceResult<Laboratory> {
    access::require_role(viewer, CATALOG_EDITORS, "manage laboratories")?;
    require_nonempty(&draft.name, "Laboratory name")?;
    Ok(repo.insert_laboratory(draft).await?)
}

pub async fn update_laboratory(
    repo: &dyn FullRepository,
    viewer: &Viewer,
    id: LaboratoryId,
    draft: &LaboratoryDraft,
) -> ServiceResult<Laboratory> {
    access::require_role(viewer, CATALOG_EDITORS, "manage laboratories")?;
    require_nonempty(&draft.name, "Laboratory name")?;
    Ok(repo.update_laboratory(id, draft).await?)
}

pub async fn delete_laboratory(
    repo: &dyn FullRepository,
    viewer: &Viewer,
    id: LaboratoryId,
) -> ServiceResult<()> {
    access::require_role(viewer, CATALOG_EDITORS, "manage laboratories")?;
    Ok(repo.delete_laboratory(id).await?)
}

pub async fn list_courses(repo: &dyn FullRepository) -> ServiceResult<Vec<Course>> {
    Ok(repo.list_courses().await?)
}

pub async fn create_course(
    repo: &dyn FullRepository,
    viewer: &Viewer,
    draft: &CourseDraft,
) -> ServiceResult<Course> {
    access::require_role(viewer, CATALOG_EDITORS, "manage courses")?;
    require_nonempty(&draft.code, "Course code")?;
    require_nonempty(&draft.name, "Course name")?;
    Ok(repo.insert_course(draft).await?)
}

pub async fn update_course(
    repo: &dyn FullRepository,
    viewer: &Viewer,
    id: CourseId,
    draft: &CourseDraft,
) -> ServiceResult<Course> {
    access::require_role(viewer, CATALOG_EDITORS, "manage courses")?;
    require_nonempty(&draft.code, "Course code")?;
    require_nonempty(&draft.name, "Course name")?;
    Ok(repo.update_course(id, draft).await?)
}

pub async fn delete_course(
    repo: &dyn FullRepository,
    viewer: &Viewer,
    id: CourseId,
) -> ServiceResult<()> {
    access::require_role(viewer, CATALOG_EDITORS, "manage courses")?;
    Ok(repo.delete_course(id).await?)
}
