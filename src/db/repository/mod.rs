//! Repository trait definitions.
//!
//! The traits are split along the data they own: the reference catalogs
//! (instructors, laboratories, courses) and the assignment store. Storage
//! backends implement both; consumers usually depend on [`FullRepository`].

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;

use crate::api::{
    Assignment, AssignmentDraft, AssignmentId, Course, CourseDraft, CourseId, Instructor,
    InstructorDraft, InstructorId, Laboratory, LaboratoryDraft, LaboratoryId,
};
use crate::scheduling::ConflictScope;

/// Read and mutate the reference catalogs.
///
/// Catalog records referenced by live assignments cannot be deleted; the
/// storage layer rejects the delete the same way a relational foreign key
/// would.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn get_instructor(&self, id: InstructorId) -> RepositoryResult<Instructor>;
    async fn list_instructors(&self) -> RepositoryResult<Vec<Instructor>>;
    async fn insert_instructor(&self, draft: &InstructorDraft) -> RepositoryResult<Instructor>;
    async fn update_instructor(
        &self,
        id: InstructorId,
        draft: &InstructorDraft,
    ) -> RepositoryResult<Instructor>;
    async fn delete_instructor(&self, id: InstructorId) -> RepositoryResult<()>;

    async fn get_laboratory(&self, id: LaboratoryId) -> RepositoryResult<Laboratory>;
    async fn list_laboratories(&self) -> RepositoryResult<Vec<Laboratory>>;
    async fn insert_laboratory(&self, draft: &LaboratoryDraft) -> RepositoryResult<Laboratory>;
    async fn update_laboratory(
        &self,
        id: LaboratoryId,
        draft: &LaboratoryDraft,
    ) -> RepositoryResult<Laboratory>;
    async fn delete_laboratory(&self, id: LaboratoryId) -> RepositoryResult<()>;

    async fn get_course(&self, id: CourseId) -> RepositoryResult<Course>;
    async fn list_courses(&self) -> RepositoryResult<Vec<Course>>;
    async fn insert_course(&self, draft: &CourseDraft) -> RepositoryResult<Course>;
    async fn update_course(&self, id: CourseId, draft: &CourseDraft) -> RepositoryResult<Course>;
    async fn delete_course(&self, id: CourseId) -> RepositoryResult<()>;
}

/// Read and mutate the assignment store.
///
/// Writes are atomic check-then-mutate sequences: each implementation
/// re-validates referential integrity and slot exclusivity under its own
/// exclusivity regime (write lock or transaction plus unique index), so a
/// caller racing another writer gets a typed error instead of a corrupted
/// store.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// The scope projection this store enforces.
    fn conflict_scope(&self) -> ConflictScope;

    async fn get_assignment(&self, id: AssignmentId) -> RepositoryResult<Assignment>;
    async fn list_assignments(&self) -> RepositoryResult<Vec<Assignment>>;
    async fn insert_assignment(&self, draft: &AssignmentDraft) -> RepositoryResult<Assignment>;
    /// Replace every draft field of an existing assignment; the identifier
    /// and creation timestamp are preserved.
    async fn update_assignment(
        &self,
        id: AssignmentId,
        draft: &AssignmentDraft,
    ) -> RepositoryResult<Assignment>;
    async fn delete_assignment(&self, id: AssignmentId) -> RepositoryResult<()>;
}

/// Everything a storage backend provides.
#[async_trait]
pub trait FullRepository: CatalogRepository + AssignmentRepository {
    /// Verify the backend is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
