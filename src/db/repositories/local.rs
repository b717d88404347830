//! In-memory repository implementation.
//!
//! Backs development, tests and single-process deployments. A single
//! `RwLock` guards the whole store: every write runs its full
//! check-then-mutate sequence under the exclusive write guard, which is the
//! serialization point that keeps the exclusivity invariants race-free.
//! Readers take the shared guard and never observe a partially applied
//! write.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::BTreeMap;

use crate::api::{
    Assignment, AssignmentDraft, AssignmentId, Course, CourseDraft, CourseId, Instructor,
    InstructorDraft, InstructorId, Laboratory, LaboratoryDraft, LaboratoryId,
};
use crate::db::repository::{
    AssignmentRepository, CatalogRepository, ErrorContext, FullRepository, RepositoryError,
    RepositoryResult,
};
use crate::scheduling::{find_conflict, ConflictScope};

#[derive(Debug, Default)]
struct StoreState {
    instructors: BTreeMap<i64, Instructor>,
    laboratories: BTreeMap<i64, Laboratory>,
    courses: BTreeMap<i64, Course>,
    assignments: BTreeMap<i64, Assignment>,
    next_instructor_id: i64,
    next_laboratory_id: i64,
    next_course_id: i64,
    next_assignment_id: i64,
}

impl StoreState {
    fn next_id(counter: &mut i64) -> i64 {
        *counter += 1;
        *counter
    }

    fn validate_references(
        &self,
        draft: &AssignmentDraft,
        operation: &str,
    ) -> RepositoryResult<()> {
        if !self.courses.contains_key(&draft.course_id.value()) {
            return Err(RepositoryError::validation_with_context(
                format!("Course {} does not exist", draft.course_id),
                ErrorContext::new(operation).with_entity("course"),
            ));
        }
        if !self.instructors.contains_key(&draft.instructor_id.value()) {
            return Err(RepositoryError::validation_with_context(
                format!("Instructor {} does not exist", draft.instructor_id),
                ErrorContext::new(operation).with_entity("instructor"),
            ));
        }
        if !self.laboratories.contains_key(&draft.lab_id.value()) {
            return Err(RepositoryError::validation_with_context(
                format!("Laboratory {} does not exist", draft.lab_id),
                ErrorContext::new(operation).with_entity("laboratory"),
            ));
        }
        Ok(())
    }

    fn check_exclusivity(
        &self,
        draft: &AssignmentDraft,
        excluding: Option<AssignmentId>,
        scope: ConflictScope,
        operation: &str,
    ) -> RepositoryResult<()> {
        let snapshot: Vec<Assignment> = self.assignments.values().cloned().collect();
        if let Some(conflict) = find_conflict(draft, excluding, &snapshot, scope) {
            return Err(RepositoryError::slot_conflict(
                conflict,
                ErrorContext::new(operation).with_entity("assignment"),
            ));
        }
        Ok(())
    }
}

/// In-memory implementation of the repository traits.
#[derive(Debug)]
pub struct LocalRepository {
    state: RwLock<StoreState>,
    scope: ConflictScope,
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalRepository {
    /// Create an empty store with the default conflict scope.
    pub fn new() -> Self {
        Self::with_scope(ConflictScope::default())
    }

    /// Create an empty store enforcing the given conflict scope.
    pub fn with_scope(scope: ConflictScope) -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            scope,
        }
    }
}

fn missing(entity: &str, id: impl std::fmt::Display, operation: &str) -> RepositoryError {
    RepositoryError::not_found_with_context(
        format!("{} {} not found", entity, id),
        ErrorContext::new(operation).with_entity(entity).with_entity_id(id),
    )
}

#[async_trait]
impl CatalogRepository for LocalRepository {
    async fn get_instructor(&self, id: InstructorId) -> RepositoryResult<Instructor> {
        self.state
            .read()
            .instructors
            .get(&id.value())
            .cloned()
            .ok_or_else(|| missing("instructor", id, "get_instructor"))
    }

    async fn list_instructors(&self) -> RepositoryResult<Vec<Instructor>> {
        Ok(self.state.read().instructors.values().cloned().collect())
    }

    async fn insert_instructor(&self, draft: &InstructorDraft) -> RepositoryResult<Instructor> {
        let mut state = self.state.write();
        let id = StoreState::next_id(&mut state.next_instructor_id);
        let record = Instructor {
            id: InstructorId::new(id),
            full_name: draft.full_name.clone(),
            role: draft.role,
        };
        state.instructors.insert(id, record.clone());
        log::debug!("inserted instructor {}", record.id);
        Ok(record)
    }

    async fn update_instructor(
        &self,
        id: InstructorId,
        draft: &InstructorDraft,
    ) -> RepositoryResult<Instructor> {
        let mut state = self.state.write();
        let record = state
            .instructors
            .get_mut(&id.value())
            .ok_or_else(|| missing("instructor", id, "update_instructor"))?;
        record.full_name = draft.full_name.clone();
        record.role = draft.role;
        Ok(record.clone())
    }

    async fn delete_instructor(&self, id: InstructorId) -> RepositoryResult<()> {
        let mut state = self.state.write();
        if !state.instructors.contains_key(&id.value()) {
            return Err(missing("instructor", id, "delete_instructor"));
        }
        if state.assignments.values().any(|a| a.instructor_id == id) {
            return Err(RepositoryError::validation_with_context(
                format!("Instructor {} is still referenced by assignments", id),
                ErrorContext::new("delete_instructor").with_entity_id(id),
            ));
        }
        state.instructors.remove(&id.value());
        Ok(())
    }

    async fn get_laboratory(&self, id: LaboratoryId) -> RepositoryResult<Laboratory> {
        self.state
            .read()
            .laboratories
            .get(&id.value())
            .cloned()
            .ok_or_else(|| missing("laboratory", id, "get_laboratory"))
    }

    async fn list_laboratories(&self) -> RepositoryResult<Vec<Laboratory>> {
        Ok(self.state.read().laboratories.values().cloned().collect())
    }

    async fn insert_laboratory(&self, draft: &LaboratoryDraft) -> RepositoryResult<Laboratory> {
        if draft.capacity <= 0 {
            return Err(RepositoryError::validation_with_context(
                format!("Laboratory capacity must be positive, got {}", draft.capacity),
                ErrorContext::new("insert_laboratory"),
            ));
        }
        let mut state = self.state.write();
        let id = StoreState::next_id(&mut state.next_laboratory_id);
        let record = Laboratory {
            id: LaboratoryId::new(id),
            name: draft.name.clone(),
            capacity: draft.capacity,
        };
        state.laboratories.insert(id, record.clone());
        log::debug!("inserted laboratory {}", record.id);
        Ok(record)
    }

    async fn update_laboratory(
        &self,
        id: LaboratoryId,
        draft: &LaboratoryDraft,
    ) -> RepositoryResult<Laboratory> {
        if draft.capacity <= 0 {
            return Err(RepositoryError::validation_with_context(
                format!("Laboratory capacity must be positive, got {}", draft.capacity),
                ErrorContext::new("update_laboratory").with_entity_id(id),
            ));
        }
        let mut state = self.state.write();
        let record = state
            .laboratories
            .get_mut(&id.value())
            .ok_or_else(|| missing("laboratory", id, "update_laboratory"))?;
        record.name = draft.name.clone();
        record.capacity = draft.capacity;
        Ok(record.clone())
    }

    async fn delete_laboratory(&self, id: LaboratoryId) -> RepositoryResult<()> {
        let mut state = self.state.write();
        if !state.laboratories.contains_key(&id.value()) {
            return Err(missing("laboratory", id, "delete_laboratory"));
        }
        if state.assignments.values().any(|a| a.lab_id == id) {
            return Err(RepositoryError::validation_with_context(
                format!("Laboratory {} is still referenced by assignments", id),
                ErrorContext::new("delete_laboratory").with_entity_id(id),
            ));
        }
        state.laboratories.remove(&id.value());
        Ok(())
    }

    async fn get_course(&self, id: CourseId) -> RepositoryResult<Course> {
        self.state
            .read()
            .courses
            .get(&id.value())
            .cloned()
            .ok_or_else(|| missing("course", id, "get_course"))
    }

    async fn list_courses(&self) -> RepositoryResult<Vec<Course>> {
        Ok(self.state.read().courses.values().cloned().collect())
    }

    async fn insert_course(&self, draft: &CourseDraft) -> RepositoryResult<Course> {
        let mut state = self.state.write();
        if state.courses.values().any(|c| c.code == draft.code) {
            return Err(RepositoryError::validation_with_context(
                format!("Course code '{}' is already in use", draft.code),
                ErrorContext::new("insert_course"),
            ));
        }
        let id = StoreState::next_id(&mut state.next_course_id);
        let record = Course {
            id: CourseId::new(id),
            code: draft.code.clone(),
            name: draft.name.clone(),
            semester: draft.semester,
            credits: draft.credits,
        };
        state.courses.insert(id, record.clone());
        log::debug!("inserted course {}", record.id);
        Ok(record)
    }

    async fn update_course(&self, id: CourseId, draft: &CourseDraft) -> RepositoryResult<Course> {
        let mut state = self.state.write();
        if state
            .courses
            .values()
            .any(|c| c.code == draft.code && c.id != id)
        {
            return Err(RepositoryError::validation_with_context(
                format!("Course code '{}' is already in use", draft.code),
                ErrorContext::new("update_course").with_entity_id(id),
            ));
        }
        let record = state
            .courses
            .get_mut(&id.value())
            .ok_or_else(|| missing("course", id, "update_course"))?;
        record.code = draft.code.clone();
        record.name = draft.name.clone();
        record.semester = draft.semester;
        record.credits = draft.credits;
        Ok(record.clone())
    }

    async fn delete_course(&self, id: CourseId) -> RepositoryResult<()> {
        let mut state = self.state.write();
        if !state.courses.contains_key(&id.value()) {
            return Err(missing("course", id, "delete_course"));
        }
        if state.assignments.values().any(|a| a.course_id == id) {
            return Err(RepositoryError::validation_with_context(
                format!("Course {} is still referenced by assignments", id),
                ErrorContext::new("delete_course").with_entity_id(id),
            ));
        }
        state.courses.remove(&id.value());
        Ok(())
    }
}

#[async_trait]
impl AssignmentRepository for LocalRepository {
    fn conflict_scope(&self) -> ConflictScope {
        self.scope
    }

    async fn get_assignment(&self, id: AssignmentId) -> RepositoryResult<Assignment> {
        self.state
            .read()
            .assignments
            .get(&id.value())
            .cloned()
            .ok_or_else(|| missing("assignment", id, "get_assignment"))
    }

    async fn list_assignments(&self) -> RepositoryResult<Vec<Assignment>> {
        // BTreeMap iteration yields ascending identifiers.
        Ok(self.state.read().assignments.values().cloned().collect())
    }

    async fn insert_assignment(&self, draft: &AssignmentDraft) -> RepositoryResult<Assignment> {
        let mut state = self.state.write();
        state.validate_references(draft, "insert_assignment")?;
        state.check_exclusivity(draft, None, self.scope, "insert_assignment")?;

        let id = StoreState::next_id(&mut state.next_assignment_id);
        let record = Assignment {
            id: AssignmentId::new(id),
            course_id: draft.course_id,
            instructor_id: draft.instructor_id,
            lab_id: draft.lab_id,
            day: draft.day,
            time_slot: draft.time_slot,
            section: draft.section.clone(),
            created_at: Utc::now(),
        };
        state.assignments.insert(id, record.clone());
        log::debug!(
            "inserted assignment {} ({} {} lab {})",
            record.id,
            record.day,
            record.time_slot,
            record.lab_id
        );
        Ok(record)
    }

    async fn update_assignment(
        &self,
        id: AssignmentId,
        draft: &AssignmentDraft,
    ) -> RepositoryResult<Assignment> {
        let mut state = self.state.write();
        if !state.assignments.contains_key(&id.value()) {
            return Err(missing("assignment", id, "update_assignment"));
        }
        state.validate_references(draft, "update_assignment")?;
        state.check_exclusivity(draft, Some(id), self.scope, "update_assignment")?;

        let record = state
            .assignments
            .get_mut(&id.value())
            .ok_or_else(|| missing("assignment", id, "update_assignment"))?;
        record.course_id = draft.course_id;
        record.instructor_id = draft.instructor_id;
        record.lab_id = draft.lab_id;
        record.day = draft.day;
        record.time_slot = draft.time_slot;
        record.section = draft.section.clone();
        log::debug!("updated assignment {}", id);
        Ok(record.clone())
    }

    async fn delete_assignment(&self, id: AssignmentId) -> RepositoryResult<()> {
        let mut state = self.state.write();
        state
            .assignments
            .remove(&id.value())
            .map(|_| log::debug!("deleted assignment {}", id))
            .ok_or_else(|| missing("assignment", id, "delete_assignment"))
    }
}

#[async_trait]
impl FullRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}
