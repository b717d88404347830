use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{assignments, courses, instructors, laboratories};
use crate::api::{
    Assignment, AssignmentDraft, AssignmentId, Course, CourseDraft, CourseId, Instructor,
    InstructorDraft, InstructorId, Laboratory, LaboratoryDraft, LaboratoryId, Role, TimeSlot,
    Weekday,
};
use crate::db::repository::RepositoryError;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = instructors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct InstructorRow {
    pub id: i64,
    pub full_name: String,
    pub role: String,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = instructors)]
pub struct NewInstructorRow {
    pub full_name: String,
    pub role: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = laboratories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct LaboratoryRow {
    pub id: i64,
    pub name: String,
    pub capacity: i32,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = laboratories)]
pub struct NewLaboratoryRow {
    pub name: String,
    pub capacity: i32,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CourseRow {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub semester: Option<i32>,
    pub credits: Option<i32>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = courses)]
#[diesel(treat_none_as_null = true)]
pub struct NewCourseRow {
    pub code: String,
    pub name: String,
    pub semester: Option<i32>,
    pub credits: Option<i32>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = assignments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AssignmentRow {
    pub id: i64,
    pub course_id: i64,
    pub instructor_id: i64,
    pub lab_id: i64,
    pub day: String,
    pub time_slot: String,
    pub section: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = assignments)]
#[diesel(treat_none_as_null = true)]
pub struct NewAssignmentRow {
    pub course_id: i64,
    pub instructor_id: i64,
    pub lab_id: i64,
    pub day: String,
    pub time_slot: String,
    pub section: Option<String>,
}

impl TryFrom<InstructorRow> for Instructor {
    type Error = RepositoryError;

    fn try_from(row: InstructorRow) -> Result<Self, Self::Error> {
        let role: Role = row.role.parse().map_err(|e: String| {
            RepositoryError::internal(format!("Corrupt instructor row {}: {}", row.id, e))
        })?;
        Ok(Instructor {
            id: InstructorId::new(row.id),
            full_name: row.full_name,
            role,
        })
    }
}

impl From<LaboratoryRow> for Laboratory {
    fn from(row: LaboratoryRow) -> Self {
        Laboratory {
            id: LaboratoryId::new(row.id),
            name: row.name,
            capacity: row.capacity,
        }
    }
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        Course {
            id: CourseId::new(row.id),
            code: row.code,
            name: row.name,
            semester: row.semester,
            credits: row.credits,
        }
    }
}

impl TryFrom<AssignmentRow> for Assignment {
    type Error = RepositoryError;

    fn try_from(row: AssignmentRow) -> Result<Self, Self::Error> {
        let day: Weekday = row.day.parse().map_err(|e: String| {
            RepositoryError::internal(format!("Corrupt assignment row {}: {}", row.id, e))
        })?;
        let time_slot: TimeSlot = row.time_slot.parse().map_err(|e| {
            RepositoryError::internal(format!("Corrupt assignment row {}: {}", row.id, e))
        })?;
        Ok(Assignment {
            id: AssignmentId::new(row.id),
            course_id: CourseId::new(row.course_id),
            instructor_id: InstructorId::new(row.instructor_id),
            lab_id: LaboratoryId::new(row.lab_id),
            day,
            time_slot,
            section: row.section,
            created_at: row.created_at,
        })
    }
}

impl From<&InstructorDraft> for NewInstructorRow {
    fn from(draft: &InstructorDraft) -> Self {
        NewInstructorRow {
            full_name: draft.full_name.clone(),
            role: draft.role.as_str().to_string(),
        }
    }
}

impl From<&LaboratoryDraft> for NewLaboratoryRow {
    fn from(draft: &LaboratoryDraft) -> Self {
        NewLaboratoryRow {
            name: draft.name.clone(),
            capacity: draft.capacity,
        }
    }
}

impl From<&CourseDraft> for NewCourseRow {
    fn from(draft: &CourseDraft) -> Self {
        NewCourseRow {
            code: draft.code.clone(),
            name: draft.name.clone(),
            semester: draft.semester,
            credits: draft.credits,
        }
    }
}

impl From<&AssignmentDraft> for NewAssignmentRow {
    fn from(draft: &AssignmentDraft) -> Self {
        NewAssignmentRow {
            course_id: draft.course_id.value(),
            instructor_id: draft.instructor_id.value(),
            lab_id: draft.lab_id.value(),
            day: draft.day.as_str().to_string(),
            time_slot: draft.time_slot.to_string(),
            section: draft.section.clone(),
        }
    }
}
