//! Data Transfer Objects for the HTTP API.
//!
//! Scheduling fields travel as plain strings on the wire (matching the form
//! fields of the original system); parsing into the validated domain types
//! happens here so malformed input turns into a 400 instead of reaching the
//! core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::AppError;
use crate::api::{
    Assignment, AssignmentDraft, AssignmentFilter, CourseDraft, CourseId, InstructorDraft,
    InstructorId, LaboratoryDraft, LaboratoryId, Role, TimeSlot, Weekday,
};

/// Request body for creating or updating an assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentRequest {
    pub course_id: i64,
    pub instructor_id: i64,
    pub lab_id: i64,
    /// Weekday name, e.g. "monday"
    pub day: String,
    /// Canonical slot string, e.g. "08:00-09:40"
    pub time_slot: String,
    #[serde(default)]
    pub section: Option<String>,
}

impl AssignmentRequest {
    /// Parse the raw fields into a validated draft.
    pub fn into_draft(self) -> Result<AssignmentDraft, AppError> {
        let day: Weekday = self
            .day
            .parse()
            .map_err(|e: String| AppError::BadRequest(e))?;
        let time_slot: TimeSlot = self
            .time_slot
            .parse()
            .map_err(|e: crate::models::TimeSlotError| AppError::BadRequest(e.to_string()))?;
        Ok(AssignmentDraft {
            course_id: CourseId::new(self.course_id),
            instructor_id: InstructorId::new(self.instructor_id),
            lab_id: LaboratoryId::new(self.lab_id),
            day,
            time_slot,
            section: self.section,
        })
    }
}

/// Assignment record as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentDto {
    pub id: i64,
    pub course_id: i64,
    pub instructor_id: i64,
    pub lab_id: i64,
    pub day: String,
    pub time_slot: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Assignment> for AssignmentDto {
    fn from(a: Assignment) -> Self {
        Self {
            id: a.id.value(),
            course_id: a.course_id.value(),
            instructor_id: a.instructor_id.value(),
            lab_id: a.lab_id.value(),
            day: a.day.to_string(),
            time_slot: a.time_slot.to_string(),
            section: a.section,
            created_at: a.created_at,
        }
    }
}

/// Assignment list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentListResponse {
    pub assignments: Vec<AssignmentDto>,
    pub total: usize,
}

/// Query parameters for listing assignments.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AssignmentListQuery {
    #[serde(default)]
    pub lab_id: Option<i64>,
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub time_slot: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub semester: Option<i32>,
}

impl AssignmentListQuery {
    /// Parse the raw query fields into typed filter predicates.
    pub fn into_filter(self) -> Result<AssignmentFilter, AppError> {
        let day = match self.day {
            Some(raw) => Some(raw.parse::<Weekday>().map_err(AppError::BadRequest)?),
            None => None,
        };
        let time_slot = match self.time_slot {
            Some(raw) => Some(
                raw.parse::<TimeSlot>()
                    .map_err(|e| AppError::BadRequest(e.to_string()))?,
            ),
            None => None,
        };
        Ok(AssignmentFilter {
            lab_id: self.lab_id.map(LaboratoryId::new),
            day,
            time_slot,
            section: self.section,
            semester: self.semester,
        })
    }
}

/// Request body for creating or updating an instructor record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructorRequest {
    pub full_name: String,
    /// Role tag: "admin", "staff" or "lecturer"
    pub role: String,
}

impl InstructorRequest {
    pub fn into_draft(self) -> Result<InstructorDraft, AppError> {
        let role: Role = self
            .role
            .parse()
            .map_err(|e: String| AppError::BadRequest(e))?;
        Ok(InstructorDraft {
            full_name: self.full_name,
            role,
        })
    }
}

/// Request body for creating or updating a laboratory record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaboratoryRequest {
    pub name: String,
    pub capacity: i32,
}

impl From<LaboratoryRequest> for LaboratoryDraft {
    fn from(req: LaboratoryRequest) -> Self {
        LaboratoryDraft {
            name: req.name,
            capacity: req.capacity,
        }
    }
}

/// Request body for creating or updating a course record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseRequest {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub semester: Option<i32>,
    #[serde(default)]
    pub credits: Option<i32>,
}

impl From<CourseRequest> for CourseDraft {
    fn from(req: CourseRequest) -> Self {
        CourseDraft {
            code: req.code,
            name: req.name,
            semester: req.semester,
            credits: req.credits,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Repository connection status
    pub database: String,
}
