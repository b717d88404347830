//! Public API surface for the scheduling backend.
//!
//! This file consolidates the identifier newtypes and the typed records that
//! cross layer boundaries. All types derive Serialize/Deserialize for JSON
//! serialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use crate::models::{TimeSlot, Weekday};

/// Assignment identifier (database primary key).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssignmentId(pub i64);

/// Instructor identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstructorId(pub i64);

/// Laboratory identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LaboratoryId(pub i64);

/// Course identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CourseId(pub i64);

impl AssignmentId {
    pub fn new(value: i64) -> Self {
        AssignmentId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl InstructorId {
    pub fn new(value: i64) -> Self {
        InstructorId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl LaboratoryId {
    pub fn new(value: i64) -> Self {
        LaboratoryId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl CourseId {
    pub fn new(value: i64) -> Self {
        CourseId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for AssignmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl fmt::Display for InstructorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl fmt::Display for LaboratoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<AssignmentId> for i64 {
    fn from(id: AssignmentId) -> Self {
        id.0
    }
}

/// Role tag carried by every instructor-directory record and by the viewer
/// identity the access provider resolves.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
    Lecturer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
            Role::Lecturer => "lecturer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "staff" => Ok(Role::Staff),
            "lecturer" => Ok(Role::Lecturer),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Authenticated caller as resolved by the external identity provider.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub role: Role,
    pub id: InstructorId,
}

impl Viewer {
    pub fn new(role: Role, id: InstructorId) -> Self {
        Self { role, id }
    }
}

/// Instructor directory record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instructor {
    pub id: InstructorId,
    pub full_name: String,
    pub role: Role,
}

/// Laboratory directory record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Laboratory {
    pub id: LaboratoryId,
    pub name: String,
    /// Seats available; always positive.
    pub capacity: i32,
}

/// Course directory record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    /// Short unique course code, e.g. "BD01".
    pub code: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<i32>,
}

/// A scheduled laboratory session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub course_id: CourseId,
    pub instructor_id: InstructorId,
    pub lab_id: LaboratoryId,
    pub day: Weekday,
    pub time_slot: TimeSlot,
    /// Class-section discriminator ("A", "B", ...). Participates in the
    /// conflict scope key when the section scope is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Field set for creating or replacing an assignment. The store assigns the
/// identifier and creation timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentDraft {
    pub course_id: CourseId,
    pub instructor_id: InstructorId,
    pub lab_id: LaboratoryId,
    pub day: Weekday,
    pub time_slot: TimeSlot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

/// Optional equality predicates for listing assignments. Absent fields impose
/// no constraint; present fields compose by logical AND.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignmentFilter {
    pub lab_id: Option<LaboratoryId>,
    pub day: Option<Weekday>,
    pub time_slot: Option<TimeSlot>,
    pub section: Option<String>,
    /// Course-level term filter; resolved through the course catalog.
    pub semester: Option<i32>,
}

/// Field set for creating or updating an instructor record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructorDraft {
    pub full_name: String,
    pub role: Role,
}

/// Field set for creating or updating a laboratory record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaboratoryDraft {
    pub name: String,
    pub capacity: i32,
}

/// Field set for creating or updating a course record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseDraft {
    pub code: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<i32>,
}
