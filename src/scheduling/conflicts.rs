use serde::{Deserialize, Serialize};
use std::fmt;

use super::scope::ConflictScope;
use crate::api::{Assignment, AssignmentDraft, AssignmentId};

/// Which exclusivity rule a candidate assignment violates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// The laboratory already hosts a session in this slot.
    LabBooked,
    /// The instructor already teaches a session in this slot.
    InstructorBooked,
}

/// A detected exclusivity violation, carrying the booked assignment for
/// diagnostic display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub with: AssignmentId,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ConflictKind::LabBooked => {
                write!(f, "laboratory already booked by assignment {}", self.with)
            }
            ConflictKind::InstructorBooked => {
                write!(f, "instructor already booked by assignment {}", self.with)
            }
        }
    }
}

fn sections_collide(scope: ConflictScope, a: &Option<String>, b: &Option<String>) -> bool {
    match scope {
        ConflictScope::SlotOnly => true,
        ConflictScope::Section => a == b,
    }
}

fn slot_matches(candidate: &AssignmentDraft, existing: &Assignment, scope: ConflictScope) -> bool {
    existing.day == candidate.day
        && existing.time_slot == candidate.time_slot
        && sections_collide(scope, &existing.section, &candidate.section)
}

/// Test a candidate against a snapshot of live assignments.
///
/// `excluding` names the assignment being replaced during an update so it is
/// not compared against itself. The laboratory rule is evaluated over the
/// whole snapshot before the instructor rule, so a candidate that violates
/// both reports the laboratory conflict.
pub fn find_conflict(
    candidate: &AssignmentDraft,
    excluding: Option<AssignmentId>,
    existing: &[Assignment],
    scope: ConflictScope,
) -> Option<Conflict> {
    let live = || {
        existing
            .iter()
            .filter(|a| excluding.map_or(true, |id| a.id != id))
    };

    if let Some(taken) = live()
        .find(|a| a.lab_id == candidate.lab_id && slot_matches(candidate, a, scope))
    {
        return Some(Conflict {
            kind: ConflictKind::LabBooked,
            with: taken.id,
        });
    }

    if let Some(taken) = live()
        .find(|a| a.instructor_id == candidate.instructor_id && slot_matches(candidate, a, scope))
    {
        return Some(Conflict {
            kind: ConflictKind::InstructorBooked,
            with: taken.id,
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CourseId, InstructorId, LaboratoryId, TimeSlot, Weekday};

    fn draft(lab: i64, instructor: i64, day: Weekday, slot: &str, section: Option<&str>) -> AssignmentDraft {
        AssignmentDraft {
            course_id: CourseId::new(1),
            instructor_id: InstructorId::new(instructor),
            lab_id: LaboratoryId::new(lab),
            day,
            time_slot: slot.parse::<TimeSlot>().unwrap(),
            section: section.map(str::to_string),
        }
    }

    fn stored(id: i64, d: &AssignmentDraft) -> Assignment {
        Assignment {
            id: AssignmentId::new(id),
            course_id: d.course_id,
            instructor_id: d.instructor_id,
            lab_id: d.lab_id,
            day: d.day,
            time_slot: d.time_slot,
            section: d.section.clone(),
            created_at: chrono::DateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_empty_store_has_no_conflict() {
        let candidate = draft(1, 1, Weekday::Monday, "08:00-10:00", None);
        assert_eq!(find_conflict(&candidate, None, &[], ConflictScope::Section), None);
    }

    #[test]
    fn test_same_lab_same_slot_is_lab_conflict() {
        let first = draft(1, 1, Weekday::Monday, "08:00-10:00", None);
        let existing = vec![stored(7, &first)];
        let candidate = draft(1, 2, Weekday::Monday, "08:00-10:00", None);

        let conflict = find_conflict(&candidate, None, &existing, ConflictScope::Section).unwrap();
        assert_eq!(conflict.kind, ConflictKind::LabBooked);
        assert_eq!(conflict.with, AssignmentId::new(7));
    }

    #[test]
    fn test_same_instructor_different_lab_is_instructor_conflict() {
        let first = draft(1, 1, Weekday::Monday, "08:00-10:00", None);
        let existing = vec![stored(7, &first)];
        let candidate = draft(2, 1, Weekday::Monday, "08:00-10:00", None);

        let conflict = find_conflict(&candidate, None, &existing, ConflictScope::Section).unwrap();
        assert_eq!(conflict.kind, ConflictKind::InstructorBooked);
        assert_eq!(conflict.with, AssignmentId::new(7));
    }

    #[test]
    fn test_lab_conflict_wins_when_both_rules_violated() {
        let first = draft(1, 1, Weekday::Monday, "08:00-10:00", None);
        let existing = vec![stored(7, &first)];
        // Same lab AND same instructor as the stored assignment.
        let candidate = draft(1, 1, Weekday::Monday, "08:00-10:00", None);

        let conflict = find_conflict(&candidate, None, &existing, ConflictScope::Section).unwrap();
        assert_eq!(conflict.kind, ConflictKind::LabBooked);
    }

    #[test]
    fn test_lab_conflict_wins_even_across_snapshot_order() {
        // Instructor clash stored before the lab clash; the lab pass still
        // runs first over the whole snapshot.
        let instructor_clash = draft(2, 1, Weekday::Monday, "08:00-10:00", None);
        let lab_clash = draft(1, 3, Weekday::Monday, "08:00-10:00", None);
        let existing = vec![stored(1, &instructor_clash), stored(2, &lab_clash)];
        let candidate = draft(1, 1, Weekday::Monday, "08:00-10:00", None);

        let conflict = find_conflict(&candidate, None, &existing, ConflictScope::Section).unwrap();
        assert_eq!(conflict.kind, ConflictKind::LabBooked);
        assert_eq!(conflict.with, AssignmentId::new(2));
    }

    #[test]
    fn test_different_day_or_slot_does_not_conflict() {
        let first = draft(1, 1, Weekday::Monday, "08:00-10:00", None);
        let existing = vec![stored(7, &first)];

        let other_day = draft(1, 1, Weekday::Tuesday, "08:00-10:00", None);
        assert_eq!(find_conflict(&other_day, None, &existing, ConflictScope::Section), None);

        let other_slot = draft(1, 1, Weekday::Monday, "10:00-12:00", None);
        assert_eq!(find_conflict(&other_slot, None, &existing, ConflictScope::Section), None);
    }

    #[test]
    fn test_overlapping_slots_do_not_conflict() {
        // Exact-equality semantics: a half-overlapping interval is a distinct
        // scope key.
        let first = draft(1, 1, Weekday::Monday, "08:00-10:00", None);
        let existing = vec![stored(7, &first)];
        let overlapping = draft(1, 2, Weekday::Monday, "09:00-11:00", None);
        assert_eq!(
            find_conflict(&overlapping, None, &existing, ConflictScope::Section),
            None
        );
    }

    #[test]
    fn test_excluding_skips_the_updated_assignment() {
        let first = draft(1, 1, Weekday::Monday, "08:00-10:00", None);
        let existing = vec![stored(7, &first)];
        // Re-submitting the same slot for assignment 7 itself must pass.
        let conflict = find_conflict(
            &first,
            Some(AssignmentId::new(7)),
            &existing,
            ConflictScope::Section,
        );
        assert_eq!(conflict, None);
    }

    #[test]
    fn test_section_scope_separates_sections() {
        let a = draft(1, 1, Weekday::Monday, "08:00-10:00", Some("A"));
        let existing = vec![stored(7, &a)];
        let b = draft(1, 2, Weekday::Monday, "08:00-10:00", Some("B"));
        assert_eq!(find_conflict(&b, None, &existing, ConflictScope::Section), None);
    }

    #[test]
    fn test_slot_only_scope_ignores_sections() {
        let a = draft(1, 1, Weekday::Monday, "08:00-10:00", Some("A"));
        let existing = vec![stored(7, &a)];
        let b = draft(1, 2, Weekday::Monday, "08:00-10:00", Some("B"));
        let conflict = find_conflict(&b, None, &existing, ConflictScope::SlotOnly).unwrap();
        assert_eq!(conflict.kind, ConflictKind::LabBooked);
    }

    #[test]
    fn test_missing_sections_collide_under_section_scope() {
        let a = draft(1, 1, Weekday::Monday, "08:00-10:00", None);
        let existing = vec![stored(7, &a)];
        let b = draft(1, 2, Weekday::Monday, "08:00-10:00", None);
        assert!(find_conflict(&b, None, &existing, ConflictScope::Section).is_some());
    }
}
