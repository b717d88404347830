#![allow(dead_code)] // Shared across integration test crates; not every crate uses every helper.

use std::collections::HashSet;
use std::sync::Mutex;

use labsched::api::{
    AssignmentDraft, Course, CourseDraft, CourseId, Instructor, InstructorDraft, InstructorId,
    Laboratory, LaboratoryDraft, LaboratoryId, Role, TimeSlot, Viewer, Weekday,
};
use labsched::db::repository::{CatalogRepository, FullRepository};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK poisoned");
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Catalog records seeded into a fresh repository for scheduling tests.
pub struct Seeded {
    pub lecturer_a: Instructor,
    pub lecturer_b: Instructor,
    pub lab_1: Laboratory,
    pub lab_2: Laboratory,
    pub course_db: Course,
    pub course_ml: Course,
}

/// Populate two lecturers, two laboratories and two courses (semesters 3 and 5).
pub async fn seed_catalogs(repo: &dyn FullRepository) -> Seeded {
    let lecturer_a = repo
        .insert_instructor(&InstructorDraft {
            full_name: "Alice Lecturer".to_string(),
            role: Role::Lecturer,
        })
        .await
        .expect("seed lecturer A");
    let lecturer_b = repo
        .insert_instructor(&InstructorDraft {
            full_name: "Bob Lecturer".to_string(),
            role: Role::Lecturer,
        })
        .await
        .expect("seed lecturer B");

    let lab_1 = repo
        .insert_laboratory(&LaboratoryDraft {
            name: "Computer Lab 1".to_string(),
            capacity: 30,
        })
        .await
        .expect("seed lab 1");
    let lab_2 = repo
        .insert_laboratory(&LaboratoryDraft {
            name: "Computer Lab 2".to_string(),
            capacity: 30,
        })
        .await
        .expect("seed lab 2");

    let course_db = repo
        .insert_course(&CourseDraft {
            code: "BD01".to_string(),
            name: "Database Systems Lab".to_string(),
            semester: Some(3),
            credits: Some(3),
        })
        .await
        .expect("seed database course");
    let course_ml = repo
        .insert_course(&CourseDraft {
            code: "ML01".to_string(),
            name: "Machine Learning Lab".to_string(),
            semester: Some(5),
            credits: Some(3),
        })
        .await
        .expect("seed ml course");

    Seeded {
        lecturer_a,
        lecturer_b,
        lab_1,
        lab_2,
        course_db,
        course_ml,
    }
}

/// Build an assignment draft with the given scheduling fields.
pub fn draft(
    course: CourseId,
    instructor: InstructorId,
    lab: LaboratoryId,
    day: Weekday,
    slot: &str,
    section: Option<&str>,
) -> AssignmentDraft {
    AssignmentDraft {
        course_id: course,
        instructor_id: instructor,
        lab_id: lab,
        day,
        time_slot: slot.parse::<TimeSlot>().expect("valid slot"),
        section: section.map(str::to_string),
    }
}

pub fn admin() -> Viewer {
    Viewer::new(Role::Admin, InstructorId::new(9001))
}

pub fn staff() -> Viewer {
    Viewer::new(Role::Staff, InstructorId::new(9002))
}

pub fn lecturer(id: InstructorId) -> Viewer {
    Viewer::new(Role::Lecturer, id)
}
