//! Postgres repository implementation using Diesel.
//!
//! This module implements the repository traits against a Postgres database.
//! The exclusivity rules are enforced twice: a check-then-insert sequence
//! inside a transaction for the friendly error path, and unique indexes on
//! both scope keys as the authoritative backstop for racing writers.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Automatic retry for transient failures
//! - Automatic migration execution
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
//! - `PG_MAX_RETRIES`: Maximum retry attempts for transient failures (default: 3)
//! - `PG_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 100)

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::task;

use crate::api::{
    Assignment, AssignmentDraft, AssignmentId, Course, CourseDraft, CourseId, Instructor,
    InstructorDraft, InstructorId, Laboratory, LaboratoryDraft, LaboratoryId,
};
use crate::db::repository::{
    AssignmentRepository, CatalogRepository, ErrorContext, FullRepository, RepositoryError,
    RepositoryResult,
};
use crate::scheduling::{Conflict, ConflictKind, ConflictScope};

mod models;
mod schema;

use models::*;
use schema::{assignments, courses, instructors, laboratories};

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

const LAB_SLOT_INDEX: &str = "assignments_lab_slot_key";
const INSTRUCTOR_SLOT_INDEX: &str = "assignments_instructor_slot_key";

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
    /// Maximum number of retry attempts for transient failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds (doubles with each retry)
    pub retry_delay_ms: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let parse_var = |name: &str, default: u64| {
            std::env::var(name)
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(default)
        };

        Ok(Self {
            database_url,
            max_pool_size: parse_var("PG_POOL_MAX", 10) as u32,
            min_pool_size: parse_var("PG_POOL_MIN", 1) as u32,
            connection_timeout_sec: parse_var("PG_CONN_TIMEOUT_SEC", 30),
            idle_timeout_sec: parse_var("PG_IDLE_TIMEOUT_SEC", 600),
            max_retries: parse_var("PG_MAX_RETRIES", 3) as u32,
            retry_delay_ms: parse_var("PG_RETRY_DELAY_MS", 100),
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Pool health statistics.
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    /// Number of connections currently in use
    pub connections_in_use: u32,
    /// Number of idle connections
    pub idle_connections: u32,
    /// Total number of connections in the pool
    pub total_connections: u32,
    /// Maximum pool size
    pub max_size: u32,
    /// Total successful queries executed
    pub total_queries: u64,
    /// Total failed queries
    pub failed_queries: u64,
    /// Total retried operations
    pub retried_operations: u64,
}

/// Diesel-backed repository for Postgres.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
    scope: ConflictScope,
    // Metrics counters
    total_queries: std::sync::Arc<AtomicU64>,
    failed_queries: std::sync::Arc<AtomicU64>,
    retried_operations: std::sync::Arc<AtomicU64>,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    pub fn new(config: PostgresConfig, scope: ConflictScope) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true) // Validate connections before use
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        // Run migrations once during initialization
        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }

        Ok(Self {
            pool,
            config,
            scope,
            total_queries: std::sync::Arc::new(AtomicU64::new(0)),
            failed_queries: std::sync::Arc::new(AtomicU64::new(0)),
            retried_operations: std::sync::Arc::new(AtomicU64::new(0)),
        })
    }

    /// Run pending database migrations.
    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;

        Ok(())
    }

    /// Execute a database operation with automatic retry for transient failures.
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        let pool = self.pool.clone();
        let max_retries = self.config.max_retries;
        let retry_delay_ms = self.config.retry_delay_ms;
        let total_queries = self.total_queries.clone();
        let failed_queries = self.failed_queries.clone();
        let retried_operations = self.retried_operations.clone();

        task::spawn_blocking(move || {
            let mut last_error = None;
            let mut retry_delay = Duration::from_millis(retry_delay_ms);

            for attempt in 0..=max_retries {
                if attempt > 0 {
                    retried_operations.fetch_add(1, Ordering::Relaxed);
                    std::thread::sleep(retry_delay);
                    retry_delay *= 2; // Exponential backoff
                }

                let mut conn = match pool.get() {
                    Ok(c) => c,
                    Err(e) => {
                        let err = RepositoryError::connection_with_context(
                            e.to_string(),
                            ErrorContext::new("get_connection")
                                .with_details(format!("attempt={}", attempt + 1))
                                .retryable(),
                        );
                        if attempt < max_retries {
                            last_error = Some(err);
                            continue;
                        }
                        failed_queries.fetch_add(1, Ordering::Relaxed);
                        return Err(err);
                    }
                };

                total_queries.fetch_add(1, Ordering::Relaxed);
                match f.clone()(&mut conn) {
                    Ok(result) => return Ok(result),
                    Err(e) if e.is_retryable() && attempt < max_retries => {
                        last_error = Some(e);
                        continue;
                    }
                    Err(e) => {
                        failed_queries.fetch_add(1, Ordering::Relaxed);
                        return Err(e);
                    }
                }
            }

            failed_queries.fetch_add(1, Ordering::Relaxed);
            Err(last_error.unwrap_or_else(|| {
                RepositoryError::internal("Max retries exceeded with no error captured")
            }))
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }

    /// Get pool health statistics.
    pub fn get_pool_stats(&self) -> PoolStats {
        let state = self.pool.state();
        PoolStats {
            connections_in_use: state.connections - state.idle_connections,
            idle_connections: state.idle_connections,
            total_connections: state.connections,
            max_size: self.config.max_pool_size,
            total_queries: self.total_queries.load(Ordering::Relaxed),
            failed_queries: self.failed_queries.load(Ordering::Relaxed),
            retried_operations: self.retried_operations.load(Ordering::Relaxed),
        }
    }
}

/// Find the assignment currently holding a scope key, if any.
///
/// `by_lab` selects between the laboratory key and the instructor key.
fn find_slot_holder(
    conn: &mut PgConnection,
    row: &NewAssignmentRow,
    scope: ConflictScope,
    excluding: Option<i64>,
    by_lab: bool,
) -> Result<Option<i64>, diesel::result::Error> {
    let mut query = assignments::table
        .select(assignments::id)
        .filter(assignments::day.eq(&row.day))
        .filter(assignments::time_slot.eq(&row.time_slot))
        .into_boxed();

    if by_lab {
        query = query.filter(assignments::lab_id.eq(row.lab_id));
    } else {
        query = query.filter(assignments::instructor_id.eq(row.instructor_id));
    }

    if scope == ConflictScope::Section {
        query = match &row.section {
            Some(section) => query.filter(assignments::section.eq(section.clone())),
            None => query.filter(assignments::section.is_null()),
        };
    }

    if let Some(id) = excluding {
        query = query.filter(assignments::id.ne(id));
    }

    query.first::<i64>(conn).optional()
}

/// Check both exclusivity rules inside the caller's transaction, laboratory
/// rule first.
fn check_exclusivity(
    conn: &mut PgConnection,
    row: &NewAssignmentRow,
    scope: ConflictScope,
    excluding: Option<i64>,
    operation: &str,
) -> RepositoryResult<()> {
    if let Some(holder) = find_slot_holder(conn, row, scope, excluding, true)? {
        return Err(RepositoryError::slot_conflict(
            Conflict {
                kind: ConflictKind::LabBooked,
                with: AssignmentId::new(holder),
            },
            ErrorContext::new(operation).with_entity("assignment"),
        ));
    }
    if let Some(holder) = find_slot_holder(conn, row, scope, excluding, false)? {
        return Err(RepositoryError::slot_conflict(
            Conflict {
                kind: ConflictKind::InstructorBooked,
                with: AssignmentId::new(holder),
            },
            ErrorContext::new(operation).with_entity("assignment"),
        ));
    }
    Ok(())
}

/// Remap a unique-index violation (a racing writer slipped between our
/// pre-check and the insert) into the typed conflict error. The transaction
/// has already rolled back, so the holder lookup runs on a fresh implicit
/// transaction; the indexes are section-scoped, hence the fixed lookup scope.
fn map_unique_violation(
    err: RepositoryError,
    conn: &mut PgConnection,
    row: &NewAssignmentRow,
    excluding: Option<i64>,
    operation: &str,
) -> RepositoryError {
    let message = match &err {
        RepositoryError::QueryError { message, .. } => message.clone(),
        _ => return err,
    };

    let kind = if message.contains(LAB_SLOT_INDEX) {
        ConflictKind::LabBooked
    } else if message.contains(INSTRUCTOR_SLOT_INDEX) {
        ConflictKind::InstructorBooked
    } else {
        return err;
    };

    let by_lab = kind == ConflictKind::LabBooked;
    match find_slot_holder(conn, row, ConflictScope::Section, excluding, by_lab) {
        Ok(Some(holder)) => RepositoryError::slot_conflict(
            Conflict {
                kind,
                with: AssignmentId::new(holder),
            },
            ErrorContext::new(operation)
                .with_entity("assignment")
                .with_details("unique_index_backstop"),
        ),
        _ => err,
    }
}

fn map_foreign_key_violation(err: diesel::result::Error, operation: &str) -> RepositoryError {
    match &err {
        diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::ForeignKeyViolation,
            info,
        ) => RepositoryError::validation_with_context(
            format!("Dangling reference: {}", info.message()),
            ErrorContext::new(operation),
        ),
        _ => RepositoryError::from(err),
    }
}

fn map_course_code_violation(err: diesel::result::Error, operation: &str) -> RepositoryError {
    match &err {
        diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            info,
        ) => RepositoryError::validation_with_context(
            format!("Course code already in use: {}", info.message()),
            ErrorContext::new(operation).with_entity("course"),
        ),
        _ => RepositoryError::from(err),
    }
}

#[async_trait]
impl CatalogRepository for PostgresRepository {
    async fn get_instructor(&self, id: InstructorId) -> RepositoryResult<Instructor> {
        self.with_conn(move |conn| {
            let row: InstructorRow = instructors::table
                .find(id.value())
                .select(InstructorRow::as_select())
                .first(conn)
                .map_err(|e| {
                    RepositoryError::from(e).with_operation("get_instructor")
                })?;
            Instructor::try_from(row)
        })
        .await
    }

    async fn list_instructors(&self) -> RepositoryResult<Vec<Instructor>> {
        self.with_conn(|conn| {
            instructors::table
                .order(instructors::id.asc())
                .select(InstructorRow::as_select())
                .load::<InstructorRow>(conn)
                .map_err(RepositoryError::from)?
                .into_iter()
                .map(Instructor::try_from)
                .collect()
        })
        .await
    }

    async fn insert_instructor(&self, draft: &InstructorDraft) -> RepositoryResult<Instructor> {
        let new_row = NewInstructorRow::from(draft);
        self.with_conn(move |conn| {
            let row: InstructorRow = diesel::insert_into(instructors::table)
                .values(&new_row)
                .returning(InstructorRow::as_returning())
                .get_result(conn)
                .map_err(RepositoryError::from)?;
            Instructor::try_from(row)
        })
        .await
    }

    async fn update_instructor(
        &self,
        id: InstructorId,
        draft: &InstructorDraft,
    ) -> RepositoryResult<Instructor> {
        let new_row = NewInstructorRow::from(draft);
        self.with_conn(move |conn| {
            let row: InstructorRow = diesel::update(instructors::table.find(id.value()))
                .set(&new_row)
                .returning(InstructorRow::as_returning())
                .get_result(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("update_instructor"))?;
            Instructor::try_from(row)
        })
        .await
    }

    async fn delete_instructor(&self, id: InstructorId) -> RepositoryResult<()> {
        self.with_conn(move |conn| {
            let deleted = diesel::delete(instructors::table.find(id.value()))
                .execute(conn)
                .map_err(|e| map_foreign_key_violation(e, "delete_instructor"))?;
            if deleted == 0 {
                return Err(RepositoryError::not_found_with_context(
                    format!("instructor {} not found", id),
                    ErrorContext::new("delete_instructor").with_entity_id(id),
                ));
            }
            Ok(())
        })
        .await
    }

    async fn get_laboratory(&self, id: LaboratoryId) -> RepositoryResult<Laboratory> {
        self.with_conn(move |conn| {
            laboratories::table
                .find(id.value())
                .select(LaboratoryRow::as_select())
                .first::<LaboratoryRow>(conn)
                .map(Laboratory::from)
                .map_err(|e| RepositoryError::from(e).with_operation("get_laboratory"))
        })
        .await
    }

    async fn list_laboratories(&self) -> RepositoryResult<Vec<Laboratory>> {
        self.with_conn(|conn| {
            laboratories::table
                .order(laboratories::id.asc())
                .select(LaboratoryRow::as_select())
                .load::<LaboratoryRow>(conn)
                .map(|rows| rows.into_iter().map(Laboratory::from).collect())
                .map_err(RepositoryError::from)
        })
        .await
    }

    async fn insert_laboratory(&self, draft: &LaboratoryDraft) -> RepositoryResult<Laboratory> {
        if draft.capacity <= 0 {
            return Err(RepositoryError::validation_with_context(
                format!("Laboratory capacity must be positive, got {}", draft.capacity),
                ErrorContext::new("insert_laboratory"),
            ));
        }
        let new_row = NewLaboratoryRow::from(draft);
        self.with_conn(move |conn| {
            diesel::insert_into(laboratories::table)
                .values(&new_row)
                .returning(LaboratoryRow::as_returning())
                .get_result::<LaboratoryRow>(conn)
                .map(Laboratory::from)
                .map_err(RepositoryError::from)
        })
        .await
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
        let new_row = NewLaboratoryRow::from(draft);
        self.with_conn(move |conn| {
            diesel::update(laboratories::table.find(id.value()))
                .set(&new_row)
                .returning(LaboratoryRow::as_returning())
                .get_result::<LaboratoryRow>(conn)
                .map(Laboratory::from)
                .map_err(|e| RepositoryError::from(e).with_operation("update_laboratory"))
        })
        .await
    }

    async fn delete_laboratory(&self, id: LaboratoryId) -> RepositoryResult<()> {
        self.with_conn(move |conn| {
            let deleted = diesel::delete(laboratories::table.find(id.value()))
                .execute(conn)
                .map_err(|e| map_foreign_key_violation(e, "delete_laboratory"))?;
            if deleted == 0 {
                return Err(RepositoryError::not_found_with_context(
                    format!("laboratory {} not found", id),
                    ErrorContext::new("delete_laboratory").with_entity_id(id),
                ));
            }
            Ok(())
        })
        .await
    }

    async fn get_course(&self, id: CourseId) -> RepositoryResult<Course> {
        self.with_conn(move |conn| {
            courses::table
                .find(id.value())
                .select(CourseRow::as_select())
                .first::<CourseRow>(conn)
                .map(Course::from)
                .map_err(|e| RepositoryError::from(e).with_operation("get_course"))
        })
        .await
    }

    async fn list_courses(&self) -> RepositoryResult<Vec<Course>> {
        self.with_conn(|conn| {
            courses::table
                .order(courses::id.asc())
                .select(CourseRow::as_select())
                .load::<CourseRow>(conn)
                .map(|rows| rows.into_iter().map(Course::from).collect())
                .map_err(RepositoryError::from)
        })
        .await
    }

    async fn insert_course(&self, draft: &CourseDraft) -> RepositoryResult<Course> {
        let new_row = NewCourseRow::from(draft);
        self.with_conn(move |conn| {
            diesel::insert_into(courses::table)
                .values(&new_row)
                .returning(CourseRow::as_returning())
                .get_result::<CourseRow>(conn)
                .map(Course::from)
                .map_err(|e| map_course_code_violation(e, "insert_course"))
        })
        .await
    }

    async fn update_course(&self, id: CourseId, draft: &CourseDraft) -> RepositoryResult<Course> {
        let new_row = NewCourseRow::from(draft);
        self.with_conn(move |conn| {
            diesel::update(courses::table.find(id.value()))
                .set(&new_row)
                .returning(CourseRow::as_returning())
                .get_result::<CourseRow>(conn)
                .map(Course::from)
                .map_err(|e| match e {
                    diesel::result::Error::NotFound => {
                        RepositoryError::from(e).with_operation("update_course")
                    }
                    other => map_course_code_violation(other, "update_course"),
                })
        })
        .await
    }

    async fn delete_course(&self, id: CourseId) -> RepositoryResult<()> {
        self.with_conn(move |conn| {
            let deleted = diesel::delete(courses::table.find(id.value()))
                .execute(conn)
                .map_err(|e| map_foreign_key_violation(e, "delete_course"))?;
            if deleted == 0 {
                return Err(RepositoryError::not_found_with_context(
                    format!("course {} not found", id),
                    ErrorContext::new("delete_course").with_entity_id(id),
                ));
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl AssignmentRepository for PostgresRepository {
    fn conflict_scope(&self) -> ConflictScope {
        self.scope
    }

    async fn get_assignment(&self, id: AssignmentId) -> RepositoryResult<Assignment> {
        self.with_conn(move |conn| {
            let row: AssignmentRow = assignments::table
                .find(id.value())
                .select(AssignmentRow::as_select())
                .first(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("get_assignment"))?;
            Assignment::try_from(row)
        })
        .await
    }

    async fn list_assignments(&self) -> RepositoryResult<Vec<Assignment>> {
        self.with_conn(|conn| {
            assignments::table
                .order(assignments::id.asc())
                .select(AssignmentRow::as_select())
                .load::<AssignmentRow>(conn)
                .map_err(RepositoryError::from)?
                .into_iter()
                .map(Assignment::try_from)
                .collect()
        })
        .await
    }

    async fn insert_assignment(&self, draft: &AssignmentDraft) -> RepositoryResult<Assignment> {
        let new_row = NewAssignmentRow::from(draft);
        let scope = self.scope;
        self.with_conn(move |conn| {
            let result = conn.transaction::<Assignment, RepositoryError, _>(|conn| {
                check_exclusivity(conn, &new_row, scope, None, "insert_assignment")?;
                let row: AssignmentRow = diesel::insert_into(assignments::table)
                    .values(&new_row)
                    .returning(AssignmentRow::as_returning())
                    .get_result(conn)
                    .map_err(|e| map_foreign_key_violation(e, "insert_assignment"))?;
                Assignment::try_from(row)
            });
            result.map_err(|e| map_unique_violation(e, conn, &new_row, None, "insert_assignment"))
        })
        .await
    }

    async fn update_assignment(
        &self,
        id: AssignmentId,
        draft: &AssignmentDraft,
    ) -> RepositoryResult<Assignment> {
        let new_row = NewAssignmentRow::from(draft);
        let scope = self.scope;
        self.with_conn(move |conn| {
            let result = conn.transaction::<Assignment, RepositoryError, _>(|conn| {
                let exists: Option<i64> = assignments::table
                    .find(id.value())
                    .select(assignments::id)
                    .first(conn)
                    .optional()?;
                if exists.is_none() {
                    return Err(RepositoryError::not_found_with_context(
                        format!("assignment {} not found", id),
                        ErrorContext::new("update_assignment").with_entity_id(id),
                    ));
                }

                check_exclusivity(conn, &new_row, scope, Some(id.value()), "update_assignment")?;
                let row: AssignmentRow = diesel::update(assignments::table.find(id.value()))
                    .set(&new_row)
                    .returning(AssignmentRow::as_returning())
                    .get_result(conn)
                    .map_err(|e| map_foreign_key_violation(e, "update_assignment"))?;
                Assignment::try_from(row)
            });
            result.map_err(|e| {
                map_unique_violation(e, conn, &new_row, Some(id.value()), "update_assignment")
            })
        })
        .await
    }

    async fn delete_assignment(&self, id: AssignmentId) -> RepositoryResult<()> {
        self.with_conn(move |conn| {
            let deleted = diesel::delete(assignments::table.find(id.value()))
                .execute(conn)
                .map_err(RepositoryError::from)?;
            if deleted == 0 {
                return Err(RepositoryError::not_found_with_context(
                    format!("assignment {} not found", id),
                    ErrorContext::new("delete_assignment").with_entity_id(id),
                ));
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl FullRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            diesel::sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(RepositoryError::from)
        })
        .await
    }
}
