//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for business logic; the [`Viewer`] extractor has already rejected
//! unauthenticated requests by the time a handler body runs.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    AssignmentDto, AssignmentListQuery, AssignmentListResponse, AssignmentRequest, CourseRequest,
    HealthResponse, InstructorRequest, LaboratoryRequest,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{
    AssignmentId, Course, CourseId, Instructor, InstructorId, Laboratory, LaboratoryId, Viewer,
};
use crate::db::repository::FullRepository;
use crate::services::{self, catalog};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the repository
/// is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Assignments
// =============================================================================

/// GET /v1/assignments
///
/// List the assignments visible to the viewer, narrowed by the optional
/// query filters.
pub async fn list_assignments(
    State(state): State<AppState>,
    viewer: Viewer,
    Query(query): Query<AssignmentListQuery>,
) -> HandlerResult<AssignmentListResponse> {
    let filter = query.into_filter()?;
    let assignments =
        services::list_assignments(state.repository.as_ref(), &viewer, &filter).await?;

    let assignments: Vec<AssignmentDto> = assignments.into_iter().map(Into::into).collect();
    let total = assignments.len();

    Ok(Json(AssignmentListResponse { assignments, total }))
}

/// POST /v1/assignments
///
/// Create a new assignment; 409 when the slot is already taken.
pub async fn create_assignment(
    State(state): State<AppState>,
    viewer: Viewer,
    Json(request): Json<AssignmentRequest>,
) -> Result<(StatusCode, Json<AssignmentDto>), AppError> {
    let draft = request.into_draft()?;
    let stored =
        services::create_assignment(state.repository.as_ref(), &viewer, &draft).await?;
    Ok((StatusCode::CREATED, Json(stored.into())))
}

/// PUT /v1/assignments/{id}
///
/// Replace the scheduling fields of an existing assignment.
pub async fn update_assignment(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<i64>,
    Json(request): Json<AssignmentRequest>,
) -> HandlerResult<AssignmentDto> {
    let draft = request.into_draft()?;
    let stored = services::update_assignment(
        state.repository.as_ref(),
        &viewer,
        AssignmentId::new(id),
        &draft,
    )
    .await?;
    Ok(Json(stored.into()))
}

/// DELETE /v1/assignments/{id}
pub async fn delete_assignment(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    services::delete_assignment(state.repository.as_ref(), &viewer, AssignmentId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Instructor directory
// =============================================================================

/// GET /v1/instructors
pub async fn list_instructors(
    State(state): State<AppState>,
    _viewer: Viewer,
) -> HandlerResult<Vec<Instructor>> {
    Ok(Json(catalog::list_instructors(state.repository.as_ref()).await?))
}

/// POST /v1/instructors
pub async fn create_instructor(
    State(state): State<AppState>,
    viewer: Viewer,
    Json(request): Json<InstructorRequest>,
) -> Result<(StatusCode, Json<Instructor>), AppError> {
    let draft = request.into_draft()?;
    let stored = catalog::create_instructor(state.repository.as_ref(), &viewer, &draft).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// PUT /v1/instructors/{id}
pub async fn update_instructor(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<i64>,
    Json(request): Json<InstructorRequest>,
) -> HandlerResult<Instructor> {
    let draft = request.into_draft()?;
    let stored = catalog::update_instructor(
        state.repository.as_ref(),
        &viewer,
        InstructorId::new(id),
        &draft,
    )
    .await?;
    Ok(Json(stored))
}

/// DELETE /v1/instructors/{id}
pub async fn delete_instructor(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    catalog::delete_instructor(state.repository.as_ref(), &viewer, InstructorId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Laboratory catalog
// =============================================================================

/// GET /v1/labs
pub async fn list_laboratories(
    State(state): State<AppState>,
    _viewer: Viewer,
) -> HandlerResult<Vec<Laboratory>> {
    Ok(Json(
        catalog::list_laboratories(state.repository.as_ref()).await?,
    ))
}

/// POST /v1/labs
pub async fn create_laboratory(
    State(state): State<AppState>,
    viewer: Viewer,
    Json(request): Json<LaboratoryRequest>,
) -> Result<(StatusCode, Json<Laboratory>), AppError> {
    let stored =
        catalog::create_laboratory(state.repository.as_ref(), &viewer, &request.into()).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// PUT /v1/labs/{id}
pub async fn update_laboratory(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<i64>,
    Json(request): Json<LaboratoryRequest>,
) -> HandlerResult<Laboratory> {
    let stored = catalog::update_laboratory(
        state.repository.as_ref(),
        &viewer,
        LaboratoryId::new(id),
        &request.into(),
    )
    .await?;
    Ok(Json(stored))
}

/// DELETE /v1/labs/{id}
pub async fn delete_laboratory(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    catalog::delete_laboratory(state.repository.as_ref(), &viewer, LaboratoryId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Course catalog
// =============================================================================

/// GET /v1/courses
pub async fn list_courses(
    State(state): State<AppState>,
    _viewer: Viewer,
) -> HandlerResult<Vec<Course>> {
    Ok(Json(catalog::list_courses(state.repository.as_ref()).await?))
}

/// POST /v1/courses
pub async fn create_course(
    State(state): State<AppState>,
    viewer: Viewer,
    Json(request): Json<CourseRequest>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let stored =
        catalog::create_course(state.repository.as_ref(), &viewer, &request.into()).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// PUT /v1/courses/{id}
pub async fn update_course(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<i64>,
    Json(request): Json<CourseRequest>,
) -> HandlerResult<Course> {
    let stored = catalog::update_course(
        state.repository.as_ref(),
        &viewer,
        CourseId::new(id),
        &request.into(),
    )
    .await?;
    Ok(Json(stored))
}

/// DELETE /v1/courses/{id}
pub async fn delete_course(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    catalog::delete_course(state.repository.as_ref(), &viewer, CourseId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
