//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Assignment scheduling
        .route("/assignments", get(handlers::list_assignments))
        .route("/assignments", post(handlers::create_assignment))
        .route("/assignments/{id}", put(handlers::update_assignment))
        .route("/assignments/{id}", delete(handlers::delete_assignment))
        // Instructor directory
        .route("/instructors", get(handlers::list_instructors))
        .route("/instructors", post(handlers::create_instructor))
        .route("/instructors/{id}", put(handlers::update_instructor))
        .route("/instructors/{id}", delete(handlers::delete_instructor))
        // Laboratory catalog
        .route("/labs", get(handlers::list_laboratories))
        .route("/labs", post(handlers::create_laboratory))
        .route("/labs/{id}", put(handlers::update_laboratory))
        .route("/labs/{id}", delete(handlers::delete_laboratory))
        // Course catalog
        .route("/courses", get(handlers::list_courses))
        .route("/courses", post(handlers::create_course))
        .route("/courses/{id}", put(handlers::update_course))
        .route("/courses/{id}", delete(handlers::delete_course));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
