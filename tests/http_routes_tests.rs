//! End-to-end router tests: identity extraction, status mapping, and the
//! scheduling flows over HTTP.

mod support;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use labsched::db::repositories::LocalRepository;
use labsched::http::{create_router, AppState};

use support::{seed_catalogs, Seeded};

async fn test_app() -> (Router, Arc<LocalRepository>, Seeded) {
    let repo = Arc::new(LocalRepository::new());
    let seeded = seed_catalogs(repo.as_ref()).await;
    let app = create_router(AppState::new(repo.clone()));
    (app, repo, seeded)
}

fn request(
    method: Method,
    uri: &str,
    viewer: Option<(&str, i64)>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((role, id)) = viewer {
        builder = builder
            .header("x-viewer-role", role)
            .header("x-viewer-id", id.to_string());
    }
    match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn assignment_body(seeded: &Seeded, day: &str, slot: &str, section: &str) -> Value {
    json!({
        "course_id": seeded.course_db.id.value(),
        "instructor_id": seeded.lecturer_a.id.value(),
        "lab_id": seeded.lab_1.id.value(),
        "day": day,
        "time_slot": slot,
        "section": section,
    })
}

#[tokio::test]
async fn test_health_endpoint_reports_connected() {
    let (app, _repo, _seeded) = test_app().await;

    let response = app
        .oneshot(request(Method::GET, "/health", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn test_requests_without_identity_are_rejected() {
    let (app, _repo, _seeded) = test_app().await;

    let response = app
        .oneshot(request(Method::GET, "/v1/assignments", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_malformed_identity_is_rejected() {
    let (app, _repo, _seeded) = test_app().await;

    let response = app
        .oneshot(request(
            Method::GET,
            "/v1/assignments",
            Some(("superuser", 1)),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_lecturer_cannot_create_assignments() {
    let (app, _repo, seeded) = test_app().await;

    let response = app
        .oneshot(request(
            Method::POST,
            "/v1/assignments",
            Some(("lecturer", seeded.lecturer_a.id.value())),
            Some(assignment_body(&seeded, "monday", "08:00-09:40", "A")),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_assignment_returns_created_record() {
    let (app, _repo, seeded) = test_app().await;

    let response = app
        .oneshot(request(
            Method::POST,
            "/v1/assignments",
            Some(("admin", 1)),
            Some(assignment_body(&seeded, "monday", "08:00-09:40", "A")),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["day"], "monday");
    assert_eq!(body["time_slot"], "08:00-09:40");
    assert_eq!(body["section"], "A");
}

#[tokio::test]
async fn test_double_booking_maps_to_conflict_status() {
    let (app, _repo, seeded) = test_app().await;

    let first = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/v1/assignments",
            Some(("admin", 1)),
            Some(assignment_body(&seeded, "monday", "08:00-09:40", "A")),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    // Same laboratory scope key, different instructor.
    let mut body = assignment_body(&seeded, "monday", "08:00-09:40", "A");
    body["instructor_id"] = json!(seeded.lecturer_b.id.value());
    let second = app
        .oneshot(request(
            Method::POST,
            "/v1/assignments",
            Some(("staff", 2)),
            Some(body),
        ))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let body = body_json(second).await;
    assert_eq!(body["code"], "SCHEDULE_CONFLICT");
    assert_eq!(body["conflict_with"], 1);
}

#[tokio::test]
async fn test_unknown_day_is_a_bad_request() {
    let (app, _repo, seeded) = test_app().await;

    let response = app
        .oneshot(request(
            Method::POST,
            "/v1/assignments",
            Some(("admin", 1)),
            Some(assignment_body(&seeded, "someday", "08:00-09:40", "A")),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_dangling_course_is_unprocessable() {
    let (app, _repo, seeded) = test_app().await;

    let mut body = assignment_body(&seeded, "monday", "08:00-09:40", "A");
    body["course_id"] = json!(404);
    let response = app
        .oneshot(request(
            Method::POST,
            "/v1/assignments",
            Some(("admin", 1)),
            Some(body),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn test_lecturer_listing_is_restricted_to_their_sessions() {
    let (app, _repo, seeded) = test_app().await;

    // One session for each lecturer, different labs.
    let first = assignment_body(&seeded, "monday", "08:00-09:40", "A");
    let mut second = assignment_body(&seeded, "monday", "08:00-09:40", "A");
    second["instructor_id"] = json!(seeded.lecturer_b.id.value());
    second["lab_id"] = json!(seeded.lab_2.id.value());

    for body in [first, second] {
        let response = app
            .clone()
            .oneshot(request(
                Method::POST,
                "/v1/assignments",
                Some(("admin", 1)),
                Some(body),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(request(
            Method::GET,
            "/v1/assignments",
            Some(("lecturer", seeded.lecturer_b.id.value())),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(
        body["assignments"][0]["instructor_id"],
        seeded.lecturer_b.id.value()
    );
}

#[tokio::test]
async fn test_filtered_listing_over_http() {
    let (app, _repo, seeded) = test_app().await;

    let monday = assignment_body(&seeded, "monday", "08:00-09:40", "A");
    let mut tuesday = assignment_body(&seeded, "tuesday", "08:00-09:40", "A");
    tuesday["lab_id"] = json!(seeded.lab_2.id.value());

    for body in [monday, tuesday] {
        let response = app
            .clone()
            .oneshot(request(
                Method::POST,
                "/v1/assignments",
                Some(("admin", 1)),
                Some(body),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let uri = format!("/v1/assignments?day=monday&lab_id={}", seeded.lab_1.id.value());
    let response = app
        .oneshot(request(Method::GET, &uri, Some(("staff", 2)), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["assignments"][0]["day"], "monday");
}

#[tokio::test]
async fn test_update_and_delete_flow() {
    let (app, _repo, seeded) = test_app().await;

    let created = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/v1/assignments",
            Some(("admin", 1)),
            Some(assignment_body(&seeded, "monday", "08:00-09:40", "A")),
        ))
        .await
        .unwrap();
    let id = body_json(created).await["id"].as_i64().unwrap();

    let updated = app
        .clone()
        .oneshot(request(
            Method::PUT,
            &format!("/v1/assignments/{}", id),
            Some(("admin", 1)),
            Some(assignment_body(&seeded, "monday", "10:00-11:40", "A")),
        ))
        .await
        .unwrap();
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(body_json(updated).await["time_slot"], "10:00-11:40");

    let deleted = app
        .clone()
        .oneshot(request(
            Method::DELETE,
            &format!("/v1/assignments/{}", id),
            Some(("admin", 1)),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    // Idempotent failure on the second delete.
    let again = app
        .oneshot(request(
            Method::DELETE,
            &format!("/v1/assignments/{}", id),
            Some(("admin", 1)),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_catalog_role_gates() {
    let (app, _repo, seeded) = test_app().await;

    let lab_body = json!({"name": "Network Lab", "capacity": 24});

    // Lecturers may read catalogs but not mutate them.
    let response = app
        .clone()
        .oneshot(request(
            Method::GET,
            "/v1/labs",
            Some(("lecturer", seeded.lecturer_a.id.value())),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/v1/labs",
            Some(("lecturer", seeded.lecturer_a.id.value())),
            Some(lab_body.clone()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/v1/labs",
            Some(("staff", 2)),
            Some(lab_body),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // The instructor directory takes administrators only.
    let instructor_body = json!({"full_name": "Carol Lecturer", "role": "lecturer"});
    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/v1/instructors",
            Some(("staff", 2)),
            Some(instructor_body.clone()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(request(
            Method::POST,
            "/v1/instructors",
            Some(("admin", 1)),
            Some(instructor_body),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}
