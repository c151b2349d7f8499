//! Integration tests for the `/submissions` REST resource and the review
//! workflow over HTTP.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_project(app: &axum::Router) -> String {
    let response = post_json(
        app.clone(),
        "/api/v1/projects",
        json!({
            "title": "Choir Robes",
            "description": "New robes",
            "deadline": "March 2027",
            "target_amount_cents": 800_000,
            "category": "worship",
            "status": "active",
        }),
    )
    .await;
    body_json(response).await["id"].as_str().unwrap().to_string()
}

async fn create_submission(app: &axum::Router, project_id: &str) -> String {
    let response = post_json(
        app.clone(),
        "/api/v1/submissions",
        json!({
            "project_id": project_id,
            "title": "Fitting photos",
            "content": "Photos from Saturday",
            "content_type": "photo",
            "submitted_by_name": "Yaw",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Creation and retrieval
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn submission_starts_pending_and_lists_under_its_project(pool: PgPool) {
    let app = common::build_test_app(pool);
    let project_id = create_project(&app).await;
    let id = create_submission(&app, &project_id).await;

    let response = get(app.clone(), &format!("/api/v1/submissions/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "pending");
    assert_eq!(json["files"], json!([]));

    let response = get(app, &format!("/api/v1/projects/{project_id}/submissions")).await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn attached_files_appear_in_the_submission_detail(pool: PgPool) {
    let app = common::build_test_app(pool);
    let project_id = create_project(&app).await;
    let id = create_submission(&app, &project_id).await;

    let response = post_json(
        app.clone(),
        &format!("/api/v1/submissions/{id}/files"),
        json!({
            "file_name": "fitting-1.jpg",
            "file_size_bytes": 482_113,
            "file_type": "image/jpeg",
            "file_url": "https://blobs.example.org/fitting-1.jpg",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(app, &format!("/api/v1/submissions/{id}")).await;
    let json = body_json(response).await;
    assert_eq!(json["files"].as_array().unwrap().len(), 1);
    assert_eq!(json["files"][0]["file_name"], "fitting-1.jpg");
}

// ---------------------------------------------------------------------------
// Review decisions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn approving_a_pending_submission_succeeds(pool: PgPool) {
    let app = common::build_test_app(pool);
    let project_id = create_project(&app).await;
    let id = create_submission(&app, &project_id).await;

    let response = put_json(
        app,
        &format!("/api/v1/submissions/{id}"),
        json!({ "status": "approved" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "approved");
    assert!(json["rejection_reason"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rejecting_without_a_reason_is_a_validation_error(pool: PgPool) {
    let app = common::build_test_app(pool);
    let project_id = create_project(&app).await;
    let id = create_submission(&app, &project_id).await;

    let response = put_json(
        app,
        &format!("/api/v1/submissions/{id}"),
        json!({ "status": "rejected" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rejecting_with_a_reason_is_terminal(pool: PgPool) {
    let app = common::build_test_app(pool);
    let project_id = create_project(&app).await;
    let id = create_submission(&app, &project_id).await;

    let response = put_json(
        app.clone(),
        &format!("/api/v1/submissions/{id}"),
        json!({ "status": "rejected", "rejection_reason": "blurry photos" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "rejected");
    assert_eq!(json["rejection_reason"], "blurry photos");

    // Re-reviewing a decided submission conflicts.
    let response = put_json(
        app,
        &format!("/api/v1/submissions/{id}"),
        json!({ "status": "approved" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn deleting_a_submission_returns_no_content(pool: PgPool) {
    let app = common::build_test_app(pool);
    let project_id = create_project(&app).await;
    let id = create_submission(&app, &project_id).await;

    let response = delete(app.clone(), &format!("/api/v1/submissions/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app, &format!("/api/v1/submissions/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
