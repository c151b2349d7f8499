//! Integration tests for the `/notifications` REST resource: CRUD,
//! dispatch fan-out, and per-user inboxes.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_empty, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_user(app: &axum::Router, name: &str, status: &str) -> String {
    let id = Uuid::new_v4();
    let response = post_json(
        app.clone(),
        "/api/v1/users",
        json!({ "id": id, "name": name, "status": status }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    id.to_string()
}

async fn create_notification(app: &axum::Router, title: &str) -> String {
    let response = post_json(
        app.clone(),
        "/api/v1/notifications",
        json!({
            "title": title,
            "message": "Service moved to 9am",
            "type": "event",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn notification_crud_roundtrip(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = create_notification(&app, "Draft note").await;

    let response = get(app.clone(), &format!("/api/v1/notifications/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "draft");
    assert_eq!(json["audience"], "all");
    assert_eq!(json["type"], "event");

    let response = put_json(
        app.clone(),
        &format!("/api/v1/notifications/{id}"),
        json!({ "title": "Edited", "type": "reminder" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Edited");
    assert_eq!(json["type"], "reminder");

    let response = delete(app.clone(), &format!("/api/v1/notifications/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app, &format!("/api/v1/notifications/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn send_fans_out_to_active_members_and_marks_sent(pool: PgPool) {
    let app = common::build_test_app(pool);

    let active = create_user(&app, "a", "active").await;
    create_user(&app, "b", "inactive").await;

    let id = create_notification(&app, "Service time").await;

    let response = post_empty(app.clone(), &format!("/api/v1/notifications/{id}/send")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let outcome = body_json(response).await;
    assert_eq!(outcome["recipients_added"], 1);
    assert_eq!(outcome["notification"]["status"], "sent");
    assert!(outcome["notification"]["sent_date"].is_string());

    // The active member's inbox has exactly one entry.
    let response = get(app, &format!("/api/v1/users/{active}/notifications")).await;
    let json = body_json(response).await;
    let inbox = json["data"].as_array().unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0]["title"], "Service time");
    assert_eq!(inbox[0]["read"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn sending_twice_does_not_duplicate_recipients(pool: PgPool) {
    let app = common::build_test_app(pool);

    let active = create_user(&app, "a", "active").await;
    let id = create_notification(&app, "Once").await;

    let response = post_empty(app.clone(), &format!("/api/v1/notifications/{id}/send")).await;
    assert_eq!(body_json(response).await["recipients_added"], 1);

    let response = post_empty(app.clone(), &format!("/api/v1/notifications/{id}/send")).await;
    assert_eq!(body_json(response).await["recipients_added"], 0);

    let response = get(app, &format!("/api/v1/users/{active}/notifications")).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn sending_an_unknown_notification_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_empty(
        app,
        &format!("/api/v1/notifications/{}/send", Uuid::new_v4()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Targeted recipients
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn targeted_recipient_lands_in_that_inbox_only(pool: PgPool) {
    let app = common::build_test_app(pool);

    let target = create_user(&app, "a", "active").await;
    let bystander = create_user(&app, "b", "active").await;
    let id = create_notification(&app, "Just for you").await;

    let response = post_json(
        app.clone(),
        &format!("/api/v1/notifications/{id}/recipients"),
        json!({ "user_id": target }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(app.clone(), &format!("/api/v1/users/{target}/notifications")).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);

    let response = get(app, &format!("/api/v1/users/{bystander}/notifications")).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn targeting_an_unknown_user_is_a_client_error(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = create_notification(&app, "Nobody home").await;

    let response = post_json(
        app,
        &format!("/api/v1/notifications/{id}/recipients"),
        json!({ "user_id": Uuid::new_v4() }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "FOREIGN_KEY_VIOLATION");
}

// ---------------------------------------------------------------------------
// Read tracking
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn marking_a_delivered_notification_read(pool: PgPool) {
    let app = common::build_test_app(pool);

    let active = create_user(&app, "a", "active").await;
    let id = create_notification(&app, "Read me").await;
    post_empty(app.clone(), &format!("/api/v1/notifications/{id}/send")).await;

    let response = get(app.clone(), &format!("/api/v1/users/{active}/notifications")).await;
    let json = body_json(response).await;
    let recipient_id = json["data"][0]["id"].as_str().unwrap().to_string();

    let response = post_empty(
        app.clone(),
        &format!("/api/v1/notifications/recipients/{recipient_id}/read"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app, &format!("/api/v1/users/{active}/notifications")).await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["read"], true);
    assert!(json["data"][0]["read_at"].is_string());
}
