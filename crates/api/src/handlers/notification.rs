//! Handlers for the `/notifications` resource and per-user inboxes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use steward_core::error::CoreError;
use steward_core::types::DbId;
use steward_db::models::notification::{
    CreateNotification, Notification, NotificationRecipient, SendOutcome, UpdateNotification,
    UserNotification,
};
use steward_db::repositories::NotificationRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/notifications
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateNotification>,
) -> AppResult<(StatusCode, Json<Notification>)> {
    let notification = NotificationRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(notification)))
}

/// GET /api/v1/notifications
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Notification>>> {
    let notifications = NotificationRepo::list(&state.pool).await?;
    Ok(Json(notifications))
}

/// GET /api/v1/notifications/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Notification>> {
    let notification = NotificationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }))?;
    Ok(Json(notification))
}

/// PUT /api/v1/notifications/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateNotification>,
) -> AppResult<Json<Notification>> {
    let notification = NotificationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }))?;
    Ok(Json(notification))
}

/// DELETE /api/v1/notifications/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = NotificationRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }))
    }
}

/// POST /api/v1/notifications/{id}/send
///
/// Fan the notification out to every active member and mark it sent.
/// Safe to retry: already-covered members are not duplicated.
pub async fn send(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SendOutcome>> {
    let outcome = NotificationRepo::send_to_all(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }))?;
    Ok(Json(outcome))
}

/// Body for `POST /notifications/{id}/recipients`.
#[derive(Debug, Deserialize)]
pub struct AddRecipient {
    pub user_id: DbId,
}

/// POST /api/v1/notifications/{id}/recipients
///
/// Target a single member (the `specific_members` audience). Idempotent:
/// re-adding a member returns the existing delivery record.
pub async fn add_recipient(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AddRecipient>,
) -> AppResult<(StatusCode, Json<NotificationRecipient>)> {
    let recipient = NotificationRepo::add_recipient(&state.pool, id, input.user_id).await?;
    Ok((StatusCode::CREATED, Json(recipient)))
}

/// GET /api/v1/users/{user_id}/notifications
pub async fn list_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<UserNotification>>>> {
    let notifications = NotificationRepo::list_for_user(&state.pool, user_id).await?;
    Ok(Json(DataResponse {
        data: notifications,
    }))
}

/// POST /api/v1/notifications/recipients/{id}/read
///
/// Mark a delivered notification as read. Returns 204 No Content on
/// success, or 404 if the recipient record is unknown or already read.
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let found = NotificationRepo::mark_read(&state.pool, id).await?;

    if !found {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "NotificationRecipient",
            id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}
