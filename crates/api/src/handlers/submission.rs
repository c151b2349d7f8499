//! Handlers for the `/submissions` resource.
//!
//! Review decisions go through `PUT /submissions/{id}`; the legality of a
//! status change is enforced by the repository, so these handlers only
//! translate outcomes into HTTP.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use steward_core::error::CoreError;
use steward_core::types::DbId;
use steward_db::models::content_submission::{
    ContentSubmission, ContentSubmissionFile, ContentSubmissionWithFiles,
    ContentSubmissionWithProject, CreateContentSubmission, CreateContentSubmissionFile,
    UpdateContentSubmission,
};
use steward_db::repositories::ContentSubmissionRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/submissions
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateContentSubmission>,
) -> AppResult<(StatusCode, Json<ContentSubmission>)> {
    let submission = ContentSubmissionRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(submission)))
}

/// GET /api/v1/submissions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ContentSubmissionWithFiles>> {
    let submission = ContentSubmissionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ContentSubmission",
            id,
        }))?;
    Ok(Json(submission))
}

/// GET /api/v1/projects/{project_id}/submissions
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<ContentSubmissionWithFiles>>> {
    let submissions = ContentSubmissionRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(submissions))
}

/// GET /api/v1/users/{user_id}/submissions
pub async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<Vec<ContentSubmissionWithProject>>> {
    let submissions = ContentSubmissionRepo::list_by_user(&state.pool, user_id).await?;
    Ok(Json(submissions))
}

/// PUT /api/v1/submissions/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateContentSubmission>,
) -> AppResult<Json<ContentSubmission>> {
    let submission = ContentSubmissionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ContentSubmission",
            id,
        }))?;
    Ok(Json(submission))
}

/// POST /api/v1/submissions/{id}/files
///
/// Records metadata for a file already uploaded to blob storage.
pub async fn add_file(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateContentSubmissionFile>,
) -> AppResult<(StatusCode, Json<ContentSubmissionFile>)> {
    let file = ContentSubmissionRepo::add_file(&state.pool, id, &input).await?;
    Ok((StatusCode::CREATED, Json(file)))
}

/// DELETE /api/v1/submissions/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = ContentSubmissionRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "ContentSubmission",
            id,
        }))
    }
}
