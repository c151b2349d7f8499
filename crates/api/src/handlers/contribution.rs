//! Handlers for contributions, nested under `/projects/{id}/contributions`
//! and `/users/{id}/contributions`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use steward_core::error::CoreError;
use steward_core::types::DbId;
use steward_db::models::contribution::{
    Contribution, ContributionWithProject, CreateContribution, PaymentStatus,
};
use steward_db::repositories::ContributionRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/projects/{project_id}/contributions
///
/// Records the contribution and folds it into the project aggregates.
pub async fn record(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateContribution>,
) -> AppResult<(StatusCode, Json<Contribution>)> {
    let contribution = ContributionRepo::record(&state.pool, project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(contribution)))
}

/// GET /api/v1/projects/{project_id}/contributions
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Contribution>>> {
    let contributions = ContributionRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(contributions))
}

/// GET /api/v1/users/{user_id}/contributions
pub async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<Vec<ContributionWithProject>>> {
    let contributions = ContributionRepo::list_by_user(&state.pool, user_id).await?;
    Ok(Json(contributions))
}

/// Body for `PUT /api/v1/contributions/{id}/payment-status`.
#[derive(Debug, Deserialize)]
pub struct UpdatePaymentStatus {
    pub payment_status: PaymentStatus,
    pub transaction_reference: Option<String>,
}

/// PUT /api/v1/contributions/{id}/payment-status
///
/// The only mutation a contribution supports after it is recorded.
pub async fn update_payment_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePaymentStatus>,
) -> AppResult<Json<Contribution>> {
    let contribution = ContributionRepo::update_payment_status(
        &state.pool,
        id,
        input.payment_status,
        input.transaction_reference.as_deref(),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Contribution",
        id,
    }))?;
    Ok(Json(contribution))
}
