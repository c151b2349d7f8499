//! Route definitions for the `/users` resource.
//!
//! Nests the per-user contribution, submission, and notification listings.

use axum::routing::get;
use axum::Router;

use crate::handlers::{contribution, notification, submission, user};
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /                    -> list
/// POST   /                    -> create
/// GET    /{id}                -> get_by_id
/// PUT    /{id}                -> update
///
/// GET    /{id}/contributions  -> list_by_user
/// GET    /{id}/submissions    -> list_by_user
/// GET    /{id}/notifications  -> list_for_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(user::list).post(user::create))
        .route("/{id}", get(user::get_by_id).put(user::update))
        .route("/{id}/contributions", get(contribution::list_by_user))
        .route("/{id}/submissions", get(submission::list_by_user))
        .route("/{id}/notifications", get(notification::list_for_user))
}
