//! Route definitions for the `/submissions` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::submission;
use crate::state::AppState;

/// Routes mounted at `/submissions`.
///
/// ```text
/// POST   /             -> create
/// GET    /{id}         -> get_by_id
/// PUT    /{id}         -> update (review decisions included)
/// DELETE /{id}         -> delete
/// POST   /{id}/files   -> add_file
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(submission::create))
        .route(
            "/{id}",
            get(submission::get_by_id)
                .put(submission::update)
                .delete(submission::delete),
        )
        .route("/{id}/files", post(submission::add_file))
}
