//! Route definitions for the `/projects` resource.
//!
//! Also nests contribution and submission listings under
//! `/projects/{id}/...`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{contribution, project, submission};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                    -> list
/// POST   /                    -> create
/// GET    /featured             -> featured
/// GET    /{id}                 -> get_by_id
/// PUT    /{id}                 -> update
/// DELETE /{id}                 -> delete
///
/// GET    /{id}/contributions   -> list_by_project
/// POST   /{id}/contributions   -> record
/// GET    /{id}/submissions     -> list_by_project
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/featured", get(project::featured))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route(
            "/{id}/contributions",
            get(contribution::list_by_project).post(contribution::record),
        )
        .route("/{id}/submissions", get(submission::list_by_project))
}
