//! Route definitions for the `/notifications` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET    /                        -> list
/// POST   /                        -> create
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update
/// DELETE /{id}                    -> delete
/// POST   /{id}/send               -> send (fan out to active members)
/// POST   /{id}/recipients         -> add_recipient (targeted delivery)
/// POST   /recipients/{id}/read    -> mark_read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notification::list).post(notification::create))
        .route(
            "/{id}",
            get(notification::get_by_id)
                .put(notification::update)
                .delete(notification::delete),
        )
        .route("/{id}/send", post(notification::send))
        .route("/{id}/recipients", post(notification::add_recipient))
        .route("/recipients/{id}/read", post(notification::mark_read))
}
