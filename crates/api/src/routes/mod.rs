pub mod contribution;
pub mod functions;
pub mod health;
pub mod notification;
pub mod project;
pub mod submission;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                               list, create
/// /projects/featured                      featured project (may be null)
/// /projects/{id}                          get, update, delete
/// /projects/{id}/contributions            list, record
/// /projects/{id}/submissions              list
///
/// /users                                  list, create
/// /users/{id}                             get, update
/// /users/{id}/contributions               list
/// /users/{id}/submissions                 list
/// /users/{id}/notifications               inbox
///
/// /contributions/{id}/payment-status      update payment status
///
/// /submissions                            create
/// /submissions/{id}                       get, update (review), delete
/// /submissions/{id}/files                 attach file record
///
/// /notifications                          list, create
/// /notifications/{id}                     get, update, delete
/// /notifications/{id}/send                fan out to all active members
/// /notifications/{id}/recipients          add a targeted recipient
/// /notifications/recipients/{id}/read     mark delivered copy read
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/users", user::router())
        .nest("/contributions", contribution::router())
        .nest("/submissions", submission::router())
        .nest("/notifications", notification::router())
}
