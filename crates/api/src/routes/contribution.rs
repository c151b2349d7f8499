//! Route definitions for the top-level `/contributions` resource.
//!
//! Creation and listing live under `/projects/{id}/contributions`; only
//! the payment-status transition addresses a contribution directly.

use axum::routing::put;
use axum::Router;

use crate::handlers::contribution;
use crate::state::AppState;

/// Routes mounted at `/contributions`.
///
/// ```text
/// PUT /{id}/payment-status -> update_payment_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}/payment-status",
        put(contribution::update_payment_status),
    )
}
