//! Route definitions for the stub remote procedures.
//!
//! Mounted at root level (not under `/api/v1`) to preserve the paths of
//! the hosted functions they replace. CORS is deliberately permissive
//! here, matching the originals: any origin may invoke them, and the
//! preflight `OPTIONS` request is answered with 200.

use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::handlers::functions;
use crate::state::AppState;

/// Routes mounted at `/`.
///
/// ```text
/// POST /process-payment    -> process_payment
/// POST /send-notification  -> send_notification
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/process-payment", post(functions::process_payment))
        .route("/send-notification", post(functions::send_notification))
        .layer(CorsLayer::permissive())
}
