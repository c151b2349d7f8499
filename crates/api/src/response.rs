//! Shared response envelope types for API handlers.
//!
//! List-style endpoints that may grow metadata later (paging, counts)
//! wrap their payload in a `{ "data": ... }` envelope. [`DataResponse`]
//! keeps that envelope typed instead of building it from ad-hoc
//! `serde_json::json!` blocks.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
