//! Stub remote procedures: payment processing and notification dispatch.
//!
//! Both are validating echo endpoints kept wire-compatible with the hosted
//! functions they replace: presence-checked fields, a synthesized success
//! payload, and a bare `{"error": ...}` body on failure (no `code` field,
//! unlike the REST surface). Neither touches the database.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use rand::Rng;
use serde_json::{json, Value};

/// Uniform 400 response for the stub procedures.
fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

/// Field is "present" when it exists and is not JSON null.
fn present<'a>(body: &'a Value, key: &str) -> Option<&'a Value> {
    body.get(key).filter(|v| !v.is_null())
}

/// POST /process-payment
///
/// Validates field presence and echoes a synthesized transaction back.
/// No payment gateway is contacted.
pub async fn process_payment(body: Result<Json<Value>, JsonRejection>) -> Response {
    let Ok(Json(body)) = body else {
        return bad_request("Invalid JSON body");
    };

    let (Some(project_id), Some(amount), Some(payment_method), Some(_user_data)) = (
        present(&body, "projectId"),
        present(&body, "amount"),
        present(&body, "paymentMethod"),
        present(&body, "userData"),
    ) else {
        return bad_request("Missing required fields");
    };

    let transaction_reference = format!(
        "TX-{}-{}",
        Utc::now().timestamp_millis(),
        rand::rng().random_range(0..1000)
    );

    let data = json!({
        "success": true,
        "transactionReference": transaction_reference,
        "amount": amount,
        "projectId": project_id,
        "paymentMethod": payment_method,
        "timestamp": Utc::now().to_rfc3339(),
        "message": "Payment processed successfully",
    });

    (StatusCode::OK, Json(data)).into_response()
}

/// POST /send-notification
///
/// Validates field presence and echoes a dispatch summary back. No email
/// or SMS service is contacted.
pub async fn send_notification(body: Result<Json<Value>, JsonRejection>) -> Response {
    let Ok(Json(body)) = body else {
        return bad_request("Invalid JSON body");
    };

    let notification_id = present(&body, "notificationId");
    let title = present(&body, "title");
    if notification_id.is_none() && title.is_none() {
        return bad_request("Missing required fields");
    }
    let (Some(_message), Some(kind)) = (present(&body, "message"), present(&body, "type")) else {
        return bad_request("Missing required fields");
    };

    // A recipients list yields a count; no list means everyone.
    let recipients_count = match present(&body, "recipients").and_then(Value::as_array) {
        Some(recipients) => json!(recipients.len()),
        None => json!("all users"),
    };

    let data = json!({
        "success": true,
        "notificationId": notification_id,
        "recipientsCount": recipients_count,
        "title": title.cloned().unwrap_or_else(|| json!("Notification from database")),
        "type": kind,
        "timestamp": Utc::now().to_rfc3339(),
        "message": "Notification sent successfully",
    });

    (StatusCode::OK, Json(data)).into_response()
}
