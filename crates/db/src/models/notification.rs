//! Notification model, recipient fan-out rows, and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use steward_core::types::{DbId, Timestamp};

/// Category of a notification, as shown in the admin composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "notification_type", rename_all = "snake_case")]
pub enum NotificationType {
    Project,
    Milestone,
    ThankYou,
    Content,
    Reminder,
    Event,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "notification_status", rename_all = "snake_case")]
pub enum NotificationStatus {
    Draft,
    Scheduled,
    Sent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "notification_audience", rename_all = "snake_case")]
pub enum NotificationAudience {
    All,
    Contributors,
    SpecificMembers,
}

/// A notification row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub title: String,
    pub message: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub status: NotificationStatus,
    pub audience: NotificationAudience,
    pub scheduled_date: Option<Timestamp>,
    pub sent_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a notification.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNotification {
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    /// Defaults to `draft` if omitted.
    pub status: Option<NotificationStatus>,
    /// Defaults to `all` if omitted.
    pub audience: Option<NotificationAudience>,
    pub scheduled_date: Option<Timestamp>,
}

/// DTO for updating a notification. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateNotification {
    pub title: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<NotificationType>,
    pub status: Option<NotificationStatus>,
    pub audience: Option<NotificationAudience>,
    pub scheduled_date: Option<Timestamp>,
}

/// One delivery record linking a notification to a user, created when the
/// notification is dispatched.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationRecipient {
    pub id: DbId,
    pub notification_id: DbId,
    pub user_id: DbId,
    pub read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Row shape for a user's inbox: the recipient record joined with the
/// notification it delivers.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserNotification {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub recipient: NotificationRecipient,
    pub title: String,
    pub message: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub sent_date: Option<Timestamp>,
}

/// Outcome of a fan-out dispatch.
#[derive(Debug, Clone, Serialize)]
pub struct SendOutcome {
    /// Recipient rows created by this dispatch. Zero on a retry that found
    /// every recipient already present.
    pub recipients_added: u64,
    pub notification: Notification,
}
