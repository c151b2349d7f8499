//! Content submission model, its file attachments, and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use steward_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "content_type", rename_all = "snake_case")]
pub enum ContentType {
    Article,
    Photo,
    Testimonial,
}

/// Review state of a submission.
///
/// The only legal transitions are `pending -> approved` and
/// `pending -> rejected`; both are terminal. Enforced by
/// [`crate::repositories::ContentSubmissionRepo::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "submission_status", rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
}

/// A content submission row from the `content_submissions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentSubmission {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: Option<DbId>,
    pub title: String,
    pub content: String,
    pub content_type: ContentType,
    pub status: SubmissionStatus,
    /// Set when and only when `status` is `rejected`.
    pub rejection_reason: Option<String>,
    pub submitted_by_name: Option<String>,
    pub submitted_by_email: Option<String>,
    pub submission_date: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A file attached to a submission. The binary lives in external blob
/// storage; this row only records its metadata and URL.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentSubmissionFile {
    pub id: DbId,
    pub submission_id: DbId,
    pub file_name: String,
    pub file_size_bytes: Option<i64>,
    pub file_type: Option<String>,
    pub file_url: String,
    pub created_at: Timestamp,
}

/// DTO for creating a submission.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContentSubmission {
    pub project_id: DbId,
    pub user_id: Option<DbId>,
    pub title: String,
    pub content: String,
    pub content_type: ContentType,
    pub submitted_by_name: Option<String>,
    pub submitted_by_email: Option<String>,
}

/// DTO for updating a submission. All fields are optional.
///
/// A `status` change is a review decision and is validated against the
/// transition rules; content edits alone are unrestricted.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateContentSubmission {
    pub title: Option<String>,
    pub content: Option<String>,
    pub content_type: Option<ContentType>,
    pub status: Option<SubmissionStatus>,
    pub rejection_reason: Option<String>,
}

/// DTO for attaching a file record to a submission.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContentSubmissionFile {
    pub file_name: String,
    pub file_size_bytes: Option<i64>,
    pub file_type: Option<String>,
    pub file_url: String,
}

/// A submission together with its attached files.
#[derive(Debug, Clone, Serialize)]
pub struct ContentSubmissionWithFiles {
    #[serde(flatten)]
    pub submission: ContentSubmission,
    pub files: Vec<ContentSubmissionFile>,
}

/// Row shape for user-scoped listings: submission plus project title.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentSubmissionWithProject {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub submission: ContentSubmission,
    pub project_title: String,
}
