//! Repository for content submissions and their file attachments.
//!
//! Review decisions (`pending -> approved` / `pending -> rejected`) are
//! validated here, in the access layer, rather than trusting callers to
//! send only legal transitions.

use std::collections::HashMap;

use sqlx::PgPool;
use steward_core::types::DbId;

use crate::error::DbError;
use crate::models::content_submission::{
    ContentSubmission, ContentSubmissionFile, ContentSubmissionWithFiles,
    ContentSubmissionWithProject, CreateContentSubmission, CreateContentSubmissionFile,
    SubmissionStatus, UpdateContentSubmission,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, user_id, title, content, content_type, status, \
     rejection_reason, submitted_by_name, submitted_by_email, submission_date, \
     created_at, updated_at";

/// Prefixed variant for joined queries.
const S_COLUMNS: &str = "s.id, s.project_id, s.user_id, s.title, s.content, s.content_type, \
     s.status, s.rejection_reason, s.submitted_by_name, s.submitted_by_email, \
     s.submission_date, s.created_at, s.updated_at";

const FILE_COLUMNS: &str =
    "id, submission_id, file_name, file_size_bytes, file_type, file_url, created_at";

/// Provides CRUD operations and the review workflow for submissions.
pub struct ContentSubmissionRepo;

impl ContentSubmissionRepo {
    /// Insert a new submission in `pending` state, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateContentSubmission,
    ) -> Result<ContentSubmission, sqlx::Error> {
        let query = format!(
            "INSERT INTO content_submissions (project_id, user_id, title, content, \
                 content_type, submitted_by_name, submitted_by_email)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentSubmission>(&query)
            .bind(input.project_id)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.content_type)
            .bind(&input.submitted_by_name)
            .bind(&input.submitted_by_email)
            .fetch_one(pool)
            .await
    }

    /// Find a submission with its files.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ContentSubmissionWithFiles>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM content_submissions WHERE id = $1");
        let Some(submission) = sqlx::query_as::<_, ContentSubmission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let files = Self::list_files(pool, &[id]).await?;
        Ok(Some(ContentSubmissionWithFiles { submission, files }))
    }

    /// List a project's submissions with their files, newest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ContentSubmissionWithFiles>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content_submissions \
             WHERE project_id = $1 \
             ORDER BY submission_date DESC"
        );
        let submissions = sqlx::query_as::<_, ContentSubmission>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await?;

        Self::attach_files(pool, submissions).await
    }

    /// List a user's submissions with the project title, newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ContentSubmissionWithProject>, sqlx::Error> {
        let query = format!(
            "SELECT {S_COLUMNS}, p.title AS project_title \
             FROM content_submissions s \
             JOIN projects p ON p.id = s.project_id \
             WHERE s.user_id = $1 \
             ORDER BY s.submission_date DESC"
        );
        sqlx::query_as::<_, ContentSubmissionWithProject>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a submission. Only non-`None` fields in `input` are applied.
    ///
    /// A `status` field turns the update into a review decision:
    /// - the submission must still be `pending`;
    /// - `rejected` requires a non-empty `rejection_reason`;
    /// - `approved` must not carry one.
    ///
    /// The status guard is repeated in the UPDATE's WHERE clause so two
    /// concurrent reviews cannot both apply.
    ///
    /// Returns `Ok(None)` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateContentSubmission,
    ) -> Result<Option<ContentSubmission>, DbError> {
        if let Some(new_status) = input.status {
            return Self::review(pool, id, new_status, input).await;
        }

        if input.rejection_reason.is_some() {
            return Err(DbError::Validation(
                "rejection_reason can only be set when rejecting a submission".to_string(),
            ));
        }

        let query = format!(
            "UPDATE content_submissions SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                content_type = COALESCE($4, content_type),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ContentSubmission>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.content_type)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    async fn review(
        pool: &PgPool,
        id: DbId,
        new_status: SubmissionStatus,
        input: &UpdateContentSubmission,
    ) -> Result<Option<ContentSubmission>, DbError> {
        match new_status {
            SubmissionStatus::Pending => {
                return Err(DbError::Validation(
                    "a submission cannot be moved back to pending".to_string(),
                ));
            }
            SubmissionStatus::Rejected => {
                let has_reason = input
                    .rejection_reason
                    .as_deref()
                    .is_some_and(|r| !r.trim().is_empty());
                if !has_reason {
                    return Err(DbError::Validation(
                        "rejecting a submission requires a non-empty rejection_reason".to_string(),
                    ));
                }
            }
            SubmissionStatus::Approved => {
                if input.rejection_reason.is_some() {
                    return Err(DbError::Validation(
                        "an approval cannot carry a rejection_reason".to_string(),
                    ));
                }
            }
        }

        let query = format!(
            "UPDATE content_submissions SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                content_type = COALESCE($4, content_type),
                status = $5,
                rejection_reason = $6,
                updated_at = now()
             WHERE id = $1 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ContentSubmission>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.content_type)
            .bind(new_status)
            .bind(&input.rejection_reason)
            .fetch_optional(pool)
            .await?;

        if row.is_some() {
            return Ok(row);
        }

        // Zero rows: either the id is unknown or the submission has left
        // `pending`. Tell those apart for the caller.
        let current: Option<SubmissionStatus> =
            sqlx::query_scalar("SELECT status FROM content_submissions WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?;
        match current {
            None => Ok(None),
            Some(status) => Err(DbError::Conflict(format!(
                "submission {id} has already been reviewed (status: {status:?})"
            ))),
        }
    }

    /// Attach a file record to a submission, returning the created row.
    pub async fn add_file(
        pool: &PgPool,
        submission_id: DbId,
        input: &CreateContentSubmissionFile,
    ) -> Result<ContentSubmissionFile, sqlx::Error> {
        let query = format!(
            "INSERT INTO content_submission_files \
                 (submission_id, file_name, file_size_bytes, file_type, file_url)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {FILE_COLUMNS}"
        );
        sqlx::query_as::<_, ContentSubmissionFile>(&query)
            .bind(submission_id)
            .bind(&input.file_name)
            .bind(input.file_size_bytes)
            .bind(&input.file_type)
            .bind(&input.file_url)
            .fetch_one(pool)
            .await
    }

    /// Delete a submission. File records go with it via FK cascade.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM content_submissions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_files(
        pool: &PgPool,
        submission_ids: &[DbId],
    ) -> Result<Vec<ContentSubmissionFile>, sqlx::Error> {
        let query = format!(
            "SELECT {FILE_COLUMNS} FROM content_submission_files \
             WHERE submission_id = ANY($1) \
             ORDER BY created_at"
        );
        sqlx::query_as::<_, ContentSubmissionFile>(&query)
            .bind(submission_ids)
            .fetch_all(pool)
            .await
    }

    async fn attach_files(
        pool: &PgPool,
        submissions: Vec<ContentSubmission>,
    ) -> Result<Vec<ContentSubmissionWithFiles>, sqlx::Error> {
        let ids: Vec<DbId> = submissions.iter().map(|s| s.id).collect();
        let mut by_submission: HashMap<DbId, Vec<ContentSubmissionFile>> = HashMap::new();
        for file in Self::list_files(pool, &ids).await? {
            by_submission.entry(file.submission_id).or_default().push(file);
        }

        Ok(submissions
            .into_iter()
            .map(|submission| {
                let files = by_submission.remove(&submission.id).unwrap_or_default();
                ContentSubmissionWithFiles { submission, files }
            })
            .collect())
    }
}
