//! Repository for the `contributions` table and the contribution-recording
//! operation that keeps project aggregates in step.

use sqlx::PgPool;
use steward_core::types::DbId;

use crate::error::DbError;
use crate::models::contribution::{
    Contribution, ContributionWithProject, CreateContribution, PaymentStatus,
};
use crate::repositories::ProjectRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, user_id, amount_cents, payment_method, payment_status, \
     transaction_reference, contributor_name, contributor_email, contributor_phone, created_at";

/// Prefixed variant for joined queries.
const C_COLUMNS: &str = "c.id, c.project_id, c.user_id, c.amount_cents, c.payment_method, \
     c.payment_status, c.transaction_reference, c.contributor_name, c.contributor_email, \
     c.contributor_phone, c.created_at";

/// Provides contribution persistence and the aggregate-consistency rule.
pub struct ContributionRepo;

impl ContributionRepo {
    /// Record a contribution against a project.
    ///
    /// The contribution row is inserted first; only once it is committed is
    /// the project aggregate updated, as a single atomic increment. If the
    /// increment fails (or the project has vanished) the committed row is
    /// not reflected in the aggregates and the caller gets
    /// [`DbError::Consistency`] naming both rows, so a reconciliation pass
    /// can pick it up. Retrying `record` would double-insert; retry only
    /// the aggregate side.
    pub async fn record(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateContribution,
    ) -> Result<Contribution, DbError> {
        if input.amount_cents <= 0 {
            return Err(DbError::Validation(
                "contribution amount must be positive".to_string(),
            ));
        }

        let contribution = Self::insert(pool, project_id, input).await?;

        let applied =
            match ProjectRepo::apply_contribution(pool, project_id, input.amount_cents).await {
                Ok(applied) => applied,
                Err(err) => {
                    tracing::error!(
                        contribution_id = %contribution.id,
                        %project_id,
                        error = %err,
                        "contribution committed but aggregate update failed"
                    );
                    return Err(DbError::Consistency {
                        contribution_id: contribution.id,
                        project_id,
                        reason: err.to_string(),
                    });
                }
            };

        if !applied {
            tracing::error!(
                contribution_id = %contribution.id,
                %project_id,
                "contribution committed but project row is gone"
            );
            return Err(DbError::Consistency {
                contribution_id: contribution.id,
                project_id,
                reason: "project row no longer exists".to_string(),
            });
        }

        Ok(contribution)
    }

    /// Insert a contribution row, returning it. Does not touch aggregates;
    /// use [`Self::record`] unless you are writing a reconciliation tool.
    pub async fn insert(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateContribution,
    ) -> Result<Contribution, sqlx::Error> {
        let query = format!(
            "INSERT INTO contributions (project_id, user_id, amount_cents, payment_method, \
                 transaction_reference, contributor_name, contributor_email, contributor_phone)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contribution>(&query)
            .bind(project_id)
            .bind(input.user_id)
            .bind(input.amount_cents)
            .bind(&input.payment_method)
            .bind(&input.transaction_reference)
            .bind(&input.contributor_name)
            .bind(&input.contributor_email)
            .bind(&input.contributor_phone)
            .fetch_one(pool)
            .await
    }

    /// List contributions to a project, newest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Contribution>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contributions \
             WHERE project_id = $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Contribution>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// List a user's contributions with the funded project's title, newest
    /// first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ContributionWithProject>, sqlx::Error> {
        let query = format!(
            "SELECT {C_COLUMNS}, p.title AS project_title \
             FROM contributions c \
             JOIN projects p ON p.id = c.project_id \
             WHERE c.user_id = $1 \
             ORDER BY c.created_at DESC"
        );
        sqlx::query_as::<_, ContributionWithProject>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Advance a contribution's payment status, optionally attaching the
    /// processor's transaction reference. The rest of the row is immutable.
    pub async fn update_payment_status(
        pool: &PgPool,
        id: DbId,
        status: PaymentStatus,
        transaction_reference: Option<&str>,
    ) -> Result<Option<Contribution>, sqlx::Error> {
        let query = format!(
            "UPDATE contributions \
             SET payment_status = $2, \
                 transaction_reference = COALESCE($3, transaction_reference) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contribution>(&query)
            .bind(id)
            .bind(status)
            .bind(transaction_reference)
            .fetch_optional(pool)
            .await
    }
}
