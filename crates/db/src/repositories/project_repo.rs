//! Repository for the `projects` table.

use std::str::FromStr;

use sqlx::PgPool;
use steward_core::types::DbId;

use crate::error::DbError;
use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, deadline, current_amount_cents, \
     target_amount_cents, contributors, category, image_url, featured, status, \
     created_at, updated_at";

/// What happens to a project's contributions and submissions when the
/// project is deleted. There is no universally right answer, so it is a
/// deployment decision (`PROJECT_DELETE_POLICY`). Orphaned children are
/// not an option: both child tables carry a NOT NULL foreign key to
/// `projects`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletePolicy {
    /// Refuse to delete a project that still has dependents.
    #[default]
    Restrict,
    /// Delete dependents together with the project, in one transaction.
    Cascade,
}

impl FromStr for DeletePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "restrict" => Ok(Self::Restrict),
            "cascade" => Ok(Self::Cascade),
            other => Err(format!(
                "unknown delete policy '{other}' (expected restrict or cascade)"
            )),
        }
    }
}

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// The aggregate columns start at zero regardless of input; they are
    /// owned by the contribution-recording path.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (title, description, deadline, target_amount_cents, \
                 category, image_url, featured, status)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, FALSE), COALESCE($8, 'draft'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.deadline)
            .bind(input.target_amount_cents)
            .bind(&input.category)
            .bind(&input.image_url)
            .bind(input.featured)
            .bind(input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// List active projects in a category, newest first.
    pub async fn list_by_category(
        pool: &PgPool,
        category: &str,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects \
             WHERE category = $1 AND status = 'active' \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(category)
            .fetch_all(pool)
            .await
    }

    /// Find the featured active project, if any.
    ///
    /// No project being featured is an ordinary empty result, not an error;
    /// only a store failure surfaces as `Err`.
    pub async fn find_featured(pool: &PgPool) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects \
             WHERE featured AND status = 'active' \
             ORDER BY created_at DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, Project>(&query).fetch_optional(pool).await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists. The derived
    /// aggregate columns are not reachable from here.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                deadline = COALESCE($4, deadline),
                target_amount_cents = COALESCE($5, target_amount_cents),
                category = COALESCE($6, category),
                image_url = COALESCE($7, image_url),
                featured = COALESCE($8, featured),
                status = COALESCE($9, status),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.deadline)
            .bind(input.target_amount_cents)
            .bind(&input.category)
            .bind(&input.image_url)
            .bind(input.featured)
            .bind(input.status)
            .fetch_optional(pool)
            .await
    }

    /// Fold a contribution into the project aggregates as one server-side
    /// increment, so concurrent contributions cannot lose updates.
    ///
    /// Returns `false` if the project row no longer exists.
    pub async fn apply_contribution(
        pool: &PgPool,
        id: DbId,
        amount_cents: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects \
             SET current_amount_cents = current_amount_cents + $2, \
                 contributors = contributors + 1, \
                 updated_at = now() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(amount_cents)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a project under the given [`DeletePolicy`].
    ///
    /// Returns `Ok(false)` if no row with the given `id` exists.
    pub async fn delete(pool: &PgPool, id: DbId, policy: DeletePolicy) -> Result<bool, DbError> {
        match policy {
            DeletePolicy::Restrict => {
                let dependents: i64 = sqlx::query_scalar(
                    "SELECT (SELECT COUNT(*) FROM contributions WHERE project_id = $1) \
                          + (SELECT COUNT(*) FROM content_submissions WHERE project_id = $1)",
                )
                .bind(id)
                .fetch_one(pool)
                .await?;
                if dependents > 0 {
                    return Err(DbError::Conflict(format!(
                        "project {id} still has {dependents} contributions or submissions"
                    )));
                }
                let result = sqlx::query("DELETE FROM projects WHERE id = $1")
                    .bind(id)
                    .execute(pool)
                    .await?;
                Ok(result.rows_affected() > 0)
            }
            DeletePolicy::Cascade => {
                let mut tx = pool.begin().await?;
                sqlx::query("DELETE FROM contributions WHERE project_id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
                // Submission files go with their submissions via FK cascade.
                sqlx::query("DELETE FROM content_submissions WHERE project_id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
                let result = sqlx::query("DELETE FROM projects WHERE id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
                tx.commit().await?;
                Ok(result.rows_affected() > 0)
            }
        }
    }
}
