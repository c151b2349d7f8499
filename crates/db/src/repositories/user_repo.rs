//! Repository for the `users` (member profile) table.

use sqlx::PgPool;
use steward_core::types::DbId;

use crate::models::user::{CreateUser, UpdateUser, User, UserRole};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, email, phone, avatar_url, role, status, join_date, created_at, updated_at";

/// Provides CRUD operations for member profiles.
pub struct UserRepo;

impl UserRepo {
    /// Insert a profile row for an auth identity, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (id, name, email, phone, avatar_url, role, status)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'member'), COALESCE($7, 'pending'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(input.id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.avatar_url)
            .bind(input.role)
            .bind(input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a profile by its (auth provider) ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all profiles ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY name");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// List profiles with a given role, ordered by name.
    pub async fn list_by_role(pool: &PgPool, role: UserRole) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE role = $1 ORDER BY name");
        sqlx::query_as::<_, User>(&query)
            .bind(role)
            .fetch_all(pool)
            .await
    }

    /// Update a profile. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                avatar_url = COALESCE($5, avatar_url),
                role = COALESCE($6, role),
                status = COALESCE($7, status),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.avatar_url)
            .bind(input.role)
            .bind(input.status)
            .fetch_optional(pool)
            .await
    }
}
