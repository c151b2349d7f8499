//! Member profile model and DTOs.
//!
//! Identity lives with the external auth provider; a `users` row is the
//! profile attached 1:1 to an auth identity by shared id. That is why
//! [`CreateUser`] carries an explicit `id` instead of letting the database
//! issue one.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use steward_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
pub enum UserRole {
    Member,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "user_status", rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Inactive,
    Pending,
}

/// A member profile row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub role: UserRole,
    pub status: UserStatus,
    pub join_date: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a member profile. `id` is the auth provider's id.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub id: DbId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    /// Defaults to `member` if omitted.
    pub role: Option<UserRole>,
    /// Defaults to `pending` if omitted.
    pub status: Option<UserStatus>,
}

/// DTO for updating a member profile. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
}
