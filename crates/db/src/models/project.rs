//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use steward_core::types::{DbId, Timestamp};

/// Funding lifecycle of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "project_status", rename_all = "snake_case")]
pub enum ProjectStatus {
    Draft,
    Active,
    Completed,
}

/// A project row from the `projects` table.
///
/// `current_amount_cents` and `contributors` are derived: they change only
/// through [`crate::repositories::ProjectRepo::apply_contribution`], never
/// through a user-facing update.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: String,
    /// Free-text date as entered by the admin (e.g. "December 2026").
    pub deadline: String,
    pub current_amount_cents: i64,
    pub target_amount_cents: i64,
    pub contributors: i32,
    pub category: String,
    pub image_url: Option<String>,
    pub featured: bool,
    pub status: ProjectStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub description: String,
    pub deadline: String,
    pub target_amount_cents: i64,
    pub category: String,
    pub image_url: Option<String>,
    /// Defaults to `false` if omitted.
    pub featured: Option<bool>,
    /// Defaults to `draft` if omitted.
    pub status: Option<ProjectStatus>,
}

/// DTO for updating an existing project. All fields are optional.
///
/// The derived aggregate fields are deliberately absent.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<String>,
    pub target_amount_cents: Option<i64>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub featured: Option<bool>,
    pub status: Option<ProjectStatus>,
}
