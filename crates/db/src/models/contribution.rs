//! Contribution entity model and DTOs.
//!
//! A contribution is immutable once recorded, with one exception: its
//! payment status may move forward as the (stubbed) payment flow reports
//! back. There is deliberately no general update DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use steward_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

/// A contribution row from the `contributions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contribution {
    pub id: DbId,
    pub project_id: DbId,
    /// Absent for anonymous contributions; the contact fields below are
    /// used instead.
    pub user_id: Option<DbId>,
    pub amount_cents: i64,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    pub transaction_reference: Option<String>,
    pub contributor_name: Option<String>,
    pub contributor_email: Option<String>,
    pub contributor_phone: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for recording a contribution against a project.
///
/// The target project comes from the call site (URL path), not the body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContribution {
    pub user_id: Option<DbId>,
    pub amount_cents: i64,
    pub payment_method: String,
    pub transaction_reference: Option<String>,
    pub contributor_name: Option<String>,
    pub contributor_email: Option<String>,
    pub contributor_phone: Option<String>,
}

/// A contribution joined with the title of the project it funds.
///
/// Shape of the "my contributions" listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContributionWithProject {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub contribution: Contribution,
    pub project_title: String,
}
