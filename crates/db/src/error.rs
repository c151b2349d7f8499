use steward_core::types::DbId;

/// Error type for repository operations that go beyond plain row access.
///
/// Plain CRUD methods return `sqlx::Error` directly; this type exists for
/// the operations that enforce invariants across rows (contribution
/// recording, submission review, project deletion) and therefore need to
/// distinguish domain failures from store failures.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The record store itself failed (connectivity, constraint, syntax).
    #[error(transparent)]
    Store(#[from] sqlx::Error),

    /// The requested write violates an application-level rule.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The write is legal in shape but conflicts with current row state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A contribution row was committed but the project aggregates were
    /// not updated. The row identified here is not yet reflected in
    /// `current_amount_cents` / `contributors` and needs reconciliation.
    #[error(
        "contribution {contribution_id} is not reflected in project {project_id} aggregates: {reason}"
    )]
    Consistency {
        contribution_id: DbId,
        project_id: DbId,
        reason: String,
    },
}
