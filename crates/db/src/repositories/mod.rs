//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Plain row access returns
//! `sqlx::Error`; operations that enforce cross-row invariants return
//! [`crate::DbError`].

pub mod content_submission_repo;
pub mod contribution_repo;
pub mod notification_repo;
pub mod project_repo;
pub mod user_repo;

pub use content_submission_repo::ContentSubmissionRepo;
pub use contribution_repo::ContributionRepo;
pub use notification_repo::NotificationRepo;
pub use project_repo::{DeletePolicy, ProjectRepo};
pub use user_repo::UserRepo;
