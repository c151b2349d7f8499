//! Repository for notifications and their recipient fan-out records.

use sqlx::PgPool;
use steward_core::types::DbId;

use crate::models::notification::{
    CreateNotification, Notification, NotificationRecipient, NotificationStatus, SendOutcome,
    UpdateNotification, UserNotification,
};
use crate::models::user::UserStatus;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, message, type, status, audience, scheduled_date, sent_date, \
     created_at, updated_at";

const RECIPIENT_COLUMNS: &str = "id, notification_id, user_id, read, read_at, created_at";

/// Provides CRUD operations and the dispatch fan-out for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert a new notification, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateNotification,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (title, message, type, status, audience, scheduled_date)
             VALUES ($1, $2, $3, COALESCE($4, 'draft'), COALESCE($5, 'all'), $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(&input.title)
            .bind(&input.message)
            .bind(input.kind)
            .bind(input.status)
            .bind(input.audience)
            .bind(input.scheduled_date)
            .fetch_one(pool)
            .await
    }

    /// Find a notification by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notifications WHERE id = $1");
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all notifications, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notifications ORDER BY created_at DESC");
        sqlx::query_as::<_, Notification>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a notification. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNotification,
    ) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!(
            "UPDATE notifications SET
                title = COALESCE($2, title),
                message = COALESCE($3, message),
                type = COALESCE($4, type),
                status = COALESCE($5, status),
                audience = COALESCE($6, audience),
                scheduled_date = COALESCE($7, scheduled_date),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.message)
            .bind(input.kind)
            .bind(input.status)
            .bind(input.audience)
            .bind(input.scheduled_date)
            .fetch_optional(pool)
            .await
    }

    /// Delete a notification. Recipient records go with it via FK cascade.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Add a single recipient record. Idempotent: adding the same user
    /// twice keeps the first record and returns it.
    pub async fn add_recipient(
        pool: &PgPool,
        notification_id: DbId,
        user_id: DbId,
    ) -> Result<NotificationRecipient, sqlx::Error> {
        let query = format!(
            "INSERT INTO notification_recipients (notification_id, user_id)
             VALUES ($1, $2)
             ON CONFLICT (notification_id, user_id) DO UPDATE SET user_id = EXCLUDED.user_id
             RETURNING {RECIPIENT_COLUMNS}"
        );
        sqlx::query_as::<_, NotificationRecipient>(&query)
            .bind(notification_id)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// List a user's delivered notifications, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<UserNotification>, sqlx::Error> {
        let query = format!(
            "SELECT nr.id, nr.notification_id, nr.user_id, nr.read, nr.read_at, nr.created_at, \
                    n.title, n.message, n.type, n.sent_date \
             FROM notification_recipients nr \
             JOIN notifications n ON n.id = nr.notification_id \
             WHERE nr.user_id = $1 \
             ORDER BY nr.created_at DESC"
        );
        sqlx::query_as::<_, UserNotification>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Mark a recipient record as read.
    ///
    /// Returns `true` if the record existed and was still unread.
    pub async fn mark_read(pool: &PgPool, recipient_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notification_recipients \
             SET read = TRUE, read_at = now() \
             WHERE id = $1 AND read = FALSE",
        )
        .bind(recipient_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Dispatch a notification to every active member.
    ///
    /// One transaction: the recipient fan-out runs first, then the status
    /// flips to `sent`. A partial fan-out therefore never leaves a
    /// notification marked sent, and the unique (notification_id, user_id)
    /// constraint makes a retried dispatch a no-op for users already
    /// covered.
    ///
    /// Returns `Ok(None)` if no notification with the given `id` exists.
    pub async fn send_to_all(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SendOutcome>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let exists: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM notifications WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Ok(None);
        }

        let recipients_added = sqlx::query(
            "INSERT INTO notification_recipients (notification_id, user_id) \
             SELECT $1, id FROM users WHERE status = $2 \
             ON CONFLICT (notification_id, user_id) DO NOTHING",
        )
        .bind(id)
        .bind(UserStatus::Active)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let update = format!(
            "UPDATE notifications \
             SET status = $2, sent_date = now(), updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let notification = sqlx::query_as::<_, Notification>(&update)
            .bind(id)
            .bind(NotificationStatus::Sent)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            notification_id = %id,
            recipients_added,
            "notification dispatched to all active members"
        );

        Ok(Some(SendOutcome {
            recipients_added,
            notification,
        }))
    }
}
