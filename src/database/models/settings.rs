use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use crate::error::BotError;

/// Per-user reminder preferences.
///
/// The daily trigger currently fires at a fixed server-local time and
/// does not consult these fields; they are created with defaults at
/// enrollment and shown in the settings screen.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub user_id: i64,
    pub morning_time: String,
    pub timezone: String,
    pub enabled: bool,
}

impl NotificationSettings {
    /// Creates the default settings row if the user has none yet.
    /// Takes any executor so it can join an enclosing transaction.
    pub async fn ensure_defaults<'e, E>(executor: E, user_id: i64) -> Result<(), BotError>
    where
        E: sqlx::SqliteExecutor<'e>,
    {
        sqlx::query("INSERT OR IGNORE INTO notification_settings (user_id) VALUES (?)")
            .bind(user_id)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn find_by_user(pool: &SqlitePool, user_id: i64) -> Result<Option<Self>, BotError> {
        let settings = sqlx::query_as::<_, NotificationSettings>(
            "SELECT user_id, morning_time, timezone, enabled
             FROM notification_settings
             WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(settings)
    }
}
