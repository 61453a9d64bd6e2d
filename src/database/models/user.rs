use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use crate::database::models::{NotificationSettings, ReadingRecord};
use crate::error::BotError;

const USER_COLUMNS: &str =
    "telegram_id, username, first_name, start_date, current_day, is_active, created_at";

/// One enrolled reader. Never hard-deleted: reset only clears progress
/// and flips `is_active`, a later enrollment reactivates the row.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: String,
    /// Calendar date the plan began, `YYYY-MM-DD`.
    pub start_date: String,
    /// Next unread plan day; 366 denotes plan completion.
    pub current_day: i64,
    pub is_active: bool,
    pub created_at: String,
}

/// Per-user row of the group progress board.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserSummary {
    pub first_name: String,
    pub username: Option<String>,
    pub current_day: i64,
    pub start_date: String,
    pub completed_days: i64,
}

impl User {
    pub async fn find_by_telegram_id(
        pool: &SqlitePool,
        telegram_id: i64,
    ) -> Result<Option<Self>, BotError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE telegram_id = ?"
        ))
        .bind(telegram_id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Upserts an enrollment starting at `start_day` and dated `today`.
    ///
    /// A `start_day` above 1 means the reader declared prior progress:
    /// the preceding days are backfilled as completed records dated on
    /// the consecutive calendar days leading up to `today`. Any progress
    /// rows from an earlier run are dropped first so the completed count
    /// always matches `current_day - 1`. The whole write runs in one
    /// transaction; a failed backfill leaves the previous state intact.
    pub async fn enroll(
        pool: &SqlitePool,
        telegram_id: i64,
        username: Option<&str>,
        first_name: &str,
        start_day: i64,
        today: NaiveDate,
    ) -> Result<Self, BotError> {
        let start_date = today.format("%Y-%m-%d").to_string();

        let mut tx = pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO users (telegram_id, username, first_name, start_date, current_day, is_active)
            VALUES (?, ?, ?, ?, ?, 1)
            ON CONFLICT (telegram_id) DO UPDATE SET
                username = excluded.username,
                first_name = excluded.first_name,
                start_date = excluded.start_date,
                current_day = excluded.current_day,
                is_active = 1
            "#,
        )
        .bind(telegram_id)
        .bind(username)
        .bind(first_name)
        .bind(&start_date)
        .bind(start_day)
        .execute(&mut tx)
        .await?;

        NotificationSettings::ensure_defaults(&mut tx, telegram_id).await?;

        sqlx::query("DELETE FROM reading_progress WHERE user_id = ?")
            .bind(telegram_id)
            .execute(&mut tx)
            .await?;

        if start_day > 1 {
            let completed = start_day - 1;
            for day in 1..=completed {
                // Day `completed` lands on yesterday, day 1 on
                // `today - completed`.
                let day_date = today - Duration::days(completed - day + 1);
                // Backfilled days count as finished at that day's end.
                let completed_at = day_date
                    .and_hms_opt(23, 59, 59)
                    .unwrap_or_else(|| day_date.and_time(chrono::NaiveTime::MIN));
                ReadingRecord::upsert_completed(&mut tx, telegram_id, day, day_date, completed_at)
                    .await?;
            }
        }

        tx.commit().await?;

        Self::find_by_telegram_id(pool, telegram_id)
            .await?
            .ok_or(BotError::NotFound(telegram_id))
    }

    /// Records `day` as completed now and advances the day pointer.
    ///
    /// Upsert-by-key makes re-marking the same day idempotent; the
    /// same-day guard in [`crate::progress`] is what keeps a stale
    /// request from skipping ahead or rewinding.
    pub async fn record_completion(
        pool: &SqlitePool,
        telegram_id: i64,
        day: i64,
        today: NaiveDate,
    ) -> Result<(), BotError> {
        ReadingRecord::upsert_completed(pool, telegram_id, day, today, Utc::now().naive_utc())
            .await?;
        Self::set_current_day(pool, telegram_id, day + 1).await
    }

    pub async fn set_current_day(
        pool: &SqlitePool,
        telegram_id: i64,
        current_day: i64,
    ) -> Result<(), BotError> {
        sqlx::query("UPDATE users SET current_day = ? WHERE telegram_id = ?")
            .bind(current_day)
            .bind(telegram_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Clears all progress and deactivates the user. The row itself is
    /// kept; a subsequent [`User::enroll`] reactivates it.
    pub async fn reset(pool: &SqlitePool, telegram_id: i64) -> Result<(), BotError> {
        sqlx::query("DELETE FROM reading_progress WHERE user_id = ?")
            .bind(telegram_id)
            .execute(pool)
            .await?;

        sqlx::query("UPDATE users SET is_active = 0 WHERE telegram_id = ?")
            .bind(telegram_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    pub async fn find_active(pool: &SqlitePool) -> Result<Vec<Self>, BotError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE is_active = 1 ORDER BY telegram_id"
        ))
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Group board: active users ordered by completed days, then by
    /// current day as the tiebreak.
    pub async fn list_active_summaries(pool: &SqlitePool) -> Result<Vec<UserSummary>, BotError> {
        let summaries = sqlx::query_as::<_, UserSummary>(
            r#"
            SELECT u.first_name, u.username, u.current_day, u.start_date,
                   COUNT(rp.id) AS completed_days
            FROM users u
            LEFT JOIN reading_progress rp
                ON u.telegram_id = rp.user_id AND rp.completed = 1
            WHERE u.is_active = 1
            GROUP BY u.telegram_id
            ORDER BY completed_days DESC, u.current_day DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(summaries)
    }
}
