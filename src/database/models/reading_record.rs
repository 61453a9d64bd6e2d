use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use crate::error::BotError;

/// One completed plan day for a user. At most one record exists per
/// `(user_id, day)`; re-marking overwrites in place.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ReadingRecord {
    pub user_id: i64,
    pub day: i64,
    /// Calendar date of the completion, `YYYY-MM-DD`.
    pub date: String,
    pub completed: bool,
    pub completed_at: Option<String>,
}

impl ReadingRecord {
    /// Takes any executor so it can join an enclosing transaction.
    pub async fn upsert_completed<'e, E>(
        executor: E,
        user_id: i64,
        day: i64,
        date: NaiveDate,
        completed_at: NaiveDateTime,
    ) -> Result<(), BotError>
    where
        E: sqlx::SqliteExecutor<'e>,
    {
        sqlx::query(
            r#"
            INSERT INTO reading_progress (user_id, day, date, completed, completed_at)
            VALUES (?, ?, ?, 1, ?)
            ON CONFLICT (user_id, day) DO UPDATE SET
                date = excluded.date,
                completed = 1,
                completed_at = excluded.completed_at
            "#,
        )
        .bind(user_id)
        .bind(day)
        .bind(date.format("%Y-%m-%d").to_string())
        .bind(completed_at.format("%Y-%m-%d %H:%M:%S").to_string())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_by_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<Self>, BotError> {
        let records = sqlx::query_as::<_, ReadingRecord>(
            "SELECT user_id, day, date, completed, completed_at
             FROM reading_progress
             WHERE user_id = ?
             ORDER BY day",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    pub async fn count_for_user(pool: &SqlitePool, user_id: i64) -> Result<i64, BotError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM reading_progress WHERE user_id = ? AND completed = 1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }
}
