use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Streak state for one chat. `chat_id` is the primary key.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct UserStreak {
    /// Telegram chat the record belongs to.
    pub chat_id: i64,
    /// Last day the user drank, as midnight UTC or the moment of a "yes" press.
    pub last_drink_date: DateTime<Utc>,
    /// Sober days counted by "no" presses; never negative.
    pub streak: i64,
    /// Bumped on every write; used for compare-and-swap updates.
    pub version: i64,
}

impl UserStreak {
    /// A fresh record with a zero streak.
    pub fn new(chat_id: i64, last_drink_date: DateTime<Utc>) -> Self {
        Self {
            chat_id,
            last_drink_date,
            streak: 0,
            version: 0,
        }
    }

    /// Records a drink at `at` and restarts the counter.
    pub fn reset(&mut self, at: DateTime<Utc>) {
        self.last_drink_date = at;
        self.streak = 0;
    }

    /// One more sober day.
    pub fn increment(&mut self) {
        self.streak = self.streak.max(0).saturating_add(1);
    }

    /// Looks up the record for one chat.
    pub async fn find_by_chat_id(
        pool: &sqlx::SqlitePool,
        chat_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, UserStreak>(
            "SELECT chat_id, last_drink_date, streak, version FROM user_streaks WHERE chat_id = ?"
        )
        .bind(chat_id)
        .fetch_optional(pool)
        .await
    }

    /// Inserts the record or overwrites whatever is stored for its chat.
    pub async fn upsert(pool: &sqlx::SqlitePool, record: &UserStreak) -> Result<Self, sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO user_streaks (chat_id, last_drink_date, streak, version)
            VALUES (?, ?, ?, 0)
            ON CONFLICT(chat_id) DO UPDATE SET
                last_drink_date = excluded.last_drink_date,
                streak = excluded.streak,
                version = user_streaks.version + 1
            "#,
        )
        .bind(record.chat_id)
        .bind(record.last_drink_date)
        .bind(record.streak)
        .execute(pool)
        .await?;

        Self::find_by_chat_id(pool, record.chat_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Writes the record only if the stored version still equals `expected_version`.
    ///
    /// Returns `false` when another writer got there first; the caller decides
    /// whether to re-read and retry.
    pub async fn save_if_version(
        pool: &sqlx::SqlitePool,
        record: &UserStreak,
        expected_version: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE user_streaks
            SET last_drink_date = ?, streak = ?, version = version + 1
            WHERE chat_id = ? AND version = ?
            "#,
        )
        .bind(record.last_drink_date)
        .bind(record.streak)
        .bind(record.chat_id)
        .bind(expected_version)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Every stored record, ordered by chat id.
    pub async fn find_all(pool: &sqlx::SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, UserStreak>(
            "SELECT chat_id, last_drink_date, streak, version FROM user_streaks ORDER BY chat_id"
        )
        .fetch_all(pool)
        .await
    }

    /// Number of stored records.
    pub async fn count(pool: &sqlx::SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user_streaks")
            .fetch_one(pool)
            .await
    }
}
