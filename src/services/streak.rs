//! Streak transitions.
//!
//! Three inputs change a chat's record: a date typed as text, a "yes" button
//! press and a "no" button press. The functions here take the current time as a
//! parameter and return the reply to send, so the Telegram handlers only have to
//! deliver it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::database::connection::DatabaseManager;
use crate::database::models::UserStreak;
use crate::utils::datetime::{format_date, start_of_day_utc, whole_days_between};
use crate::utils::logging::{log_database_operation, log_validation_error};
use crate::utils::validation::{parse_drink_date, DateInput};

/// Callback payload of the "Yes" button.
pub const ANSWER_YES: &str = "yes";
/// Callback payload of the "No" button.
pub const ANSWER_NO: &str = "no";

/// Compare-and-swap attempts before a button press gives up.
pub const MAX_WRITE_ATTEMPTS: u32 = 3;

const TABLE: &str = "user_streaks";

/// Why a streak update failed.
#[derive(Debug, Error)]
pub enum StreakError {
    /// The store rejected a read or write.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    /// Every compare-and-swap attempt lost a race.
    #[error("record for chat {chat_id} changed under us {attempts} times in a row")]
    Conflict {
        /// Chat whose record kept changing.
        chat_id: i64,
        /// Attempts made before giving up.
        attempts: u32,
    },
}

/// The user's answer to "did you drink yesterday?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyAnswer {
    /// "Yes": the user drank.
    Drank,
    /// "No": another sober day.
    Sober,
}

impl DailyAnswer {
    /// Callback data carried by the matching button.
    pub fn payload(self) -> &'static str {
        match self {
            DailyAnswer::Drank => ANSWER_YES,
            DailyAnswer::Sober => ANSWER_NO,
        }
    }
}

impl FromStr for DailyAnswer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ANSWER_YES => Ok(DailyAnswer::Drank),
            ANSWER_NO => Ok(DailyAnswer::Sober),
            other => Err(format!("unknown answer payload '{other}'")),
        }
    }
}

/// Everything the bot can say back to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreakReply {
    /// Reply to `/start`.
    Instructions,
    /// A date-shaped message naming a day that does not exist.
    InvalidDate,
    /// Days since the date the user just entered.
    DaysWithout(i64),
    /// Reply to "yes".
    DrankYesterday,
    /// Reply to "no", with the new streak.
    SoberYesterday(i64),
}

impl fmt::Display for StreakReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreakReply::Instructions => write!(
                f,
                "Здравствуйте! Введите дату, когда вы пили алкоголь последний раз (в формате YYYY-MM-DD, например, 2025-08-12):"
            ),
            StreakReply::InvalidDate => write!(
                f,
                "Такой даты не существует. Введите дату в формате YYYY-MM-DD, например, 2025-08-12"
            ),
            StreakReply::DaysWithout(days) => write!(f, "Дней без алкоголя: {days}"),
            StreakReply::DrankYesterday => write!(f, "Вы выпили вчера. Дней без алкоголя: 0"),
            StreakReply::SoberYesterday(streak) => {
                write!(f, "Вы не выпивали вчера. Дней без алкоголя: {streak}")
            }
        }
    }
}

/// Reacts to free text. `None` means the message is ignored.
pub async fn handle_text(
    db: &DatabaseManager,
    chat_id: i64,
    text: &str,
    now: DateTime<Utc>,
) -> Result<Option<StreakReply>, StreakError> {
    match parse_drink_date(text) {
        DateInput::NotADate => Ok(None),
        DateInput::Invalid => {
            log_validation_error("drink_date", text, "no such calendar day", chat_id);
            Ok(Some(StreakReply::InvalidDate))
        }
        DateInput::Valid(date) => record_drink_date(db, chat_id, date, now).await.map(Some),
    }
}

/// Creates or overwrites the chat's record with a fresh drink date.
pub async fn record_drink_date(
    db: &DatabaseManager,
    chat_id: i64,
    date: NaiveDate,
    now: DateTime<Utc>,
) -> Result<StreakReply, StreakError> {
    let last_drink = start_of_day_utc(date);
    let record = UserStreak::new(chat_id, last_drink);

    log_database_operation("UPSERT", TABLE, Some(&format!("chat {chat_id} -> {}", format_date(&last_drink))));
    UserStreak::upsert(&db.pool, &record).await?;

    Ok(StreakReply::DaysWithout(whole_days_between(last_drink, now)))
}

/// Applies a button press. Chats without a record get `None` and no mutation.
///
/// Writes are compare-and-swap on the record version; a lost race re-reads the
/// record and re-applies the answer, up to [`MAX_WRITE_ATTEMPTS`] times.
pub async fn apply_answer(
    db: &DatabaseManager,
    chat_id: i64,
    answer: DailyAnswer,
    now: DateTime<Utc>,
) -> Result<Option<StreakReply>, StreakError> {
    for attempt in 1..=MAX_WRITE_ATTEMPTS {
        let Some(mut record) = UserStreak::find_by_chat_id(&db.pool, chat_id).await? else {
            return Ok(None);
        };
        let expected_version = record.version;

        let reply = match answer {
            DailyAnswer::Drank => {
                record.reset(now);
                StreakReply::DrankYesterday
            }
            DailyAnswer::Sober => {
                record.increment();
                StreakReply::SoberYesterday(record.streak)
            }
        };

        log_database_operation(
            "CAS_UPDATE",
            TABLE,
            Some(&format!("chat {chat_id} v{expected_version} attempt {attempt}")),
        );
        if UserStreak::save_if_version(&db.pool, &record, expected_version).await? {
            return Ok(Some(reply));
        }

        tracing::warn!(
            "Concurrent update on chat {} (attempt {}/{}), retrying",
            chat_id, attempt, MAX_WRITE_ATTEMPTS
        );
    }

    Err(StreakError::Conflict {
        chat_id,
        attempts: MAX_WRITE_ATTEMPTS,
    })
}
