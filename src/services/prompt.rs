use std::sync::Arc;

use async_trait::async_trait;
use chrono_tz::Tz;
use futures_util::future::join_all;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::context::BotEvent;
use crate::database::{connection::DatabaseManager, models::UserStreak};
use crate::services::streak::{ANSWER_NO, ANSWER_YES};
use crate::utils::logging::{log_database_error, log_system_event};

/// Every day at 09:00 (seconds-resolution cron).
pub const DAILY_PROMPT_SCHEDULE: &str = "0 0 9 * * *";
/// Timezone the schedule is evaluated in.
pub const PROMPT_TIMEZONE: Tz = chrono_tz::Europe::Moscow;
/// The daily question.
pub const PROMPT_TEXT: &str = "Вы выпивали вчера?";

/// Failure reported by a [`PromptSender`].
pub type SendError = Box<dyn std::error::Error + Send + Sync>;

/// Delivers the daily question to one chat.
#[async_trait]
pub trait PromptSender: Send + Sync {
    /// Sends the question with the Yes/No keyboard to `chat_id`.
    async fn send_prompt(&self, chat_id: i64) -> Result<(), SendError>;
}

/// Sends the prompt through the Telegram Bot API.
pub struct TelegramPrompter {
    bot: Bot,
}

impl TelegramPrompter {
    /// Wraps a configured bot.
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl PromptSender for TelegramPrompter {
    async fn send_prompt(&self, chat_id: i64) -> Result<(), SendError> {
        self.bot
            .send_message(ChatId(chat_id), PROMPT_TEXT)
            .reply_markup(prompt_keyboard())
            .await?;
        Ok(())
    }
}

/// One button per row: "Yes" then "No".
pub fn prompt_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("Yes", ANSWER_YES)],
        vec![InlineKeyboardButton::callback("No", ANSWER_NO)],
    ])
}

/// Outcome of one scheduled run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Chats a send was started for.
    pub attempted: usize,
    /// Sends Telegram accepted.
    pub delivered: usize,
    /// Sends that errored.
    pub failed: usize,
}

/// Sends the prompt to every stored chat.
///
/// Sends run concurrently and independently; a failed send is logged and
/// counted without affecting the rest. If the records cannot be loaded nobody
/// is messaged and the error is returned.
pub async fn broadcast_daily_prompt(
    db: &DatabaseManager,
    sender: &dyn PromptSender,
) -> Result<BroadcastReport, sqlx::Error> {
    let users = match UserStreak::find_all(&db.pool).await {
        Ok(users) => users,
        Err(e) => {
            log_database_error("SELECT_ALL", "user_streaks", &e.to_string(), Some("daily prompt skipped"));
            return Err(e);
        }
    };

    log_system_event(
        &BotEvent::Timer.to_string(),
        Some(&format!("sending daily prompt ({}) to {} users", PROMPT_TIMEZONE.name(), users.len())),
    );

    let sends = users.iter().map(|user| async move {
        (user.chat_id, sender.send_prompt(user.chat_id).await)
    });
    let results = join_all(sends).await;

    let mut report = BroadcastReport {
        attempted: results.len(),
        ..BroadcastReport::default()
    };
    for (chat_id, result) in results {
        match result {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                report.failed += 1;
                tracing::error!("Failed to send daily prompt to chat {}: {}", chat_id, e);
            }
        }
    }

    Ok(report)
}

/// Owns the cron scheduler that runs the daily prompt.
pub struct PromptService {
    sender: Arc<dyn PromptSender>,
    db: Arc<DatabaseManager>,
    scheduler: JobScheduler,
}

impl PromptService {
    /// Creates the scheduler without adding any job.
    pub async fn new(
        sender: Arc<dyn PromptSender>,
        db: Arc<DatabaseManager>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            sender,
            db,
            scheduler,
        })
    }

    /// Registers the 09:00 Europe/Moscow job and starts the scheduler.
    pub async fn start(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let sender = self.sender.clone();
        let db = self.db.clone();

        let prompt_job = Job::new_async_tz(DAILY_PROMPT_SCHEDULE, PROMPT_TIMEZONE, move |_uuid, _l| {
            let sender = sender.clone();
            let db = db.clone();
            Box::pin(async move {
                match broadcast_daily_prompt(&db, sender.as_ref()).await {
                    Ok(report) => tracing::info!(
                        "Daily prompt done: {} attempted, {} delivered, {} failed",
                        report.attempted, report.delivered, report.failed
                    ),
                    Err(e) => tracing::error!("Daily prompt run failed: {}", e),
                }
            })
        })?;

        self.scheduler.add(prompt_job).await?;
        self.scheduler.start().await?;

        tracing::info!(
            "Prompt service started - asking every day at 09:00 {}",
            PROMPT_TIMEZONE.name()
        );
        Ok(())
    }

    /// Shuts the scheduler down.
    pub async fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.scheduler.shutdown().await?;
        Ok(())
    }

    /// Runs one broadcast outside the schedule.
    pub async fn trigger_now(&self) -> Result<BroadcastReport, sqlx::Error> {
        broadcast_daily_prompt(&self.db, self.sender.as_ref()).await
    }
}
