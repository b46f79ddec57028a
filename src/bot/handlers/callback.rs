use chrono::Utc;
use teloxide::prelude::*;
use crate::bot::handlers::HandlerResult;
use crate::context::{AppContext, BotEvent};
use crate::services::streak::{apply_answer, DailyAnswer};
use crate::utils::logging::{log_event_error, log_event_start, log_event_success};

/// Reads a button payload; anything but "yes"/"no" is ignored.
pub fn parse_answer(data: Option<&str>) -> Option<DailyAnswer> {
    data.and_then(|d| d.parse().ok())
}

/// Applies a Yes/No press and always answers the callback query,
/// whether or not anything was updated or sent.
pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    ctx: AppContext,
) -> HandlerResult {
    let event = BotEvent::Callback.to_string();
    let chat_id = q.message.as_ref().map(|m| m.chat.id);

    if let (Some(chat_id), Some(answer)) = (chat_id, parse_answer(q.data.as_deref())) {
        log_event_start(&event, chat_id.0, Some(answer.payload()));

        match apply_answer(&ctx.db, chat_id.0, answer, Utc::now()).await {
            Ok(Some(reply)) => match bot.send_message(chat_id, reply.to_string()).await {
                Ok(_) => log_event_success(&event, chat_id.0, Some(&reply.to_string())),
                Err(e) => log_event_error(&event, chat_id.0, &e.to_string()),
            },
            Ok(None) => tracing::debug!("Ignoring answer from chat {} without a record", chat_id.0),
            Err(e) => log_event_error(&event, chat_id.0, &e.to_string()),
        }
    }

    bot.answer_callback_query(q.id).await?;
    Ok(())
}
