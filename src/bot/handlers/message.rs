use chrono::Utc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use crate::bot::commands::Command;
use crate::bot::handlers::HandlerResult;
use crate::context::{AppContext, BotEvent};
use crate::services::streak::{handle_text, StreakReply};
use crate::utils::logging::{log_event_error, log_event_start, log_event_success};

/// Answers `/start` with the instructions and `/help` with the command list.
pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
) -> HandlerResult {
    log_event_start(&BotEvent::Text.to_string(), msg.chat.id.0, Some(&format!("{cmd:?}")));

    match cmd {
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string()).await?;
        }
        Command::Start => {
            bot.send_message(msg.chat.id, StreakReply::Instructions.to_string()).await?;
        }
    }
    Ok(())
}

/// Handles `YYYY-MM-DD` text. Store failures are logged and the user gets no reply.
pub async fn date_handler(
    bot: Bot,
    msg: Message,
    ctx: AppContext,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let chat_id = msg.chat.id.0;
    let event = BotEvent::Text.to_string();
    log_event_start(&event, chat_id, Some(text));

    match handle_text(&ctx.db, chat_id, text, Utc::now()).await {
        Ok(Some(reply)) => {
            bot.send_message(msg.chat.id, reply.to_string()).await?;
            log_event_success(&event, chat_id, Some(&reply.to_string()));
        }
        Ok(None) => {}
        Err(e) => log_event_error(&event, chat_id, &e.to_string()),
    }
    Ok(())
}
