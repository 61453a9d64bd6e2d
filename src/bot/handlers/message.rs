use chrono::Utc;
use teloxide::prelude::*;

use crate::bot::commands::{self, Command, HELP_TEXT};
use crate::bot::dialogue::{is_expired, InputDialogue, PendingInput};
use crate::bot::keyboards::{
    main_keyboard, BTN_BACK, BTN_GROUP_PROGRESS, BTN_HELP, BTN_MARK_READ, BTN_MY_PROGRESS,
    BTN_NOTIFY_TIME, BTN_RESET, BTN_SETTINGS, BTN_TIMEZONE, BTN_TODAY,
};
use crate::bot::HandlerResult;
use crate::context::AppContext;
use crate::database::models::User;

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    dialogue: InputDialogue,
    ctx: AppContext,
) -> HandlerResult {
    let Some(from) = msg.from() else {
        return Ok(());
    };
    let telegram_id = from.id.0 as i64;
    let chat_id = msg.chat.id;

    // A command supersedes any pending prompt.
    dialogue.exit().await?;

    match cmd {
        Command::Help => {
            bot.send_message(chat_id, HELP_TEXT).await?;
        }
        Command::Start => {
            commands::start::handle_start(bot, msg, ctx).await?;
        }
        Command::Today => {
            commands::today::handle_today(bot, chat_id, telegram_id, &ctx).await?;
        }
        Command::Done => {
            commands::done::handle_done(bot, chat_id, telegram_id, &ctx).await?;
        }
        Command::Progress => {
            commands::progress::handle_progress(bot, chat_id, telegram_id, &ctx).await?;
        }
        Command::Group => {
            commands::group::handle_group(bot, chat_id, &ctx).await?;
        }
        Command::Settings => {
            commands::settings::handle_settings(bot, chat_id, telegram_id, &ctx).await?;
        }
        Command::Reset => {
            commands::reset::handle_reset(bot, chat_id, telegram_id, &ctx).await?;
        }
    }

    Ok(())
}

/// Plain-text messages: a pending prior-progress answer if one is
/// awaited, otherwise the reply-keyboard buttons.
pub async fn text_handler(
    bot: Bot,
    msg: Message,
    dialogue: InputDialogue,
    ctx: AppContext,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let Some(from) = msg.from() else {
        return Ok(());
    };
    let telegram_id = from.id.0 as i64;
    let chat_id = msg.chat.id;

    let state = dialogue.get().await?.unwrap_or_default();
    if let PendingInput::AwaitingPriorDays { requested_at } = state {
        return prior_days_reply(bot, &msg, dialogue, &ctx, requested_at).await;
    }

    match text {
        BTN_TODAY => {
            commands::today::handle_today(bot, chat_id, telegram_id, &ctx).await?;
        }
        BTN_MARK_READ => {
            commands::done::handle_done(bot, chat_id, telegram_id, &ctx).await?;
        }
        BTN_MY_PROGRESS => {
            commands::progress::handle_progress(bot, chat_id, telegram_id, &ctx).await?;
        }
        BTN_GROUP_PROGRESS => {
            commands::group::handle_group(bot, chat_id, &ctx).await?;
        }
        BTN_SETTINGS => {
            commands::settings::handle_settings(bot, chat_id, telegram_id, &ctx).await?;
        }
        BTN_RESET => {
            commands::reset::handle_reset(bot, chat_id, telegram_id, &ctx).await?;
        }
        BTN_BACK => {
            bot.send_message(chat_id, "Main menu:")
                .reply_markup(main_keyboard())
                .await?;
        }
        BTN_HELP => {
            bot.send_message(chat_id, HELP_TEXT).await?;
        }
        BTN_NOTIFY_TIME | BTN_TIMEZONE => {
            bot.send_message(
                chat_id,
                "🛠 Changing this will be available in a future update.",
            )
            .await?;
        }
        _ => {
            let lookup = User::find_by_telegram_id(&ctx.db.pool, telegram_id).await;
            if let Err(e) = &lookup {
                tracing::error!("Failed to look up user {}: {}", telegram_id, e);
            }
            match unknown_text_reply(&lookup) {
                UnknownTextReply::Menu => {
                    bot.send_message(chat_id, "Use the menu buttons to navigate.")
                        .reply_markup(main_keyboard())
                        .await?;
                }
                UnknownTextReply::Enroll => {
                    bot.send_message(chat_id, "Please start with /start.").await?;
                }
                UnknownTextReply::TryLater => {
                    bot.send_message(chat_id, "Something went wrong. Please try again later.")
                        .await?;
                }
            }
        }
    }

    Ok(())
}

/// Fallback for free text matching no button. A failed lookup gets the
/// generic retry reply, never the enrollment prompt.
#[derive(Debug, PartialEq, Eq)]
enum UnknownTextReply {
    Menu,
    Enroll,
    TryLater,
}

fn unknown_text_reply(lookup: &Result<Option<User>, crate::error::BotError>) -> UnknownTextReply {
    match lookup {
        Ok(Some(_)) => UnknownTextReply::Menu,
        Ok(None) => UnknownTextReply::Enroll,
        Err(_) => UnknownTextReply::TryLater,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BotError;

    fn user() -> User {
        User {
            telegram_id: 1,
            username: None,
            first_name: "Reader".to_string(),
            start_date: "2024-01-01".to_string(),
            current_day: 1,
            is_active: true,
            created_at: "2024-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn test_unknown_text_reply_by_lookup_outcome() {
        assert_eq!(unknown_text_reply(&Ok(Some(user()))), UnknownTextReply::Menu);
        assert_eq!(unknown_text_reply(&Ok(None)), UnknownTextReply::Enroll);
        assert_eq!(
            unknown_text_reply(&Err(BotError::NotFound(1))),
            UnknownTextReply::TryLater
        );
    }
}

async fn prior_days_reply(
    bot: Bot,
    msg: &Message,
    dialogue: InputDialogue,
    ctx: &AppContext,
    requested_at: chrono::DateTime<Utc>,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let Some(from) = msg.from() else {
        return Ok(());
    };
    let telegram_id = from.id.0 as i64;
    let chat_id = msg.chat.id;

    if is_expired(requested_at, Utc::now()) {
        dialogue.exit().await?;
        bot.send_message(
            chat_id,
            "⌛ That prompt has expired. Use /start to try again.",
        )
        .await?;
        return Ok(());
    }

    let days = match crate::utils::validation::validate_prior_day_count(text) {
        Ok(days) => days,
        Err(_) => {
            // Stay in the prompt; the user can answer again.
            bot.send_message(chat_id, "❌ Please send a number from 1 to 365.")
                .await?;
            return Ok(());
        }
    };

    match commands::start::enroll_user(
        ctx,
        telegram_id,
        from.username.as_deref(),
        &from.first_name,
        days + 1,
    )
    .await
    {
        Ok(welcome) => {
            dialogue.exit().await?;
            bot.send_message(chat_id, welcome)
                .reply_markup(main_keyboard())
                .await?;
        }
        Err(e) => {
            tracing::error!("Failed to enroll user {}: {}", telegram_id, e);
            dialogue.exit().await?;
            bot.send_message(chat_id, "Something went wrong. Please try again later.")
                .await?;
        }
    }

    Ok(())
}
