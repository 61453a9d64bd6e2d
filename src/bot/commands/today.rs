use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::bot::HandlerResult;
use crate::context::AppContext;
use crate::database::models::User;
use crate::plan::PLAN_DAYS;
use crate::progress::{self, UserState};

pub async fn handle_today(bot: Bot, chat_id: ChatId, telegram_id: i64, ctx: &AppContext) -> HandlerResult {
    let user = match User::find_by_telegram_id(&ctx.db.pool, telegram_id).await {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("Failed to look up user {}: {}", telegram_id, e);
            bot.send_message(chat_id, "Something went wrong. Please try again later.")
                .await?;
            return Ok(());
        }
    };

    match progress::user_state(user.as_ref()) {
        UserState::New | UserState::PendingReset => {
            bot.send_message(chat_id, "Please enroll first with /start.")
                .await?;
        }
        UserState::Completed => {
            let keyboard = InlineKeyboardMarkup::new(vec![vec![
                InlineKeyboardButton::callback("🔄 Start over", "restart_plan"),
            ]]);
            bot.send_message(
                chat_id,
                "🎉 Congratulations! You have finished the one-year reading plan!\n\n\
                 You can start over or keep reading at your own pace.",
            )
            .reply_markup(keyboard)
            .await?;
        }
        UserState::Active(day) => {
            let Some(entry) = ctx.plan.get(day) else {
                tracing::error!("No plan entry for day {}", day);
                bot.send_message(chat_id, "Failed to load the reading plan. Please try again later.")
                    .await?;
                return Ok(());
            };

            let theme = entry
                .theme
                .as_deref()
                .unwrap_or("Reflect on what you read");
            let text = format!(
                "📖 Day {day} of {PLAN_DAYS}\n\n\
                 📅 {}\n\n\
                 📚 Today's reading:\n{}\n\n\
                 💭 {theme}",
                entry.date, entry.reading
            );

            let keyboard = InlineKeyboardMarkup::new(vec![vec![
                InlineKeyboardButton::callback("✅ Mark as read", format!("mark_read_{day}")),
            ]]);

            bot.send_message(chat_id, text)
                .reply_markup(keyboard)
                .await?;
        }
    }

    Ok(())
}
