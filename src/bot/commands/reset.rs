use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::bot::HandlerResult;
use crate::context::AppContext;
use crate::database::models::User;

pub async fn handle_reset(bot: Bot, chat_id: ChatId, telegram_id: i64, ctx: &AppContext) -> HandlerResult {
    let user = match User::find_by_telegram_id(&ctx.db.pool, telegram_id).await {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("Failed to look up user {}: {}", telegram_id, e);
            bot.send_message(chat_id, "Something went wrong. Please try again later.")
                .await?;
            return Ok(());
        }
    };

    if user.is_none() {
        bot.send_message(chat_id, "No enrollment found. Start with /start.")
            .await?;
        return Ok(());
    }

    let keyboard = InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("✅ Yes, reset", "confirm_reset"),
        InlineKeyboardButton::callback("❌ Cancel", "cancel_reset"),
    ]]);

    bot.send_message(
        chat_id,
        "⚠️ Are you sure you want to reset all progress?\n\n\
         This will:\n\
         • Delete your whole reading history\n\
         • Set the current day back to 1\n\
         • Set a new start date\n\n\
         ❗ This cannot be undone!",
    )
    .reply_markup(keyboard)
    .await?;

    Ok(())
}
