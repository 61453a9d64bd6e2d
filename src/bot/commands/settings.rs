use teloxide::prelude::*;

use crate::bot::keyboards::settings_keyboard;
use crate::bot::HandlerResult;
use crate::context::AppContext;
use crate::database::models::NotificationSettings;

pub async fn handle_settings(
    bot: Bot,
    chat_id: ChatId,
    telegram_id: i64,
    ctx: &AppContext,
) -> HandlerResult {
    // Preferences are shown as stored; the daily trigger itself fires at
    // a fixed 06:00 and does not consult them yet.
    let settings = match NotificationSettings::find_by_user(&ctx.db.pool, telegram_id).await {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Failed to load settings for {}: {}", telegram_id, e);
            bot.send_message(chat_id, "Something went wrong. Please try again later.")
                .await?;
            return Ok(());
        }
    };

    let text = match settings {
        Some(s) => format!(
            "⚙️ Settings\n\n\
             🔔 Reminder time: {}\n\
             🌍 Timezone: {}\n\
             📬 Reminders: {}",
            s.morning_time,
            s.timezone,
            if s.enabled { "on" } else { "off" }
        ),
        None => "⚙️ Settings\n\nEnroll with /start to set up reminders.".to_string(),
    };

    bot.send_message(chat_id, text)
        .reply_markup(settings_keyboard())
        .await?;

    Ok(())
}
