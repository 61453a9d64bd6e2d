use chrono::Utc;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::bot::keyboards::{main_keyboard, BTN_TODAY};
use crate::bot::HandlerResult;
use crate::context::AppContext;
use crate::database::models::User;
use crate::progress::{self, UserState};

/// Inline keyboard offering the two enrollment paths.
pub fn enrollment_keyboard(after_reset: bool) -> InlineKeyboardMarkup {
    let (new_data, existing_data) = if after_reset {
        ("reset_start_new", "reset_start_existing")
    } else {
        ("start_new", "start_existing")
    };

    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback(
            "🆕 I'm new, start from day one",
            new_data,
        )],
        vec![InlineKeyboardButton::callback(
            "📚 Already reading, I'll share my progress",
            existing_data,
        )],
    ])
}

pub async fn handle_start(bot: Bot, msg: Message, ctx: AppContext) -> HandlerResult {
    let Some(from) = msg.from() else {
        return Ok(());
    };
    let telegram_id = from.id.0 as i64;
    let first_name = from.first_name.clone();

    let user = match User::find_by_telegram_id(&ctx.db.pool, telegram_id).await {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("Failed to look up user {}: {}", telegram_id, e);
            bot.send_message(msg.chat.id, "Something went wrong. Please try again later.")
                .await?;
            return Ok(());
        }
    };

    match progress::user_state(user.as_ref()) {
        UserState::Active(day) => {
            bot.send_message(
                msg.chat.id,
                format!(
                    "Welcome back, {first_name}! 🙏\n\n\
                     You are on day {day} of the reading plan.\n\
                     Keep going! 📖"
                ),
            )
            .reply_markup(main_keyboard())
            .await?;
        }
        UserState::Completed => {
            bot.send_message(msg.chat.id, completed_welcome(&first_name))
                .reply_markup(main_keyboard())
                .await?;
        }
        UserState::New | UserState::PendingReset => {
            bot.send_message(
                msg.chat.id,
                "Welcome to the reading plan bot! 📖\n\n\
                 This bot helps you read a little every day on a fixed \
                 365-day plan.\n\n\
                 Are you new to the plan, or have you already started?",
            )
            .reply_markup(enrollment_keyboard(false))
            .await?;
        }
    }

    Ok(())
}

/// Greeting for a reader who has finished all 365 days. Points at the
/// menu button whose flow carries the restart option.
fn completed_welcome(first_name: &str) -> String {
    format!(
        "Welcome back, {first_name}! 🎉\n\n\
         You have finished the whole plan. \
         Open {BTN_TODAY} to start over."
    )
}

/// Enrolls the user starting at `start_day` and returns the welcome text
/// for the confirmation message.
pub async fn enroll_user(
    ctx: &AppContext,
    telegram_id: i64,
    username: Option<&str>,
    first_name: &str,
    start_day: i64,
) -> Result<String, crate::error::BotError> {
    let today = Utc::now().date_naive();
    User::enroll(
        &ctx.db.pool,
        telegram_id,
        username,
        first_name,
        start_day,
        today,
    )
    .await?;

    let text = if start_day == 1 {
        format!(
            "Great! You start your journey from day one! 🌟\n\n\
             📅 Start date: {}\n\
             🔔 Every day at 06:00 I'll remind you about the reading.\n\n\
             Let's begin! 📖",
            today.format("%d.%m.%Y")
        )
    } else {
        format!(
            "✅ Your progress is set up!\n\n\
             📊 Days read: {}\n\
             📖 You continue from day {} of the plan\n\
             📅 Start date: {}\n\n\
             🔔 Every day at 06:00 I'll remind you about the reading.",
            start_day - 1,
            start_day,
            today.format("%d.%m.%Y")
        )
    };

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_welcome_names_the_restart_entry_point() {
        let text = completed_welcome("Anna");
        assert!(text.contains("Anna"));
        // The restart flow lives behind the today button; the greeting
        // must name a button that is actually on the keyboard.
        assert!(text.contains(BTN_TODAY));
    }
}
