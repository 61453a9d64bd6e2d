use chrono::Utc;
use teloxide::prelude::*;

use crate::bot::HandlerResult;
use crate::context::AppContext;
use crate::database::models::User;
use crate::error::BotError;
use crate::progress::{self, MarkDecision, UserState};

/// Result of a mark-read attempt: the reply for the user and, when the
/// completion went through, the announcement for the group chat.
pub struct MarkOutcome {
    pub reply: String,
    pub announce: Option<String>,
}

/// Applies the same-day guard and, if it passes, records the completion
/// and advances the day pointer. Rejections change nothing.
pub async fn mark_day(
    ctx: &AppContext,
    telegram_id: i64,
    requested_day: i64,
) -> Result<MarkOutcome, BotError> {
    let user = User::find_by_telegram_id(&ctx.db.pool, telegram_id).await?;
    let state = progress::user_state(user.as_ref());

    let outcome = match progress::decide_mark_read(state, requested_day) {
        MarkDecision::Accept { completes_plan } => {
            User::record_completion(
                &ctx.db.pool,
                telegram_id,
                requested_day,
                Utc::now().date_naive(),
            )
            .await?;

            let reply = if completes_plan {
                "🎉 Day 365 is done - you have finished the whole plan!\n\n\
                 Congratulations on a year of daily reading. \
                 Use 📖 Today's reading to start over."
                    .to_string()
            } else {
                format!(
                    "✅ Great! Day {requested_day} is marked as read!\n\n\
                     🌟 Keep it up! Day {} is waiting for you tomorrow.",
                    requested_day + 1
                )
            };

            let announce = user.map(|u| {
                format!(
                    "📖 {} finished day {requested_day} of the reading plan!\n\
                     🎉 Cheer each other on!",
                    u.first_name
                )
            });

            MarkOutcome { reply, announce }
        }
        MarkDecision::RejectMismatch { current_day } => MarkOutcome {
            reply: format!(
                "❌ That day is already marked or doesn't match your \
                 current progress. You are on day {current_day}."
            ),
            announce: None,
        },
        MarkDecision::RejectCompleted => MarkOutcome {
            reply: "You have already finished the one-year plan! 🎉".to_string(),
            announce: None,
        },
        MarkDecision::RejectNotEnrolled => MarkOutcome {
            reply: "Please enroll first with /start.".to_string(),
            announce: None,
        },
    };

    Ok(outcome)
}

pub async fn handle_done(bot: Bot, chat_id: ChatId, telegram_id: i64, ctx: &AppContext) -> HandlerResult {
    let user = match User::find_by_telegram_id(&ctx.db.pool, telegram_id).await {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("Failed to look up user {}: {}", telegram_id, e);
            bot.send_message(chat_id, "Something went wrong. Please try again later.")
                .await?;
            return Ok(());
        }
    };

    // /done always targets the current day; stale-day requests only come
    // from inline buttons.
    let requested_day = match progress::user_state(user.as_ref()) {
        UserState::Active(day) => day,
        UserState::Completed => {
            bot.send_message(chat_id, "You have already finished the one-year plan! 🎉")
                .await?;
            return Ok(());
        }
        UserState::New | UserState::PendingReset => {
            bot.send_message(chat_id, "Please enroll first with /start.")
                .await?;
            return Ok(());
        }
    };

    match mark_day(ctx, telegram_id, requested_day).await {
        Ok(outcome) => {
            bot.send_message(chat_id, outcome.reply).await?;
            if let Some(announce) = outcome.announce {
                announce_to_group(&bot, ctx, announce).await;
            }
        }
        Err(e) => {
            tracing::error!("Failed to record completion for {}: {}", telegram_id, e);
            bot.send_message(chat_id, "Failed to save your progress. Please try again later.")
                .await?;
        }
    }

    Ok(())
}

/// Best-effort announcement to the configured group chat. Failures are
/// logged and never surfaced to the completing user.
pub async fn announce_to_group(bot: &Bot, ctx: &AppContext, text: String) {
    let Some(group_id) = ctx.group_chat_id else {
        return;
    };

    if let Err(e) = bot.send_message(ChatId(group_id), text).await {
        tracing::warn!("Failed to announce to group {}: {}", group_id, e);
    }
}
