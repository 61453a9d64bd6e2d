use chrono::Utc;
use teloxide::prelude::*;

use crate::bot::commands::{done, start, today};
use crate::bot::dialogue::{InputDialogue, PendingInput};
use crate::bot::keyboards::{main_keyboard, settings_keyboard};
use crate::bot::HandlerResult;
use crate::context::AppContext;
use crate::database::models::User;

pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    dialogue: InputDialogue,
    ctx: AppContext,
) -> HandlerResult {
    let telegram_id = q.from.id.0 as i64;
    let first_name = q.from.first_name.clone();
    let username = q.from.username.clone();
    let message = q.message.clone();

    let Some(data) = q.data.clone() else {
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    };

    tracing::info!("Callback '{}' from user {}", data, telegram_id);

    match data.as_str() {
        // Fresh enrollment; the reset_ variants arrive from the
        // post-reset prompt and behave identically.
        "start_new" | "reset_start_new" => {
            match start::enroll_user(&ctx, telegram_id, username.as_deref(), &first_name, 1).await
            {
                Ok(text) => {
                    if let Some(m) = &message {
                        bot.edit_message_text(m.chat.id, m.id, text).await?;
                        bot.send_message(m.chat.id, "Choose an action:")
                            .reply_markup(main_keyboard())
                            .await?;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to enroll user {}: {}", telegram_id, e);
                    if let Some(m) = &message {
                        bot.send_message(m.chat.id, "Something went wrong. Please try again later.")
                            .await?;
                    }
                }
            }
        }
        "start_existing" | "reset_start_existing" => {
            if let Some(m) = &message {
                bot.edit_message_text(
                    m.chat.id,
                    m.id,
                    "📚 How many days of the plan have you already read (1 to 365)?\n\n\
                     For example, if you have read 30 days, send: 30",
                )
                .await?;
            }
            dialogue
                .update(PendingInput::AwaitingPriorDays {
                    requested_at: Utc::now(),
                })
                .await?;
        }
        "confirm_reset" => match User::reset(&ctx.db.pool, telegram_id).await {
            Ok(()) => {
                if let Some(m) = &message {
                    bot.edit_message_text(
                        m.chat.id,
                        m.id,
                        "✅ Progress reset!\n\n🆕 Now choose how to start again:",
                    )
                    .reply_markup(start::enrollment_keyboard(true))
                    .await?;
                }
            }
            Err(e) => {
                tracing::error!("Failed to reset user {}: {}", telegram_id, e);
                if let Some(m) = &message {
                    bot.edit_message_text(
                        m.chat.id,
                        m.id,
                        "❌ Failed to reset progress. Please try again later.",
                    )
                    .await?;
                }
            }
        },
        "cancel_reset" => {
            if let Some(m) = &message {
                bot.edit_message_text(
                    m.chat.id,
                    m.id,
                    "❌ Reset cancelled.\n\nYour data is safe.",
                )
                .await?;
                bot.send_message(m.chat.id, "Settings:")
                    .reply_markup(settings_keyboard())
                    .await?;
            }
        }
        // Re-runs the start transition after plan completion.
        "restart_plan" => {
            if let Some(m) = &message {
                bot.edit_message_text(m.chat.id, m.id, "Choose how to start over:")
                    .reply_markup(start::enrollment_keyboard(false))
                    .await?;
            }
        }
        "today_reading" => {
            if let Some(m) = &message {
                today::handle_today(bot.clone(), m.chat.id, telegram_id, &ctx).await?;
            }
        }
        d if d.starts_with("mark_read_") => {
            let day = d.strip_prefix("mark_read_").and_then(|s| s.parse::<i64>().ok());
            let Some(day) = day else {
                bot.answer_callback_query(q.id)
                    .text("Invalid button data")
                    .await?;
                return Ok(());
            };

            match done::mark_day(&ctx, telegram_id, day).await {
                Ok(outcome) => {
                    if let Some(m) = &message {
                        bot.edit_message_text(m.chat.id, m.id, outcome.reply).await?;
                    } else {
                        // Reminder buttons always carry a message, but fall
                        // back to a direct send just in case.
                        bot.send_message(ChatId(telegram_id), outcome.reply).await?;
                    }
                    if let Some(announce) = outcome.announce {
                        done::announce_to_group(&bot, &ctx, announce).await;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to record completion for {}: {}", telegram_id, e);
                    bot.answer_callback_query(q.id)
                        .text("Failed to save progress, try again later")
                        .await?;
                    return Ok(());
                }
            }
        }
        _ => {
            bot.answer_callback_query(q.id).text("Unknown action").await?;
            return Ok(());
        }
    }

    bot.answer_callback_query(q.id).await?;

    Ok(())
}
