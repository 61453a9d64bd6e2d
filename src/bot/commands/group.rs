use teloxide::prelude::*;

use crate::bot::HandlerResult;
use crate::context::AppContext;
use crate::database::models::User;
use crate::plan::PLAN_DAYS;
use crate::progress;

pub async fn handle_group(bot: Bot, chat_id: ChatId, ctx: &AppContext) -> HandlerResult {
    let summaries = match User::list_active_summaries(&ctx.db.pool).await {
        Ok(summaries) => summaries,
        Err(e) => {
            tracing::error!("Failed to load group summaries: {}", e);
            bot.send_message(chat_id, "Failed to load group progress. Please try again later.")
                .await?;
            return Ok(());
        }
    };

    if summaries.is_empty() {
        bot.send_message(chat_id, "No group progress yet.").await?;
        return Ok(());
    }

    let mut text = String::from("👥 Group reading progress\n\n");

    for (index, summary) in summaries.iter().enumerate() {
        let percentage = progress::completion_percentage(summary.completed_days);
        let medal = match index {
            0 => "🥇",
            1 => "🥈",
            2 => "🥉",
            _ => "📖",
        };
        let day_display = if summary.current_day > PLAN_DAYS {
            format!("{PLAN_DAYS} ✅")
        } else {
            summary.current_day.to_string()
        };

        text.push_str(&format!(
            "{medal} {}\n   📊 {}/{PLAN_DAYS} days ({percentage}%)\n   📅 Plan day: {day_display}\n\n",
            summary.first_name, summary.completed_days
        ));
    }

    text.push_str("🙏 Keep encouraging each other!");

    bot.send_message(chat_id, text).await?;

    Ok(())
}
