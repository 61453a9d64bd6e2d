use chrono::{NaiveDate, Utc};
use teloxide::prelude::*;

use crate::bot::HandlerResult;
use crate::context::AppContext;
use crate::database::models::{ReadingRecord, User};
use crate::plan::PLAN_DAYS;
use crate::progress;

pub async fn handle_progress(
    bot: Bot,
    chat_id: ChatId,
    telegram_id: i64,
    ctx: &AppContext,
) -> HandlerResult {
    let user = match User::find_by_telegram_id(&ctx.db.pool, telegram_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            bot.send_message(chat_id, "Please enroll first with /start.")
                .await?;
            return Ok(());
        }
        Err(e) => {
            tracing::error!("Failed to look up user {}: {}", telegram_id, e);
            bot.send_message(chat_id, "Something went wrong. Please try again later.")
                .await?;
            return Ok(());
        }
    };

    let completed = match ReadingRecord::count_for_user(&ctx.db.pool, telegram_id).await {
        Ok(count) => count,
        Err(e) => {
            tracing::error!("Failed to count progress for {}: {}", telegram_id, e);
            bot.send_message(chat_id, "Failed to load your progress. Please try again later.")
                .await?;
            return Ok(());
        }
    };

    let today = Utc::now().date_naive();
    let start_date = NaiveDate::parse_from_str(&user.start_date, "%Y-%m-%d").unwrap_or(today);

    let percentage = progress::completion_percentage(completed);
    let elapsed = progress::days_since_start(start_date, today);
    let pace = progress::pace_delta(start_date, today, completed);
    let bar = progress::progress_bar(percentage);

    let current_day_display = if user.current_day > PLAN_DAYS {
        format!("{PLAN_DAYS} (finished!)")
    } else {
        user.current_day.to_string()
    };

    let mut text = format!(
        "📊 Your reading progress\n\n\
         👤 {}\n\
         📅 Started: {}\n\
         📖 Current day: {current_day_display}\n\
         ✅ Days read: {completed}\n\
         📈 Progress: {percentage}%\n\
         ⏱️ Days since start: {elapsed}\n\n\
         [{bar}] {percentage}%\n\n",
        user.first_name,
        start_date.format("%d.%m.%Y"),
    );

    if user.current_day <= PLAN_DAYS {
        text.push_str(&format!("🎯 Days remaining: {}\n", PLAN_DAYS - completed));

        if pace > 0 {
            text.push_str(&format!("⚠️ Behind schedule: {pace} days\n"));
        } else if pace < 0 {
            text.push_str(&format!("🚀 Ahead of schedule: {} days\n", -pace));
        } else {
            text.push_str("✅ You are right on pace!\n");
        }
    } else {
        text.push_str("🎉 Plan finished! Congratulations!\n");
    }

    bot.send_message(chat_id, text).await?;

    Ok(())
}
