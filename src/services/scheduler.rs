use std::sync::Arc;
use std::time::Duration;

use teloxide::prelude::*;
use teloxide::types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup};
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::database::{connection::DatabaseManager, models::User};
use crate::plan::{PlanStore, PLAN_DAYS};

/// Daily trigger, 06:00 server-local time.
const DAILY_CRON: &str = "0 0 6 * * *";

/// Fixed pacing between sends to respect outbound rate limits.
const SEND_PACING: Duration = Duration::from_millis(100);

/// Sends the morning reminder to every active reader once a day.
pub struct NotificationService {
    bot: Bot,
    db: Arc<DatabaseManager>,
    plan: Arc<PlanStore>,
    scheduler: JobScheduler,
}

impl NotificationService {
    pub async fn new(
        bot: Bot,
        db: Arc<DatabaseManager>,
        plan: Arc<PlanStore>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            bot,
            db,
            plan,
            scheduler,
        })
    }

    pub async fn start(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let bot = self.bot.clone();
        let db = self.db.clone();
        let plan = self.plan.clone();

        let reminder_job = Job::new_async(DAILY_CRON, move |_uuid, _l| {
            let bot = bot.clone();
            let db = db.clone();
            let plan = plan.clone();
            Box::pin(async move {
                if let Err(e) = send_daily_reminders(bot, db, plan).await {
                    tracing::error!("Failed to send daily reminders: {}", e);
                }
            })
        })?;

        self.scheduler.add(reminder_job).await?;
        self.scheduler.start().await?;

        tracing::info!("Notification service started - daily reminders at 06:00");
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.scheduler.shutdown().await?;
        Ok(())
    }

    // Manual trigger for testing
    pub async fn run_now(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        send_daily_reminders(self.bot.clone(), self.db.clone(), self.plan.clone()).await
    }
}

/// Readers still inside the plan. Completed users (day past 365) are
/// skipped silently and never re-notified.
pub fn reminder_targets(users: Vec<User>) -> Vec<User> {
    users
        .into_iter()
        .filter(|u| u.current_day <= PLAN_DAYS)
        .collect()
}

async fn send_daily_reminders(
    bot: Bot,
    db: Arc<DatabaseManager>,
    plan: Arc<PlanStore>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let users = User::find_active(&db.pool).await?;
    let targets = reminder_targets(users);

    tracing::info!("Sending daily reminders to {} readers", targets.len());

    // One failure must not block the rest; the pacing delay caps
    // outbound concurrency at one.
    for user in targets {
        if let Err(e) = send_reminder(&bot, &plan, &user).await {
            tracing::error!(
                "Failed to send reminder to user {}: {}",
                user.telegram_id,
                e
            );
        }
        tokio::time::sleep(SEND_PACING).await;
    }

    Ok(())
}

async fn send_reminder(bot: &Bot, plan: &PlanStore, user: &User) -> ResponseResult<()> {
    let reading = plan
        .get(user.current_day)
        .map_or("Reading plan", |entry| entry.reading.as_str());

    let text = format!(
        "🌅 Good morning, {}!\n\n\
         📖 Don't forget today's reading.\n\n\
         📚 Day {}: {}\n\n\
         ✨ Have a great day!",
        user.first_name, user.current_day, reading
    );

    let keyboard = InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback(
            "📖 Open reading",
            "today_reading",
        )],
        vec![InlineKeyboardButton::callback(
            "✅ Mark as read",
            format!("mark_read_{}", user.current_day),
        )],
    ]);

    bot.send_message(ChatId(user.telegram_id), text)
        .reply_markup(keyboard)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(telegram_id: i64, current_day: i64) -> User {
        User {
            telegram_id,
            username: None,
            first_name: format!("Reader{telegram_id}"),
            start_date: "2024-01-01".to_string(),
            current_day,
            is_active: true,
            created_at: "2024-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn test_completed_users_are_skipped() {
        let targets = reminder_targets(vec![user(1, 10), user(2, 370), user(3, 365)]);
        let ids: Vec<i64> = targets.iter().map(|u| u.telegram_id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_day_366_is_not_reminded() {
        let targets = reminder_targets(vec![user(1, 366)]);
        assert!(targets.is_empty());
    }

    #[test]
    fn test_empty_user_list() {
        assert!(reminder_targets(Vec::new()).is_empty());
    }
}
