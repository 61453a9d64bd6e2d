pub mod done;
pub mod group;
pub mod progress;
pub mod reset;
pub mod settings;
pub mod start;
pub mod today;

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Reading plan bot commands:")]
pub enum Command {
    #[command(description = "Display this help message")]
    Help,
    #[command(description = "Enroll in the reading plan")]
    Start,
    #[command(description = "Show today's reading")]
    Today,
    #[command(description = "Mark today's reading as done")]
    Done,
    #[command(description = "Show your progress")]
    Progress,
    #[command(description = "Show the group progress board")]
    Group,
    #[command(description = "Notification settings")]
    Settings,
    #[command(description = "Reset your progress")]
    Reset,
}

/// Help text for the /help command and the help button.
pub const HELP_TEXT: &str = "❓ How to use this bot\n\n\
📖 Today's reading - shows the plan for today\n\
✅ Mark as read - records today's reading as done\n\
📊 My progress - your personal statistics\n\
👥 Group progress - standings for all readers\n\
⚙️ Settings - reminder preferences and reset\n\n\
🔔 Reminders arrive every day at 06:00\n\
📚 The plan runs for 365 days, one reading per day";
