//! Reply keyboards mirroring the bot commands. Button labels double as
//! the match keys in the text handler.

use teloxide::types::{KeyboardButton, KeyboardMarkup};

pub const BTN_TODAY: &str = "📖 Today's reading";
pub const BTN_MARK_READ: &str = "✅ Mark as read";
pub const BTN_MY_PROGRESS: &str = "📊 My progress";
pub const BTN_SETTINGS: &str = "⚙️ Settings";
pub const BTN_GROUP_PROGRESS: &str = "👥 Group progress";
pub const BTN_HELP: &str = "❓ Help";

pub const BTN_NOTIFY_TIME: &str = "🔔 Notification time";
pub const BTN_TIMEZONE: &str = "🌍 Timezone";
pub const BTN_RESET: &str = "🔄 Reset progress";
pub const BTN_BACK: &str = "🔙 Back";

pub fn main_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![
            KeyboardButton::new(BTN_TODAY),
            KeyboardButton::new(BTN_MARK_READ),
        ],
        vec![
            KeyboardButton::new(BTN_MY_PROGRESS),
            KeyboardButton::new(BTN_SETTINGS),
        ],
        vec![
            KeyboardButton::new(BTN_GROUP_PROGRESS),
            KeyboardButton::new(BTN_HELP),
        ],
    ])
    .resize_keyboard(true)
}

pub fn settings_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![
            KeyboardButton::new(BTN_NOTIFY_TIME),
            KeyboardButton::new(BTN_TIMEZONE),
        ],
        vec![
            KeyboardButton::new(BTN_RESET),
            KeyboardButton::new(BTN_BACK),
        ],
    ])
    .resize_keyboard(true)
}
