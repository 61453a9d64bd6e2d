use chrono::{DateTime, Utc};
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::Dialogue;

/// How long a prior-progress prompt stays answerable, in seconds.
/// A reply after this window re-prompts instead of consuming a number
/// the user may no longer mean.
pub const PENDING_INPUT_TTL_SECS: i64 = 600;

/// Per-chat pending-input state. Entered when the bot asks "how many
/// days have you read?", consumed by the next numeric message.
#[derive(Clone, Default)]
pub enum PendingInput {
    #[default]
    Idle,
    AwaitingPriorDays { requested_at: DateTime<Utc> },
}

pub type InputDialogue = Dialogue<PendingInput, InMemStorage<PendingInput>>;

pub fn is_expired(requested_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    (now - requested_at).num_seconds() > PENDING_INPUT_TTL_SECS
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_prompt_expiry() {
        let asked = Utc::now();
        assert!(!is_expired(asked, asked));
        assert!(!is_expired(asked, asked + Duration::seconds(PENDING_INPUT_TTL_SECS)));
        assert!(is_expired(
            asked,
            asked + Duration::seconds(PENDING_INPUT_TTL_SECS + 1)
        ));
    }
}
