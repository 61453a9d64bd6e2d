use crate::error::BotError;
use crate::plan::PLAN_DAYS;

/// Parses a user-declared prior-progress count. Valid answers are whole
/// numbers in 1..=365; anything else re-prompts the user.
pub fn validate_prior_day_count(input: &str) -> Result<i64, BotError> {
    let n: i64 = input.trim().parse().map_err(|_| {
        BotError::Validation(format!("'{}' is not a number", input.trim()))
    })?;

    if (1..=PLAN_DAYS).contains(&n) {
        Ok(n)
    } else {
        Err(BotError::Validation(format!(
            "day count must be between 1 and {PLAN_DAYS}"
        )))
    }
}

pub fn validate_telegram_chat_id(chat_id: i64) -> Result<(), BotError> {
    if chat_id == 0 {
        return Err(BotError::Validation("Chat ID cannot be zero".to_string()));
    }

    // Positive IDs are user chats, up to 2^31-1.
    if chat_id > 2147483647 {
        return Err(BotError::Validation(
            "Invalid user chat ID range".to_string(),
        ));
    }

    // Group chats are small negative numbers, supergroups start around
    // -1000000000000. Reject anything beyond Telegram's known ranges.
    if chat_id < -2000000000000 {
        return Err(BotError::Validation(
            "Chat ID out of valid range".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prior_day_count_valid_range() {
        assert_eq!(validate_prior_day_count("1").unwrap(), 1);
        assert_eq!(validate_prior_day_count("30").unwrap(), 30);
        assert_eq!(validate_prior_day_count("365").unwrap(), 365);
        assert_eq!(validate_prior_day_count("  42  ").unwrap(), 42);
    }

    #[test]
    fn test_prior_day_count_out_of_range() {
        assert!(validate_prior_day_count("0").is_err());
        assert!(validate_prior_day_count("366").is_err());
        assert!(validate_prior_day_count("-5").is_err());
    }

    #[test]
    fn test_prior_day_count_not_a_number() {
        assert!(validate_prior_day_count("").is_err());
        assert!(validate_prior_day_count("thirty").is_err());
        assert!(validate_prior_day_count("3.5").is_err());
        assert!(validate_prior_day_count("10 days").is_err());
    }

    #[test]
    fn test_chat_id_valid() {
        assert!(validate_telegram_chat_id(12345).is_ok());
        assert!(validate_telegram_chat_id(-12345).is_ok());
        assert!(validate_telegram_chat_id(-1001234567890).is_ok());
    }

    #[test]
    fn test_chat_id_invalid() {
        assert!(validate_telegram_chat_id(0).is_err());
        assert!(validate_telegram_chat_id(3000000000).is_err());
        assert!(validate_telegram_chat_id(-3000000000000).is_err());
    }
}
