use anyhow::{anyhow, Result};
use std::env;

use crate::utils::validation::validate_telegram_chat_id;

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub database_url: String,
    /// Optional chat where completions are announced.
    pub group_chat_id: Option<i64>,
    pub http_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "sqlite:./data/reading_bot.db".to_string());

        let group_chat_id = match env::var("GROUP_CHAT_ID") {
            Ok(v) if !v.trim().is_empty() => Some(parse_group_chat_id(&v)?),
            _ => None,
        };

        let port_str = env::var("HTTP_PORT").unwrap_or_else(|_| "3000".to_string());
        let http_port = port_str
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        Ok(Config {
            telegram_bot_token: token,
            database_url,
            group_chat_id,
            http_port,
        })
    }
}

/// Parses and range-checks `GROUP_CHAT_ID`.
fn parse_group_chat_id(raw: &str) -> Result<i64> {
    let chat_id: i64 = raw
        .trim()
        .parse()
        .map_err(|_| anyhow!("Invalid GROUP_CHAT_ID: '{}' is not a number", raw.trim()))?;

    validate_telegram_chat_id(chat_id)
        .map_err(|e| anyhow!("Invalid GROUP_CHAT_ID: {e}"))?;

    Ok(chat_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_chat_id_accepts_known_ranges() {
        assert_eq!(parse_group_chat_id("12345").unwrap(), 12345);
        assert_eq!(parse_group_chat_id("-12345").unwrap(), -12345);
        assert_eq!(
            parse_group_chat_id(" -1001234567890 ").unwrap(),
            -1001234567890
        );
    }

    #[test]
    fn test_group_chat_id_rejects_out_of_range() {
        assert!(parse_group_chat_id("0").is_err());
        assert!(parse_group_chat_id("3000000000").is_err());
        assert!(parse_group_chat_id("-3000000000000").is_err());
    }

    #[test]
    fn test_group_chat_id_rejects_non_numeric() {
        assert!(parse_group_chat_id("").is_err());
        assert!(parse_group_chat_id("group").is_err());
        assert!(parse_group_chat_id("12.5").is_err());
    }
}
