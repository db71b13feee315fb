//! Bot configuration, loaded from environment variables.

use anyhow::Result;
use std::env;

/// Runtime configuration for the funnel bot.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// DATABASE_URL (SQLite)
    pub database_url: String,
    /// LOG_FILE
    pub log_file: String,
    /// ADMIN_IDS, comma separated numeric ids
    pub admin_ids: Vec<i64>,
    /// CHANNEL_USERNAME, e.g. `@mychannel`; unset disables the subscription gate
    pub channel_username: Option<String>,
    /// CHANNEL_URL shown on the subscribe button
    pub channel_url: String,
    /// Default link values, overridable per key via the admin panel
    pub freebie_url: String,
    pub course_url: String,
    pub consult_url: String,
}

impl BotConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("BOT_TOKEN")
                .map_err(|_| anyhow::anyhow!("BOT_TOKEN not set. Set it in .env or environment."))?,
        };
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:funnel_bot.db".to_string());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/funnel-bot.log".to_string());

        let admin_ids = env::var("ADMIN_IDS")
            .unwrap_or_default()
            .split(',')
            .filter_map(|s| s.trim().parse::<i64>().ok())
            .collect();

        let channel_username = env::var("CHANNEL_USERNAME").ok().filter(|s| !s.is_empty());
        let channel_url =
            env::var("CHANNEL_URL").unwrap_or_else(|_| "https://t.me/".to_string());
        let freebie_url =
            env::var("FREEBIE_URL").unwrap_or_else(|_| "https://example.com/freebie".to_string());
        let course_url =
            env::var("COURSE_URL").unwrap_or_else(|_| "https://example.com/course".to_string());
        let consult_url =
            env::var("CONSULT_URL").unwrap_or_else(|_| "https://example.com/call".to_string());

        Ok(Self {
            bot_token,
            database_url,
            log_file,
            admin_ids,
            channel_username,
            channel_url,
            freebie_url,
            course_url,
            consult_url,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.bot_token.is_empty() {
            anyhow::bail!("BOT_TOKEN must not be empty");
        }
        if self.admin_ids.is_empty() {
            anyhow::bail!("ADMIN_IDS must name at least one admin id");
        }
        if url::Url::parse(&self.channel_url).is_err() {
            anyhow::bail!("CHANNEL_URL is not a valid URL: {}", self.channel_url);
        }
        Ok(())
    }

    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admin_ids.contains(&user_id)
    }

    /// The conversation campaign run summaries are reported to.
    pub fn report_admin(&self) -> i64 {
        self.admin_ids.first().copied().unwrap_or_default()
    }
}
