use std::env::{self, VarError};

const DEFAULT_REDDIT_BASE_URL: &str = "https://www.reddit.com";
const DEFAULT_REDDIT_USER_AGENT: &str = "telegram:reddigram-bot:0.1";
const DEFAULT_YTDLP_PATH: &str = "yt-dlp";

/// Represents the application configuration.
#[derive(Debug)]
pub struct Config {
    /// The Telegram bot token.
    pub telegram_bot_token: String,
    /// The base URL of the Reddit listing API.
    pub reddit_base_url: String,
    /// The User-Agent header sent to Reddit.
    pub reddit_user_agent: String,
    /// The yt-dlp compatible binary used to download hosted videos.
    pub ytdlp_path: String,
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    pub fn from_env() -> Result<Self, VarError> {
        Ok(Self {
            telegram_bot_token: env::var("TELOXIDE_TOKEN")?,
            reddit_base_url: env::var("REDDIT_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_REDDIT_BASE_URL.to_string()),
            reddit_user_agent: env::var("REDDIT_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_REDDIT_USER_AGENT.to_string()),
            ytdlp_path: env::var("YTDLP_PATH").unwrap_or_else(|_| DEFAULT_YTDLP_PATH.to_string()),
        })
    }
}
