#![warn(missing_docs)]
//! A Telegram bot that enriches Reddit links shared in chats.
//!
//! The bot detects Reddit-hosted media links and subreddit mentions in chat
//! messages, looks up matching posts through Reddit's listing API and replies
//! with ranked summaries, sneak peeks and random posts. Videos hosted on
//! Reddit's CDN are downloaded and re-uploaded directly into the chat.

/// The main handler for the bot's logic.
pub mod bot_handler;
/// Message classification for incoming chat text.
pub mod classifier;
/// The configuration for the application.
pub mod config;
/// The dispatcher for routing updates to the correct handlers.
pub mod dispatcher;
/// The downloader for Reddit-hosted videos.
pub mod download;
/// The service for sending messages to the user.
pub mod messaging;
/// The service for looking up posts and subreddits.
pub mod posts;
/// The client for Reddit's listing API.
pub mod reddit;

use std::sync::Arc;

use teloxide::prelude::*;

use crate::{
    bot_handler::BotHandler, config::Config, download::YtDlpDownloader,
    messaging::TelegramMessagingService, posts::DefaultPostService, reddit::DefaultRedditClient,
};

/// Runs the bot.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let bot = Bot::new(config.telegram_bot_token.clone());

    let reddit_client =
        Arc::new(DefaultRedditClient::new(&config.reddit_base_url, &config.reddit_user_agent)?);
    let post_service = Arc::new(DefaultPostService::new(reddit_client));
    let messaging_service = Arc::new(TelegramMessagingService::new(bot.clone()));
    let downloader = Arc::new(YtDlpDownloader::new(&config.ytdlp_path));

    let handler = Arc::new(BotHandler::new(messaging_service, post_service, downloader));
    let mut dispatcher = dispatcher::BotDispatcher::new(handler).build(bot);
    tracing::debug!("Dispatcher built successfully.");

    dispatcher.dispatch().await;

    Ok(())
}
