mod callback_actions;
mod callbacks;
mod commands;
#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests;

use std::sync::Arc;

use teloxide::{prelude::*, types::Message, utils::command::BotCommands};
use thiserror::Error;
use tracing::warn;

pub use crate::bot_handler::callback_actions::CallbackAction;
use crate::{
    bot_handler::commands::{CommandHandler, Context},
    classifier::{self, MessageIntent},
    download::{DownloadError, VideoDownloader},
    messaging::{MessagingError, MessagingService},
    posts::{PostService, PostServiceError},
};

/// Commands the bot responds to.
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Start the bot and show welcome message.")]
    Start,
    #[command(description = "Show this help text.")]
    Help,
    #[command(rename = "r", description = "Send a random post from a subreddit.")]
    Random(String),
}

#[derive(Debug, Error)]
pub enum BotHandlerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Messaging(#[from] MessagingError),
    #[error(transparent)]
    Posts(#[from] PostServiceError),
    #[error(transparent)]
    Download(#[from] DownloadError),
}

pub type BotHandlerResult<T> = Result<T, BotHandlerError>;

/// Encapsulates the messaging, post lookup and download services.
pub struct BotHandler {
    messaging_service: Arc<dyn MessagingService>,
    post_service: Arc<dyn PostService>,
    downloader: Arc<dyn VideoDownloader>,
}

impl BotHandler {
    /// Creates a new `BotHandler` instance.
    pub fn new(
        messaging_service: Arc<dyn MessagingService>,
        post_service: Arc<dyn PostService>,
        downloader: Arc<dyn VideoDownloader>,
    ) -> Self {
        Self { messaging_service, post_service, downloader }
    }

    /// Dispatches the incoming command to the appropriate handler.
    pub async fn handle_commands(&self, msg: &Message, cmd: Command) -> BotHandlerResult<()> {
        let ctx = Context { handler: self, message: msg, query: None };
        cmd.handle(ctx).await
    }

    /// Classifies a plain text message and fires at most one of the
    /// enrichment behaviors.
    pub async fn handle_message(&self, msg: &Message) -> BotHandlerResult<()> {
        let Some(text) = msg.text() else {
            return Ok(());
        };

        match classifier::classify(text) {
            Some(MessageIntent::HostedVideo(url)) => {
                self.process_hosted_video(&url, msg.chat.id).await
            }
            Some(MessageIntent::MediaLink(url)) => self.process_media_link(&url, msg.chat.id).await,
            Some(MessageIntent::SubredditMention(name)) => {
                self.process_subreddit_peek(&name, msg.chat.id).await
            }
            None => Ok(()),
        }
    }

    /// Handles an inline keyboard button press.
    pub async fn handle_callback_query(&self, query: &CallbackQuery) -> BotHandlerResult<()> {
        let Some(data) = query.data.as_deref() else {
            return Ok(());
        };

        let action: CallbackAction = serde_json::from_str(data)
            .map_err(|e| BotHandlerError::InvalidInput(e.to_string()))?;

        // Answer right away so the client-side spinner clears even when the
        // lookup below is slow.
        self.messaging_service.answer_callback_query(&query.id).await?;

        let Some(message) = query.message.as_ref().and_then(|m| m.regular_message()) else {
            // The originating message is gone or inaccessible; nowhere to reply.
            return Ok(());
        };

        let ctx = Context { handler: self, message, query: Some(query) };
        match action {
            CallbackAction::MF(subreddit) => callbacks::more::handle(ctx, subreddit).await,
        }
    }

    /// Search for the shared link and reply with a summary, staying silent
    /// when nothing was found.
    async fn process_media_link(&self, url: &str, chat_id: ChatId) -> BotHandlerResult<()> {
        let search = self.post_service.search_link(url).await?;
        if search.submissions.is_empty() {
            return Ok(());
        }

        self.messaging_service.send_link_summary_msg(chat_id, &search).await?;
        Ok(())
    }

    /// Show a sneak peek of the mentioned subreddit.
    async fn process_subreddit_peek(&self, subreddit: &str, chat_id: ChatId) -> BotHandlerResult<()> {
        match self.post_service.peek_subreddit(subreddit).await {
            Ok(posts) => {
                self.messaging_service.send_peek_msg(chat_id, subreddit, &posts).await?;
            }
            Err(PostServiceError::SubredditNotFound(_)) => {
                self.messaging_service.send_invalid_subreddit_msg(chat_id, subreddit).await?;
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    /// Download a hosted video into a staging directory and upload it into
    /// the chat; the staging directory is removed on drop.
    async fn process_hosted_video(&self, url: &str, chat_id: ChatId) -> BotHandlerResult<()> {
        let staging = tempfile::tempdir().map_err(DownloadError::Io)?;
        let dest = staging.path().join("video.mp4");

        match self.downloader.download(url, &dest).await {
            Ok(()) => {
                self.messaging_service.send_video_msg(chat_id, &dest).await?;
            }
            Err(e) => {
                warn!("Video download failed for {url}: {e}");
                self.messaging_service.send_video_failed_msg(chat_id, url).await?;
            }
        }
        Ok(())
    }
}
