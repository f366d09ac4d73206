mod keyboards;
mod utils;

use std::path::Path;

use async_trait::async_trait;
use mockall::automock;
use teloxide::{
    prelude::*,
    types::{ChatId, InlineKeyboardMarkup, InputFile, LinkPreviewOptions, ParseMode},
    utils::{command::BotCommands, html},
};
use thiserror::Error;

use crate::{
    bot_handler::Command,
    posts::{LinkSearch, SUMMARY_LIMIT},
    reddit::Submission,
};

const START_MESSAGE: &str = "👋 Hi! I'm a bot to help improve Reddit sharing and access on \
                             Telegram.\nCheck out my commands to see what I can do.\nAdd me to a \
                             group to help you find discussions about links sent by your friends.";

/// Peek titles longer than this get cut off with an ellipsis.
const PEEK_TITLE_LIMIT: usize = 40;

#[derive(Debug, Error)]
pub enum MessagingError {
    #[error("Teloxide API request failed: {0}")]
    TeloxideRequest(#[from] teloxide::RequestError),
}

type Result<T> = std::result::Result<T, MessagingError>;

/// Trait for sending messages to the user.
#[automock]
#[async_trait]
pub trait MessagingService: Send + Sync {
    /// Sends a welcome message.
    async fn send_start_msg(&self, chat_id: ChatId) -> Result<()>;

    /// Sends the command help text.
    async fn send_help_msg(&self, chat_id: ChatId) -> Result<()>;

    /// Sends the ranked summary of posts found for a shared link.
    async fn send_link_summary_msg(&self, chat_id: ChatId, search: &LinkSearch) -> Result<()>;

    /// Sends a sneak peek of a subreddit's hot posts.
    async fn send_peek_msg(
        &self,
        chat_id: ChatId,
        subreddit: &str,
        posts: &[Submission],
    ) -> Result<()>;

    /// Sends a random post with its "More" / "Open post" keyboard, with an
    /// optional attribution to the user who requested it.
    async fn send_random_post_msg(
        &self,
        chat_id: ChatId,
        subreddit: &str,
        post: &Submission,
        requested_by: Option<String>,
    ) -> Result<()>;

    /// Uploads a downloaded video file into the chat.
    async fn send_video_msg(&self, chat_id: ChatId, video: &Path) -> Result<()>;

    /// Tells the user a video could not be fetched.
    async fn send_video_failed_msg(&self, chat_id: ChatId, url: &str) -> Result<()>;

    /// Tells the user a subreddit does not exist (or has no posts).
    async fn send_invalid_subreddit_msg(&self, chat_id: ChatId, subreddit: &str) -> Result<()>;

    /// Tells the user how to call the random-post command.
    async fn send_random_usage_msg(&self, chat_id: ChatId) -> Result<()>;

    /// Answers a callback query to clear the client-side spinner.
    async fn answer_callback_query(&self, query_id: &str) -> Result<()>;
}

/// Telegram messaging service.
pub struct TelegramMessagingService {
    bot: Bot,
}

impl TelegramMessagingService {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    async fn send_html(
        &self,
        chat_id: ChatId,
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
        disable_preview: bool,
    ) -> Result<()> {
        let mut request = self.bot.send_message(chat_id, text).parse_mode(ParseMode::Html);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(keyboard);
        }
        if disable_preview {
            request = request.link_preview_options(disabled_link_preview());
        }

        request.await.map(|_| ()).map_err(MessagingError::TeloxideRequest)
    }

    fn format_link_summary(search: &LinkSearch) -> String {
        let count = search.submissions.len();
        let noun = if count == 1 { "post" } else { "posts" };
        let mut reply =
            format!("I found {count} {noun} with this <a href=\"{}\">url</a>\n", search.url);

        for submission in search.submissions.iter().take(SUMMARY_LIMIT) {
            reply.push_str(&format!(
                "⬆️{} <a href=\"{}\">{}</a> (on <a href=\"{}\">/r/{}</a>)\n",
                submission.ups,
                submission.shortlink(),
                html::escape(&submission.title),
                submission.subreddit_url(),
                submission.subreddit,
            ));
        }

        if count > SUMMARY_LIMIT {
            reply.push_str(&format!(
                "\nShowing at most the three most upvoted.\nYou can see all posts in this <a \
                 href=\"{}\">link</a>",
                utils::search_url(&search.url)
            ));
        }

        reply
    }

    fn format_peek(subreddit: &str, posts: &[Submission]) -> String {
        let mut reply = format!(
            "Here's a sneak peek of <a href=\"{}\">/r/{subreddit}</a>:\n",
            utils::subreddit_url(subreddit)
        );

        for post in posts {
            reply.push_str(&format!(
                "- <a href=\"{}\">{}</a>\n",
                post.shortlink(),
                html::escape(&utils::truncate_title(&post.title, PEEK_TITLE_LIMIT)),
            ));
        }

        reply
    }

    fn format_random_post(
        subreddit: &str,
        post: &Submission,
        requested_by: Option<&str>,
    ) -> String {
        // Self posts carry their text; link posts carry the media URL.
        let body = if post.selftext.is_empty() {
            post.url.clone()
        } else {
            html::escape(&post.selftext)
        };

        let mut text = format!(
            "<b>{}</b>\n{body}\nRandom post from <a href=\"{}\">/r/{subreddit}</a>",
            html::escape(&post.title),
            utils::subreddit_url(subreddit),
        );

        if let Some(username) = requested_by {
            text.push_str(&format!(" requested by {}", html::escape(username)));
        }

        text
    }
}

fn disabled_link_preview() -> LinkPreviewOptions {
    LinkPreviewOptions {
        is_disabled: true,
        url: None,
        prefer_small_media: false,
        prefer_large_media: false,
        show_above_text: false,
    }
}

#[async_trait]
impl MessagingService for TelegramMessagingService {
    async fn send_start_msg(&self, chat_id: ChatId) -> Result<()> {
        self.send_html(chat_id, START_MESSAGE.to_string(), None, false).await
    }

    async fn send_help_msg(&self, chat_id: ChatId) -> Result<()> {
        self.send_html(chat_id, Command::descriptions().to_string(), None, false).await
    }

    async fn send_link_summary_msg(&self, chat_id: ChatId, search: &LinkSearch) -> Result<()> {
        let text = Self::format_link_summary(search);
        self.send_html(chat_id, text, None, true).await
    }

    async fn send_peek_msg(
        &self,
        chat_id: ChatId,
        subreddit: &str,
        posts: &[Submission],
    ) -> Result<()> {
        let text = Self::format_peek(subreddit, posts);
        self.send_html(chat_id, text, None, true).await
    }

    async fn send_random_post_msg(
        &self,
        chat_id: ChatId,
        subreddit: &str,
        post: &Submission,
        requested_by: Option<String>,
    ) -> Result<()> {
        let text = Self::format_random_post(subreddit, post, requested_by.as_deref());
        let keyboard = keyboards::build_random_post_keyboard(subreddit, post);
        self.send_html(chat_id, text, Some(keyboard), false).await
    }

    async fn send_video_msg(&self, chat_id: ChatId, video: &Path) -> Result<()> {
        self.bot
            .send_video(chat_id, InputFile::file(video.to_path_buf()))
            .await
            .map(|_| ())
            .map_err(MessagingError::TeloxideRequest)
    }

    async fn send_video_failed_msg(&self, chat_id: ChatId, url: &str) -> Result<()> {
        let text = format!("⚠️ Couldn't fetch the video at {}.", html::escape(url));
        self.send_html(chat_id, text, None, true).await
    }

    async fn send_invalid_subreddit_msg(&self, chat_id: ChatId, subreddit: &str) -> Result<()> {
        let text = format!("❌ Invalid subreddit {}.", html::escape(subreddit));
        self.send_html(chat_id, text, None, false).await
    }

    async fn send_random_usage_msg(&self, chat_id: ChatId) -> Result<()> {
        self.send_html(chat_id, "Tell me which subreddit, e.g. /r pics".to_string(), None, false)
            .await
    }

    async fn answer_callback_query(&self, query_id: &str) -> Result<()> {
        self.bot
            .answer_callback_query(query_id)
            .await
            .map(|_| ())
            .map_err(MessagingError::TeloxideRequest)
    }
}
