use std::sync::Arc;

use chrono::Utc;
use teloxide::types::{
    CallbackQuery, Chat, ChatId, ChatKind, ChatPrivate, MaybeInaccessibleMessage, MediaKind,
    MediaText, Message, MessageCommon, MessageId, MessageKind, User, UserId,
};

use super::*;
use crate::{
    download::MockVideoDownloader, messaging::MockMessagingService, posts::MockPostService,
};

pub const CHAT_ID: ChatId = ChatId(123);

// Test harness to encapsulate common test setup and actions.
pub struct TestHarness {
    bot_handler: BotHandler,
}

impl TestHarness {
    // Creates a new TestHarness with mock services.
    pub fn new(
        mock_messaging: MockMessagingService,
        mock_posts: MockPostService,
        mock_downloader: MockVideoDownloader,
    ) -> Self {
        let bot_handler = BotHandler::new(
            Arc::new(mock_messaging),
            Arc::new(mock_posts),
            Arc::new(mock_downloader),
        );
        Self { bot_handler }
    }

    // Mocks without a downloader, for flows that never touch video.
    pub fn without_downloader(
        mock_messaging: MockMessagingService,
        mock_posts: MockPostService,
    ) -> Self {
        Self::new(mock_messaging, mock_posts, MockVideoDownloader::new())
    }

    // Simulates handling a plain text message.
    pub async fn handle_text(&self, text: &str) -> BotHandlerResult<()> {
        self.bot_handler.handle_message(&mock_message(CHAT_ID, text)).await
    }

    // Simulates handling a command message.
    pub async fn handle_command(&self, command: Command) -> BotHandlerResult<()> {
        let msg = mock_message(CHAT_ID, "/command");
        self.bot_handler.handle_commands(&msg, command).await
    }

    // Simulates handling a callback query.
    pub async fn handle_callback<'a>(&self, action: &CallbackAction<'a>) -> BotHandlerResult<()> {
        let query = mock_callback_query(CHAT_ID, action);
        self.bot_handler.handle_callback_query(&query).await
    }

    // Simulates handling a raw callback query, e.g. with malformed data.
    pub async fn handle_raw_callback(&self, query: &CallbackQuery) -> BotHandlerResult<()> {
        self.bot_handler.handle_callback_query(query).await
    }
}

// Helper to create a mock teloxide message to reduce boilerplate in tests
pub fn mock_message(chat_id: ChatId, text: &str) -> Message {
    Message {
        id: MessageId(1),
        date: Utc::now(),
        chat: Chat {
            id: chat_id,
            kind: ChatKind::Private(ChatPrivate {
                username: Some("test".to_string()),
                first_name: Some("Test".to_string()),
                last_name: None,
            }),
        },
        kind: MessageKind::Common(MessageCommon {
            media_kind: MediaKind::Text(MediaText {
                text: text.to_string(),
                entities: vec![],
                link_preview_options: None,
            }),
            reply_to_message: None,
            reply_markup: None,
            edit_date: None,
            author_signature: None,
            has_protected_content: false,
            is_automatic_forward: false,
            effect_id: None,
            forward_origin: None,
            external_reply: None,
            quote: None,
            reply_to_story: None,
            sender_boost_count: None,
            is_from_offline: false,
            business_connection_id: None,
        }),
        from: None,
        is_topic_message: false,
        sender_business_bot: None,
        sender_chat: None,
        thread_id: None,
        via_bot: None,
    }
}

// Helper to create a mock callback query carrying a serialized action
pub fn mock_callback_query<'a>(chat_id: ChatId, action: &CallbackAction<'a>) -> CallbackQuery {
    let msg = mock_message(chat_id, "This is a message with a keyboard.");
    CallbackQuery {
        id: "test_callback_id".to_string(),
        from: User {
            id: UserId(1),
            is_bot: false,
            first_name: "Test".to_string(),
            last_name: None,
            username: Some("testuser".to_string()),
            language_code: None,
            is_premium: false,
            added_to_attachment_menu: false,
        },
        message: Some(MaybeInaccessibleMessage::Regular(Box::new(msg))),
        inline_message_id: None,
        chat_instance: "test_instance".to_string(),
        data: Some(serde_json::to_string(action).unwrap()),
        game_short_name: None,
    }
}
