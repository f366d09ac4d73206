pub mod help;
pub mod random;
pub mod start;

use async_trait::async_trait;
use teloxide::{prelude::*, types::Message};

use crate::bot_handler::{BotHandler, BotHandlerResult, Command};

/// A common trait for command handlers.
#[async_trait]
pub trait CommandHandler {
    async fn handle(&self, ctx: Context<'_>) -> BotHandlerResult<()>;
}

/// Context groups the data needed by all command and callback handlers.
pub struct Context<'a> {
    pub handler: &'a BotHandler,
    pub message: &'a Message,
    pub query: Option<&'a CallbackQuery>,
}

#[async_trait]
impl CommandHandler for Command {
    async fn handle(&self, ctx: Context<'_>) -> BotHandlerResult<()> {
        match self {
            Command::Start => start::handle(ctx).await,
            Command::Help => help::handle(ctx).await,
            Command::Random(subreddit) => random::handle(ctx, subreddit).await,
        }
    }
}
