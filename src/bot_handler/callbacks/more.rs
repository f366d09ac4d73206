use crate::{
    bot_handler::{BotHandlerResult, commands::Context},
    posts::PostServiceError,
};

/// Sends another random post from the subreddit, attributed to the user who
/// pressed the "More" button.
pub async fn handle(ctx: Context<'_>, subreddit: &str) -> BotHandlerResult<()> {
    let chat_id = ctx.message.chat.id;

    let requester = ctx
        .query
        .map(|query| query.from.username.clone().unwrap_or_else(|| query.from.first_name.clone()));

    match ctx.handler.post_service.random_post(subreddit).await {
        Ok(post) => {
            ctx.handler
                .messaging_service
                .send_random_post_msg(chat_id, subreddit, &post, requester)
                .await?;
        }
        Err(PostServiceError::SubredditNotFound(_)) => {
            ctx.handler.messaging_service.send_invalid_subreddit_msg(chat_id, subreddit).await?;
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
