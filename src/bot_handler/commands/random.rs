use crate::{
    bot_handler::{BotHandlerResult, commands::Context},
    posts::PostServiceError,
};

pub async fn handle(ctx: Context<'_>, subreddit: &str) -> BotHandlerResult<()> {
    let chat_id = ctx.message.chat.id;

    // Accept "/r pics", "/r r/pics" and "/r /r/pics" alike.
    let subreddit = subreddit.trim().trim_start_matches("/r/").trim_start_matches("r/");
    if subreddit.is_empty() {
        ctx.handler.messaging_service.send_random_usage_msg(chat_id).await?;
        return Ok(());
    }

    match ctx.handler.post_service.random_post(subreddit).await {
        Ok(post) => {
            ctx.handler.messaging_service.send_random_post_msg(chat_id, subreddit, &post, None).await?;
        }
        Err(PostServiceError::SubredditNotFound(_)) => {
            ctx.handler.messaging_service.send_invalid_subreddit_msg(chat_id, subreddit).await?;
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
