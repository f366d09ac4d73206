use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use url::Url;

use super::utils;
use crate::{bot_handler::CallbackAction, reddit::Submission};

/// Keyboard attached to a random post: ask for another one, or open the
/// post in the browser.
pub fn build_random_post_keyboard(subreddit: &str, post: &Submission) -> InlineKeyboardMarkup {
    let more = utils::serialize_action(&CallbackAction::MF(subreddit));

    let buttons = vec![vec![
        InlineKeyboardButton::callback("🔁 More".to_string(), more),
        InlineKeyboardButton::url(
            "↗️ Open post".to_string(),
            Url::parse(&post.shortlink()).expect("Failed to parse post short link"),
        ),
    ]];

    InlineKeyboardMarkup::new(buttons)
}
