use crate::bot_handler::CallbackAction;

/// The web URL of a subreddit.
pub fn subreddit_url(name: &str) -> String {
    format!("https://www.reddit.com/r/{name}")
}

/// The web URL of a Reddit search for posts linking to `url`.
pub fn search_url(url: &str) -> String {
    format!("https://www.reddit.com/search?q=url:{url}")
}

/// Cuts a title off after `max_chars` characters, appending an ellipsis.
/// Operates on characters, not bytes, so multi-byte titles are safe.
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() <= max_chars {
        title.to_string()
    } else {
        let truncated: String = title.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Serializes a `CallbackAction` to a JSON string. Used for keyboard buttons.
/// expect is ok because inputs are simple and controlled.
pub fn serialize_action(action: &CallbackAction) -> String {
    serde_json::to_string(action).expect("Failed to serialize action")
}
