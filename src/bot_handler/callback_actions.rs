use serde::{Deserialize, Serialize};

/// Actions carried in inline keyboard callback data. Variant names are kept
/// short because Telegram limits callback data to 64 bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CallbackAction<'a> {
    /// MF(&'a str) means "More From": another random post from the subreddit.
    MF(&'a str),
}
