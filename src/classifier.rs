use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Media links the bot knows how to look up on Reddit: imgur, gfycat,
    /// redd.it and streamable, including album/gallery paths and direct
    /// media extensions.
    static ref MEDIA_LINK_RE: Regex = Regex::new(
        r"https?://(?:www\.)?(?:i\.)?(?:imgur|gfycat|redd|streamable)\.(?:com|it)/(?:gallery/)?(?:a/[a-zA-Z0-9]+|[a-zA-Z0-9_-]+\.?(?:gifv|webm|mp4|png|jpg|gif|jpeg)?)"
    )
    .expect("media link regex is valid");

    /// Short-form videos on Reddit's video CDN. These need to be
    /// re-uploaded rather than searched, so they get their own matcher.
    static ref HOSTED_VIDEO_RE: Regex =
        Regex::new(r"https?://v\.redd\.it/[a-zA-Z0-9]+").expect("hosted video regex is valid");

    /// A `/r/name` mention, either at the start of the message or preceded
    /// by a non-word character so that path segments inside URLs
    /// (e.g. `reddit.com/r/name`) don't match.
    static ref SUBREDDIT_RE: Regex =
        Regex::new(r"(?:^|\W)/r/([a-zA-Z0-9]+)").expect("subreddit regex is valid");
}

/// What an incoming text message asks the bot to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageIntent {
    /// A `v.redd.it` video to download and re-upload into the chat.
    HostedVideo(String),
    /// A media link to search for on Reddit.
    MediaLink(String),
    /// A `/r/name` mention to show a sneak peek for.
    SubredditMention(String),
}

/// Classifies a message, returning the first intent that matches in
/// priority order: hosted video, media link, subreddit mention.
pub fn classify(text: &str) -> Option<MessageIntent> {
    if let Some(m) = HOSTED_VIDEO_RE.find(text) {
        return Some(MessageIntent::HostedVideo(m.as_str().to_string()));
    }

    if let Some(m) = MEDIA_LINK_RE.find(text) {
        return Some(MessageIntent::MediaLink(m.as_str().to_string()));
    }

    if let Some(captures) = SUBREDDIT_RE.captures(text) {
        return Some(MessageIntent::SubredditMention(captures[1].to_string()));
    }

    None
}
