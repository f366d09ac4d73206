use mockall::predicate::*;

use super::{test_helpers::*, *};
use crate::{
    download::{DownloadError, MockVideoDownloader},
    messaging::MockMessagingService,
    posts::{LinkSearch, MockPostService, PostServiceError},
    reddit::Submission,
};

fn submission(id: &str, title: &str, ups: i64) -> Submission {
    Submission {
        id: id.to_string(),
        title: title.to_string(),
        ups,
        permalink: format!("/r/pics/comments/{id}/post/"),
        subreddit: "pics".to_string(),
        url: "https://i.imgur.com/AbCd123.jpg".to_string(),
        selftext: String::new(),
    }
}

#[tokio::test]
async fn test_media_link_message_sends_summary() {
    let mut mock_messaging = MockMessagingService::new();
    let mut mock_posts = MockPostService::new();

    mock_posts.expect_search_link().with(eq("https://i.imgur.com/AbCd123.jpg")).times(1).returning(
        |url| {
            Ok(LinkSearch {
                url: url.to_string(),
                submissions: vec![submission("a", "First", 10)],
            })
        },
    );
    mock_messaging
        .expect_send_link_summary_msg()
        .withf(|chat_id, search| *chat_id == CHAT_ID && search.submissions.len() == 1)
        .times(1)
        .returning(|_, _| Ok(()));

    let harness = TestHarness::without_downloader(mock_messaging, mock_posts);
    let result = harness.handle_text("look at https://i.imgur.com/AbCd123.jpg").await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_media_link_message_stays_silent_without_results() {
    let mock_messaging = MockMessagingService::new();
    let mut mock_posts = MockPostService::new();

    mock_posts.expect_search_link().times(1).returning(|url| {
        Ok(LinkSearch { url: url.to_string(), submissions: vec![] })
    });

    // No messaging expectations: any send would panic the mock.
    let harness = TestHarness::without_downloader(mock_messaging, mock_posts);
    let result = harness.handle_text("look at https://i.imgur.com/AbCd123.jpg").await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_subreddit_mention_sends_peek() {
    let mut mock_messaging = MockMessagingService::new();
    let mut mock_posts = MockPostService::new();

    mock_posts
        .expect_peek_subreddit()
        .with(eq("rust"))
        .times(1)
        .returning(|_| Ok(vec![submission("a", "Hot", 5)]));
    mock_messaging
        .expect_send_peek_msg()
        .withf(|chat_id, subreddit, posts| {
            *chat_id == CHAT_ID && subreddit == "rust" && posts.len() == 1
        })
        .times(1)
        .returning(|_, _, _| Ok(()));

    let harness = TestHarness::without_downloader(mock_messaging, mock_posts);
    let result = harness.handle_text("have you seen /r/rust?").await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_subreddit_mention_unknown_subreddit() {
    let mut mock_messaging = MockMessagingService::new();
    let mut mock_posts = MockPostService::new();

    mock_posts
        .expect_peek_subreddit()
        .returning(|name| Err(PostServiceError::SubredditNotFound(name.to_string())));
    mock_messaging
        .expect_send_invalid_subreddit_msg()
        .with(eq(CHAT_ID), eq("nosuchsub"))
        .times(1)
        .returning(|_, _| Ok(()));

    let harness = TestHarness::without_downloader(mock_messaging, mock_posts);
    let result = harness.handle_text("/r/nosuchsub").await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_plain_text_is_ignored() {
    let harness = TestHarness::without_downloader(MockMessagingService::new(), MockPostService::new());

    let result = harness.handle_text("hello there, no links here").await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_hosted_video_downloads_and_uploads() {
    let mut mock_messaging = MockMessagingService::new();
    let mock_posts = MockPostService::new();
    let mut mock_downloader = MockVideoDownloader::new();

    mock_downloader
        .expect_download()
        .withf(|url, dest| url == "https://v.redd.it/abc123" && dest.ends_with("video.mp4"))
        .times(1)
        .returning(|_, _| Ok(()));
    mock_messaging
        .expect_send_video_msg()
        .withf(|chat_id, video| *chat_id == CHAT_ID && video.ends_with("video.mp4"))
        .times(1)
        .returning(|_, _| Ok(()));

    let harness = TestHarness::new(mock_messaging, mock_posts, mock_downloader);
    let result = harness.handle_text("https://v.redd.it/abc123").await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_hosted_video_download_failure_tells_user() {
    let mut mock_messaging = MockMessagingService::new();
    let mock_posts = MockPostService::new();
    let mut mock_downloader = MockVideoDownloader::new();

    mock_downloader
        .expect_download()
        .times(1)
        .returning(|_, _| Err(DownloadError::MissingOutput));
    mock_messaging
        .expect_send_video_failed_msg()
        .with(eq(CHAT_ID), eq("https://v.redd.it/abc123"))
        .times(1)
        .returning(|_, _| Ok(()));

    let harness = TestHarness::new(mock_messaging, mock_posts, mock_downloader);
    let result = harness.handle_text("https://v.redd.it/abc123").await;

    // The failure is reported to the user, not propagated.
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_start_command() {
    let mut mock_messaging = MockMessagingService::new();
    mock_messaging
        .expect_send_start_msg()
        .with(eq(CHAT_ID))
        .times(1)
        .returning(|_| Ok(()));

    let harness = TestHarness::without_downloader(mock_messaging, MockPostService::new());
    let result = harness.handle_command(Command::Start).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_help_command() {
    let mut mock_messaging = MockMessagingService::new();
    mock_messaging.expect_send_help_msg().with(eq(CHAT_ID)).times(1).returning(|_| Ok(()));

    let harness = TestHarness::without_downloader(mock_messaging, MockPostService::new());
    let result = harness.handle_command(Command::Help).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_random_command_sends_post() {
    let mut mock_messaging = MockMessagingService::new();
    let mut mock_posts = MockPostService::new();

    mock_posts
        .expect_random_post()
        .with(eq("pics"))
        .times(1)
        .returning(|_| Ok(submission("r", "Random", 9)));
    mock_messaging
        .expect_send_random_post_msg()
        .withf(|chat_id, subreddit, post, requested_by| {
            *chat_id == CHAT_ID && subreddit == "pics" && post.id == "r" && requested_by.is_none()
        })
        .times(1)
        .returning(|_, _, _, _| Ok(()));

    let harness = TestHarness::without_downloader(mock_messaging, mock_posts);
    let result = harness.handle_command(Command::Random("pics".to_string())).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_random_command_strips_subreddit_prefix() {
    let mut mock_messaging = MockMessagingService::new();
    let mut mock_posts = MockPostService::new();

    mock_posts
        .expect_random_post()
        .with(eq("pics"))
        .times(1)
        .returning(|_| Ok(submission("r", "Random", 9)));
    mock_messaging.expect_send_random_post_msg().times(1).returning(|_, _, _, _| Ok(()));

    let harness = TestHarness::without_downloader(mock_messaging, mock_posts);
    let result = harness.handle_command(Command::Random("/r/pics".to_string())).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_random_command_without_argument_sends_usage() {
    let mut mock_messaging = MockMessagingService::new();
    mock_messaging
        .expect_send_random_usage_msg()
        .with(eq(CHAT_ID))
        .times(1)
        .returning(|_| Ok(()));

    let harness = TestHarness::without_downloader(mock_messaging, MockPostService::new());
    let result = harness.handle_command(Command::Random(String::new())).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_random_command_unknown_subreddit() {
    let mut mock_messaging = MockMessagingService::new();
    let mut mock_posts = MockPostService::new();

    mock_posts
        .expect_random_post()
        .returning(|name| Err(PostServiceError::SubredditNotFound(name.to_string())));
    mock_messaging
        .expect_send_invalid_subreddit_msg()
        .with(eq(CHAT_ID), eq("nosuchsub"))
        .times(1)
        .returning(|_, _| Ok(()));

    let harness = TestHarness::without_downloader(mock_messaging, mock_posts);
    let result = harness.handle_command(Command::Random("nosuchsub".to_string())).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_more_callback_sends_attributed_post() {
    let mut mock_messaging = MockMessagingService::new();
    let mut mock_posts = MockPostService::new();

    mock_messaging
        .expect_answer_callback_query()
        .with(eq("test_callback_id"))
        .times(1)
        .returning(|_| Ok(()));
    mock_posts
        .expect_random_post()
        .with(eq("pics"))
        .times(1)
        .returning(|_| Ok(submission("r", "Random", 9)));
    mock_messaging
        .expect_send_random_post_msg()
        .withf(|chat_id, subreddit, post, requested_by| {
            *chat_id == CHAT_ID
                && subreddit == "pics"
                && post.id == "r"
                && requested_by.as_deref() == Some("testuser")
        })
        .times(1)
        .returning(|_, _, _, _| Ok(()));

    let harness = TestHarness::without_downloader(mock_messaging, mock_posts);
    let result = harness.handle_callback(&CallbackAction::MF("pics")).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_malformed_callback_data_is_rejected() {
    let mock_messaging = MockMessagingService::new();
    let harness = TestHarness::without_downloader(mock_messaging, MockPostService::new());

    let mut query = mock_callback_query(CHAT_ID, &CallbackAction::MF("pics"));
    query.data = Some("not json".to_string());
    let result = harness.handle_raw_callback(&query).await;

    assert!(matches!(result, Err(BotHandlerError::InvalidInput(_))));
}
