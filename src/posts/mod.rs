
use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::debug;

use crate::reddit::{RedditClient, RedditError, Submission};

/// How many submissions the link summary shows at most.
pub const SUMMARY_LIMIT: usize = 3;
/// How many hot posts a subreddit peek shows.
const PEEK_LIMIT: usize = 5;
/// How many hot posts to sample from when the random endpoint misbehaves.
const HOT_SAMPLE_LIMIT: usize = 25;

#[derive(Debug, Error)]
pub enum PostServiceError {
    #[error("unknown subreddit: {0}")]
    SubredditNotFound(String),
    #[error("Reddit request failed: {0}")]
    Reddit(#[from] RedditError),
}

type Result<T> = std::result::Result<T, PostServiceError>;

/// The outcome of a link search: the URL that was ultimately queried and the
/// submissions found for it, in the API's top ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSearch {
    pub url: String,
    pub submissions: Vec<Submission>,
}

#[automock]
#[async_trait]
pub trait PostService: Send + Sync {
    /// Search for posts linking to `url`, applying the gifv fallback for
    /// mp4 links that some apps produce when sharing gifv media.
    async fn search_link(&self, url: &str) -> Result<LinkSearch>;

    /// A random post from the subreddit, falling back to sampling the hot
    /// page when the random endpoint misbehaves.
    async fn random_post(&self, subreddit: &str) -> Result<Submission>;

    /// The subreddit's current top hot posts.
    async fn peek_subreddit(&self, subreddit: &str) -> Result<Vec<Submission>>;
}

pub struct DefaultPostService {
    reddit: Arc<dyn RedditClient>,
}

impl DefaultPostService {
    pub fn new(reddit: Arc<dyn RedditClient>) -> Self {
        Self { reddit }
    }
}

#[async_trait]
impl PostService for DefaultPostService {
    async fn search_link(&self, url: &str) -> Result<LinkSearch> {
        let mut submissions = self.reddit.search_by_url(url).await?;
        let mut url = url.to_string();

        // Some apps share gifv media under an mp4 extension. When the mp4
        // search comes up near-empty, search the gifv variant as well and
        // rank those results first.
        if submissions.len() < 2 && url.ends_with(".mp4") {
            let gifv_url = format!("{}.gifv", url.trim_end_matches(".mp4"));
            debug!("Sparse results for {url}, also searching {gifv_url}");

            let mut merged = self.reddit.search_by_url(&gifv_url).await?;
            merged.append(&mut submissions);
            submissions = merged;
            url = gifv_url;
        }

        Ok(LinkSearch { url, submissions })
    }

    async fn random_post(&self, subreddit: &str) -> Result<Submission> {
        match self.reddit.random_post(subreddit).await {
            Ok(submission) => Ok(submission),
            Err(RedditError::SubredditNotFound) => {
                Err(PostServiceError::SubredditNotFound(subreddit.to_string()))
            }
            // Known endpoint misbehavior: pick from the hot page instead.
            Err(RedditError::RandomNotSupported) => {
                debug!("Random endpoint misbehaved for /r/{subreddit}, sampling hot posts");
                let posts = self.reddit.hot_posts(subreddit, HOT_SAMPLE_LIMIT).await?;

                posts
                    .choose(&mut rand::thread_rng())
                    .cloned()
                    .ok_or_else(|| PostServiceError::SubredditNotFound(subreddit.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn peek_subreddit(&self, subreddit: &str) -> Result<Vec<Submission>> {
        match self.reddit.hot_posts(subreddit, PEEK_LIMIT).await {
            Ok(posts) => Ok(posts),
            Err(RedditError::SubredditNotFound) => {
                Err(PostServiceError::SubredditNotFound(subreddit.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
