
use std::time::Duration;

use async_trait::async_trait;
use backoff::{Error as BackoffError, ExponentialBackoff, future::retry};
use mockall::automock;
use reqwest::{
    Client, StatusCode,
    header::{HeaderMap, HeaderValue, USER_AGENT},
};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum RedditError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid user agent: {0}")]
    InvalidUserAgent(#[from] reqwest::header::InvalidHeaderValue),
    #[error("Reddit returned HTTP {0}")]
    Status(u16),
    #[error("subreddit not found")]
    SubredditNotFound,
    #[error("random endpoint returned an unexpected payload")]
    RandomNotSupported,
}

type Result<T> = std::result::Result<T, RedditError>;

/// A single Reddit post as returned by the listing API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Submission {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub ups: i64,
    #[serde(default)]
    pub permalink: String,
    pub subreddit: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub selftext: String,
}

impl Submission {
    /// The canonical short link for this post.
    pub fn shortlink(&self) -> String {
        format!("https://redd.it/{}", self.id)
    }

    /// The web URL of the subreddit this post belongs to.
    pub fn subreddit_url(&self) -> String {
        format!("https://www.reddit.com/r/{}", self.subreddit)
    }
}

/// Listing envelope used by every Reddit listing endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<ListingChild>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: Submission,
}

impl Listing {
    fn into_submissions(self) -> Vec<Submission> {
        self.data.children.into_iter().map(|child| child.data).collect()
    }
}

#[automock]
#[async_trait]
pub trait RedditClient: Send + Sync {
    /// Search all of Reddit for posts linking to the exact `url`, ranked by
    /// the API's own top ordering.
    async fn search_by_url(&self, url: &str) -> Result<Vec<Submission>>;

    /// Current hot posts of a subreddit.
    async fn hot_posts(&self, subreddit: &str, limit: usize) -> Result<Vec<Submission>>;

    /// A random post from a subreddit. `Err(RedditError::RandomNotSupported)`
    /// signals the known endpoint misbehavior rather than a network failure.
    async fn random_post(&self, subreddit: &str) -> Result<Submission>;
}

/// Client for Reddit's public JSON listing API.
pub struct DefaultRedditClient {
    client: Client,
    base_url: String,
}

impl DefaultRedditClient {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self> {
        // Reddit rejects requests without a descriptive User-Agent.
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(user_agent)?);

        let client = Client::builder().default_headers(headers).build()?;
        debug!("HTTP client built successfully.");

        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
    }

    /// Re-usable configuration for exponential backoff.
    fn backoff_config() -> ExponentialBackoff {
        ExponentialBackoff {
            initial_interval: Duration::from_secs(1),
            max_interval: Duration::from_secs(30),
            max_elapsed_time: Some(Duration::from_secs(60)),
            multiplier: 2.0,
            ..Default::default()
        }
    }

    /// Send a GET request and parse the JSON body, retrying transient
    /// failures (network errors, 5xx, 429) and failing fast on the rest.
    async fn get_json<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);

        let operation = || async {
            let resp = self.client.get(&url).query(query).send().await.map_err(|e| {
                warn!("Network error requesting {url}: {e}. Retrying...");
                BackoffError::transient(RedditError::Http(e))
            })?;

            let status = resp.status();
            if status == StatusCode::NOT_FOUND {
                return Err(BackoffError::permanent(RedditError::SubredditNotFound));
            }
            if !status.is_success() {
                let err = RedditError::Status(status.as_u16());
                let be = if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                    warn!("Transient HTTP {status} from {url}. Retrying...");
                    BackoffError::transient(err)
                } else {
                    BackoffError::permanent(err)
                };
                return Err(be);
            }

            resp.json::<T>().await.map_err(|e| BackoffError::permanent(RedditError::Http(e)))
        };

        retry(Self::backoff_config(), operation).await
    }
}

/// Extracts the first submission from a `/random.json` payload, which is
/// normally a two-element array of listings (the post and its comments).
/// Returns `None` for anything else so callers can treat the endpoint as
/// unsupported.
fn first_random_submission(value: serde_json::Value) -> Option<Submission> {
    let listing_value = match value {
        serde_json::Value::Array(items) => items.into_iter().next()?,
        other @ serde_json::Value::Object(_) => other,
        _ => return None,
    };

    let listing: Listing = serde_json::from_value(listing_value).ok()?;
    listing.into_submissions().into_iter().next()
}

#[async_trait]
impl RedditClient for DefaultRedditClient {
    async fn search_by_url(&self, url: &str) -> Result<Vec<Submission>> {
        debug!("Searching Reddit for posts linking to {url}");
        let query = format!("url:{url}");
        let listing: Listing =
            self.get_json("/search.json", &[("q", query.as_str()), ("sort", "top")]).await?;

        Ok(listing.into_submissions())
    }

    async fn hot_posts(&self, subreddit: &str, limit: usize) -> Result<Vec<Submission>> {
        let path = format!("/r/{subreddit}/hot.json");
        let limit = limit.to_string();
        let listing: Listing = self.get_json(&path, &[("limit", limit.as_str())]).await?;

        Ok(listing.into_submissions())
    }

    async fn random_post(&self, subreddit: &str) -> Result<Submission> {
        let path = format!("/r/{subreddit}/random.json");
        let value: serde_json::Value = self.get_json(&path, &[]).await?;

        first_random_submission(value).ok_or(RedditError::RandomNotSupported)
    }
}
