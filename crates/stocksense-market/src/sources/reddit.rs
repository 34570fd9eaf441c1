//! Reddit subreddit search adapter (public JSON listings, no auth).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use stocksense_core::{SentimentSnapshot, Symbol};

use super::keywords::{Tally, FORUM_NEGATIVE, FORUM_POSITIVE};
use super::{SentimentAdapter, SentimentChannel};
use crate::error::AdapterError;
use crate::http::get_json;

const PROVIDER: &str = "reddit";
const SUBREDDITS: [&str; 4] = ["stocks", "investing", "StockMarket", "wallstreetbets"];
const PER_SUBREDDIT: usize = 10;
const MAX_POSTS: usize = 30;

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Post>,
}

#[derive(Debug, Deserialize)]
struct Post {
    data: PostData,
}

#[derive(Debug, Deserialize)]
struct PostData {
    title: Option<String>,
    selftext: Option<String>,
}

impl PostData {
    fn text(&self) -> String {
        format!(
            "{} {}",
            self.title.as_deref().unwrap_or_default(),
            self.selftext.as_deref().unwrap_or_default()
        )
    }
}

pub struct RedditSource {
    client: Client,
    base_url: String,
}

impl RedditSource {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn search(&self, subreddit: &str, symbol: &Symbol) -> Result<Vec<PostData>, AdapterError> {
        let url = format!("{}/r/{subreddit}/search.json", self.base_url);
        let query = [
            ("q", symbol.to_string()),
            ("limit", PER_SUBREDDIT.to_string()),
            ("sort", "relevance".to_string()),
            ("restrict_sr", "true".to_string()),
        ];
        let listing: Listing = get_json(&self.client, PROVIDER, &url, &query).await?;
        Ok(listing.data.children.into_iter().map(|p| p.data).collect())
    }
}

#[async_trait]
impl SentimentAdapter for RedditSource {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn channel(&self) -> SentimentChannel {
        SentimentChannel::Reddit
    }

    /// Searches each subreddit in turn; a failing subreddit is skipped.
    async fn fetch(&self, symbol: &Symbol) -> Result<SentimentSnapshot, AdapterError> {
        let mut posts = Vec::new();
        let mut first_error = None;
        for subreddit in SUBREDDITS {
            match self.search(subreddit, symbol).await {
                Ok(found) => posts.extend(found),
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
        if posts.is_empty() {
            return Err(first_error.unwrap_or(AdapterError::EmptyResult { provider: PROVIDER }));
        }

        let texts: Vec<String> = posts.iter().take(MAX_POSTS).map(PostData::text).collect();
        let tally = Tally::of(texts.iter().map(String::as_str), FORUM_POSITIVE, FORUM_NEGATIVE);
        let total = posts.len() as u64;

        SentimentSnapshot::from_counts(
            tally.positive,
            tally.neutral,
            tally.negative,
            total,
            format!("Found {total} Reddit posts about {symbol} across multiple subreddits."),
        )
        .ok_or(AdapterError::EmptyResult { provider: PROVIDER })
    }
}
