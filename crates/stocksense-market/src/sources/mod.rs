//! Upstream provider adapters.
//!
//! Each adapter speaks exactly one external protocol and returns normalized
//! records or an [`AdapterError`]. Adapters do not retry and do not log;
//! callers decide what a failure means.

mod finnhub;
mod google_news;
mod keywords;
mod newsapi;
mod reddit;
mod stocktwits;
mod yahoo;

pub use finnhub::FinnhubSource;
pub use google_news::GoogleNewsSource;
pub use newsapi::NewsApiSource;
pub use reddit::RedditSource;
pub use stocktwits::StockTwitsSource;
pub use yahoo::YahooFinance;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use stocksense_core::{NewsArticle, SentimentSnapshot, Symbol};

use crate::error::AdapterError;

pub(crate) const NO_SUMMARY: &str = "No summary available";

/// What a news adapter is asked for.
#[derive(Debug, Clone)]
pub enum NewsRequest {
    /// Stories about one company.
    Company {
        symbol: Symbol,
        company_name: String,
        limit: usize,
    },
    /// Market-moving stories published after `since`.
    Market { since: DateTime<Utc>, limit: usize },
}

impl NewsRequest {
    #[must_use]
    pub fn limit(&self) -> usize {
        match self {
            NewsRequest::Company { limit, .. } | NewsRequest::Market { limit, .. } => *limit,
        }
    }
}

#[async_trait]
pub trait NewsAdapter: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(&self, request: &NewsRequest) -> Result<Vec<NewsArticle>, AdapterError>;
}

/// The three reported sentiment channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentimentChannel {
    StockTwits,
    Reddit,
    SearchInterest,
}

impl SentimentChannel {
    pub const ALL: [SentimentChannel; 3] = [
        SentimentChannel::StockTwits,
        SentimentChannel::Reddit,
        SentimentChannel::SearchInterest,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentChannel::StockTwits => "stocktwits",
            SentimentChannel::Reddit => "reddit",
            SentimentChannel::SearchInterest => "searchInterest",
        }
    }
}

#[async_trait]
pub trait SentimentAdapter: Send + Sync {
    fn name(&self) -> &'static str;

    fn channel(&self) -> SentimentChannel;

    async fn fetch(&self, symbol: &Symbol) -> Result<SentimentSnapshot, AdapterError>;
}
