//! The market data facade consumed by the analysis pipeline.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use stocksense_core::{
    AnalystRatings, CompanyOverview, NewsArticle, PriceQuote, SentimentSnapshot, SocialSentiment,
    Symbol,
};

use crate::error::AdapterError;
use crate::http::build_client;
use crate::merge::{merge_news, NewsMerger};
use crate::sources::{
    FinnhubSource, GoogleNewsSource, NewsAdapter, NewsApiSource, NewsRequest, RedditSource,
    SentimentAdapter, SentimentChannel, StockTwitsSource, YahooFinance,
};
use crate::synthetic::synthetic_snapshot;
use crate::types::ProviderConfig;

const MARKET_NEWS_WINDOW_HOURS: i64 = 24;

/// Everything the composer needs from the outside world.
///
/// `company_news`, `market_news`, and `social_sentiment` absorb per-source
/// failures themselves; the remaining methods surface the single provider's
/// error so the caller can substitute a degraded record.
#[async_trait]
pub trait MarketFeed: Send + Sync {
    async fn company_overview(&self, symbol: &Symbol) -> Result<CompanyOverview, AdapterError>;

    async fn price_quote(&self, symbol: &Symbol) -> Result<PriceQuote, AdapterError>;

    async fn company_news(
        &self,
        symbol: &Symbol,
        company_name: &str,
        limit: usize,
    ) -> Result<Vec<NewsArticle>, AdapterError>;

    async fn market_news(&self, limit: usize) -> Result<Vec<NewsArticle>, AdapterError>;

    async fn social_sentiment(
        &self,
        symbol: &Symbol,
        change_percent: f64,
    ) -> Result<SocialSentiment, AdapterError>;

    async fn analyst_ratings(&self, symbol: &Symbol) -> Result<AnalystRatings, AdapterError>;
}

pub struct MarketData {
    yahoo: Arc<YahooFinance>,
    news_sources: Vec<Arc<dyn NewsAdapter>>,
    sentiment_sources: Vec<Arc<dyn SentimentAdapter>>,
}

impl MarketData {
    /// Wire every configured provider. NewsAPI and Finnhub are only used when
    /// their keys are present; the remaining sources need no credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &ProviderConfig) -> Result<Self, AdapterError> {
        let client = build_client(config)?;
        let endpoints = &config.endpoints;
        let yahoo = Arc::new(YahooFinance::new(client.clone(), &endpoints.yahoo));

        let mut news_sources: Vec<Arc<dyn NewsAdapter>> = Vec::new();
        if let Some(key) = &config.news_api_key {
            news_sources.push(Arc::new(NewsApiSource::new(
                client.clone(),
                &endpoints.newsapi,
                key.clone(),
            )));
        }
        if let Some(key) = &config.finnhub_api_key {
            news_sources.push(Arc::new(FinnhubSource::new(
                client.clone(),
                &endpoints.finnhub,
                key.clone(),
            )));
        }
        news_sources.push(yahoo.clone());

        let sentiment_sources: Vec<Arc<dyn SentimentAdapter>> = vec![
            Arc::new(StockTwitsSource::new(client.clone(), &endpoints.stocktwits)),
            Arc::new(RedditSource::new(client.clone(), &endpoints.reddit)),
            Arc::new(GoogleNewsSource::new(client, &endpoints.google_news)),
        ];

        Ok(Self::from_parts(yahoo, news_sources, sentiment_sources))
    }

    /// Assemble from explicit adapters; news sources are in priority order.
    #[must_use]
    pub fn from_parts(
        yahoo: Arc<YahooFinance>,
        news_sources: Vec<Arc<dyn NewsAdapter>>,
        sentiment_sources: Vec<Arc<dyn SentimentAdapter>>,
    ) -> Self {
        Self {
            yahoo,
            news_sources,
            sentiment_sources,
        }
    }

    #[must_use]
    pub fn news_source_names(&self) -> Vec<&'static str> {
        self.news_sources.iter().map(|s| s.name()).collect()
    }

    /// Query every news source in priority order and merge what comes back.
    async fn collect_news(&self, request: &NewsRequest, subject: &str) -> Vec<Vec<NewsArticle>> {
        let mut batches = Vec::with_capacity(self.news_sources.len());
        for source in &self.news_sources {
            match source.fetch(request).await {
                Ok(articles) => {
                    tracing::debug!(
                        subject,
                        source = source.name(),
                        count = articles.len(),
                        "collected news"
                    );
                    batches.push(articles);
                }
                Err(e) => {
                    tracing::warn!(
                        subject,
                        source = source.name(),
                        kind = ?e.kind(),
                        error = %e,
                        "news source failed"
                    );
                }
            }
        }
        batches
    }

    async fn channel_snapshot(
        &self,
        channel: SentimentChannel,
        symbol: &Symbol,
        change_percent: f64,
    ) -> SentimentSnapshot {
        let Some(source) = self
            .sentiment_sources
            .iter()
            .find(|source| source.channel() == channel)
        else {
            return synthetic_snapshot(channel, symbol, change_percent);
        };

        match source.fetch(symbol).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(
                    symbol = %symbol,
                    source = source.name(),
                    kind = ?e.kind(),
                    error = %e,
                    "sentiment source failed, using synthetic snapshot"
                );
                synthetic_snapshot(channel, symbol, change_percent)
            }
        }
    }
}

#[async_trait]
impl MarketFeed for MarketData {
    async fn company_overview(&self, symbol: &Symbol) -> Result<CompanyOverview, AdapterError> {
        self.yahoo.company_overview(symbol).await
    }

    async fn price_quote(&self, symbol: &Symbol) -> Result<PriceQuote, AdapterError> {
        let overview = self.yahoo.company_overview(symbol).await?;
        Ok(overview.quote(symbol))
    }

    async fn company_news(
        &self,
        symbol: &Symbol,
        company_name: &str,
        limit: usize,
    ) -> Result<Vec<NewsArticle>, AdapterError> {
        let request = NewsRequest::Company {
            symbol: symbol.clone(),
            company_name: company_name.to_string(),
            limit,
        };
        let batches = self.collect_news(&request, symbol.as_str()).await;
        Ok(merge_news(batches, limit))
    }

    async fn market_news(&self, limit: usize) -> Result<Vec<NewsArticle>, AdapterError> {
        let since = Utc::now() - Duration::hours(MARKET_NEWS_WINDOW_HOURS);
        let request = NewsRequest::Market {
            since,
            limit: limit * 3,
        };
        let batches = self.collect_news(&request, "market").await;

        let cutoff = since.timestamp();
        let mut merger = NewsMerger::new();
        for batch in batches {
            merger.extend(batch.into_iter().filter(|article| article.date >= cutoff));
        }
        Ok(merger.finish(limit))
    }

    /// Observed data per channel where available, otherwise the deterministic placeholder.
    /// Channels are queried concurrently.
    async fn social_sentiment(
        &self,
        symbol: &Symbol,
        change_percent: f64,
    ) -> Result<SocialSentiment, AdapterError> {
        let (stocktwits, reddit, search_interest) = futures::join!(
            self.channel_snapshot(SentimentChannel::StockTwits, symbol, change_percent),
            self.channel_snapshot(SentimentChannel::Reddit, symbol, change_percent),
            self.channel_snapshot(SentimentChannel::SearchInterest, symbol, change_percent),
        );
        Ok(SocialSentiment {
            stocktwits,
            reddit,
            search_interest,
        })
    }

    async fn analyst_ratings(&self, symbol: &Symbol) -> Result<AnalystRatings, AdapterError> {
        self.yahoo.analyst_ratings(symbol).await
    }
}
