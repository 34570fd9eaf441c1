//! The analysis composer.
//!
//! `analyze` runs the company overview to completion first, fans out the
//! independent fetches (news, sentiment, analyst ratings) under the shared
//! concurrency cap, and finally asks the generator for a narrative. Every
//! stage degrades to a fallback value; only the caller's validation can fail.

use std::sync::Arc;
use std::time::Duration;

use stocksense_core::{
    AnalystRatings, AppConfig, CompanyOverview, NewsArticle, Recommendation, SocialSentiment,
    StockAnalysis, Symbol,
};
use stocksense_market::{synthetic_sentiment, FanOut, MarketFeed, Operation};

use crate::chat::canned_answer;
use crate::generator::Generator;
use crate::models::Task;
use crate::narrative::fallback_recommendation;
use crate::prompt::{analysis_prompt, chat_prompt};
use crate::risk::risk_from_text;

const COMPANY_NEWS_LIMIT: usize = 5;
const CHAT_NEWS_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub struct AdvisorSettings {
    /// Per-operation timeout inside the fan-out, and for the company prerequisite.
    pub fetch_timeout: Duration,
    /// Ceiling for a whole generation chain.
    pub generation_timeout: Duration,
    /// Fan-out worker cap.
    pub max_concurrent: usize,
}

impl AdvisorSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            fetch_timeout: Duration::from_secs(config.fanout_timeout_secs),
            generation_timeout: Duration::from_secs(config.generation_timeout_secs),
            max_concurrent: config.fanout_max_concurrent,
        }
    }
}

impl Default for AdvisorSettings {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(5),
            generation_timeout: Duration::from_secs(30),
            max_concurrent: 2,
        }
    }
}

/// Composes market data and generated narrative into a [`StockAnalysis`].
#[derive(Clone)]
pub struct Advisor {
    feed: Arc<dyn MarketFeed>,
    generator: Arc<Generator>,
    fanout: FanOut,
    settings: AdvisorSettings,
}

impl Advisor {
    #[must_use]
    pub fn new(feed: Arc<dyn MarketFeed>, generator: Arc<Generator>, settings: AdvisorSettings) -> Self {
        Self {
            feed,
            generator,
            fanout: FanOut::new(settings.max_concurrent),
            settings,
        }
    }

    #[must_use]
    pub fn feed(&self) -> &Arc<dyn MarketFeed> {
        &self.feed
    }

    #[must_use]
    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    #[must_use]
    pub fn settings(&self) -> &AdvisorSettings {
        &self.settings
    }

    /// Build the full analysis for one symbol. Never fails.
    pub async fn analyze(&self, symbol: &Symbol) -> StockAnalysis {
        let company = self.company_overview(symbol).await;
        let timeout = self.settings.fetch_timeout;

        let news_op = Operation::new(
            "news",
            timeout,
            Vec::<NewsArticle>::new(),
            self.feed
                .company_news(symbol, &company.name, COMPANY_NEWS_LIMIT),
        );
        let sentiment_op = Operation::new(
            "sentiment",
            timeout,
            synthetic_sentiment(symbol, company.change_percent),
            self.feed.social_sentiment(symbol, company.change_percent),
        );
        let analyst_op = Operation::new(
            "analyst",
            timeout,
            AnalystRatings::unavailable("Analyst data unavailable"),
            self.feed.analyst_ratings(symbol),
        );

        let (news, sentiment, analyst) = tokio::join!(
            self.fanout.run(news_op),
            self.fanout.run(sentiment_op),
            self.fanout.run(analyst_op),
        );
        let (news, sentiment, analyst) =
            (news.into_value(), sentiment.into_value(), analyst.into_value());

        let ai_recommendation = self
            .recommend(symbol, &company, &news, &sentiment, &analyst)
            .await;

        StockAnalysis {
            symbol: symbol.to_string(),
            company,
            news,
            sentiment,
            analyst,
            ai_recommendation,
        }
    }

    /// The prerequisite fetch. Failure or timeout yields an overview carrying `error`.
    async fn company_overview(&self, symbol: &Symbol) -> CompanyOverview {
        match tokio::time::timeout(self.settings.fetch_timeout, self.feed.company_overview(symbol))
            .await
        {
            Ok(Ok(company)) => company,
            Ok(Err(e)) => {
                tracing::warn!(symbol = %symbol, kind = ?e.kind(), error = %e, "company overview failed");
                CompanyOverview::unavailable(symbol, &e.to_string())
            }
            Err(_) => {
                tracing::warn!(symbol = %symbol, "company overview timed out");
                CompanyOverview::unavailable(symbol, "request timed out")
            }
        }
    }

    async fn recommend(
        &self,
        symbol: &Symbol,
        company: &CompanyOverview,
        news: &[NewsArticle],
        sentiment: &SocialSentiment,
        analyst: &AnalystRatings,
    ) -> Recommendation {
        if !self.generator.is_configured() {
            return fallback_recommendation(symbol, company, analyst, news);
        }

        let prompt = analysis_prompt(symbol, company, news, sentiment, analyst);
        match tokio::time::timeout(
            self.settings.generation_timeout,
            self.generator.generate(Task::Analysis, &prompt),
        )
        .await
        {
            Ok(Ok(generated)) => Recommendation {
                recommendation: None,
                risk_level: risk_from_text(&generated.text),
                generated_by: Some(generated.label()),
                reasoning: generated.text,
                note: None,
            },
            Ok(Err(exhausted)) => {
                tracing::warn!(symbol = %symbol, attempts = exhausted.attempts, "generation exhausted, using fallback narrative");
                fallback_recommendation(symbol, company, analyst, news)
            }
            Err(_) => {
                tracing::warn!(symbol = %symbol, "generation timed out, using fallback narrative");
                fallback_recommendation(symbol, company, analyst, news)
            }
        }
    }

    /// Answer an educational question. Never fails.
    ///
    /// Market news is fetched for context under its own timeout; an outage
    /// only removes the context.
    pub async fn chat(&self, message: &str) -> String {
        let news = match tokio::time::timeout(
            self.settings.fetch_timeout,
            self.feed.market_news(CHAT_NEWS_LIMIT),
        )
        .await
        {
            Ok(Ok(news)) => news,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "market news for chat context failed");
                Vec::new()
            }
            Err(_) => {
                tracing::warn!("market news for chat context timed out");
                Vec::new()
            }
        };

        if self.generator.is_configured() {
            let prompt = chat_prompt(message, &news);
            match tokio::time::timeout(
                self.settings.generation_timeout,
                self.generator.generate(Task::Chat, &prompt),
            )
            .await
            {
                Ok(Ok(generated)) => return generated.text,
                Ok(Err(exhausted)) => {
                    tracing::warn!(attempts = exhausted.attempts, "chat generation exhausted, using canned answer");
                }
                Err(_) => tracing::warn!("chat generation timed out, using canned answer"),
            }
        }

        canned_answer(message, self.generator.is_configured())
    }
}
