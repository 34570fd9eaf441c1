//! Finnhub company-news and general-news adapter.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use stocksense_core::NewsArticle;

use super::keywords::{mentions_any, MARKET_KEYWORDS};
use super::{NewsAdapter, NewsRequest, NO_SUMMARY};
use crate::error::AdapterError;
use crate::http::get_json;
use crate::text::{first_non_empty, strip_html, truncate_chars};

const PROVIDER: &str = "finnhub";
const COMPANY_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Deserialize)]
struct FinnhubArticle {
    #[serde(default)]
    datetime: i64,
    #[serde(default)]
    headline: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    source: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    url: String,
}

impl FinnhubArticle {
    fn into_article(self, summary_limit: Option<usize>) -> NewsArticle {
        let cleaned = strip_html(&self.summary);
        let summary = first_non_empty([Some(cleaned.as_str())]).map_or_else(
            || NO_SUMMARY.to_string(),
            |s| summary_limit.map_or_else(|| s.to_string(), |n| truncate_chars(s, n)),
        );
        NewsArticle {
            headline: self.headline.trim().to_string(),
            summary,
            source: first_non_empty([Some(self.source.as_str())])
                .unwrap_or("Finnhub")
                .to_string(),
            url: self.url,
            image: Some(self.image).filter(|i| !i.is_empty()),
            date: self.datetime,
        }
    }
}

pub struct FinnhubSource {
    client: Client,
    base_url: String,
    token: String,
}

impl FinnhubSource {
    pub fn new(client: Client, base_url: &str, token: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    async fn get(
        &self,
        path: &str,
        mut query: Vec<(&str, String)>,
    ) -> Result<Vec<FinnhubArticle>, AdapterError> {
        let url = format!("{}{path}", self.base_url);
        query.push(("token", self.token.clone()));
        get_json(&self.client, PROVIDER, &url, &query).await
    }
}

#[async_trait]
impl NewsAdapter for FinnhubSource {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch(&self, request: &NewsRequest) -> Result<Vec<NewsArticle>, AdapterError> {
        let articles: Vec<NewsArticle> = match request {
            NewsRequest::Company { symbol, limit, .. } => {
                let to = Utc::now().date_naive();
                let from = to - Duration::days(COMPANY_WINDOW_DAYS);
                let query = vec![
                    ("symbol", symbol.to_string()),
                    ("from", from.format("%Y-%m-%d").to_string()),
                    ("to", to.format("%Y-%m-%d").to_string()),
                ];
                self.get("/api/v1/company-news", query)
                    .await?
                    .into_iter()
                    .filter(|item| !item.headline.trim().is_empty())
                    .take(limit * 2)
                    .map(|item| item.into_article(None))
                    .collect()
            }
            NewsRequest::Market { since, limit } => {
                let cutoff = since.timestamp();
                self.get("/api/v1/news", vec![("category", "general".to_string())])
                    .await?
                    .into_iter()
                    .filter(|item| !item.headline.trim().is_empty())
                    .filter(|item| item.datetime >= cutoff)
                    .filter(|item| mentions_any(&item.headline, MARKET_KEYWORDS))
                    .take(*limit)
                    .map(|item| item.into_article(Some(200)))
                    .collect()
            }
        };

        if articles.is_empty() {
            return Err(AdapterError::EmptyResult { provider: PROVIDER });
        }
        Ok(articles)
    }
}
