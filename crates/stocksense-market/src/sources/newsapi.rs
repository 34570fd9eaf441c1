//! NewsAPI (`/v2/everything`) adapter.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use reqwest::Client;
use serde::Deserialize;
use stocksense_core::NewsArticle;

use super::keywords::MARKET_QUERY;
use super::{NewsAdapter, NewsRequest, NO_SUMMARY};
use crate::error::AdapterError;
use crate::http::get_json;
use crate::text::{first_non_empty, strip_html, truncate_chars, unix_from_rfc3339};

const PROVIDER: &str = "newsapi";
const COMPANY_PAGE_CAP: usize = 20;
const MARKET_PAGE_CAP: usize = 50;

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    source: Option<RawSource>,
    title: Option<String>,
    description: Option<String>,
    content: Option<String>,
    url: Option<String>,
    url_to_image: Option<String>,
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    name: Option<String>,
}

pub struct NewsApiSource {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NewsApiSource {
    pub fn new(client: Client, base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    async fn everything(&self, query: Vec<(&str, String)>) -> Result<Vec<RawArticle>, AdapterError> {
        let url = format!("{}/v2/everything", self.base_url);
        let mut query = query;
        query.push(("apiKey", self.api_key.clone()));
        let response: EverythingResponse = get_json(&self.client, PROVIDER, &url, &query).await?;
        Ok(response.articles)
    }
}

fn normalize(raw: RawArticle, content_limit: usize) -> Option<NewsArticle> {
    let headline = first_non_empty([raw.title.as_deref()])?.to_string();
    let description = raw.description.as_deref().map(strip_html);
    let content = raw.content.as_deref().map(strip_html);
    let summary = match first_non_empty([description.as_deref()]) {
        Some(description) => description.to_string(),
        None => first_non_empty([content.as_deref()])
            .map_or_else(|| NO_SUMMARY.to_string(), |c| truncate_chars(c, content_limit)),
    };
    let source = raw
        .source
        .and_then(|s| s.name)
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| "News API".to_string());

    Some(NewsArticle {
        headline,
        summary,
        source,
        url: raw.url.unwrap_or_default(),
        image: raw.url_to_image.filter(|u| !u.is_empty()),
        date: raw.published_at.as_deref().map_or(0, unix_from_rfc3339),
    })
}

#[async_trait]
impl NewsAdapter for NewsApiSource {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch(&self, request: &NewsRequest) -> Result<Vec<NewsArticle>, AdapterError> {
        let articles: Vec<NewsArticle> = match request {
            NewsRequest::Company {
                symbol,
                company_name,
                limit,
            } => {
                let query = vec![
                    ("q", format!("{symbol} OR {company_name}")),
                    ("language", "en".to_string()),
                    ("sortBy", "publishedAt".to_string()),
                    ("pageSize", (limit * 2).min(COMPANY_PAGE_CAP).to_string()),
                ];
                let symbol_lower = symbol.as_str().to_lowercase();
                let name_lower = company_name.trim().to_lowercase();
                self.everything(query)
                    .await?
                    .into_iter()
                    .filter(|raw| {
                        let title = raw.title.as_deref().unwrap_or_default().to_lowercase();
                        title.contains(&symbol_lower)
                            || (!name_lower.is_empty() && title.contains(&name_lower))
                    })
                    .filter_map(|raw| normalize(raw, 500))
                    .collect()
            }
            NewsRequest::Market { since, limit } => {
                let query = vec![
                    ("q", MARKET_QUERY.to_string()),
                    ("language", "en".to_string()),
                    ("sortBy", "publishedAt".to_string()),
                    ("from", since.to_rfc3339_opts(SecondsFormat::Secs, true)),
                    ("to", Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
                    ("pageSize", (*limit).min(MARKET_PAGE_CAP).to_string()),
                ];
                self.everything(query)
                    .await?
                    .into_iter()
                    .filter_map(|raw| normalize(raw, 200))
                    .collect()
            }
        };

        if articles.is_empty() {
            return Err(AdapterError::EmptyResult { provider: PROVIDER });
        }
        Ok(articles)
    }
}
