use std::time::Duration;

use stocksense_core::AppConfig;

/// Base URLs for every upstream provider.
///
/// Production values by default; tests point every field at one mock server.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub yahoo: String,
    pub newsapi: String,
    pub finnhub: String,
    pub stocktwits: String,
    pub reddit: String,
    pub google_news: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            yahoo: "https://query2.finance.yahoo.com".to_string(),
            newsapi: "https://newsapi.org".to_string(),
            finnhub: "https://finnhub.io".to_string(),
            stocktwits: "https://api.stocktwits.com".to_string(),
            reddit: "https://www.reddit.com".to_string(),
            google_news: "https://news.google.com".to_string(),
        }
    }
}

impl Endpoints {
    /// Route every provider to the same base URL.
    #[must_use]
    pub fn all(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        Self {
            yahoo: base.clone(),
            newsapi: base.clone(),
            finnhub: base.clone(),
            stocktwits: base.clone(),
            reddit: base.clone(),
            google_news: base,
        }
    }
}

#[derive(Clone)]
pub struct ProviderConfig {
    pub news_api_key: Option<String>,
    pub finnhub_api_key: Option<String>,
    pub request_timeout: Duration,
    pub user_agent: String,
    pub endpoints: Endpoints,
}

impl ProviderConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            news_api_key: config.news_api_key.clone(),
            finnhub_api_key: config.finnhub_api_key.clone(),
            request_timeout: Duration::from_secs(config.provider_request_timeout_secs),
            user_agent: config.provider_user_agent.clone(),
            endpoints: Endpoints::default(),
        }
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field(
                "news_api_key",
                &self.news_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "finnhub_api_key",
                &self.finnhub_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("request_timeout", &self.request_timeout)
            .field("user_agent", &self.user_agent)
            .field("endpoints", &self.endpoints)
            .finish()
    }
}
