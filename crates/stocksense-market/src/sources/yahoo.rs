//! Yahoo Finance adapter: quote summary, analyst trend, and ticker news.
//!
//! Payloads are navigated as `serde_json::Value` because numeric fields come
//! either bare or wrapped as `{ "raw": n, "fmt": "..." }`, and news items
//! arrive in two different layouts (flat, or nested under `content`).

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client;
use serde_json::Value;
use stocksense_core::{AnalystRatings, CompanyOverview, NewsArticle, Symbol};

use super::keywords::{mentions_any, MACRO_KEYWORDS, MARKET_KEYWORDS};
use super::{NewsAdapter, NewsRequest, NO_SUMMARY};
use crate::error::AdapterError;
use crate::http::get_json;
use crate::text::{first_non_empty, round_to, strip_html, truncate_chars, unix_from_rfc3339};

const PROVIDER: &str = "yahoo";
const QUOTE_MODULES: &str =
    "price,summaryProfile,summaryDetail,financialData,defaultKeyStatistics,recommendationTrend";
const MARKET_TICKERS: [&str; 4] = ["SPY", "QQQ", "DIA", "^GSPC"];
const COMPANY_SUMMARY_CHARS: usize = 500;
const MARKET_SUMMARY_CHARS: usize = 200;

pub struct YahooFinance {
    client: Client,
    base_url: String,
}

impl YahooFinance {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn quote_summary(&self, symbol: &Symbol) -> Result<Value, AdapterError> {
        let encoded = utf8_percent_encode(symbol.as_str(), NON_ALPHANUMERIC);
        let url = format!("{}/v10/finance/quoteSummary/{encoded}", self.base_url);
        let body: Value = get_json(
            &self.client,
            PROVIDER,
            &url,
            &[("modules", QUOTE_MODULES.to_string())],
        )
        .await?;

        body.get("quoteSummary")
            .and_then(|v| v.get("result"))
            .and_then(Value::as_array)
            .and_then(|results| results.first())
            .cloned()
            .ok_or(AdapterError::EmptyResult { provider: PROVIDER })
    }

    /// Company profile, quote, and fundamentals.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the quote summary cannot be fetched or is empty.
    pub async fn company_overview(&self, symbol: &Symbol) -> Result<CompanyOverview, AdapterError> {
        let result = self.quote_summary(symbol).await?;
        Ok(parse_overview(symbol, &result))
    }

    /// Analyst recommendation counts and price targets.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the quote summary cannot be fetched or is empty.
    pub async fn analyst_ratings(&self, symbol: &Symbol) -> Result<AnalystRatings, AdapterError> {
        let result = self.quote_summary(symbol).await?;
        Ok(parse_analyst(&result))
    }

    async fn search_news(&self, ticker: &str, count: usize) -> Result<Vec<Value>, AdapterError> {
        let url = format!("{}/v1/finance/search", self.base_url);
        let query = [
            ("q", ticker.to_string()),
            ("newsCount", count.to_string()),
            ("quotesCount", "0".to_string()),
        ];
        let body: Value = get_json(&self.client, PROVIDER, &url, &query).await?;
        Ok(body
            .get("news")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl NewsAdapter for YahooFinance {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch(&self, request: &NewsRequest) -> Result<Vec<NewsArticle>, AdapterError> {
        let articles: Vec<NewsArticle> = match request {
            NewsRequest::Company { symbol, limit, .. } => self
                .search_news(symbol.as_str(), limit * 2)
                .await?
                .iter()
                .filter_map(|item| normalize_news_item(item, COMPANY_SUMMARY_CHARS))
                .take(limit * 2)
                .collect(),
            NewsRequest::Market { since, limit } => {
                let mut items = Vec::new();
                let mut first_error = None;
                for ticker in MARKET_TICKERS {
                    match self.search_news(ticker, limit * 2).await {
                        Ok(found) => items.extend(found),
                        Err(e) => {
                            first_error.get_or_insert(e);
                        }
                    }
                }
                if items.is_empty() {
                    if let Some(e) = first_error {
                        return Err(e);
                    }
                }

                let cutoff = since.timestamp();
                items
                    .iter()
                    .filter_map(|item| normalize_news_item(item, MARKET_SUMMARY_CHARS))
                    .filter(|article| article.date >= cutoff)
                    .filter(|article| {
                        is_market_moving(&article.headline) || is_market_moving(&article.summary)
                    })
                    .take(*limit)
                    .collect()
            }
        };

        if articles.is_empty() {
            return Err(AdapterError::EmptyResult { provider: PROVIDER });
        }
        Ok(articles)
    }
}

fn is_market_moving(text: &str) -> bool {
    mentions_any(text, MARKET_KEYWORDS) || mentions_any(text, MACRO_KEYWORDS)
}

// ---------------------------------------------------------------------------
// Value helpers
// ---------------------------------------------------------------------------

/// A number that may be bare or wrapped as `{ "raw": n }`.
fn number(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.get("raw").and_then(Value::as_f64))
}

fn count(value: &Value) -> u32 {
    value
        .as_u64()
        .or_else(|| value.get("raw").and_then(Value::as_u64))
        .map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX))
}

fn num(result: &Value, module: &str, key: &str) -> Option<f64> {
    result.get(module)?.get(key).and_then(number)
}

fn num_any(result: &Value, modules: &[&str], key: &str) -> Option<f64> {
    modules.iter().find_map(|module| num(result, module, key))
}

fn text(result: &Value, module: &str, key: &str) -> Option<String> {
    first_non_empty([result.get(module).and_then(|m| m.get(key)).and_then(Value::as_str)])
        .map(ToString::to_string)
}

/// Upstream reports many unknown ratios as zero; treat zero as unknown.
fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && v.abs() > f64::EPSILON)
}

fn ratio(value: Option<f64>) -> Option<f64> {
    nonzero(value).map(|v| round_to(v, 2))
}

fn percent(value: Option<f64>) -> Option<f64> {
    nonzero(value).map(|v| round_to(v * 100.0, 2))
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0).map(|v| round_to(v, 2))
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

const STATS: &[&str] = &["defaultKeyStatistics", "financialData", "summaryDetail"];

pub(crate) fn parse_overview(symbol: &Symbol, result: &Value) -> CompanyOverview {
    let mut overview = CompanyOverview::empty(symbol);

    if let Some(name) = text(result, "price", "longName").or_else(|| text(result, "price", "shortName")) {
        overview.name = name;
    }
    if let Some(sector) = text(result, "summaryProfile", "sector") {
        overview.sector = sector;
    }
    if let Some(industry) = text(result, "summaryProfile", "industry") {
        overview.industry = industry;
    }
    overview.description = text(result, "summaryProfile", "longBusinessSummary").unwrap_or_default();
    overview.website = text(result, "summaryProfile", "website").unwrap_or_default();

    let current = num(result, "price", "regularMarketPrice")
        .or_else(|| num(result, "financialData", "currentPrice"));
    let previous = num(result, "summaryDetail", "previousClose")
        .or_else(|| num(result, "price", "regularMarketPreviousClose"))
        .or(current);
    let current = current.or(previous).unwrap_or(0.0);
    let previous = previous.unwrap_or(current);
    overview.current_price = round_to(current, 2);
    overview.previous_close = round_to(previous, 2);
    overview.change_percent = if previous.abs() > f64::EPSILON {
        round_to((current - previous) / previous * 100.0, 2)
    } else {
        0.0
    };

    overview.market_cap = nonzero(num_any(result, &["price", "summaryDetail"], "marketCap"));
    overview.pe_ratio = ratio(
        nonzero(num_any(result, &["summaryDetail", "defaultKeyStatistics"], "trailingPE"))
            .or_else(|| num_any(result, &["summaryDetail", "defaultKeyStatistics"], "forwardPE")),
    );
    overview.pb_ratio = ratio(num_any(result, STATS, "priceToBook"));
    overview.current_ratio = ratio(num(result, "financialData", "currentRatio"));
    overview.quick_ratio = ratio(num(result, "financialData", "quickRatio"));

    overview.total_debt = nonzero(num(result, "financialData", "totalDebt"));
    overview.current_assets = nonzero(num_any(result, STATS, "totalCurrentAssets"));
    overview.total_assets = nonzero(num_any(result, STATS, "totalAssets"));
    if let Some(debt) = overview.total_debt {
        overview.debt_to_assets_ratio = overview
            .total_assets
            .filter(|assets| *assets > 0.0)
            .map(|assets| round_to(debt / assets * 100.0, 2));
        overview.debt_to_current_assets_ratio = overview
            .current_assets
            .filter(|assets| *assets > 0.0)
            .map(|assets| round_to(debt / assets * 100.0, 2));
    }

    overview.trailing_eps = ratio(num_any(result, STATS, "trailingEps"));
    overview.forward_eps = ratio(num_any(result, STATS, "forwardEps"));
    overview.earnings_growth = percent(num_any(result, STATS, "earningsQuarterlyGrowth"));

    overview.dividend_rate = ratio(num(result, "summaryDetail", "dividendRate"));
    overview.dividend_yield = percent(num(result, "summaryDetail", "dividendYield"));
    overview.payout_ratio = percent(num(result, "summaryDetail", "payoutRatio"));
    if result.get("summaryDetail").is_some_and(Value::is_object) {
        overview.has_dividend = Some(overview.dividend_rate.is_some_and(|rate| rate > 0.0));
    }

    overview.profit_margins = percent(num_any(result, STATS, "profitMargins"));
    overview.operating_margins = percent(num(result, "financialData", "operatingMargins"));
    overview.return_on_equity = percent(num(result, "financialData", "returnOnEquity"));
    overview.return_on_assets = percent(num(result, "financialData", "returnOnAssets"));

    overview.credit_rating = first_non_empty([
        result.pointer("/bondRatings/moody/rating").and_then(Value::as_str),
        result.pointer("/bondRatings/sp/rating").and_then(Value::as_str),
    ])
    .map(ToString::to_string);

    overview
}

pub(crate) fn parse_analyst(result: &Value) -> AnalystRatings {
    let mut ratings = AnalystRatings::default();

    if let Some(trend) = result
        .pointer("/recommendationTrend/trend")
        .and_then(Value::as_array)
    {
        for row in trend {
            let field = |key: &str| row.get(key).map_or(0, count);
            ratings.buy_count += field("strongBuy") + field("buy");
            ratings.hold_count += field("hold");
            ratings.sell_count += field("sell") + field("strongSell");
        }
    }

    if let Some(key) = text(result, "financialData", "recommendationKey") {
        ratings.recommendation_key = key;
    }
    let key = ratings.recommendation_key.to_lowercase();
    if ratings.buy_count == 0 && key == "buy" {
        ratings.buy_count = 5;
    }
    if ratings.hold_count == 0 && key == "hold" {
        ratings.hold_count = 3;
    }
    if ratings.sell_count == 0 && key == "sell" {
        ratings.sell_count = 1;
    }

    ratings.average_price_target = positive(
        num(result, "financialData", "targetMeanPrice")
            .or_else(|| num(result, "financialData", "targetMedianPrice")),
    );
    ratings.high_price_target = positive(num(result, "financialData", "targetHighPrice"));
    ratings.low_price_target = positive(num(result, "financialData", "targetLowPrice"));

    ratings
}

/// Normalize one search-news item in either the flat or nested layout.
pub(crate) fn normalize_news_item(item: &Value, summary_chars: usize) -> Option<NewsArticle> {
    let content = item.get("content").filter(|c| c.is_object());
    let in_content = |pointer: &str| {
        content
            .and_then(|c| c.pointer(pointer))
            .and_then(Value::as_str)
    };
    let in_item = |pointer: &str| item.pointer(pointer).and_then(Value::as_str);

    let headline = first_non_empty([in_content("/title"), in_item("/title")])?.to_string();

    let summary = first_non_empty([
        in_content("/summary"),
        in_content("/description"),
        in_item("/summary"),
    ])
    .map(|raw| truncate_chars(&strip_html(raw), summary_chars))
    .filter(|s| !s.is_empty())
    .unwrap_or_else(|| NO_SUMMARY.to_string());

    let source = first_non_empty([
        in_content("/provider/displayName"),
        in_item("/provider/displayName"),
        in_item("/publisher"),
        in_item("/source"),
    ])
    .unwrap_or("Yahoo Finance")
    .to_string();

    let url = first_non_empty([
        in_content("/canonicalUrl/url"),
        in_content("/clickThroughUrl/url"),
        in_item("/canonicalUrl/url"),
        in_item("/clickThroughUrl/url"),
        in_item("/link"),
        in_item("/url"),
        in_content("/previewUrl"),
    ])
    .unwrap_or_default()
    .to_string();

    let thumbnail = content
        .and_then(|c| c.get("thumbnail"))
        .or_else(|| item.get("thumbnail"));
    let image = thumbnail.and_then(|thumb| {
        first_non_empty([
            thumb
                .get("resolutions")
                .and_then(Value::as_array)
                .and_then(|r| r.last())
                .and_then(|r| r.get("url"))
                .and_then(Value::as_str),
            thumb.get("originalUrl").and_then(Value::as_str),
        ])
        .map(ToString::to_string)
    });

    let date = match first_non_empty([in_content("/pubDate"), in_item("/pubDate")]) {
        Some(raw) => unix_from_rfc3339(raw),
        None => item
            .get("providerPublishTime")
            .and_then(Value::as_i64)
            .unwrap_or(0),
    };

    Some(NewsArticle {
        headline,
        summary,
        source,
        url,
        image,
        date,
    })
}

#[cfg(test)]
#[path = "yahoo_test.rs"]
mod tests;
