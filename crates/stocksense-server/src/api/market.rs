use std::collections::BTreeMap;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use stocksense_core::{NewsArticle, PriceQuote, Symbol};

use super::{json_body, parse_symbol, ApiError, AppState};

const MARKET_NEWS_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
pub(super) struct PricesRequest {
    #[serde(default)]
    pub symbols: Option<serde_json::Value>,
}

/// One entry of the batch price response: a quote, or the reason there is none.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(super) enum PriceEntry {
    Quote(PriceQuote),
    Failed { error: String },
}

pub(super) async fn market_news(State(state): State<AppState>) -> Json<Vec<NewsArticle>> {
    match state.advisor.feed().market_news(MARKET_NEWS_LIMIT).await {
        Ok(news) => Json(news),
        Err(e) => {
            tracing::warn!(error = %e, "market news unavailable");
            Json(Vec::new())
        }
    }
}

/// Quote lookup bounded by the fetch timeout.
async fn lookup_price(state: &AppState, symbol: &Symbol) -> Result<PriceQuote, String> {
    let timeout = state.advisor.settings().fetch_timeout;
    match tokio::time::timeout(timeout, state.advisor.feed().price_quote(symbol)).await {
        Ok(Ok(quote)) => Ok(quote),
        Ok(Err(e)) => {
            tracing::warn!(symbol = %symbol, kind = ?e.kind(), error = %e, "price lookup failed");
            Err(e.to_string())
        }
        Err(_) => {
            let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
            tracing::warn!(symbol = %symbol, timeout_ms, "price lookup timed out");
            Err("request timed out".to_string())
        }
    }
}

/// Single quote. An unknown symbol yields a zeroed quote named after the symbol.
pub(super) async fn price(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<PriceQuote>, ApiError> {
    let symbol = parse_symbol(Some(&raw))?;

    let quote = lookup_price(&state, &symbol)
        .await
        .unwrap_or_else(|_| PriceQuote {
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            current_price: 0.0,
            change_percent: 0.0,
        });
    Ok(Json(quote))
}

/// Batch quotes keyed by upper-cased symbol, fetched with bounded concurrency.
pub(super) async fn prices(
    State(state): State<AppState>,
    payload: Result<Json<PricesRequest>, JsonRejection>,
) -> Result<Json<BTreeMap<String, PriceEntry>>, ApiError> {
    let body = json_body(payload)?;
    let requested = match body.symbols {
        Some(serde_json::Value::Array(items)) if !items.is_empty() => items,
        _ => return Err(ApiError::validation("List of symbols is required")),
    };

    let concurrency = state.advisor.settings().max_concurrent.max(1);
    let state = &state;
    let results: BTreeMap<String, PriceEntry> = stream::iter(requested)
        .map(|item| async move {
            let Some(raw) = item.as_str() else {
                return (
                    item.to_string(),
                    PriceEntry::Failed {
                        error: "symbol must be a string".to_string(),
                    },
                );
            };
            let key = raw.trim().to_ascii_uppercase();
            let entry = match Symbol::parse(raw) {
                Ok(symbol) => match lookup_price(state, &symbol).await {
                    Ok(quote) => PriceEntry::Quote(quote),
                    Err(error) => PriceEntry::Failed { error },
                },
                Err(e) => PriceEntry::Failed {
                    error: e.to_string(),
                },
            };
            (key, entry)
        })
        .buffer_unordered(concurrency)
        .collect()
        .await;

    Ok(Json(results))
}
