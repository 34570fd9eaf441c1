//! StockTwits symbol stream adapter.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client;
use serde::Deserialize;
use stocksense_core::{SentimentSnapshot, Symbol};

use super::keywords::{Tally, SOCIAL_NEGATIVE, SOCIAL_POSITIVE};
use super::{SentimentAdapter, SentimentChannel};
use crate::error::AdapterError;
use crate::http::get_json;

const PROVIDER: &str = "stocktwits";
const MAX_MESSAGES: usize = 50;

#[derive(Debug, Deserialize)]
struct Stream {
    #[serde(default)]
    messages: Vec<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    #[serde(default)]
    body: String,
}

pub struct StockTwitsSource {
    client: Client,
    base_url: String,
}

impl StockTwitsSource {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl SentimentAdapter for StockTwitsSource {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn channel(&self) -> SentimentChannel {
        SentimentChannel::StockTwits
    }

    async fn fetch(&self, symbol: &Symbol) -> Result<SentimentSnapshot, AdapterError> {
        let encoded = utf8_percent_encode(symbol.as_str(), NON_ALPHANUMERIC);
        let url = format!("{}/api/2/streams/symbol/{encoded}.json", self.base_url);
        let stream: Stream = get_json(&self.client, PROVIDER, &url, &[]).await?;

        let tally = Tally::of(
            stream
                .messages
                .iter()
                .take(MAX_MESSAGES)
                .map(|m| m.body.as_str()),
            SOCIAL_POSITIVE,
            SOCIAL_NEGATIVE,
        );
        let sample = format!(
            "StockTwits shows {} bullish, {} bearish, and {} neutral mentions about {symbol}.",
            tally.positive, tally.negative, tally.neutral
        );

        SentimentSnapshot::from_counts(
            tally.positive,
            tally.neutral,
            tally.negative,
            stream.messages.len() as u64,
            sample,
        )
        .ok_or(AdapterError::EmptyResult { provider: PROVIDER })
    }
}
