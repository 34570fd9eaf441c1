//! Anthropic Messages API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{build_http, read_body, ChatModel, Prompt, Provider};
use crate::error::GenerationError;
use crate::models::ModelSpec;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

pub struct AnthropicClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl AnthropicClient {
    /// # Errors
    ///
    /// Returns [`GenerationError::Http`] if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, GenerationError> {
        Self::with_base_url(api_key, timeout, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`GenerationError::Http`] if the HTTP client cannot be built.
    pub fn with_base_url(
        api_key: impl Into<String>,
        timeout: Duration,
        base_url: &str,
    ) -> Result<Self, GenerationError> {
        Ok(Self {
            http: build_http(Provider::Anthropic, timeout)?,
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn headers(&self) -> Result<HeaderMap, GenerationError> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&self.api_key).map_err(|e| GenerationError::Decode {
            provider: Provider::Anthropic,
            detail: format!("api key is not a valid header value: {e}"),
        })?;
        headers.insert("x-api-key", key);
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );
        Ok(headers)
    }
}

#[async_trait]
impl ChatModel for AnthropicClient {
    fn provider(&self) -> Provider {
        Provider::Anthropic
    }

    async fn complete(&self, model: &ModelSpec, prompt: &Prompt) -> Result<String, GenerationError> {
        let request = CreateMessageRequest {
            model: model.name,
            max_tokens: model.max_tokens,
            system: Some(prompt.system.as_str()).filter(|s| !s.is_empty()),
            temperature: model.temperature,
            messages: vec![Message {
                role: "user",
                content: &prompt.user,
            }],
        };

        let response = self
            .http
            .post(format!("{}/v1/messages", self.base_url))
            .headers(self.headers()?)
            .json(&request)
            .send()
            .await
            .map_err(|source| GenerationError::Http {
                provider: Provider::Anthropic,
                source,
            })?;

        let body = read_body(Provider::Anthropic, response).await?;
        let parsed: CreateMessageResponse =
            serde_json::from_str(&body).map_err(|e| GenerationError::Decode {
                provider: Provider::Anthropic,
                detail: e.to_string(),
            })?;

        let text = parsed
            .content
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Unknown => None,
            })
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse {
                provider: Provider::Anthropic,
            });
        }
        Ok(text)
    }
}

#[derive(Debug, Serialize)]
struct CreateMessageRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateMessageResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Unknown,
}
