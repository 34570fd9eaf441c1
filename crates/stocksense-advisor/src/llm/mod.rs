//! Generation vendors behind one trait.

mod anthropic;
mod openai;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

pub use anthropic::AnthropicClient;
pub use openai::OpenAiClient;

use crate::error::GenerationError;
use crate::models::ModelSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Anthropic,
    OpenAi,
}

impl Provider {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Anthropic => "anthropic",
            Provider::OpenAi => "openai",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A system instruction plus one user turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    fn provider(&self) -> Provider;

    /// Run one completion and return its text.
    async fn complete(&self, model: &ModelSpec, prompt: &Prompt) -> Result<String, GenerationError>;
}

impl fmt::Display for dyn ChatModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.provider().fmt(f)
    }
}

fn build_http(provider: Provider, timeout: Duration) -> Result<Client, GenerationError> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .build()
        .map_err(|source| GenerationError::Http { provider, source })
}

/// Read a response body, mapping non-2xx statuses to [`GenerationError::Status`].
async fn read_body(
    provider: Provider,
    response: reqwest::Response,
) -> Result<String, GenerationError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| GenerationError::Http { provider, source })?;
    if !status.is_success() {
        return Err(GenerationError::Status {
            provider,
            status: status.as_u16(),
            body: body.chars().take(200).collect(),
        });
    }
    Ok(body)
}
