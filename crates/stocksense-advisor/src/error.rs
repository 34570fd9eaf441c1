use thiserror::Error;

use crate::llm::Provider;

/// Failure of a single generation call against one model.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("{provider} request failed: {source}")]
    Http {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} returned status {status}: {body}")]
    Status {
        provider: Provider,
        status: u16,
        body: String,
    },

    #[error("{provider} response could not be decoded: {detail}")]
    Decode { provider: Provider, detail: String },

    #[error("{provider} returned no text")]
    EmptyResponse { provider: Provider },
}

impl GenerationError {
    #[must_use]
    pub fn provider(&self) -> Provider {
        match self {
            GenerationError::Http { provider, .. }
            | GenerationError::Status { provider, .. }
            | GenerationError::Decode { provider, .. }
            | GenerationError::EmptyResponse { provider } => *provider,
        }
    }
}
