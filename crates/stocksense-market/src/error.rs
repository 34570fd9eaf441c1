use thiserror::Error;

/// Failure of a single upstream call, already classified.
///
/// Adapters never surface raw `reqwest` or `serde` errors; everything is
/// folded into one of these four kinds so callers can log and move on.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("{provider} timed out")]
    Timeout { provider: &'static str },

    #[error("{provider} transport error: {detail}")]
    Transport {
        provider: &'static str,
        detail: String,
    },

    #[error("{provider} returned an unreadable payload: {detail}")]
    Parse {
        provider: &'static str,
        detail: String,
    },

    #[error("{provider} returned no usable records")]
    EmptyResult { provider: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterErrorKind {
    Timeout,
    Transport,
    Parse,
    EmptyResult,
}

impl AdapterError {
    #[must_use]
    pub fn kind(&self) -> AdapterErrorKind {
        match self {
            AdapterError::Timeout { .. } => AdapterErrorKind::Timeout,
            AdapterError::Transport { .. } => AdapterErrorKind::Transport,
            AdapterError::Parse { .. } => AdapterErrorKind::Parse,
            AdapterError::EmptyResult { .. } => AdapterErrorKind::EmptyResult,
        }
    }

    #[must_use]
    pub fn provider(&self) -> &'static str {
        match self {
            AdapterError::Timeout { provider }
            | AdapterError::Transport { provider, .. }
            | AdapterError::Parse { provider, .. }
            | AdapterError::EmptyResult { provider } => provider,
        }
    }

    pub(crate) fn from_http(provider: &'static str, error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            AdapterError::Timeout { provider }
        } else if error.is_decode() {
            AdapterError::Parse {
                provider,
                detail: error.to_string(),
            }
        } else {
            AdapterError::Transport {
                provider,
                detail: error.to_string(),
            }
        }
    }

    pub(crate) fn parse(provider: &'static str, detail: impl Into<String>) -> Self {
        AdapterError::Parse {
            provider,
            detail: detail.into(),
        }
    }
}
