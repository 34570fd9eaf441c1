use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::AdapterError;
use crate::types::ProviderConfig;

/// Build the HTTP client shared by every market adapter.
///
/// # Errors
///
/// Returns [`AdapterError::Transport`] if the TLS backend cannot be initialised.
pub fn build_client(config: &ProviderConfig) -> Result<Client, AdapterError> {
    Client::builder()
        .timeout(config.request_timeout)
        .connect_timeout(Duration::from_secs(10))
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| AdapterError::Transport {
            provider: "http_client",
            detail: e.to_string(),
        })
}

/// GET a URL and return the body of a 2xx response as text.
pub(crate) async fn get_text(
    client: &Client,
    provider: &'static str,
    url: &str,
    query: &[(&str, String)],
) -> Result<String, AdapterError> {
    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| AdapterError::from_http(provider, &e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AdapterError::Transport {
            provider,
            detail: format!("request failed with status {status}"),
        });
    }

    response
        .text()
        .await
        .map_err(|e| AdapterError::from_http(provider, &e))
}

/// GET a URL and deserialize the JSON body of a 2xx response.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    provider: &'static str,
    url: &str,
    query: &[(&str, String)],
) -> Result<T, AdapterError> {
    let body = get_text(client, provider, url, query).await?;
    serde_json::from_str(&body).map_err(|e| AdapterError::parse(provider, e.to_string()))
}
