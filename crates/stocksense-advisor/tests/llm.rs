//! Generation client tests using wiremock HTTP mocks.

use std::time::Duration;

use stocksense_advisor::models::models_for;
use stocksense_advisor::{
    AnthropicClient, ChatModel, GenerationError, OpenAiClient, Prompt, Provider, Task,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn prompt() -> Prompt {
    Prompt {
        system: "Be educational.".to_string(),
        user: "Explain EPS.".to_string(),
    }
}

#[tokio::test]
async fn anthropic_joins_text_blocks_and_skips_unknown_ones() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(serde_json::json!({
            "system": "Be educational.",
            "max_tokens": 1000,
            "messages": [{ "role": "user", "content": "Explain EPS." }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": [
                { "type": "thinking", "thinking": "..." },
                { "type": "text", "text": "EPS is " },
                { "type": "text", "text": "profit per share." }
            ]
        })))
        .mount(&server)
        .await;

    let client = AnthropicClient::with_base_url("key", Duration::from_secs(5), &server.uri())
        .expect("client construction should not fail");
    let model = &models_for(Provider::Anthropic, Task::Chat)[0];

    let text = client.complete(model, &prompt()).await.expect("should answer");
    assert_eq!(text, "EPS is profit per share.");
}

#[tokio::test]
async fn anthropic_error_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid x-api-key"))
        .mount(&server)
        .await;

    let client = AnthropicClient::with_base_url("bad", Duration::from_secs(5), &server.uri())
        .expect("client construction should not fail");
    let model = &models_for(Provider::Anthropic, Task::Analysis)[0];

    let err = client.complete(model, &prompt()).await.expect_err("401 should fail");
    match err {
        GenerationError::Status { status, body, .. } => {
            assert_eq!(status, 401);
            assert_eq!(body, "invalid x-api-key");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn openai_sends_temperature_for_analysis_models() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-4o-mini",
            "max_tokens": 1200,
            "temperature": 0.7,
            "messages": [
                { "role": "system", "content": "Be educational." },
                { "role": "user", "content": "Explain EPS." }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{ "message": { "content": "EPS explained." } }]
        })))
        .mount(&server)
        .await;

    let client = OpenAiClient::with_base_url("sk", Duration::from_secs(5), &server.uri())
        .expect("client construction should not fail");
    let model = &models_for(Provider::OpenAi, Task::Analysis)[0];

    let text = client.complete(model, &prompt()).await.expect("should answer");
    assert_eq!(text, "EPS explained.");
}

#[tokio::test]
async fn openai_without_choices_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })))
        .mount(&server)
        .await;

    let client = OpenAiClient::with_base_url("sk", Duration::from_secs(5), &server.uri())
        .expect("client construction should not fail");
    let model = &models_for(Provider::OpenAi, Task::Chat)[0];

    let err = client.complete(model, &prompt()).await.expect_err("no choices should fail");
    assert!(matches!(
        err,
        GenerationError::EmptyResponse {
            provider: Provider::OpenAi
        }
    ));
}
