//! Vendor-then-model fallback over the configured generation clients.

use std::sync::Arc;
use std::time::Duration;

use stocksense_core::AppConfig;
use stocksense_market::{try_chain, ChainExhausted};

use crate::error::GenerationError;
use crate::llm::{AnthropicClient, ChatModel, OpenAiClient, Prompt, Provider};
use crate::models::{models_for, Task};

/// Text produced by the first model that answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub text: String,
    pub provider: Provider,
    pub model: &'static str,
}

impl Generated {
    /// `"<provider>/<model>"`, recorded on the recommendation.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}/{}", self.provider, self.model)
    }
}

/// Ordered generation clients. Constructed once at startup and shared.
#[derive(Clone, Default)]
pub struct Generator {
    clients: Vec<Arc<dyn ChatModel>>,
}

impl Generator {
    #[must_use]
    pub fn new(clients: Vec<Arc<dyn ChatModel>>) -> Self {
        Self { clients }
    }

    /// Anthropic first, then OpenAI, each only when its key is configured.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Http`] if an HTTP client cannot be built.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, GenerationError> {
        let timeout = Duration::from_secs(config.generation_timeout_secs);
        let mut clients: Vec<Arc<dyn ChatModel>> = Vec::new();
        if let Some(key) = &config.anthropic_api_key {
            clients.push(Arc::new(AnthropicClient::new(key.clone(), timeout)?));
        }
        if let Some(key) = &config.openai_api_key {
            clients.push(Arc::new(OpenAiClient::new(key.clone(), timeout)?));
        }
        Ok(Self::new(clients))
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.clients.is_empty()
    }

    #[must_use]
    pub fn providers(&self) -> Vec<Provider> {
        self.clients.iter().map(|c| c.provider()).collect()
    }

    /// Try every vendor in order and, within a vendor, every model for `task`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainExhausted`] when no model produced text.
    pub async fn generate(&self, task: Task, prompt: &Prompt) -> Result<Generated, ChainExhausted> {
        try_chain(
            "generation",
            self.clients.iter(),
            move |client| async move {
                try_chain(
                    "models",
                    models_for(client.provider(), task),
                    move |spec| async move {
                        let text = client.complete(spec, prompt).await?;
                        Ok::<_, GenerationError>(Generated {
                            text,
                            provider: client.provider(),
                            model: spec.name,
                        })
                    },
                )
                .await
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::models::ModelSpec;

    struct Scripted {
        provider: Provider,
        succeed_on: Option<&'static str>,
        calls: AtomicU32,
    }

    #[async_trait]
    impl ChatModel for Scripted {
        fn provider(&self) -> Provider {
            self.provider
        }

        async fn complete(
            &self,
            model: &ModelSpec,
            _prompt: &Prompt,
        ) -> Result<String, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.succeed_on == Some(model.name) {
                Ok(format!("from {}", model.name))
            } else {
                Err(GenerationError::EmptyResponse {
                    provider: self.provider,
                })
            }
        }
    }

    fn prompt() -> Prompt {
        Prompt {
            system: "sys".into(),
            user: "user".into(),
        }
    }

    #[tokio::test]
    async fn falls_through_models_then_vendors() {
        let anthropic = Arc::new(Scripted {
            provider: Provider::Anthropic,
            succeed_on: None,
            calls: AtomicU32::new(0),
        });
        let openai = Arc::new(Scripted {
            provider: Provider::OpenAi,
            succeed_on: Some("gpt-4o"),
            calls: AtomicU32::new(0),
        });
        let generator = Generator::new(vec![anthropic.clone() as Arc<dyn ChatModel>, openai.clone()]);

        let generated = generator
            .generate(Task::Analysis, &prompt())
            .await
            .unwrap();

        assert_eq!(generated.text, "from gpt-4o");
        assert_eq!(generated.label(), "openai/gpt-4o");
        assert_eq!(anthropic.calls.load(Ordering::SeqCst), 2);
        // gpt-4o-mini failed, gpt-4o answered, gpt-4 never tried
        assert_eq!(openai.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn unconfigured_generator_is_exhausted() {
        let generator = Generator::default();
        assert!(!generator.is_configured());
        let err = generator.generate(Task::Chat, &prompt()).await.unwrap_err();
        assert_eq!(err.attempts, 0);
    }
}
