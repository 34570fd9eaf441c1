//! Model fallback order per vendor and task. Cheaper, faster models go first.

use std::fmt;

use crate::llm::Provider;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelSpec {
    pub name: &'static str,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
}

impl ModelSpec {
    const fn new(name: &'static str, max_tokens: u32, temperature: Option<f32>) -> Self {
        Self {
            name,
            max_tokens,
            temperature,
        }
    }
}

impl fmt::Display for ModelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// What the generated text is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Analysis,
    Chat,
}

impl Task {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Task::Analysis => "analysis",
            Task::Chat => "chat",
        }
    }
}

const CHAT_MAX_TOKENS: u32 = 1000;

const ANTHROPIC_ANALYSIS: &[ModelSpec] = &[
    ModelSpec::new("claude-3-haiku-20240307", 1200, None),
    ModelSpec::new("claude-3-5-sonnet-20241022", 1500, None),
];

const OPENAI_ANALYSIS: &[ModelSpec] = &[
    ModelSpec::new("gpt-4o-mini", 1200, Some(0.7)),
    ModelSpec::new("gpt-4o", 1200, Some(0.7)),
    ModelSpec::new("gpt-4", 1200, Some(0.7)),
];

const ANTHROPIC_CHAT: &[ModelSpec] = &[
    ModelSpec::new("claude-3-haiku-20240307", CHAT_MAX_TOKENS, None),
    ModelSpec::new("claude-3-5-sonnet-20241022", CHAT_MAX_TOKENS, None),
    ModelSpec::new("claude-3-5-haiku-20241022", CHAT_MAX_TOKENS, None),
];

const OPENAI_CHAT: &[ModelSpec] = &[
    ModelSpec::new("gpt-4o", CHAT_MAX_TOKENS, None),
    ModelSpec::new("gpt-4o-mini", CHAT_MAX_TOKENS, None),
    ModelSpec::new("gpt-4-turbo", CHAT_MAX_TOKENS, None),
    ModelSpec::new("gpt-3.5-turbo", CHAT_MAX_TOKENS, None),
];

#[must_use]
pub fn models_for(provider: Provider, task: Task) -> &'static [ModelSpec] {
    match (provider, task) {
        (Provider::Anthropic, Task::Analysis) => ANTHROPIC_ANALYSIS,
        (Provider::Anthropic, Task::Chat) => ANTHROPIC_CHAT,
        (Provider::OpenAi, Task::Analysis) => OPENAI_ANALYSIS,
        (Provider::OpenAi, Task::Chat) => OPENAI_CHAT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_tries_haiku_before_sonnet() {
        let names: Vec<_> = models_for(Provider::Anthropic, Task::Analysis)
            .iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(
            names,
            vec!["claude-3-haiku-20240307", "claude-3-5-sonnet-20241022"]
        );
        assert_eq!(models_for(Provider::Anthropic, Task::Analysis)[1].max_tokens, 1500);
    }

    #[test]
    fn chat_models_share_one_token_budget() {
        for provider in [Provider::Anthropic, Provider::OpenAi] {
            assert!(models_for(provider, Task::Chat)
                .iter()
                .all(|m| m.max_tokens == CHAT_MAX_TOKENS));
        }
        assert_eq!(models_for(Provider::OpenAi, Task::Chat).len(), 4);
    }
}
