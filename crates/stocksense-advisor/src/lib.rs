//! Narrative generation and the analysis composer for `StockSense`.
//!
//! Generated text comes from an ordered chain of vendors and models. When
//! the chain is exhausted (or no credentials are configured) a deterministic
//! narrative is built from the raw metrics, so analysis and chat always
//! produce an answer.

pub mod chat;
pub mod composer;
pub mod error;
pub mod generator;
pub mod llm;
pub mod models;
pub mod narrative;
pub mod prompt;
pub mod risk;

pub use composer::{Advisor, AdvisorSettings};
pub use error::GenerationError;
pub use generator::{Generated, Generator};
pub use llm::{AnthropicClient, ChatModel, OpenAiClient, Prompt, Provider};
pub use models::{ModelSpec, Task};
pub use risk::{assess, classify, risk_from_text, Factor, FactorReport};
