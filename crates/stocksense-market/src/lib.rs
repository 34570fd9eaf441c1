//! Market data aggregation for `StockSense`.
//!
//! Wraps the unreliable upstream providers (quotes, news, social sentiment)
//! behind adapters that never panic, merges their output, and provides the
//! two concurrency combinators used by the analysis pipeline: a bounded
//! fan-out with per-operation timeouts and an ordered fallback chain.

pub mod chain;
pub mod error;
pub mod fanout;
pub mod merge;
pub mod service;
pub mod sources;
pub mod synthetic;
pub mod types;

mod http;
mod text;

pub use chain::{try_chain, ChainExhausted};
pub use error::{AdapterError, AdapterErrorKind};
pub use fanout::{FanOut, Operation, Outcome, Settled};
pub use http::build_client;
pub use merge::{merge_news, NewsMerger};
pub use service::{MarketData, MarketFeed};
pub use synthetic::{synthetic_sentiment, synthetic_snapshot};
pub use types::{Endpoints, ProviderConfig};
