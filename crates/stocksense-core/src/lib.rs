pub mod analysis;
pub mod app_config;
pub mod company;
pub mod config;
pub mod news;
pub mod sentiment;
pub mod symbol;

use thiserror::Error;

pub use analysis::{Recommendation, RiskLevel, StockAnalysis};
pub use app_config::{AppConfig, Environment};
pub use company::{AnalystRatings, CompanyOverview, PriceQuote};
pub use config::{load_app_config, load_app_config_from_env};
pub use news::NewsArticle;
pub use sentiment::{SentimentOrigin, SentimentSnapshot, SocialSentiment};
pub use symbol::Symbol;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("stock symbol is empty")]
    EmptySymbol,

    #[error("invalid stock symbol: {0}")]
    InvalidSymbol(String),
}
