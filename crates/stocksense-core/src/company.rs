use serde::{Deserialize, Serialize};

use crate::Symbol;

const NOT_AVAILABLE: &str = "N/A";

/// Company profile, quote, and fundamentals for one symbol.
///
/// Ratios are `None` when the provider does not know them. Upstream providers
/// report several unknown ratios as `0`; adapters map those zeros to `None`.
/// Price fields stay plain numbers and default to `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyOverview {
    pub name: String,
    pub sector: String,
    pub industry: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub website: String,
    pub market_cap: Option<f64>,
    pub current_price: f64,
    pub previous_close: f64,
    pub change_percent: f64,
    pub pe_ratio: Option<f64>,
    pub pb_ratio: Option<f64>,
    pub current_ratio: Option<f64>,
    pub quick_ratio: Option<f64>,
    pub total_debt: Option<f64>,
    pub current_assets: Option<f64>,
    pub total_assets: Option<f64>,
    pub debt_to_assets_ratio: Option<f64>,
    pub debt_to_current_assets_ratio: Option<f64>,
    pub trailing_eps: Option<f64>,
    pub forward_eps: Option<f64>,
    pub earnings_growth: Option<f64>,
    pub dividend_rate: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub payout_ratio: Option<f64>,
    /// `None` when the dividend section was missing from the upstream payload.
    pub has_dividend: Option<bool>,
    pub profit_margins: Option<f64>,
    pub operating_margins: Option<f64>,
    pub return_on_equity: Option<f64>,
    pub return_on_assets: Option<f64>,
    pub credit_rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CompanyOverview {
    /// An overview with every field unknown, named after the symbol.
    #[must_use]
    pub fn empty(symbol: &Symbol) -> Self {
        Self {
            name: symbol.to_string(),
            sector: NOT_AVAILABLE.to_string(),
            industry: NOT_AVAILABLE.to_string(),
            description: String::new(),
            website: String::new(),
            market_cap: None,
            current_price: 0.0,
            previous_close: 0.0,
            change_percent: 0.0,
            pe_ratio: None,
            pb_ratio: None,
            current_ratio: None,
            quick_ratio: None,
            total_debt: None,
            current_assets: None,
            total_assets: None,
            debt_to_assets_ratio: None,
            debt_to_current_assets_ratio: None,
            trailing_eps: None,
            forward_eps: None,
            earnings_growth: None,
            dividend_rate: None,
            dividend_yield: None,
            payout_ratio: None,
            has_dividend: None,
            profit_margins: None,
            operating_margins: None,
            return_on_equity: None,
            return_on_assets: None,
            credit_rating: None,
            error: None,
        }
    }

    /// The degraded overview returned when the company fetch fails.
    #[must_use]
    pub fn unavailable(symbol: &Symbol, reason: &str) -> Self {
        Self {
            error: Some(format!("Failed to fetch company data: {reason}")),
            ..Self::empty(symbol)
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.error.is_none()
    }

    #[must_use]
    pub fn quote(&self, symbol: &Symbol) -> PriceQuote {
        PriceQuote {
            symbol: symbol.to_string(),
            name: self.name.clone(),
            current_price: self.current_price,
            change_percent: self.change_percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    pub change_percent: f64,
}

/// Aggregated Wall Street analyst opinion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalystRatings {
    pub buy_count: u32,
    pub hold_count: u32,
    pub sell_count: u32,
    pub average_price_target: Option<f64>,
    pub high_price_target: Option<f64>,
    pub low_price_target: Option<f64>,
    pub recommendation_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Default for AnalystRatings {
    fn default() -> Self {
        Self {
            buy_count: 0,
            hold_count: 0,
            sell_count: 0,
            average_price_target: None,
            high_price_target: None,
            low_price_target: None,
            recommendation_key: "hold".to_string(),
            error: None,
        }
    }
}

impl AnalystRatings {
    #[must_use]
    pub fn unavailable(reason: &str) -> Self {
        Self {
            error: Some(reason.to_string()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.buy_count + self.hold_count + self.sell_count
    }
}
