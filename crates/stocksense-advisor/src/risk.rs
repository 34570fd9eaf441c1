//! Threshold rules over company fundamentals and analyst counts.
//!
//! Each rule that fires adds a strength or a concern; metrics that are
//! unknown add nothing. The risk level compares the two counts.

use std::sync::LazyLock;

use regex::Regex;
use stocksense_core::{AnalystRatings, CompanyOverview, RiskLevel};

static LOW_RISK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\blow\b.{0,20}?risk").expect("valid regex"));
static HIGH_RISK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\bhigh\b.{0,20}?risk").expect("valid regex"));

/// One fired rule: a short bold title and a one-sentence explanation.
#[derive(Debug, Clone, PartialEq)]
pub struct Factor {
    pub title: &'static str,
    pub explanation: String,
}

impl Factor {
    fn new(title: &'static str, explanation: impl Into<String>) -> Self {
        Self {
            title,
            explanation: explanation.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactorReport {
    pub strengths: Vec<Factor>,
    pub concerns: Vec<Factor>,
}

impl FactorReport {
    #[must_use]
    pub fn risk_level(&self) -> RiskLevel {
        classify(self.strengths.len(), self.concerns.len())
    }
}

/// Evaluate every rule against the available metrics.
#[must_use]
pub fn assess(company: &CompanyOverview, analyst: &AnalystRatings) -> FactorReport {
    let mut report = FactorReport::default();
    let strengths = &mut report.strengths;
    let concerns = &mut report.concerns;

    if let Some(pe) = company.pe_ratio {
        if pe < 20.0 {
            strengths.push(Factor::new(
                "Reasonable Valuation",
                format!("The P/E ratio of {pe:.1} suggests the stock may be reasonably priced relative to earnings."),
            ));
        } else if pe > 25.0 {
            concerns.push(Factor::new(
                "High Valuation",
                format!("The P/E ratio of {pe:.1} means investors are paying a premium that future growth has to justify."),
            ));
        }
    }

    if let Some(pb) = company.pb_ratio {
        if pb <= 1.5 {
            strengths.push(Factor::new(
                "Attractive Price-to-Book Ratio",
                format!("With a P/B ratio of {pb:.2}, the stock trades near its book value."),
            ));
        } else if pb > 2.0 {
            concerns.push(Factor::new(
                "Premium Pricing",
                format!("With a P/B ratio of {pb:.2}, the stock trades well above its book value."),
            ));
        }
    }

    if let Some(cr) = company.current_ratio {
        if cr >= 1.5 {
            strengths.push(Factor::new(
                "Strong Financial Health",
                format!("A current ratio of {cr:.2} indicates the company can comfortably meet short-term obligations."),
            ));
        } else if cr < 1.0 {
            concerns.push(Factor::new(
                "Liquidity Concerns",
                format!("A current ratio of {cr:.2} is below 1.0, so short-term liabilities exceed short-term assets."),
            ));
        }
    }

    if let Some(growth) = company.earnings_growth {
        if growth > 0.0 {
            strengths.push(Factor::new(
                "Positive Earnings Growth",
                format!("Earnings grew {growth:.1}%, showing the business is expanding its profits."),
            ));
        } else if growth < 0.0 {
            concerns.push(Factor::new(
                "Declining Earnings",
                format!("Earnings changed {growth:.1}%, which raises questions about sustaining profitability."),
            ));
        }
    }

    if let Some(margin) = company.profit_margins {
        if margin > 10.0 {
            strengths.push(Factor::new(
                "Healthy Profit Margins",
                format!("Profit margins of {margin:.2}% point to efficient operations and some pricing power."),
            ));
        } else if margin < 5.0 {
            concerns.push(Factor::new(
                "Thin Profit Margins",
                format!("Profit margins of {margin:.2}% leave little room for rising costs or price pressure."),
            ));
        }
    }

    match company.has_dividend {
        Some(true) => strengths.push(Factor::new(
            "Dividend Income",
            "The company pays dividends, returning cash to shareholders on a regular schedule.",
        )),
        Some(false) => concerns.push(Factor::new(
            "No Dividend Income",
            "The company does not pay dividends, so returns depend entirely on price appreciation.",
        )),
        None => {}
    }

    if analyst.buy_count > analyst.sell_count {
        strengths.push(Factor::new(
            "Positive Analyst Sentiment",
            "Professional analysts issue more buy than sell ratings.",
        ));
    } else if analyst.sell_count > analyst.buy_count {
        concerns.push(Factor::new(
            "Cautious Analyst Outlook",
            "More analysts recommend selling than buying.",
        ));
    }

    if let Some(debt) = company.debt_to_current_assets_ratio {
        if debt <= 110.0 {
            strengths.push(Factor::new(
                "Conservative Debt Management",
                format!("Total debt is {debt:.1}% of current assets, a conservative level of borrowing."),
            ));
        } else if debt > 150.0 {
            concerns.push(Factor::new(
                "High Debt Levels",
                format!("Total debt is {debt:.1}% of current assets, which limits flexibility in a downturn."),
            ));
        }
    }

    report
}

/// Compare concern and strength counts.
#[must_use]
pub fn classify(strengths: usize, concerns: usize) -> RiskLevel {
    #[allow(clippy::cast_precision_loss)]
    let (s, c) = (strengths as f64, concerns as f64);
    if c > s * 1.5 {
        RiskLevel::High
    } else if c > s {
        RiskLevel::MediumHigh
    } else if s > c * 1.5 {
        RiskLevel::LowMedium
    } else {
        RiskLevel::Medium
    }
}

/// Read a coarse risk level out of generated prose.
#[must_use]
pub fn risk_from_text(text: &str) -> RiskLevel {
    if LOW_RISK_RE.is_match(text) {
        RiskLevel::Low
    } else if HIGH_RISK_RE.is_match(text) {
        RiskLevel::High
    } else {
        RiskLevel::Medium
    }
}
