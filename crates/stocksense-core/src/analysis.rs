use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{AnalystRatings, CompanyOverview, NewsArticle, SocialSentiment};

/// Coarse risk classification attached to every recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    #[serde(rename = "Low-Medium")]
    LowMedium,
    Medium,
    #[serde(rename = "Medium-High")]
    MediumHigh,
    High,
}

impl RiskLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::LowMedium => "Low-Medium",
            RiskLevel::Medium => "Medium",
            RiskLevel::MediumHigh => "Medium-High",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Narrative investment summary.
///
/// `recommendation` is always `None`: the system never emits a buy/sell call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub recommendation: Option<String>,
    pub reasoning: String,
    pub risk_level: RiskLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_by: Option<String>,
}

/// The full response for one analyzed symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAnalysis {
    pub symbol: String,
    pub company: CompanyOverview,
    pub news: Vec<NewsArticle>,
    pub sentiment: SocialSentiment,
    pub analyst: AnalystRatings,
    pub ai_recommendation: Recommendation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_serializes_with_hyphenated_names() {
        assert_eq!(
            serde_json::to_value(RiskLevel::LowMedium).unwrap(),
            "Low-Medium"
        );
        assert_eq!(
            serde_json::to_value(RiskLevel::MediumHigh).unwrap(),
            "Medium-High"
        );
        assert_eq!(RiskLevel::High.to_string(), "High");
    }

    #[test]
    fn recommendation_is_serialized_as_null() {
        let rec = Recommendation {
            recommendation: None,
            reasoning: "text".into(),
            risk_level: RiskLevel::Medium,
            note: None,
            generated_by: None,
        };
        let json = serde_json::to_value(rec).unwrap();
        assert!(json["recommendation"].is_null());
        assert_eq!(json["riskLevel"], "Medium");
        assert!(json.get("note").is_none());
    }
}
