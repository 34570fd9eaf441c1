use serde::{Deserialize, Serialize};

/// Whether a snapshot came from classifying scraped text or from the
/// deterministic placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentOrigin {
    Observed,
    Synthetic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentSnapshot {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
    pub total_mentions: u64,
    pub sample: String,
    pub origin: SentimentOrigin,
}

impl SentimentSnapshot {
    /// Build an observed snapshot from classified counts.
    ///
    /// Returns `None` when nothing was classified.
    #[must_use]
    pub fn from_counts(
        positive: u64,
        neutral: u64,
        negative: u64,
        total_mentions: u64,
        sample: String,
    ) -> Option<Self> {
        let classified = positive + neutral + negative;
        if classified == 0 {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let pct = |n: u64| round1(n as f64 / classified as f64 * 100.0);
        Some(Self {
            positive: pct(positive),
            neutral: pct(neutral),
            negative: pct(negative),
            total_mentions,
            sample,
            origin: SentimentOrigin::Observed,
        })
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.positive + self.neutral + self.negative
    }
}

/// The three sentiment channels reported for a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialSentiment {
    pub stocktwits: SentimentSnapshot,
    pub reddit: SentimentSnapshot,
    pub search_interest: SentimentSnapshot,
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_counts_returns_none_when_nothing_classified() {
        assert!(SentimentSnapshot::from_counts(0, 0, 0, 12, String::new()).is_none());
    }

    #[test]
    fn from_counts_rounds_to_one_decimal() {
        let snap = SentimentSnapshot::from_counts(1, 1, 1, 3, "s".into()).unwrap();
        assert!((snap.positive - 33.3).abs() < f64::EPSILON);
        assert!((snap.sum() - 99.9).abs() < 1e-9);
        assert_eq!(snap.origin, SentimentOrigin::Observed);
    }

    #[test]
    fn social_sentiment_serializes_channel_names_in_camel_case() {
        let snap = |mentions| {
            SentimentSnapshot::from_counts(2, 1, 1, mentions, "AAPL chatter".into()).unwrap()
        };
        let sentiment = SocialSentiment {
            stocktwits: snap(4),
            reddit: snap(9),
            search_interest: snap(20),
        };
        let json = serde_json::to_value(&sentiment).unwrap();
        assert_eq!(json["searchInterest"]["totalMentions"], 20);
        assert_eq!(json["stocktwits"]["origin"], "observed");
        assert_eq!(json["reddit"]["positive"], 50.0);
        assert_eq!(json["reddit"]["sample"], "AAPL chatter");
    }
}
