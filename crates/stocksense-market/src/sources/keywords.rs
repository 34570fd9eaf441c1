//! Keyword lists and the substring classifier used for sentiment.
//!
//! Matching is plain lower-case substring containment, so `"up"` also
//! matches `"support"`. The classifier only compares counts.

pub(crate) const SOCIAL_POSITIVE: &[&str] = &[
    "bull", "buy", "long", "moon", "rocket", "gains", "profit", "up", "rise", "growth", "strong",
];

pub(crate) const SOCIAL_NEGATIVE: &[&str] = &[
    "bear", "sell", "short", "crash", "drop", "loss", "down", "fall", "weak", "decline",
];

pub(crate) const FORUM_POSITIVE: &[&str] = &[
    "bull", "buy", "long", "moon", "rocket", "gains", "profit", "up", "rise", "growth", "strong",
    "good",
];

pub(crate) const FORUM_NEGATIVE: &[&str] = &[
    "bear", "sell", "short", "crash", "drop", "loss", "down", "fall", "weak", "decline", "bad",
    "scam",
];

pub(crate) const HEADLINE_POSITIVE: &[&str] = &[
    "surge", "rally", "gain", "up", "rise", "growth", "strong", "beat", "win", "positive",
    "bullish", "buy",
];

pub(crate) const HEADLINE_NEGATIVE: &[&str] = &[
    "drop", "fall", "down", "crash", "loss", "decline", "weak", "miss", "fail", "negative",
    "bearish", "sell",
];

pub(crate) const MARKET_KEYWORDS: &[&str] = &[
    "fed",
    "federal reserve",
    "interest rate",
    "inflation",
    "gdp",
    "jobs report",
    "unemployment",
    "earnings",
    "market",
    "s&p",
    "dow",
    "nasdaq",
    "economic",
    "cpi",
    "ppi",
    "fomc",
];

/// Extra terms accepted for index-fund news on top of [`MARKET_KEYWORDS`].
pub(crate) const MACRO_KEYWORDS: &[&str] = &[
    "monetary",
    "fiscal",
    "trade",
    "tariff",
    "recession",
    "rally",
    "crash",
];

pub(crate) const MARKET_QUERY: &str = "Federal Reserve OR Fed OR interest rates OR inflation OR GDP \
OR jobs report OR unemployment OR earnings OR stock market OR S&P 500 OR Dow Jones OR NASDAQ \
OR market crash OR market rally OR economic data OR CPI OR PPI OR retail sales \
OR consumer confidence OR FOMC OR monetary policy OR fiscal policy OR trade war OR tariffs";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Polarity {
    Positive,
    Neutral,
    Negative,
}

fn hits(text: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| text.contains(*k)).count()
}

pub(crate) fn classify(text: &str, positive: &[&str], negative: &[&str]) -> Polarity {
    let lower = text.to_lowercase();
    let pos = hits(&lower, positive);
    let neg = hits(&lower, negative);
    match pos.cmp(&neg) {
        std::cmp::Ordering::Greater => Polarity::Positive,
        std::cmp::Ordering::Less => Polarity::Negative,
        std::cmp::Ordering::Equal => Polarity::Neutral,
    }
}

pub(crate) fn mentions_any(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

/// Positive, neutral, and negative counts over a batch of texts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Tally {
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
}

impl Tally {
    pub(crate) fn of<'a>(
        texts: impl IntoIterator<Item = &'a str>,
        positive: &[&str],
        negative: &[&str],
    ) -> Self {
        let mut tally = Self::default();
        for text in texts {
            match classify(text, positive, negative) {
                Polarity::Positive => tally.positive += 1,
                Polarity::Neutral => tally.neutral += 1,
                Polarity::Negative => tally.negative += 1,
            }
        }
        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bullish_message_is_positive() {
        assert_eq!(
            classify("Rocket to the moon, buying more", SOCIAL_POSITIVE, SOCIAL_NEGATIVE),
            Polarity::Positive
        );
    }

    #[test]
    fn bearish_message_is_negative() {
        assert_eq!(
            classify("sell before the crash", SOCIAL_POSITIVE, SOCIAL_NEGATIVE),
            Polarity::Negative
        );
    }

    #[test]
    fn balanced_or_empty_message_is_neutral() {
        assert_eq!(
            classify("holding", SOCIAL_POSITIVE, SOCIAL_NEGATIVE),
            Polarity::Neutral
        );
        assert_eq!(classify("", SOCIAL_POSITIVE, SOCIAL_NEGATIVE), Polarity::Neutral);
    }

    #[test]
    fn forum_lists_add_scam_and_good() {
        assert_eq!(
            classify("total scam", FORUM_POSITIVE, FORUM_NEGATIVE),
            Polarity::Negative
        );
        assert_eq!(
            classify("total scam", SOCIAL_POSITIVE, SOCIAL_NEGATIVE),
            Polarity::Neutral
        );
    }

    #[test]
    fn tally_counts_each_text_once() {
        let tally = Tally::of(
            ["Stock surges on earnings beat", "Shares fall after miss", "CEO interview"],
            HEADLINE_POSITIVE,
            HEADLINE_NEGATIVE,
        );
        assert_eq!(
            tally,
            Tally {
                positive: 1,
                neutral: 1,
                negative: 1
            }
        );
    }

    #[test]
    fn market_keywords_are_case_insensitive() {
        assert!(mentions_any("FOMC minutes released", MARKET_KEYWORDS));
        assert!(!mentions_any("Celebrity chef opens bistro", MARKET_KEYWORDS));
        assert!(mentions_any("New tariff announced", MACRO_KEYWORDS));
    }
}
