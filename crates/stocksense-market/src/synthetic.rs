//! Deterministic placeholder sentiment.
//!
//! When a channel has no observed data, a snapshot is derived from the
//! day's price change and a hash of the symbol. The same `(symbol,
//! change_percent)` always yields the same snapshot. This is a placeholder
//! signal, not a statistical model.

use sha2::{Digest, Sha256};
use stocksense_core::{SentimentOrigin, SentimentSnapshot, SocialSentiment, Symbol};

use crate::sources::SentimentChannel;
use crate::text::round_to;

/// First eight bytes of SHA-256 over `symbol` + `salt`, big-endian.
fn symbol_hash(symbol: &str, salt: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(symbol.as_bytes());
    hasher.update(salt.as_bytes());
    let digest = hasher.finalize();
    let mut prefix = [0_u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix)
}

/// Offset in `-10..=9` derived from the unsalted hash.
#[allow(clippy::cast_precision_loss)]
fn jitter(symbol: &str) -> f64 {
    (symbol_hash(symbol, "") % 20) as f64 - 10.0
}

struct Shape {
    positive: f64,
    neutral_share: f64,
    mentions: u64,
    sample: String,
}

#[must_use]
pub fn synthetic_snapshot(
    channel: SentimentChannel,
    symbol: &Symbol,
    change_percent: f64,
) -> SentimentSnapshot {
    let s = symbol.as_str();
    let cp = if change_percent.is_finite() {
        change_percent
    } else {
        0.0
    };

    let shape = match channel {
        SentimentChannel::StockTwits => Shape {
            positive: (50.0 + cp * 2.0).clamp(30.0, 85.0),
            neutral_share: 0.6,
            mentions: 500 + symbol_hash(s, "") % 2000,
            sample: format!("StockTwits sentiment for {s} based on recent discussions."),
        },
        SentimentChannel::Reddit => Shape {
            positive: (50.0 + cp * 2.0 + jitter(s)).clamp(25.0, 80.0),
            neutral_share: 0.55,
            mentions: 500 + symbol_hash(s, "reddit") % 500,
            sample: format!("Reddit discussions about {s} show mixed opinions."),
        },
        SentimentChannel::SearchInterest => Shape {
            positive: (50.0 + cp * 1.5 + jitter(s)).clamp(30.0, 85.0),
            neutral_share: 0.6,
            mentions: 2000 + symbol_hash(s, "search") % 3000,
            sample: format!("Search interest for {s} based on market activity."),
        },
    };

    let remaining = 100.0 - shape.positive;
    SentimentSnapshot {
        positive: round_to(shape.positive, 1),
        neutral: round_to(remaining * shape.neutral_share, 1),
        negative: round_to(remaining * (1.0 - shape.neutral_share), 1),
        total_mentions: shape.mentions,
        sample: shape.sample,
        origin: SentimentOrigin::Synthetic,
    }
}

/// All three channels synthesized, for when no sentiment result arrives at all.
#[must_use]
pub fn synthetic_sentiment(symbol: &Symbol, change_percent: f64) -> SocialSentiment {
    SocialSentiment {
        stocktwits: synthetic_snapshot(SentimentChannel::StockTwits, symbol, change_percent),
        reddit: synthetic_snapshot(SentimentChannel::Reddit, symbol, change_percent),
        search_interest: synthetic_snapshot(SentimentChannel::SearchInterest, symbol, change_percent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(s: &str) -> Symbol {
        Symbol::parse(s).unwrap()
    }

    #[test]
    fn same_inputs_give_same_snapshot() {
        for channel in SentimentChannel::ALL {
            let a = synthetic_snapshot(channel, &sym("NVDA"), 1.7);
            let b = synthetic_snapshot(channel, &sym("NVDA"), 1.7);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn percentages_sum_to_about_one_hundred() {
        for symbol in ["AAPL", "MSFT", "TSLA", "BRK.B"] {
            for cp in [-40.0, -3.3, 0.0, 2.25, 55.0] {
                for channel in SentimentChannel::ALL {
                    let snap = synthetic_snapshot(channel, &sym(symbol), cp);
                    assert!((snap.sum() - 100.0).abs() <= 0.2, "{symbol} {cp}: {snap:?}");
                }
            }
        }
    }

    #[test]
    fn positive_share_is_clamped() {
        let up = synthetic_snapshot(SentimentChannel::StockTwits, &sym("AAPL"), 100.0);
        let down = synthetic_snapshot(SentimentChannel::StockTwits, &sym("AAPL"), -100.0);
        assert!((up.positive - 85.0).abs() < f64::EPSILON);
        assert!((down.positive - 30.0).abs() < f64::EPSILON);

        let reddit = synthetic_snapshot(SentimentChannel::Reddit, &sym("AAPL"), 100.0);
        assert!((reddit.positive - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn mention_counts_stay_in_range() {
        let snap = synthetic_snapshot(SentimentChannel::SearchInterest, &sym("AMD"), 0.0);
        assert!((2000..5000).contains(&snap.total_mentions));
        let snap = synthetic_snapshot(SentimentChannel::Reddit, &sym("AMD"), 0.0);
        assert!((500..1000).contains(&snap.total_mentions));
    }

    #[test]
    fn flat_day_stocktwits_is_fifty_thirty_twenty() {
        let snap = synthetic_snapshot(SentimentChannel::StockTwits, &sym("IBM"), 0.0);
        assert!((snap.positive - 50.0).abs() < f64::EPSILON);
        assert!((snap.neutral - 30.0).abs() < f64::EPSILON);
        assert!((snap.negative - 20.0).abs() < f64::EPSILON);
        assert_eq!(snap.origin, SentimentOrigin::Synthetic);
    }

    #[test]
    fn synthetic_sentiment_fills_every_channel() {
        let all = synthetic_sentiment(&sym("AAPL"), -2.0);
        assert_eq!(
            all.reddit,
            synthetic_snapshot(SentimentChannel::Reddit, &sym("AAPL"), -2.0)
        );
        for snap in [&all.stocktwits, &all.reddit, &all.search_interest] {
            assert_eq!(snap.origin, SentimentOrigin::Synthetic);
        }
        assert!((all.stocktwits.positive - 46.0).abs() < f64::EPSILON);
    }

    #[test]
    fn different_salts_give_different_hashes() {
        assert_ne!(symbol_hash("AAPL", "reddit"), symbol_hash("AAPL", "search"));
    }
}
