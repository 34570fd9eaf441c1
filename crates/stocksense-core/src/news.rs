use serde::{Deserialize, Serialize};

/// A normalized news record, regardless of which provider produced it.
///
/// `date` is Unix seconds; `0` means the provider gave no usable timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub headline: String,
    pub summary: String,
    pub source: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub date: i64,
}

impl NewsArticle {
    /// Lower-cased, trimmed headline used as the second dedup key.
    #[must_use]
    pub fn normalized_headline(&self) -> String {
        self.headline.trim().to_lowercase()
    }

    #[must_use]
    pub fn is_dated(&self) -> bool {
        self.date > 0
    }
}
