//! Cross-provider news deduplication.
//!
//! Records are offered in source-priority order. A record is rejected when
//! its headline is blank, when its non-empty URL was already accepted, or
//! when its normalized headline was already accepted. Accepted records are
//! returned newest first; undated records (`date == 0`) go last and ties keep
//! their arrival order.

use std::cmp::Reverse;
use std::collections::HashSet;

use stocksense_core::NewsArticle;

#[derive(Debug, Default)]
pub struct NewsMerger {
    seen_urls: HashSet<String>,
    seen_headlines: HashSet<String>,
    accepted: Vec<NewsArticle>,
}

impl NewsMerger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer one record. Returns `true` if it was accepted.
    pub fn offer(&mut self, article: NewsArticle) -> bool {
        let headline = article.normalized_headline();
        if headline.is_empty() {
            return false;
        }
        let url = article.url.trim();
        if (!url.is_empty() && self.seen_urls.contains(url))
            || self.seen_headlines.contains(&headline)
        {
            return false;
        }

        if !url.is_empty() {
            self.seen_urls.insert(url.to_string());
        }
        self.seen_headlines.insert(headline);
        self.accepted.push(article);
        true
    }

    pub fn extend(&mut self, articles: impl IntoIterator<Item = NewsArticle>) -> usize {
        articles
            .into_iter()
            .map(|article| self.offer(article))
            .filter(|accepted| *accepted)
            .count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    /// Order the accepted records and keep at most `limit`.
    #[must_use]
    pub fn finish(self, limit: usize) -> Vec<NewsArticle> {
        let mut articles = self.accepted;
        // Stable sort: equal dates keep source-priority order.
        articles.sort_by_key(|article| (article.date <= 0, Reverse(article.date)));
        articles.truncate(limit);
        articles
    }
}

/// Merge per-source result lists given in priority order.
#[must_use]
pub fn merge_news(sources: Vec<Vec<NewsArticle>>, limit: usize) -> Vec<NewsArticle> {
    let mut merger = NewsMerger::new();
    for articles in sources {
        merger.extend(articles);
    }
    merger.finish(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(headline: &str, url: &str, date: i64) -> NewsArticle {
        NewsArticle {
            headline: headline.to_string(),
            summary: String::new(),
            source: "test".to_string(),
            url: url.to_string(),
            image: None,
            date,
        }
    }

    #[test]
    fn same_url_keeps_the_higher_priority_record() {
        let merged = merge_news(
            vec![
                vec![article("Apple beats estimates", "https://a/1", 100)],
                vec![article("Apple tops Street view", "https://a/1", 200)],
            ],
            10,
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].headline, "Apple beats estimates");
    }

    #[test]
    fn same_headline_with_different_urls_is_a_duplicate() {
        let merged = merge_news(
            vec![
                vec![article("Fed Holds Rates", "https://x/1", 10)],
                vec![article("  fed holds rates ", "https://y/2", 20)],
            ],
            10,
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].url, "https://x/1");
    }

    #[test]
    fn blank_headline_is_always_dropped() {
        let merged = merge_news(vec![vec![article("   ", "https://z/1", 50)]], 10);
        assert!(merged.is_empty());
    }

    #[test]
    fn empty_urls_do_not_collide() {
        let merged = merge_news(
            vec![vec![article("One", "", 1), article("Two", "", 2)]],
            10,
        );
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn output_is_newest_first_with_undated_last() {
        let merged = merge_news(
            vec![
                vec![article("undated a", "u1", 0), article("old", "u2", 100)],
                vec![article("new", "u3", 300), article("undated b", "u4", 0)],
                vec![article("mid", "u5", 200)],
            ],
            10,
        );
        let headlines: Vec<&str> = merged.iter().map(|a| a.headline.as_str()).collect();
        assert_eq!(headlines, vec!["new", "mid", "old", "undated a", "undated b"]);
        assert!(merged.windows(2).all(|w| w[0].date >= w[1].date || w[1].date == 0));
    }

    #[test]
    fn ties_keep_source_priority_order() {
        let merged = merge_news(
            vec![
                vec![article("first", "f", 500)],
                vec![article("second", "s", 500)],
            ],
            10,
        );
        assert_eq!(merged[0].headline, "first");
        assert_eq!(merged[1].headline, "second");
    }

    #[test]
    fn truncates_after_sorting() {
        let merged = merge_news(
            vec![vec![
                article("a", "1", 1),
                article("b", "2", 3),
                article("c", "3", 2),
            ]],
            2,
        );
        let headlines: Vec<&str> = merged.iter().map(|a| a.headline.as_str()).collect();
        assert_eq!(headlines, vec!["b", "c"]);
    }

    #[test]
    fn offer_reports_acceptance() {
        let mut merger = NewsMerger::new();
        assert!(merger.offer(article("x", "1", 1)));
        assert!(!merger.offer(article("X", "2", 1)));
        assert_eq!(merger.len(), 1);
    }
}
