//! Google News RSS headline adapter, reported as the search-interest channel.

use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Client;
use stocksense_core::{SentimentSnapshot, Symbol};

use super::keywords::{Tally, HEADLINE_NEGATIVE, HEADLINE_POSITIVE};
use super::{SentimentAdapter, SentimentChannel};
use crate::error::AdapterError;
use crate::http::get_text;

const PROVIDER: &str = "google_news";
const MAX_ITEMS: usize = 20;

pub struct GoogleNewsSource {
    client: Client,
    base_url: String,
}

impl GoogleNewsSource {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl SentimentAdapter for GoogleNewsSource {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn channel(&self) -> SentimentChannel {
        SentimentChannel::SearchInterest
    }

    async fn fetch(&self, symbol: &Symbol) -> Result<SentimentSnapshot, AdapterError> {
        let url = format!("{}/rss/search", self.base_url);
        let query = [
            ("q", format!("{symbol} stock")),
            ("hl", "en".to_string()),
            ("gl", "US".to_string()),
            ("ceid", "US:en".to_string()),
        ];
        let xml = get_text(&self.client, PROVIDER, &url, &query).await?;
        let titles = parse_item_titles(&xml, MAX_ITEMS)?;

        let tally = Tally::of(
            titles.iter().map(String::as_str),
            HEADLINE_POSITIVE,
            HEADLINE_NEGATIVE,
        );
        let total = titles.len() as u64;

        SentimentSnapshot::from_counts(
            tally.positive,
            tally.neutral,
            tally.negative,
            total,
            format!("Analyzed {total} recent news headlines about {symbol} from Google News."),
        )
        .ok_or(AdapterError::EmptyResult { provider: PROVIDER })
    }
}

/// Collect up to `max_items` `<item><title>` texts from an RSS document.
pub(crate) fn parse_item_titles(xml: &str, max_items: usize) -> Result<Vec<String>, AdapterError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut titles = Vec::new();
    let mut in_item = false;
    let mut in_title = false;
    let mut current = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"item" => {
                    in_item = true;
                    current.clear();
                }
                b"title" if in_item => in_title = true,
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"title" => in_title = false,
                b"item" if in_item => {
                    in_item = false;
                    let title = current.trim();
                    if !title.is_empty() {
                        titles.push(title.to_string());
                        if titles.len() >= max_items {
                            break;
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_title {
                    current.push_str(&e.unescape().unwrap_or_default());
                }
            }
            Ok(Event::CData(e)) => {
                if in_title {
                    current.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(AdapterError::parse(PROVIDER, e.to_string())),
            _ => {}
        }
    }

    Ok(titles)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>"AAPL stock" - Google News</title>
    <item>
      <title>Apple shares surge after earnings beat</title>
      <link>https://example.com/1</link>
    </item>
    <item>
      <title><![CDATA[Apple stock falls on weak China sales]]></title>
      <link>https://example.com/2</link>
    </item>
    <item>
      <title>Apple &amp; Google talk AI deal</title>
      <link>https://example.com/3</link>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn parses_item_titles_but_not_channel_title() {
        let titles = parse_item_titles(SAMPLE_RSS, 20).expect("should parse valid RSS");
        assert_eq!(titles.len(), 3);
        assert_eq!(titles[0], "Apple shares surge after earnings beat");
        assert_eq!(titles[1], "Apple stock falls on weak China sales");
        assert_eq!(titles[2], "Apple & Google talk AI deal");
    }

    #[test]
    fn respects_item_cap() {
        let titles = parse_item_titles(SAMPLE_RSS, 2).unwrap();
        assert_eq!(titles.len(), 2);
    }

    #[test]
    fn empty_feed_returns_empty_vec() {
        let xml = r#"<?xml version="1.0"?><rss version="2.0"><channel></channel></rss>"#;
        assert!(parse_item_titles(xml, 20).unwrap().is_empty());
    }

    #[test]
    fn malformed_xml_is_handled() {
        let xml = "<rss><channel><item><title>Unclosed";
        match parse_item_titles(xml, 20) {
            Ok(titles) => assert!(titles.is_empty()),
            Err(e) => assert_eq!(e.provider(), "google_news"),
        }
    }
}
