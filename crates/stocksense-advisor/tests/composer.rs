//! Composer tests against a scripted market feed and mocked generation vendors.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use stocksense_advisor::narrative::FALLBACK_NOTE;
use stocksense_advisor::{
    Advisor, AdvisorSettings, AnthropicClient, ChatModel, Generator, OpenAiClient,
};
use stocksense_core::{
    AnalystRatings, CompanyOverview, NewsArticle, PriceQuote, RiskLevel, SentimentOrigin,
    SocialSentiment, Symbol,
};
use stocksense_market::sources::SentimentChannel;
use stocksense_market::{synthetic_sentiment, synthetic_snapshot, AdapterError, MarketFeed};
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct ScriptedFeed {
    fail_company: bool,
    slow_sentiment: bool,
    fail_market_news: bool,
    market_news_calls: AtomicU32,
}

fn symbol(raw: &str) -> Symbol {
    Symbol::parse(raw).expect("valid symbol")
}

fn article(headline: &str, date: i64) -> NewsArticle {
    NewsArticle {
        headline: headline.to_string(),
        summary: "Summary.".to_string(),
        source: "Wire".to_string(),
        url: format!("https://news.example/{date}"),
        image: None,
        date,
    }
}

#[async_trait]
impl MarketFeed for ScriptedFeed {
    async fn company_overview(&self, symbol: &Symbol) -> Result<CompanyOverview, AdapterError> {
        if self.fail_company {
            return Err(AdapterError::EmptyResult { provider: "yahoo" });
        }
        let mut company = CompanyOverview::empty(symbol);
        company.name = "Acme Corp".to_string();
        company.pe_ratio = Some(12.0);
        company.current_ratio = Some(2.0);
        company.current_price = 42.0;
        company.change_percent = 1.5;
        Ok(company)
    }

    async fn price_quote(&self, symbol: &Symbol) -> Result<PriceQuote, AdapterError> {
        Ok(self.company_overview(symbol).await?.quote(symbol))
    }

    async fn company_news(
        &self,
        _symbol: &Symbol,
        company_name: &str,
        _limit: usize,
    ) -> Result<Vec<NewsArticle>, AdapterError> {
        Ok(vec![article(&format!("{company_name} ships new product"), 1_700_000_000)])
    }

    async fn market_news(&self, _limit: usize) -> Result<Vec<NewsArticle>, AdapterError> {
        self.market_news_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_market_news {
            return Err(AdapterError::Timeout { provider: "finnhub" });
        }
        Ok(vec![article("Fed holds rates steady", 1_700_000_500)])
    }

    async fn social_sentiment(
        &self,
        symbol: &Symbol,
        _change_percent: f64,
    ) -> Result<SocialSentiment, AdapterError> {
        if self.slow_sentiment {
            tokio::time::sleep(Duration::from_secs(5)).await;
        }
        let mut sentiment = synthetic_sentiment(symbol, 0.0);
        sentiment.stocktwits.origin = SentimentOrigin::Observed;
        sentiment.stocktwits.positive = 70.0;
        Ok(sentiment)
    }

    async fn analyst_ratings(&self, _symbol: &Symbol) -> Result<AnalystRatings, AdapterError> {
        Ok(AnalystRatings {
            buy_count: 4,
            hold_count: 2,
            sell_count: 1,
            ..AnalystRatings::default()
        })
    }
}

fn settings() -> AdvisorSettings {
    AdvisorSettings {
        fetch_timeout: Duration::from_millis(300),
        generation_timeout: Duration::from_secs(5),
        max_concurrent: 2,
    }
}

fn advisor(feed: ScriptedFeed, generator: Generator) -> Advisor {
    Advisor::new(Arc::new(feed), Arc::new(generator), settings())
}

#[tokio::test]
async fn slow_sentiment_does_not_block_other_operations() {
    let advisor = advisor(
        ScriptedFeed {
            slow_sentiment: true,
            ..ScriptedFeed::default()
        },
        Generator::default(),
    );

    let analysis = advisor.analyze(&symbol("acme")).await;

    assert_eq!(analysis.symbol, "ACME");
    assert_eq!(analysis.news.len(), 1);
    assert_eq!(analysis.news[0].headline, "Acme Corp ships new product");
    assert_eq!(analysis.analyst.buy_count, 4);
    assert!(analysis.analyst.error.is_none());
    // The timed-out sentiment is replaced by snapshots derived from today's move.
    assert_eq!(analysis.sentiment, synthetic_sentiment(&symbol("ACME"), 1.5));
    for (channel, snapshot) in [
        (SentimentChannel::StockTwits, &analysis.sentiment.stocktwits),
        (SentimentChannel::Reddit, &analysis.sentiment.reddit),
        (SentimentChannel::SearchInterest, &analysis.sentiment.search_interest),
    ] {
        assert_eq!(snapshot.origin, SentimentOrigin::Synthetic);
        assert_eq!(*snapshot, synthetic_snapshot(channel, &symbol("ACME"), 1.5));
    }
    assert!((analysis.sentiment.stocktwits.positive - 53.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn missing_generation_credentials_yield_fallback_narrative() {
    let advisor = advisor(ScriptedFeed::default(), Generator::default());

    let analysis = advisor.analyze(&symbol("ACME")).await;
    let rec = &analysis.ai_recommendation;

    // P/E 12 and current ratio 2.0 plus more buys than sells: three strengths, no concerns
    assert_eq!(rec.risk_level, RiskLevel::LowMedium);
    assert_eq!(rec.note.as_deref(), Some(FALLBACK_NOTE));
    assert!(rec.generated_by.is_none());
    assert!(rec.recommendation.is_none());
    assert!(rec.reasoning.contains("**8. Summary**"));
}

#[tokio::test]
async fn failed_company_fetch_embeds_error_and_still_answers() {
    let advisor = advisor(
        ScriptedFeed {
            fail_company: true,
            ..ScriptedFeed::default()
        },
        Generator::default(),
    );

    let analysis = advisor.analyze(&symbol("ZZZZ")).await;

    let error = analysis.company.error.as_deref().expect("error is embedded");
    assert!(error.starts_with("Failed to fetch company data:"));
    assert_eq!(analysis.company.name, "ZZZZ");
    assert!(analysis.company.current_price.abs() < f64::EPSILON);
    assert_eq!(analysis.news.len(), 1);
}

#[tokio::test]
async fn analysis_falls_back_to_second_anthropic_model() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(body_partial_json(serde_json::json!({ "model": "claude-3-haiku-20240307" })))
        .respond_with(ResponseTemplate::new(529).set_body_string("overloaded"))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(body_partial_json(serde_json::json!({ "model": "claude-3-5-sonnet-20241022" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "msg_1",
            "type": "message",
            "role": "assistant",
            "content": [
                { "type": "text", "text": "**5. Long-Term Risk Assessment** Overall a low risk profile." }
            ]
        })))
        .mount(&server)
        .await;

    let client =
        AnthropicClient::with_base_url("test-key", Duration::from_secs(5), &server.uri())
            .expect("client construction should not fail");
    let generator = Generator::new(vec![Arc::new(client) as Arc<dyn ChatModel>]);
    let advisor = advisor(ScriptedFeed::default(), generator);

    let analysis = advisor.analyze(&symbol("ACME")).await;
    let rec = analysis.ai_recommendation;

    assert_eq!(rec.risk_level, RiskLevel::Low);
    assert_eq!(
        rec.generated_by.as_deref(),
        Some("anthropic/claude-3-5-sonnet-20241022")
    );
    assert!(rec.note.is_none());
    assert!(rec.reasoning.contains("low risk profile"));
}

#[tokio::test]
async fn exhausted_generation_uses_fallback_narrative() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let client = OpenAiClient::with_base_url("sk-test", Duration::from_secs(5), &server.uri())
        .expect("client construction should not fail");
    let generator = Generator::new(vec![Arc::new(client) as Arc<dyn ChatModel>]);
    let advisor = advisor(ScriptedFeed::default(), generator);

    let analysis = advisor.analyze(&symbol("ACME")).await;

    assert_eq!(
        analysis.ai_recommendation.note.as_deref(),
        Some(FALLBACK_NOTE)
    );
    assert_eq!(analysis.ai_recommendation.risk_level, RiskLevel::LowMedium);
}

#[tokio::test]
async fn chat_without_credentials_uses_canned_answer() {
    let advisor = advisor(ScriptedFeed::default(), Generator::default());

    let answer = advisor.chat("what is a P/E ratio?").await;

    assert!(answer.starts_with("**P/E Ratio"));
}

#[tokio::test]
async fn chat_sends_market_news_context_to_the_model() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(serde_json::json!({ "model": "gpt-4o" })))
        .and(body_string_contains("Fed holds rates steady"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": "Inflation is..." } }
            ]
        })))
        .mount(&server)
        .await;

    let client = OpenAiClient::with_base_url("sk-test", Duration::from_secs(5), &server.uri())
        .expect("client construction should not fail");
    let generator = Generator::new(vec![Arc::new(client) as Arc<dyn ChatModel>]);
    let advisor = advisor(ScriptedFeed::default(), generator);

    let answer = advisor.chat("What is inflation?").await;

    assert_eq!(answer, "Inflation is...");
}

#[tokio::test]
async fn chat_survives_market_news_outage() {
    let feed = Arc::new(ScriptedFeed {
        fail_market_news: true,
        ..ScriptedFeed::default()
    });
    let advisor = Advisor::new(feed.clone(), Arc::new(Generator::default()), settings());

    let answer = advisor.chat("How does the stock market work?").await;

    assert!(answer.starts_with("**How the Stock Market Works**"));
    assert_eq!(feed.market_news_calls.load(Ordering::SeqCst), 1);
}
