//! Market and analysis command handlers.
//!
//! These print to stdout; diagnostics go through `tracing` on stderr.

use chrono::DateTime;
use futures::stream::{self, StreamExt};
use stocksense_advisor::Advisor;
use stocksense_core::{NewsArticle, SentimentSnapshot, StockAnalysis, Symbol};
use stocksense_market::MarketFeed;

const PRICE_CONCURRENCY: usize = 2;
const HEADLINE_WIDTH: usize = 70;

pub(crate) fn fmt_date(unix_seconds: i64) -> String {
    if unix_seconds <= 0 {
        return "-".to_string();
    }
    DateTime::from_timestamp(unix_seconds, 0)
        .map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d %H:%M").to_string())
}

pub(crate) fn fmt_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

pub(crate) fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        format!("{}...", text.chars().take(width).collect::<String>())
    } else {
        text.to_string()
    }
}

fn print_news(news: &[NewsArticle]) {
    println!("{:<18}{:<22}HEADLINE", "DATE", "SOURCE");
    for article in news {
        println!(
            "{:<18}{:<22}{}",
            fmt_date(article.date),
            truncate(&article.source, 20),
            truncate(&article.headline, HEADLINE_WIDTH)
        );
    }
}

fn print_sentiment_row(channel: &str, snapshot: &SentimentSnapshot) {
    println!(
        "{:<16}{:>9.1}{:>9.1}{:>9.1}{:>10}  {:?}",
        channel,
        snapshot.positive,
        snapshot.neutral,
        snapshot.negative,
        snapshot.total_mentions,
        snapshot.origin
    );
}

fn print_analysis(analysis: &StockAnalysis) {
    let company = &analysis.company;
    println!("{} ({})", company.name, analysis.symbol);
    if let Some(error) = &company.error {
        println!("company data unavailable: {error}");
    } else {
        println!("Sector: {} / {}", company.sector, company.industry);
        println!(
            "Price: {:.2} ({:+.2}%)  P/E: {}  P/B: {}  Current ratio: {}",
            company.current_price,
            company.change_percent,
            fmt_optional(company.pe_ratio),
            fmt_optional(company.pb_ratio),
            fmt_optional(company.current_ratio)
        );
    }

    println!();
    if analysis.news.is_empty() {
        println!("no recent news");
    } else {
        print_news(&analysis.news);
    }

    println!();
    println!(
        "{:<16}{:>9}{:>9}{:>9}{:>10}  ORIGIN",
        "CHANNEL", "POS %", "NEU %", "NEG %", "MENTIONS"
    );
    print_sentiment_row("stocktwits", &analysis.sentiment.stocktwits);
    print_sentiment_row("reddit", &analysis.sentiment.reddit);
    print_sentiment_row("search", &analysis.sentiment.search_interest);

    println!();
    let analyst = &analysis.analyst;
    match &analyst.error {
        Some(error) => println!("Analysts: {error}"),
        None => println!(
            "Analysts: {} buy / {} hold / {} sell, target {} (consensus {})",
            analyst.buy_count,
            analyst.hold_count,
            analyst.sell_count,
            fmt_optional(analyst.average_price_target),
            analyst.recommendation_key
        ),
    }

    let rec = &analysis.ai_recommendation;
    println!();
    println!(
        "Risk level: {}{}",
        rec.risk_level,
        rec.generated_by
            .as_deref()
            .map(|by| format!(" (generated by {by})"))
            .unwrap_or_default()
    );
    println!();
    println!("{}", rec.reasoning);
    if let Some(note) = &rec.note {
        println!();
        println!("{note}");
    }
}

/// Run the full analysis for one symbol.
///
/// # Errors
///
/// Returns an error if the symbol is malformed or JSON output fails to serialize.
pub(crate) async fn run_analyze(advisor: &Advisor, raw: &str, json: bool) -> anyhow::Result<()> {
    let symbol = Symbol::parse(raw)?;
    let analysis = advisor.analyze(&symbol).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_analysis(&analysis);
    }
    Ok(())
}

/// Show merged news for one symbol. The company name widens the news search.
///
/// # Errors
///
/// Returns an error if the symbol is malformed.
pub(crate) async fn run_news(feed: &dyn MarketFeed, raw: &str, limit: usize) -> anyhow::Result<()> {
    let symbol = Symbol::parse(raw)?;
    let company_name = match feed.company_overview(&symbol).await {
        Ok(company) => company.name,
        Err(e) => {
            tracing::warn!(symbol = %symbol, error = %e, "company lookup failed; searching by symbol only");
            symbol.to_string()
        }
    };

    let news = feed.company_news(&symbol, &company_name, limit).await?;
    if news.is_empty() {
        println!("no recent news for {symbol}");
        return Ok(());
    }
    print_news(&news);
    Ok(())
}

/// Show market news from the last 24 hours.
///
/// # Errors
///
/// Returns an error only if the feed reports one.
pub(crate) async fn run_market_news(feed: &dyn MarketFeed, limit: usize) -> anyhow::Result<()> {
    let news = feed.market_news(limit).await?;
    if news.is_empty() {
        println!("no market news in the last 24 hours");
        return Ok(());
    }
    print_news(&news);
    Ok(())
}

/// Print a price line per symbol, fetching at most two at a time.
///
/// Per-symbol failures are printed inline and do not abort the run.
///
/// # Errors
///
/// Returns an error if every lookup failed.
pub(crate) async fn run_prices(feed: &dyn MarketFeed, symbols: &[String]) -> anyhow::Result<()> {
    let results: Vec<(String, Result<String, String>)> = stream::iter(symbols)
        .map(|raw| async move {
            let key = raw.trim().to_ascii_uppercase();
            let line = match Symbol::parse(raw) {
                Ok(symbol) => feed
                    .price_quote(&symbol)
                    .await
                    .map(|q| {
                        format!(
                            "{:<30}{:>12.2}{:>+10.2}%",
                            truncate(&q.name, 28),
                            q.current_price,
                            q.change_percent
                        )
                    })
                    .map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };
            (key, line)
        })
        .buffered(PRICE_CONCURRENCY)
        .collect()
        .await;

    println!("{:<10}{:<30}{:>12}{:>11}", "SYMBOL", "NAME", "PRICE", "CHANGE");
    let mut failures = 0usize;
    for (key, line) in &results {
        match line {
            Ok(line) => println!("{key:<10}{line}"),
            Err(error) => {
                failures += 1;
                println!("{key:<10}error: {error}");
            }
        }
    }

    if failures == results.len() {
        anyhow::bail!("no prices could be fetched");
    }
    Ok(())
}

/// Ask the educational chatbot one question.
///
/// # Errors
///
/// Returns an error if the message is blank.
pub(crate) async fn run_chat(advisor: &Advisor, message: &str) -> anyhow::Result<()> {
    let message = message.trim();
    if message.is_empty() {
        anyhow::bail!("message is required");
    }
    println!("{}", advisor.chat(message).await);
    Ok(())
}
