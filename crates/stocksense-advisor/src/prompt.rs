//! Prompt text for analysis and chat generation.

use stocksense_core::{AnalystRatings, CompanyOverview, NewsArticle, SocialSentiment, Symbol};

use crate::llm::Prompt;

const NOT_AVAILABLE: &str = "Not available";
const PROMPT_NEWS_ITEMS: usize = 5;
const CHAT_NEWS_SUMMARY_CHARS: usize = 150;

const ANALYSIS_SYSTEM: &str = "You are a financial educator who explains investments in simple, \
beginner-friendly terms. Every analysis is balanced: show strengths and weaknesses, explain what \
each metric means in context, and never tell the reader to buy, hold, or sell.";

const CHAT_SYSTEM: &str = "You are the financial education assistant for StockSense, a \
beginner-friendly stock analysis tool. Help users understand financial concepts, terms, and news.

Rules:
1. Never give buy, sell, or hold recommendations for any stock, fund, or other investment.
2. Never tell users whether they should invest in something. If asked, explain that you are an educational tool.
3. Explain concepts in plain language, with analogies and small worked examples.
4. Recent market news is provided for context only; use it to illustrate concepts.

Keep answers clear, objective, and friendly.";

const ANALYSIS_STRUCTURE: &str = "Write a balanced, educational analysis. Do not give a direct \
buy, hold, or sell recommendation; present the facts and let the reader decide.

Use exactly these sections:
1. **Company Description** (3 sentences): core business, customers, competitive position.
2. **Recent News Summary** (2 sentences): what the stock and company have been doing lately.
3. **Reasons to Buy for Long-Term** (up to 5 bullets, each a **bold title** and 1-2 sentences).
4. **Reasons Not to Buy for Long-Term** (up to 5 bullets, same format).
5. **Long-Term Risk Assessment** (2-3 sentences): state Low, Medium, or High risk and why.
6. **Market Correlation** (2 sentences): relationship to the S&P 500 and what it means for diversification.
7. **Short-Term Tendencies** (2-3 sentences): volatility and reaction to news.
8. **Summary** (3-4 sentences): synthesize without a recommendation.

Explain financial terms the first time they appear.";

fn metric(value: Option<f64>, render: impl Fn(f64) -> String) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), render)
}

/// Format with thousands separators, no decimals.
pub(crate) fn thousands(value: f64) -> String {
    #[allow(clippy::cast_possible_truncation)]
    let whole = value.round() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if whole < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn news_lines(news: &[NewsArticle]) -> String {
    if news.is_empty() {
        return "No recent news available.".to_string();
    }
    news.iter()
        .take(PROMPT_NEWS_ITEMS)
        .enumerate()
        .map(|(i, article)| format!("{}. {} ({})", i + 1, article.headline, article.source))
        .collect::<Vec<_>>()
        .join("\n")
}

#[must_use]
pub fn analysis_prompt(
    symbol: &Symbol,
    company: &CompanyOverview,
    news: &[NewsArticle],
    sentiment: &SocialSentiment,
    analyst: &AnalystRatings,
) -> Prompt {
    let description = if company.description.trim().is_empty() {
        "No description available."
    } else {
        company.description.trim()
    };
    let dividend = match company.has_dividend {
        Some(true) => "Yes",
        Some(false) => "No",
        None => "Unknown",
    };

    let basics = format!(
        "BASIC INFORMATION:\n\
         - Company Name: {}\n\
         - Sector: {}\n\
         - Industry: {}\n\
         - Current Price: ${:.2}\n\
         - Change Today: {:.2}%\n\
         - Market Capitalization: {}\n\n",
        company.name,
        company.sector,
        company.industry,
        company.current_price,
        company.change_percent,
        metric(company.market_cap, |v| format!("${}", thousands(v))),
    );

    let valuation = format!(
        "VALUATION:\n\
         - P/E Ratio: {} (under 15-20 is usually considered inexpensive)\n\
         - P/B Ratio: {} (around 1.2 or lower trades near asset value)\n\n",
        metric(company.pe_ratio, |v| format!("{v:.2}")),
        metric(company.pb_ratio, |v| format!("{v:.2}")),
    );

    let liquidity = format!(
        "DEBT AND LIQUIDITY:\n\
         - Total Debt: {}\n\
         - Current Assets: {}\n\
         - Debt to Current Assets: {} (under 110% is conservative)\n\
         - Current Ratio: {} (1.5 or higher indicates strong liquidity)\n\n",
        metric(company.total_debt, |v| format!("${}", thousands(v))),
        metric(company.current_assets, |v| format!("${}", thousands(v))),
        metric(company.debt_to_current_assets_ratio, |v| format!("{v:.1}%")),
        metric(company.current_ratio, |v| format!("{v:.2}")),
    );

    let earnings = format!(
        "EARNINGS, DIVIDENDS, PROFITABILITY:\n\
         - Trailing EPS: {}\n\
         - Earnings Growth: {}\n\
         - Pays Dividends: {dividend}\n\
         - Dividend Yield: {}\n\
         - Profit Margins: {}\n\
         - Credit Rating: {}\n\n",
        metric(company.trailing_eps, |v| format!("${v:.2}")),
        metric(company.earnings_growth, |v| format!("{v:.1}%")),
        metric(company.dividend_yield, |v| format!("{v:.2}%")),
        metric(company.profit_margins, |v| format!("{v:.2}%")),
        company.credit_rating.as_deref().unwrap_or(NOT_AVAILABLE),
    );

    let social: String = [
        ("StockTwits", &sentiment.stocktwits),
        ("Reddit", &sentiment.reddit),
        ("Search interest", &sentiment.search_interest),
    ]
    .into_iter()
    .map(|(label, snapshot)| {
        format!(
            "- {label}: {:.1}% positive, {:.1}% negative\n",
            snapshot.positive, snapshot.negative
        )
    })
    .collect();

    let analysts = format!(
        "ANALYST OPINIONS:\n\
         - Buy: {}\n\
         - Hold: {}\n\
         - Sell: {}\n\
         - Average Price Target: {}\n\n",
        analyst.buy_count,
        analyst.hold_count,
        analyst.sell_count,
        metric(analyst.average_price_target, |v| format!("${v:.2}")),
    );

    let mut user = [
        format!("Stock Symbol: {symbol}\n\n"),
        format!("COMPANY OVERVIEW:\n{description}\n\n"),
        basics,
        valuation,
        liquidity,
        earnings,
        format!("RECENT NEWS:\n{}\n\n", news_lines(news)),
        format!("SOCIAL SENTIMENT:\n{social}\n"),
        analysts,
    ]
    .concat();
    user.push_str(ANALYSIS_STRUCTURE);

    Prompt {
        system: ANALYSIS_SYSTEM.to_string(),
        user,
    }
}

#[must_use]
pub fn chat_prompt(message: &str, market_news: &[NewsArticle]) -> Prompt {
    let mut user = format!("User question: {}\n", message.trim());
    if !market_news.is_empty() {
        let stories: String = market_news
            .iter()
            .take(PROMPT_NEWS_ITEMS)
            .enumerate()
            .map(|(i, article)| {
                let summary: String =
                    article.summary.chars().take(CHAT_NEWS_SUMMARY_CHARS).collect();
                format!("{}. {}\n   {summary}\n", i + 1, article.headline)
            })
            .collect();
        user.push_str("\nRECENT MARKET NEWS (past 24 hours):\n");
        user.push_str(&stories);
    }
    user.push_str(
        "\nGive a helpful, educational answer. No buy or sell recommendations, only explanation.",
    );

    Prompt {
        system: CHAT_SYSTEM.to_string(),
        user,
    }
}
