//! Deterministic fallback narrative built from raw metrics.
//!
//! Pure function of its inputs. Used whenever generation is unconfigured,
//! exhausted, or too slow, so it must always produce the full eight sections.

use stocksense_core::{
    AnalystRatings, CompanyOverview, NewsArticle, Recommendation, RiskLevel, Symbol,
};

use crate::risk::{assess, Factor};

pub const FALLBACK_NOTE: &str = "This is an educational analysis based on fundamental metrics. \
For AI-powered analysis with deeper insights, add ANTHROPIC_API_KEY or OPENAI_API_KEY to your .env file.";

const MAX_REASONS: usize = 5;
const NEWS_THEME_HEADLINES: usize = 3;

const NEWS_THEMES: &[(&[&str], &str)] = &[
    (
        &["earnings", "revenue", "profit"],
        "experiencing developments related to its financial performance and business operations.",
    ),
    (
        &["acquisition", "merger", "deal"],
        "involved in strategic business moves including potential acquisitions or partnerships.",
    ),
    (
        &["launch", "product", "innovation"],
        "focusing on product launches and innovation initiatives.",
    ),
    (
        &["regulation", "legal", "lawsuit"],
        "facing regulatory or legal developments that may impact its operations.",
    ),
];

/// Build the full fallback recommendation.
#[must_use]
pub fn fallback_recommendation(
    symbol: &Symbol,
    company: &CompanyOverview,
    analyst: &AnalystRatings,
    news: &[NewsArticle],
) -> Recommendation {
    let report = assess(company, analyst);
    let risk = report.risk_level();

    let sections = [
        section(1, "Company Description", &company_description(company)),
        section(2, "Recent News Summary", &news_summary(symbol, company, news)),
        section(
            3,
            "Reasons to Buy for Long-Term",
            &bullets(
                &report.strengths,
                "Stable Operations",
                "The company maintains consistent business operations in its sector.",
            ),
        ),
        section(
            4,
            "Reasons Not to Buy for Long-Term",
            &bullets(
                &report.concerns,
                "Market Risks",
                "All investments carry market risk that can affect long-term returns.",
            ),
        ),
        section(
            5,
            "Long-Term Risk Assessment",
            &risk_assessment(risk, &report.concerns),
        ),
        section(
            6,
            "Market Correlation",
            &format!(
                "{symbol} generally follows the broader trend of the S&P 500, although sector-specific \
factors can cause it to diverge. Because of that link it offers only partial diversification and \
may fall along with the market during broad downturns."
            ),
        ),
        section(
            7,
            "Short-Term Tendencies",
            &format!(
                "{symbol} shows moderate volatility typical of the {industry} industry. Its price tends \
to react to earnings announcements, sector news, and overall market moves. Short-term swings are \
common, which suits investors with a longer time horizon.",
                industry = company.industry
            ),
        ),
        section(
            8,
            "Summary",
            &format!(
                "{name} operates in the {industry} industry with a mix of strengths and areas of concern. \
Its metrics suggest {risk} risk characteristics, with {strengths} positive factors and {concerns} \
areas requiring attention. Weigh its competitive position, financial health, and growth prospects \
against your own goals and risk tolerance. Any decision should rest on your own research.",
                name = company.name,
                industry = company.industry,
                risk = risk.as_str().to_lowercase(),
                strengths = report.strengths.len(),
                concerns = report.concerns.len(),
            ),
        ),
    ];

    Recommendation {
        recommendation: None,
        reasoning: sections.join("\n\n"),
        risk_level: risk,
        note: Some(FALLBACK_NOTE.to_string()),
        generated_by: None,
    }
}

fn section(number: u8, title: &str, body: &str) -> String {
    format!("**{number}. {title}**\n\n{}", body.trim_end())
}

fn bullets(factors: &[Factor], default_title: &str, default_text: &str) -> String {
    if factors.is_empty() {
        return format!("• **{default_title}**: {default_text}");
    }
    factors
        .iter()
        .take(MAX_REASONS)
        .map(|f| format!("• **{}**: {}", f.title, f.explanation))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Three sentences from the description, padded from sector and industry.
fn company_description(company: &CompanyOverview) -> String {
    let mut sentences: Vec<String> = company
        .description
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(3)
        .map(ToString::to_string)
        .collect();

    let padding = [
        format!("{} operates in the {} industry", company.name, company.industry),
        format!("The company serves customers in the {} sector", company.sector),
        format!("{} competes with other {} businesses", company.name, company.industry),
    ];
    for filler in padding.into_iter().skip(sentences.len()) {
        sentences.push(filler);
    }

    sentences
        .iter()
        .map(|s| format!("{s}."))
        .collect::<Vec<_>>()
        .join(" ")
}

fn news_summary(symbol: &Symbol, company: &CompanyOverview, news: &[NewsArticle]) -> String {
    let change = company.change_percent;

    if news.is_empty() {
        let movement = if change.abs() > 2.0 {
            format!("The stock has shown a {change:.1}% price movement, indicating some market activity.")
        } else {
            "The stock has maintained relatively stable trading patterns.".to_string()
        };
        return format!(
            "Recently, {symbol} has seen normal market activity with few major developments reported. {movement}"
        );
    }

    let headlines: Vec<String> = news
        .iter()
        .take(NEWS_THEME_HEADLINES)
        .map(|a| a.headline.to_lowercase())
        .collect();
    let theme = NEWS_THEMES
        .iter()
        .find(|(keywords, _)| {
            headlines
                .iter()
                .any(|h| keywords.iter().any(|k| h.contains(k)))
        })
        .map_or(
            "experiencing market activity that reflects ongoing business operations.",
            |(_, sentence)| *sentence,
        );

    let movement = if change.abs() > 5.0 {
        if change > 0.0 {
            format!("significant positive movement with a {change:.1}% change, indicating strong investor interest.")
        } else {
            format!("notable downward pressure with a {change:.1}% decline, reflecting market concerns.")
        }
    } else {
        "relatively stable price movement, suggesting steady investor sentiment.".to_string()
    };

    format!("Recently, {symbol} has been {theme} The stock has shown {movement}")
}

fn risk_assessment(risk: RiskLevel, concerns: &[Factor]) -> String {
    let lead = format!("The overall risk level for this investment is {risk}.");
    let detail = match risk {
        RiskLevel::High => {
            let named: Vec<&str> = concerns.iter().take(2).map(|f| f.title).collect();
            format!(
                "The company faces significant challenges including {} that could affect a long-term holding. \
Consider your risk tolerance carefully and do thorough research before committing capital.",
                named.join(", ")
            )
        }
        RiskLevel::MediumHigh => "While the company has some positive attributes, notable concerns \
warrant careful monitoring, including potential volatility in earnings and market conditions."
            .to_string(),
        RiskLevel::LowMedium => "The company shows several fundamental strengths that suggest relative \
stability. Market and industry-specific risks can still emerge over time."
            .to_string(),
        RiskLevel::Medium | RiskLevel::Low => "The company presents a balanced mix of strengths and \
concerns typical of most public companies. Long-term investors should keep watching key financial \
metrics and industry trends."
            .to_string(),
    };
    format!("{lead} {detail}")
}
