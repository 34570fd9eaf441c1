use serde_json::json;

use super::*;

fn aapl() -> Symbol {
    Symbol::parse("AAPL").unwrap()
}

fn full_result() -> Value {
    json!({
        "price": {
            "longName": "Apple Inc.",
            "regularMarketPrice": { "raw": 110.0, "fmt": "110.00" },
            "marketCap": { "raw": 2_900_000_000_000.0_f64 }
        },
        "summaryProfile": {
            "sector": "Technology",
            "industry": "Consumer Electronics",
            "longBusinessSummary": "Apple designs phones. It also sells services.",
            "website": "https://www.apple.com"
        },
        "summaryDetail": {
            "previousClose": { "raw": 100.0 },
            "trailingPE": { "raw": 0 },
            "forwardPE": { "raw": 28.456 },
            "dividendRate": { "raw": 0.96 },
            "dividendYield": { "raw": 0.0052 },
            "payoutRatio": 0.15
        },
        "financialData": {
            "currentRatio": { "raw": 0.99 },
            "quickRatio": { "raw": 0 },
            "totalDebt": { "raw": 100.0 },
            "profitMargins": { "raw": 0.2531 },
            "returnOnEquity": { "raw": 1.47 },
            "targetMeanPrice": { "raw": 230.123 },
            "targetHighPrice": { "raw": 0 },
            "recommendationKey": "buy"
        },
        "defaultKeyStatistics": {
            "priceToBook": { "raw": 47.2 },
            "trailingEps": { "raw": 6.08 },
            "earningsQuarterlyGrowth": { "raw": -0.021 },
            "totalCurrentAssets": { "raw": 80.0 }
        },
        "recommendationTrend": {
            "trend": [
                { "period": "0m", "strongBuy": 5, "buy": 20, "hold": 10, "sell": 1, "strongSell": 0 },
                { "period": "-1m", "strongBuy": 4, "buy": 21, "hold": 9, "sell": 0, "strongSell": 1 }
            ]
        }
    })
}

#[test]
fn overview_reads_wrapped_numbers_and_computes_change() {
    let overview = parse_overview(&aapl(), &full_result());
    assert_eq!(overview.name, "Apple Inc.");
    assert_eq!(overview.sector, "Technology");
    assert!((overview.current_price - 110.0).abs() < 1e-9);
    assert!((overview.previous_close - 100.0).abs() < 1e-9);
    assert!((overview.change_percent - 10.0).abs() < 1e-9);
    assert!(overview.error.is_none());
}

#[test]
fn overview_maps_zero_ratios_to_none() {
    let overview = parse_overview(&aapl(), &full_result());
    // trailingPE is zero, so forwardPE is used.
    assert_eq!(overview.pe_ratio, Some(28.46));
    assert_eq!(overview.quick_ratio, None);
    assert_eq!(overview.current_ratio, Some(0.99));
}

#[test]
fn overview_scales_percent_fields() {
    let overview = parse_overview(&aapl(), &full_result());
    assert_eq!(overview.profit_margins, Some(25.31));
    assert_eq!(overview.dividend_yield, Some(0.52));
    assert_eq!(overview.payout_ratio, Some(15.0));
    assert_eq!(overview.earnings_growth, Some(-2.1));
    assert_eq!(overview.return_on_equity, Some(147.0));
    assert_eq!(overview.has_dividend, Some(true));
}

#[test]
fn overview_computes_debt_ratio_against_current_assets() {
    let overview = parse_overview(&aapl(), &full_result());
    assert_eq!(overview.debt_to_current_assets_ratio, Some(125.0));
    assert_eq!(overview.debt_to_assets_ratio, None);
}

#[test]
fn missing_dividend_section_leaves_has_dividend_unknown() {
    let result = json!({ "price": { "regularMarketPrice": 10.0 } });
    let overview = parse_overview(&aapl(), &result);
    assert_eq!(overview.has_dividend, None);
    assert_eq!(overview.name, "AAPL");
    assert_eq!(overview.sector, "N/A");
    assert!(overview.change_percent.abs() < f64::EPSILON);
}

#[test]
fn analyst_counts_sum_every_trend_row() {
    let ratings = parse_analyst(&full_result());
    assert_eq!(ratings.buy_count, 50);
    assert_eq!(ratings.hold_count, 19);
    assert_eq!(ratings.sell_count, 2);
    assert_eq!(ratings.recommendation_key, "buy");
    assert_eq!(ratings.average_price_target, Some(230.12));
    assert_eq!(ratings.high_price_target, None);
}

#[test]
fn analyst_falls_back_to_recommendation_key() {
    let result = json!({
        "financialData": { "recommendationKey": "hold" },
        "recommendationTrend": { "trend": [] }
    });
    let ratings = parse_analyst(&result);
    assert_eq!(ratings.buy_count, 0);
    assert_eq!(ratings.hold_count, 3);
    assert_eq!(ratings.sell_count, 0);
}

#[test]
fn analyst_key_defaults_to_hold() {
    let ratings = parse_analyst(&json!({}));
    assert_eq!(ratings.recommendation_key, "hold");
    assert_eq!(ratings.hold_count, 3);
}

#[test]
fn flat_news_item_is_normalized() {
    let item = json!({
        "title": "Apple unveils new chip",
        "publisher": "Reuters",
        "link": "https://finance.yahoo.com/news/apple-chip",
        "providerPublishTime": 1_714_564_800
    });
    let article = normalize_news_item(&item, 500).unwrap();
    assert_eq!(article.headline, "Apple unveils new chip");
    assert_eq!(article.source, "Reuters");
    assert_eq!(article.url, "https://finance.yahoo.com/news/apple-chip");
    assert_eq!(article.summary, NO_SUMMARY);
    assert_eq!(article.date, 1_714_564_800);
}

#[test]
fn nested_news_item_prefers_content_fields_and_strips_markup() {
    let item = json!({
        "id": "abc",
        "content": {
            "title": "Fed signals patience",
            "summary": "<p>Officials <b>held</b> rates.</p>",
            "pubDate": "2024-05-01T12:00:00Z",
            "provider": { "displayName": "Bloomberg" },
            "canonicalUrl": { "url": "https://example.com/canonical" },
            "clickThroughUrl": { "url": "https://example.com/click" },
            "thumbnail": {
                "originalUrl": "https://img/original.jpg",
                "resolutions": [
                    { "url": "https://img/small.jpg" },
                    { "url": "https://img/large.jpg" }
                ]
            }
        }
    });
    let article = normalize_news_item(&item, 500).unwrap();
    assert_eq!(article.headline, "Fed signals patience");
    assert_eq!(article.summary, "Officials held rates.");
    assert_eq!(article.source, "Bloomberg");
    assert_eq!(article.url, "https://example.com/canonical");
    assert_eq!(article.image.as_deref(), Some("https://img/large.jpg"));
    assert_eq!(article.date, 1_714_564_800);
}

#[test]
fn news_item_without_title_is_dropped() {
    let item = json!({ "content": { "summary": "orphan" } });
    assert!(normalize_news_item(&item, 500).is_none());
}

#[test]
fn market_moving_matches_macro_terms() {
    assert!(is_market_moving("Tariff fears weigh on stocks"));
    assert!(!is_market_moving("Local bakery wins award"));
}
