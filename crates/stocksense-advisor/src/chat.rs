//! Canned educational answers used when no generation model is reachable.

struct Topic {
    keywords: &'static [&'static str],
    answer: &'static str,
}

const PE_RATIO: &str = "**P/E Ratio (Price-to-Earnings)**

The P/E ratio compares a stock's price with the company's earnings per share.

**How it works:**
- Formula: Share Price ÷ Earnings Per Share
- Example: a $50 stock with $5 of earnings per share has a P/E of 10

**Reading it:**
- **Under 15-20**: often considered inexpensive, you pay less for each dollar of earnings
- **Over 20-25**: often considered expensive, the market expects strong growth
- Compare against companies in the same industry, since typical levels differ by sector

A low P/E can signal trouble and a high P/E can reflect rapid growth, so always read it alongside \
other metrics. One way to picture it: the P/E is roughly how many years of today's earnings it would \
take to pay back the price.";

const DIVIDENDS: &str = "**Dividends**

Dividends are payments a company makes to shareholders out of its profits.

**Basics:**
- Usually paid quarterly, as cash per share
- Growth companies often reinvest profits instead of paying dividends
- Dividend yield = annual dividend ÷ share price

**Example:** a company paying $1 per share each quarter on a $50 stock has a yield of 8% \
($4 ÷ $50). Owning 100 shares would pay $100 every quarter.

**Things to check:**
- History: long unbroken records of payments suggest stability
- Sustainability: can earnings and cash flow keep covering the payout?

Dividends are never guaranteed and can be cut when a company runs into trouble.";

const MARKET_CAP: &str = "**Market Capitalization (Market Cap)**

Market cap is the total value of all of a company's outstanding shares.

**Formula:** Share Price × Shares Outstanding. A $100 stock with 1 million shares has a $100 million market cap.

**Size categories:**
- **Large cap**: $10 billion and up
- **Mid cap**: $2-10 billion
- **Small cap**: $300 million to $2 billion
- **Micro cap**: under $300 million

Larger companies tend to be more stable but grow more slowly; smaller ones can grow faster with more \
risk. Market cap moves with the share price, so it reflects what investors collectively think the \
company is worth right now.";

const PB_RATIO: &str = "**P/B Ratio (Price-to-Book)**

The P/B ratio compares a stock's price with its book value per share, where book value is total \
assets minus total liabilities.

**Reading it:**
- **Below 1.0**: trades below book value, possibly undervalued
- **1.0-1.5**: close to book value
- **Above 1.5**: priced above book value, either expensive or carrying valuable intangibles

**Example:** a $12 stock with $10 of book value per share has a P/B of 1.2.

P/B is most useful for asset-heavy businesses such as banks, insurers, and manufacturers, and less \
useful for software or brand-driven companies whose value sits in intangibles.";

const CURRENT_RATIO: &str = "**Current Ratio (Liquidity)**

The current ratio measures whether a company can cover its short-term obligations with its \
short-term assets.

**Formula:** Current Assets ÷ Current Liabilities
- Current assets: cash, receivables, and inventory due within a year
- Current liabilities: bills and debt due within a year

**Reading it:**
- **1.5 or higher**: generally healthy
- **Around 1.0**: assets barely cover liabilities
- **Below 1.0**: potential difficulty paying short-term bills

**Example:** $1.5 million of current assets against $1 million of current liabilities gives a ratio \
of 1.5, or $1.50 available for every $1.00 owed. A very high ratio (above 3-4) can mean assets are \
sitting idle.";

const EPS: &str = "**EPS (Earnings Per Share)**

EPS is the company's profit divided by its number of shares.

**Formula:** (Net Income − Preferred Dividends) ÷ Shares Outstanding. $10 million of profit over \
5 million shares is an EPS of $2.00.

**Types:**
- **Trailing EPS**: the last 12 months of actual earnings
- **Forward EPS**: analysts' estimate of the next 12 months

**Using it:**
- Track it over time; steady growth is a good sign
- Compare within an industry
- It is the denominator of the P/E ratio

One-time gains or charges can distort a single period, so look for consistent trends.";

const DEBT: &str = "**Debt and Leverage**

Debt is borrowed money that has to be repaid with interest. Leverage describes how much a company \
relies on it.

**Common measures:**
- **Debt-to-equity**: total debt ÷ shareholders' equity
- **Debt-to-assets**: total debt ÷ total assets
- **Interest coverage**: how easily operating profit pays the interest bill

**A conservative guideline:** total debt below about 110% of current assets, with enough cash flow \
to service it.

Some debt is normal and can fund growth cheaply, but heavy borrowing squeezes profits through \
interest and becomes dangerous in a downturn.";

const STOCK_MARKET: &str = "**How the Stock Market Works**

The stock market is where shares of public companies are bought and sold.

**Key ideas:**
- A **share** is a small slice of ownership in a company
- **Exchanges** such as the NYSE and NASDAQ match buyers with sellers
- Companies first sell shares to the public in an **IPO** to raise money

**Why prices move:**
- Supply and demand: more buyers push prices up, more sellers push them down
- Company results such as earnings and growth
- Economic conditions like interest rates and inflation
- News and overall investor mood

Prices can swing sharply in the short run. Over long periods, patient investing has historically \
done better than trying to time the market.";

const TOPICS: &[Topic] = &[
    Topic {
        keywords: &["pe ratio", "p/e ratio", "price-to-earnings", "price to earnings"],
        answer: PE_RATIO,
    },
    Topic {
        keywords: &["dividend"],
        answer: DIVIDENDS,
    },
    Topic {
        keywords: &["market cap"],
        answer: MARKET_CAP,
    },
    Topic {
        keywords: &["pb ratio", "p/b", "price-to-book", "price to book"],
        answer: PB_RATIO,
    },
    Topic {
        keywords: &["current ratio", "liquidity"],
        answer: CURRENT_RATIO,
    },
    Topic {
        keywords: &["eps", "earnings per share", "earnings"],
        answer: EPS,
    },
    Topic {
        keywords: &["debt", "leverage", "liabilities"],
        answer: DEBT,
    },
    Topic {
        keywords: &["stock market"],
        answer: STOCK_MARKET,
    },
];

const OVERVIEW: &str = "I'm here to help you learn about financial terms and concepts. I can explain:
- Financial terminology such as the P/E ratio, dividends, and market cap
- How markets and financial systems work
- Investment concepts, for educational purposes
- Market news, for context

I can't give buy or sell recommendations.

**Common topics:**
- P/E Ratio (Price-to-Earnings)
- Dividends
- Market Capitalization
- P/B Ratio (Price-to-Book)
- Current Ratio and Liquidity
- EPS (Earnings Per Share)
- Debt and Leverage
- How the Stock Market Works

Which term or concept would you like to learn about?";

const MISSING_KEYS_NOTE: &str = "**Note:** AI API keys are not configured. For full AI-powered \
answers, add ANTHROPIC_API_KEY or OPENAI_API_KEY to the backend .env file.";

/// Match `message` against the topic list, in order, and return its explainer.
///
/// Unmatched messages get a general overview that also points at missing
/// credentials when `generation_configured` is false.
#[must_use]
pub fn canned_answer(message: &str, generation_configured: bool) -> String {
    let lower = message.to_lowercase();
    if let Some(topic) = TOPICS
        .iter()
        .find(|topic| topic.keywords.iter().any(|k| lower.contains(k)))
    {
        return topic.answer.to_string();
    }

    if generation_configured {
        OVERVIEW.to_string()
    } else {
        format!("{OVERVIEW}\n\n{MISSING_KEYS_NOTE}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pe_question_gets_pe_explainer() {
        let answer = canned_answer("What is a P/E ratio?", false);
        assert!(answer.starts_with("**P/E Ratio"));
    }

    #[test]
    fn earlier_topics_win() {
        // mentions both dividends and earnings; dividends is checked first
        let answer = canned_answer("Do dividends come from earnings?", true);
        assert!(answer.starts_with("**Dividends**"));
    }

    #[test]
    fn liquidity_maps_to_current_ratio() {
        assert!(canned_answer("explain LIQUIDITY", true).starts_with("**Current Ratio"));
    }

    #[test]
    fn unknown_question_mentions_keys_only_when_missing() {
        let without = canned_answer("tell me about bonds", false);
        assert!(without.contains("ANTHROPIC_API_KEY"));
        let with = canned_answer("tell me about bonds", true);
        assert!(!with.contains("ANTHROPIC_API_KEY"));
        assert!(with.contains("Common topics"));
    }
}
