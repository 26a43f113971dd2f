//! Stock quotes (Yahoo Finance)

use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::get_json;

const DEFAULT_BASE: &str = "https://query1.finance.yahoo.com/";

/// Regular-market quote for one symbol.
#[derive(Debug, Clone)]
pub struct Quote {
    pub display_name: String,
    pub price: f64,
    pub change_percent: Option<f64>,
}

#[derive(Clone)]
pub struct Finance {
    http: Client,
    base: Url,
}

impl Finance {
    #[must_use]
    pub fn new(http: Client) -> Self {
        Self::with_base(http, Url::parse(DEFAULT_BASE).expect("static base URL"))
    }

    #[must_use]
    pub fn with_base(http: Client, base: Url) -> Self {
        Self { http, base }
    }

    /// Quote for an uppercased ticker symbol, or `None` when the symbol is
    /// unknown or the lookup fails.
    pub async fn quote(&self, symbol: &str) -> Option<Quote> {
        let mut url = self.base.join("v7/finance/quote").ok()?;
        url.query_pairs_mut().append_pair("symbols", symbol);

        match get_json(&self.http, url, None).await {
            Ok(body) => parse_quote(&body, symbol),
            Err(e) => {
                debug!("quote lookup failed: {e}");
                None
            }
        }
    }
}

/// Extract the first quote from a `quoteResponse` payload. The display name
/// prefers `shortName`, then the payload's own `symbol`, then the requested
/// symbol; a quote without a market price is treated as no result.
#[must_use]
pub fn parse_quote(body: &Value, symbol: &str) -> Option<Quote> {
    let first = body
        .get("quoteResponse")
        .and_then(|q| q.get("result"))
        .and_then(|r| r.as_array())?
        .first()?;

    let price = first.get("regularMarketPrice").and_then(|v| v.as_f64())?;
    let display_name = first
        .get("shortName")
        .and_then(|v| v.as_str())
        .or_else(|| first.get("symbol").and_then(|v| v.as_str()))
        .map_or_else(|| symbol.to_string(), str::to_string);
    let change_percent = first
        .get("regularMarketChangePercent")
        .and_then(|v| v.as_f64());

    Some(Quote {
        display_name,
        price,
        change_percent,
    })
}
