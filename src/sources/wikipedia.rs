//! Encyclopedia summaries (Wikipedia REST API)

use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::get_json;

const DEFAULT_BASE: &str = "https://en.wikipedia.org/";

/// A page summary with its title and the plain-text extract.
#[derive(Debug, Clone)]
pub struct PageSummary {
    pub title: String,
    pub extract: String,
}

#[derive(Clone)]
pub struct Wikipedia {
    http: Client,
    base: Url,
}

impl Wikipedia {
    #[must_use]
    pub fn new(http: Client) -> Self {
        Self::with_base(http, Url::parse(DEFAULT_BASE).expect("static base URL"))
    }

    #[must_use]
    pub fn with_base(http: Client, base: Url) -> Self {
        Self { http, base }
    }

    /// Plain-text extract for a page title, or `None` when the page does not
    /// exist or the lookup fails.
    pub async fn summary(&self, title: &str) -> Option<String> {
        let path = format!("api/rest_v1/page/summary/{}", urlencoding::encode(title));
        let url = self.base.join(&path).ok()?;
        match get_json(&self.http, url, None).await {
            Ok(body) => parse_summary(&body),
            Err(e) => {
                debug!("wikipedia summary lookup failed: {e}");
                None
            }
        }
    }

    /// Summary of a random page.
    pub async fn random_summary(&self) -> Option<PageSummary> {
        let url = self.base.join("api/rest_v1/page/random/summary").ok()?;
        match get_json(&self.http, url, None).await {
            Ok(body) => parse_page_summary(&body),
            Err(e) => {
                debug!("wikipedia random page lookup failed: {e}");
                None
            }
        }
    }
}

#[must_use]
pub fn parse_summary(body: &Value) -> Option<String> {
    let extract = body.get("extract").and_then(|v| v.as_str())?;
    if extract.is_empty() {
        return None;
    }
    Some(extract.to_string())
}

#[must_use]
pub fn parse_page_summary(body: &Value) -> Option<PageSummary> {
    let title = body.get("title").and_then(|v| v.as_str())?;
    let extract = parse_summary(body)?;
    Some(PageSummary {
        title: title.to_string(),
        extract,
    })
}
