//! Public REST data sources used by the fallback rule engine
//!
//! Each adapter wraps one upstream API. Fetches return `Option`: transport
//! errors, non-success statuses, undecodable bodies, and empty result sets
//! all collapse to `None`, which the rule engine treats as "this rule has no
//! answer".

pub mod finance;
pub mod geocode;
pub mod openlibrary;
pub mod reddit;
pub mod wikipedia;

use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::errors::RelayError;

// Re-export the adapters for convenience
pub use finance::Finance;
pub use geocode::Geocoder;
pub use openlibrary::OpenLibrary;
pub use reddit::Reddit;
pub use wikipedia::Wikipedia;

/// Product token sent to upstreams that require an identifying User-Agent.
pub const BOT_USER_AGENT: &str = "ParleyBot/1.0";

/// All fallback data sources, bundled for the rule engine.
#[derive(Clone)]
pub struct Sources {
    pub wikipedia: Wikipedia,
    pub reddit: Reddit,
    pub finance: Finance,
    pub geocoder: Geocoder,
    pub openlibrary: OpenLibrary,
}

impl Sources {
    #[must_use]
    pub fn new(http: Client) -> Self {
        Self {
            wikipedia: Wikipedia::new(http.clone()),
            reddit: Reddit::new(http.clone()),
            finance: Finance::new(http.clone()),
            geocoder: Geocoder::new(http.clone()),
            openlibrary: OpenLibrary::new(http),
        }
    }
}

pub(crate) async fn get_json(
    http: &Client,
    url: Url,
    user_agent: Option<&str>,
) -> Result<Value, RelayError> {
    let mut request = http.get(url);
    if let Some(ua) = user_agent {
        request = request.header(reqwest::header::USER_AGENT, ua);
    }

    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(RelayError::HttpError(format!("status {status}")));
    }

    Ok(response.json::<Value>().await?)
}
