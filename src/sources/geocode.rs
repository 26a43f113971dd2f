//! Forward geocoding (Nominatim)

use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{BOT_USER_AGENT, get_json};

const DEFAULT_BASE: &str = "https://nominatim.openstreetmap.org/";

/// Best match for a place query. `lat` and `lon` are the payload's strings
/// and are echoed to the user as-is.
#[derive(Debug, Clone)]
pub struct Place {
    pub display_name: String,
    pub lat: String,
    pub lon: String,
}

#[derive(Clone)]
pub struct Geocoder {
    http: Client,
    base: Url,
}

impl Geocoder {
    #[must_use]
    pub fn new(http: Client) -> Self {
        Self::with_base(http, Url::parse(DEFAULT_BASE).expect("static base URL"))
    }

    #[must_use]
    pub fn with_base(http: Client, base: Url) -> Self {
        Self { http, base }
    }

    /// Best match for a free-form place string, or `None` when nothing
    /// matches or the lookup fails.
    pub async fn lookup(&self, place: &str) -> Option<Place> {
        let mut url = self.base.join("search").ok()?;
        url.query_pairs_mut()
            .append_pair("q", place)
            .append_pair("format", "json")
            .append_pair("limit", "1");

        match get_json(&self.http, url, Some(BOT_USER_AGENT)).await {
            Ok(body) => parse_place(&body),
            Err(e) => {
                debug!("geocode lookup failed: {e}");
                None
            }
        }
    }
}

#[must_use]
pub fn parse_place(body: &Value) -> Option<Place> {
    let first = body.as_array()?.first()?;
    Some(Place {
        display_name: first.get("display_name").and_then(|v| v.as_str())?.to_string(),
        lat: first.get("lat").and_then(|v| v.as_str())?.to_string(),
        lon: first.get("lon").and_then(|v| v.as_str())?.to_string(),
    })
}
