//! Book catalog search (OpenLibrary)

use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::get_json;

const DEFAULT_BASE: &str = "https://openlibrary.org/";

#[derive(Debug, Clone)]
pub struct Book {
    pub title: String,
    pub author_names: Vec<String>,
    pub first_publish_year: Option<i64>,
}

#[derive(Clone)]
pub struct OpenLibrary {
    http: Client,
    base: Url,
}

impl OpenLibrary {
    #[must_use]
    pub fn new(http: Client) -> Self {
        Self::with_base(http, Url::parse(DEFAULT_BASE).expect("static base URL"))
    }

    #[must_use]
    pub fn with_base(http: Client, base: Url) -> Self {
        Self { http, base }
    }

    /// Catalog matches for a free-form query, or `None` when nothing matches
    /// or the lookup fails.
    pub async fn search(&self, query: &str, limit: u32) -> Option<Vec<Book>> {
        let mut url = self.base.join("search.json").ok()?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("limit", &limit.to_string());

        let body = match get_json(&self.http, url, None).await {
            Ok(body) => body,
            Err(e) => {
                debug!("book search failed: {e}");
                return None;
            }
        };

        let books = parse_books(&body);
        if books.is_empty() { None } else { Some(books) }
    }
}

/// Extract docs from a search payload, skipping docs without a title.
/// Authors and publish year stay optional.
#[must_use]
pub fn parse_books(body: &Value) -> Vec<Book> {
    let Some(docs) = body.get("docs").and_then(|d| d.as_array()) else {
        return Vec::new();
    };

    docs.iter()
        .filter_map(|doc| {
            let title = doc.get("title").and_then(|v| v.as_str())?;
            let author_names = doc
                .get("author_name")
                .and_then(|v| v.as_array())
                .map(|names| {
                    names
                        .iter()
                        .filter_map(|n| n.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default();
            Some(Book {
                title: title.to_string(),
                author_names,
                first_publish_year: doc.get("first_publish_year").and_then(|v| v.as_i64()),
            })
        })
        .collect()
}
