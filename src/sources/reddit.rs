//! Link-aggregator search and listings (Reddit)

use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{BOT_USER_AGENT, get_json};

const DEFAULT_BASE: &str = "https://www.reddit.com/";

/// One post pulled out of a listing payload. `selftext` is empty when the
/// post has no body.
#[derive(Debug, Clone)]
pub struct Post {
    pub subreddit: String,
    pub title: String,
    pub selftext: String,
}

/// Options for [`Reddit::search`]. `subreddit` restricts the search,
/// `sort` is passed through verbatim when present.
#[derive(Debug, Clone, Copy)]
pub struct SearchOpts<'a> {
    pub subreddit: Option<&'a str>,
    pub sort: Option<&'a str>,
    pub limit: u32,
}

#[derive(Clone)]
pub struct Reddit {
    http: Client,
    base: Url,
}

impl Reddit {
    #[must_use]
    pub fn new(http: Client) -> Self {
        Self::with_base(http, Url::parse(DEFAULT_BASE).expect("static base URL"))
    }

    #[must_use]
    pub fn with_base(http: Client, base: Url) -> Self {
        Self { http, base }
    }

    /// Run a search and return its posts, or `None` when the search fails or
    /// comes back empty.
    pub async fn search(&self, query: &str, opts: SearchOpts<'_>) -> Option<Vec<Post>> {
        let path = match opts.subreddit {
            Some(sub) => format!("r/{sub}/search.json"),
            None => "search.json".to_string(),
        };
        let mut url = self.base.join(&path).ok()?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", query);
            if opts.subreddit.is_some() {
                pairs.append_pair("restrict_sr", "1");
            }
            if let Some(sort) = opts.sort {
                pairs.append_pair("sort", sort);
            }
            pairs.append_pair("limit", &opts.limit.to_string());
        }

        let body = match get_json(&self.http, url, Some(BOT_USER_AGENT)).await {
            Ok(body) => body,
            Err(e) => {
                debug!("reddit search failed: {e}");
                return None;
            }
        };
        non_empty(parse_posts(&body))
    }

    /// Front-page posts of one subreddit.
    pub async fn listing(&self, subreddit: &str, limit: u32) -> Option<Vec<Post>> {
        let mut url = self.base.join(&format!("r/{subreddit}.json")).ok()?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());

        let body = match get_json(&self.http, url, Some(BOT_USER_AGENT)).await {
            Ok(body) => body,
            Err(e) => {
                debug!("reddit listing failed: {e}");
                return None;
            }
        };
        non_empty(parse_posts(&body))
    }
}

fn non_empty(posts: Vec<Post>) -> Option<Vec<Post>> {
    if posts.is_empty() { None } else { Some(posts) }
}

/// Pull the posts out of a listing payload, skipping entries that lack a
/// subreddit or title.
#[must_use]
pub fn parse_posts(body: &Value) -> Vec<Post> {
    let Some(children) = body
        .get("data")
        .and_then(|d| d.get("children"))
        .and_then(|c| c.as_array())
    else {
        return Vec::new();
    };

    children
        .iter()
        .filter_map(|child| {
            let data = child.get("data")?;
            Some(Post {
                subreddit: data.get("subreddit").and_then(|v| v.as_str())?.to_string(),
                title: data.get("title").and_then(|v| v.as_str())?.to_string(),
                selftext: data
                    .get("selftext")
                    .and_then(|v| v.as_str())
                    .unwrap_or("")
                    .to_string(),
            })
        })
        .collect()
}
