//! The fallback rule engine
//!
//! Classifies the prompt, then walks the matching intents in priority order.
//! Fetch-backed intents that come up empty yield to the next candidate, and
//! an echo of the prompt terminates the chain.

use chrono::Local;
use once_cell::sync::Lazy;
use rand::seq::IndexedRandom;
use rand::Rng;
use regex::Regex;

use crate::rules::calc;
use crate::rules::compose;
use crate::rules::intent::{self, Intent};
use crate::sources::reddit::SearchOpts;
use crate::sources::Sources;

const GREETINGS: [&str; 7] = [
    "Hello there! 😊",
    "Hey! How's it going? 👋",
    "Hiya! 👋 What's up?",
    "Greetings! 🤖",
    "Yo! Ready to chat? 😄",
    "Howdy partner! 🤠",
    "Hi! Hope you're having a great day! 🌟",
];

const STATUS_REPLIES: [&str; 4] = [
    "I'm just a bit of code, but I'm doing fine! ⚙️",
    "Great, thanks for asking! ✨",
    "Running smoothly – how about you? 😄",
    "All systems operational. ✅",
];

/// Chance of mirroring the user's greeting back at them.
const MIRROR_GREETING_P: f64 = 0.3;

static HORROR_EXTRACT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"horror|ghost|death|scary").expect("static regex compile"));

/// Wiki attempts per list request before giving up on random pages.
const RANDOM_PAGE_ATTEMPTS: usize = 5;

/// Answers prompts without an LLM, using canned text and public data sources.
#[derive(Clone)]
pub struct RuleEngine {
    sources: Sources,
}

impl RuleEngine {
    #[must_use]
    pub fn new(sources: Sources) -> Self {
        Self { sources }
    }

    /// Produce a reply for `prompt`. Never fails: the echo intent catches
    /// everything no other rule answered.
    pub async fn respond<R: Rng>(&self, prompt: &str, rng: &mut R) -> String {
        let trimmed = prompt.trim();
        for candidate in intent::candidates(trimmed) {
            if let Some(reply) = self.dispatch(&candidate, rng).await {
                return reply;
            }
        }
        compose::echo_reply(trimmed)
    }

    /// One intent's answer, or `None` when its data source had nothing.
    async fn dispatch<R: Rng>(&self, candidate: &Intent, rng: &mut R) -> Option<String> {
        match candidate {
            Intent::Greeting { matched } => Some(greeting_reply(matched, rng)),
            Intent::Status => STATUS_REPLIES.choose(rng).map(|reply| (*reply).to_string()),
            Intent::Time => Some(compose::time_reply(Local::now())),
            Intent::Date => Some(compose::date_reply(Local::now())),
            Intent::Calculation { expr } => calc::evaluate(expr).map(compose::calc_reply),
            Intent::ListRequest {
                count,
                topic,
                random,
                horror,
            } => {
                self.list_items(*count, topic, *random, *horror, rng)
                    .await
            }
            Intent::StockQuote { symbol } => {
                let quote = self.sources.finance.quote(symbol).await?;
                Some(compose::quote_reply(&quote))
            }
            Intent::News { query } => {
                let opts = SearchOpts {
                    subreddit: Some("news"),
                    sort: Some("top"),
                    limit: 3,
                };
                let posts = self.sources.reddit.search(query, opts).await?;
                Some(compose::news_reply(&posts))
            }
            Intent::Location { place } => {
                let found = self.sources.geocoder.lookup(place).await?;
                Some(compose::place_reply(&found))
            }
            Intent::GeneralQuestion { query } => {
                let extract = self.sources.wikipedia.summary(query).await?;
                let opts = SearchOpts {
                    subreddit: None,
                    sort: Some("top"),
                    limit: 3,
                };
                let posts = self
                    .sources
                    .reddit
                    .search(query, opts)
                    .await
                    .unwrap_or_default();
                Some(compose::question_reply(&extract, &posts))
            }
            Intent::BookLookup { query } => {
                let books = self.sources.openlibrary.search(query, 3).await?;
                Some(compose::book_reply(&books))
            }
            Intent::RedditSearch { query, subreddit } => {
                self.reddit_results(query, subreddit.as_deref()).await
            }
            Intent::Echo => None,
        }
    }

    /// Gather labeled list items: random encyclopedia pages first for random
    /// horror requests, then an aggregator search over the topic.
    async fn list_items<R: Rng>(
        &self,
        count: usize,
        topic: &str,
        random: bool,
        horror: bool,
        rng: &mut R,
    ) -> Option<String> {
        let mut sources_used: Vec<&str> = Vec::new();
        let mut accumulated: Vec<String> = Vec::new();

        if horror && random {
            for _ in 0..RANDOM_PAGE_ATTEMPTS {
                if accumulated.len() >= count {
                    break;
                }
                let Some(page) = self.sources.wikipedia.random_summary().await else {
                    continue;
                };
                if HORROR_EXTRACT_RE.is_match(&page.extract.to_lowercase()) {
                    accumulated.push(compose::wiki_list_item(&page));
                    sources_used.push("wiki");
                }
            }
        }

        let opts = SearchOpts {
            subreddit: None,
            sort: horror.then(|| if random { "new" } else { "top" }),
            limit: 50,
        };
        if let Some(posts) = self.sources.reddit.search(topic, opts).await {
            let mut items: Vec<String> = posts.iter().map(compose::post_line).collect();
            if random {
                for _ in 0..count {
                    if items.is_empty() {
                        break;
                    }
                    let picked = items.remove(rng.random_range(0..items.len()));
                    accumulated.push(format!("(reddit) {picked}"));
                }
            } else {
                accumulated.extend(
                    items
                        .into_iter()
                        .take(count)
                        .map(|item| format!("(reddit) {item}")),
                );
            }
            sources_used.push("reddit");
        }

        if accumulated.is_empty() {
            return None;
        }
        Some(compose::list_reply(count, topic, &sources_used, &accumulated))
    }

    /// Explicit aggregator lookups: a bare subreddit gets its listing, any
    /// query goes through search (falling back to the subreddit name as the
    /// query when the rest of the prompt was empty).
    async fn reddit_results(&self, query: &str, subreddit: Option<&str>) -> Option<String> {
        let posts = match subreddit {
            Some(sub) if query.is_empty() => self.sources.reddit.listing(sub, 5).await?,
            _ => {
                let q = if query.is_empty() {
                    subreddit.unwrap_or("")
                } else {
                    query
                };
                let opts = SearchOpts {
                    subreddit: None,
                    sort: None,
                    limit: 5,
                };
                self.sources.reddit.search(q, opts).await?
            }
        };
        Some(compose::reddit_reply(&posts))
    }
}

fn greeting_reply<R: Rng>(matched: &str, rng: &mut R) -> String {
    let mut reply = GREETINGS.choose(rng).copied().unwrap_or(GREETINGS[0]).to_string();
    if rng.random_bool(MIRROR_GREETING_P) {
        reply.push_str(&format!(" You said \"{matched}\"."));
    }
    reply
}
