//! Intent classification for the fallback engine
//!
//! One ordered rule table. [`candidates`] returns every matching intent in
//! priority order so the engine can fall through when a fetch-backed rule
//! comes up empty; [`classify`] is the first candidate.

use once_cell::sync::Lazy;
use regex::Regex;

static GREETING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(hi|hello|hey|yo|howdy|greetings|sup|good (morning|afternoon|evening))\b")
        .expect("static regex compile")
});

static CALC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:calculate|what is) ([0-9\s+\-*/().^]+)").expect("static regex compile")
});

static LIST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:tell me|give me|suggest)(?: a| an)?(?: (\d+))? (.+)")
        .expect("static regex compile")
});

static RANDOM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\brandom\b").expect("static regex compile"));

static HORROR_TOPIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"horror|scary|ghost|haunt").expect("static regex compile"));

static STOCK_SYMBOL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:price of|stock)\s+([A-Za-z.]+)\b").expect("static regex compile")
});

static NEWS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bnews\b").expect("static regex compile"));

static WHERE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bwhere (is|are)\b").expect("static regex compile"));

static COORDINATES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bcoordinates of\b").expect("static regex compile"));

static WHERE_STRIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i).*where (?:is|are)\s*").expect("static regex compile"));

static INTERROGATIVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(who|what|when|where|why|how)\b").expect("static regex compile"));

static BOOK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(book|novel|author|isbn)\b").expect("static regex compile"));

static SUBREDDIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"r/(\w+)").expect("static regex compile"));

/// What a prompt is asking for, with the parameters pulled out of it.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Greeting {
        matched: String,
    },
    Status,
    Time,
    Date,
    Calculation {
        expr: String,
    },
    ListRequest {
        count: usize,
        topic: String,
        random: bool,
        horror: bool,
    },
    StockQuote {
        symbol: String,
    },
    News {
        query: String,
    },
    Location {
        place: String,
    },
    GeneralQuestion {
        query: String,
    },
    BookLookup {
        query: String,
    },
    RedditSearch {
        query: String,
        subreddit: Option<String>,
    },
    Echo,
}

/// Every intent whose trigger matches `prompt`, in priority order. Echo is
/// not included; it is the caller's unconditional fallback.
#[must_use]
pub fn candidates(prompt: &str) -> Vec<Intent> {
    let lower = prompt.to_lowercase();
    let mut out = Vec::new();

    if let Some(m) = GREETING_RE.find(&lower) {
        out.push(Intent::Greeting {
            matched: m.as_str().to_string(),
        });
    }

    if lower.contains("how are you") || lower.contains("how's it going") {
        out.push(Intent::Status);
    }

    // Substring checks, so "sometimes" and "update" trigger these too.
    if lower.contains("time") {
        out.push(Intent::Time);
    }
    if lower.contains("date") {
        out.push(Intent::Date);
    }

    if let Some(caps) = CALC_RE.captures(&lower) {
        out.push(Intent::Calculation {
            expr: caps[1].to_string(),
        });
    }

    if let Some(caps) = LIST_RE.captures(prompt) {
        let count = caps
            .get(1)
            .and_then(|m| m.as_str().parse::<usize>().ok())
            .unwrap_or(1);
        let trimmed = caps[2].trim();
        let topic = trimmed.strip_suffix('?').unwrap_or(trimmed).to_string();
        let horror = HORROR_TOPIC_RE.is_match(&topic.to_lowercase());
        out.push(Intent::ListRequest {
            count,
            topic,
            random: RANDOM_RE.is_match(&lower),
            horror,
        });
    }

    if let Some(caps) = STOCK_SYMBOL_RE.captures(prompt) {
        out.push(Intent::StockQuote {
            symbol: caps[1].to_uppercase(),
        });
    }

    if NEWS_RE.is_match(&lower) {
        out.push(Intent::News {
            query: prompt.to_string(),
        });
    }

    if WHERE_RE.is_match(&lower) || COORDINATES_RE.is_match(&lower) {
        let stripped = WHERE_STRIP_RE.replace(prompt, "");
        let place = stripped.strip_suffix('?').unwrap_or(&stripped);
        out.push(Intent::Location {
            place: place.trim().to_string(),
        });
    }

    if prompt.ends_with('?') || INTERROGATIVE_RE.is_match(&lower) {
        out.push(Intent::GeneralQuestion {
            query: strip_question_mark(prompt),
        });
    }

    if BOOK_RE.is_match(&lower) {
        out.push(Intent::BookLookup {
            query: strip_question_mark(prompt),
        });
    }

    if lower.starts_with("search reddit") || lower.starts_with("reddit") || lower.starts_with("r/")
    {
        // The matched prefixes are ASCII, so slicing the original prompt by
        // their byte length is char-safe.
        let raw = if lower.starts_with("search reddit") {
            prompt["search reddit".len()..].trim()
        } else if lower.starts_with("reddit") {
            prompt["reddit".len()..].trim()
        } else {
            prompt
        };
        let subreddit = SUBREDDIT_RE.captures(raw).map(|caps| caps[1].to_string());
        let query = SUBREDDIT_RE.replace(raw, "").trim().to_string();
        out.push(Intent::RedditSearch { query, subreddit });
    }

    out
}

/// The primary intent: the first matching rule, or Echo.
#[must_use]
pub fn classify(prompt: &str) -> Intent {
    candidates(prompt).into_iter().next().unwrap_or(Intent::Echo)
}

fn strip_question_mark(prompt: &str) -> String {
    prompt.strip_suffix('?').unwrap_or(prompt).trim().to_string()
}
