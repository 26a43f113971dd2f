//! Reply formatting for the fallback engine
//!
//! Pure functions from fetched data (or clock readings) to the final reply
//! strings. Nothing here touches the network or the random generator.

use std::collections::HashSet;

use chrono::{DateTime, Local};

use crate::sources::finance::Quote;
use crate::sources::geocode::Place;
use crate::sources::openlibrary::Book;
use crate::sources::reddit::Post;
use crate::sources::wikipedia::PageSummary;
use crate::utils::text::{collapse_newlines, ellipsize, first_lines, first_sentences};

/// Longest body excerpt shown for an aggregator post.
const SNIPPET_CHARS: usize = 200;

#[must_use]
pub fn time_reply(now: DateTime<Local>) -> String {
    format!("The current time is {}.", now.format("%-I:%M:%S %p"))
}

#[must_use]
pub fn date_reply(now: DateTime<Local>) -> String {
    format!("Today's date is {}.", now.format("%-m/%-d/%Y"))
}

/// `Result: <value>` with the value rendered the way a JavaScript number
/// prints: shortest round-trip form, no trailing `.0` on integers.
#[must_use]
pub fn calc_reply(value: f64) -> String {
    format!("Result: {value}")
}

#[must_use]
pub fn quote_reply(quote: &Quote) -> String {
    let mut reply = format!("{}: ${}", quote.display_name, quote.price);
    if let Some(pct) = quote.change_percent {
        if pct != 0.0 {
            reply.push_str(&format!(" ({pct:.2}% )"));
        }
    }
    reply
}

#[must_use]
pub fn place_reply(place: &Place) -> String {
    format!(
        "{} (lat: {}, lon: {})",
        place.display_name, place.lat, place.lon
    )
}

#[must_use]
pub fn news_reply(posts: &[Post]) -> String {
    let titles: Vec<&str> = posts.iter().map(|post| post.title.as_str()).collect();
    format!("News results:\n{}", titles.join("\n"))
}

#[must_use]
pub fn book_reply(books: &[Book]) -> String {
    let lines: Vec<String> = books.iter().map(book_line).collect();
    format!("Book results:\n{}", lines.join("\n"))
}

fn book_line(book: &Book) -> String {
    let mut line = book.title.clone();
    if !book.author_names.is_empty() {
        line.push_str(&format!(" by {}", book.author_names.join(", ")));
    }
    if let Some(year) = book.first_publish_year {
        line.push_str(&format!(" ({year})"));
    }
    line
}

/// One aggregator post as `r/<sub>: <title>`, with a truncated body excerpt
/// indented underneath when the post has one.
#[must_use]
pub fn post_line(post: &Post) -> String {
    let mut line = post.title.clone();
    if !post.selftext.is_empty() {
        line.push_str("\n  ");
        line.push_str(&ellipsize(
            &collapse_newlines(&post.selftext),
            SNIPPET_CHARS,
        ));
    }
    format!("r/{}: {}", post.subreddit, line)
}

#[must_use]
pub fn reddit_reply(posts: &[Post]) -> String {
    let lines: Vec<String> = posts.iter().map(post_line).collect();
    format!("Reddit results:\n{}", lines.join("\n---\n"))
}

/// One encyclopedia page as a list item: label, title, and the first two
/// sentences of the extract.
#[must_use]
pub fn wiki_list_item(page: &PageSummary) -> String {
    format!(
        "(wiki) {}: {}...",
        page.title,
        first_sentences(&page.extract, 2)
    )
}

/// The list-request reply: a header counting what is shown, the topic, the
/// distinct source labels in first-use order, then the items separated by
/// `---` lines. At most `count` items are shown; the verb agrees with the
/// requested count while the plural agrees with what was actually gathered.
#[must_use]
pub fn list_reply(count: usize, topic: &str, sources_used: &[&str], items: &[String]) -> String {
    let mut seen = HashSet::new();
    let labels: Vec<&str> = sources_used
        .iter()
        .filter(|label| seen.insert(**label))
        .copied()
        .collect();

    let verb = if count > 1 { "are" } else { "is" };
    let plural = if items.len() > 1 { "s" } else { "" };
    let shown: Vec<&str> = items
        .iter()
        .take(count)
        .map(String::as_str)
        .collect();

    format!(
        "Here {verb} {n} item{plural} for \"{topic}\" (searched {labels}):\n{body}",
        n = items.len().min(count),
        labels = labels.join(", "),
        body = shown.join("\n---\n"),
    )
}

/// An encyclopedia extract, enriched with an aggregator snippet when any
/// posts came back: the first post body (first three lines), or all titles
/// joined by ` | ` when no post has a body.
#[must_use]
pub fn question_reply(extract: &str, posts: &[Post]) -> String {
    if posts.is_empty() {
        return extract.to_string();
    }

    let snippet = match posts.iter().find(|post| !post.selftext.trim().is_empty()) {
        Some(post) => first_lines(post.selftext.trim(), 3),
        None => {
            let titles: Vec<&str> = posts.iter().map(|post| post.title.as_str()).collect();
            titles.join(" | ")
        }
    };

    format!(
        "{extract}\n\n(reddit: {})",
        ellipsize(&collapse_newlines(&snippet), SNIPPET_CHARS)
    )
}

#[must_use]
pub fn echo_reply(prompt: &str) -> String {
    format!("Echo: {prompt}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post(subreddit: &str, title: &str, selftext: &str) -> Post {
        Post {
            subreddit: subreddit.to_string(),
            title: title.to_string(),
            selftext: selftext.to_string(),
        }
    }

    #[test]
    fn test_time_reply_uses_twelve_hour_clock() {
        let afternoon = Local.with_ymd_and_hms(2026, 8, 22, 15, 45, 7).unwrap();
        assert_eq!(time_reply(afternoon), "The current time is 3:45:07 PM.");

        let morning = Local.with_ymd_and_hms(2026, 8, 22, 9, 5, 0).unwrap();
        assert_eq!(time_reply(morning), "The current time is 9:05:00 AM.");
    }

    #[test]
    fn test_date_reply_has_no_zero_padding() {
        let day = Local.with_ymd_and_hms(2026, 8, 2, 0, 0, 0).unwrap();
        assert_eq!(date_reply(day), "Today's date is 8/2/2026.");
    }

    #[test]
    fn test_calc_reply_renders_integers_without_fraction() {
        assert_eq!(calc_reply(4.0), "Result: 4");
        assert_eq!(calc_reply(-4.0), "Result: -4");
        assert_eq!(calc_reply(0.25), "Result: 0.25");
        assert_eq!(calc_reply(0.1 + 0.2), "Result: 0.30000000000000004");
    }

    #[test]
    fn test_quote_reply_includes_change_only_when_nonzero() {
        let quote = Quote {
            display_name: "Apple Inc.".to_string(),
            price: 150.0,
            change_percent: Some(1.23),
        };
        assert_eq!(quote_reply(&quote), "Apple Inc.: $150 (1.23% )");

        let flat = Quote {
            change_percent: Some(0.0),
            ..quote.clone()
        };
        assert_eq!(quote_reply(&flat), "Apple Inc.: $150");

        let unknown = Quote {
            change_percent: None,
            price: 150.5,
            ..quote
        };
        assert_eq!(quote_reply(&unknown), "Apple Inc.: $150.5");
    }

    #[test]
    fn test_place_reply_echoes_raw_coordinates() {
        let place = Place {
            display_name: "Berlin, Deutschland".to_string(),
            lat: "52.5170365".to_string(),
            lon: "13.3888599".to_string(),
        };
        assert_eq!(
            place_reply(&place),
            "Berlin, Deutschland (lat: 52.5170365, lon: 13.3888599)"
        );
    }

    #[test]
    fn test_post_line_truncates_long_bodies() {
        let body = "x".repeat(250);
        let line = post_line(&post("rust", "A post", &body));
        let expected = format!("r/rust: A post\n  {}...", "x".repeat(200));
        assert_eq!(line, expected);
    }

    #[test]
    fn test_post_line_flattens_newlines_and_skips_empty_bodies() {
        let line = post_line(&post("rust", "A post", "line one\nline two"));
        assert_eq!(line, "r/rust: A post\n  line one line two");

        let bare = post_line(&post("rust", "A post", ""));
        assert_eq!(bare, "r/rust: A post");
    }

    #[test]
    fn test_reddit_reply_separates_posts_with_rules() {
        let posts = vec![post("a", "first", ""), post("b", "second", "")];
        assert_eq!(
            reddit_reply(&posts),
            "Reddit results:\nr/a: first\n---\nr/b: second"
        );
    }

    #[test]
    fn test_news_reply_lists_titles_only() {
        let posts = vec![post("news", "headline one", "body"), post("news", "headline two", "")];
        assert_eq!(news_reply(&posts), "News results:\nheadline one\nheadline two");
    }

    #[test]
    fn test_book_reply_renders_optional_fields() {
        let books = vec![
            Book {
                title: "Dune".to_string(),
                author_names: vec!["Frank Herbert".to_string()],
                first_publish_year: Some(1965),
            },
            Book {
                title: "Anonymous Work".to_string(),
                author_names: Vec::new(),
                first_publish_year: None,
            },
        ];
        assert_eq!(
            book_reply(&books),
            "Book results:\nDune by Frank Herbert (1965)\nAnonymous Work"
        );
    }

    #[test]
    fn test_wiki_list_item_keeps_two_sentences() {
        let page = PageSummary {
            title: "Dracula".to_string(),
            extract: "A novel. A classic. A long story.".to_string(),
        };
        assert_eq!(
            wiki_list_item(&page),
            "(wiki) Dracula: A novel. A classic..."
        );
    }

    #[test]
    fn test_list_reply_header_grammar() {
        let items = vec!["one".to_string()];
        assert_eq!(
            list_reply(1, "joke", &["reddit"], &items),
            "Here is 1 item for \"joke\" (searched reddit):\none"
        );

        let items = vec!["one".to_string(), "two".to_string()];
        assert_eq!(
            list_reply(3, "jokes", &["reddit"], &items),
            "Here are 2 items for \"jokes\" (searched reddit):\none\n---\ntwo"
        );
    }

    #[test]
    fn test_list_reply_verb_and_plural_can_disagree() {
        // The verb follows the requested count, the plural follows what was
        // actually gathered.
        let items = vec!["one".to_string()];
        assert_eq!(
            list_reply(3, "jokes", &["reddit"], &items),
            "Here are 1 item for \"jokes\" (searched reddit):\none"
        );

        let items = vec!["one".to_string(), "two".to_string()];
        assert_eq!(
            list_reply(1, "stories", &["wiki", "reddit"], &items),
            "Here is 1 items for \"stories\" (searched wiki, reddit):\none"
        );
    }

    #[test]
    fn test_list_reply_truncates_items_and_dedupes_labels() {
        let items = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let reply = list_reply(2, "stories", &["wiki", "wiki", "reddit"], &items);
        assert_eq!(
            reply,
            "Here are 2 items for \"stories\" (searched wiki, reddit):\na\n---\nb"
        );
    }

    #[test]
    fn test_question_reply_prefers_post_bodies() {
        let posts = vec![
            post("a", "no body here", ""),
            post("b", "has body", "  first\nsecond\nthird\nfourth  "),
        ];
        assert_eq!(
            question_reply("An extract.", &posts),
            "An extract.\n\n(reddit: first second third)"
        );
    }

    #[test]
    fn test_question_reply_falls_back_to_titles() {
        let posts = vec![post("a", "one", ""), post("b", "two", "   ")];
        assert_eq!(
            question_reply("An extract.", &posts),
            "An extract.\n\n(reddit: one | two)"
        );
    }

    #[test]
    fn test_question_reply_without_posts_is_the_extract() {
        assert_eq!(question_reply("An extract.", &[]), "An extract.");
    }

    #[test]
    fn test_echo_reply() {
        assert_eq!(echo_reply("anything"), "Echo: anything");
    }
}
