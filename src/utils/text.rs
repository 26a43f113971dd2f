/// Truncate `s` to at most `max_chars` characters, appending `...` when
/// anything was cut off. Counts characters, not bytes, so multi-byte input
/// never splits mid-character.
#[must_use]
pub fn ellipsize(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

/// First `n` lines of `s`, joined by single spaces.
#[must_use]
pub fn first_lines(s: &str, n: usize) -> String {
    s.lines().take(n).collect::<Vec<_>>().join(" ")
}

/// First `n` sentences of `s`, splitting naively on `.` and keeping the
/// original separators between the sentences that survive.
#[must_use]
pub fn first_sentences(s: &str, n: usize) -> String {
    s.split('.').take(n).collect::<Vec<_>>().join(".")
}

/// Replace every newline with a space.
#[must_use]
pub fn collapse_newlines(s: &str) -> String {
    s.replace('\n', " ")
}
