//! Word-count normalization and counting.
//!
//! The exact pipeline matters: tag-like spans are stripped before whitespace
//! is collapsed, so a removed span can join its neighbors into a single run.

use regex::Regex;
use std::sync::OnceLock;

// Historical tag pattern: `< ...<`, closed by a second `<` rather than `>`.
// Kept as-is; counts produced with a corrected pattern would not be
// comparable to previously collected data.
fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"< ([^>]+)<").expect("tag pattern compiles"))
}

fn whitespace_runs() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern compiles"))
}

/// Strips tag-like spans, collapses whitespace runs to single spaces, and
/// trims the ends.
pub fn normalize(text: &str) -> String {
    let stripped = tag_pattern().replace_all(text, "");
    let collapsed = whitespace_runs().replace_all(&stripped, " ");
    collapsed.trim().to_string()
}

/// Number of whitespace-delimited tokens in `text` after normalization.
pub fn count_words(text: &str) -> u64 {
    let normalized = normalize(text);
    if normalized.is_empty() {
        0
    } else {
        normalized.split(' ').count() as u64
    }
}
