//! The Markdown pattern set behind the content heuristic.
//!
//! Twelve independent, stateless predicates. Each is tested once against the
//! scan window; the count of distinct predicates that matched is the
//! confidence signal. Bold and italic deliberately overlap (`**bold**`
//! satisfies both), and stray `*` or `_` in prose can fire the emphasis
//! patterns - the threshold absorbs that imprecision, this is not a grammar
//! check.

use regex::Regex;
use std::sync::LazyLock;

/// The fixed predicate set, compiled once.
static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // ATX heading: 1-6 `#` then whitespace and text
        r"(?m)^#{1,6}\s+.+",
        // Horizontal rule: exactly `---`, or 3+ `*`, alone on a line
        r"(?m)^(?:---|\*{3,})\s*$",
        // Fenced code-block opener, optionally with a language token
        r"(?m)^```\w*\s*$",
        // Unordered list item
        r"(?m)^\s*[-*+]\s+.+",
        // Ordered list item
        r"(?m)^\s*\d+\.\s+.+",
        // Link: [text](url)
        r"\[.+\]\(.+\)",
        // Image: ![alt](url)
        r"!\[.*\]\(.+\)",
        // Blockquote
        r"(?m)^\s*>\s+.+",
        // Bold: **text** or __text__
        r"\*\*.+\*\*|__.+__",
        // Italic: *text* or _text_ (overlaps bold by design)
        r"\*.+\*|_.+_",
        // Inline code span
        r"`[^`]+`",
        // Table row: at least three pipe-separated cells
        r"(?m)^\|.+\|.+\|",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("markdown patterns are statically valid"))
    .collect()
});

/// Counts how many distinct patterns match anywhere in the scan window.
pub fn pattern_match_count(window: impl AsRef<str>) -> usize {
    let window = window.as_ref();
    PATTERNS.iter().filter(|re| re.is_match(window)).count()
}
