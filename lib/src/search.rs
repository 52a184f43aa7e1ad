//! In-document text search.
//!
//! Case-insensitive literal matching: the query is regex-escaped before it
//! compiles, so `a.b?` finds those exact characters, not a pattern.

use regex::RegexBuilder;
use serde::Serialize;

/// One match: byte offsets into the searched text plus a 1-based line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchMatch {
    pub start: usize,
    pub end: usize,
    pub line: usize,
}

/// Finds every occurrence of `query` in `text`, case-insensitively.
///
/// Empty queries match nothing.
///
/// ## Examples
///
/// ```
/// use mdlens_lib::search::find_matches;
///
/// let matches = find_matches("Alpha\nbeta ALPHA", "alpha");
/// assert_eq!(matches.len(), 2);
/// assert_eq!(matches[1].line, 2);
/// ```
pub fn find_matches(text: &str, query: &str) -> Vec<SearchMatch> {
    if query.is_empty() {
        return Vec::new();
    }
    let Ok(re) = RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    else {
        return Vec::new();
    };

    re.find_iter(text)
        .map(|m| SearchMatch {
            start: m.start(),
            end: m.end(),
            line: text[..m.start()].matches('\n').count() + 1,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_metacharacters_match_themselves() {
        let matches = find_matches("is a.b? maybe a-b!", "a.b?");
        assert_eq!(matches.len(), 1);
        assert_eq!(&"is a.b? maybe a-b!"[matches[0].start..matches[0].end], "a.b?");
    }

    #[test]
    fn empty_query_matches_nothing() {
        assert!(find_matches("anything", "").is_empty());
    }

    #[test]
    fn lines_are_one_based() {
        let matches = find_matches("x\ny\nneedle", "needle");
        assert_eq!(matches[0].line, 3);
    }
}
