//! Markdown content classification.
//!
//! Given a page's URL and raw text, decide whether the page should be
//! treated as Markdown and handed to a renderer. The decision is a pure
//! function of its inputs: no hidden state, no counters, no history across
//! calls. Degenerate inputs (empty text, oversized text, unparseable URLs)
//! are policy short-circuits to "not Markdown", never errors.
//!
//! Decision order, short-circuiting:
//!
//! 1. Empty or oversized text fails closed.
//! 2. A recognized Markdown file extension on the URL path is decisive.
//! 3. A Markdown content type (`text/markdown`, `text/x-markdown`) is decisive.
//! 4. Otherwise a pattern heuristic counts independent Markdown cues in the
//!    first lines of the text; enough distinct cues classify the page.
//!
//! ## Examples
//!
//! ```
//! use mdlens_lib::classify::{classify, ClassifyInput, ClassifyLimits, MatchReason};
//! use url::Url;
//!
//! let url = Url::parse("file:///doc.md").unwrap();
//! let input = ClassifyInput::from_text("plain text").with_url(&url);
//! let result = classify(&input, &ClassifyLimits::default());
//!
//! assert!(result.is_markdown);
//! assert_eq!(result.reason, MatchReason::Extension);
//! ```

mod patterns;

pub use patterns::pattern_match_count;

use serde::{Deserialize, Serialize};
use url::Url;

/// File extensions treated as decisive evidence of Markdown.
///
/// `.txt` is deliberately absent: plain-text files go through the content
/// heuristic instead.
pub const MARKDOWN_EXTENSIONS: &[&str] = &[".md", ".markdown", ".mdown", ".mkd", ".mkdn"];

/// Input to a single classification: the page's URL (if one parsed) and its
/// raw text.
///
/// Hosts construct one of these per page load at the boundary; see
/// [`crate::page::PageSnapshot`] for the adapter that does so. A malformed
/// URL becomes `None` here, which fails the extension check closed while
/// leaving the content heuristic available.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyInput<'a> {
    /// The page's navigable address, when it parsed.
    pub url: Option<&'a Url>,
    /// The `Content-Type` the page was served with, when known.
    pub content_type: Option<&'a str>,
    /// The page's plain text as exposed by the host's raw view.
    pub text: &'a str,
}

impl<'a> ClassifyInput<'a> {
    /// Creates an input with text only (no URL, no content type).
    pub fn from_text(text: &'a str) -> Self {
        Self {
            url: None,
            content_type: None,
            text,
        }
    }

    /// Attaches the page URL.
    pub fn with_url(mut self, url: &'a Url) -> Self {
        self.url = Some(url);
        self
    }

    /// Attaches the served content type.
    pub fn with_content_type(mut self, content_type: &'a str) -> Self {
        self.content_type = Some(content_type);
        self
    }
}

/// Limits applied to a single classification.
///
/// An explicit, immutable configuration value passed at call time. The
/// defaults are the viewer's production constants: 1 MiB size cap, a
/// 20-line heuristic window, and a threshold of 2 distinct pattern signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifyLimits {
    /// Texts longer than this are never classified (cost control, fails closed).
    pub max_bytes: usize,
    /// Only this many leading lines are scanned by the pattern heuristic.
    pub max_lines: usize,
    /// Distinct pattern signals required for a heuristic match.
    pub min_pattern_matches: usize,
}

impl Default for ClassifyLimits {
    fn default() -> Self {
        Self {
            max_bytes: 1024 * 1024,
            max_lines: 20,
            min_pattern_matches: 2,
        }
    }
}

/// Why a classification decided the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchReason {
    /// The URL path ends in a recognized Markdown extension.
    Extension,
    /// The page was served as a Markdown content type.
    ContentType,
    /// Enough independent pattern signals matched in the leading lines.
    Heuristic,
    /// Nothing matched, or a short-circuit fired.
    None,
}

/// The outcome of classifying one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Whether the page should be treated as Markdown.
    pub is_markdown: bool,
    /// Which signal decided the classification.
    pub reason: MatchReason,
    /// Distinct heuristic patterns that matched (0 when the heuristic never ran).
    pub pattern_matches: usize,
}

impl Classification {
    fn negative(pattern_matches: usize) -> Self {
        Self {
            is_markdown: false,
            reason: MatchReason::None,
            pattern_matches,
        }
    }

    fn positive(reason: MatchReason, pattern_matches: usize) -> Self {
        Self {
            is_markdown: true,
            reason,
            pattern_matches,
        }
    }
}

/// Classifies a page as Markdown or not.
///
/// Pure and idempotent: identical inputs always produce identical outputs.
/// Never errors and never panics; every degenerate input fails closed to
/// `is_markdown = false`.
///
/// ## Examples
///
/// ```
/// use mdlens_lib::classify::{classify, ClassifyInput, ClassifyLimits, MatchReason};
///
/// // Two distinct signals (heading + bold) reach the default threshold.
/// let input = ClassifyInput::from_text("# Title\n\nSome **bold** text.");
/// let result = classify(&input, &ClassifyLimits::default());
/// assert_eq!(result.reason, MatchReason::Heuristic);
///
/// // Ordinary prose stays plain text.
/// let input = ClassifyInput::from_text("Just a normal sentence with no markup at all.");
/// assert!(!classify(&input, &ClassifyLimits::default()).is_markdown);
/// ```
pub fn classify(input: &ClassifyInput, limits: &ClassifyLimits) -> Classification {
    if input.text.is_empty() {
        return Classification::negative(0);
    }

    // Oversized content is a rendering performance risk, not a correctness
    // question: skip it entirely.
    if input.text.len() > limits.max_bytes {
        tracing::debug!(
            len = input.text.len(),
            max_bytes = limits.max_bytes,
            "content exceeds size limit, skipping classification"
        );
        return Classification::negative(0);
    }

    if let Some(url) = input.url {
        if has_markdown_extension(url) {
            return Classification::positive(MatchReason::Extension, 0);
        }
    }

    if let Some(content_type) = input.content_type {
        if is_markdown_content_type(content_type) {
            return Classification::positive(MatchReason::ContentType, 0);
        }
    }

    let matches = pattern_match_count(leading_lines(input.text, limits.max_lines));
    tracing::trace!(matches, threshold = limits.min_pattern_matches, "heuristic scan");
    if matches >= limits.min_pattern_matches {
        Classification::positive(MatchReason::Heuristic, matches)
    } else {
        Classification::negative(matches)
    }
}

/// Returns true when the URL path ends in a recognized Markdown extension.
///
/// The comparison is against the lower-cased path, so `README.MD` matches.
///
/// ## Examples
///
/// ```
/// use mdlens_lib::classify::has_markdown_extension;
/// use url::Url;
///
/// assert!(has_markdown_extension(&Url::parse("https://x.com/README.md").unwrap()));
/// assert!(!has_markdown_extension(&Url::parse("https://x.com/notes.txt").unwrap()));
/// ```
pub fn has_markdown_extension(url: &Url) -> bool {
    let path = url.path().to_ascii_lowercase();
    MARKDOWN_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Returns true when a `Content-Type` header value indicates Markdown.
pub fn is_markdown_content_type(content_type: &str) -> bool {
    content_type.contains("text/markdown") || content_type.contains("text/x-markdown")
}

/// The first `max_lines` lines of trimmed text, rejoined for pattern scanning.
fn leading_lines(text: &str, max_lines: usize) -> String {
    text.trim()
        .lines()
        .take(max_lines)
        .collect::<Vec<_>>()
        .join("\n")
}
