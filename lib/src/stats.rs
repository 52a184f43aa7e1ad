//! Reading statistics for a document.

use crate::render::markdown_options;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use serde::Serialize;

/// Words per minute assumed for the reading-time estimate.
const WORDS_PER_MINUTE: usize = 200;

/// Word and structure counts plus an estimated reading time.
///
/// Words are counted in prose only - code blocks don't read like text and
/// are excluded from the estimate (they are counted separately).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReadingStats {
    pub words: usize,
    pub headings: usize,
    pub code_blocks: usize,
    /// Estimated minutes to read, never less than 1 for non-empty prose.
    pub reading_minutes: usize,
}

impl ReadingStats {
    /// Computes stats from a Markdown source.
    ///
    /// ## Examples
    ///
    /// ```
    /// use mdlens_lib::stats::ReadingStats;
    ///
    /// let stats = ReadingStats::from_markdown("# Title\n\nfour words of prose\n");
    /// assert_eq!(stats.headings, 1);
    /// assert_eq!(stats.words, 5);
    /// assert_eq!(stats.reading_minutes, 1);
    /// ```
    pub fn from_markdown(source: &str) -> Self {
        let mut words = 0;
        let mut headings = 0;
        let mut code_blocks = 0;
        let mut in_code_block = false;

        for event in Parser::new_ext(source, markdown_options()) {
            match event {
                Event::Start(Tag::Heading { .. }) => headings += 1,
                Event::Start(Tag::CodeBlock(_)) => {
                    code_blocks += 1;
                    in_code_block = true;
                }
                Event::End(TagEnd::CodeBlock) => in_code_block = false,
                Event::Text(text) if !in_code_block => {
                    words += text.split_whitespace().count();
                }
                _ => {}
            }
        }

        let reading_minutes = if words == 0 {
            0
        } else {
            words.div_ceil(WORDS_PER_MINUTE)
        };

        Self {
            words,
            headings,
            code_blocks,
            reading_minutes,
        }
    }
}
