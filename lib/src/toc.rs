//! Table of contents extraction.
//!
//! Walks the parse tree and collects headings with their level, text, and a
//! URL-safe slug matching the anchors a renderer would emit.
//!
//! ## Examples
//!
//! ```
//! use mdlens_lib::toc::Toc;
//!
//! let toc = Toc::from_markdown("# Introduction\n\n## Getting Started\n");
//! assert_eq!(toc.heading_count(), 2);
//! assert_eq!(toc.title(), Some("Introduction"));
//! assert_eq!(toc.entries[1].slug, "getting-started");
//! ```

use crate::render::markdown_options;
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use serde::Serialize;

/// One heading in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Heading depth, 1-6.
    pub level: u8,
    /// The heading's text content.
    pub title: String,
    /// URL-safe anchor slug.
    pub slug: String,
}

/// The document's headings in order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Toc {
    pub entries: Vec<TocEntry>,
}

impl Toc {
    /// Extracts the table of contents from a Markdown source.
    pub fn from_markdown(source: &str) -> Self {
        let mut entries = Vec::new();
        let mut current: Option<(u8, String)> = None;

        for event in Parser::new_ext(source, markdown_options()) {
            match event {
                Event::Start(Tag::Heading { level, .. }) => {
                    current = Some((heading_level_to_u8(level), String::new()));
                }
                Event::Text(text) | Event::Code(text) => {
                    if let Some((_, title)) = current.as_mut() {
                        title.push_str(&text);
                    }
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some((level, title)) = current.take() {
                        let slug = generate_slug(&title);
                        entries.push(TocEntry { level, title, slug });
                    }
                }
                _ => {}
            }
        }

        Self { entries }
    }

    /// Number of headings.
    pub fn heading_count(&self) -> usize {
        self.entries.len()
    }

    /// Text of the first level-1 heading, if any.
    pub fn title(&self) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.level == 1)
            .map(|entry| entry.title.as_str())
    }
}

/// Generates a URL-safe slug from heading text: lowercase, hyphens for
/// separators, everything else dropped, runs of hyphens collapsed.
fn generate_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if (c.is_whitespace() || c == '-' || c == '_') && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

fn heading_level_to_u8(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_headings_in_order() {
        let toc = Toc::from_markdown("# One\n\ntext\n\n## Two\n\n### Three\n");
        let levels: Vec<u8> = toc.entries.iter().map(|e| e.level).collect();
        assert_eq!(levels, vec![1, 2, 3]);
    }

    #[test]
    fn title_is_first_h1() {
        let toc = Toc::from_markdown("## Early but deep\n\n# The Title\n");
        assert_eq!(toc.title(), Some("The Title"));
    }

    #[test]
    fn no_h1_means_no_title() {
        let toc = Toc::from_markdown("## Only level two\n");
        assert_eq!(toc.title(), None);
        assert_eq!(toc.heading_count(), 1);
    }

    #[test]
    fn slugs_are_url_safe() {
        assert_eq!(generate_slug("Getting Started"), "getting-started");
        assert_eq!(generate_slug("What's New in 2.0?"), "whats-new-in-20");
        assert_eq!(generate_slug("--edges--"), "edges");
    }

    #[test]
    fn inline_code_in_headings_is_kept() {
        let toc = Toc::from_markdown("## The `classify` function\n");
        assert_eq!(toc.entries[0].title, "The classify function");
        assert_eq!(toc.entries[0].slug, "the-classify-function");
    }
}
