//! YAML frontmatter handling.
//!
//! A leading `---` fence is ambiguous: it can open frontmatter or be a
//! horizontal rule (the classifier's pattern set treats it as either on
//! purpose). Before rendering or slide segmentation the document pipeline
//! splits frontmatter off, so a metadata block never masquerades as a slide
//! delimiter. Anything malformed - an unterminated fence, YAML that does not
//! parse - is treated as ordinary content rather than an error.

use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Parsed frontmatter fields with typed access.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter(HashMap<String, serde_json::Value>);

impl Frontmatter {
    /// Gets a typed value, `None` when the key is absent or the wrong shape.
    ///
    /// ## Examples
    ///
    /// ```
    /// use mdlens_lib::frontmatter::split_frontmatter;
    ///
    /// let (fm, rest) = split_frontmatter("---\ntitle: Notes\n---\nbody");
    /// let fm = fm.unwrap();
    /// assert_eq!(fm.get::<String>("title"), Some("Notes".to_string()));
    /// assert_eq!(rest, "body");
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.0
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Returns true if no fields were parsed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of frontmatter fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Splits leading YAML frontmatter from a document.
///
/// Frontmatter must start on the very first line with `---` and close with a
/// matching `---` line. Returns the parsed fields (if any) and the remaining
/// content as a borrow of the input.
pub fn split_frontmatter(content: &str) -> (Option<Frontmatter>, &str) {
    let mut lines = content.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return (None, content);
    };
    if first.trim_end() != "---" {
        return (None, content);
    }

    let mut offset = first.len();
    let yaml_start = offset;
    for line in lines {
        if line.trim_end() == "---" {
            let yaml = &content[yaml_start..offset];
            let rest = &content[offset + line.len()..];
            return match parse_yaml(yaml) {
                Some(frontmatter) => (Some(frontmatter), rest),
                // Unparseable YAML: keep the whole document as content.
                None => (None, content),
            };
        }
        offset += line.len();
    }

    // No closing fence.
    (None, content)
}

fn parse_yaml(yaml: &str) -> Option<Frontmatter> {
    if yaml.trim().is_empty() {
        return Some(Frontmatter::default());
    }
    serde_yaml::from_str::<HashMap<String, serde_json::Value>>(yaml)
        .ok()
        .map(Frontmatter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_document_passes_through() {
        let (fm, rest) = split_frontmatter("# Title\n\nbody");
        assert!(fm.is_none());
        assert_eq!(rest, "# Title\n\nbody");
    }

    #[test]
    fn frontmatter_is_split_off() {
        let doc = "---\ntitle: Hello\ncount: 3\n---\n# Body\n";
        let (fm, rest) = split_frontmatter(doc);
        let fm = fm.unwrap();
        assert_eq!(fm.len(), 2);
        assert_eq!(fm.get::<u32>("count"), Some(3));
        assert_eq!(rest, "# Body\n");
    }

    #[test]
    fn unterminated_fence_is_content() {
        let doc = "---\ntitle: Hello\n# Body";
        let (fm, rest) = split_frontmatter(doc);
        assert!(fm.is_none());
        assert_eq!(rest, doc);
    }

    #[test]
    fn unparseable_yaml_is_content() {
        let doc = "---\n: [: bad\n---\nbody";
        let (fm, rest) = split_frontmatter(doc);
        assert!(fm.is_none());
        assert_eq!(rest, doc);
    }

    #[test]
    fn empty_frontmatter_block() {
        let (fm, rest) = split_frontmatter("---\n---\nbody");
        assert!(fm.unwrap().is_empty());
        assert_eq!(rest, "body");
    }

    #[test]
    fn frontmatter_does_not_feed_slide_segmentation() {
        use crate::slides::is_presentable;
        let doc = "---\ntitle: Deck?\n---\nJust prose, one fragment.";
        let (_, rest) = split_frontmatter(doc);
        assert!(!is_presentable(rest));
    }
}
