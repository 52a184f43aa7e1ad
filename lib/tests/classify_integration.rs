//! Integration tests for the classification path: the snapshot adapter,
//! the plain-text-view gate, and the classifier together.

use mdlens_lib::classify::{ClassifyInput, ClassifyLimits, MatchReason, classify};
use mdlens_lib::page::{PageBody, PageSnapshot};
use url::Url;

fn limits() -> ClassifyLimits {
    ClassifyLimits::default()
}

#[test]
fn markdown_extension_on_plain_text_view_is_decisive() {
    // A `file:///doc.md` page with markdown-looking content.
    let url = Url::parse("file:///doc.md").unwrap();
    let body = "# Title\n\nSome **bold** text with a [link](http://x.com).";
    let snapshot = PageSnapshot::new(Some(url), PageBody::SinglePre(body.into()));

    let result = snapshot.classify(&limits());
    assert!(result.is_markdown);
    assert_eq!(result.reason, MatchReason::Extension);
}

#[test]
fn txt_extension_falls_through_to_heuristic() {
    // Same text, `.txt` URL: heading + bold + link = 3 signals >= 2.
    let url = Url::parse("file:///doc.txt").unwrap();
    let body = "# Title\n\nSome **bold** text with a [link](http://x.com).";
    let snapshot = PageSnapshot::new(Some(url), PageBody::SinglePre(body.into()));

    let result = snapshot.classify(&limits());
    assert!(result.is_markdown);
    assert_eq!(result.reason, MatchReason::Heuristic);
    assert!(result.pattern_matches >= 3);
}

#[test]
fn prose_without_markup_is_left_alone() {
    let snapshot = PageSnapshot::new(
        None,
        PageBody::SinglePre("Just a normal sentence with no markup at all.".into()),
    );
    let result = snapshot.classify(&limits());
    assert!(!result.is_markdown);
    assert_eq!(result.reason, MatchReason::None);
    assert_eq!(result.pattern_matches, 0);
}

#[test]
fn oversized_content_is_never_classified() {
    let url = Url::parse("file:///doc.md").unwrap();
    let big = "# cue\n".repeat(300_000);
    let snapshot = PageSnapshot::new(Some(url), PageBody::SinglePre(big));
    assert!(!snapshot.classify(&limits()).is_markdown);
}

#[test]
fn malformed_url_fails_closed_on_extension_only() {
    // The adapter could not parse a URL; the heuristic still applies.
    let input = ClassifyInput::from_text("# Heading\n\n- one\n- two");
    let result = classify(&input, &limits());
    assert!(result.is_markdown);
    assert_eq!(result.reason, MatchReason::Heuristic);
}

#[test]
fn structured_page_never_renders_even_with_extension() {
    let url = Url::parse("https://example.com/styled.md").unwrap();
    let snapshot = PageSnapshot::new(Some(url), PageBody::Structured);
    assert!(!snapshot.classify(&limits()).is_markdown);
}

#[test]
fn classification_is_pure_across_repeated_calls() {
    let url = Url::parse("https://example.com/maybe.txt").unwrap();
    let snapshot = PageSnapshot::new(
        Some(url),
        PageBody::SinglePre("## Notes\n\n> remember this\n".into()),
    );
    let results: Vec<_> = (0..5).map(|_| snapshot.classify(&limits())).collect();
    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
}

#[tokio::test]
async fn file_snapshot_synthesizes_a_file_url() {
    let dir = std::env::temp_dir().join("mdlens-classify-test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("sample.md");
    std::fs::write(&path, "# From Disk\n").unwrap();

    let snapshot = PageSnapshot::from_file(&path).await.unwrap();
    let url = snapshot.url.as_ref().unwrap();
    assert_eq!(url.scheme(), "file");
    assert!(url.path().ends_with("sample.md"));
    assert_eq!(snapshot.classify(&limits()).reason, MatchReason::Extension);
}
