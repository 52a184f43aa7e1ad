//! Integration tests for the full classify-then-render flow on realistic
//! documents.

use mdlens_lib::classify::ClassifyLimits;
use mdlens_lib::page::{PageBody, PageSnapshot};
use mdlens_lib::render::{
    CmarkRenderer, DiagramOutcome, DiagramRenderer, EmbedDiagramRenderer, RenderOptions,
    render_document,
};
use mdlens_lib::slides::SlideDeck;
use mdlens_lib::stats::ReadingStats;
use mdlens_lib::toc::Toc;
use url::Url;

const DOCUMENT: &str = "\
# Release Notes

Some **highlights** from this cycle:

- faster startup
- a [changelog](notes/changelog.md)

```mermaid
flowchart LR
  plan --> ship
```

```slack
[maya|9:14] release is green
[arjun] shipping it
```

## Details

| area | change |
|------|--------|
| cli  | new flags |
";

struct CountingDiagrams {
    fail: bool,
}

impl DiagramRenderer for CountingDiagrams {
    async fn render_diagram(&self, source: &str) -> DiagramOutcome {
        if self.fail {
            DiagramOutcome::Failed {
                error_message: "mmdc exited with status 1".to_string(),
            }
        } else {
            DiagramOutcome::Rendered {
                markup: format!("<svg data-lines=\"{}\"></svg>", source.lines().count()),
            }
        }
    }
}

#[tokio::test]
async fn realistic_page_classifies_and_renders() {
    let url = Url::parse("https://example.com/releases/notes").unwrap();
    let snapshot = PageSnapshot::new(Some(url.clone()), PageBody::SinglePre(DOCUMENT.into()));

    let classification = snapshot.classify(&ClassifyLimits::default());
    assert!(classification.is_markdown);

    let options = RenderOptions {
        base_url: Some(url.clone()),
        ..RenderOptions::default()
    };
    let renderer = CmarkRenderer::with_base_url(url);
    let doc = render_document(DOCUMENT, &options, &renderer, &CountingDiagrams { fail: false }).await;

    assert_eq!(doc.title.as_deref(), Some("Release Notes"));
    assert!(doc.html.contains("<svg data-lines=\"2\""));
    assert!(doc.html.contains("chat-slack"));
    assert!(doc.html.contains("<table>"));
    // Relative link resolved against the page URL.
    assert!(
        doc.html
            .contains(r#"href="https://example.com/releases/notes/changelog.md""#)
    );
    assert!(doc.diagram_failures.is_empty());
}

#[tokio::test]
async fn failing_diagram_keeps_the_rest_of_the_page() {
    let doc = render_document(
        DOCUMENT,
        &RenderOptions::default(),
        &CmarkRenderer::new(),
        &CountingDiagrams { fail: true },
    )
    .await;

    assert_eq!(doc.diagram_failures.len(), 1);
    assert!(doc.html.contains("diagram-error"));
    assert!(doc.html.contains("flowchart LR"));
    assert!(doc.html.contains("chat-slack"));
    assert!(doc.html.contains("<h2>"));
}

#[tokio::test]
async fn embedded_diagrams_survive_the_default_backend() {
    let doc = render_document(
        DOCUMENT,
        &RenderOptions::default(),
        &CmarkRenderer::new(),
        &EmbedDiagramRenderer,
    )
    .await;
    assert!(doc.has_diagrams);
    assert!(doc.html.contains(r#"<div class="mermaid">"#));
}

#[test]
fn widgets_agree_on_the_same_source() {
    let toc = Toc::from_markdown(DOCUMENT);
    assert_eq!(toc.heading_count(), 2);
    assert_eq!(toc.title(), Some("Release Notes"));

    let stats = ReadingStats::from_markdown(DOCUMENT);
    assert_eq!(stats.code_blocks, 2);
    assert!(stats.words > 0);

    // No horizontal rules: not a presentation.
    assert!(SlideDeck::new(DOCUMENT).is_none());
}

#[test]
fn slide_deck_from_a_presentation_document() {
    let deck_source = "# Intro\n\n---\n\n# Middle\n\n---\n\n# End\n";
    let mut deck = SlideDeck::new(deck_source).unwrap();
    assert_eq!(deck.len(), 3);
    assert_eq!(deck.next(), "# Middle");
}
