//! Rendering seams and the document pipeline.
//!
//! Markdown-to-HTML conversion and diagram rendering are external
//! collaborators behind traits; this crate only decides *what* gets rendered
//! and how failures degrade. [`CmarkRenderer`] is the provided default
//! (backed by `pulldown-cmark`), and [`EmbedDiagramRenderer`] emits
//! containers for an in-page mermaid runtime.
//!
//! [`render_document`] is the whole-document pipeline: frontmatter comes
//! off, chat and diagram blocks are swapped for their markup (a failing
//! diagram degrades to its source, it never aborts the page), the rest goes
//! through the renderer, and a title is derived from the first heading or
//! the URL.
//!
//! ## Examples
//!
//! ```
//! use mdlens_lib::render::{CmarkRenderer, MarkdownRenderer};
//!
//! let html = CmarkRenderer::new().render_markdown_to_html("# Hello\n\nWorld");
//! assert!(html.contains("<h1>"));
//! ```

mod blocks;
mod links;

pub use links::resolve_event_urls;

use crate::chat;
use crate::frontmatter::split_frontmatter;
use crate::theme::Theme;
use crate::toc::Toc;
use blocks::{FencedKind, scan_special_blocks};
use pulldown_cmark::{Options, Parser, html::push_html};
use url::Url;

/// The Markdown-to-HTML seam: source string in, HTML string out.
pub trait MarkdownRenderer {
    fn render_markdown_to_html(&self, source: &str) -> String;
}

/// What came back from a diagram renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagramOutcome {
    /// The diagram rendered; `markup` is ready to splice into the page.
    Rendered { markup: String },
    /// The diagram failed; the pipeline shows the raw source instead.
    Failed { error_message: String },
}

/// The diagram seam. Rendering is async because real backends (a browser
/// runtime, an external CLI) are.
pub trait DiagramRenderer {
    async fn render_diagram(&self, source: &str) -> DiagramOutcome;
}

/// Parser extensions used everywhere a document is parsed.
pub(crate) fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_TASKLISTS
}

/// The default renderer, backed by `pulldown-cmark` with GFM-ish extensions.
///
/// Given a base URL, relative link and image destinations are resolved
/// attribute-by-attribute on the parse tree before HTML is emitted.
#[derive(Debug, Clone, Default)]
pub struct CmarkRenderer {
    base_url: Option<Url>,
}

impl CmarkRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A renderer that resolves relative destinations against `base_url`.
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            base_url: Some(base_url),
        }
    }
}

impl MarkdownRenderer for CmarkRenderer {
    fn render_markdown_to_html(&self, source: &str) -> String {
        let parser = Parser::new_ext(source, markdown_options());
        let mut html = String::with_capacity(source.len() * 3 / 2);
        match &self.base_url {
            Some(base) => push_html(&mut html, parser.map(|event| resolve_event_urls(event, base))),
            None => push_html(&mut html, parser),
        }
        html
    }
}

/// A diagram "renderer" that defers to an in-page mermaid runtime: it emits
/// the `<div class="mermaid">` container the runtime picks up. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbedDiagramRenderer;

impl DiagramRenderer for EmbedDiagramRenderer {
    async fn render_diagram(&self, source: &str) -> DiagramOutcome {
        DiagramOutcome::Rendered {
            markup: format!(r#"<div class="mermaid">{}</div>"#, single_line_text(source)),
        }
    }
}

/// Options for the document pipeline.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Base for resolving relative destinations and the title fallback.
    pub base_url: Option<Url>,
}

/// A rendered page: body HTML plus what the host shell needs around it.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    /// The rendered body.
    pub html: String,
    /// First H1 text, else the URL's file name.
    pub title: Option<String>,
    /// Error messages from diagrams that degraded to source.
    pub diagram_failures: Vec<String>,
    /// Whether any mermaid containers were embedded.
    pub has_diagrams: bool,
}

impl RenderedDocument {
    /// Wraps the body in a complete HTML document.
    ///
    /// The mermaid runtime script is only included when the document embeds
    /// diagram containers.
    pub fn to_standalone_html(&self, theme: Theme) -> String {
        let title = match &self.title {
            Some(title) => format!("{title} - Markdown"),
            None => "Markdown".to_string(),
        };
        let mermaid = if self.has_diagrams {
            concat!(
                r#"<script src="https://cdn.jsdelivr.net/npm/mermaid@10.6.1/dist/mermaid.min.js"></script>"#,
                r#"<script>mermaid.initialize({startOnLoad:true,securityLevel:"loose"});</script>"#,
            )
        } else {
            ""
        };
        format!(
            "<!doctype html>\n<html data-theme=\"{theme}\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{title}</title>\n{mermaid}\n</head>\n<body>\n\
             <main class=\"mdlens-container\">\n{body}</main>\n</body>\n</html>\n",
            theme = theme,
            title = html_escape::encode_text(&title),
            mermaid = mermaid,
            body = self.html,
        )
    }
}

/// Renders a whole document through the injected seams.
///
/// Failure policy: nothing here aborts the page. A diagram that fails to
/// render degrades to its raw source in an error container, and the failure
/// message is collected on the result.
///
/// ## Examples
///
/// ```
/// use mdlens_lib::render::{render_document, CmarkRenderer, EmbedDiagramRenderer, RenderOptions};
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let doc = render_document(
///     "# Title\n\nhello",
///     &RenderOptions::default(),
///     &CmarkRenderer::new(),
///     &EmbedDiagramRenderer,
/// )
/// .await;
/// assert_eq!(doc.title.as_deref(), Some("Title"));
/// assert!(doc.html.contains("<h1>"));
/// # });
/// ```
pub async fn render_document<R, D>(
    source: &str,
    options: &RenderOptions,
    renderer: &R,
    diagrams: &D,
) -> RenderedDocument
where
    R: MarkdownRenderer,
    D: DiagramRenderer,
{
    let (_, content) = split_frontmatter(source);

    let special = scan_special_blocks(content, markdown_options());
    let mut failures = Vec::new();
    let mut has_diagrams = false;
    let mut replacements = Vec::with_capacity(special.len());

    for block in special {
        let markup = match block.kind {
            FencedKind::Chat(style) => {
                chat::render_chat_html(&chat::parse_messages(&block.source), style)
            }
            FencedKind::Mermaid => {
                has_diagrams = true;
                match diagrams.render_diagram(&block.source).await {
                    DiagramOutcome::Rendered { markup } => markup,
                    DiagramOutcome::Failed { error_message } => {
                        tracing::warn!(error = %error_message, "diagram failed, degrading to source");
                        failures.push(error_message.clone());
                        degraded_diagram_html(&block.source, &error_message)
                    }
                }
            }
        };
        replacements.push((block.range, markup));
    }

    // Splice back-to-front so earlier ranges stay valid. The blank lines
    // around each replacement keep the raw HTML a block of its own.
    let mut doc = content.to_string();
    for (range, markup) in replacements.into_iter().rev() {
        doc.replace_range(range, &format!("\n{markup}\n\n"));
    }

    let html = renderer.render_markdown_to_html(&doc);
    let title = Toc::from_markdown(content)
        .title()
        .map(str::to_string)
        .or_else(|| options.base_url.as_ref().and_then(url_file_name));

    RenderedDocument {
        html,
        title,
        diagram_failures: failures,
        has_diagrams,
    }
}

/// The degraded form of a failed diagram: the error message and the raw
/// source, kept on the page instead of the diagram.
fn degraded_diagram_html(source: &str, error_message: &str) -> String {
    format!(
        r#"<div class="diagram-error"><p class="diagram-error-message">Diagram error: {}</p><pre><code>{}</code></pre></div>"#,
        html_escape::encode_text(error_message),
        single_line_text(source),
    )
}

/// Escapes text and encodes newlines as character references, so multi-line
/// content survives inside a single-line raw HTML block.
fn single_line_text(text: &str) -> String {
    html_escape::encode_text(text.trim_end())
        .replace('\r', "")
        .replace('\n', "&#10;")
}

/// Last non-empty path segment of a URL, as a title fallback.
fn url_file_name(url: &Url) -> Option<String> {
    url.path_segments()?
        .filter(|segment| !segment.is_empty())
        .next_back()
        .map(str::to_string)
}
