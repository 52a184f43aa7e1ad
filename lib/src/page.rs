//! The host-boundary adapter: a `PageSnapshot` value object built once per
//! page load.
//!
//! Classification is a pure function, so nothing in [`crate::classify`]
//! touches a document model. Instead the host (a CLI, a test, an embedding)
//! summarizes what it sees into a [`PageSnapshot`]: the URL if one parsed,
//! the served content type if known, and a structural sketch of the body.
//! The sketch is what the plain-text-view gate runs on: rendering only ever
//! happens on pages the host is currently showing as raw text.

use crate::classify::{Classification, ClassifyInput, ClassifyLimits, classify};
use crate::error::{MdlensError, MdlensResult};
use std::path::Path;
use url::Url;

/// Structural summary of a host document body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageBody {
    /// The body's sole element child is a `<pre>` holding the raw text -
    /// how browsers present a plain-text resource.
    SinglePre(String),
    /// The body has no element children, only bare text.
    TextOnly(String),
    /// Anything else: the page is already styled markup.
    Structured,
}

/// Everything the classifier may consult about one loaded page.
///
/// ## Examples
///
/// ```
/// use mdlens_lib::page::{PageBody, PageSnapshot};
/// use mdlens_lib::classify::ClassifyLimits;
///
/// let snapshot = PageSnapshot::new(None, PageBody::SinglePre("# Hi\n\n> quoted".into()));
/// assert!(snapshot.classify(&ClassifyLimits::default()).is_markdown);
/// ```
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    /// The page's navigable address, when it parsed. Malformed URLs become
    /// `None`, which fails the extension check closed.
    pub url: Option<Url>,
    /// The `Content-Type` the page was served with, when known.
    pub content_type: Option<String>,
    body: PageBody,
}

impl PageSnapshot {
    /// Creates a snapshot from an already-summarized body.
    pub fn new(url: Option<Url>, body: PageBody) -> Self {
        Self {
            url,
            content_type: None,
            body,
        }
    }

    /// Attaches the served content type.
    pub fn with_content_type<S: Into<String>>(mut self, content_type: S) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Loads a local file as a snapshot with a synthesized `file://` URL.
    ///
    /// The file's text lands in a [`PageBody::SinglePre`] body, matching how
    /// a browser would present it.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> MdlensResult<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path).await?;
        let absolute = std::path::absolute(path)?;
        let url = Url::from_file_path(&absolute)
            .map_err(|_| MdlensError::InvalidFilePath(absolute.display().to_string()))?;
        Ok(Self::new(Some(url), PageBody::SinglePre(text)))
    }

    /// Fetches a URL as a snapshot, capturing the response `Content-Type`.
    pub async fn from_url(url: &Url) -> MdlensResult<Self> {
        let response = reqwest::get(url.as_str()).await?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let text = response.text().await?;
        let mut snapshot = Self::new(Some(url.clone()), PageBody::SinglePre(text));
        snapshot.content_type = content_type;
        Ok(snapshot)
    }

    /// Returns the raw text iff the page is currently a plain-text view.
    ///
    /// This is the gate, not a scoring signal: a [`PageBody::Structured`]
    /// page is never classified or rendered, extension match or not.
    pub fn plain_text_view(&self) -> Option<&str> {
        match &self.body {
            PageBody::SinglePre(text) => Some(text),
            PageBody::TextOnly(text) if !text.trim().is_empty() => Some(text),
            _ => None,
        }
    }

    /// Applies the plain-text-view gate, then classifies.
    pub fn classify(&self, limits: &ClassifyLimits) -> Classification {
        let Some(text) = self.plain_text_view() else {
            tracing::debug!("page is not a plain-text view, skipping classification");
            return Classification {
                is_markdown: false,
                reason: crate::classify::MatchReason::None,
                pattern_matches: 0,
            };
        };

        let mut input = ClassifyInput::from_text(text);
        if let Some(url) = &self.url {
            input = input.with_url(url);
        }
        if let Some(content_type) = &self.content_type {
            input = input.with_content_type(content_type);
        }
        classify(&input, limits)
    }
}
