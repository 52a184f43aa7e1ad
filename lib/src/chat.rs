//! Chat-transcript blocks.
//!
//! Fenced code blocks tagged `slack` or `discord` hold chat transcripts in a
//! small line format and render as styled message lists instead of code:
//!
//! ```text
//! [alice] morning!
//! [bob|9:01 AM] morning. shipping today?
//! yes - after review.
//! ```
//!
//! A `[author]` or `[author|time]` header starts a message; lines without a
//! header continue the previous message; anything before the first header is
//! ignored.

use regex::Regex;
use std::sync::LazyLock;

/// `[author] text` or `[author|time] text`.
static MESSAGE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[([^\]|]+)(?:\|([^\]]+))?\]\s*(.*)$").expect("chat header pattern is valid")
});

/// Which chat service's look a block asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatStyle {
    Slack,
    Discord,
}

impl ChatStyle {
    /// Maps a fence language token to a style.
    pub fn from_language(language: &str) -> Option<Self> {
        match language.to_ascii_lowercase().as_str() {
            "slack" => Some(Self::Slack),
            "discord" => Some(Self::Discord),
            _ => None,
        }
    }

    fn class_suffix(self) -> &'static str {
        match self {
            Self::Slack => "slack",
            Self::Discord => "discord",
        }
    }
}

/// One parsed chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub author: String,
    pub timestamp: Option<String>,
    pub lines: Vec<String>,
}

/// Parses a transcript into messages.
///
/// ## Examples
///
/// ```
/// use mdlens_lib::chat::parse_messages;
///
/// let messages = parse_messages("[alice|9:01] hi\nstill me\n[bob] hey");
/// assert_eq!(messages.len(), 2);
/// assert_eq!(messages[0].timestamp.as_deref(), Some("9:01"));
/// assert_eq!(messages[0].lines, vec!["hi", "still me"]);
/// ```
pub fn parse_messages(source: &str) -> Vec<ChatMessage> {
    let mut messages: Vec<ChatMessage> = Vec::new();

    for line in source.trim().lines() {
        if let Some(captures) = MESSAGE_HEADER.captures(line) {
            let mut lines = Vec::new();
            let text = captures[3].trim();
            if !text.is_empty() {
                lines.push(text.to_string());
            }
            messages.push(ChatMessage {
                author: captures[1].trim().to_string(),
                timestamp: captures.get(2).map(|m| m.as_str().trim().to_string()),
                lines,
            });
        } else if let Some(current) = messages.last_mut() {
            let text = line.trim();
            if !text.is_empty() {
                current.lines.push(text.to_string());
            }
        }
        // Text before the first header has no author to attach to; drop it.
    }

    messages
}

/// Renders messages as compact single-line HTML.
///
/// Single-line on purpose: the markup is spliced into a Markdown document as
/// a raw HTML block, and a literal blank line would end the block early.
pub fn render_chat_html(messages: &[ChatMessage], style: ChatStyle) -> String {
    let mut html = format!(
        r#"<div class="chat-block chat-{}">"#,
        style.class_suffix()
    );

    for message in messages {
        html.push_str(r#"<div class="chat-message">"#);
        html.push_str(r#"<span class="chat-author">"#);
        html.push_str(&html_escape::encode_text(&message.author));
        html.push_str("</span>");
        if let Some(timestamp) = &message.timestamp {
            html.push_str(r#"<span class="chat-timestamp">"#);
            html.push_str(&html_escape::encode_text(timestamp));
            html.push_str("</span>");
        }
        html.push_str(r#"<div class="chat-text">"#);
        for (i, line) in message.lines.iter().enumerate() {
            if i > 0 {
                html.push_str("<br>");
            }
            html.push_str(&html_escape::encode_text(line));
        }
        html.push_str("</div></div>");
    }

    html.push_str("</div>");
    html
}
