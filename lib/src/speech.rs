//! Prose extraction and text-to-speech.
//!
//! Reading a document aloud means reading the prose: code blocks, inline
//! code, and raw HTML are noise to a listener and are dropped before the
//! text reaches the speech engine. Speech itself goes through the system's
//! native TTS engine; it is a nice-to-have, so failures are silently
//! ignored.

use crate::render::markdown_options;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use tts::Tts;

/// Extracts the speakable prose from a Markdown source.
///
/// Code blocks, inline code spans, and HTML are skipped; image alt text is
/// kept (it describes the picture); paragraph and heading boundaries become
/// sentence pauses.
///
/// ## Examples
///
/// ```
/// use mdlens_lib::speech::speakable_text;
///
/// let text = speakable_text("# Hi\n\nSome `code` and prose.\n\n```rust\nfn x() {}\n```\n");
/// assert!(text.contains("Some"));
/// assert!(!text.contains("fn x"));
/// ```
pub fn speakable_text(source: &str) -> String {
    let mut prose = String::new();
    let mut in_code_block = false;

    for event in Parser::new_ext(source, markdown_options()) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Text(text) if !in_code_block => prose.push_str(&text),
            Event::SoftBreak | Event::HardBreak => prose.push(' '),
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => {
                if !prose.ends_with('\n') {
                    prose.push('\n');
                }
            }
            _ => {}
        }
    }

    prose.trim().to_string()
}

/// Speaks a message through the system TTS engine, blocking until done.
///
/// Picks a non-compact English voice when one exists. Errors are swallowed -
/// a page that cannot be spoken is still a rendered page.
pub fn speak(message: &str) {
    if message.is_empty() {
        return;
    }
    let Ok(mut tts) = Tts::default() else {
        tracing::debug!("no TTS engine available");
        return;
    };

    if let Ok(voices) = tts.voices() {
        if let Some(voice) = voices.iter().find(|v| {
            let id = v.id().to_lowercase();
            !id.contains("compact") && v.language().starts_with("en")
        }) {
            let _ = tts.set_voice(voice);
        }
    }

    if tts.speak(message, false).is_ok() {
        std::thread::sleep(std::time::Duration::from_millis(100));
        while tts.is_speaking().unwrap_or(false) {
            std::thread::sleep(std::time::Duration::from_millis(100));
        }
    }
}
