//! Scanning for fenced blocks the pipeline treats specially.
//!
//! Mermaid diagrams and chat transcripts live in fenced code blocks keyed by
//! their language token. The scan walks the parse tree with byte offsets so
//! the pipeline can splice replacement markup back into the source without
//! any string surgery on the fences themselves.

use crate::chat::ChatStyle;
use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};
use std::ops::Range;

/// What a special fenced block contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FencedKind {
    Mermaid,
    Chat(ChatStyle),
}

/// One special block: where it sits in the source and what was inside it.
#[derive(Debug, Clone)]
pub(crate) struct FencedBlock {
    pub range: Range<usize>,
    pub kind: FencedKind,
    pub source: String,
}

/// Classifies a fence info string (`mermaid`, `slack title=...`, ...).
fn kind_for_info(info: &str) -> Option<FencedKind> {
    let language = info.split_whitespace().next().unwrap_or("");
    if language.eq_ignore_ascii_case("mermaid") {
        return Some(FencedKind::Mermaid);
    }
    ChatStyle::from_language(language).map(FencedKind::Chat)
}

/// Finds all mermaid and chat blocks in source order.
pub(crate) fn scan_special_blocks(source: &str, options: pulldown_cmark::Options) -> Vec<FencedBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<(Range<usize>, FencedKind, String)> = None;

    for (event, range) in Parser::new_ext(source, options).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                if let Some(kind) = kind_for_info(&info) {
                    // Start event ranges span the whole block.
                    current = Some((range, kind, String::new()));
                }
            }
            Event::Text(text) => {
                if let Some((_, _, buffer)) = current.as_mut() {
                    buffer.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((range, kind, source)) = current.take() {
                    blocks.push(FencedBlock {
                        range,
                        kind,
                        source,
                    });
                }
            }
            _ => {}
        }
    }

    blocks
}
