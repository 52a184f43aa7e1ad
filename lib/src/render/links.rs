//! Relative URL resolution on the parse tree.
//!
//! A document served from `https://host/docs/guide.md` that links to
//! `images/fig.png` needs that destination joined against the document base
//! before the HTML leaves the renderer. Rewriting serialized HTML with
//! regexes can mis-match across tag boundaries, so resolution happens here
//! on `pulldown-cmark` events instead: each link and image destination is
//! resolved attribute-by-attribute, and everything else passes through
//! untouched.

use pulldown_cmark::{CowStr, Event, Tag};
use url::Url;

/// Rewrites link and image destinations in one event.
pub fn resolve_event_urls<'a>(event: Event<'a>, base: &Url) -> Event<'a> {
    match event {
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: resolve_dest(dest_url, base),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: resolve_dest(dest_url, base),
            title,
            id,
        }),
        other => other,
    }
}

/// Joins a relative destination against the base; absolute destinations,
/// fragments, and mail links pass through. Unjoinable destinations are left
/// alone rather than erroring.
fn resolve_dest<'a>(dest: CowStr<'a>, base: &Url) -> CowStr<'a> {
    if passes_through(&dest) {
        return dest;
    }
    match base.join(&dest) {
        Ok(resolved) => CowStr::from(resolved.to_string()),
        Err(_) => dest,
    }
}

fn passes_through(dest: &str) -> bool {
    dest.is_empty()
        || dest.starts_with('#')
        || dest.starts_with("mailto:")
        || dest.starts_with("data:")
        // Any destination with a scheme is already absolute.
        || Url::parse(dest).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulldown_cmark::LinkType;

    fn base() -> Url {
        Url::parse("https://example.com/docs/guide.md").unwrap()
    }

    fn link_event(dest: &str) -> Event<'_> {
        Event::Start(Tag::Link {
            link_type: LinkType::Inline,
            dest_url: CowStr::Borrowed(dest),
            title: CowStr::Borrowed(""),
            id: CowStr::Borrowed(""),
        })
    }

    fn resolved_dest(event: Event<'_>) -> String {
        match event {
            Event::Start(Tag::Link { dest_url, .. }) => dest_url.to_string(),
            _ => panic!("not a link event"),
        }
    }

    #[test]
    fn relative_destination_joins_base() {
        let event = resolve_event_urls(link_event("images/fig.png"), &base());
        assert_eq!(
            resolved_dest(event),
            "https://example.com/docs/images/fig.png"
        );
    }

    #[test]
    fn parent_relative_destination_joins_base() {
        let event = resolve_event_urls(link_event("../intro.md"), &base());
        assert_eq!(resolved_dest(event), "https://example.com/intro.md");
    }

    #[test]
    fn absolute_fragment_and_mailto_pass_through() {
        for dest in [
            "https://other.com/a.png",
            "file:///tmp/x.md",
            "#section",
            "mailto:a@b.com",
            "data:image/png;base64,AAAA",
        ] {
            let event = resolve_event_urls(link_event(dest), &base());
            assert_eq!(resolved_dest(event), dest);
        }
    }

    #[test]
    fn non_link_events_are_untouched() {
        let event = Event::Text(CowStr::Borrowed("images/fig.png"));
        let out = resolve_event_urls(event.clone(), &base());
        assert_eq!(out, event);
    }
}
