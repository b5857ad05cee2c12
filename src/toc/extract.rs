//! Heading extraction from rendered HTML using `tl`.

use super::{RenderedHeading, normalize_title};
use crate::utils::html::unescape;

/// Walk the fragment in document order and collect `h1`..`h6` elements.
pub(super) fn headings(html: &str) -> Vec<RenderedHeading> {
    let Ok(dom) = tl::parse(html, tl::ParserOptions::default()) else {
        return Vec::new();
    };

    let parser = dom.parser();
    let mut out = Vec::new();
    for handle in dom.children() {
        visit(*handle, parser, &mut out);
    }
    out
}

fn visit(handle: tl::NodeHandle, parser: &tl::Parser, out: &mut Vec<RenderedHeading>) {
    let Some(tl::Node::Tag(tag)) = handle.get(parser) else {
        return;
    };

    let name = tag.name().as_utf8_str();
    if let Some(level) = heading_level(&name) {
        let id = tag
            .attributes()
            .id()
            .map(|id| unescape(&id.as_utf8_str()).into_owned())
            .unwrap_or_default();
        let title = normalize_title(&unescape(&tag.inner_text(parser)));
        out.push(RenderedHeading { id, title, level });
        // Headings do not nest
        return;
    }

    for child in tag.children().top().iter() {
        visit(*child, parser, out);
    }
}

/// Level of a heading tag name (`h1` → 1), `None` for any other tag.
fn heading_level(name: &str) -> Option<u8> {
    let bytes = name.as_bytes();
    match bytes {
        [b'h' | b'H', digit @ b'1'..=b'6'] => Some(digit - b'0'),
        _ => None,
    }
}
