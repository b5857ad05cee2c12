//! Shared helpers.

pub mod html;

use percent_encoding::{AsciiSet, CONTROLS};

/// Characters percent-encoded inside a single URL path segment.
pub const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Decode a percent-encoded URL path segment.
pub fn decode_segment(segment: &str) -> Option<String> {
    percent_encoding::percent_decode_str(segment)
        .decode_utf8()
        .ok()
        .map(std::borrow::Cow::into_owned)
}

/// Format count with noun, e.g. `1 post`, `3 posts`.
pub fn plural_count(count: usize, noun: &str) -> String {
    let s = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{s}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "post"), "0 posts");
        assert_eq!(plural_count(1, "post"), "1 post");
    }

    #[test]
    fn test_segment_round_trip() {
        let encoded = percent_encoding::utf8_percent_encode("c# tips/tricks", PATH_SEGMENT).to_string();
        assert_eq!(encoded, "c%23%20tips%2Ftricks");
        assert_eq!(decode_segment(&encoded).as_deref(), Some("c# tips/tricks"));
    }

    #[test]
    fn test_decode_invalid_utf8() {
        assert_eq!(decode_segment("%FF%FE"), None);
    }
}
