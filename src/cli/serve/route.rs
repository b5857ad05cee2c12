//! Request URL to view mapping.
//!
//! ```text
//! /                      -> redirect to /{collection}
//! /{collection}?show=N   -> list view
//! /{collection}/{slug}   -> detail view
//! /category/{tag}        -> category view
//! /_folio/live.js        -> live channel client
//! /_folio/style.css      -> stylesheet
//! ```

use crate::embed::serve::{LIVE_JS_PATH, STYLE_CSS_PATH};
use crate::utils::decode_segment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    List { show: Option<usize> },
    Post { slug: String },
    Category { tag: String },
    LiveJs,
    StyleCss,
    NotFound,
}

impl Route {
    /// Map a raw request URL (path plus optional query) to a route.
    pub fn parse(url: &str, collection: &str) -> Self {
        let (path, query) = match url.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (url, None),
        };

        match path {
            LIVE_JS_PATH => return Self::LiveJs,
            STYLE_CSS_PATH => return Self::StyleCss,
            _ => {}
        }

        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return Self::Home;
        }

        let segments: Vec<Option<String>> = trimmed.split('/').map(decode_segment).collect();
        match segments.as_slice() {
            [Some(first)] if first == collection => Self::List {
                show: query.and_then(show_param),
            },
            [Some(first), Some(slug)] if first == collection && !slug.is_empty() => Self::Post {
                slug: slug.clone(),
            },
            [Some(first), Some(tag)] if first == "category" && !tag.is_empty() => Self::Category {
                tag: tag.clone(),
            },
            _ => Self::NotFound,
        }
    }
}

/// `show=N` from a query string. Malformed values are ignored.
fn show_param(query: &str) -> Option<usize> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "show")
        .and_then(|(_, value)| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(url: &str) -> Route {
        Route::parse(url, "blogs")
    }

    #[test]
    fn test_views() {
        assert_eq!(parse("/"), Route::Home);
        assert_eq!(parse("/blogs"), Route::List { show: None });
        assert_eq!(parse("/blogs/"), Route::List { show: None });
        assert_eq!(parse("/blogs?show=6"), Route::List { show: Some(6) });
        assert_eq!(
            parse("/blogs/hello-world"),
            Route::Post { slug: "hello-world".into() }
        );
        assert_eq!(parse("/category/Rust"), Route::Category { tag: "Rust".into() });
    }

    #[test]
    fn test_segments_are_decoded() {
        assert_eq!(parse("/category/C%23"), Route::Category { tag: "C#".into() });
        assert_eq!(parse("/blogs/a%20b"), Route::Post { slug: "a b".into() });
        assert_eq!(parse("/blogs/%FF"), Route::NotFound);
    }

    #[test]
    fn test_show_param() {
        assert_eq!(parse("/blogs?show=abc"), Route::List { show: None });
        assert_eq!(parse("/blogs?x=1&show=9"), Route::List { show: Some(9) });
        assert_eq!(parse("/blogs?show"), Route::List { show: None });
    }

    #[test]
    fn test_assets_and_unknown() {
        assert_eq!(parse("/_folio/live.js"), Route::LiveJs);
        assert_eq!(parse("/_folio/style.css?v=1"), Route::StyleCss);
        assert_eq!(parse("/notes"), Route::NotFound);
        assert_eq!(parse("/blogs/a/b"), Route::NotFound);
        assert_eq!(parse("/blogs//x"), Route::NotFound);
        assert_eq!(parse("/category"), Route::NotFound);
    }

    #[test]
    fn test_custom_collection() {
        assert_eq!(Route::parse("/notes/x", "notes"), Route::Post { slug: "x".into() });
        assert_eq!(Route::parse("/blogs/x", "notes"), Route::NotFound);
    }
}
