//! Blog posts and where they come from.
//!
//! - [`store`] - the `DocumentStore` / `ObjectStore` seams
//! - [`fs`], [`http`] - store backends (plus an in-memory one for tests)
//! - [`fetch`] - slug → post + raw Markdown
//! - [`error`] - store and content errors

mod error;
pub mod fetch;
pub mod fs;
pub mod http;
#[cfg(test)]
pub mod memory;
pub mod store;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub use error::{ContentError, StoreError};
pub use fetch::{ContentFetcher, FetchedPost, SiteFetcher};
pub use store::{DocumentStore, ObjectBackend, ObjectStore};

/// Blog post metadata, as stored in the document collection.
///
/// The Markdown body lives in the object store; `content_ref` points at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    /// URL-safe unique key, used in `/{collection}/{slug}`.
    pub slug: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(alias = "content")]
    pub content_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Cover image URL for list cards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}

impl Post {
    /// Card text for list views.
    pub fn preview(&self) -> String {
        match &self.summary {
            Some(summary) if !summary.trim().is_empty() => summary.clone(),
            _ => format!(
                "This is a preview of the blog post about {}. Click to read more!",
                self.title.to_lowercase()
            ),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

#[cfg(test)]
pub(crate) fn test_post(id: &str, slug: &str, tags: &[&str]) -> Post {
    Post {
        id: id.to_string(),
        title: slug.replace('-', " "),
        slug: slug.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        content_ref: format!("{slug}.md"),
        summary: None,
        cover: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_content_alias() {
        let json = r#"{
            "id": "1",
            "title": "Backend Optimization",
            "slug": "backend-optimization",
            "tags": ["Backend", ".Net", "Backend"],
            "content": "blogs/backend-optimization.md"
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.content_ref, "blogs/backend-optimization.md");
        assert_eq!(post.tags.len(), 2);
        assert!(post.has_tag(".Net"));
        assert_eq!(post.summary, None);
    }

    #[test]
    fn test_deserialize_content_ref() {
        let json = r#"{"id":"2","title":"T","slug":"t","contentRef":"t.md"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.content_ref, "t.md");
        assert!(post.tags.is_empty());
    }

    #[test]
    fn test_preview_fallback() {
        let mut post = test_post("1", "x", &[]);
        post.title = "Journey with v0.dev".into();
        assert_eq!(
            post.preview(),
            "This is a preview of the blog post about journey with v0.dev. Click to read more!"
        );

        post.summary = Some("Custom summary".into());
        assert_eq!(post.preview(), "Custom summary");
    }
}
