//! Store seams.
//!
//! Posts come from two places: a [`DocumentStore`] holding metadata, and an
//! [`ObjectStore`] holding the Markdown each post's `content_ref` points at.

use std::future::Future;
use std::time::Duration;

use url::Url;

use super::fs::FsObjectStore;
use super::http::HttpObjectStore;
use super::{Post, StoreError};
use crate::config::{ObjectLocation, StoreConfig};

/// Post metadata lookup.
pub trait DocumentStore: Send + Sync + 'static {
    /// All posts, sorted by `id`.
    fn list_posts(&self) -> impl Future<Output = Result<Vec<Post>, StoreError>> + Send;

    /// The post with the given slug, `None` if no document has it.
    fn get_post_by_slug(
        &self,
        slug: &str,
    ) -> impl Future<Output = Result<Option<Post>, StoreError>> + Send {
        async move {
            let posts = self.list_posts().await?;
            Ok(posts.into_iter().find(|post| post.slug == slug))
        }
    }
}

/// Blob lookup for post content.
pub trait ObjectStore: Send + Sync + 'static {
    /// Turn a content reference into a URL the content can be downloaded from.
    fn resolve_download_url(
        &self,
        content_ref: &str,
    ) -> impl Future<Output = Result<Url, StoreError>> + Send;

    /// Download a resolved URL as text.
    fn fetch_text(&self, url: &Url) -> impl Future<Output = Result<String, StoreError>> + Send;
}

/// Object store selected by `[store] objects`.
#[derive(Debug, Clone)]
pub enum ObjectBackend {
    Dir(FsObjectStore),
    Remote(HttpObjectStore),
}

impl ObjectBackend {
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        Ok(match config.object_location() {
            ObjectLocation::Dir(dir) => Self::Dir(FsObjectStore::new(dir)),
            ObjectLocation::Remote(base) => Self::Remote(HttpObjectStore::new(
                base,
                Duration::from_secs(config.timeout),
            )?),
        })
    }
}

impl ObjectStore for ObjectBackend {
    async fn resolve_download_url(&self, content_ref: &str) -> Result<Url, StoreError> {
        match self {
            Self::Dir(store) => store.resolve_download_url(content_ref).await,
            Self::Remote(store) => store.resolve_download_url(content_ref).await,
        }
    }

    async fn fetch_text(&self, url: &Url) -> Result<String, StoreError> {
        match self {
            Self::Dir(store) => store.fetch_text(url).await,
            Self::Remote(store) => store.fetch_text(url).await,
        }
    }
}

/// Reject refs that could escape the store root.
///
/// Refs are relative, `/`-separated paths without `..`, empty, or `.` segments
/// and without a leading slash or backslash.
pub(super) fn check_ref(content_ref: &str) -> Result<&str, StoreError> {
    let invalid = || StoreError::InvalidRef(content_ref.to_string());
    let trimmed = content_ref.trim();

    if trimmed.is_empty()
        || trimmed.starts_with('/')
        || trimmed.contains('\\')
        || trimmed.contains(':')
    {
        return Err(invalid());
    }
    if trimmed
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(invalid());
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_ref_accepts_relative() {
        assert_eq!(check_ref("blogs/post.md").unwrap(), "blogs/post.md");
        assert_eq!(check_ref(" post.md ").unwrap(), "post.md");
    }

    #[test]
    fn test_check_ref_rejects_escapes() {
        for bad in [
            "",
            "../secret.md",
            "blogs/../../etc/passwd",
            "/etc/passwd",
            "a//b.md",
            "./post.md",
            "..\\win.md",
            "C:/post.md",
            "https://evil.example/x.md",
        ] {
            assert!(
                matches!(check_ref(bad), Err(StoreError::InvalidRef(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_backend_from_config() {
        let config = crate::config::test_parse_config("[store]\nobjects = \"https://cdn.example.com/b/\"");
        assert!(matches!(
            ObjectBackend::from_config(&config.store).unwrap(),
            ObjectBackend::Remote(_)
        ));

        let config = crate::config::test_parse_config("");
        assert!(matches!(
            ObjectBackend::from_config(&config.store).unwrap(),
            ObjectBackend::Dir(_)
        ));
    }
}
