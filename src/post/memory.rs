//! In-memory store backends for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use url::Url;

use super::store::check_ref;
use super::{DocumentStore, ObjectStore, Post, StoreError};

/// Posts held in memory, sorted by id on read.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    posts: RwLock<Vec<Post>>,
    lookups: AtomicUsize,
}

impl MemoryDocumentStore {
    pub fn new(posts: impl IntoIterator<Item = Post>) -> Self {
        Self {
            posts: RwLock::new(posts.into_iter().collect()),
            lookups: AtomicUsize::new(0),
        }
    }

    /// Insert a post, replacing any post with the same slug.
    pub fn insert(&self, post: Post) {
        let mut posts = self.posts.write();
        posts.retain(|p| p.slug != post.slug);
        posts.push(post);
    }

    /// Number of slug lookups served so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl DocumentStore for MemoryDocumentStore {
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        let mut posts = self.posts.read().clone();
        posts.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(posts)
    }

    async fn get_post_by_slug(&self, slug: &str) -> Result<Option<Post>, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.posts.read().iter().find(|p| p.slug == slug).cloned())
    }
}

/// Blobs held in memory, addressed as `memory:///{ref}`.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    blobs: RwLock<FxHashMap<String, String>>,
    delays: RwLock<FxHashMap<String, Duration>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(self, content_ref: &str, text: &str) -> Self {
        self.blobs
            .write()
            .insert(content_ref.to_string(), text.to_string());
        self
    }

    /// Make downloads of `content_ref` take at least `delay`.
    pub fn with_delay(self, content_ref: &str, delay: Duration) -> Self {
        self.delays.write().insert(content_ref.to_string(), delay);
        self
    }
}

impl ObjectStore for MemoryObjectStore {
    async fn resolve_download_url(&self, content_ref: &str) -> Result<Url, StoreError> {
        let relative = check_ref(content_ref)?;
        Url::parse(&format!("memory:///{relative}"))
            .map_err(|_| StoreError::InvalidRef(content_ref.to_string()))
    }

    async fn fetch_text(&self, url: &Url) -> Result<String, StoreError> {
        let key = url.path().trim_start_matches('/').to_string();

        let delay = self.delays.read().get(&key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.blobs.read().get(&key).cloned().ok_or_else(|| {
            StoreError::io(
                &key,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such blob"),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::test_post;

    #[tokio::test]
    async fn test_documents_sorted_and_counted() {
        let store = MemoryDocumentStore::new([test_post("2", "b", &[]), test_post("1", "a", &[])]);
        let ids: Vec<_> = store
            .list_posts()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["1", "2"]);

        assert!(store.get_post_by_slug("a").await.unwrap().is_some());
        assert!(store.get_post_by_slug("zzz").await.unwrap().is_none());
        assert_eq!(store.lookups(), 2);
    }

    #[tokio::test]
    async fn test_insert_replaces_slug() {
        let store = MemoryDocumentStore::default();
        store.insert(test_post("1", "a", &[]));
        store.insert(test_post("9", "a", &[]));
        let posts = store.list_posts().await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, "9");
    }

    #[tokio::test]
    async fn test_objects() {
        let store = MemoryObjectStore::new().with_blob("a.md", "# A");
        let url = store.resolve_download_url("a.md").await.unwrap();
        assert_eq!(store.fetch_text(&url).await.unwrap(), "# A");

        let missing = store.resolve_download_url("b.md").await.unwrap();
        assert!(store.fetch_text(&missing).await.is_err());
    }
}
