//! Filesystem store backends.
//!
//! - [`FsDocumentStore`]: a collection directory, one `*.json` document per post
//! - [`FsObjectStore`]: a blob directory, refs resolve to `file://` URLs

use std::path::{Path, PathBuf};

use url::Url;

use super::store::check_ref;
use super::{DocumentStore, ObjectStore, Post, StoreError};
use crate::log;

/// Post documents stored as JSON files in one directory.
///
/// Documents that fail to parse are skipped with a log line so one broken
/// file does not take the whole collection down.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    dir: PathBuf,
}

impl FsDocumentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    async fn document_paths(&self) -> Result<Vec<PathBuf>, StoreError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            // An absent collection is an empty one
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&self.dir, e)),
        };

        let mut paths = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::io(&self.dir, e))?
        {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| StoreError::io(&path, e))?;
            let is_file = if file_type.is_symlink() {
                tokio::fs::metadata(&path).await.is_ok_and(|meta| meta.is_file())
            } else {
                file_type.is_file()
            };
            if is_file {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    async fn read_document(path: &Path) -> Result<Post, StoreError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| StoreError::io(path, e))?;
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl DocumentStore for FsDocumentStore {
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        let mut posts = Vec::new();
        for path in self.document_paths().await? {
            match Self::read_document(&path).await {
                Ok(post) => posts.push(post),
                Err(StoreError::Json { path, source }) => {
                    log!("store"; "skipping {}: {}", path.display(), source);
                }
                Err(e) => return Err(e),
            }
        }
        posts.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(posts)
    }
}

/// Post content stored as files under one root directory.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn absolute_root(&self) -> Result<PathBuf, StoreError> {
        if self.root.is_absolute() {
            return Ok(self.root.clone());
        }
        std::env::current_dir()
            .map(|cwd| cwd.join(&self.root))
            .map_err(|e| StoreError::io(&self.root, e))
    }
}

impl ObjectStore for FsObjectStore {
    async fn resolve_download_url(&self, content_ref: &str) -> Result<Url, StoreError> {
        let relative = check_ref(content_ref)?;
        let path = self.absolute_root()?.join(relative);
        Url::from_file_path(&path).map_err(|()| StoreError::InvalidRef(content_ref.to_string()))
    }

    async fn fetch_text(&self, url: &Url) -> Result<String, StoreError> {
        let path = url
            .to_file_path()
            .map_err(|()| StoreError::InvalidRef(url.to_string()))?;
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| StoreError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_doc(dir: &Path, name: &str, id: &str, slug: &str) {
        let json = format!(
            r#"{{"id":"{id}","title":"Title {id}","slug":"{slug}","tags":["Rust"],"content":"{slug}.md"}}"#
        );
        fs::write(dir.join(name), json).unwrap();
    }

    #[tokio::test]
    async fn test_list_sorted_by_id() {
        let dir = TempDir::new().unwrap();
        write_doc(dir.path(), "a.json", "2", "second");
        write_doc(dir.path(), "b.json", "1", "first");
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let store = FsDocumentStore::new(dir.path());
        let posts = store.list_posts().await.unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_json_named_directory_skipped() {
        let dir = TempDir::new().unwrap();
        write_doc(dir.path(), "a.json", "1", "only");
        fs::create_dir(dir.path().join("drafts.json")).unwrap();

        let store = FsDocumentStore::new(dir.path());
        let posts = store.list_posts().await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "only");
    }

    #[tokio::test]
    async fn test_malformed_document_skipped() {
        let dir = TempDir::new().unwrap();
        write_doc(dir.path(), "good.json", "1", "good");
        fs::write(dir.path().join("bad.json"), "{ not json").unwrap();

        let store = FsDocumentStore::new(dir.path());
        let posts = store.list_posts().await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "good");
    }

    #[tokio::test]
    async fn test_get_by_slug() {
        let dir = TempDir::new().unwrap();
        write_doc(dir.path(), "a.json", "1", "hello-world");

        let store = FsDocumentStore::new(dir.path());
        let post = store.get_post_by_slug("hello-world").await.unwrap();
        assert_eq!(post.map(|p| p.id), Some("1".to_string()));
        assert!(store.get_post_by_slug("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_collection_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FsDocumentStore::new(dir.path().join("nope"));
        assert!(store.list_posts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_object_round_trip() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("blogs")).unwrap();
        fs::write(dir.path().join("blogs/post.md"), "# Hello").unwrap();

        let store = FsObjectStore::new(dir.path());
        let url = store.resolve_download_url("blogs/post.md").await.unwrap();
        assert_eq!(url.scheme(), "file");
        assert_eq!(store.fetch_text(&url).await.unwrap(), "# Hello");
    }

    #[tokio::test]
    async fn test_object_rejects_parent_refs() {
        let dir = TempDir::new().unwrap();
        let store = FsObjectStore::new(dir.path());
        let err = store.resolve_download_url("../outside.md").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidRef(_)));
    }

    #[tokio::test]
    async fn test_object_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = FsObjectStore::new(dir.path());
        let url = store.resolve_download_url("gone.md").await.unwrap();
        assert!(matches!(
            store.fetch_text(&url).await,
            Err(StoreError::Io { .. })
        ));
    }
}
