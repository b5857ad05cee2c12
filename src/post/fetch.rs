//! Content acquisition: slug → post metadata → download URL → raw Markdown.

use std::sync::Arc;

use super::fs::FsDocumentStore;
use super::{ContentError, DocumentStore, ObjectBackend, ObjectStore, Post};
use crate::config::SiteConfig;
use crate::debug;
use crate::markdown::{self, MarkdownOptions, RenderedDocument};

/// A post together with its raw Markdown body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPost {
    pub post: Post,
    pub markdown: String,
}

/// Fetcher wired to the stores named in `folio.toml`.
pub type SiteFetcher = ContentFetcher<FsDocumentStore, ObjectBackend>;

/// Reads posts out of a document store and their bodies out of an object store.
///
/// Cheap to clone; clones share the underlying stores.
#[derive(Debug)]
pub struct ContentFetcher<D, O> {
    documents: Arc<D>,
    objects: Arc<O>,
}

impl<D, O> Clone for ContentFetcher<D, O> {
    fn clone(&self) -> Self {
        Self {
            documents: Arc::clone(&self.documents),
            objects: Arc::clone(&self.objects),
        }
    }
}

impl SiteFetcher {
    pub fn from_config(config: &SiteConfig) -> Result<Self, ContentError> {
        let documents = FsDocumentStore::new(&config.store.documents);
        let objects = ObjectBackend::from_config(&config.store)?;
        Ok(Self::new(documents, objects))
    }
}

impl<D: DocumentStore, O: ObjectStore> ContentFetcher<D, O> {
    pub fn new(documents: D, objects: O) -> Self {
        Self {
            documents: Arc::new(documents),
            objects: Arc::new(objects),
        }
    }

    pub fn documents(&self) -> &D {
        &self.documents
    }

    /// Look up a post and download its content.
    ///
    /// An unknown slug is [`ContentError::NotFound`]; no object lookup happens.
    pub async fn fetch(&self, slug: &str) -> Result<FetchedPost, ContentError> {
        let post = self
            .documents
            .get_post_by_slug(slug)
            .await?
            .ok_or_else(|| ContentError::NotFound(slug.to_string()))?;

        let url = self.objects.resolve_download_url(&post.content_ref).await?;
        debug!("fetch"; "{} -> {}", slug, url);
        let markdown = self.objects.fetch_text(&url).await?;

        Ok(FetchedPost { post, markdown })
    }

    /// Fetch a post and render its body.
    pub async fn fetch_rendered(
        &self,
        slug: &str,
        options: &MarkdownOptions,
    ) -> Result<(Post, RenderedDocument), ContentError> {
        let FetchedPost { post, markdown } = self.fetch(slug).await?;
        let document = markdown::render(&markdown, options)?;
        Ok((post, document))
    }

    /// All posts, sorted by id.
    pub async fn list(&self) -> Result<Vec<Post>, ContentError> {
        Ok(self.documents.list_posts().await?)
    }

    /// Posts carrying `tag`, sorted by id.
    pub async fn list_tagged(&self, tag: &str) -> Result<Vec<Post>, ContentError> {
        let mut posts = self.list().await?;
        posts.retain(|post| post.has_tag(tag));
        Ok(posts)
    }
}
