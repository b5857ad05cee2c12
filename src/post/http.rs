//! Remote object store over HTTP(S).

use std::time::Duration;

use url::Url;

use super::store::check_ref;
use super::{ObjectStore, StoreError};

/// Post content served under a base URL; refs are joined onto it.
#[derive(Debug, Clone)]
pub struct HttpObjectStore {
    base: Url,
    client: reqwest::Client,
}

impl HttpObjectStore {
    pub fn new(mut base: Url, timeout: Duration) -> Result<Self, StoreError> {
        // Url::join replaces the last segment unless the base is a directory
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| StoreError::Http {
                url: base.to_string(),
                source,
            })?;

        Ok(Self { base, client })
    }
}

impl ObjectStore for HttpObjectStore {
    async fn resolve_download_url(&self, content_ref: &str) -> Result<Url, StoreError> {
        let relative = check_ref(content_ref)?;
        self.base
            .join(relative)
            .map_err(|_| StoreError::InvalidRef(content_ref.to_string()))
    }

    async fn fetch_text(&self, url: &Url) -> Result<String, StoreError> {
        let http_error = |source| StoreError::Http {
            url: url.to_string(),
            source,
        };

        self.client
            .get(url.clone())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(http_error)?
            .text()
            .await
            .map_err(http_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(base: &str) -> HttpObjectStore {
        HttpObjectStore::new(Url::parse(base).unwrap(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_resolve_joins_base() {
        let store = store("https://cdn.example.com/blog/");
        let url = store.resolve_download_url("posts/hello.md").await.unwrap();
        assert_eq!(url.as_str(), "https://cdn.example.com/blog/posts/hello.md");
    }

    #[tokio::test]
    async fn test_base_without_trailing_slash() {
        let store = store("https://cdn.example.com/blog");
        let url = store.resolve_download_url("hello.md").await.unwrap();
        assert_eq!(url.as_str(), "https://cdn.example.com/blog/hello.md");
    }

    #[tokio::test]
    async fn test_resolve_rejects_escape() {
        let store = store("https://cdn.example.com/blog/");
        assert!(matches!(
            store.resolve_download_url("../admin/keys").await,
            Err(StoreError::InvalidRef(_))
        ));
        assert!(matches!(
            store.resolve_download_url("//evil.example/x.md").await,
            Err(StoreError::InvalidRef(_))
        ));
    }
}
