use std::path::PathBuf;

use thiserror::Error;

use crate::markdown::RenderError;

/// Failure talking to a document or object store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed document {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid content reference `{0}`")]
    InvalidRef(String),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Why a post could not be shown.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("post `{0}` not found")]
    NotFound(String),

    #[error(transparent)]
    Fetch(#[from] StoreError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl ContentError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
