//! `[store]` section configuration.
//!
//! Where post metadata and post content live.
//!
//! # Example
//!
//! ```toml
//! [store]
//! documents = "content/blogs"                       # one JSON document per post
//! objects = "content/storage"                       # blob directory...
//! # objects = "https://storage.example.com/blog/"   # ...or a remote base URL
//! timeout = 10                                      # seconds, remote objects only
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath, util};

/// Resolved location of the object store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectLocation {
    /// Blob directory on disk.
    Dir(PathBuf),
    /// Remote base URL, content refs are joined onto it.
    Remote(url::Url),
}

/// Document and object store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Collection directory holding one `*.json` document per post.
    pub documents: PathBuf,

    /// Blob directory or `http(s)://` base URL for post content.
    pub objects: String,

    /// Request timeout for remote objects, in seconds.
    pub timeout: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            documents: "content/blogs".into(),
            objects: "content/storage".into(),
            timeout: 10,
        }
    }
}

impl StoreConfig {
    pub const DOCUMENTS: FieldPath = FieldPath::new("store.documents");
    pub const OBJECTS: FieldPath = FieldPath::new("store.objects");
    pub const TIMEOUT: FieldPath = FieldPath::new("store.timeout");

    /// Classify `objects` as a local directory or a remote URL.
    pub fn object_location(&self) -> ObjectLocation {
        match util::remote_url(&self.objects) {
            Some(url) => ObjectLocation::Remote(url),
            None => ObjectLocation::Dir(PathBuf::from(&self.objects)),
        }
    }

    /// Resolve relative local paths against the project root.
    pub fn normalize(&mut self, root: &Path) {
        self.documents = util::normalize_path(&root.join(&self.documents));
        if let ObjectLocation::Dir(dir) = self.object_location() {
            self.objects = util::normalize_path(&root.join(dir))
                .to_string_lossy()
                .into_owned();
        }
    }

    /// Validate store configuration.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.objects.trim().is_empty() {
            diag.error_with_hint(
                Self::OBJECTS,
                "object store location is empty",
                "use a directory, e.g. \"content/storage\", or an https:// URL",
            );
        }

        if self.timeout == 0 {
            diag.error(Self::TIMEOUT, "timeout must be at least 1 second");
        }

        if self.documents.exists() && !self.documents.is_dir() {
            diag.error(
                Self::DOCUMENTS,
                format!("`{}` is not a directory", self.documents.display()),
            );
        }
    }
}
