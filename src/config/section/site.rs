//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "Schias"
//! tagline = "Wanna explore something?"
//! copyright = "© 2024 Schias. All rights reserved."
//! collection = "blogs"        # list view at /blogs, posts at /blogs/{slug}
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Path segments already taken by other routes.
const RESERVED_SEGMENTS: [&str; 2] = ["category", "_folio"];

/// Site metadata shown in page chrome.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Site title (breadcrumb "Home" target and `<title>` suffix).
    pub title: String,

    /// Line shown under the clock on the list view.
    pub tagline: String,

    /// Footer copyright notice.
    pub copyright: String,

    /// Language code for `<html lang>`.
    pub language: String,

    /// Collection path segment for the list and detail views.
    pub collection: String,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            title: "folio".into(),
            tagline: "Wanna explore something?".into(),
            copyright: String::new(),
            language: "en".into(),
            collection: "blogs".into(),
        }
    }
}

impl SiteSectionConfig {
    pub const COLLECTION: FieldPath = FieldPath::new("site.collection");

    /// Validate site configuration.
    ///
    /// # Checks
    /// - `collection` is a single, non-empty URL path segment
    /// - `collection` does not shadow a built-in route
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let collection = self.collection.as_str();

        if collection.is_empty() || collection.contains('/') || collection.contains('?') {
            diag.error_with_hint(
                Self::COLLECTION,
                format!("`{collection}` is not a single path segment"),
                "use a plain segment, e.g. \"blogs\"",
            );
            return;
        }

        if RESERVED_SEGMENTS.contains(&collection) {
            diag.error(
                Self::COLLECTION,
                format!("`{collection}` is reserved for a built-in route"),
            );
        }
    }

    /// URL path of the list view, e.g. `/blogs`.
    pub fn collection_path(&self) -> String {
        format!("/{}", self.collection)
    }

    /// URL path of a post detail view, e.g. `/blogs/hello-world`.
    pub fn post_path(&self, slug: &str) -> String {
        let slug = percent_encoding::utf8_percent_encode(slug, crate::utils::PATH_SEGMENT);
        format!("/{}/{}", self.collection, slug)
    }
}
