//! Table of contents.
//!
//! A [`TableOfContents`] is the ordered list of headings of one rendered post.
//! It has two producers that must agree:
//!
//! - the Markdown renderer, which emits headings as a side-output while it
//!   assigns anchor ids (the path used when serving posts)
//! - [`TableOfContents::extract`], which reads headings back out of rendered
//!   HTML (used by `folio check` to verify rendered output)

mod extract;

use serde::Serialize;

/// One heading of a rendered document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedHeading {
    /// Anchor id carried by the heading element (empty if it has none).
    pub id: String,
    /// Heading text content.
    pub title: String,
    /// Heading level, 1 through 6.
    pub level: u8,
}

impl RenderedHeading {
    pub fn new(id: impl Into<String>, title: impl Into<String>, level: u8) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            level,
        }
    }
}

/// Headings of one document, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TableOfContents {
    entries: Vec<RenderedHeading>,
}

impl TableOfContents {
    pub fn new(entries: Vec<RenderedHeading>) -> Self {
        Self { entries }
    }

    /// Extract headings (`h1`..`h6`) from rendered HTML, in document order.
    ///
    /// Content without headings, or content that cannot be parsed, yields an
    /// empty table.
    pub fn extract(html: &str) -> Self {
        Self::new(extract::headings(html))
    }

    pub fn entries(&self) -> &[RenderedHeading] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.entries.iter().any(|h| h.id == id)
    }

    /// Ids that appear on more than one heading.
    ///
    /// Duplicate titles slugify to the same id; the renderer does not
    /// disambiguate them.
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut seen = rustc_hash::FxHashSet::default();
        let mut duplicates = Vec::new();
        for heading in &self.entries {
            if !seen.insert(heading.id.as_str()) && !duplicates.contains(&heading.id.as_str()) {
                duplicates.push(heading.id.as_str());
            }
        }
        duplicates
    }

    /// Smallest heading level present, used to indent relative to it.
    pub fn base_level(&self) -> u8 {
        self.entries.iter().map(|h| h.level).min().unwrap_or(1)
    }
}

impl<'a> IntoIterator for &'a TableOfContents {
    type Item = &'a RenderedHeading;
    type IntoIter = std::slice::Iter<'a, RenderedHeading>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Collapse whitespace runs to a single space and trim.
///
/// Applied to heading titles by both producers so they compare equal.
pub fn normalize_title(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
