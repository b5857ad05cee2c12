//! `[render]` section configuration.
//!
//! Markdown rendering options.
//!
//! # Example
//!
//! ```toml
//! [render]
//! gfm = true                  # tables, strikethrough, task lists, footnotes
//! slugify_headings = true     # heading ids from titles (else heading-1, heading-2, ...)
//! max_input_bytes = 4194304   # larger documents fail with a render error
//!
//! [render.slug]
//! mode = "safe"               # full | safe | no
//! separator = "dash"          # dash | underscore
//! case = "lower"              # lower | upper | preserve
//! ```

use serde::{Deserialize, Serialize};

use super::slug::SlugConfig;
use crate::config::{ConfigDiagnostics, FieldPath};
use crate::markdown::MarkdownOptions;

/// Markdown rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Enable GitHub-flavored extensions.
    pub gfm: bool,

    /// Derive heading ids from heading titles.
    pub slugify_headings: bool,

    /// Upper bound on Markdown input size.
    pub max_input_bytes: usize,

    /// Heading anchor slug settings.
    pub slug: SlugConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            gfm: true,
            slugify_headings: true,
            max_input_bytes: 4 * 1024 * 1024,
            slug: SlugConfig::default(),
        }
    }
}

impl RenderConfig {
    pub const MAX_INPUT_BYTES: FieldPath = FieldPath::new("render.max_input_bytes");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.max_input_bytes == 0 {
            diag.error(Self::MAX_INPUT_BYTES, "must be greater than 0");
        }
    }

    /// Markdown renderer options for this configuration.
    pub fn markdown_options(&self) -> MarkdownOptions {
        MarkdownOptions {
            github_flavored: self.gfm,
            slugify_headings: self.slugify_headings,
            slug: self.slug.clone(),
            max_input_bytes: self.max_input_bytes,
        }
    }
}
