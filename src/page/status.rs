//! Failure views.

use super::shell;
use crate::config::SiteConfig;
use crate::utils::html::escape;

/// Shown for unknown slugs and unknown paths.
pub fn not_found_page(config: &SiteConfig) -> String {
    let body = format!(
        r#"<section class="status-page"><h2>Post not found</h2><p><a class="button" href="{}">Back to posts</a></p></section>"#,
        escape(&config.site.collection_path())
    );
    shell(config, "not-found", "Post not found", &body)
}

/// Shown when the stores could not be reached or a post could not be rendered.
pub fn error_page(config: &SiteConfig, message: &str) -> String {
    let body = format!(
        r#"<section class="status-page"><h2>Something went wrong</h2><pre class="status">{}</pre><p><a class="button" href="{}">Back to posts</a></p></section>"#,
        escape(message),
        escape(&config.site.collection_path())
    );
    shell(config, "error", "Error", &body)
}
