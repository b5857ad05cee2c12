//! List and category views.

use super::{post_card, shell};
use crate::config::SiteConfig;
use crate::post::Post;
use crate::utils::html::escape;
use crate::view::clock::ClockTick;

/// How many posts the list view shows, and what "Load More" leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Posts shown.
    pub visible: usize,
    /// Total posts available.
    pub total: usize,
    /// `show` value for the "Load More" link, `None` when everything is shown.
    pub next: Option<usize>,
}

impl Pagination {
    /// Clamp a requested `show` to `[page_size, total]`.
    ///
    /// A missing request shows the first page.
    pub fn new(total: usize, requested: Option<usize>, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let visible = requested.unwrap_or(page_size).max(page_size).min(total);
        let next = (visible < total).then(|| (visible + page_size).min(total));
        Self {
            visible,
            total,
            next,
        }
    }

    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }
}

/// The collection list view: live clock, tagline, cards, "Load More".
pub fn list_page(
    config: &SiteConfig,
    posts: &[Post],
    requested: Option<usize>,
    clock: &ClockTick,
) -> String {
    let pagination = Pagination::new(posts.len(), requested, config.listing.page_size);

    let cards: String = posts[..pagination.visible]
        .iter()
        .map(|post| post_card(config, post))
        .collect();

    let load_more = match pagination.next {
        Some(next) => format!(
            r#"<div class="load-more"><a class="button" id="load-more" href="{}?show={next}">Load More</a></div>"#,
            escape(&config.site.collection_path())
        ),
        None => String::new(),
    };

    let empty = if posts.is_empty() {
        r#"<p class="status">No posts yet.</p>"#
    } else {
        ""
    };

    let body = format!(
        r#"<section class="hero"><h2><span class="now">Its Now</span> <span id="clock-time">{time}</span><br><span id="clock-date">{date}</span></h2><p>{tagline}</p></section>
<section class="cards">{cards}</section>{empty}{load_more}"#,
        time = escape(&clock.time),
        date = escape(&clock.date),
        tagline = escape(&config.site.tagline),
    );

    shell(config, "list", "", &body)
}

/// Every post carrying `tag`.
pub fn category_page(config: &SiteConfig, tag: &str, posts: &[Post]) -> String {
    let tag_html = escape(tag);
    let cards: String = posts.iter().map(|post| post_card(config, post)).collect();
    let body = if posts.is_empty() {
        format!(r#"<h2>Category: {tag_html}</h2><p class="status">No posts tagged {tag_html}.</p>"#)
    } else {
        format!(r#"<h2>Category: {tag_html}</h2><section class="cards">{cards}</section>"#)
    };
    shell(config, "category", tag, &body)
}
