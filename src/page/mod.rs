//! Server-rendered HTML views.
//!
//! - [`list`] - collection list with "Load More" pagination, category view
//! - [`detail`] - post detail with breadcrumb, categories, and TOC sidebar
//! - [`status`] - "Post not found" and fetch error pages
//!
//! Every view is wrapped in the shared layout from [`crate::embed::page`].

pub mod detail;
pub mod list;
pub mod status;

pub use detail::detail_page;
pub use list::{Pagination, category_page, list_page};
pub use status::{error_page, not_found_page};

use chrono::Datelike;

use crate::config::SiteConfig;
use crate::embed::page::{LAYOUT_HTML, LayoutVars};
use crate::embed::serve::LIVE_JS_PATH;
use crate::post::Post;
use crate::utils::html::escape;
use crate::utils::PATH_SEGMENT;

/// Wrap a view body in the page layout.
fn shell(config: &SiteConfig, view: &str, title: &str, body: &str) -> String {
    let site = &config.site;
    let full_title = if title.is_empty() {
        escape(&site.title).into_owned()
    } else {
        format!("{} - {}", escape(title), escape(&site.title))
    };
    let scripts = format!(r#"<script src="{LIVE_JS_PATH}" defer></script>"#);
    let home = site.collection_path();

    LAYOUT_HTML.render(&LayoutVars {
        lang: &escape(&site.language),
        title: &full_title,
        site_title: &escape(&site.title),
        home: &home,
        view,
        footer: &footer(config),
        scripts: &scripts,
        body,
    })
}

fn footer(config: &SiteConfig) -> String {
    let site = &config.site;
    if site.copyright.is_empty() {
        let year = chrono::Local::now().year();
        format!("&copy; {year} {}. All rights reserved.", escape(&site.title))
    } else {
        escape(&site.copyright).into_owned()
    }
}

/// URL path of a category view, e.g. `/category/Rust`.
pub fn category_path(tag: &str) -> String {
    format!(
        "/category/{}",
        percent_encoding::utf8_percent_encode(tag, PATH_SEGMENT)
    )
}

/// Tag chips linking to their category views.
fn tag_list(tags: impl IntoIterator<Item = impl AsRef<str>>, id: Option<&str>) -> String {
    let items: String = tags
        .into_iter()
        .map(|tag| {
            let tag = tag.as_ref();
            format!(
                r#"<li><a class="tag" href="{}">{}</a></li>"#,
                escape(&category_path(tag)),
                escape(tag)
            )
        })
        .collect();
    match id {
        Some(id) => format!(r#"<ul class="tags" id="{id}">{items}</ul>"#),
        None => format!(r#"<ul class="tags">{items}</ul>"#),
    }
}

/// One post card for list and category views.
fn post_card(config: &SiteConfig, post: &Post) -> String {
    let title = escape(&post.title);
    let cover = post
        .cover
        .as_deref()
        .map(|src| {
            format!(
                r#"<img src="{}" alt="Cover image for {title}" loading="lazy">"#,
                escape(src)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<article class="card">{cover}<h3>{title}</h3>{tags}<p>{preview}</p><div><a class="button" href="{href}">Read More &gt;</a></div></article>"#,
        tags = tag_list(&post.tags, None),
        preview = escape(&post.preview()),
        href = escape(&config.site.post_path(&post.slug)),
    )
}
