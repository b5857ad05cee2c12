//! Post detail view.
//!
//! ```text
//! Home / blogs / {title}
//! ┌──────────────┬───────────────────────────┐
//! │ [toggle]     │ # {title}                 │
//! │ Categories   │                           │
//! │  tag tag     │ rendered post body        │
//! │ Contents     │                           │
//! │  heading     │                           │
//! │    heading   │                           │
//! └──────────────┴───────────────────────────┘
//! ```

use super::{shell, tag_list};
use crate::config::SiteConfig;
use crate::post::Post;
use crate::toc::TableOfContents;
use crate::utils::html::escape;

/// Render the full detail page for a rendered post.
pub fn detail_page(config: &SiteConfig, post: &Post, html: &str, toc: &TableOfContents) -> String {
    let site = &config.site;
    let title = escape(&post.title);

    let breadcrumb = format!(
        r#"<nav class="breadcrumb" aria-label="Breadcrumb"><a href="{home}">Home</a> / <a href="{home}">{collection}</a> / <span id="post-crumb">{title}</span></nav>"#,
        home = escape(&site.collection_path()),
        collection = escape(&site.collection),
    );

    let sidebar = format!(
        r#"<aside class="sidebar" id="sidebar"><button id="sidebar-toggle" type="button" aria-controls="sidebar" aria-expanded="false">Contents</button><section class="categories"><h2>Categories</h2>{tags}</section><section class="toc"><h2>Table of Contents</h2>{toc}</section></aside>"#,
        tags = tag_list(&post.tags, Some("post-tags")),
        toc = toc_list(toc),
    );

    let body = format!(
        r#"{breadcrumb}
<div class="post-layout" data-slug="{slug}" data-collection="{collection}">{sidebar}<article class="post-content"><h1 class="post-title" id="post-title">{title}</h1><div class="post-body" id="post-body">{html}</div></article></div>"#,
        slug = escape(&post.slug),
        collection = escape(&site.collection),
    );

    shell(config, "detail", &post.title, &body)
}

/// Table of contents as nested-looking list items, one class per level.
pub fn toc_list(toc: &TableOfContents) -> String {
    if toc.is_empty() {
        return r#"<ul id="toc-list"></ul>"#.to_string();
    }
    let items: String = toc
        .entries()
        .iter()
        .map(|heading| {
            let id = escape(&heading.id);
            format!(
                r##"<li class="toc-level-{level}"><a href="#{href}" data-id="{id}">{title}</a></li>"##,
                level = heading.level,
                href = escape(
                    &percent_encoding::utf8_percent_encode(&heading.id, crate::utils::PATH_SEGMENT)
                        .to_string()
                ),
                title = escape(&heading.title),
            )
        })
        .collect();
    format!(r#"<ul id="toc-list">{items}</ul>"#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::{MarkdownOptions, render};
    use crate::post::test_post;

    #[test]
    fn test_detail_page_layout() {
        let config = SiteConfig::default();
        let post = test_post("1", "evolution-of-rpgs", &["Games", "History"]);
        let doc = render("# Evolution\n\n## Early Days\n\n### Console RPGs\n", &MarkdownOptions::default())
            .unwrap();

        let html = detail_page(&config, &post, &doc.html, &doc.headings);
        assert!(html.contains(r#"data-view="detail""#));
        assert!(html.contains(r#"data-slug="evolution-of-rpgs""#));
        assert!(html.contains(r#"<a href="/blogs">blogs</a>"#));
        assert!(html.contains(r#"href="/category/Games""#));
        assert!(html.contains(r##"<li class="toc-level-2"><a href="#early-days" data-id="early-days">Early Days</a></li>"##));
        assert!(html.contains(r#"<li class="toc-level-3">"#));
        assert!(html.contains(r#"<h2 id="early-days">Early Days</h2>"#));
    }

    #[test]
    fn test_toc_list_escapes() {
        let toc = TableOfContents::new(vec![crate::toc::RenderedHeading::new(
            "a\"b",
            "<script>",
            2,
        )]);
        let html = toc_list(&toc);
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains(r#"data-id="a&quot;b""#));
        assert!(html.contains(r##"href="#a%22b""##));
    }

    #[test]
    fn test_empty_toc() {
        assert_eq!(toc_list(&TableOfContents::default()), r#"<ul id="toc-list"></ul>"#);
    }
}
