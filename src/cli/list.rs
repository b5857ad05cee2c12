//! `folio list`: posts in the collection.

use anyhow::Result;

use crate::config::SiteConfig;
use crate::log;
use crate::post::{Post, SiteFetcher};
use crate::utils::plural_count;

pub fn list_posts(config: &SiteConfig, tag: Option<&str>, json: bool) -> Result<()> {
    let fetcher = SiteFetcher::from_config(config)?;
    let posts = super::block_on(async {
        match tag {
            Some(tag) => fetcher.list_tagged(tag).await,
            None => fetcher.list().await,
        }
    })??;

    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }

    if posts.is_empty() {
        match tag {
            Some(tag) => log!("list"; "no posts tagged `{}`", tag),
            None => log!("list"; "no posts in {}", config.store.documents.display()),
        }
        return Ok(());
    }

    print!("{}", format_table(&posts));
    log!("list"; "{}", plural_count(posts.len(), "post"));
    Ok(())
}

/// Aligned `id  slug  title  [tags]` rows.
fn format_table(posts: &[Post]) -> String {
    let id_width = posts.iter().map(|p| p.id.chars().count()).max().unwrap_or(0);
    let slug_width = posts.iter().map(|p| p.slug.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    for post in posts {
        let tags: Vec<_> = post.tags.iter().map(String::as_str).collect();
        out.push_str(&format!(
            "{:<id_width$}  {:<slug_width$}  {}  [{}]\n",
            post.id,
            post.slug,
            post.title,
            tags.join(", ")
        ));
    }
    out
}
