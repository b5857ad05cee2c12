//! `folio show`: render one post.

use anyhow::{Context, Result};

use crate::config::SiteConfig;
use crate::page::detail_page;
use crate::post::SiteFetcher;

/// Print the rendered body, or the full detail page with `page`.
pub fn show_post(config: &SiteConfig, slug: &str, page: bool) -> Result<()> {
    let fetcher = SiteFetcher::from_config(config)?;
    let options = config.render.markdown_options();
    let (post, document) = super::block_on(fetcher.fetch_rendered(slug, &options))?
        .with_context(|| format!("failed to show `{slug}`"))?;

    if page {
        println!("{}", detail_page(config, &post, &document.html, &document.headings));
    } else {
        print!("{}", document.html);
    }
    Ok(())
}
