//! `folio toc`: a post's table of contents.

use anyhow::{Context, Result};

use crate::config::SiteConfig;
use crate::post::SiteFetcher;
use crate::toc::TableOfContents;

pub fn print_toc(config: &SiteConfig, slug: &str, json: bool) -> Result<()> {
    let fetcher = SiteFetcher::from_config(config)?;
    let options = config.render.markdown_options();
    let (_, document) = super::block_on(fetcher.fetch_rendered(slug, &options))?
        .with_context(|| format!("failed to read table of contents of `{slug}`"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&document.headings)?);
    } else {
        print!("{}", outline(&document.headings));
    }
    Ok(())
}

/// Indented outline, two spaces per level below the shallowest heading.
fn outline(toc: &TableOfContents) -> String {
    let base = toc.base_level();
    toc.into_iter()
        .map(|heading| {
            let indent = "  ".repeat(usize::from(heading.level.saturating_sub(base)));
            format!("{indent}- {} (#{})\n", heading.title, heading.id)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::{MarkdownOptions, render};

    #[test]
    fn test_outline_indents_from_shallowest() {
        let doc = render(
            "## Intro\n\n### Details\n\n#### Deep\n\n## Outro\n",
            &MarkdownOptions::default(),
        )
        .unwrap();
        assert_eq!(
            outline(&doc.headings),
            "- Intro (#intro)\n  - Details (#details)\n    - Deep (#deep)\n- Outro (#outro)\n"
        );
    }

    #[test]
    fn test_outline_empty() {
        assert_eq!(outline(&TableOfContents::default()), "");
    }
}
