//! `folio check`: fetch and render posts, report what would break the TOC.

use anyhow::{Result, bail};

use crate::config::SiteConfig;
use crate::log;
use crate::logger::{report_error, report_ok, report_warning};
use crate::markdown::MarkdownOptions;
use crate::post::{ContentFetcher, DocumentStore, ObjectStore, SiteFetcher};
use crate::toc::TableOfContents;
use crate::utils::plural_count;

/// Result of checking a single post.
#[derive(Debug, PartialEq)]
enum Outcome {
    Ok { headings: usize },
    Warnings(Vec<String>),
    Failed(String),
}

pub fn check_posts(config: &SiteConfig, slugs: &[String]) -> Result<()> {
    let fetcher = SiteFetcher::from_config(config)?;
    let options = config.render.markdown_options();

    let results = super::block_on(check_all(&fetcher, slugs, &options))??;
    if results.is_empty() {
        log!("check"; "no posts to check");
        return Ok(());
    }

    let mut failed = 0;
    let mut warned = 0;
    for (slug, outcome) in &results {
        match outcome {
            Outcome::Ok { headings } => {
                report_ok(&format!("{slug} ({})", plural_count(*headings, "heading")));
            }
            Outcome::Warnings(warnings) => {
                warned += 1;
                report_warning(slug, &warnings.join("\n"));
            }
            Outcome::Failed(error) => {
                failed += 1;
                report_error(slug, error);
            }
        }
    }

    if failed > 0 {
        bail!(
            "check failed: {} of {}",
            plural_count(failed, "post"),
            results.len()
        );
    }
    if warned > 0 {
        log!("check"; "{} with warnings", plural_count(warned, "post"));
    } else {
        log!("check"; "all {} ok", plural_count(results.len(), "post"));
    }
    Ok(())
}

/// Check the named slugs, or every post when none are named.
async fn check_all<D: DocumentStore, O: ObjectStore>(
    fetcher: &ContentFetcher<D, O>,
    slugs: &[String],
    options: &MarkdownOptions,
) -> Result<Vec<(String, Outcome)>> {
    let slugs: Vec<String> = if slugs.is_empty() {
        fetcher.list().await?.into_iter().map(|post| post.slug).collect()
    } else {
        slugs.to_vec()
    };

    let mut results = Vec::with_capacity(slugs.len());
    for slug in slugs {
        let outcome = check_one(fetcher, &slug, options).await;
        results.push((slug, outcome));
    }
    Ok(results)
}

async fn check_one<D: DocumentStore, O: ObjectStore>(
    fetcher: &ContentFetcher<D, O>,
    slug: &str,
    options: &MarkdownOptions,
) -> Outcome {
    let document = match fetcher.fetch_rendered(slug, options).await {
        Ok((_, document)) => document,
        Err(e) => return Outcome::Failed(e.to_string()),
    };

    let headings = &document.headings;
    let mut warnings: Vec<String> = headings
        .duplicate_ids()
        .into_iter()
        .map(|id| format!("duplicate heading id `{id}`"))
        .collect();

    if TableOfContents::extract(&document.html) != *headings {
        warnings.push("headings in rendered HTML differ from the table of contents".into());
    }

    if warnings.is_empty() {
        Outcome::Ok {
            headings: headings.len(),
        }
    } else {
        Outcome::Warnings(warnings)
    }
}
