//! Markdown to HTML rendering with heading side-output.
//!
//! [`render`] turns raw Markdown into an HTML fragment and, in the same pass,
//! collects the document's headings with the anchor ids it assigned. The
//! renderer is total: the only failure is input over the configured size limit.
//!
//! Heading ids, in order of precedence:
//!
//! 1. an explicit attribute id (`## Setup {#install}`)
//! 2. the slugified title, when `slugify_headings` is on and the slug is non-empty
//! 3. `heading-{n}`, where `n` counts headings from 1 in document order
//!
//! Raw HTML in the source is emitted as escaped text.

mod slug;

pub use slug::slugify;

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::config::section::SlugConfig;
use crate::toc::{RenderedHeading, TableOfContents, normalize_title};

/// Options for one render call.
#[derive(Debug, Clone)]
pub struct MarkdownOptions {
    /// Enable tables, strikethrough, task lists and footnotes.
    pub github_flavored: bool,
    /// Derive heading ids from titles (otherwise positional ids).
    pub slugify_headings: bool,
    /// Slug settings used when `slugify_headings` is on.
    pub slug: SlugConfig,
    /// Inputs longer than this fail with [`RenderError::InputTooLarge`].
    pub max_input_bytes: usize,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            github_flavored: true,
            slugify_headings: true,
            slug: SlugConfig::default(),
            max_input_bytes: 4 * 1024 * 1024,
        }
    }
}

impl MarkdownOptions {
    fn to_pulldown_options(&self) -> Options {
        let mut opts = Options::ENABLE_HEADING_ATTRIBUTES;
        if self.github_flavored {
            opts.insert(Options::ENABLE_TABLES);
            opts.insert(Options::ENABLE_STRIKETHROUGH);
            opts.insert(Options::ENABLE_TASKLISTS);
            opts.insert(Options::ENABLE_FOOTNOTES);
        }
        opts
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("markdown input is {size} bytes, limit is {limit}")]
    InputTooLarge { size: usize, limit: usize },
}

/// Output of [`render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub html: String,
    pub headings: TableOfContents,
}

/// Render Markdown to an HTML fragment plus its table of contents.
///
/// Deterministic: the same input and options always produce identical output.
pub fn render(markdown: &str, options: &MarkdownOptions) -> Result<RenderedDocument, RenderError> {
    if markdown.len() > options.max_input_bytes {
        return Err(RenderError::InputTooLarge {
            size: markdown.len(),
            limit: options.max_input_bytes,
        });
    }

    let mut events: Vec<Event> = Parser::new_ext(markdown, options.to_pulldown_options())
        .map(sanitize)
        .collect();
    let headings = assign_heading_ids(&mut events, options);

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());

    Ok(RenderedDocument {
        html: out,
        headings: TableOfContents::new(headings),
    })
}

/// Raw HTML passes through as text.
fn sanitize(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    }
}

/// Fill in missing heading ids and collect the headings in document order.
///
/// Titles follow the rendered text content: image alt text is dropped and
/// footnote references contribute their number, counted the way
/// `html::push_html` counts them.
fn assign_heading_ids(events: &mut [Event<'_>], options: &MarkdownOptions) -> Vec<RenderedHeading> {
    let mut headings = Vec::new();
    let mut footnotes: FxHashMap<String, usize> = FxHashMap::default();
    let mut open: Option<(usize, String)> = None;
    let mut image_depth = 0usize;

    for i in 0..events.len() {
        if matches!(events[i], Event::End(TagEnd::Heading(_))) {
            if let Some((start, text)) = open.take() {
                let ordinal = headings.len() + 1;
                if let Some(heading) = finish_heading(&mut events[start], &text, ordinal, options) {
                    headings.push(heading);
                }
            }
            continue;
        }

        match &events[i] {
            Event::Start(Tag::Heading { .. }) => open = Some((i, String::new())),
            Event::Start(Tag::Image { .. }) => image_depth += 1,
            Event::End(TagEnd::Image) => image_depth = image_depth.saturating_sub(1),
            Event::Start(Tag::FootnoteDefinition(name)) => {
                footnote_number(&mut footnotes, name);
            }
            Event::FootnoteReference(name) => {
                let number = footnote_number(&mut footnotes, name);
                if let Some((_, text)) = open.as_mut().filter(|_| image_depth == 0) {
                    text.push_str(&number.to_string());
                }
            }
            Event::Text(t) | Event::Code(t) if image_depth == 0 => {
                if let Some((_, text)) = open.as_mut() {
                    text.push_str(t);
                }
            }
            Event::SoftBreak | Event::HardBreak if image_depth == 0 => {
                if let Some((_, text)) = open.as_mut() {
                    text.push(' ');
                }
            }
            _ => {}
        }
    }

    headings
}

/// Footnotes are numbered by first appearance, references and definitions alike.
fn footnote_number(numbers: &mut FxHashMap<String, usize>, name: &str) -> usize {
    let next = numbers.len() + 1;
    *numbers.entry(name.to_string()).or_insert(next)
}

fn finish_heading(
    event: &mut Event<'_>,
    text: &str,
    ordinal: usize,
    options: &MarkdownOptions,
) -> Option<RenderedHeading> {
    let Event::Start(Tag::Heading { level, id, .. }) = event else {
        return None;
    };
    let title = normalize_title(text);
    let anchor = match id.as_ref() {
        Some(explicit) => explicit.to_string(),
        None => {
            let generated = heading_id(&title, ordinal, options);
            *id = Some(CowStr::from(generated.clone()));
            generated
        }
    };
    Some(RenderedHeading {
        id: anchor,
        title,
        level: *level as u8,
    })
}

fn heading_id(title: &str, ordinal: usize, options: &MarkdownOptions) -> String {
    if options.slugify_headings {
        let slug = slugify(title, &options.slug);
        if !slug.is_empty() {
            return slug;
        }
    }
    format!("heading-{ordinal}")
}
