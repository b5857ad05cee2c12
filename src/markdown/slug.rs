//! Heading anchor slugification.

use crate::config::section::{SlugCase, SlugConfig, SlugMode};

/// Characters removed in safe mode: they break or change meaning inside a URL fragment.
const URL_HOSTILE: &[char] = &[
    '#', '?', '%', '&', '/', '\\', '"', '\'', '<', '>', '`', '{', '}', '|', '^', '[', ']',
];

/// Turn a heading title into an anchor id according to `config`.
///
/// May return an empty string (e.g. a title made only of punctuation);
/// callers fall back to a positional id in that case.
pub fn slugify(text: &str, config: &SlugConfig) -> String {
    let sep = config.separator.as_char();
    let slug = match config.mode {
        SlugMode::Full => full(text, sep),
        SlugMode::Safe => safe(text, sep),
        SlugMode::No => text
            .trim()
            .chars()
            .map(|c| if c.is_whitespace() { sep } else { c })
            .collect(),
    };
    apply_case(slug, config.case)
}

fn full(text: &str, sep: char) -> String {
    let ascii = deunicode::deunicode(text);
    let mapped = ascii.chars().filter_map(|c| {
        if c.is_ascii_alphanumeric() {
            Some(c)
        } else if c.is_whitespace() || c == '-' || c == '_' {
            Some(sep)
        } else {
            None
        }
    });
    collapse(mapped, sep)
}

fn safe(text: &str, sep: char) -> String {
    let mapped = text.chars().filter_map(|c| {
        if c.is_whitespace() {
            Some(sep)
        } else if URL_HOSTILE.contains(&c) || c.is_control() {
            None
        } else {
            Some(c)
        }
    });
    collapse(mapped, sep)
}

/// Collapse separator runs into one and strip leading/trailing separators.
fn collapse(chars: impl Iterator<Item = char>, sep: char) -> String {
    let mut out = String::new();
    let mut pending_sep = false;
    for c in chars {
        if c == sep {
            pending_sep = true;
            continue;
        }
        if pending_sep && !out.is_empty() {
            out.push(sep);
        }
        pending_sep = false;
        out.push(c);
    }
    out
}

fn apply_case(slug: String, case: SlugCase) -> String {
    match case {
        SlugCase::Lower => slug.to_lowercase(),
        SlugCase::Upper => slug.to_uppercase(),
        SlugCase::Preserve => slug,
    }
}
