//! Template types for typed variable injection.

use std::marker::PhantomData;

/// A set of values that fills a template's `__PLACEHOLDER__` markers.
pub trait TemplateVars {
    fn apply(&self, content: &str) -> String;
}

/// Embedded template text, tied to the variable set that fills it.
#[derive(Debug, Clone, Copy)]
pub struct Template<V> {
    content: &'static str,
    _marker: PhantomData<V>,
}

impl<V> Template<V> {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content,
            _marker: PhantomData,
        }
    }
}

impl<V: TemplateVars> Template<V> {
    pub fn render(&self, vars: &V) -> String {
        vars.apply(self.content)
    }
}

/// Replace `markers` in one left-to-right pass.
///
/// Substituted values are never rescanned, so a value that itself contains a
/// marker is inserted verbatim.
pub fn fill(content: &str, markers: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(pos) = rest.find("__") {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match markers.iter().find(|(marker, _)| tail.starts_with(marker)) {
            Some((marker, value)) => {
                out.push_str(value);
                rest = &tail[marker.len()..];
            }
            None => {
                out.push('_');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
