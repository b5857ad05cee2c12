//! Heading anchor slug configuration.

use serde::{Deserialize, Serialize};

/// Slug generation mode for heading anchors.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SlugMode {
    /// Full slugify: Unicode → ASCII, keep only alphanumerics and separators.
    Full,
    /// Safe mode: remove URL-hostile chars, preserve Unicode, use separator (default).
    #[default]
    Safe,
    /// Only replace whitespace with the separator and apply case.
    No,
}

/// Case transformation mode for slugs.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SlugCase {
    /// Convert to lowercase (default).
    #[default]
    Lower,
    /// Convert to UPPERCASE.
    Upper,
    /// Preserve original case.
    Preserve,
}

/// Separator character for slugs.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SlugSeparator {
    /// Dash separator (`-`) (default).
    #[default]
    Dash,
    /// Underscore separator (`_`).
    Underscore,
}

impl SlugSeparator {
    /// Get the character representation.
    pub const fn as_char(&self) -> char {
        match self {
            Self::Dash => '-',
            Self::Underscore => '_',
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SlugConfig {
    /// Slugify mode for heading anchors.
    pub mode: SlugMode,
    /// Separator character for spaces.
    pub separator: SlugSeparator,
    /// Case transformation.
    pub case: SlugCase,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.render.slug.mode, SlugMode::Safe);
        assert_eq!(config.render.slug.separator, SlugSeparator::Dash);
        assert_eq!(config.render.slug.case, SlugCase::Lower);
    }

    #[test]
    fn test_mode_parsing() {
        for (input, expected) in [
            ("full", SlugMode::Full),
            ("safe", SlugMode::Safe),
            ("no", SlugMode::No),
        ] {
            let config = test_parse_config(&format!("[render.slug]\nmode = \"{input}\""));
            assert_eq!(config.render.slug.mode, expected, "mode failed for {input}");
        }
    }

    #[test]
    fn test_separator_parsing() {
        let config = test_parse_config("[render.slug]\nseparator = \"underscore\"");
        assert_eq!(config.render.slug.separator.as_char(), '_');
    }
}
