//! Live channel message protocol.
//!
//! JSON text frames tagged by `type`.
//!
//! Client → server: `navigate`, `scroll`, `clock`, `leave`.
//!
//! Server → client: `connected`, `loading`, `content`, `not_found`, `error`,
//! `active`, `clock`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::clock::ClockTick;
use super::tracker::HeadingOffset;
use crate::toc::{RenderedHeading, TableOfContents};

/// Frame sent by the browser.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Show the post with this slug.
    Navigate { slug: String },
    /// Current heading offsets, in document order.
    Scroll { headings: Vec<HeadingOffset> },
    /// Start receiving clock ticks.
    Clock {},
    /// Leaving the detail view.
    Leave {},
}

impl ClientMessage {
    pub fn parse(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }
}

/// Frame sent to the browser.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveMessage {
    Connected {
        version: String,
    },
    Loading {
        slug: String,
    },
    Content {
        slug: String,
        title: String,
        html: String,
        toc: Vec<RenderedHeading>,
        tags: BTreeSet<String>,
    },
    NotFound {
        slug: String,
    },
    Error {
        slug: String,
        message: String,
    },
    Active {
        id: String,
    },
    Clock {
        time: String,
        date: String,
    },
}

impl LiveMessage {
    pub fn connected() -> Self {
        Self::Connected {
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn content(
        slug: &str,
        title: &str,
        html: &str,
        toc: &TableOfContents,
        tags: &BTreeSet<String>,
    ) -> Self {
        Self::Content {
            slug: slug.to_string(),
            title: title.to_string(),
            html: html.to_string(),
            toc: toc.entries().to_vec(),
            tags: tags.clone(),
        }
    }

    pub fn clock(tick: ClockTick) -> Self {
        Self::Clock {
            time: tick.time,
            date: tick.date,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"type":"error"}"#.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_client_messages() {
        assert_eq!(
            ClientMessage::parse(r#"{"type":"navigate","slug":"hello"}"#),
            Some(ClientMessage::Navigate {
                slug: "hello".into()
            })
        );
        assert_eq!(
            ClientMessage::parse(r#"{"type":"scroll","headings":[{"id":"a","top":-12.5}]}"#),
            Some(ClientMessage::Scroll {
                headings: vec![HeadingOffset::new("a", -12.5)]
            })
        );
        assert_eq!(
            ClientMessage::parse(r#"{"type":"clock"}"#),
            Some(ClientMessage::Clock {})
        );
        assert_eq!(
            ClientMessage::parse(r#"{"type":"leave"}"#),
            Some(ClientMessage::Leave {})
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(ClientMessage::parse("not json"), None);
        assert_eq!(ClientMessage::parse(r#"{"type":"explode"}"#), None);
        assert_eq!(ClientMessage::parse(r#"{"type":"navigate"}"#), None);
    }

    #[test]
    fn test_server_frames() {
        let json = LiveMessage::NotFound { slug: "x".into() }.to_json();
        assert_eq!(json, r#"{"type":"not_found","slug":"x"}"#);

        let json = LiveMessage::Active { id: "intro".into() }.to_json();
        assert_eq!(json, r#"{"type":"active","id":"intro"}"#);

        let json = LiveMessage::connected().to_json();
        assert!(json.starts_with(r#"{"type":"connected","version":""#));
    }

    #[test]
    fn test_content_frame_carries_toc() {
        let toc = TableOfContents::new(vec![RenderedHeading::new("a", "A", 2)]);
        let tags = BTreeSet::from(["Rust".to_string()]);
        let json = LiveMessage::content("s", "T", "<h2 id=\"a\">A</h2>", &toc, &tags).to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "content");
        assert_eq!(value["toc"][0]["id"], "a");
        assert_eq!(value["tags"][0], "Rust");
    }
}
