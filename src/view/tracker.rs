//! Scroll position → active heading.

use serde::{Deserialize, Serialize};

/// A heading counts as "reached" once its top edge is at or above this
/// distance from the top of the viewport, in CSS pixels.
pub const ACTIVE_THRESHOLD_PX: f64 = 100.0;

/// Top edge of one heading relative to the viewport, as reported by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingOffset {
    pub id: String,
    pub top: f64,
}

impl HeadingOffset {
    pub fn new(id: impl Into<String>, top: f64) -> Self {
        Self { id: id.into(), top }
    }
}

/// Tracks which heading the reader is currently in.
///
/// The active heading is the last one, in document order, whose top edge has
/// crossed [`ACTIVE_THRESHOLD_PX`]. When no heading qualifies the previous
/// answer stands.
#[derive(Debug, Default)]
pub struct ScrollTracker {
    active: Option<String>,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Forget the active heading. Called whenever new content is installed.
    pub fn reset(&mut self) {
        self.active = None;
    }

    /// Feed one sample of heading offsets, in document order.
    ///
    /// Returns the new active id if it changed, `None` otherwise.
    pub fn observe(&mut self, headings: &[HeadingOffset]) -> Option<&str> {
        let reached = headings
            .iter()
            .rev()
            .find(|heading| heading.top <= ACTIVE_THRESHOLD_PX)?;

        if self.active.as_deref() == Some(reached.id.as_str()) {
            return None;
        }
        self.active = Some(reached.id.clone());
        self.active.as_deref()
    }
}
