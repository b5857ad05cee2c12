//! Post view state machine.
//!
//! ```text
//!            navigate(slug)
//!   Idle ─────────────────────▶ Fetching{slug}
//!                                 │        │
//!                      NotFound / │        │ fetched
//!                      Fetch err  ▼        ▼
//!                  Failed{slug} ◀── Rendering{slug} ──▶ Ready{post}
//!                              render err       rendered
//! ```
//!
//! Every `navigate` to a new slug bumps the generation and hands out a
//! [`FetchTicket`]. Completions carrying an older generation are dropped, so a
//! slow response for a previous post never overwrites the current one.

use std::sync::Arc;

use super::feed::{ScrollFeed, ScrollSubscription};
use super::tracker::ScrollTracker;
use crate::markdown::{self, MarkdownOptions};
use crate::post::{ContentError, FetchedPost, Post};
use crate::toc::TableOfContents;
use crate::debug;

/// Proof that a fetch was requested for a given navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    slug: String,
}

impl FetchTicket {
    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A post that has been fetched and rendered.
#[derive(Debug, Clone)]
pub struct ReadyPost {
    pub post: Post,
    pub html: String,
    pub toc: TableOfContents,
}

#[derive(Debug, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Fetching {
        slug: String,
    },
    Rendering {
        slug: String,
    },
    Ready(Box<ReadyPost>),
    Failed {
        slug: String,
        error: ContentError,
    },
}

impl ViewState {
    /// Slug this state is about, `None` when idle.
    pub fn slug(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Fetching { slug } | Self::Rendering { slug } | Self::Failed { slug, .. } => {
                Some(slug)
            }
            Self::Ready(ready) => Some(&ready.post.slug),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Fetching { .. } => "fetching",
            Self::Rendering { .. } => "rendering",
            Self::Ready(_) => "ready",
            Self::Failed { .. } => "failed",
        }
    }
}

/// One reader's view of one post at a time.
///
/// Owned by a single live connection; nothing in here is shared.
#[derive(Debug)]
pub struct PostView {
    state: ViewState,
    generation: u64,
    tracker: ScrollTracker,
    feed: Arc<ScrollFeed>,
    subscription: Option<ScrollSubscription>,
    options: MarkdownOptions,
}

impl PostView {
    pub fn new(feed: Arc<ScrollFeed>, options: MarkdownOptions) -> Self {
        Self {
            state: ViewState::Idle,
            generation: 0,
            tracker: ScrollTracker::new(),
            feed,
            subscription: None,
            options,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Table of contents of the post being shown, if any.
    pub fn toc(&self) -> Option<&TableOfContents> {
        match &self.state {
            ViewState::Ready(ready) => Some(&ready.toc),
            _ => None,
        }
    }

    pub fn active_id(&self) -> Option<&str> {
        self.tracker.active()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Start showing `slug`.
    ///
    /// Returns the ticket to fetch with, or `None` when `slug` is already the
    /// one being shown (including one that failed to load).
    pub fn navigate(&mut self, slug: &str) -> Option<FetchTicket> {
        if self.state.slug() == Some(slug) {
            return None;
        }

        self.clear();
        self.state = ViewState::Fetching {
            slug: slug.to_string(),
        };
        debug!("view"; "navigate {} (generation {})", slug, self.generation);

        Some(FetchTicket {
            generation: self.generation,
            slug: slug.to_string(),
        })
    }

    /// Apply a fetch result.
    ///
    /// Returns `false` if the ticket is stale and the result was discarded.
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        result: Result<FetchedPost, ContentError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!("view"; "discarding stale result for {}", ticket.slug);
            return false;
        }

        let fetched = match result {
            Ok(fetched) => fetched,
            Err(error) => {
                self.fail(&ticket.slug, error);
                return true;
            }
        };

        self.state = ViewState::Rendering {
            slug: ticket.slug.clone(),
        };
        match markdown::render(&fetched.markdown, &self.options) {
            Ok(doc) => {
                self.tracker.reset();
                self.subscription = Some(self.feed.subscribe());
                self.state = ViewState::Ready(Box::new(ReadyPost {
                    post: fetched.post,
                    html: doc.html,
                    toc: doc.headings,
                }));
            }
            Err(e) => self.fail(&ticket.slug, e.into()),
        }
        true
    }

    /// Consume the latest scroll sample, returning the active id if it changed.
    ///
    /// Offsets for ids outside the current table of contents are ignored.
    pub fn observe_scroll(&mut self) -> Option<String> {
        let sample = self.subscription.as_ref()?.latest()?;
        let toc = match &self.state {
            ViewState::Ready(ready) => &ready.toc,
            _ => return None,
        };

        let known: Vec<_> = sample
            .into_iter()
            .filter(|offset| toc.contains_id(&offset.id))
            .collect();
        self.tracker.observe(&known).map(str::to_string)
    }

    /// Return to idle, dropping the subscription and ignoring pending fetches.
    pub fn teardown(&mut self) {
        self.clear();
        self.state = ViewState::Idle;
    }

    /// Reset per-post state. Bumps the generation so in-flight results go stale.
    fn clear(&mut self) {
        self.generation += 1;
        self.subscription = None;
        self.tracker.reset();
    }

    fn fail(&mut self, slug: &str, error: ContentError) {
        debug!("view"; "{} failed: {}", slug, error);
        self.state = ViewState::Failed {
            slug: slug.to_string(),
            error,
        };
    }
}
