//! One live connection's worth of view logic.
//!
//! A [`LiveSession`] turns client frames into server frames. It owns the
//! connection's [`PostView`], its [`ScrollFeed`], and the optional clock
//! ticker. Fetches run on the shared runtime and report back through
//! [`LiveSession::completions`]; the socket loop feeds them to
//! [`LiveSession::on_fetched`].

use std::sync::Arc;

use crossbeam::channel::{Receiver, Sender, unbounded};
use tokio::runtime::Handle;

use super::clock::{ClockTick, ClockTicker};
use super::feed::ScrollFeed;
use super::message::{ClientMessage, LiveMessage};
use super::state::{FetchTicket, PostView, ViewState};
use crate::markdown::MarkdownOptions;
use crate::post::{ContentError, ContentFetcher, DocumentStore, FetchedPost, ObjectStore};

/// A finished fetch, tagged with the navigation it belongs to.
pub type Completion = (FetchTicket, Result<FetchedPost, ContentError>);

pub struct LiveSession<D, O> {
    view: PostView,
    feed: Arc<ScrollFeed>,
    fetcher: ContentFetcher<D, O>,
    runtime: Handle,
    completions_tx: Sender<Completion>,
    completions_rx: Receiver<Completion>,
    ticks_tx: Sender<ClockTick>,
    ticks_rx: Receiver<ClockTick>,
    clock: Option<ClockTicker>,
}

impl<D: DocumentStore, O: ObjectStore> LiveSession<D, O> {
    pub fn new(fetcher: ContentFetcher<D, O>, options: MarkdownOptions, runtime: Handle) -> Self {
        let feed = Arc::new(ScrollFeed::new());
        let (completions_tx, completions_rx) = unbounded();
        let (ticks_tx, ticks_rx) = unbounded();
        Self {
            view: PostView::new(Arc::clone(&feed), options),
            feed,
            fetcher,
            runtime,
            completions_tx,
            completions_rx,
            ticks_tx,
            ticks_rx,
            clock: None,
        }
    }

    pub fn view(&self) -> &PostView {
        &self.view
    }

    pub fn completions(&self) -> &Receiver<Completion> {
        &self.completions_rx
    }

    pub fn ticks(&self) -> &Receiver<ClockTick> {
        &self.ticks_rx
    }

    pub fn clock_running(&self) -> bool {
        self.clock.is_some()
    }

    /// Handle one frame from the browser.
    pub fn on_client(&mut self, message: ClientMessage) -> Vec<LiveMessage> {
        match message {
            ClientMessage::Navigate { slug } => {
                self.stop_clock();
                match self.view.navigate(&slug) {
                    Some(ticket) => {
                        self.spawn_fetch(ticket);
                        vec![LiveMessage::Loading { slug }]
                    }
                    None => Vec::new(),
                }
            }
            ClientMessage::Scroll { headings } => {
                self.feed.publish(&headings);
                self.view
                    .observe_scroll()
                    .map(|id| LiveMessage::Active { id })
                    .into_iter()
                    .collect()
            }
            ClientMessage::Clock {} => {
                if self.clock.is_none() {
                    self.clock = Some(ClockTicker::start(&self.runtime, self.ticks_tx.clone()));
                }
                vec![LiveMessage::clock(ClockTick::now())]
            }
            ClientMessage::Leave {} => {
                self.view.teardown();
                Vec::new()
            }
        }
    }

    /// Apply a fetch completion. Stale completions produce no frames.
    pub fn on_fetched(&mut self, (ticket, result): Completion) -> Vec<LiveMessage> {
        if !self.view.complete(&ticket, result) {
            return Vec::new();
        }
        state_frame(self.view.state()).into_iter().collect()
    }

    /// Stop everything this session started.
    pub fn teardown(&mut self) {
        self.stop_clock();
        self.view.teardown();
    }

    /// Stop the ticker and discard ticks it already queued.
    ///
    /// The tick channel is replaced, so a tick sent by the aborted task while
    /// it was still running never reaches the socket.
    fn stop_clock(&mut self) {
        if self.clock.take().is_none() {
            return;
        }
        let (ticks_tx, ticks_rx) = unbounded();
        self.ticks_tx = ticks_tx;
        self.ticks_rx = ticks_rx;
    }

    fn spawn_fetch(&self, ticket: FetchTicket) {
        let fetcher = self.fetcher.clone();
        let tx = self.completions_tx.clone();
        self.runtime.spawn(async move {
            let result = fetcher.fetch(ticket.slug()).await;
            // The receiver is gone once the connection closes
            let _ = tx.send((ticket, result));
        });
    }
}

impl<D, O> Drop for LiveSession<D, O> {
    fn drop(&mut self) {
        self.clock = None;
        self.view.teardown();
    }
}

/// Frame describing a settled view state.
fn state_frame(state: &ViewState) -> Option<LiveMessage> {
    match state {
        ViewState::Ready(ready) => Some(LiveMessage::content(
            &ready.post.slug,
            &ready.post.title,
            &ready.html,
            &ready.toc,
            &ready.post.tags,
        )),
        ViewState::Failed {
            slug,
            error: ContentError::NotFound(_),
        } => Some(LiveMessage::NotFound { slug: slug.clone() }),
        ViewState::Failed { slug, error } => Some(LiveMessage::Error {
            slug: slug.clone(),
            message: error.to_string(),
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::memory::{MemoryDocumentStore, MemoryObjectStore};
    use crate::post::test_post;
    use crate::view::tracker::HeadingOffset;
    use std::time::Duration;

    type Session = LiveSession<MemoryDocumentStore, MemoryObjectStore>;

    fn session(objects: MemoryObjectStore) -> Session {
        let documents = MemoryDocumentStore::new([
            test_post("1", "slow", &["Rust"]),
            test_post("2", "fast", &["Rust"]),
        ]);
        LiveSession::new(
            ContentFetcher::new(documents, objects),
            MarkdownOptions::default(),
            Handle::current(),
        )
    }

    async fn next_completion(session: &Session) -> Completion {
        let rx = session.completions().clone();
        tokio::task::spawn_blocking(move || rx.recv_timeout(Duration::from_secs(5)))
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_navigate_fetch_and_scroll() {
        let objects = MemoryObjectStore::new().with_blob("fast.md", "# Fast\n\n## Part One\n");
        let mut session = session(objects);

        let frames = session.on_client(ClientMessage::Navigate { slug: "fast".into() });
        assert_eq!(frames, vec![LiveMessage::Loading { slug: "fast".into() }]);

        let completion = next_completion(&session).await;
        let frames = session.on_fetched(completion);
        assert!(matches!(&frames[..], [LiveMessage::Content { slug, .. }] if slug == "fast"));

        let frames = session.on_client(ClientMessage::Scroll {
            headings: vec![HeadingOffset::new("fast", -20.0), HeadingOffset::new("part-one", 60.0)],
        });
        assert_eq!(frames, vec![LiveMessage::Active { id: "part-one".into() }]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_slow_response_for_previous_slug_is_dropped() {
        let objects = MemoryObjectStore::new()
            .with_blob("slow.md", "# Slow\n")
            .with_blob("fast.md", "# Fast\n")
            .with_delay("slow.md", Duration::from_millis(300));
        let mut session = session(objects);

        session.on_client(ClientMessage::Navigate { slug: "slow".into() });
        session.on_client(ClientMessage::Navigate { slug: "fast".into() });

        let first = next_completion(&session).await;
        assert_eq!(first.0.slug(), "fast");
        assert_eq!(session.on_fetched(first).len(), 1);

        let second = next_completion(&session).await;
        assert_eq!(second.0.slug(), "slow");
        assert!(session.on_fetched(second).is_empty());
        assert_eq!(session.view().state().slug(), Some("fast"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_not_found_fetches_once() {
        let mut session = session(MemoryObjectStore::new());

        session.on_client(ClientMessage::Navigate { slug: "ghost".into() });
        let completion = next_completion(&session).await;
        assert_eq!(
            session.on_fetched(completion),
            vec![LiveMessage::NotFound { slug: "ghost".into() }]
        );

        // Re-requesting the failed slug does nothing
        assert!(session.on_client(ClientMessage::Navigate { slug: "ghost".into() }).is_empty());
        assert!(session.completions().try_recv().is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_fetch_error_frame() {
        // Document exists, blob does not
        let mut session = session(MemoryObjectStore::new());
        session.on_client(ClientMessage::Navigate { slug: "fast".into() });
        let completion = next_completion(&session).await;
        let frames = session.on_fetched(completion);
        assert!(matches!(&frames[..], [LiveMessage::Error { slug, .. }] if slug == "fast"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_clock_lifecycle() {
        let mut session = session(MemoryObjectStore::new());

        let frames = session.on_client(ClientMessage::Clock {});
        assert!(matches!(&frames[..], [LiveMessage::Clock { .. }]));
        assert!(session.clock_running());

        session.on_client(ClientMessage::Navigate { slug: "fast".into() });
        assert!(!session.clock_running());

        session.on_client(ClientMessage::Clock {});
        session.teardown();
        assert!(!session.clock_running());
        assert_eq!(session.view().state().name(), "idle");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_navigate_discards_queued_ticks() {
        let mut session = session(MemoryObjectStore::new());
        session.on_client(ClientMessage::Clock {});

        // The first tick fires as soon as the ticker starts
        for _ in 0..100 {
            if !session.ticks().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert!(!session.ticks().is_empty());

        session.on_client(ClientMessage::Navigate { slug: "fast".into() });
        assert!(session.ticks().is_empty());

        tokio::time::sleep(Duration::from_millis(1200)).await;
        assert!(session.ticks().try_recv().is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_leave_tears_down_view() {
        let objects = MemoryObjectStore::new()
            .with_blob("fast.md", "# Fast\n\n## Part One\n")
            .with_blob("slow.md", "# Slow\n")
            .with_delay("slow.md", Duration::from_millis(200));
        let mut session = session(objects);

        session.on_client(ClientMessage::Navigate { slug: "fast".into() });
        let completion = next_completion(&session).await;
        assert_eq!(session.on_fetched(completion).len(), 1);
        assert_eq!(session.view().state().name(), "ready");
        assert_eq!(session.feed.subscriber_count(), 1);

        assert!(session.on_client(ClientMessage::Leave {}).is_empty());
        assert_eq!(session.view().state().name(), "idle");
        assert_eq!(session.feed.subscriber_count(), 0);
        let scroll = ClientMessage::Scroll {
            headings: vec![HeadingOffset::new("part-one", 0.0)],
        };
        assert!(session.on_client(scroll).is_empty());

        // A fetch that lands after leaving is ignored
        session.on_client(ClientMessage::Navigate { slug: "slow".into() });
        session.on_client(ClientMessage::Leave {});
        let late = next_completion(&session).await;
        assert_eq!(late.0.slug(), "slow");
        assert!(session.on_fetched(late).is_empty());
        assert_eq!(session.view().state().name(), "idle");
    }
}
