//! Server-side view instances for the live channel.
//!
//! Each browser tab connected to the live channel gets one [`LiveSession`],
//! which owns one [`PostView`]:
//!
//! - [`state`] - content acquisition state machine and stale-response guard
//! - [`tracker`] - scroll offsets → active heading
//! - [`feed`] - per-connection scroll sample publish point
//! - [`clock`] - one-second clock ticker for the list view
//! - [`message`] - JSON frame protocol
//! - [`session`] - glue from frames to view operations

pub mod clock;
pub mod feed;
pub mod message;
pub mod session;
pub mod state;
pub mod tracker;

pub use message::{ClientMessage, LiveMessage};
pub use session::LiveSession;
pub use state::{FetchTicket, PostView, ViewState};
pub use tracker::{ACTIVE_THRESHOLD_PX, HeadingOffset, ScrollTracker};
