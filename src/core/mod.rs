//! Core process state shared across the codebase.

mod state;

pub use state::{
    LiveSessionGuard, is_shutdown, live_sessions, register_server, setup_shutdown_handler,
};
