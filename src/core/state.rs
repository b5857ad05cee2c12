//! Process-wide serve state.
//!
//! - `SHUTDOWN`: Ctrl+C received, loops should wind down
//! - `LIVE_SESSIONS`: open live-channel connections

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use tiny_http::Server;

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Open live-channel connections
static LIVE_SESSIONS: AtomicUsize = AtomicUsize::new(0);

/// HTTP server reference for graceful shutdown
static SERVER: OnceLock<Arc<Server>> = OnceLock::new();

// =============================================================================
// SHUTDOWN state
// =============================================================================

/// Setup the global Ctrl+C handler. Call once at program start
///
/// Before `register_server()` the process exits right away. Afterwards the
/// HTTP server is unblocked and the live channel threads see `is_shutdown()`.
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        SHUTDOWN.store(true, Ordering::SeqCst);

        if let Some(server) = SERVER.get() {
            crate::log!("serve"; "shutting down...");
            server.unblock();
        } else {
            std::process::exit(0);
        }
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Register the HTTP server for graceful shutdown
pub fn register_server(server: Arc<Server>) {
    let _ = SERVER.set(server);
}

/// Check if shutdown has been requested
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

// =============================================================================
// LIVE_SESSIONS
// =============================================================================

/// RAII count of one open live connection.
pub struct LiveSessionGuard(());

impl LiveSessionGuard {
    /// Count a new connection; returns the guard and the new total.
    pub fn open() -> (Self, usize) {
        let total = LIVE_SESSIONS.fetch_add(1, Ordering::SeqCst) + 1;
        (Self(()), total)
    }
}

impl Drop for LiveSessionGuard {
    fn drop(&mut self) {
        LIVE_SESSIONS.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Number of open live connections
pub fn live_sessions() -> usize {
    LIVE_SESSIONS.load(Ordering::SeqCst)
}
