//! Server lifecycle management.

use crate::log;
use anyhow::{Context, Result};
use std::{
    fmt::Display,
    net::{IpAddr, SocketAddr, TcpListener},
    thread::{self, JoinHandle},
    time::Duration,
};
use tiny_http::Server;

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

/// Try `bind` on `base_port`, then on each following port until one succeeds.
fn bind_first_free<T, E: Display>(
    what: &str,
    interface: IpAddr,
    base_port: u16,
    mut bind: impl FnMut(SocketAddr) -> Result<T, E>,
) -> Result<(T, u16)> {
    let mut last_error = String::new();

    for offset in 0..MAX_PORT_RETRIES {
        let port = base_port.saturating_add(offset);
        match bind(SocketAddr::new(interface, port)) {
            Ok(bound) => {
                if offset > 0 {
                    log!(what; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((bound, port));
            }
            Err(e) => last_error = e.to_string(),
        }
    }

    Err(anyhow::anyhow!(
        "Failed to bind {} after {} attempts (ports {}-{}): {}",
        what,
        MAX_PORT_RETRIES,
        base_port,
        base_port.saturating_add(MAX_PORT_RETRIES - 1),
        last_error
    ))
}

/// Bind the HTTP server, with automatic port retry.
pub fn bind_with_retry(interface: IpAddr, base_port: u16) -> Result<(Server, SocketAddr)> {
    let (server, port) = bind_first_free("serve", interface, base_port, Server::http)?;
    let addr = server
        .server_addr()
        .to_ip()
        .unwrap_or(SocketAddr::new(interface, port));
    Ok((server, addr))
}

/// Bind the live channel listener, with automatic port retry.
///
/// Returns the listener and the port actually bound.
pub fn bind_live_listener(interface: IpAddr, base_port: u16) -> Result<(TcpListener, u16)> {
    let (listener, _) = bind_first_free("live", interface, base_port, TcpListener::bind)?;
    let port = listener.local_addr()?.port();
    Ok((listener, port))
}

/// Runtime that runs store fetches and clock ticks.
pub fn build_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("folio-io")
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")
}

/// Wait for a background thread to finish (max 2 seconds).
pub fn wait_for_shutdown(handle: Option<JoinHandle<()>>) {
    let Some(handle) = handle else { return };

    for _ in 0..40 {
        if handle.is_finished() {
            let _ = handle.join();
            return;
        }
        thread::sleep(Duration::from_millis(50));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

    #[test]
    fn test_retry_skips_taken_port() {
        let (taken, port) = bind_live_listener(LOCALHOST, 0).unwrap();
        assert_ne!(port, 0);

        let (_, next) = bind_live_listener(LOCALHOST, port).unwrap();
        assert_ne!(next, port);
        drop(taken);
    }

    #[test]
    fn test_retry_gives_up() {
        let result: Result<((), u16)> =
            bind_first_free("test", LOCALHOST, 4000, |_| Err::<(), _>("busy"));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("ports 4000-4009"));
        assert!(err.contains("busy"));
    }

    #[test]
    fn test_wait_for_finished_thread() {
        let handle = thread::spawn(|| {});
        wait_for_shutdown(Some(handle));
        wait_for_shutdown(None);
    }
}
