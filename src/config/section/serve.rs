//! `[serve]` section configuration.
//!
//! Contains server settings.
//!
//! # Example
//!
//! ```toml
//! [serve]
//! interface = "127.0.0.1"     # Network interface (127.0.0.1 = localhost only)
//! port = 5277                 # HTTP port number
//! live = true                 # Scroll-synced TOC, in-page navigation and clock
//! live_port = 35729           # WebSocket port for the live channel
//! ```
//!
//! Use `interface = "0.0.0.0"` to make the server accessible from LAN.

use std::net::{IpAddr, Ipv4Addr};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Network interface to bind.
    /// - `127.0.0.1` (default): localhost only
    /// - `0.0.0.0`: all interfaces (LAN accessible)
    pub interface: IpAddr,

    /// HTTP port number.
    pub port: u16,

    /// Enable the live channel.
    pub live: bool,

    /// WebSocket port for the live channel.
    pub live_port: u16,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 5277,
            live: true,
            live_port: 35729,
        }
    }
}

impl ServeConfig {
    pub const LIVE_PORT: FieldPath = FieldPath::new("serve.live_port");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.live && self.live_port == self.port {
            diag.error_with_hint(
                Self::LIVE_PORT,
                format!("live channel port {} collides with the HTTP port", self.live_port),
                "pick a different `live_port`, or set `live = false`",
            );
        }
    }
}
