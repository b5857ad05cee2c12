//! WebSocket server for the live channel.
//!
//! One thread accepts connections; each connection gets its own thread that
//! owns a [`LiveSession`] and polls three sources in turn: browser frames,
//! fetch completions, and clock ticks.

use std::io::ErrorKind;
use std::net::{IpAddr, TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::Result;
use tokio::runtime::Handle;
use tungstenite::{Message, WebSocket};

use super::lifecycle;
use crate::core::{LiveSessionGuard, is_shutdown, live_sessions};
use crate::markdown::MarkdownOptions;
use crate::post::{ContentFetcher, DocumentStore, ObjectStore};
use crate::view::{ClientMessage, LiveMessage, LiveSession};
use crate::{debug, log};

/// Idle wait between polls of a connection.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Idle wait between accept attempts.
const ACCEPT_INTERVAL: Duration = Duration::from_millis(100);

/// Running live channel acceptor.
pub struct LiveServer {
    port: u16,
    handle: JoinHandle<()>,
}

impl LiveServer {
    /// Port the browser should connect to.
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn into_handle(self) -> JoinHandle<()> {
        self.handle
    }
}

/// Bind the live channel and start accepting connections.
pub fn start<D: DocumentStore, O: ObjectStore>(
    interface: IpAddr,
    base_port: u16,
    fetcher: ContentFetcher<D, O>,
    options: MarkdownOptions,
    runtime: Handle,
) -> Result<LiveServer> {
    let (listener, port) = lifecycle::bind_live_listener(interface, base_port)?;
    listener.set_nonblocking(true)?;

    let handle = thread::Builder::new()
        .name("folio-live".into())
        .spawn(move || accept_loop(listener, fetcher, options, runtime))?;

    Ok(LiveServer { port, handle })
}

fn accept_loop<D: DocumentStore, O: ObjectStore>(
    listener: TcpListener,
    fetcher: ContentFetcher<D, O>,
    options: MarkdownOptions,
    runtime: Handle,
) {
    while !is_shutdown() {
        match listener.accept() {
            Ok((stream, addr)) => {
                debug!("live"; "client connected: {}", addr);
                let session = LiveSession::new(fetcher.clone(), options.clone(), runtime.clone());
                if let Err(e) = thread::Builder::new()
                    .name("folio-live-conn".into())
                    .spawn(move || serve_connection(stream, session))
                {
                    log!("live"; "failed to spawn connection thread: {}", e);
                }
            }
            Err(ref e) if e.kind() == ErrorKind::WouldBlock => thread::sleep(ACCEPT_INTERVAL),
            Err(e) => {
                log!("live"; "accept error: {}", e);
                thread::sleep(ACCEPT_INTERVAL);
            }
        }
    }
}

fn serve_connection<D: DocumentStore, O: ObjectStore>(
    stream: TcpStream,
    mut session: LiveSession<D, O>,
) {
    // Blocking during the handshake, polled afterwards
    let _ = stream.set_nonblocking(false);
    let mut ws = match tungstenite::accept(stream) {
        Ok(ws) => ws,
        Err(e) => {
            log!("live"; "handshake failed: {}", e);
            return;
        }
    };
    let _ = ws.get_ref().set_nonblocking(true);

    let (guard, total) = LiveSessionGuard::open();
    debug!("live"; "session opened (total: {})", total);

    if let Err(e) = run_session(&mut ws, &mut session) {
        debug!("live"; "session ended: {}", e);
    }

    session.teardown();
    let _ = ws.close(None);
    let _ = ws.flush();
    drop(guard);
    debug!("live"; "session closed ({} open)", live_sessions());
}

/// Pump one connection until the client leaves or the server shuts down.
fn run_session<D: DocumentStore, O: ObjectStore>(
    ws: &mut WebSocket<TcpStream>,
    session: &mut LiveSession<D, O>,
) -> Result<(), tungstenite::Error> {
    send(ws, &[LiveMessage::connected()])?;

    while !is_shutdown() {
        let mut busy = false;

        match ws.read() {
            Ok(Message::Text(text)) => {
                busy = true;
                match ClientMessage::parse(&text) {
                    Some(message) => {
                        let frames = session.on_client(message);
                        send(ws, &frames)?;
                    }
                    None => debug!("live"; "ignoring frame: {}", text.as_str()),
                }
            }
            Ok(Message::Close(_)) => return Ok(()),
            Ok(_) => busy = true,
            Err(tungstenite::Error::Io(ref e)) if e.kind() == ErrorKind::WouldBlock => {}
            Err(e) => return Err(e),
        }

        while let Ok(completion) = session.completions().try_recv() {
            busy = true;
            let frames = session.on_fetched(completion);
            send(ws, &frames)?;
        }

        while let Ok(tick) = session.ticks().try_recv() {
            busy = true;
            send(ws, &[LiveMessage::clock(tick)])?;
        }

        flush(ws)?;

        if !busy {
            thread::sleep(POLL_INTERVAL);
        }
    }

    Ok(())
}

fn send(ws: &mut WebSocket<TcpStream>, frames: &[LiveMessage]) -> Result<(), tungstenite::Error> {
    for frame in frames {
        match ws.write(Message::Text(frame.to_json().into())) {
            Ok(()) => {}
            Err(tungstenite::Error::Io(ref e)) if e.kind() == ErrorKind::WouldBlock => {}
            Err(e) => return Err(e),
        }
    }
    flush(ws)
}

/// Flush buffered frames; a full socket buffer is retried on the next poll.
fn flush(ws: &mut WebSocket<TcpStream>) -> Result<(), tungstenite::Error> {
    match ws.flush() {
        Err(tungstenite::Error::Io(ref e)) if e.kind() == ErrorKind::WouldBlock => Ok(()),
        other => other,
    }
}
