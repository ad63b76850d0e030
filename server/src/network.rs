//! TCP network layer: frames newline-delimited JSON packets per
//! connection and funnels all traffic into the single dispatch loop.

use crate::commentary::Commentator;
use crate::gateway::{Gateway, NetEvent};
use crate::registry::RoomRegistry;
use crate::room::SessionId;
use log::{debug, error, info, warn};
use shared::Packet;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

/// Main server coordinating connection handling and intent dispatch.
///
/// Each accepted connection gets a reader task and a writer task that do
/// nothing but shuttle frames. Every decoded intent is queued onto one
/// event channel and processed to completion by the gateway before the
/// next, so per-room operations are strictly serialized.
pub struct Server {
    listener: TcpListener,
    gateway: Gateway,
    event_tx: mpsc::UnboundedSender<NetEvent>,
    event_rx: mpsc::UnboundedReceiver<NetEvent>,
    next_session: SessionId,
}

impl Server {
    pub async fn new(
        addr: &str,
        commentator: Arc<dyn Commentator>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let listener = TcpListener::bind(addr).await?;
        info!("Server listening on {}", listener.local_addr()?);

        let (event_tx, event_rx) = mpsc::unbounded_channel();

        Ok(Server {
            listener,
            gateway: Gateway::new(RoomRegistry::new(), commentator),
            event_tx,
            event_rx,
            next_session: 1,
        })
    }

    /// The address actually bound, for callers that asked for port 0.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections and dispatches events until shutdown.
    pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        info!("Server started successfully");

        loop {
            tokio::select! {
                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((stream, addr)) => self.accept(stream, addr),
                        Err(e) => error!("Failed to accept connection: {}", e),
                    }
                },

                event = self.event_rx.recv() => {
                    match event {
                        Some(event) => self.gateway.handle_event(event),
                        // Unreachable while we hold an event_tx clone.
                        None => break,
                    }
                },
            }
        }

        Ok(())
    }

    fn accept(&mut self, stream: TcpStream, addr: SocketAddr) {
        let session = self.next_session;
        self.next_session += 1;
        debug!("Session {} accepted from {}", session, addr);

        let (read_half, write_half) = stream.into_split();
        let (out_tx, out_rx) = mpsc::unbounded_channel();

        self.gateway.handle_event(NetEvent::Connected {
            session,
            sender: out_tx,
        });

        tokio::spawn(write_loop(session, write_half, out_rx));
        tokio::spawn(read_loop(session, read_half, self.event_tx.clone()));
    }
}

/// Drains the session's outbound queue onto the socket, one JSON object
/// per line.
async fn write_loop(
    session: SessionId,
    mut write_half: OwnedWriteHalf,
    mut out_rx: mpsc::UnboundedReceiver<Packet>,
) {
    while let Some(packet) = out_rx.recv().await {
        let mut line = match serde_json::to_string(&packet) {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to encode packet for session {}: {}", session, e);
                continue;
            }
        };
        line.push('\n');

        if let Err(e) = write_half.write_all(line.as_bytes()).await {
            debug!("Session {} write failed: {}", session, e);
            break;
        }
    }
}

/// Decodes inbound frames until the peer hangs up, then reports the
/// disconnect. An undecodable line is reported as malformed rather than
/// dropped on the floor, so the sender hears back about it.
async fn read_loop(
    session: SessionId,
    read_half: OwnedReadHalf,
    event_tx: mpsc::UnboundedSender<NetEvent>,
) {
    let mut lines = BufReader::new(read_half).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match serde_json::from_str::<Packet>(&line) {
                Ok(packet) => {
                    if event_tx.send(NetEvent::Received { session, packet }).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Session {} sent an undecodable frame: {}", session, e);
                    if event_tx.send(NetEvent::Malformed { session }).is_err() {
                        break;
                    }
                }
            },
            Ok(None) => break,
            Err(e) => {
                debug!("Session {} read failed: {}", session, e);
                break;
            }
        }
    }

    let _ = event_tx.send(NetEvent::Disconnected { session });
}
