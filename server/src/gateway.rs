//! Session gateway: translates inbound client intents into registry and
//! room operations, then fans resulting state out to every session bound
//! to the room.
//!
//! Events are processed one at a time to completion, so room mutations
//! are never interleaved and no per-room locking is needed. Failures are
//! answered to the originating session only; broadcasts carry state, not
//! errors. The broadcast set is computed here from the room's seat table
//! rather than delegated to any transport-level grouping.

use crate::commentary::{self, Commentator};
use crate::registry::RoomRegistry;
use crate::room::{MoveOutcome, Room, SessionId};
use log::{debug, info, warn};
use shared::{ErrorKind, Packet};
use std::collections::HashMap;
use std::sync::Arc;

/// Events delivered by the network layer.
#[derive(Debug)]
pub enum NetEvent {
    Connected {
        session: SessionId,
        sender: tokio::sync::mpsc::UnboundedSender<Packet>,
    },
    Received {
        session: SessionId,
        packet: Packet,
    },
    /// A frame that failed to decode; answered with `InvalidMove`.
    Malformed { session: SessionId },
    Disconnected { session: SessionId },
}

struct SessionHandle {
    sender: tokio::sync::mpsc::UnboundedSender<Packet>,
    room: Option<String>,
}

pub struct Gateway {
    registry: RoomRegistry,
    sessions: HashMap<SessionId, SessionHandle>,
    commentator: Arc<dyn Commentator>,
}

impl Gateway {
    pub fn new(registry: RoomRegistry, commentator: Arc<dyn Commentator>) -> Self {
        Self {
            registry,
            sessions: HashMap::new(),
            commentator,
        }
    }

    /// Registry accessor for tests and diagnostics.
    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    pub fn handle_event(&mut self, event: NetEvent) {
        match event {
            NetEvent::Connected { session, sender } => {
                info!("Session {} connected", session);
                self.sessions
                    .insert(session, SessionHandle { sender, room: None });
            }
            NetEvent::Received { session, packet } => self.handle_packet(session, packet),
            NetEvent::Malformed { session } => {
                self.reply(session, Packet::Error { kind: ErrorKind::InvalidMove });
            }
            NetEvent::Disconnected { session } => {
                self.detach(session);
                self.sessions.remove(&session);
                info!("Session {} disconnected", session);
            }
        }
    }

    fn handle_packet(&mut self, session: SessionId, packet: Packet) {
        match packet {
            Packet::Join { room_id } => self.handle_join(session, room_id),
            Packet::Move { cell } => self.handle_move(session, cell),
            Packet::Restart => self.handle_restart(session),
            Packet::Chat { text } => self.handle_chat(session, text),
            Packet::Leave => self.detach(session),
            _ => {
                warn!("Session {} sent a server-only packet", session);
                self.reply(session, Packet::Error { kind: ErrorKind::InvalidMove });
            }
        }
    }

    /// Create-or-attach. A missing id creates a fresh room; a given id
    /// must name a live one. The joiner alone learns its mark; the room
    /// start is broadcast only on the one-to-two seat transition.
    fn handle_join(&mut self, session: SessionId, room_id: Option<String>) {
        // A session joining a new room abandons its previous one first.
        if self.bound_room(session).is_some() {
            self.detach(session);
        }

        let room_id = match room_id {
            Some(id) => {
                if self.registry.get(&id).is_none() {
                    debug!("Session {} asked for unknown room {}", session, id);
                    self.reply(session, Packet::Error { kind: ErrorKind::RoomNotFound });
                    return;
                }
                id
            }
            None => self.registry.create_room(),
        };

        let joined = match self.registry.get_mut(&room_id) {
            Some(room) => room.join(session).map(|mark| {
                (
                    mark,
                    room.is_full(),
                    room.board().cells(),
                    room.current_turn(),
                )
            }),
            None => Err(ErrorKind::RoomNotFound),
        };

        match joined {
            Err(kind) => self.reply(session, Packet::Error { kind }),
            Ok((mark, started, board, current_turn)) => {
                if let Some(handle) = self.sessions.get_mut(&session) {
                    handle.room = Some(room_id.clone());
                }
                info!("Session {} joined room {} as {}", session, room_id, mark);
                self.reply(
                    session,
                    Packet::Joined {
                        room_id: room_id.clone(),
                        mark,
                    },
                );

                if started {
                    info!("Room {} is full, game on", room_id);
                    self.broadcast(&room_id, Packet::GameStart { board, current_turn });
                } else {
                    self.reply(session, Packet::Waiting { room_id });
                }
            }
        }
    }

    fn handle_move(&mut self, session: SessionId, cell: usize) {
        let Some(room_id) = self.bound_room(session) else {
            self.reply(session, Packet::Error { kind: ErrorKind::NotInRoom });
            return;
        };

        let result = match self.registry.get_mut(&room_id) {
            Some(room) => room
                .apply_move(session, cell)
                .map(|outcome| (outcome, state_packet(room))),
            None => Err(ErrorKind::NotInRoom),
        };

        match result {
            Err(kind) => {
                debug!("Session {} move to {} rejected: {}", session, cell, kind);
                self.reply(session, Packet::Error { kind });
            }
            Ok((outcome, state)) => {
                self.broadcast(&room_id, state);
                match outcome {
                    MoveOutcome::Continue => {}
                    MoveOutcome::Won(mark) => {
                        info!("{} wins in room {}", mark, room_id);
                        self.fire_commentary(&room_id, format!("{} wins", mark));
                    }
                    MoveOutcome::Draw => {
                        info!("Room {} ends in a draw", room_id);
                        self.fire_commentary(&room_id, "the game is a draw".to_string());
                    }
                }
            }
        }
    }

    fn handle_restart(&mut self, session: SessionId) {
        let Some(room_id) = self.bound_room(session) else {
            self.reply(session, Packet::Error { kind: ErrorKind::NotInRoom });
            return;
        };

        let state = match self.registry.get_mut(&room_id) {
            Some(room) => {
                room.restart();
                state_packet(room)
            }
            None => {
                self.reply(session, Packet::Error { kind: ErrorKind::NotInRoom });
                return;
            }
        };

        info!("Room {} restarted", room_id);
        self.broadcast(&room_id, state);
    }

    /// Relays chat to every seat in the sender's room, the sender
    /// included. The sender's mark is stamped server-side; clients never
    /// declare their own identity.
    fn handle_chat(&mut self, session: SessionId, text: String) {
        let Some(room_id) = self.bound_room(session) else {
            self.reply(session, Packet::Error { kind: ErrorKind::NotInRoom });
            return;
        };

        let sender_mark = self
            .registry
            .get(&room_id)
            .and_then(|room| room.mark_of(session));
        let Some(sender_mark) = sender_mark else {
            self.reply(session, Packet::Error { kind: ErrorKind::NotInRoom });
            return;
        };

        self.broadcast(
            &room_id,
            Packet::ChatMessage {
                text,
                sender_mark,
                sender_session: session,
            },
        );
    }

    /// Unbinds the session from its room. The room is torn down when its
    /// last seat empties; otherwise the survivor is told the opponent
    /// left and stays seated.
    fn detach(&mut self, session: SessionId) {
        let Some(room_id) = self
            .sessions
            .get_mut(&session)
            .and_then(|handle| handle.room.take())
        else {
            return;
        };

        let survivors = match self.registry.get_mut(&room_id) {
            Some(room) => {
                room.remove(session);
                room.sessions()
            }
            None => return,
        };

        if survivors.is_empty() {
            self.registry.delete(&room_id);
        } else {
            info!("Session {} left room {}", session, room_id);
            for survivor in survivors {
                self.send_to(survivor, Packet::OpponentLeft);
            }
        }
    }

    fn fire_commentary(&self, room_id: &str, summary: String) {
        let Some(room) = self.registry.get(room_id) else {
            return;
        };
        let recipients = room
            .sessions()
            .into_iter()
            .filter_map(|session| {
                self.sessions
                    .get(&session)
                    .map(|handle| handle.sender.clone())
            })
            .collect();
        commentary::spawn_commentary(Arc::clone(&self.commentator), summary, recipients);
    }

    fn bound_room(&self, session: SessionId) -> Option<String> {
        self.sessions
            .get(&session)
            .and_then(|handle| handle.room.clone())
    }

    fn broadcast(&self, room_id: &str, packet: Packet) {
        let Some(room) = self.registry.get(room_id) else {
            return;
        };
        for session in room.sessions() {
            self.send_to(session, packet.clone());
        }
    }

    fn reply(&self, session: SessionId, packet: Packet) {
        self.send_to(session, packet);
    }

    fn send_to(&self, session: SessionId, packet: Packet) {
        let Some(handle) = self.sessions.get(&session) else {
            return;
        };
        if handle.sender.send(packet).is_err() {
            debug!("Session {} outbound channel closed", session);
        }
    }
}

/// Snapshot of a room's authoritative state as a broadcastable packet.
fn state_packet(room: &Room) -> Packet {
    Packet::State {
        board: room.board().cells(),
        current_turn: room.current_turn(),
        ended: room.ended(),
        outcome: room.outcome(),
        scores: room.scores(),
    }
}
