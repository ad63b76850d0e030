//! # Room Coordinator Library
//!
//! This library provides the authoritative server for the room-based
//! online tic-tac-toe game. It owns the canonical board and turn state
//! of every room, validates client intents, and broadcasts resulting
//! state so that clients never have to decide anything themselves.
//!
//! ## Core Responsibilities
//!
//! ### Authoritative Game State
//! Every board cell, turn marker, and terminal outcome lives server-side.
//! Clients send intents and render broadcast snapshots; a client claim
//! about a win, draw, or free cell is never trusted or even expressible
//! on the wire.
//!
//! ### Room Isolation
//! Each room is an independent game between at most two sessions, with
//! its own board, turn order, and score tally. Nothing is shared across
//! rooms, and a room disappears as soon as its last player leaves.
//!
//! ### Session Lifecycle
//! Connections are assigned session identifiers on accept, bound to a
//! room on join, and detached on disconnect. A mid-game disconnect tells
//! the surviving player the opponent left; it is a lifecycle transition,
//! not an error.
//!
//! ## Architecture Design
//!
//! ### Single Dispatch Loop
//! All network events funnel into one loop that processes each intent to
//! completion (validate, mutate, broadcast) before taking the next. Two
//! moves racing for the same room are therefore serialized without any
//! per-room locking.
//!
//! ### Line-Framed JSON Transport
//! Connections speak newline-delimited JSON over TCP, which provides the
//! reliable ordered delivery the protocol assumes. Reader and writer
//! tasks per connection only shuttle frames; they make no game decisions.
//!
//! ## Module Organization
//!
//! - [`board`] - pure 3x3 grid logic: apply-move, win-check, draw-check
//! - [`room`] - per-room state machine: seats, turns, terminal outcomes
//! - [`registry`] - room creation, lookup, and deletion
//! - [`gateway`] - intent dispatch and room-scoped broadcasting
//! - [`network`] - TCP listener and per-connection frame shuttling
//! - [`commentary`] - fire-and-forget post-game remarks
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::commentary::CannedCommentator;
//! use server::network::Server;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut server = Server::new("127.0.0.1:8080", Arc::new(CannedCommentator)).await?;
//!     server.run().await?;
//!     Ok(())
//! }
//! ```

pub mod board;
pub mod commentary;
pub mod gateway;
pub mod network;
pub mod registry;
pub mod room;
