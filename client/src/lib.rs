//! # Terminal Client Library
//!
//! This library provides the terminal client for the room-based online
//! tic-tac-toe game. It connects to the coordinator, relays typed
//! commands as intents, and renders the board snapshots the server
//! broadcasts.
//!
//! ## Design Philosophy
//!
//! ### Strictly Server-Authoritative
//! The client holds no game rules at all. It never checks for wins,
//! draws, occupied cells, or turn order; every keystroke that parses is
//! relayed as an intent and the server's verdict is rendered verbatim.
//! There is deliberately no local duplicate of terminal-state detection
//! that could race the authoritative broadcast.
//!
//! ### Snapshot Rendering
//! What is on screen is always the last broadcast snapshot. Rejected
//! intents come back as error packets and are printed; accepted ones
//! come back as fresh state for the whole room.
//!
//! ## Module Organization
//!
//! - [`input`] - parses terminal commands into intents
//! - [`game`] - the last broadcast snapshot and its ASCII rendering
//! - [`network`] - connection handling and the relay loop

pub mod game;
pub mod input;
pub mod network;
