//! Per-room lifecycle: slot assignment, turn enforcement, terminal
//! detection, restart, and teardown signaling.
//!
//! A room serves exactly one game at a time between at most two seated
//! sessions. Every mutation happens through the methods below; rejected
//! operations leave board, turn, and ended-flag untouched.

use crate::board::Board;
use log::info;
use shared::{ErrorKind, Mark, Outcome, Scoreboard};
use std::collections::HashMap;

/// Connection identifier assigned by the network layer.
pub type SessionId = u32;

/// Where a room is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomPhase {
    WaitingForOpponent,
    Active,
    Ended,
}

/// What an accepted move did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Continue,
    Won(Mark),
    Draw,
}

#[derive(Debug, Clone)]
pub struct Room {
    board: Board,
    current_turn: Mark,
    ended: bool,
    outcome: Option<Outcome>,
    players: HashMap<SessionId, Mark>,
    scores: Scoreboard,
}

impl Default for Room {
    fn default() -> Self {
        Self::new()
    }
}

impl Room {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_turn: Mark::first_mover(),
            ended: false,
            outcome: None,
            players: HashMap::new(),
            scores: Scoreboard::default(),
        }
    }

    pub fn phase(&self) -> RoomPhase {
        if self.ended {
            RoomPhase::Ended
        } else if self.players.len() < 2 {
            RoomPhase::WaitingForOpponent
        } else {
            RoomPhase::Active
        }
    }

    /// Seats `session` and returns its mark. The first joiner of a fresh
    /// room receives circle, the second cross. A joiner filling a vacated
    /// slot receives whichever mark is unheld, so a mark can never be
    /// assigned twice.
    pub fn join(&mut self, session: SessionId) -> Result<Mark, ErrorKind> {
        if let Some(&mark) = self.players.get(&session) {
            return Ok(mark);
        }
        if self.players.len() >= 2 {
            return Err(ErrorKind::RoomFull);
        }

        let mark = if self.players.values().any(|&held| held == Mark::Circle) {
            Mark::Cross
        } else {
            Mark::Circle
        };
        self.players.insert(session, mark);
        Ok(mark)
    }

    /// Validates and applies one move. The error ladder runs seat check,
    /// ended check, turn check, then board-level index/occupancy checks.
    /// On success the board is mutated and win, draw, and turn-switch are
    /// evaluated in that order.
    pub fn apply_move(&mut self, session: SessionId, cell: usize) -> Result<MoveOutcome, ErrorKind> {
        let mark = *self.players.get(&session).ok_or(ErrorKind::NotInRoom)?;
        if self.ended {
            return Err(ErrorKind::GameEnded);
        }
        if mark != self.current_turn {
            return Err(ErrorKind::WrongTurn);
        }
        self.board.apply(cell, mark)?;

        // Win is checked with the mark that just moved and before the
        // draw check: the last cell can fill the board and win at once.
        if self.board.is_winning(mark) {
            self.finish(Outcome::Winner(mark));
            Ok(MoveOutcome::Won(mark))
        } else if self.board.is_full() {
            self.finish(Outcome::Draw);
            Ok(MoveOutcome::Draw)
        } else {
            self.current_turn = mark.opponent();
            Ok(MoveOutcome::Continue)
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.ended = true;
        self.outcome = Some(outcome);
        self.scores.record(outcome);
    }

    /// Resets the game for another round. Seats and scores are kept.
    pub fn restart(&mut self) {
        self.board.reset();
        self.current_turn = Mark::first_mover();
        self.ended = false;
        self.outcome = None;
    }

    /// Frees the session's slot. Returns the vacated mark if the session
    /// was seated. The caller decides between room teardown (last slot
    /// emptied) and an opponent-left notice (one player remains).
    pub fn remove(&mut self, session: SessionId) -> Option<Mark> {
        let mark = self.players.remove(&session);
        if let Some(mark) = mark {
            info!("Seat {} freed", mark);
        }
        mark
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_turn(&self) -> Mark {
        self.current_turn
    }

    pub fn ended(&self) -> bool {
        self.ended
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn scores(&self) -> Scoreboard {
        self.scores
    }

    pub fn mark_of(&self, session: SessionId) -> Option<Mark> {
        self.players.get(&session).copied()
    }

    /// Sessions currently seated, in no particular order. This is the
    /// broadcast set for the room.
    pub fn sessions(&self) -> Vec<SessionId> {
        self.players.keys().copied().collect()
    }

    pub fn is_full(&self) -> bool {
        self.players.len() == 2
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
