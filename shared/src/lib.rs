use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// Cell contents as carried on the wire: `None` for an empty cell.
pub type BoardCells = [Option<Mark>; CELL_COUNT];

/// One of the two player roles. Circle is assigned to the first joiner
/// of a room and always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Circle,
    Cross,
}

impl Mark {
    /// The mark holding the other slot.
    pub fn opponent(self) -> Self {
        match self {
            Mark::Circle => Mark::Cross,
            Mark::Cross => Mark::Circle,
        }
    }

    /// The mark that opens every game, initial and restarted alike.
    pub fn first_mover() -> Self {
        Mark::Circle
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::Circle => write!(f, "circle"),
            Mark::Cross => write!(f, "cross"),
        }
    }
}

/// Terminal result of a game. Absent from room state while a game is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Winner(Mark),
    Draw,
}

/// Per-room win/draw tally. Survives restarts, dies with the room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub circle_wins: u32,
    pub cross_wins: u32,
    pub draws: u32,
}

impl Scoreboard {
    /// Tallies one finished game.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Winner(Mark::Circle) => self.circle_wins += 1,
            Outcome::Winner(Mark::Cross) => self.cross_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
    }
}

/// Recoverable rejections of client input. Reported only to the session
/// that sent the offending intent, never broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    RoomNotFound,
    RoomFull,
    NotInRoom,
    GameEnded,
    WrongTurn,
    InvalidMove,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ErrorKind::RoomNotFound => "room does not exist",
            ErrorKind::RoomFull => "room is full",
            ErrorKind::NotInRoom => "not in a game room",
            ErrorKind::GameEnded => "game has already ended",
            ErrorKind::WrongTurn => "not your turn",
            ErrorKind::InvalidMove => "invalid move",
        };
        write!(f, "{}", text)
    }
}

impl std::error::Error for ErrorKind {}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub enum Packet {
    // Client -> server intents
    Join { room_id: Option<String> },
    Move { cell: usize },
    Restart,
    Chat { text: String },
    Leave,

    // Server -> client events
    Joined { room_id: String, mark: Mark },
    Waiting { room_id: String },
    GameStart { board: BoardCells, current_turn: Mark },
    State {
        board: BoardCells,
        current_turn: Mark,
        ended: bool,
        outcome: Option<Outcome>,
        scores: Scoreboard,
    },
    ChatMessage {
        text: String,
        sender_mark: Mark,
        sender_session: u32,
    },
    OpponentLeft,
    Commentary { text: String },
    Error { kind: ErrorKind },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_flips_both_ways() {
        assert_eq!(Mark::Circle.opponent(), Mark::Cross);
        assert_eq!(Mark::Cross.opponent(), Mark::Circle);
        assert_eq!(Mark::first_mover(), Mark::Circle);
    }

    #[test]
    fn test_mark_wire_names() {
        assert_eq!(serde_json::to_string(&Mark::Circle).unwrap(), "\"circle\"");
        assert_eq!(serde_json::to_string(&Mark::Cross).unwrap(), "\"cross\"");
    }

    #[test]
    fn test_scoreboard_record() {
        let mut scores = Scoreboard::default();
        scores.record(Outcome::Winner(Mark::Circle));
        scores.record(Outcome::Winner(Mark::Circle));
        scores.record(Outcome::Winner(Mark::Cross));
        scores.record(Outcome::Draw);

        assert_eq!(scores.circle_wins, 2);
        assert_eq!(scores.cross_wins, 1);
        assert_eq!(scores.draws, 1);
    }

    #[test]
    fn test_packet_serialization_join() {
        let packet = Packet::Join {
            room_id: Some("abc1234".to_string()),
        };
        let serialized = serde_json::to_string(&packet).unwrap();
        let deserialized: Packet = serde_json::from_str(&serialized).unwrap();

        match deserialized {
            Packet::Join { room_id } => assert_eq!(room_id.as_deref(), Some("abc1234")),
            _ => panic!("Wrong packet type after deserialization"),
        }
    }

    #[test]
    fn test_packet_serialization_state() {
        let mut board: BoardCells = [None; CELL_COUNT];
        board[4] = Some(Mark::Circle);

        let packet = Packet::State {
            board,
            current_turn: Mark::Cross,
            ended: false,
            outcome: None,
            scores: Scoreboard::default(),
        };

        let serialized = serde_json::to_string(&packet).unwrap();
        let deserialized: Packet = serde_json::from_str(&serialized).unwrap();

        match deserialized {
            Packet::State {
                board,
                current_turn,
                ended,
                outcome,
                ..
            } => {
                assert_eq!(board[4], Some(Mark::Circle));
                assert_eq!(board[0], None);
                assert_eq!(current_turn, Mark::Cross);
                assert!(!ended);
                assert_eq!(outcome, None);
            }
            _ => panic!("Wrong packet type after deserialization"),
        }
    }

    #[test]
    fn test_packet_serialization_outcome() {
        let packet = Packet::State {
            board: [Some(Mark::Cross); CELL_COUNT],
            current_turn: Mark::Cross,
            ended: true,
            outcome: Some(Outcome::Winner(Mark::Cross)),
            scores: Scoreboard {
                circle_wins: 0,
                cross_wins: 1,
                draws: 0,
            },
        };

        let serialized = serde_json::to_string(&packet).unwrap();
        let deserialized: Packet = serde_json::from_str(&serialized).unwrap();

        match deserialized {
            Packet::State {
                ended,
                outcome,
                scores,
                ..
            } => {
                assert!(ended);
                assert_eq!(outcome, Some(Outcome::Winner(Mark::Cross)));
                assert_eq!(scores.cross_wins, 1);
            }
            _ => panic!("Wrong packet type after deserialization"),
        }
    }

    #[test]
    fn test_packets_stay_on_one_line() {
        // The transport frames one JSON object per line, so no packet may
        // serialize with an embedded newline.
        let packets = vec![
            Packet::Join { room_id: None },
            Packet::Move { cell: 4 },
            Packet::Restart,
            Packet::Chat {
                text: "gg".to_string(),
            },
            Packet::OpponentLeft,
            Packet::Error {
                kind: ErrorKind::WrongTurn,
            },
        ];

        for packet in packets {
            let serialized = serde_json::to_string(&packet).unwrap();
            assert!(!serialized.contains('\n'));
        }
    }
}
