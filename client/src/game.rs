//! Client-side view state: the last broadcast snapshot and its terminal
//! rendering. No game rules live here; the server decides everything.

use shared::{BoardCells, Mark, Outcome, Packet, Scoreboard, CELL_COUNT};

/// What the player currently sees. Updated only from server packets.
pub struct GameView {
    room_id: Option<String>,
    mark: Option<Mark>,
    board: BoardCells,
}

impl Default for GameView {
    fn default() -> Self {
        Self::new()
    }
}

impl GameView {
    pub fn new() -> Self {
        Self {
            room_id: None,
            mark: None,
            board: [None; CELL_COUNT],
        }
    }

    pub fn room_id(&self) -> Option<&str> {
        self.room_id.as_deref()
    }

    /// Applies one server packet and returns the lines to print for it.
    pub fn apply(&mut self, packet: Packet) -> Vec<String> {
        match packet {
            Packet::Joined { room_id, mark } => {
                self.room_id = Some(room_id.clone());
                self.mark = Some(mark);
                vec![format!("Joined room {} as {}", room_id, mark)]
            }
            Packet::Waiting { room_id } => {
                vec![format!(
                    "Waiting for an opponent. Share the room id: {}",
                    room_id
                )]
            }
            Packet::GameStart {
                board,
                current_turn,
            } => {
                self.board = board;
                let mut lines = vec!["Game on!".to_string(), render_board(&board)];
                lines.push(self.turn_line(current_turn));
                lines
            }
            Packet::State {
                board,
                current_turn,
                ended,
                outcome,
                scores,
            } => {
                self.board = board;
                let mut lines = vec![render_board(&board)];
                if ended {
                    lines.push(outcome_line(outcome, self.mark));
                    lines.push(scores_line(&scores));
                    lines.push("Type restart for another round.".to_string());
                } else {
                    lines.push(self.turn_line(current_turn));
                }
                lines
            }
            Packet::ChatMessage {
                text, sender_mark, ..
            } => {
                let who = if self.mark == Some(sender_mark) {
                    "you".to_string()
                } else {
                    sender_mark.to_string()
                };
                vec![format!("[{}] {}", who, text)]
            }
            Packet::OpponentLeft => {
                vec!["Your opponent left the room.".to_string()]
            }
            Packet::Commentary { text } => vec![format!("commentary: {}", text)],
            Packet::Error { kind } => vec![format!("Rejected: {}", kind)],
            // Client-to-server intents echoed back would be a server bug.
            other => vec![format!("Unexpected packet: {:?}", other)],
        }
    }

    fn turn_line(&self, current_turn: Mark) -> String {
        if self.mark == Some(current_turn) {
            format!("Your move ({})", current_turn)
        } else {
            format!("Waiting for {}", current_turn)
        }
    }
}

/// Renders the grid with `O`/`X` marks; empty cells show their index so
/// the player knows what to type.
pub fn render_board(cells: &BoardCells) -> String {
    let glyph = |cell: usize| match cells[cell] {
        Some(Mark::Circle) => 'O'.to_string(),
        Some(Mark::Cross) => 'X'.to_string(),
        None => cell.to_string(),
    };

    let mut rows = Vec::new();
    for row in 0..3 {
        let base = row * 3;
        rows.push(format!(
            " {} | {} | {}",
            glyph(base),
            glyph(base + 1),
            glyph(base + 2)
        ));
    }
    rows.join("\n---+---+---\n")
}

fn outcome_line(outcome: Option<Outcome>, own_mark: Option<Mark>) -> String {
    match outcome {
        Some(Outcome::Winner(mark)) if own_mark == Some(mark) => "You win!".to_string(),
        Some(Outcome::Winner(mark)) => format!("{} wins.", mark),
        Some(Outcome::Draw) => "It's a draw.".to_string(),
        None => "Game over.".to_string(),
    }
}

fn scores_line(scores: &Scoreboard) -> String {
    format!(
        "Score: circle {} - cross {} - draws {}",
        scores.circle_wins, scores.cross_wins, scores.draws
    )
}
