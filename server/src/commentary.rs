//! Post-game commentary. The generator is consulted fire-and-forget once
//! a game reaches a terminal outcome; a failed or empty generation falls
//! back to a static line and never holds up the dispatch loop.

use log::debug;
use rand::seq::SliceRandom;
use shared::Packet;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Line delivered whenever the generator produces nothing.
pub const FALLBACK_REMARK: &str = "Good game. Rematch?";

/// Produces display text for a finished game from a short outcome
/// description such as "circle wins" or "the game is a draw".
pub trait Commentator: Send + Sync {
    fn remark(&self, summary: &str) -> Option<String>;
}

const WIN_REMARKS: [&str; 4] = [
    "Saw that coming from move one.",
    "Clinical finish.",
    "The middle square strikes again.",
    "Somebody studied their openings.",
];

const DRAW_REMARKS: [&str; 3] = [
    "Nine cells, zero mercy shown.",
    "A perfectly balanced stalemate.",
    "Nobody blinked.",
];

/// Default generator: picks a canned line locally, no external calls.
pub struct CannedCommentator;

impl Commentator for CannedCommentator {
    fn remark(&self, summary: &str) -> Option<String> {
        let pool: &[&str] = if summary.contains("draw") {
            &DRAW_REMARKS
        } else {
            &WIN_REMARKS
        };
        pool.choose(&mut rand::thread_rng())
            .map(|line| format!("{}. {}", capitalize(summary), line))
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Generates commentary off the dispatch path and delivers it to the
/// given session senders. Delivery is best-effort; a session that left
/// in the meantime is skipped silently.
pub fn spawn_commentary(
    commentator: Arc<dyn Commentator>,
    summary: String,
    recipients: Vec<mpsc::UnboundedSender<Packet>>,
) {
    tokio::spawn(async move {
        let text = commentator
            .remark(&summary)
            .unwrap_or_else(|| FALLBACK_REMARK.to_string());
        debug!("Commentary for \"{}\": {}", summary, text);

        for sender in recipients {
            let _ = sender.send(Packet::Commentary { text: text.clone() });
        }
    });
}
