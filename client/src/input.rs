//! Parses terminal commands into client intents.

/// A command typed at the prompt. Everything that parses is relayed to
/// the server unchecked; validity is the server's call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Move(usize),
    Chat(String),
    Restart,
    Quit,
}

/// Parses one input line. A bare cell number works as shorthand for
/// `move <cell>`. Returns `None` for anything unrecognized.
pub fn parse(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(cell) = trimmed.parse::<usize>() {
        return Some(Command::Move(cell));
    }

    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (trimmed, ""),
    };

    match word {
        "move" | "m" => rest.parse().ok().map(Command::Move),
        "chat" | "say" => {
            if rest.is_empty() {
                None
            } else {
                Some(Command::Chat(rest.to_string()))
            }
        }
        "restart" => Some(Command::Restart),
        "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move_forms() {
        assert_eq!(parse("move 4"), Some(Command::Move(4)));
        assert_eq!(parse("m 0"), Some(Command::Move(0)));
        assert_eq!(parse("7"), Some(Command::Move(7)));
        assert_eq!(parse("  3  "), Some(Command::Move(3)));
    }

    #[test]
    fn test_parse_does_not_range_check() {
        // Range checking is the server's job; 42 must go on the wire.
        assert_eq!(parse("move 42"), Some(Command::Move(42)));
    }

    #[test]
    fn test_parse_chat() {
        assert_eq!(
            parse("chat good luck"),
            Some(Command::Chat("good luck".to_string()))
        );
        assert_eq!(parse("say gg"), Some(Command::Chat("gg".to_string())));
        assert_eq!(parse("chat"), None);
    }

    #[test]
    fn test_parse_restart_and_quit() {
        assert_eq!(parse("restart"), Some(Command::Restart));
        assert_eq!(parse("quit"), Some(Command::Quit));
        assert_eq!(parse("exit"), Some(Command::Quit));
    }

    #[test]
    fn test_parse_rejects_noise() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
        assert_eq!(parse("dance"), None);
        assert_eq!(parse("move x"), None);
    }
}
