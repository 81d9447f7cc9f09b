//! # Command Definitions
//!
//! The text commands the prompt understands and the help screen built from them.

use crate::game::Direction;
use crate::input::PlayerInput;

/// One accepted command and its spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub input: PlayerInput,
    pub keys: &'static [&'static str],
    pub description: &'static str,
}

/// Every command, in help-screen order.
pub const COMMANDS: &[Command] = &[
    Command {
        input: PlayerInput::Move(Direction::Up),
        keys: &["w", "up", "north"],
        description: "Move up",
    },
    Command {
        input: PlayerInput::Move(Direction::Left),
        keys: &["a", "left", "west"],
        description: "Move left",
    },
    Command {
        input: PlayerInput::Move(Direction::Down),
        keys: &["s", "down", "south"],
        description: "Move down",
    },
    Command {
        input: PlayerInput::Move(Direction::Right),
        keys: &["d", "right", "east"],
        description: "Move right",
    },
    Command {
        input: PlayerInput::Yes,
        keys: &["y", "yes"],
        description: "Answer yes to a prompt",
    },
    Command {
        input: PlayerInput::No,
        keys: &["n", "no"],
        description: "Answer no to a prompt",
    },
    Command {
        input: PlayerInput::Pause,
        keys: &["p", "pause"],
        description: "Pause the game",
    },
    Command {
        input: PlayerInput::Help,
        keys: &["h", "help", "?"],
        description: "Show this help",
    },
    Command {
        input: PlayerInput::Quit,
        keys: &["q", "quit", "exit"],
        description: "Quit",
    },
];

/// Looks a typed word up in [`COMMANDS`], ignoring case and surrounding space.
pub fn lookup(text: &str) -> Option<PlayerInput> {
    let word = text.trim().to_ascii_lowercase();
    COMMANDS
        .iter()
        .find(|command| command.keys.contains(&word.as_str()))
        .map(|command| command.input)
}

/// Multi-line help text.
pub fn help_text() -> String {
    let mut text = String::from("Commands:\n");
    for command in COMMANDS {
        text.push_str(&format!(
            "  {:<20} {}\n",
            command.keys.join(", "),
            command.description
        ));
    }
    text.push_str("At a closed door, pressing the same direction again opens it.\n");
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_is_unique() {
        let mut seen = std::collections::HashSet::new();
        for command in COMMANDS {
            for key in command.keys {
                assert!(seen.insert(*key), "duplicate key {key}");
            }
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(lookup(" W "), Some(PlayerInput::Move(Direction::Up)));
        assert_eq!(lookup("Yes"), Some(PlayerInput::Yes));
        assert_eq!(lookup("jump"), None);
    }

    #[test]
    fn test_help_lists_every_command() {
        let help = help_text();
        for command in COMMANDS {
            assert!(help.contains(command.description));
        }
    }
}
