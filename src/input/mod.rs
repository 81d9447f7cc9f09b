//! # Input Module
//!
//! Input handling and command parsing for player interactions.
//!
//! Text lines become [`PlayerInput`] values through [`InputHandler`]. Where
//! the lines come from is an [`InputSource`]: standard input for play, or a
//! fixed script for tests and demos.

pub mod commands;

pub use commands::*;

use crate::game::Direction;
use crate::{DungeonError, DungeonResult};
use std::collections::VecDeque;
use std::fmt;
use std::io::BufRead;

/// Player input types that can be processed by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerInput {
    /// Move one coarse cell
    Move(Direction),
    /// Answer yes to the current prompt
    Yes,
    /// Answer no to the current prompt
    No,
    /// Pause the game
    Pause,
    /// Show help information
    Help,
    /// Quit the game
    Quit,
}

impl fmt::Display for PlayerInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerInput::Move(direction) => write!(f, "move {direction}"),
            PlayerInput::Yes => f.write_str("yes"),
            PlayerInput::No => f.write_str("no"),
            PlayerInput::Pause => f.write_str("pause"),
            PlayerInput::Help => f.write_str("help"),
            PlayerInput::Quit => f.write_str("quit"),
        }
    }
}

/// Input handler for processing player commands.
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    /// Whether `hjkl` also move the party
    pub vi_keys_enabled: bool,
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Direction, InputHandler, PlayerInput};
    ///
    /// let handler = InputHandler::new();
    /// assert_eq!(handler.parse("d").unwrap(), PlayerInput::Move(Direction::Right));
    /// assert!(handler.parse("dance").is_err());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vi_keys() -> Self {
        Self {
            vi_keys_enabled: true,
        }
    }

    /// Parses one line of text into an input.
    ///
    /// With vi keys on, `hjkl` move the party before the command table is
    /// consulted, so help is only reachable as `help` or `?`.
    pub fn parse(&self, line: &str) -> DungeonResult<PlayerInput> {
        if self.vi_keys_enabled {
            let direction = match line.trim() {
                "h" => Some(Direction::Left),
                "j" => Some(Direction::Down),
                "k" => Some(Direction::Up),
                "l" => Some(Direction::Right),
                _ => None,
            };
            if let Some(direction) = direction {
                return Ok(PlayerInput::Move(direction));
            }
        }
        lookup(line).ok_or_else(|| {
            DungeonError::InvalidInput(format!("unrecognised command '{}'", line.trim()))
        })
    }
}

/// Somewhere player input lines come from.
pub trait InputSource {
    /// Shows `prompt` and returns the next line, or `None` at end of input.
    fn next_line(&mut self, prompt: &str) -> DungeonResult<Option<String>>;
}

/// Reads lines from standard input.
#[derive(Debug, Default)]
pub struct StdinInput;

impl InputSource for StdinInput {
    fn next_line(&mut self, prompt: &str) -> DungeonResult<Option<String>> {
        println!("{prompt}");
        let mut line = String::new();
        let read = std::io::stdin().lock().read_line(&mut line)?;
        Ok((read > 0).then_some(line))
    }
}

/// Replays a fixed list of lines.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    /// Every prompt shown so far
    pub prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl InputSource for ScriptedInput {
    fn next_line(&mut self, prompt: &str) -> DungeonResult<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }
}
