//! # Input Module
//!
//! Text command parsing for hosts that read player input line by line.

use crate::{Direction, Intent};

/// Input handler for processing player commands.
///
/// Converts raw command words into [`PlayerInput`], and from there into the
/// [`Intent`]s the engine accepts.
pub struct InputHandler {
    /// Whether to enable Vi-style movement keys (hjkl)
    pub vi_keys_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Direction, InputHandler, PlayerInput};
    ///
    /// let input_handler = InputHandler::new();
    /// assert_eq!(input_handler.parse("w"), Some(PlayerInput::Move(Direction::North)));
    /// ```
    pub fn new() -> Self {
        Self {
            vi_keys_enabled: true,
        }
    }

    /// Parses one line of input. Case and surrounding whitespace are ignored.
    ///
    /// Returns None for unrecognised commands.
    pub fn parse(&self, line: &str) -> Option<PlayerInput> {
        let command = line.trim().to_lowercase();

        let input = match command.as_str() {
            // Movement keys - WASD and words
            "w" | "up" | "north" | "n" => PlayerInput::Move(Direction::North),
            "s" | "down" | "south" => PlayerInput::Move(Direction::South),
            "a" | "left" | "west" => PlayerInput::Move(Direction::West),
            "d" | "right" | "east" | "e" => PlayerInput::Move(Direction::East),

            // Movement keys - Vi style
            "k" if self.vi_keys_enabled => PlayerInput::Move(Direction::North),
            "j" if self.vi_keys_enabled => PlayerInput::Move(Direction::South),
            "h" if self.vi_keys_enabled => PlayerInput::Move(Direction::West),
            "l" if self.vi_keys_enabled => PlayerInput::Move(Direction::East),

            "p" | "potion" | "drink" | "heal" => PlayerInput::UsePotion,
            // h is the potion key unless it is taken by vi movement
            "h" => PlayerInput::UsePotion,
            "r" | "restart" => PlayerInput::Restart,
            "json" | "state" => PlayerInput::ShowState,
            "?" | "help" => PlayerInput::Help,
            "q" | "quit" | "exit" => PlayerInput::Quit,
            _ => return None,
        };

        Some(input)
    }

    /// Converts player input to an engine intent.
    ///
    /// Host-only inputs such as help or quit have no intent.
    pub fn input_to_intent(&self, input: PlayerInput) -> Option<Intent> {
        match input {
            PlayerInput::Move(direction) => Some(Intent::Move(direction)),
            PlayerInput::UsePotion => Some(Intent::UsePotion),
            PlayerInput::Restart => Some(Intent::Restart),
            PlayerInput::ShowState | PlayerInput::Help | PlayerInput::Quit => None,
        }
    }
}

/// Player input types that can be processed by the input handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Move in a given direction
    Move(Direction),
    /// Drink a potion
    UsePotion,
    /// Start a new game (when game has ended)
    Restart,
    /// Dump the current snapshot as JSON
    ShowState,
    /// Show help information
    Help,
    /// Quit the game
    Quit,
}

/// One-line summary of the accepted commands.
pub const HELP_TEXT: &str =
    "Commands: w/a/s/d or h/j/k/l to move, p to drink a potion, r to restart, json to dump state, q to quit";
