//! # Delve
//!
//! A turn-based, procedurally generated dungeon crawler simulation.
//!
//! ## Architecture Overview
//!
//! Delve is the simulation core only. A host (terminal, GUI, test harness)
//! submits discrete player intents and reads back state; it never mutates
//! the engine directly.
//!
//! - **Generation System**: Room-and-corridor layouts on a fixed grid, plus
//!   the stochastic population of monsters and items
//! - **Entity Model**: Player, monsters and items, with monsters and items
//!   held in slot arenas keyed by stable identifiers
//! - **Turn Engine**: One intent in, one [`TurnResult`] out, including the
//!   monster pursuit phase and level transitions
//! - **Progression**: Experience, the one-time level-up bonus and the potion
//!   economy
//!
//! ## Determinism
//!
//! All randomness flows from a single seeded [`rand::rngs::StdRng`] owned by
//! the [`GameState`]. Two games created with the same seed and fed the same
//! intents end in identical states.

pub mod game;
pub mod generation;
pub mod input;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;

/// Core error type for the Delve engine.
///
/// Game-rule outcomes such as walking into a wall are not errors; they come
/// back as no-op turns. These variants cover broken invariants only.
#[derive(thiserror::Error, Debug)]
pub enum DelveError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Generation parameters cannot produce a level
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A tile write or lookup fell outside the grid
    #[error("Position {0:?} is outside the map")]
    OutOfBounds(Position),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Delve codebase.
pub type DelveResult<T> = Result<T, DelveError>;

/// Version information for the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fixed game configuration constants.
pub mod config {
    /// Dungeon width in tiles
    pub const DUNGEON_WIDTH: u32 = 35;

    /// Dungeon height in tiles
    pub const DUNGEON_HEIGHT: u32 = 22;

    /// Number of room candidates tried per level
    pub const MAX_ROOM_ATTEMPTS: u32 = 12;

    /// Smallest room side length
    pub const MIN_ROOM_SIZE: u32 = 4;

    /// Largest room side length
    pub const MAX_ROOM_SIZE: u32 = 9;

    /// Player starting and base maximum health
    pub const PLAYER_START_HP: i32 = 100;

    /// Player starting attack power
    pub const PLAYER_START_ATTACK: i32 = 12;

    /// Potions carried at the start of a game
    pub const PLAYER_START_POTIONS: u32 = 3;

    /// Depth of the first level
    pub const STARTING_DEPTH: u32 = 1;
}
