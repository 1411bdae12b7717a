//! # Game Module
//!
//! Core simulation state, world representation, and entity model.
//!
//! This module contains the fundamental building blocks of a Delve session:
//! - World and level representation
//! - Player, monster and item records
//! - Intents, events and turn results
//! - Progression rules
//! - The turn engine itself

pub mod actions;
pub mod entities;
pub mod progression;
pub mod state;
pub mod world;

pub use actions::*;
pub use entities::*;
pub use progression::*;
pub use state::*;
pub use world::*;

use serde::{Deserialize, Serialize};

/// Represents a 2D coordinate in the game world.
///
/// # Examples
///
/// ```
/// use delve::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the per-axis unit step that points from `self` toward `target`.
    ///
    /// Each component is -1, 0 or 1.
    pub fn step_toward(self, target: Position) -> Position {
        Position::new((target.x - self.x).signum(), (target.y - self.y).signum())
    }

    /// Returns only the 4 cardinal adjacent positions (no diagonals).
    pub fn cardinal_adjacent_positions(self) -> Vec<Position> {
        Direction::cardinal()
            .into_iter()
            .map(|direction| self + direction.to_delta())
            .collect()
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

/// Directions the player can move in. Movement is strictly cardinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Direction, Position};
    ///
    /// let delta = Direction::North.to_delta();
    /// assert_eq!(delta, Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::North => Position::new(0, -1),
            Direction::South => Position::new(0, 1),
            Direction::East => Position::new(1, 0),
            Direction::West => Position::new(-1, 0),
        }
    }

    /// Returns the 4 cardinal directions.
    pub fn cardinal() -> Vec<Direction> {
        vec![
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_step_toward() {
        let monster = Position::new(5, 5);
        assert_eq!(monster.step_toward(Position::new(9, 2)), Position::new(1, -1));
        assert_eq!(monster.step_toward(Position::new(5, 8)), Position::new(0, 1));
        assert_eq!(monster.step_toward(monster), Position::new(0, 0));
    }

    #[test]
    fn test_position_cardinal_adjacent() {
        let pos = Position::new(5, 5);
        let adjacent = pos.cardinal_adjacent_positions();
        assert_eq!(adjacent.len(), 4);
        assert!(adjacent.contains(&Position::new(5, 4))); // North
        assert!(adjacent.contains(&Position::new(4, 5))); // West
        assert!(!adjacent.contains(&Position::new(4, 4))); // No diagonal
    }

    #[test]
    fn test_position_arithmetic() {
        let pos1 = Position::new(5, 10);
        let pos2 = Position::new(3, 2);
        assert_eq!(pos1 + pos2, Position::new(8, 12));
    }

    #[test]
    fn test_direction_deltas_are_unit_steps() {
        for direction in Direction::cardinal() {
            let delta = direction.to_delta();
            assert_eq!(delta.x.abs() + delta.y.abs(), 1);
        }
        assert_eq!(Direction::North.to_delta(), Position::new(0, -1));
    }
}
