//! # Generation Module
//!
//! Procedural content generation for dungeon levels.
//!
//! Generation happens in two stages. The [`RoomCorridorGenerator`] carves the
//! tile grid, records the rooms and picks the player spawn and stairs. The
//! [`PopulationService`] then scatters monsters and items into those rooms,
//! scaled by depth.

pub mod dungeon;
pub mod encounters;
pub mod items;
pub mod population;

pub use dungeon::*;
pub use encounters::*;
pub use items::*;
pub use population::*;

use crate::{config, DelveError, DelveResult, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Configuration for procedural generation.
///
/// The defaults are the fixed game values; other values are only useful for
/// tests and tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Grid width in tiles
    pub width: u32,
    /// Grid height in tiles
    pub height: u32,
    /// Room candidates tried per level; rejected candidates are not retried
    pub max_room_attempts: u32,
    /// Minimum room side length
    pub min_room_size: u32,
    /// Maximum room side length
    pub max_room_size: u32,
}

impl GenerationConfig {
    /// Creates the standard 35×22 configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::GenerationConfig;
    ///
    /// let config = GenerationConfig::new();
    /// assert_eq!((config.width, config.height), (35, 22));
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new() -> Self {
        Self {
            width: config::DUNGEON_WIDTH,
            height: config::DUNGEON_HEIGHT,
            max_room_attempts: config::MAX_ROOM_ATTEMPTS,
            min_room_size: config::MIN_ROOM_SIZE,
            max_room_size: config::MAX_ROOM_SIZE,
        }
    }

    /// Checks that every room candidate can be placed with a 1-tile margin.
    pub fn validate(&self) -> DelveResult<()> {
        if self.min_room_size < 3 || self.min_room_size > self.max_room_size {
            return Err(DelveError::InvalidConfig(format!(
                "room size range {}..={} is invalid",
                self.min_room_size, self.max_room_size
            )));
        }

        // x is drawn from 1..width - w, which must be non-empty for w = max
        let needed = self.max_room_size + 2;
        if self.width < needed || self.height < needed {
            return Err(DelveError::InvalidConfig(format!(
                "{}x{} grid cannot hold a {}-tile room with a border",
                self.width, self.height, self.max_room_size
            )));
        }

        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// An axis-aligned rectangular room. The whole rectangle is carved to floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Index in acceptance order
    pub id: u32,
    /// Top-left corner of the room
    pub top_left: Position,
    pub width: u32,
    pub height: u32,
    /// Ids of rooms joined to this one by a corridor
    pub connections: Vec<u32>,
}

impl Room {
    /// Creates a new room with the given parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Room, Position};
    ///
    /// let room = Room::new(1, Position::new(5, 5), 6, 4);
    /// assert_eq!(room.center(), Position::new(8, 7));
    /// ```
    pub fn new(id: u32, top_left: Position, width: u32, height: u32) -> Self {
        Self {
            id,
            top_left,
            width,
            height,
            connections: Vec::new(),
        }
    }

    /// Gets the center position of the room, rounding toward the top-left.
    pub fn center(&self) -> Position {
        Position::new(
            self.top_left.x + self.width as i32 / 2,
            self.top_left.y + self.height as i32 / 2,
        )
    }

    /// Checks if a position is inside this room.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.top_left.x
            && pos.y >= self.top_left.y
            && pos.x < self.top_left.x + self.width as i32
            && pos.y < self.top_left.y + self.height as i32
    }

    /// Checks if this room overlaps with another room. Touching edges do not
    /// count as overlap.
    pub fn overlaps(&self, other: &Room) -> bool {
        !(self.top_left.x >= other.top_left.x + other.width as i32
            || other.top_left.x >= self.top_left.x + self.width as i32
            || self.top_left.y >= other.top_left.y + other.height as i32
            || other.top_left.y >= self.top_left.y + self.height as i32)
    }

    /// Gets every position inside the room.
    pub fn all_positions(&self) -> Vec<Position> {
        let mut positions = Vec::new();

        for y in self.top_left.y..(self.top_left.y + self.height as i32) {
            for x in self.top_left.x..(self.top_left.x + self.width as i32) {
                positions.push(Position::new(x, y));
            }
        }

        positions
    }

    /// Gets the positions inside the room, excluding its outer ring.
    pub fn interior_positions(&self) -> Vec<Position> {
        let mut positions = Vec::new();

        for y in (self.top_left.y + 1)..(self.top_left.y + self.height as i32 - 1) {
            for x in (self.top_left.x + 1)..(self.top_left.x + self.width as i32 - 1) {
                positions.push(Position::new(x, y));
            }
        }

        positions
    }

    /// Samples a uniformly random interior point.
    ///
    /// Rooms thinner than 3 tiles fall back to the tile just inside the corner.
    pub fn random_interior_point(&self, rng: &mut StdRng) -> Position {
        let span_x = (self.width as i32 - 2).max(1);
        let span_y = (self.height as i32 - 2).max(1);
        Position::new(
            self.top_left.x + 1 + rng.gen_range(0..span_x),
            self.top_left.y + 1 + rng.gen_range(0..span_y),
        )
    }

    /// Adds a connection to another room.
    pub fn add_connection(&mut self, room_id: u32) {
        if !self.connections.contains(&room_id) {
            self.connections.push(room_id);
        }
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> DelveResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> DelveResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;

    /// Creates a seeded random number generator.
    pub fn create_rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_config_matches_fixed_values() {
        let config = GenerationConfig::default();
        assert_eq!(config.width, 35);
        assert_eq!(config.height, 22);
        assert_eq!(config.max_room_attempts, 12);
        assert_eq!(config.min_room_size, 4);
        assert_eq!(config.max_room_size, 9);
    }

    #[test]
    fn test_config_validation() {
        assert!(GenerationConfig::new().validate().is_ok());

        let tiny = GenerationConfig {
            width: 10,
            height: 10,
            ..GenerationConfig::new()
        };
        assert!(matches!(tiny.validate(), Err(DelveError::InvalidConfig(_))));

        let inverted = GenerationConfig {
            min_room_size: 8,
            max_room_size: 5,
            ..GenerationConfig::new()
        };
        assert!(inverted.validate().is_err());
    }

    #[test]
    fn test_room_geometry() {
        let room = Room::new(1, Position::new(5, 5), 10, 8);

        assert_eq!(room.center(), Position::new(10, 9));

        assert!(room.contains(Position::new(7, 7)));
        assert!(room.contains(Position::new(5, 5))); // Top-left corner
        assert!(room.contains(Position::new(14, 12))); // Bottom-right corner
        assert!(!room.contains(Position::new(4, 5))); // Outside left
        assert!(!room.contains(Position::new(15, 12))); // Outside right
    }

    #[test]
    fn test_room_overlap() {
        let room1 = Room::new(1, Position::new(5, 5), 10, 8);
        let room2 = Room::new(2, Position::new(10, 8), 6, 6); // Overlaps
        let room3 = Room::new(3, Position::new(20, 20), 5, 5); // No overlap
        let touching = Room::new(4, Position::new(15, 5), 4, 4); // Shares an edge line

        assert!(room1.overlaps(&room2));
        assert!(room2.overlaps(&room1));
        assert!(!room1.overlaps(&room3));
        assert!(!room3.overlaps(&room1));
        assert!(!room1.overlaps(&touching));
    }

    #[test]
    fn test_room_positions() {
        let room = Room::new(1, Position::new(5, 5), 4, 4);

        let interior = room.interior_positions();
        assert_eq!(interior.len(), 4);
        assert_eq!(room.all_positions().len(), 16);
        assert!(interior.contains(&room.center()));
    }

    #[test]
    fn test_random_interior_point_stays_inside() {
        let room = Room::new(0, Position::new(3, 2), 5, 7);
        let interior: HashSet<_> = room.interior_positions().into_iter().collect();
        let mut rng = utils::create_rng(12345);
        let mut seen = HashSet::new();

        for _ in 0..500 {
            let point = room.random_interior_point(&mut rng);
            assert!(interior.contains(&point), "{:?} escaped the interior", point);
            seen.insert(point);
        }

        // 3x5 interior, every tile should turn up
        assert_eq!(seen.len(), interior.len());
    }

    #[test]
    fn test_room_connections() {
        let mut room = Room::new(1, Position::new(5, 5), 10, 8);
        room.add_connection(2);
        room.add_connection(2);
        room.add_connection(0);
        assert_eq!(room.connections, vec![2, 0]);
    }
}
