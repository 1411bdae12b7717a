//! # Dungeon Generation
//!
//! Room-and-corridor layout generation.
//!
//! The generator:
//! 1. Fills the grid with wall
//! 2. Tries a fixed number of random room candidates, skipping any that
//!    overlap an accepted room
//! 3. Joins each accepted room to the next with an L-shaped corridor
//! 4. Picks the player spawn and the stairs from room centers

use crate::{DelveError, DelveResult, GenerationConfig, Generator, Level, Position, Room, Tile};
use rand::{rngs::StdRng, seq::SliceRandom, Rng};

/// Room-and-corridor dungeon generator.
///
/// Rooms are linked as a simple path in acceptance order, so every level with
/// at least two rooms is connected by construction.
#[derive(Debug, Clone, Default)]
pub struct RoomCorridorGenerator;

impl RoomCorridorGenerator {
    /// Creates a new dungeon generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{GenerationConfig, Generator, RoomCorridorGenerator};
    /// use delve::generation::utils::create_rng;
    ///
    /// let generator = RoomCorridorGenerator::new();
    /// let level = generator.generate(&GenerationConfig::new(), &mut create_rng(7)).unwrap();
    /// assert!(!level.rooms.is_empty());
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Places rooms, carving each accepted one immediately.
    fn place_rooms(
        &self,
        level: &mut Level,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> DelveResult<()> {
        for _ in 0..config.max_room_attempts {
            let candidate = self.generate_room_candidate(config, rng, level.rooms.len() as u32);

            if level.rooms.iter().any(|existing| candidate.overlaps(existing)) {
                log::trace!("Rejected overlapping room at {:?}", candidate.top_left);
                continue;
            }

            self.carve_room(level, &candidate)?;
            level.rooms.push(candidate);
        }

        log::debug!(
            "Accepted {} of {} room candidates",
            level.rooms.len(),
            config.max_room_attempts
        );
        Ok(())
    }

    /// Draws a candidate room that fits inside the grid with a 1-tile margin.
    fn generate_room_candidate(
        &self,
        config: &GenerationConfig,
        rng: &mut StdRng,
        room_id: u32,
    ) -> Room {
        let width = rng.gen_range(config.min_room_size..=config.max_room_size);
        let height = rng.gen_range(config.min_room_size..=config.max_room_size);
        let x = rng.gen_range(1..(config.width - width)) as i32;
        let y = rng.gen_range(1..(config.height - height)) as i32;

        Room::new(room_id, Position::new(x, y), width, height)
    }

    /// Checks if a room fits within the grid, leaving the outer ring solid.
    fn room_fits_in_level(&self, level: &Level, room: &Room) -> bool {
        room.top_left.x >= 1
            && room.top_left.y >= 1
            && room.top_left.x + room.width as i32 <= level.width as i32 - 1
            && room.top_left.y + room.height as i32 <= level.height as i32 - 1
    }

    /// Carves out a room in the level by setting tiles to floor.
    fn carve_room(&self, level: &mut Level, room: &Room) -> DelveResult<()> {
        for pos in room.all_positions() {
            level.set_tile(pos, Tile::Floor)?;
        }
        Ok(())
    }

    /// Joins consecutive rooms in acceptance order.
    fn connect_rooms(&self, level: &mut Level) -> DelveResult<()> {
        if level.rooms.len() < 2 {
            return Ok(());
        }

        for i in 0..(level.rooms.len() - 1) {
            let start = level.rooms[i].center();
            let end = level.rooms[i + 1].center();
            self.carve_l_corridor(level, start, end)?;

            let (left_id, right_id) = (level.rooms[i].id, level.rooms[i + 1].id);
            level.rooms[i].add_connection(right_id);
            level.rooms[i + 1].add_connection(left_id);
        }

        Ok(())
    }

    /// Carves along x from `start` to `end.x`, then along y to `end.y`.
    fn carve_l_corridor(&self, level: &mut Level, start: Position, end: Position) -> DelveResult<()> {
        let mut cursor = start;

        while cursor.x != end.x {
            level.set_tile(cursor, Tile::Floor)?;
            cursor.x += (end.x - cursor.x).signum();
        }
        while cursor.y != end.y {
            level.set_tile(cursor, Tile::Floor)?;
            cursor.y += (end.y - cursor.y).signum();
        }
        level.set_tile(cursor, Tile::Floor)
    }

    /// Picks the player spawn and the stairs.
    ///
    /// The spawn is a random room center. The stairs go on a different room
    /// center when one exists, otherwise on another tile of the single room.
    /// A roomless level keeps the grid-center spawn and has no stairs.
    fn place_landmarks(&self, level: &mut Level, rng: &mut StdRng) {
        let Some(spawn_room) = level.rooms.choose(rng) else {
            log::warn!("Level has no rooms; stairs cannot be placed");
            return;
        };
        let spawn = spawn_room.center();

        let other_centers: Vec<Position> = level
            .rooms
            .iter()
            .map(Room::center)
            .filter(|&center| center != spawn)
            .collect();

        let stairs = if other_centers.is_empty() {
            let mut fallback = spawn_room.interior_positions();
            if fallback.len() < 2 {
                fallback = spawn_room.all_positions();
            }
            fallback.retain(|&pos| pos != spawn);
            fallback.choose(rng).copied()
        } else {
            other_centers.choose(rng).copied()
        };

        level.player_spawn = spawn;
        level.stairs = stairs;
    }
}

impl Generator<Level> for RoomCorridorGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> DelveResult<Level> {
        config.validate()?;

        let mut level = Level::new(config.width, config.height);
        self.place_rooms(&mut level, config, rng)?;
        self.connect_rooms(&mut level)?;
        self.place_landmarks(&mut level, rng);

        Ok(level)
    }

    fn validate(&self, level: &Level, _config: &GenerationConfig) -> DelveResult<()> {
        for (i, room) in level.rooms.iter().enumerate() {
            if !self.room_fits_in_level(level, room) {
                return Err(DelveError::GenerationFailed(format!(
                    "Room {} breaches the map border",
                    room.id
                )));
            }
            if level.rooms[..i].iter().any(|other| other.overlaps(room)) {
                return Err(DelveError::GenerationFailed(format!(
                    "Room {} overlaps an earlier room",
                    room.id
                )));
            }
            if !room.all_positions().into_iter().all(|pos| level.is_floor(pos)) {
                return Err(DelveError::GenerationFailed(format!(
                    "Room {} is not fully carved",
                    room.id
                )));
            }
        }

        let stairs_misplaced = level.stairs.is_none() || level.stairs == Some(level.player_spawn);
        if !level.rooms.is_empty() && stairs_misplaced {
            return Err(DelveError::GenerationFailed(
                "Stairs must exist and differ from the spawn".to_string(),
            ));
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "RoomCorridorGenerator"
    }
}
