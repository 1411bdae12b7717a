//! # World Representation
//!
//! The tile grid and everything placed on it for a single dungeon level.

use crate::{Arena, DelveError, DelveResult, EntityId, Item, Monster, Position, Room};
use serde::{Deserialize, Serialize};

/// A single map cell. Fixed for the lifetime of a level once generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    Floor,
}

impl Tile {
    /// Whether creatures can stand on this tile.
    pub fn is_passable(self) -> bool {
        matches!(self, Tile::Floor)
    }
}

/// State of one dungeon level.
///
/// The grid is stored row-major as `tiles[y][x]`. A level is built once by the
/// generator and the population service, then replaced wholesale on descent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    /// Width of the grid in tiles
    pub width: u32,
    /// Height of the grid in tiles
    pub height: u32,
    /// Tile grid indexed as `tiles[y][x]`
    pub tiles: Vec<Vec<Tile>>,
    /// Rooms in acceptance order
    pub rooms: Vec<Room>,
    /// Where the player enters this level
    pub player_spawn: Position,
    /// Exit to the next depth; absent only on a roomless level
    pub stairs: Option<Position>,
    /// Live monsters
    pub monsters: Arena<Monster>,
    /// Items lying on the floor
    pub items: Arena<Item>,
}

impl Level {
    /// Creates a solid-wall level with no rooms or entities.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Level, Position, Tile};
    ///
    /// let level = Level::new(10, 8);
    /// assert_eq!(level.get_tile(Position::new(3, 3)), Some(Tile::Wall));
    /// assert_eq!(level.get_tile(Position::new(10, 0)), None);
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![vec![Tile::Wall; width as usize]; height as usize],
            rooms: Vec::new(),
            player_spawn: Position::new(width as i32 / 2, height as i32 / 2),
            stairs: None,
            monsters: Arena::new(),
            items: Arena::new(),
        }
    }

    /// Checks whether a position lies inside the grid.
    pub fn is_valid_position(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Gets the tile at a position, or None outside the grid.
    pub fn get_tile(&self, pos: Position) -> Option<Tile> {
        if !self.is_valid_position(pos) {
            return None;
        }
        Some(self.tiles[pos.y as usize][pos.x as usize])
    }

    /// Sets the tile at a position.
    pub fn set_tile(&mut self, pos: Position, tile: Tile) -> DelveResult<()> {
        if !self.is_valid_position(pos) {
            return Err(DelveError::OutOfBounds(pos));
        }
        self.tiles[pos.y as usize][pos.x as usize] = tile;
        Ok(())
    }

    /// True when the position is inside the grid and walkable.
    pub fn is_floor(&self, pos: Position) -> bool {
        self.get_tile(pos).is_some_and(Tile::is_passable)
    }

    /// Counts the walkable tiles on the level.
    pub fn floor_count(&self) -> usize {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|tile| tile.is_passable())
            .count()
    }

    /// Finds the monster standing on a tile.
    ///
    /// Monsters may share a tile after pursuit; the lowest id wins.
    pub fn monster_at(&self, pos: Position) -> Option<EntityId> {
        self.monsters
            .iter()
            .find(|(_, monster)| monster.position == pos)
            .map(|(id, _)| id)
    }

    /// Finds the item lying on a tile.
    pub fn item_at(&self, pos: Position) -> Option<EntityId> {
        self.items
            .iter()
            .find(|(_, item)| item.position == pos)
            .map(|(id, _)| id)
    }

    /// Whether the stairs, a monster or an item already claims this tile.
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.stairs == Some(pos) || self.monster_at(pos).is_some() || self.item_at(pos).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ItemKind, Stats};

    #[test]
    fn test_new_level_is_solid_wall() {
        let level = Level::new(35, 22);
        assert_eq!(level.tiles.len(), 22);
        assert!(level.tiles.iter().all(|row| row.len() == 35));
        assert_eq!(level.floor_count(), 0);
        assert!(level.rooms.is_empty());
        assert!(level.stairs.is_none());
    }

    #[test]
    fn test_tile_bounds() {
        let mut level = Level::new(10, 10);
        assert!(level.is_valid_position(Position::new(0, 0)));
        assert!(level.is_valid_position(Position::new(9, 9)));
        assert!(!level.is_valid_position(Position::new(-1, 0)));
        assert!(!level.is_valid_position(Position::new(0, 10)));

        assert!(level.set_tile(Position::new(4, 4), Tile::Floor).is_ok());
        assert!(level.is_floor(Position::new(4, 4)));
        assert!(matches!(
            level.set_tile(Position::new(10, 4), Tile::Floor),
            Err(DelveError::OutOfBounds(_))
        ));
    }

    #[test]
    fn test_occupancy_queries() {
        let mut level = Level::new(10, 10);
        let monster_pos = Position::new(2, 2);
        let item_pos = Position::new(3, 3);
        let monster_id = level
            .monsters
            .insert(Monster::new(monster_pos, Stats::new(12, 4)));
        let item_id = level.items.insert(Item::new(item_pos, ItemKind::HealthElixir));
        level.stairs = Some(Position::new(4, 4));

        assert_eq!(level.monster_at(monster_pos), Some(monster_id));
        assert_eq!(level.item_at(item_pos), Some(item_id));
        assert!(level.is_occupied(Position::new(4, 4)));
        assert!(!level.is_occupied(Position::new(5, 5)));

        level.monsters.remove(monster_id);
        assert!(level.monster_at(monster_pos).is_none());
        assert!(!level.is_occupied(monster_pos));
    }
}
