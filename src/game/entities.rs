//! # Entity Model
//!
//! Player, monster and item records, plus the slot arena that holds the
//! per-level monster and item sets.

use crate::{config, Position};
use serde::{Deserialize, Serialize};

/// Stable identifier for an entity within one level's arena.
///
/// Identifiers are never reused while the arena lives, so an id captured
/// before a removal still refers to the same slot afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub usize);

/// Slot arena keyed by [`EntityId`].
///
/// Removal empties a slot instead of shifting the storage, so it is safe to
/// snapshot ids, then remove entities while walking the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena<T> {
    slots: Vec<Option<T>>,
}

impl<T> Arena<T> {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Stores a value and returns its id.
    pub fn insert(&mut self, value: T) -> EntityId {
        self.slots.push(Some(value));
        EntityId(self.slots.len() - 1)
    }

    /// Removes and returns the value in a slot, leaving the slot empty.
    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        self.slots.get_mut(id.0).and_then(Option::take)
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Iterates over live entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|value| (EntityId(index), value)))
    }

    /// Copies out the ids of all live entries.
    pub fn ids(&self) -> Vec<EntityId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Combat statistics shared by the player and monsters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Current health, never below zero
    pub hp: i32,
    /// Health ceiling
    pub max_hp: i32,
    /// Damage dealt per strike
    pub attack_power: i32,
}

impl Stats {
    /// Creates stats at full health.
    pub fn new(max_hp: i32, attack_power: i32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            attack_power,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Applies damage, clamping health at zero. Returns the damage dealt.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp - amount).max(0);
        before - self.hp
    }

    /// Restores health up to the ceiling. Returns the amount healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp + amount).min(self.max_hp);
        self.hp - before
    }
}

/// Common behaviour for anything placed on the map.
pub trait Entity {
    fn position(&self) -> Position;

    fn is_alive(&self) -> bool;
}

/// The player character. Persists across levels within a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub position: Position,
    pub stats: Stats,
    pub potion_count: u32,
    /// Cumulative experience, never decreases
    pub experience: u32,
    /// Set once the level-up bonus has been granted
    pub level_up_claimed: bool,
}

impl Player {
    /// Creates a player with default starting stats.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Player, Position};
    ///
    /// let player = Player::new(Position::new(5, 5));
    /// assert_eq!(player.stats.hp, 100);
    /// assert_eq!(player.stats.attack_power, 12);
    /// assert_eq!(player.potion_count, 3);
    /// ```
    pub fn new(position: Position) -> Self {
        Self {
            position,
            stats: Stats::new(config::PLAYER_START_HP, config::PLAYER_START_ATTACK),
            potion_count: config::PLAYER_START_POTIONS,
            experience: 0,
            level_up_claimed: false,
        }
    }
}

impl Entity for Player {
    fn position(&self) -> Position {
        self.position
    }

    fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }
}

/// A hostile creature that pursues the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub position: Position,
    pub stats: Stats,
}

impl Monster {
    pub fn new(position: Position, stats: Stats) -> Self {
        Self { position, stats }
    }
}

impl Entity for Monster {
    fn position(&self) -> Position {
        self.position
    }

    fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }
}

/// Kinds of floor pickups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Adds a potion, drunk on the spot when the player is badly hurt
    HealthElixir,
    /// Permanently raises attack power
    PowerCrystal,
}

impl ItemKind {
    pub fn name(self) -> &'static str {
        match self {
            ItemKind::HealthElixir => "Health Elixir",
            ItemKind::PowerCrystal => "Power Crystal",
        }
    }
}

/// An item lying on the floor, consumed on pickup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub position: Position,
    pub kind: ItemKind,
}

impl Item {
    pub fn new(position: Position, kind: ItemKind) -> Self {
        Self { position, kind }
    }
}

impl Entity for Item {
    fn position(&self) -> Position {
        self.position
    }

    fn is_alive(&self) -> bool {
        true
    }
}
