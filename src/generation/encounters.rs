//! # Encounter Tables
//!
//! Monster spawn odds and stat scaling by dungeon depth.

use crate::{Monster, Position, Stats};

/// Spawn chance at depth 0, in percent.
pub const MONSTER_BASE_SPAWN_PERCENT: u32 = 40;
/// Extra spawn chance per level of depth, in percent.
pub const MONSTER_SPAWN_PERCENT_PER_DEPTH: u32 = 8;

pub const MONSTER_BASE_HP: i32 = 8;
pub const MONSTER_HP_PER_DEPTH: i32 = 4;
pub const MONSTER_BASE_ATTACK: i32 = 3;
pub const MONSTER_ATTACK_PER_DEPTH: i32 = 1;

/// Chance, in percent, that a room gets a monster at this depth.
///
/// # Examples
///
/// ```
/// use delve::monster_spawn_percent;
///
/// assert_eq!(monster_spawn_percent(1), 48);
/// assert_eq!(monster_spawn_percent(20), 100);
/// ```
pub fn monster_spawn_percent(depth: u32) -> u32 {
    MONSTER_BASE_SPAWN_PERCENT
        .saturating_add(MONSTER_SPAWN_PERCENT_PER_DEPTH.saturating_mul(depth))
        .min(100)
}

/// Stats for a monster spawned at this depth.
pub fn monster_stats(depth: u32) -> Stats {
    let depth = depth as i32;
    Stats::new(
        MONSTER_BASE_HP + MONSTER_HP_PER_DEPTH * depth,
        MONSTER_BASE_ATTACK + MONSTER_ATTACK_PER_DEPTH * depth,
    )
}

/// Builds a depth-scaled monster at a position.
pub fn spawn_monster(position: Position, depth: u32) -> Monster {
    Monster::new(position, monster_stats(depth))
}
