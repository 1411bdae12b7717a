//! # Population
//!
//! Scatters monsters and items into generated rooms.
//!
//! Every room gets three independent trials, rolled in a fixed order: a
//! monster, a health elixir, a power crystal. A successful trial samples one
//! interior point and drops the spawn if that tile is already taken. There
//! are no retries.

use crate::{
    item_spawn_percent, monster_spawn_percent, spawn_monster, Item, Level, Monster, Position,
    Room, ITEM_SPAWN_ORDER,
};
use rand::{rngs::StdRng, Rng};

/// Entities produced for one level, before they enter the level's arenas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Population {
    pub monsters: Vec<Monster>,
    pub items: Vec<Item>,
}

impl Population {
    fn is_taken(&self, pos: Position) -> bool {
        self.monsters.iter().any(|monster| monster.position == pos)
            || self.items.iter().any(|item| item.position == pos)
    }
}

/// Stochastic monster and item placement.
#[derive(Debug, Clone, Default)]
pub struct PopulationService;

impl PopulationService {
    pub fn new() -> Self {
        Self
    }

    /// Rolls spawns for every room.
    ///
    /// `reserved` lists tiles that must stay empty, normally the player spawn
    /// and the stairs.
    pub fn populate(
        &self,
        rooms: &[Room],
        depth: u32,
        reserved: &[Position],
        rng: &mut StdRng,
    ) -> Population {
        let mut population = Population::default();
        let mut discarded = 0;

        for room in rooms {
            if roll_percent(rng, monster_spawn_percent(depth)) {
                let pos = room.random_interior_point(rng);
                if reserved.contains(&pos) || population.is_taken(pos) {
                    discarded += 1;
                } else {
                    population.monsters.push(spawn_monster(pos, depth));
                }
            }

            for kind in ITEM_SPAWN_ORDER {
                if roll_percent(rng, item_spawn_percent(kind)) {
                    let pos = room.random_interior_point(rng);
                    if reserved.contains(&pos) || population.is_taken(pos) {
                        discarded += 1;
                    } else {
                        population.items.push(Item::new(pos, kind));
                    }
                }
            }
        }

        log::debug!(
            "Depth {}: spawned {} monsters and {} items, discarded {} on collision",
            depth,
            population.monsters.len(),
            population.items.len(),
            discarded
        );
        population
    }

    /// Populates a generated level in place, keeping its spawn and stairs clear.
    pub fn populate_level(&self, level: &mut Level, depth: u32, rng: &mut StdRng) {
        let mut reserved = vec![level.player_spawn];
        reserved.extend(level.stairs);

        let population = self.populate(&level.rooms, depth, &reserved, rng);
        for monster in population.monsters {
            level.monsters.insert(monster);
        }
        for item in population.items {
            level.items.insert(item);
        }
    }
}

/// Bernoulli trial with a percent chance, rolled as in `0..100 < percent`.
fn roll_percent(rng: &mut StdRng, percent: u32) -> bool {
    rng.gen_range(0..100) < percent
}
