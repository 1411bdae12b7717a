//! # Progression Rules
//!
//! Experience, the one-time level-up bonus, and the potion economy.

use crate::{ItemKind, Player};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Experience awarded for slaying a monster.
pub const EXPERIENCE_PER_KILL: u32 = 10;

/// Landing in this experience window grants the level-up bonus.
pub const LEVEL_UP_WINDOW: Range<u32> = 50..60;

pub const LEVEL_UP_MAX_HP_BONUS: i32 = 20;
pub const LEVEL_UP_HP_BONUS: i32 = 20;
pub const LEVEL_UP_ATTACK_BONUS: i32 = 3;

/// Health restored by one potion.
pub const POTION_HEAL: i32 = 35;

/// Picking up an elixir below this share of max health (in percent) drinks it.
pub const AUTO_DRINK_THRESHOLD_PERCENT: i32 = 70;

/// Attack gained from a power crystal.
pub const CRYSTAL_ATTACK_BONUS: i32 = 5;

/// Result of trying to drink a potion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PotionOutcome {
    /// A potion was consumed; carries the health actually restored
    Drank { healed: i32 },
    NoPotions,
    AlreadyFull,
}

/// Result of picking up an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupOutcome {
    /// Elixir stored; `auto_drink` holds the result when it was drunk at once
    Elixir { auto_drink: Option<PotionOutcome> },
    Crystal { attack_power: i32 },
}

/// Stat changes applied by a level-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUp {
    pub max_hp_bonus: i32,
    pub hp_bonus: i32,
    pub attack_bonus: i32,
}

impl Player {
    /// Drinks a potion if one is carried and health is below the ceiling.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Player, Position, PotionOutcome};
    ///
    /// let mut player = Player::new(Position::new(1, 1));
    /// assert_eq!(player.use_potion(), PotionOutcome::AlreadyFull);
    ///
    /// player.stats.hp = 50;
    /// assert_eq!(player.use_potion(), PotionOutcome::Drank { healed: 35 });
    /// assert_eq!(player.potion_count, 2);
    /// ```
    pub fn use_potion(&mut self) -> PotionOutcome {
        if self.potion_count > 0 && self.stats.hp < self.stats.max_hp {
            self.potion_count -= 1;
            let healed = self.stats.heal(POTION_HEAL);
            PotionOutcome::Drank { healed }
        } else if self.potion_count == 0 {
            PotionOutcome::NoPotions
        } else {
            PotionOutcome::AlreadyFull
        }
    }

    /// Applies an item's effect. Pickup never fails.
    pub fn pick_up(&mut self, kind: ItemKind) -> PickupOutcome {
        match kind {
            ItemKind::HealthElixir => {
                self.potion_count += 1;
                let auto_drink = if self.is_badly_hurt() {
                    Some(self.use_potion())
                } else {
                    None
                };
                PickupOutcome::Elixir { auto_drink }
            }
            ItemKind::PowerCrystal => {
                self.stats.attack_power += CRYSTAL_ATTACK_BONUS;
                PickupOutcome::Crystal {
                    attack_power: self.stats.attack_power,
                }
            }
        }
    }

    /// Adds experience and grants the level-up bonus the first time the
    /// total lands inside [`LEVEL_UP_WINDOW`].
    pub fn gain_experience(&mut self, amount: u32) -> Option<LevelUp> {
        self.experience += amount;
        if self.level_up_claimed || !LEVEL_UP_WINDOW.contains(&self.experience) {
            return None;
        }

        self.level_up_claimed = true;
        self.stats.max_hp += LEVEL_UP_MAX_HP_BONUS;
        self.stats.hp += LEVEL_UP_HP_BONUS;
        self.stats.attack_power += LEVEL_UP_ATTACK_BONUS;
        log::info!(
            "Player levelled up at {} experience: max hp {}, attack {}",
            self.experience,
            self.stats.max_hp,
            self.stats.attack_power
        );

        Some(LevelUp {
            max_hp_bonus: LEVEL_UP_MAX_HP_BONUS,
            hp_bonus: LEVEL_UP_HP_BONUS,
            attack_bonus: LEVEL_UP_ATTACK_BONUS,
        })
    }

    // hp < 70% of max, kept in integers
    fn is_badly_hurt(&self) -> bool {
        self.stats.hp * 100 < self.stats.max_hp * AUTO_DRINK_THRESHOLD_PERCENT
    }
}
