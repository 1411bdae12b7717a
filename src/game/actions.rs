//! # Intents and Turn Results
//!
//! The vocabulary a host uses to drive the engine, and the record the engine
//! hands back after each turn.

use crate::{Direction, EntityId, ItemKind, Position};
use serde::{Deserialize, Serialize};

/// A single discrete player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Step one tile, attacking if a monster stands there
    Move(Direction),
    /// Drink a potion
    UsePotion,
    /// Start over; honoured only after the player has fallen
    Restart,
}

/// Why a move went nowhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockReason {
    MapEdge,
    Wall,
}

/// Something that happened during a turn, in order of occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerMoved {
        from: Position,
        to: Position,
    },
    MoveBlocked {
        target: Position,
        reason: BlockReason,
    },
    PlayerStruck {
        monster: EntityId,
        damage: i32,
    },
    MonsterSlain {
        monster: EntityId,
        experience: u32,
    },
    PlayerDamaged {
        monster: EntityId,
        damage: i32,
    },
    MonsterMoved {
        monster: EntityId,
        from: Position,
        to: Position,
    },
    ItemPickedUp {
        kind: ItemKind,
    },
    PotionDrunk {
        healed: i32,
    },
    LevelUp {
        max_hp: i32,
        attack_power: i32,
    },
    Descended {
        depth: u32,
    },
    PlayerDied,
    GameStarted {
        depth: u32,
    },
    /// The intent was not legal in the current state
    Rejected {
        intent: Intent,
    },
}

/// What the engine reports back for one submitted intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnResult {
    /// Human-readable account of the turn
    pub narration: String,
    pub player_alive: bool,
    pub depth: u32,
    pub events: Vec<GameEvent>,
}

impl TurnResult {
    /// True when the intent changed nothing.
    pub fn is_no_op(&self) -> bool {
        self.events.iter().all(|event| {
            matches!(
                event,
                GameEvent::MoveBlocked { .. } | GameEvent::Rejected { .. }
            )
        })
    }
}
