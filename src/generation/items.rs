//! # Item Tables
//!
//! Per-room spawn odds for floor pickups. Item odds do not depend on depth.

use crate::ItemKind;

/// Item kinds in the order their per-room trials are rolled.
pub const ITEM_SPAWN_ORDER: [ItemKind; 2] = [ItemKind::HealthElixir, ItemKind::PowerCrystal];

/// Chance, in percent, that a room rolls this item.
pub fn item_spawn_percent(kind: ItemKind) -> u32 {
    match kind {
        ItemKind::HealthElixir => 15,
        ItemKind::PowerCrystal => 5,
    }
}
