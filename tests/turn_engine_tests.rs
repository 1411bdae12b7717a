//! Scenario tests for the turn engine on hand-built levels.

use delve::{
    BlockReason, DelveResult, Direction, GameEvent, GameState, GameStatus, Intent, Item, ItemKind,
    Level, Monster, Player, Position, Room, Stats, Tile, WELCOME_MESSAGE,
};

/// A 10x8 level with a single 6x4 room at (2, 2) and its stairs in the far corner.
fn test_level() -> Level {
    let mut level = Level::new(10, 8);
    let room = Room::new(0, Position::new(2, 2), 6, 4);
    for pos in room.all_positions() {
        level.set_tile(pos, Tile::Floor).unwrap();
    }
    level.rooms.push(room);
    level.player_spawn = Position::new(3, 3);
    level.stairs = Some(Position::new(7, 5));
    level
}

fn player_at(x: i32, y: i32) -> Player {
    Player::new(Position::new(x, y))
}

#[test]
fn test_wall_blocks_without_monster_turn() -> DelveResult<()> {
    let mut level = test_level();
    let monster_id = level
        .monsters
        .insert(Monster::new(Position::new(6, 4), Stats::new(12, 4)));
    let mut game = GameState::new_with_level(level, player_at(2, 2), 1);

    let result = game.submit_intent(Intent::Move(Direction::North))?;

    assert!(result.narration.contains("blocked"));
    assert!(result.is_no_op());
    assert_eq!(
        result.events,
        vec![GameEvent::MoveBlocked {
            target: Position::new(2, 1),
            reason: BlockReason::Wall,
        }]
    );
    assert_eq!(game.player().position, Position::new(2, 2));
    assert_eq!(
        game.level().monsters.get(monster_id).map(|m| m.position),
        Some(Position::new(6, 4))
    );
    Ok(())
}

#[test]
fn test_killing_blow_removes_monster_without_retaliation() -> DelveResult<()> {
    let mut level = test_level();
    let monster_id = level
        .monsters
        .insert(Monster::new(Position::new(4, 3), Stats::new(15, 9)));
    let mut player = player_at(3, 3);
    player.stats.attack_power = 20;
    let mut game = GameState::new_with_level(level, player, 1);

    let result = game.submit_intent(Intent::Move(Direction::East))?;

    assert!(game.level().monsters.get(monster_id).is_none());
    assert_eq!(game.player().position, Position::new(3, 3));
    assert_eq!(game.player().stats.hp, 100);
    assert_eq!(game.player().experience, 10);
    assert!(result.narration.contains("Victory"));
    assert!(result.events.contains(&GameEvent::MonsterSlain {
        monster: monster_id,
        experience: 10,
    }));
    assert_eq!(game.statistics().enemies_defeated, 1);
    Ok(())
}

#[test]
fn test_retaliation_can_kill_the_player() -> DelveResult<()> {
    let mut level = test_level();
    level
        .monsters
        .insert(Monster::new(Position::new(4, 3), Stats::new(40, 10)));
    let mut player = player_at(3, 3);
    player.stats.hp = 8;
    let mut game = GameState::new_with_level(level, player, 1);

    let result = game.submit_intent(Intent::Move(Direction::East))?;

    assert!(!result.player_alive);
    assert_eq!(game.player().stats.hp, 0);
    assert_eq!(game.status(), GameStatus::GameOver);
    assert!(result.events.contains(&GameEvent::PlayerDied));
    Ok(())
}

#[test]
fn test_dead_player_only_accepts_restart() -> DelveResult<()> {
    let mut player = player_at(3, 3);
    player.stats.hp = 0;
    player.stats.attack_power = 30;
    player.experience = 40;
    let mut game = GameState::new_with_level(test_level(), player, 5);
    assert!(game.is_game_over());

    for intent in [Intent::Move(Direction::East), Intent::UsePotion] {
        let result = game.submit_intent(intent)?;
        assert!(result.is_no_op());
        assert_eq!(result.events, vec![GameEvent::Rejected { intent }]);
        assert_eq!(game.player().position, Position::new(3, 3));
        assert_eq!(game.player().potion_count, 3);
    }

    let result = game.submit_intent(Intent::Restart)?;

    assert!(result.player_alive);
    assert_eq!(result.depth, 1);
    assert_eq!(result.events, vec![GameEvent::GameStarted { depth: 1 }]);
    assert_eq!(result.narration, WELCOME_MESSAGE);
    assert_eq!(game.status(), GameStatus::Exploring);

    let fresh = game.player();
    assert_eq!(fresh.stats, Stats::new(100, 12));
    assert_eq!(fresh.potion_count, 3);
    assert_eq!(fresh.experience, 0);
    assert!(!fresh.level_up_claimed);
    assert_eq!(fresh.position, game.level().player_spawn);
    assert_eq!(game.dimensions(), (35, 22));
    Ok(())
}

#[test]
fn test_stairs_descend_and_keep_progress() -> DelveResult<()> {
    let mut player = player_at(6, 5);
    player.stats = Stats {
        hp: 60,
        max_hp: 120,
        attack_power: 21,
    };
    player.potion_count = 1;
    player.experience = 70;
    player.level_up_claimed = true;
    let mut game = GameState::new_with_level(test_level(), player, 11);

    let result = game.submit_intent(Intent::Move(Direction::East))?;

    assert_eq!(result.depth, 2);
    assert_eq!(game.depth(), 2);
    assert!(result.events.contains(&GameEvent::Descended { depth: 2 }));
    assert!(result.narration.contains("(Level 2)"));

    // Fresh standard-size level; the player lands on its spawn
    assert_eq!(game.dimensions(), (35, 22));
    let player = game.player();
    assert_eq!(player.position, game.level().player_spawn);
    assert_eq!(player.stats.max_hp, 120);
    assert_eq!(player.stats.attack_power, 21);
    assert_eq!(player.potion_count, 1);
    assert_eq!(player.experience, 70);
    assert!(player.level_up_claimed);
    // Only the new level's monsters could have hurt the player since
    assert!(player.stats.hp <= 60);
    assert_eq!(game.statistics().max_depth_reached, 2);
    Ok(())
}

#[test]
fn test_potion_bounds() -> DelveResult<()> {
    let mut player = player_at(3, 3);
    let mut game = GameState::new_with_level(test_level(), player.clone(), 1);

    // Full health: nothing happens
    let result = game.submit_intent(Intent::UsePotion)?;
    assert!(result.is_no_op());
    assert!(result.narration.contains("full health"));
    assert_eq!(game.player().potion_count, 3);

    // Heal never overshoots max
    player.stats.hp = 90;
    let mut game = GameState::new_with_level(test_level(), player.clone(), 1);
    let result = game.submit_intent(Intent::UsePotion)?;
    assert_eq!(result.events, vec![GameEvent::PotionDrunk { healed: 10 }]);
    assert_eq!(game.player().stats.hp, 100);
    assert_eq!(game.player().potion_count, 2);

    // No potions wins over anything else
    player.potion_count = 0;
    player.stats.hp = 100;
    let mut game = GameState::new_with_level(test_level(), player, 1);
    let result = game.submit_intent(Intent::UsePotion)?;
    assert!(result.narration.contains("no potions"));
    assert_eq!(game.player().potion_count, 0);
    Ok(())
}

#[test]
fn test_item_pickups() -> DelveResult<()> {
    let mut level = test_level();
    level
        .items
        .insert(Item::new(Position::new(4, 3), ItemKind::HealthElixir));
    level
        .items
        .insert(Item::new(Position::new(5, 3), ItemKind::PowerCrystal));
    let mut player = player_at(3, 3);
    player.stats.hp = 50;
    let mut game = GameState::new_with_level(level, player, 1);

    // Badly hurt: the elixir is drunk on the spot
    let result = game.submit_intent(Intent::Move(Direction::East))?;
    assert!(result.events.contains(&GameEvent::ItemPickedUp {
        kind: ItemKind::HealthElixir
    }));
    assert_eq!(game.player().stats.hp, 85);
    assert_eq!(game.player().potion_count, 3);

    let result = game.submit_intent(Intent::Move(Direction::East))?;
    assert!(result.narration.contains("power crystal"));
    assert_eq!(game.player().stats.attack_power, 17);

    assert!(game.level().items.is_empty());
    assert_eq!(game.statistics().items_collected, 2);
    assert_eq!(game.statistics().potions_drunk, 1);
    Ok(())
}

#[test]
fn test_healthy_player_keeps_elixir() -> DelveResult<()> {
    let mut level = test_level();
    level
        .items
        .insert(Item::new(Position::new(4, 3), ItemKind::HealthElixir));
    let mut player = player_at(3, 3);
    player.stats.hp = 70;
    let mut game = GameState::new_with_level(level, player, 1);

    game.submit_intent(Intent::Move(Direction::East))?;

    // Exactly 70% is not below the threshold
    assert_eq!(game.player().stats.hp, 70);
    assert_eq!(game.player().potion_count, 4);
    Ok(())
}

#[test]
fn test_level_up_is_granted_once() -> DelveResult<()> {
    let mut level = test_level();
    level
        .monsters
        .insert(Monster::new(Position::new(4, 3), Stats::new(5, 1)));
    level
        .monsters
        .insert(Monster::new(Position::new(3, 4), Stats::new(5, 1)));
    let mut player = player_at(3, 3);
    player.experience = 40;
    let mut game = GameState::new_with_level(level, player, 1);

    let result = game.submit_intent(Intent::Move(Direction::East))?;
    assert!(result.events.contains(&GameEvent::LevelUp {
        max_hp: 120,
        attack_power: 15,
    }));
    assert_eq!(game.player().stats.hp, 120);
    assert!(game.player().level_up_claimed);

    let result = game.submit_intent(Intent::Move(Direction::South))?;
    assert!(!result
        .events
        .iter()
        .any(|event| matches!(event, GameEvent::LevelUp { .. })));
    assert_eq!(game.player().experience, 60);
    assert_eq!(game.player().stats.max_hp, 120);
    assert_eq!(game.player().stats.attack_power, 15);
    Ok(())
}

#[test]
fn test_monster_closes_in_and_attacks() -> DelveResult<()> {
    let mut level = test_level();
    let monster_id = level
        .monsters
        .insert(Monster::new(Position::new(7, 3), Stats::new(12, 4)));
    let mut game = GameState::new_with_level(level, player_at(2, 3), 1);

    // Monster walks west each turn until it is one step away
    game.submit_intent(Intent::Move(Direction::East))?;
    assert_eq!(
        game.level().monsters.get(monster_id).map(|m| m.position),
        Some(Position::new(6, 3))
    );
    game.submit_intent(Intent::Move(Direction::East))?;
    assert_eq!(
        game.level().monsters.get(monster_id).map(|m| m.position),
        Some(Position::new(5, 3))
    );

    // Stepping south leaves the monster one diagonal step away; it strikes
    let result = game.submit_intent(Intent::Move(Direction::South))?;
    assert!(result.events.contains(&GameEvent::PlayerDamaged {
        monster: monster_id,
        damage: 4,
    }));
    assert_eq!(game.player().stats.hp, 96);
    Ok(())
}
