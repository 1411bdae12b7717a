//! # Game State Module
//!
//! The turn engine and the session state it owns.
//!
//! [`GameState`] accepts one [`Intent`] at a time and resolves it fully before
//! returning: the player's action, then, after a successful step, the monster
//! pursuit phase. Hosts read state through accessors or an owned
//! [`GameSnapshot`]; nothing outside this module mutates it.

use crate::generation::utils;
use crate::{
    config, BlockReason, DelveResult, Direction, Entity, EntityId, GameEvent, GenerationConfig,
    Generator, Intent, Item, ItemKind, Level, Monster, PickupOutcome, Player, PopulationService,
    Position, PotionOutcome, RoomCorridorGenerator, Tile, TurnResult, EXPERIENCE_PER_KILL,
};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Narration shown when a game begins.
pub const WELCOME_MESSAGE: &str =
    "Welcome, brave adventurer! Find the glowing portal to descend deeper.";

/// Whether the session is still accepting moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Player is alive
    Exploring,
    /// Player has fallen; only a restart is accepted
    GameOver,
}

/// Game statistics tracking player progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatistics {
    /// Number of successful steps
    pub steps_taken: u64,
    /// Number of monsters slain
    pub enemies_defeated: u32,
    /// Number of items picked up
    pub items_collected: u32,
    /// Potions drunk, by hand or on pickup
    pub potions_drunk: u32,
    /// Total damage dealt to monsters
    pub damage_dealt: u64,
    /// Total damage taken from monsters
    pub damage_taken: u64,
    /// Deepest level reached
    pub max_depth_reached: u32,
    /// Number of times the player has died
    pub deaths: u32,
}

impl GameStatistics {
    /// Creates new empty statistics.
    pub fn new() -> Self {
        Self {
            steps_taken: 0,
            enemies_defeated: 0,
            items_collected: 0,
            potions_drunk: 0,
            damage_dealt: 0,
            damage_taken: 0,
            max_depth_reached: config::STARTING_DEPTH,
            deaths: 0,
        }
    }

    /// Updates statistics based on a game event.
    pub fn update_from_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::PlayerMoved { .. } => {
                self.steps_taken += 1;
            }
            GameEvent::PlayerStruck { damage, .. } => {
                self.damage_dealt += *damage as u64;
            }
            GameEvent::PlayerDamaged { damage, .. } => {
                self.damage_taken += *damage as u64;
            }
            GameEvent::MonsterSlain { .. } => {
                self.enemies_defeated += 1;
            }
            GameEvent::ItemPickedUp { .. } => {
                self.items_collected += 1;
            }
            GameEvent::PotionDrunk { .. } => {
                self.potions_drunk += 1;
            }
            GameEvent::Descended { depth } => {
                self.max_depth_reached = self.max_depth_reached.max(*depth);
            }
            GameEvent::PlayerDied => {
                self.deaths += 1;
            }
            _ => {}
        }
    }
}

impl Default for GameStatistics {
    fn default() -> Self {
        Self::new()
    }
}

/// Owned copy of everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub depth: u32,
    pub status: GameStatus,
    pub message: String,
    pub turn_number: u64,
    pub width: u32,
    pub height: u32,
    pub tiles: Vec<Vec<Tile>>,
    pub player: Player,
    pub monsters: Vec<(EntityId, Monster)>,
    pub items: Vec<(EntityId, Item)>,
    pub stairs: Option<Position>,
}

impl GameSnapshot {
    /// Serializes the snapshot to pretty-printed JSON.
    pub fn to_json(&self) -> DelveResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Narration and events gathered while resolving one intent.
#[derive(Debug, Default)]
struct TurnLog {
    lines: Vec<String>,
    events: Vec<GameEvent>,
}

impl TurnLog {
    fn narrate(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn record(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

/// The turn engine.
///
/// Owns the current level (grid, rooms, monsters, items), the player, the
/// depth counter and the single random source used for every roll.
#[derive(Debug, Clone)]
pub struct GameState {
    level: Level,
    player: Player,
    depth: u32,
    status: GameStatus,
    message: String,
    turn_number: u64,
    statistics: GameStatistics,
    seed: u64,
    rng: StdRng,
    config: GenerationConfig,
    generator: RoomCorridorGenerator,
    population: PopulationService,
}

impl GameState {
    /// Starts a new game on the standard 35×22 map.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{GameState, GameStatus};
    ///
    /// let game = GameState::new(12345).unwrap();
    /// assert_eq!(game.depth(), 1);
    /// assert_eq!(game.status(), GameStatus::Exploring);
    /// assert_eq!(game.player().stats.hp, 100);
    /// ```
    pub fn new(seed: u64) -> DelveResult<Self> {
        Self::with_config(GenerationConfig::new(), seed)
    }

    /// Starts a new game with custom generation parameters.
    pub fn with_config(config: GenerationConfig, seed: u64) -> DelveResult<Self> {
        config.validate()?;

        let mut state = Self {
            level: Level::new(config.width, config.height),
            player: Player::new(Position::new(0, 0)),
            depth: config::STARTING_DEPTH,
            status: GameStatus::Exploring,
            message: WELCOME_MESSAGE.to_string(),
            turn_number: 0,
            statistics: GameStatistics::new(),
            seed,
            rng: utils::create_rng(seed),
            config,
            generator: RoomCorridorGenerator::new(),
            population: PopulationService::new(),
        };
        state.new_game(None)?;
        Ok(state)
    }

    /// Creates a game around a pre-built level and player at depth 1.
    ///
    /// Used for hand-crafted scenarios. Descending or restarting generates
    /// standard levels from the default configuration.
    pub fn new_with_level(level: Level, player: Player, seed: u64) -> Self {
        let status = if player.is_alive() {
            GameStatus::Exploring
        } else {
            GameStatus::GameOver
        };

        Self {
            config: GenerationConfig::new(),
            level,
            player,
            depth: config::STARTING_DEPTH,
            status,
            message: WELCOME_MESSAGE.to_string(),
            turn_number: 0,
            statistics: GameStatistics::new(),
            seed,
            rng: utils::create_rng(seed),
            generator: RoomCorridorGenerator::new(),
            population: PopulationService::new(),
        }
    }

    /// Resets to depth 1 with a fresh level and a default player.
    ///
    /// `Some(seed)` reseeds the random source; `None` keeps drawing from the
    /// current stream.
    pub fn new_game(&mut self, seed: Option<u64>) -> DelveResult<()> {
        if let Some(seed) = seed {
            self.seed = seed;
            self.rng = utils::create_rng(seed);
        }

        self.depth = config::STARTING_DEPTH;
        self.level = self.build_level()?;
        self.player = Player::new(self.level.player_spawn);
        self.status = GameStatus::Exploring;
        self.message = WELCOME_MESSAGE.to_string();
        self.turn_number = 0;
        self.statistics = GameStatistics::new();

        log::info!(
            "New game (seed {}): {} rooms, {} monsters, {} items",
            self.seed,
            self.level.rooms.len(),
            self.level.monsters.len(),
            self.level.items.len()
        );
        Ok(())
    }

    /// Resolves one player intent, including the monster phase that follows
    /// a successful step.
    ///
    /// Illegal or pointless intents come back as no-op turns with narration;
    /// errors signal broken invariants only.
    pub fn submit_intent(&mut self, intent: Intent) -> DelveResult<TurnResult> {
        let mut turn = TurnLog::default();

        match (self.status, intent) {
            (GameStatus::GameOver, Intent::Restart) => {
                self.new_game(None)?;
                turn.record(GameEvent::GameStarted { depth: self.depth });
                turn.narrate(WELCOME_MESSAGE);
            }
            (GameStatus::GameOver, _) => {
                turn.record(GameEvent::Rejected { intent });
                turn.narrate("You have fallen. Restart to begin anew.");
            }
            (GameStatus::Exploring, Intent::Restart) => {
                turn.record(GameEvent::Rejected { intent });
                turn.narrate("There is no turning back while you still draw breath.");
            }
            (GameStatus::Exploring, Intent::UsePotion) => {
                self.resolve_potion(&mut turn);
            }
            (GameStatus::Exploring, Intent::Move(direction)) => {
                let stepped = self.resolve_move(direction, &mut turn)?;
                if stepped && self.status == GameStatus::Exploring {
                    self.run_monster_phase(&mut turn);
                }
            }
        }

        self.finish_turn(intent, turn)
    }

    /// Folds the turn log into state and builds the result.
    fn finish_turn(&mut self, intent: Intent, turn: TurnLog) -> DelveResult<TurnResult> {
        for event in &turn.events {
            self.statistics.update_from_event(event);
        }

        let result = TurnResult {
            narration: turn.lines.join(" "),
            player_alive: self.player.is_alive(),
            depth: self.depth,
            events: turn.events,
        };

        if !result.is_no_op() && intent != Intent::Restart {
            self.turn_number += 1;
        }
        self.message = result.narration.clone();
        Ok(result)
    }

    /// Resolves a step. Returns true when the player actually moved.
    fn resolve_move(&mut self, direction: Direction, turn: &mut TurnLog) -> DelveResult<bool> {
        let from = self.player.position;
        let target = from + direction.to_delta();

        match self.level.get_tile(target) {
            None => {
                turn.record(GameEvent::MoveBlocked {
                    target,
                    reason: BlockReason::MapEdge,
                });
                turn.narrate("Your path is blocked by the edge of the map.");
                return Ok(false);
            }
            Some(Tile::Wall) => {
                turn.record(GameEvent::MoveBlocked {
                    target,
                    reason: BlockReason::Wall,
                });
                turn.narrate("Your path is blocked by ancient stone.");
                return Ok(false);
            }
            Some(Tile::Floor) => {}
        }

        if let Some(monster_id) = self.level.monster_at(target) {
            self.resolve_combat(monster_id, turn);
            return Ok(false);
        }

        self.player.position = target;
        turn.record(GameEvent::PlayerMoved { from, to: target });

        let mut eventful = false;
        if let Some(item_id) = self.level.item_at(target) {
            if let Some(item) = self.level.items.remove(item_id) {
                self.resolve_pickup(item.kind, turn);
                eventful = true;
            }
        }
        if self.level.stairs == Some(target) {
            self.descend(turn)?;
            eventful = true;
        }
        if !eventful {
            turn.narrate("You tread carefully through the shadowy halls...");
        }

        Ok(true)
    }

    /// Player strikes first; a surviving monster strikes back at once.
    fn resolve_combat(&mut self, monster_id: EntityId, turn: &mut TurnLog) {
        let Some(monster) = self.level.monsters.get_mut(monster_id) else {
            return;
        };

        let damage = monster.stats.take_damage(self.player.stats.attack_power);
        turn.record(GameEvent::PlayerStruck {
            monster: monster_id,
            damage,
        });

        if !monster.stats.is_alive() {
            self.level.monsters.remove(monster_id);
            turn.record(GameEvent::MonsterSlain {
                monster: monster_id,
                experience: EXPERIENCE_PER_KILL,
            });
            turn.narrate("Victory! The creature falls before your might!");

            if let Some(level_up) = self.player.gain_experience(EXPERIENCE_PER_KILL) {
                turn.record(GameEvent::LevelUp {
                    max_hp: self.player.stats.max_hp,
                    attack_power: self.player.stats.attack_power,
                });
                turn.narrate(format!(
                    "You feel stronger! (+{} Max HP, +{} Attack)",
                    level_up.max_hp_bonus, level_up.attack_bonus
                ));
            }
            return;
        }

        let retaliation = monster.stats.attack_power;
        let taken = self.player.stats.take_damage(retaliation);
        turn.record(GameEvent::PlayerDamaged {
            monster: monster_id,
            damage: taken,
        });
        turn.narrate("Battle rages! You strike but the enemy retaliates!");

        if !self.player.is_alive() {
            self.enter_game_over(turn);
        }
    }

    fn resolve_potion(&mut self, turn: &mut TurnLog) {
        match self.player.use_potion() {
            PotionOutcome::Drank { healed } => {
                turn.record(GameEvent::PotionDrunk { healed });
                turn.narrate(format!("The elixir restores your vitality! (+{} HP)", healed));
            }
            PotionOutcome::NoPotions => turn.narrate("You have no potions left!"),
            PotionOutcome::AlreadyFull => turn.narrate("You are already at full health!"),
        }
    }

    fn resolve_pickup(&mut self, kind: ItemKind, turn: &mut TurnLog) {
        turn.record(GameEvent::ItemPickedUp { kind });

        match self.player.pick_up(kind) {
            PickupOutcome::Elixir { auto_drink } => {
                turn.narrate("You discovered a healing elixir!");
                if let Some(PotionOutcome::Drank { healed }) = auto_drink {
                    turn.record(GameEvent::PotionDrunk { healed });
                    turn.narrate(format!("You drink it at once. (+{} HP)", healed));
                }
            }
            PickupOutcome::Crystal { attack_power } => {
                turn.narrate(format!(
                    "A power crystal enhances your abilities! (Attack {})",
                    attack_power
                ));
            }
        }
    }

    /// Replaces the level with a freshly generated one a step deeper.
    /// The player keeps every stat.
    fn descend(&mut self, turn: &mut TurnLog) -> DelveResult<()> {
        self.depth += 1;
        self.level = self.build_level()?;
        self.player.position = self.level.player_spawn;

        log::info!(
            "Descended to depth {} ({} monsters, {} items)",
            self.depth,
            self.level.monsters.len(),
            self.level.items.len()
        );
        turn.record(GameEvent::Descended { depth: self.depth });
        turn.narrate(format!(
            "You descend deeper into the mystical depths... (Level {})",
            self.depth
        ));
        Ok(())
    }

    /// Every monster strikes if the player is one greedy step away, otherwise
    /// steps along x, or failing that y, onto floor. Stops once the player
    /// falls.
    fn run_monster_phase(&mut self, turn: &mut TurnLog) {
        for monster_id in self.level.monsters.ids() {
            if self.status == GameStatus::GameOver {
                break;
            }

            let Some(monster) = self.level.monsters.get(monster_id) else {
                continue;
            };
            let from = monster.position;
            let target = self.player.position;
            let step = from.step_toward(target);

            if from + step == target {
                let taken = self.player.stats.take_damage(monster.stats.attack_power);
                turn.record(GameEvent::PlayerDamaged {
                    monster: monster_id,
                    damage: taken,
                });
                turn.narrate(format!("A creature strikes with deadly force! (-{} HP)", taken));
                if !self.player.is_alive() {
                    self.enter_game_over(turn);
                }
                continue;
            }

            let horizontal = Position::new(from.x + step.x, from.y);
            let vertical = Position::new(from.x, from.y + step.y);
            // A null x step lands on the monster's own floor tile, so a monster
            // in the player's column holds position
            let destination = if self.level.is_floor(horizontal) {
                Some(horizontal)
            } else if self.level.is_floor(vertical) {
                Some(vertical)
            } else {
                None
            };

            if let Some(to) = destination.filter(|&to| to != from) {
                if let Some(monster) = self.level.monsters.get_mut(monster_id) {
                    monster.position = to;
                }
                log::trace!("Monster {:?} moved {:?} -> {:?}", monster_id, from, to);
                turn.record(GameEvent::MonsterMoved {
                    monster: monster_id,
                    from,
                    to,
                });
            }
        }
    }

    fn enter_game_over(&mut self, turn: &mut TurnLog) {
        self.status = GameStatus::GameOver;
        log::info!(
            "Player died at depth {} with {} experience",
            self.depth,
            self.player.experience
        );
        turn.record(GameEvent::PlayerDied);
        turn.narrate("Your adventure ends here... Restart to begin anew.");
    }

    /// Generates and populates a level for the current depth.
    fn build_level(&mut self) -> DelveResult<Level> {
        let mut level = self.generator.generate(&self.config, &mut self.rng)?;
        self.generator.validate(&level, &self.config)?;
        log::debug!(
            "{} produced {} rooms for depth {}",
            self.generator.generator_type(),
            level.rooms.len(),
            self.depth
        );
        self.population
            .populate_level(&mut level, self.depth, &mut self.rng);
        Ok(level)
    }

    /// Current dungeon depth, starting at 1.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The current level: grid, rooms, monsters, items and stairs.
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Grid dimensions as (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        (self.level.width, self.level.height)
    }

    pub fn tiles(&self) -> &[Vec<Tile>] {
        &self.level.tiles
    }

    pub fn monsters(&self) -> impl Iterator<Item = (EntityId, &Monster)> {
        self.level.monsters.iter()
    }

    pub fn items(&self) -> impl Iterator<Item = (EntityId, &Item)> {
        self.level.items.iter()
    }

    pub fn stairs(&self) -> Option<Position> {
        self.level.stairs
    }

    /// Narration of the most recent turn, or the welcome text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Number of turns that changed something.
    pub fn turn_number(&self) -> u64 {
        self.turn_number
    }

    pub fn statistics(&self) -> &GameStatistics {
        &self.statistics
    }

    /// Seed the random source was last seeded with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Copies the visible state for a renderer.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            depth: self.depth,
            status: self.status,
            message: self.message.clone(),
            turn_number: self.turn_number,
            width: self.level.width,
            height: self.level.height,
            tiles: self.level.tiles.clone(),
            player: self.player.clone(),
            monsters: self
                .monsters()
                .map(|(id, monster)| (id, monster.clone()))
                .collect(),
            items: self.items().map(|(id, item)| (id, item.clone())).collect(),
            stairs: self.level.stairs,
        }
    }
}
