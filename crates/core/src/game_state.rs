//! Game state module - the single-writer engine of a match
//!
//! This module ties together all core components: generator, blast resolver,
//! RNG, leaderboard and the event model. It owns every mutable entity
//! collection and exposes the operations an external driver calls. Timing is
//! not owned here: the driver arms the bomb fuse, the invincibility window and
//! the enemy tick, and calls [`GameState::explode_bomb`],
//! [`GameState::expire_invincibility`] and [`GameState::move_enemies`] on
//! expiry.
//!
//! Breakable blocks, coins and enemies live in slot arenas: a removed entity
//! leaves an empty slot behind, so the ids carried by events stay valid for
//! the whole level.

use serde::Serialize;

use crate::blast::{self, BlastTile};
use crate::events::{Actor, EventSink, GameEvent};
use crate::generator::{generate, GenerationError, LevelConfig, LevelLayout};
use crate::grid::Grid;
use crate::leaderboard::{Leaderboard, LeaderboardEntry, SubmitOutcome};
use crate::rng::SimpleRng;
use crate::snapshot::{EnemySnapshot, LevelSnapshot, PlayerSnapshot};
use crate::types::*;

/// Match state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Menu,
    LevelActive,
    Paused,
    LevelCleared,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Player {
    pub position: Coordinate,
    pub health: u32,
    pub score: u32,
    pub bomb_range: u32,
    pub invincible: bool,
}

impl Player {
    fn new() -> Self {
        Self {
            position: SPAWN,
            health: STARTING_HEALTH,
            score: 0,
            bomb_range: BASE_BOMB_RANGE,
            invincible: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Enemy {
    pub position: Coordinate,
    pub hp: u32,
}

/// Entities of the level currently being played
#[derive(Debug, Clone)]
struct Level {
    grid: Grid,
    ground: Vec<Coordinate>,
    fixed_walls: Vec<Coordinate>,
    blocks: Vec<Option<Coordinate>>,
    coins: Vec<Option<Coordinate>>,
    enemies: Vec<Option<Enemy>>,
    exit_door: Option<Coordinate>,
    bomb_power_up: Option<Coordinate>,
    life_power_up: Option<Coordinate>,
    invincibility_power_up: Option<Coordinate>,
    door_open: bool,
    bomb: Option<Coordinate>,
}

impl From<LevelLayout> for Level {
    fn from(layout: LevelLayout) -> Self {
        Self {
            grid: layout.grid,
            ground: layout.ground,
            fixed_walls: layout.fixed_walls,
            blocks: layout.breakable_blocks.into_iter().map(Some).collect(),
            coins: layout.coins.into_iter().map(Some).collect(),
            enemies: layout
                .enemies
                .into_iter()
                .map(|e| {
                    Some(Enemy {
                        position: e.position,
                        hp: e.hp,
                    })
                })
                .collect(),
            exit_door: Some(layout.exit_door),
            bomb_power_up: Some(layout.bomb_power_up),
            life_power_up: Some(layout.life_power_up),
            invincibility_power_up: Some(layout.invincibility_power_up),
            door_open: false,
            bomb: None,
        }
    }
}

impl Level {
    fn living_enemies(&self) -> impl Iterator<Item = (EnemyId, Enemy)> + '_ {
        self.enemies
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.map(|e| (EnemyId(i), e)))
    }

    fn enemy_at(&self, c: Coordinate) -> Option<EnemyId> {
        self.living_enemies()
            .find(|(_, e)| e.position == c)
            .map(|(id, _)| id)
    }

    fn no_enemies_left(&self) -> bool {
        self.enemies.iter().all(Option::is_none)
    }

    fn block_at(&self, c: Coordinate) -> Option<BlockId> {
        self.blocks
            .iter()
            .position(|b| *b == Some(c))
            .map(BlockId)
    }

    fn coin_at(&self, c: Coordinate) -> Option<CoinId> {
        self.coins.iter().position(|b| *b == Some(c)).map(CoinId)
    }

    /// Terrain and bomb allow standing on the tile
    fn is_open(&self, c: Coordinate) -> bool {
        self.grid.is_walkable(c) && self.bomb != Some(c)
    }
}

/// Complete engine state of one match
#[derive(Debug, Clone)]
pub struct GameState {
    config: LevelConfig,
    rng: SimpleRng,
    phase: Phase,
    /// Level number, 1-based; also the HP of freshly spawned enemies
    level_number: u32,
    player: Player,
    level: Option<Level>,
    /// Set by the presentation after a successful move, cleared when its
    /// animation completes.
    movement_in_flight: bool,
    leaderboard: Leaderboard,
    /// Events of the current batch (consumed by observers).
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new match in the menu with the default level config
    pub fn new(seed: u32) -> Self {
        Self {
            config: LevelConfig::default(),
            rng: SimpleRng::new(seed),
            phase: Phase::Menu,
            level_number: 1,
            player: Player::new(),
            level: None,
            movement_in_flight: false,
            leaderboard: Leaderboard::new(),
            events: Vec::new(),
        }
    }

    /// Create a new match with a custom level config
    ///
    /// Fails fast when the config cannot be satisfied by the generator.
    pub fn with_config(config: LevelConfig, seed: u32) -> Result<Self, GenerationError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(seed)
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn level_number(&self) -> u32 {
        self.level_number
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn score(&self) -> u32 {
        self.player.score
    }

    pub fn health(&self) -> u32 {
        self.player.health
    }

    pub fn seed(&self) -> u32 {
        self.rng.seed()
    }

    pub fn is_level_loaded(&self) -> bool {
        self.level.is_some()
    }

    pub fn bomb(&self) -> Option<Coordinate> {
        self.level.as_ref().and_then(|l| l.bomb)
    }

    pub fn door_open(&self) -> bool {
        self.level.as_ref().is_some_and(|l| l.door_open)
    }

    pub fn exit_door(&self) -> Option<Coordinate> {
        self.level.as_ref().and_then(|l| l.exit_door)
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.level.as_ref().map(|l| &l.grid)
    }

    /// Living enemies with their stable ids
    pub fn enemies(&self) -> Vec<(EnemyId, Enemy)> {
        self.level
            .as_ref()
            .map(|l| l.living_enemies().collect())
            .unwrap_or_default()
    }

    pub fn enemy(&self, id: EnemyId) -> Option<Enemy> {
        self.level
            .as_ref()
            .and_then(|l| l.enemies.get(id.0).copied().flatten())
    }

    /// Remaining breakable blocks with their stable ids
    pub fn blocks(&self) -> Vec<(BlockId, Coordinate)> {
        self.level
            .as_ref()
            .map(|l| {
                l.blocks
                    .iter()
                    .enumerate()
                    .filter_map(|(i, b)| b.map(|c| (BlockId(i), c)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Remaining coins with their stable ids
    pub fn coins(&self) -> Vec<(CoinId, Coordinate)> {
        self.level
            .as_ref()
            .map(|l| {
                l.coins
                    .iter()
                    .enumerate()
                    .filter_map(|(i, c)| c.map(|c| (CoinId(i), c)))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn movement_in_flight(&self) -> bool {
        self.movement_in_flight
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    /// Replace the leaderboard with records handed over by a loader
    pub fn load_leaderboard(&mut self, entries: Vec<LeaderboardEntry>) {
        self.leaderboard = Leaderboard::from_entries(entries);
    }

    /// Records to hand to a saver
    pub fn leaderboard_entries(&self) -> Vec<LeaderboardEntry> {
        self.leaderboard.entries().to_vec()
    }

    /// Drain the current event batch
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Deliver the current event batch to a sink
    pub fn flush_into<S: EventSink + ?Sized>(&mut self, sink: &mut S) {
        for event in self.events.drain(..) {
            sink.emit(event);
        }
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    fn level_ref(&self) -> &Level {
        match self.level.as_ref() {
            Some(level) => level,
            None => panic!("no level loaded: call start_level first"),
        }
    }

    fn level_mut(&mut self) -> &mut Level {
        match self.level.as_mut() {
            Some(level) => level,
            None => panic!("no level loaded: call start_level first"),
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Generate level `level_number` and enter LEVEL_ACTIVE
    ///
    /// Health and score carry over; position, bomb range, invincibility and
    /// the bomb are reset.
    pub fn start_level(&mut self, level_number: u32) -> Result<(), GenerationError> {
        assert!(
            self.phase != Phase::GameOver,
            "start_level after game over: call reset_match first"
        );
        assert!(level_number >= 1, "levels are numbered from 1");

        let layout = generate(&self.config, level_number, &mut self.rng)?;
        self.load_layout(level_number, layout);
        Ok(())
    }

    /// Enter LEVEL_ACTIVE on a prebuilt layout (scripted scenarios, replays)
    ///
    /// Same resets and events as [`GameState::start_level`].
    pub fn load_layout(&mut self, level_number: u32, layout: LevelLayout) {
        assert!(
            self.phase != Phase::GameOver,
            "load_layout after game over: call reset_match first"
        );

        self.level = Some(Level::from(layout));
        self.level_number = level_number;
        self.player.position = SPAWN;
        self.player.bomb_range = BASE_BOMB_RANGE;
        self.player.invincible = false;
        self.movement_in_flight = false;
        self.phase = Phase::LevelActive;

        let snapshot = self.snapshot_level();
        self.emit(GameEvent::LevelLoaded(Box::new(snapshot)));
    }

    /// Advance to the next level after a victory
    pub fn next_level(&mut self) -> Result<(), GenerationError> {
        assert!(
            self.phase == Phase::LevelCleared,
            "next_level requires a cleared level, phase is {:?}",
            self.phase
        );
        self.start_level(self.level_number + 1)
    }

    /// Leave the match: clear the level and restore lives, score and level 1
    pub fn reset_match(&mut self) {
        self.level = None;
        self.player = Player::new();
        self.level_number = 1;
        self.movement_in_flight = false;
        self.phase = Phase::Menu;
        self.events.clear();
    }

    /// Returns false when there is no running level to pause
    pub fn pause(&mut self) -> bool {
        if self.phase != Phase::LevelActive {
            return false;
        }
        self.phase = Phase::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != Phase::Paused {
            return false;
        }
        self.phase = Phase::LevelActive;
        true
    }

    /// Close the movement gate (presentation started a move animation)
    pub fn begin_movement_settle(&mut self) {
        self.movement_in_flight = true;
    }

    /// Open the movement gate (presentation finished the move animation)
    pub fn finish_movement_settle(&mut self) {
        self.movement_in_flight = false;
    }

    /// Record the current score and level under `name`
    ///
    /// Returns None when the name is rejected (empty or too long).
    pub fn submit_leaderboard_name(&mut self, name: &str) -> Option<SubmitOutcome> {
        let name = Leaderboard::normalize_name(name)?;
        Some(self.leaderboard.submit(LeaderboardEntry {
            name,
            score: self.player.score,
            level: self.level_number,
        }))
    }

    // ------------------------------------------------------------------
    // Player
    // ------------------------------------------------------------------

    /// Move the player one tile
    ///
    /// Returns false (no state change, no event) when paused, while a move is
    /// still settling, or when the target is the current tile, a wall, a
    /// breakable block or the live bomb.
    ///
    /// A pickup on the target tile applies before enemy contact, so an
    /// invincibility power-up shared with an enemy protects the player.
    pub fn move_player(&mut self, direction: Direction) -> bool {
        let level = self.level_ref();
        if self.phase != Phase::LevelActive || self.movement_in_flight {
            return false;
        }
        if direction == Direction::Center {
            return false;
        }

        let from = self.player.position;
        let to = level.grid.clamp(from.step(direction, 1));
        if to == from || !level.is_open(to) {
            return false;
        }

        self.player.position = to;
        self.emit(GameEvent::PositionChanged {
            actor: Actor::Player,
            from,
            to,
            direction,
            last_life: false,
        });

        self.collect_at(to);
        self.check_enemy_contact();
        true
    }

    /// Apply the first matching pickup on `tile`: exit, power-ups, then coins
    fn collect_at(&mut self, tile: Coordinate) {
        let level = self.level_mut();

        if level.exit_door == Some(tile) && level.no_enemies_left() {
            self.phase = Phase::LevelCleared;
            self.emit(GameEvent::Victory);
        } else if level.bomb_power_up == Some(tile) {
            level.bomb_power_up = None;
            self.player.bomb_range += 1;
            let range = self.player.bomb_range;
            self.emit(GameEvent::PowerUpBomb { range });
        } else if level.life_power_up == Some(tile) {
            level.life_power_up = None;
            self.player.health += 1;
            let health = self.player.health;
            self.emit(GameEvent::PowerUpLife { health });
        } else if level.invincibility_power_up == Some(tile) {
            level.invincibility_power_up = None;
            self.player.invincible = true;
            self.emit(GameEvent::PowerUpInvincible { active: true });
        } else if let Some(coin) = level.coin_at(tile) {
            level.coins[coin.0] = None;
            self.player.score += POINTS_FOR_COIN;
            let total = self.player.score;
            self.emit(GameEvent::CoinCollected { coin });
            self.emit(GameEvent::PointsEarned {
                amount: POINTS_FOR_COIN,
                total,
                location: tile,
            });
        }
    }

    /// Close the invincibility window; returns whether it was open
    pub fn expire_invincibility(&mut self) -> bool {
        if !self.player.invincible {
            return false;
        }
        self.player.invincible = false;
        self.emit(GameEvent::PowerUpInvincible { active: false });
        true
    }

    /// One unit of damage unless invincible: respawn, or game over at 0 health
    fn damage_player(&mut self) {
        if self.player.invincible || self.player.health == 0 {
            return;
        }
        self.player.health -= 1;
        if self.player.health == 0 {
            self.phase = Phase::GameOver;
            self.emit(GameEvent::GameOver);
        } else {
            self.player.position = SPAWN;
            let health = self.player.health;
            self.emit(GameEvent::PlayerRespawned { health });
        }
    }

    fn check_enemy_contact(&mut self) {
        let position = self.player.position;
        if self.level_ref().enemy_at(position).is_some() {
            self.damage_player();
        }
    }

    // ------------------------------------------------------------------
    // Bomb
    // ------------------------------------------------------------------

    /// Place the bomb on the player's tile
    ///
    /// Returns false when a bomb is already live, the player stands in the
    /// spawn corner, or the level is not running. The caller arms the fuse.
    pub fn release_bomb(&mut self) -> bool {
        let level = self.level_ref();
        if self.phase != Phase::LevelActive {
            return false;
        }
        if level.bomb.is_some() || self.player.position.in_spawn_corner() {
            return false;
        }

        let location = self.player.position;
        self.level_mut().bomb = Some(location);
        self.emit(GameEvent::BombPlaced { location });
        true
    }

    /// Explode the live bomb
    ///
    /// # Panics
    ///
    /// Panics when no level is loaded or no bomb is live.
    pub fn explode_bomb(&mut self) {
        let level = self.level_ref();
        let Some(origin) = level.bomb else {
            panic!("explode_bomb called without a live bomb");
        };

        let path = blast::resolve(origin, self.player.bomb_range, |c| {
            level.grid.is_fixed_wall(c)
        });

        // The player is hit at most once per blast.
        if path.iter().any(|t| t.coordinate == self.player.position) {
            self.damage_player();
        }

        let mut doomed_blocks: Vec<BlockId> = Vec::new();
        let mut dead_enemies: Vec<(EnemyId, Coordinate)> = Vec::new();
        for BlastTile { coordinate, .. } in path.iter().copied() {
            let level = self.level_mut();
            if let Some(block) = level.block_at(coordinate) {
                doomed_blocks.push(block);
            }
            let Some(id) = level.enemy_at(coordinate) else {
                continue;
            };
            let Some(enemy) = level.enemies[id.0].as_mut() else {
                continue;
            };
            enemy.hp = enemy.hp.saturating_sub(1);
            if enemy.hp == 0 {
                dead_enemies.push((id, coordinate));
            } else {
                self.emit(GameEvent::EnemyWounded { enemy: id });
            }
        }

        for block in doomed_blocks {
            let level = self.level_mut();
            if let Some(c) = level.blocks[block.0].take() {
                level.grid.set(c, BlockCategory::Ground);
                self.emit(GameEvent::BlockDestroyed { block });
            }
        }

        for (enemy, location) in dead_enemies {
            self.level_mut().enemies[enemy.0] = None;
            self.player.score += POINTS_FOR_ENEMY;
            let total = self.player.score;
            self.emit(GameEvent::EnemyDead { enemy });
            self.emit(GameEvent::PointsEarned {
                amount: POINTS_FOR_ENEMY,
                total,
                location,
            });
        }

        self.emit(GameEvent::BlastOccurred { path });

        let level = self.level_mut();
        level.bomb = None;
        if !level.door_open && level.no_enemies_left() {
            level.door_open = true;
            self.emit(GameEvent::DoorOpened);
        }
    }

    // ------------------------------------------------------------------
    // Enemies
    // ------------------------------------------------------------------

    /// One AI step for every living enemy in id order
    ///
    /// Each enemy starts from a random cardinal direction and tries the four
    /// directions in rotation, taking the first open tile outside the spawn
    /// corner that no other enemy holds. Enemies with no option stay put.
    pub fn move_enemies(&mut self) {
        let count = self.level_ref().enemies.len();
        if self.phase != Phase::LevelActive {
            return;
        }

        for index in 0..count {
            if self.phase != Phase::LevelActive {
                break;
            }
            let Some(enemy) = self.level_ref().enemies[index] else {
                continue;
            };

            let start = self.rng.next_index(Direction::CARDINALS.len());
            let level = self.level_ref();
            let step = (0..Direction::CARDINALS.len())
                .map(|i| Direction::from_rotation(start + i))
                .map(|dir| (dir, level.grid.clamp(enemy.position.step(dir, 1))))
                .find(|&(_, to)| {
                    level.grid.in_playfield(to)
                        && level.is_open(to)
                        && level.enemy_at(to).is_none()
                        && !to.in_spawn_corner()
                });

            let Some((direction, to)) = step else {
                continue;
            };

            let from = enemy.position;
            if let Some(e) = self.level_mut().enemies[index].as_mut() {
                e.position = to;
            }
            self.emit(GameEvent::PositionChanged {
                actor: Actor::Enemy(EnemyId(index)),
                from,
                to,
                direction,
                last_life: enemy.hp == 1,
            });
            self.check_enemy_contact();
        }
    }

    // ------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------

    fn snapshot_level(&self) -> LevelSnapshot {
        let level = self.level_ref();
        LevelSnapshot {
            level: self.level_number,
            phase: self.phase,
            x_max: level.grid.x_max(),
            y_max: level.grid.y_max(),
            ground: level.ground.clone(),
            fixed_walls: level.fixed_walls.clone(),
            blocks: self.blocks(),
            coins: self.coins(),
            enemies: level.living_enemies().map(EnemySnapshot::from).collect(),
            exit_door: level.exit_door,
            door_open: level.door_open,
            bomb_power_up: level.bomb_power_up,
            life_power_up: level.life_power_up,
            invincibility_power_up: level.invincibility_power_up,
            bomb: level.bomb,
            player: PlayerSnapshot {
                position: self.player.position,
                health: self.player.health,
                score: self.player.score,
                bomb_range: self.player.bomb_range,
                invincible: self.player.invincible,
            },
        }
    }

    /// Read-only view of the loaded level, None in the menu
    pub fn snapshot(&self) -> Option<LevelSnapshot> {
        self.level.as_ref().map(|_| self.snapshot_level())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
