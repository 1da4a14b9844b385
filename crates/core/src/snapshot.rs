use serde::Serialize;

use crate::game_state::{Enemy, Phase};
use crate::types::{BlockId, CoinId, Coordinate, EnemyId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EnemySnapshot {
    pub id: EnemyId,
    pub position: Coordinate,
    pub hp: u32,
}

impl From<(EnemyId, Enemy)> for EnemySnapshot {
    fn from((id, enemy): (EnemyId, Enemy)) -> Self {
        Self {
            id,
            position: enemy.position,
            hp: enemy.hp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PlayerSnapshot {
    pub position: Coordinate,
    pub health: u32,
    pub score: u32,
    pub bomb_range: u32,
    pub invincible: bool,
}

/// Complete read-only view of a loaded level
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelSnapshot {
    pub level: u32,
    pub phase: Phase,
    pub x_max: i32,
    pub y_max: i32,
    pub ground: Vec<Coordinate>,
    pub fixed_walls: Vec<Coordinate>,
    pub blocks: Vec<(BlockId, Coordinate)>,
    pub coins: Vec<(CoinId, Coordinate)>,
    pub enemies: Vec<EnemySnapshot>,
    pub exit_door: Option<Coordinate>,
    pub door_open: bool,
    pub bomb_power_up: Option<Coordinate>,
    pub life_power_up: Option<Coordinate>,
    pub invincibility_power_up: Option<Coordinate>,
    pub bomb: Option<Coordinate>,
    pub player: PlayerSnapshot,
}

impl LevelSnapshot {
    pub fn playable(&self) -> bool {
        self.phase == Phase::LevelActive
    }

    pub fn enemy_at(&self, c: Coordinate) -> Option<&EnemySnapshot> {
        self.enemies.iter().find(|e| e.position == c)
    }
}
