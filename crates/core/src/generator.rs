//! Level generator - builds terrain, hidden items and enemy spawns
//!
//! Generation runs in a fixed order against one [`SimpleRng`]:
//!
//! 1. Ground for `x in [1, x_max]`, `y in [1, y_max]`
//! 2. Free-position pool = ground minus the spawn corner (`x + y <= 3`)
//! 3. Fixed walls: checkerboard at every (even x, even y) plus the border ring
//! 4. Breakable blocks popped from the free pool
//! 5. Exit door, power-ups and coins drawn without replacement from the blocks
//! 6. Enemies popped from what is left of the free pool, HP = level number
//!
//! Counts that the pools cannot satisfy are rejected up front with a
//! [`GenerationError`]; nothing is clamped.

use thiserror::Error;

use crate::grid::Grid;
use crate::rng::{PoolSampling, SimpleRng};
use crate::types::{
    BlockCategory, Coordinate, BOARD_UNITS_X, BOARD_UNITS_Y, DEFAULT_BREAKABLE_BLOCKS,
    DEFAULT_COINS, DEFAULT_ENEMIES,
};

/// Number of single items hidden under blocks besides coins (door + 3 power-ups)
pub const HIDDEN_ITEMS: usize = 4;

/// Generation parameters for one level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelConfig {
    pub x_max: i32,
    pub y_max: i32,
    pub breakable_blocks: usize,
    pub enemies: usize,
    pub coins: usize,
    pub sampling: PoolSampling,
}

impl LevelConfig {
    /// Config for a board of `units_x` x `units_y` logical units with default counts
    pub fn for_board_units(units_x: i32, units_y: i32) -> Self {
        let (x_max, y_max) = Grid::dimensions_for_units(units_x, units_y);
        Self {
            x_max,
            y_max,
            ..Self::default()
        }
    }

    /// Size of the free-position pool before any block is placed
    pub fn free_pool_size(&self) -> usize {
        if self.x_max < 1 || self.y_max < 1 {
            return 0;
        }
        let mut free = 0usize;
        for x in 1..=self.x_max {
            for y in 1..=self.y_max {
                if x + y > 3 && !is_checkerboard(x, y) {
                    free += 1;
                }
            }
        }
        free
    }

    /// Check that every pool can satisfy the requested counts
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.x_max < 1 || self.y_max < 1 {
            return Err(GenerationError::InvalidDimensions {
                x_max: self.x_max,
                y_max: self.y_max,
            });
        }

        let items = HIDDEN_ITEMS + self.coins;
        if self.breakable_blocks < items {
            return Err(GenerationError::NotEnoughBlocks {
                blocks: self.breakable_blocks,
                items,
            });
        }

        let free = self.free_pool_size();
        let needed = self.sampling.required_pool(self.breakable_blocks);
        if free < needed {
            return Err(GenerationError::NotEnoughFreeTiles {
                what: "breakable blocks",
                requested: self.breakable_blocks,
                available: free,
            });
        }

        let remaining = free - self.breakable_blocks;
        if remaining < self.sampling.required_pool(self.enemies) {
            return Err(GenerationError::NotEnoughFreeTiles {
                what: "enemies",
                requested: self.enemies,
                available: remaining,
            });
        }

        Ok(())
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        let (x_max, y_max) = Grid::dimensions_for_units(BOARD_UNITS_X, BOARD_UNITS_Y);
        Self {
            x_max,
            y_max,
            breakable_blocks: DEFAULT_BREAKABLE_BLOCKS,
            enemies: DEFAULT_ENEMIES,
            coins: DEFAULT_COINS,
            sampling: PoolSampling::SkipLast,
        }
    }
}

/// Configuration error raised before any randomness is consumed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("invalid level dimensions {x_max}x{y_max}")]
    InvalidDimensions { x_max: i32, y_max: i32 },
    #[error("{blocks} breakable blocks cannot hide {items} items")]
    NotEnoughBlocks { blocks: usize, items: usize },
    #[error("cannot place {requested} {what}: only {available} free tiles")]
    NotEnoughFreeTiles {
        what: &'static str,
        requested: usize,
        available: usize,
    },
}

/// Enemy spawn point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemySpawn {
    pub position: Coordinate,
    pub hp: u32,
}

/// Output of one generation pass
#[derive(Debug, Clone, PartialEq)]
pub struct LevelLayout {
    pub grid: Grid,
    pub ground: Vec<Coordinate>,
    pub fixed_walls: Vec<Coordinate>,
    pub breakable_blocks: Vec<Coordinate>,
    pub exit_door: Coordinate,
    pub bomb_power_up: Coordinate,
    pub life_power_up: Coordinate,
    pub invincibility_power_up: Coordinate,
    pub coins: Vec<Coordinate>,
    pub enemies: Vec<EnemySpawn>,
}

impl LevelLayout {
    /// Terrain-only layout for scripted scenarios and replays
    ///
    /// Ground, checkerboard and border are laid out as in [`generate`]; there
    /// are no blocks, coins or enemies. The four items sit uncovered on the
    /// bottom row at `x_max`, `x_max - 2`, `x_max - 4` and `x_max - 6`
    /// (door, bomb, life, invincibility).
    pub fn bare(x_max: i32, y_max: i32) -> Self {
        let mut grid = Grid::new(x_max, y_max);
        let ground = grid.ground();
        let mut fixed_walls = Vec::new();
        for x in (2..=x_max).step_by(2) {
            for y in (2..=y_max).step_by(2) {
                let wall = Coordinate::new(x, y);
                grid.set(wall, BlockCategory::FixedWall);
                fixed_walls.push(wall);
            }
        }
        fixed_walls.extend(grid.coordinates_of(BlockCategory::FixedWall).into_iter().filter(
            |c| c.x == 0 || c.x == x_max + 1 || c.y == 0 || c.y == y_max + 1,
        ));

        let bottom = |dx: i32| Coordinate::new((x_max - dx).max(1), y_max);
        Self {
            grid,
            ground,
            fixed_walls,
            breakable_blocks: Vec::new(),
            exit_door: bottom(0),
            bomb_power_up: bottom(2),
            life_power_up: bottom(4),
            invincibility_power_up: bottom(6),
            coins: Vec::new(),
            enemies: Vec::new(),
        }
    }

    pub fn with_block(mut self, c: Coordinate) -> Self {
        self.grid.set(c, BlockCategory::BreakableBlock);
        self.breakable_blocks.push(c);
        self
    }

    pub fn with_coin(mut self, c: Coordinate) -> Self {
        self.coins.push(c);
        self
    }

    pub fn with_enemy(mut self, position: Coordinate, hp: u32) -> Self {
        self.enemies.push(EnemySpawn { position, hp });
        self
    }

    pub fn with_exit_door(mut self, c: Coordinate) -> Self {
        self.exit_door = c;
        self
    }

    pub fn with_bomb_power_up(mut self, c: Coordinate) -> Self {
        self.bomb_power_up = c;
        self
    }

    pub fn with_life_power_up(mut self, c: Coordinate) -> Self {
        self.life_power_up = c;
        self
    }

    pub fn with_invincibility_power_up(mut self, c: Coordinate) -> Self {
        self.invincibility_power_up = c;
        self
    }

    /// Hidden items in placement order: door, bomb, life, invincibility
    pub fn items(&self) -> [Coordinate; HIDDEN_ITEMS] {
        [
            self.exit_door,
            self.bomb_power_up,
            self.life_power_up,
            self.invincibility_power_up,
        ]
    }
}

#[inline]
fn is_checkerboard(x: i32, y: i32) -> bool {
    x >= 2 && y >= 2 && x % 2 == 0 && y % 2 == 0
}

/// Generate a level for `level` (1-based, also the enemy HP)
pub fn generate(
    config: &LevelConfig,
    level: u32,
    rng: &mut SimpleRng,
) -> Result<LevelLayout, GenerationError> {
    config.validate()?;

    let mut grid = Grid::new(config.x_max, config.y_max);
    let ground = grid.ground();

    let mut free: Vec<Coordinate> = ground.iter().copied().filter(|c| c.x + c.y > 3).collect();

    let mut fixed_walls = Vec::new();
    for x in (2..=config.x_max).step_by(2) {
        for y in (2..=config.y_max).step_by(2) {
            let wall = Coordinate::new(x, y);
            grid.set(wall, BlockCategory::FixedWall);
            fixed_walls.push(wall);
            free.retain(|c| *c != wall);
        }
    }
    for x in 0..=config.x_max + 1 {
        for y in 0..=config.y_max + 1 {
            if x == 0 || x == config.x_max + 1 || y == 0 || y == config.y_max + 1 {
                fixed_walls.push(Coordinate::new(x, y));
            }
        }
    }

    let mut breakable_blocks = Vec::with_capacity(config.breakable_blocks);
    for _ in 0..config.breakable_blocks {
        let block = rng
            .take_from(&mut free, config.sampling)
            .ok_or(GenerationError::NotEnoughFreeTiles {
                what: "breakable blocks",
                requested: config.breakable_blocks,
                available: breakable_blocks.len(),
            })?;
        grid.set(block, BlockCategory::BreakableBlock);
        breakable_blocks.push(block);
    }

    // Items always hide under a block, never two on the same one.
    let mut available = breakable_blocks.clone();
    let mut draw_item = |rng: &mut SimpleRng| {
        rng.take_from(&mut available, PoolSampling::Uniform)
            .ok_or(GenerationError::NotEnoughBlocks {
                blocks: config.breakable_blocks,
                items: HIDDEN_ITEMS + config.coins,
            })
    };
    let exit_door = draw_item(&mut *rng)?;
    let bomb_power_up = draw_item(&mut *rng)?;
    let life_power_up = draw_item(&mut *rng)?;
    let invincibility_power_up = draw_item(&mut *rng)?;
    let mut coins = Vec::with_capacity(config.coins);
    for _ in 0..config.coins {
        coins.push(draw_item(&mut *rng)?);
    }

    let mut enemies = Vec::with_capacity(config.enemies);
    for _ in 0..config.enemies {
        let position = rng
            .take_from(&mut free, config.sampling)
            .ok_or(GenerationError::NotEnoughFreeTiles {
                what: "enemies",
                requested: config.enemies,
                available: enemies.len(),
            })?;
        enemies.push(EnemySpawn { position, hp: level });
    }

    Ok(LevelLayout {
        grid,
        ground,
        fixed_walls,
        breakable_blocks,
        exit_door,
        bomb_power_up,
        life_power_up,
        invincibility_power_up,
        coins,
        enemies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_free_pool_size() {
        // 15x9 ground, minus 3 corner tiles, minus 7x4 checkerboard walls
        assert_eq!(LevelConfig::default().free_pool_size(), 135 - 3 - 28);
    }

    #[test]
    fn test_for_board_units_matches_default() {
        assert_eq!(LevelConfig::for_board_units(17, 12), LevelConfig::default());
    }

    #[test]
    fn test_generate_counts() {
        let mut rng = SimpleRng::new(12345);
        let layout = generate(&LevelConfig::default(), 1, &mut rng).unwrap();

        assert_eq!(layout.ground.len(), 135);
        assert_eq!(layout.breakable_blocks.len(), 20);
        assert_eq!(layout.coins.len(), 4);
        assert_eq!(layout.enemies.len(), 3);
        // 28 checkerboard + ring of (17 * 11) - (15 * 9)
        assert_eq!(layout.fixed_walls.len(), 28 + 17 * 11 - 135);
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = generate(&LevelConfig::default(), 1, &mut SimpleRng::new(5)).unwrap();
        let b = generate(&LevelConfig::default(), 1, &mut SimpleRng::new(5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_enemy_hp_matches_level() {
        for level in 1..=3 {
            let layout =
                generate(&LevelConfig::default(), level, &mut SimpleRng::new(level)).unwrap();
            assert!(layout.enemies.iter().all(|e| e.hp == level));
        }
    }

    #[test]
    fn test_grid_agrees_with_lists() {
        let layout = generate(&LevelConfig::default(), 1, &mut SimpleRng::new(77)).unwrap();
        for wall in &layout.fixed_walls {
            assert!(layout.grid.is_fixed_wall(*wall));
        }
        for block in &layout.breakable_blocks {
            assert!(layout.grid.is_breakable(*block));
        }
        let walls: HashSet<_> = layout.fixed_walls.iter().collect();
        assert_eq!(walls.len(), layout.fixed_walls.len());
    }

    #[test]
    fn test_too_many_blocks_is_rejected() {
        let config = LevelConfig {
            breakable_blocks: 104,
            ..LevelConfig::default()
        };
        assert!(matches!(
            generate(&config, 1, &mut SimpleRng::new(1)),
            Err(GenerationError::NotEnoughFreeTiles { what: "breakable blocks", .. })
        ));

        let uniform = LevelConfig {
            breakable_blocks: 104,
            enemies: 0,
            sampling: PoolSampling::Uniform,
            ..LevelConfig::default()
        };
        assert!(generate(&uniform, 1, &mut SimpleRng::new(1)).is_ok());
    }

    #[test]
    fn test_too_many_enemies_is_rejected() {
        let config = LevelConfig {
            enemies: 84,
            ..LevelConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(GenerationError::NotEnoughFreeTiles {
                what: "enemies",
                requested: 84,
                available: 84,
            })
        );
    }

    #[test]
    fn test_too_few_blocks_for_items_is_rejected() {
        let config = LevelConfig {
            breakable_blocks: 7,
            ..LevelConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(GenerationError::NotEnoughBlocks { blocks: 7, items: 8 })
        );
    }

    #[test]
    fn test_bare_layout() {
        let layout = LevelLayout::bare(15, 9);
        assert!(layout.breakable_blocks.is_empty());
        assert!(layout.enemies.is_empty());
        assert_eq!(layout.fixed_walls.len(), 80);
        assert_eq!(layout.exit_door, Coordinate::new(15, 9));
        assert_eq!(layout.invincibility_power_up, Coordinate::new(9, 9));
        for item in layout.items() {
            assert!(layout.grid.is_walkable(item));
        }

        let layout = layout.with_block(Coordinate::new(3, 1));
        assert!(layout.grid.is_breakable(Coordinate::new(3, 1)));
    }

    #[test]
    fn test_invalid_dimensions() {
        let config = LevelConfig {
            x_max: 0,
            ..LevelConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GenerationError::InvalidDimensions { .. })
        ));
    }
}
