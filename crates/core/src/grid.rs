//! Grid module - terrain of one level
//!
//! The grid covers `[0, x_max + 1] x [0, y_max + 1]`: the playable ground
//! `[1, x_max] x [1, y_max]` plus the fixed-wall border ring. Each tile holds a
//! [`BlockCategory`]. Uses a flat array for cache locality.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.

use crate::types::{BlockCategory, Coordinate, BOARD_UNITS_X, BOARD_UNITS_Y};

/// Terrain grid of a level, flat row-major storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    x_max: i32,
    y_max: i32,
    /// Row-major cells, (y * stride + x)
    cells: Vec<BlockCategory>,
}

impl Grid {
    /// Create a grid whose interior is all ground and whose border ring is fixed wall
    pub fn new(x_max: i32, y_max: i32) -> Self {
        let stride = (x_max + 2).max(0) as usize;
        let rows = (y_max + 2).max(0) as usize;
        let mut grid = Self {
            x_max,
            y_max,
            cells: vec![BlockCategory::Ground; stride * rows],
        };
        for y in 0..=y_max + 1 {
            for x in 0..=x_max + 1 {
                if x == 0 || x == x_max + 1 || y == 0 || y == y_max + 1 {
                    grid.set(Coordinate::new(x, y), BlockCategory::FixedWall);
                }
            }
        }
        grid
    }

    /// Playable extent derived from overall board units (minus border and HUD row)
    pub fn dimensions_for_units(units_x: i32, units_y: i32) -> (i32, i32) {
        (units_x - 2, units_y - 2 - 1)
    }

    /// Grid sized for the default 17x12 board
    pub fn standard() -> Self {
        let (x_max, y_max) = Self::dimensions_for_units(BOARD_UNITS_X, BOARD_UNITS_Y);
        Self::new(x_max, y_max)
    }

    /// Calculate flat index from a coordinate
    #[inline(always)]
    fn index(&self, c: Coordinate) -> Option<usize> {
        if c.x < 0 || c.x > self.x_max + 1 || c.y < 0 || c.y > self.y_max + 1 {
            return None;
        }
        Some((c.y as usize) * ((self.x_max + 2) as usize) + (c.x as usize))
    }

    pub fn x_max(&self) -> i32 {
        self.x_max
    }

    pub fn y_max(&self) -> i32 {
        self.y_max
    }

    /// Get the category at a coordinate, None if outside the grid
    pub fn get(&self, c: Coordinate) -> Option<BlockCategory> {
        self.index(c).map(|idx| self.cells[idx])
    }

    /// Set the category at a coordinate
    /// Returns false if out of bounds
    pub fn set(&mut self, c: Coordinate, category: BlockCategory) -> bool {
        match self.index(c) {
            Some(idx) => {
                self.cells[idx] = category;
                true
            }
            None => false,
        }
    }

    /// Check if the coordinate lies on the playable ground area
    pub fn in_playfield(&self, c: Coordinate) -> bool {
        c.x >= 1 && c.x <= self.x_max && c.y >= 1 && c.y <= self.y_max
    }

    pub fn is_fixed_wall(&self, c: Coordinate) -> bool {
        matches!(self.get(c), Some(BlockCategory::FixedWall))
    }

    pub fn is_breakable(&self, c: Coordinate) -> bool {
        matches!(self.get(c), Some(BlockCategory::BreakableBlock))
    }

    /// Check if terrain allows standing on the tile (inside and ground)
    pub fn is_walkable(&self, c: Coordinate) -> bool {
        matches!(self.get(c), Some(BlockCategory::Ground))
    }

    /// Clamp a coordinate into the playable area
    pub fn clamp(&self, c: Coordinate) -> Coordinate {
        Coordinate::new(c.x.clamp(1, self.x_max), c.y.clamp(1, self.y_max))
    }

    /// All playable ground coordinates, column-major like the level layout
    pub fn ground(&self) -> Vec<Coordinate> {
        let mut out = Vec::with_capacity((self.x_max * self.y_max).max(0) as usize);
        for x in 1..=self.x_max {
            for y in 1..=self.y_max {
                out.push(Coordinate::new(x, y));
            }
        }
        out
    }

    /// All coordinates currently holding `category`
    pub fn coordinates_of(&self, category: BlockCategory) -> Vec<Coordinate> {
        let mut out = Vec::new();
        for x in 0..=self.x_max + 1 {
            for y in 0..=self.y_max + 1 {
                let c = Coordinate::new(x, y);
                if self.get(c) == Some(category) {
                    out.push(c);
                }
            }
        }
        out
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(3, 2);
        // stride is x_max + 2 = 5
        assert_eq!(grid.index(Coordinate::new(0, 0)), Some(0));
        assert_eq!(grid.index(Coordinate::new(4, 0)), Some(4));
        assert_eq!(grid.index(Coordinate::new(0, 1)), Some(5));
        assert_eq!(grid.index(Coordinate::new(4, 3)), Some(19));
        assert_eq!(grid.index(Coordinate::new(-1, 0)), None);
        assert_eq!(grid.index(Coordinate::new(5, 0)), None);
        assert_eq!(grid.index(Coordinate::new(0, 4)), None);
    }

    #[test]
    fn test_standard_dimensions() {
        let grid = Grid::standard();
        assert_eq!(grid.x_max(), 15);
        assert_eq!(grid.y_max(), 9);
    }

    #[test]
    fn test_border_ring_is_fixed() {
        let grid = Grid::new(4, 3);
        for x in 0..=5 {
            assert!(grid.is_fixed_wall(Coordinate::new(x, 0)));
            assert!(grid.is_fixed_wall(Coordinate::new(x, 4)));
        }
        for y in 0..=4 {
            assert!(grid.is_fixed_wall(Coordinate::new(0, y)));
            assert!(grid.is_fixed_wall(Coordinate::new(5, y)));
        }
        assert!(grid.is_walkable(Coordinate::new(1, 1)));
        assert_eq!(grid.coordinates_of(BlockCategory::FixedWall).len(), 6 * 5 - 4 * 3);
    }

    #[test]
    fn test_clamp_into_playfield() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.clamp(Coordinate::new(0, 0)), Coordinate::new(1, 1));
        assert_eq!(grid.clamp(Coordinate::new(9, 9)), Coordinate::new(4, 3));
        assert_eq!(grid.clamp(Coordinate::new(2, 2)), Coordinate::new(2, 2));
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut grid = Grid::new(4, 3);
        assert!(!grid.set(Coordinate::new(-1, 0), BlockCategory::BreakableBlock));
        assert!(grid.set(Coordinate::new(2, 1), BlockCategory::BreakableBlock));
        assert!(grid.is_breakable(Coordinate::new(2, 1)));
        assert!(!grid.is_walkable(Coordinate::new(2, 1)));
    }
}
