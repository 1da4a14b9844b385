//! Blast resolver - tiles affected by one bomb explosion
//!
//! Each cardinal direction is walked independently from the origin for
//! `distance = 1..=range`. The first fixed wall stops that direction for good;
//! the wall itself is never part of the path. Breakable blocks do not stop the
//! walk. The origin is always included, tagged [`Direction::Center`].

use serde::{Deserialize, Serialize};

use crate::types::{Coordinate, Direction};

/// One tile of a blast path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlastTile {
    pub coordinate: Coordinate,
    pub direction: Direction,
    /// Outermost tile of its direction (distance == range)
    pub terminal: bool,
}

/// Resolve the blast path for a bomb at `origin` with the given `range`
///
/// Output is grouped by direction (up, down, left, right) then distance, with
/// the origin last.
///
/// # Examples
///
/// ```
/// use tui_bomber_core::blast::resolve;
/// use tui_bomber_types::{Coordinate, Direction};
///
/// let wall = Coordinate::new(6, 5);
/// let path = resolve(Coordinate::new(5, 5), 2, |c| c == wall);
///
/// assert!(path.iter().all(|t| t.direction != Direction::Right));
/// assert_eq!(path.len(), 2 + 2 + 2 + 1);
/// ```
pub fn resolve<F>(origin: Coordinate, range: u32, is_fixed_wall: F) -> Vec<BlastTile>
where
    F: Fn(Coordinate) -> bool,
{
    let range = range as i32;
    let mut path = Vec::with_capacity(4 * range.max(0) as usize + 1);

    for direction in Direction::CARDINALS {
        for distance in 1..=range {
            let coordinate = origin.step(direction, distance);
            if is_fixed_wall(coordinate) {
                break;
            }
            path.push(BlastTile {
                coordinate,
                direction,
                terminal: distance == range,
            });
        }
    }

    path.push(BlastTile {
        coordinate: origin,
        direction: Direction::Center,
        terminal: true,
    });
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn tiles_in(path: &[BlastTile], direction: Direction) -> Vec<BlastTile> {
        path.iter().copied().filter(|t| t.direction == direction).collect()
    }

    #[test]
    fn test_open_field_is_symmetric() {
        let origin = Coordinate::new(5, 5);
        let path = resolve(origin, 2, |_| false);

        assert_eq!(path.len(), 9);
        for direction in Direction::CARDINALS {
            let tiles = tiles_in(&path, direction);
            assert_eq!(tiles.len(), 2, "{:?}", direction);
            assert_eq!(tiles[0].coordinate, origin.step(direction, 1));
            assert!(!tiles[0].terminal);
            assert_eq!(tiles[1].coordinate, origin.step(direction, 2));
            assert!(tiles[1].terminal);
        }
    }

    #[test]
    fn test_origin_always_included() {
        let origin = Coordinate::new(3, 3);
        let path = resolve(origin, 1, |_| true);

        assert_eq!(
            path,
            vec![BlastTile {
                coordinate: origin,
                direction: Direction::Center,
                terminal: true,
            }]
        );
    }

    #[test]
    fn test_adjacent_wall_stops_direction() {
        let wall = Coordinate::new(6, 5);
        let path = resolve(Coordinate::new(5, 5), 2, |c| c == wall);

        assert!(tiles_in(&path, Direction::Right).is_empty());
        assert_eq!(tiles_in(&path, Direction::Left).len(), 2);
    }

    #[test]
    fn test_wall_is_not_jumped() {
        // Wall at distance 2: only distance 1 survives, and nothing past the wall.
        let wall = Coordinate::new(5, 3);
        let path = resolve(Coordinate::new(5, 5), 3, |c| c == wall);

        let up = tiles_in(&path, Direction::Up);
        assert_eq!(up.len(), 1);
        assert_eq!(up[0].coordinate, Coordinate::new(5, 4));
        assert!(!up[0].terminal);
        assert!(path.iter().all(|t| t.coordinate != Coordinate::new(5, 2)));
    }

    #[test]
    fn test_range_one_tiles_are_terminal() {
        let path = resolve(Coordinate::new(5, 5), 1, |_| false);
        assert_eq!(path.len(), 5);
        assert!(path.iter().all(|t| t.terminal));
    }

    #[test]
    fn test_tiles_are_unique() {
        let path = resolve(Coordinate::new(7, 4), 3, |_| false);
        let unique: HashSet<_> = path.iter().map(|t| t.coordinate).collect();
        assert_eq!(unique.len(), path.len());
    }
}
