//! Distance and visibility field around one monster.
//!
//! Built fresh every tick from the level grid and the monster's tile:
//!
//! 1. **Distance**: breadth-first search over 4-neighbour steps through
//!    walkable tiles. Tiles missing from the snapshot count as walkable.
//! 2. **Visibility**: for every tile the search reaches, a Bresenham ray from
//!    the monster outward along the same direction finds the first obstacle.
//!    The tile is visible iff it is strictly closer than that obstacle.
//!
//! # Ray Cache
//!
//! Rays are cached by the reduced direction `(dx / g, dy / g)` where
//! `g = gcd(|dx|, |dy|)`. The stepping rule only depends on that reduced
//! vector, so every tile sharing it walks the exact same cells and the cached
//! obstacle distance is exact.

use std::collections::{HashMap, VecDeque};
use std::fmt::Write as _;

use game_core::{LevelMap, Position, Tile};

/// Distance of tiles the search never reached.
pub const UNREACHABLE: u32 = u32::MAX;

/// Field data for one reachable tile.
#[derive(Clone, Copy, Debug)]
pub struct FieldEntry<'a> {
    /// Snapshot tile, `None` for unknown terrain.
    pub tile: Option<&'a Tile>,
    /// Walkable steps from the monster.
    pub distance: u32,
    pub line_of_sight: bool,
}

/// Per-monster, per-tick map of BFS distance and line of sight.
#[derive(Clone, Debug)]
pub struct DistanceField<'a> {
    level: &'a LevelMap,
    origin: Position,
    entries: HashMap<Position, FieldEntry<'a>>,
    rays_traced: usize,
}

impl<'a> DistanceField<'a> {
    /// Computes the field for a monster standing on `origin`.
    ///
    /// The origin is always present with distance 0 and line of sight, even
    /// when its own tile is occupied or flagged non-free.
    pub fn compute(level: &'a LevelMap, origin: Position) -> Self {
        let mut field = Self {
            level,
            origin,
            entries: HashMap::new(),
            rays_traced: 0,
        };
        let mut obstacle_cache: HashMap<(i32, i32), f32> = HashMap::new();
        let mut queue = VecDeque::new();

        field.entries.insert(
            origin,
            FieldEntry {
                tile: level.tile(origin),
                distance: 0,
                line_of_sight: true,
            },
        );
        queue.push_back((origin, 0u32));

        while let Some((current, distance)) = queue.pop_front() {
            for next in current.neighbors() {
                if field.entries.contains_key(&next)
                    || !level.in_bounds(next)
                    || !level.is_walkable(next)
                {
                    continue;
                }
                let line_of_sight = field.line_of_sight(&mut obstacle_cache, next);
                field.entries.insert(
                    next,
                    FieldEntry {
                        tile: level.tile(next),
                        distance: distance + 1,
                        line_of_sight,
                    },
                );
                queue.push_back((next, distance + 1));
            }
        }

        field
    }

    fn line_of_sight(&mut self, cache: &mut HashMap<(i32, i32), f32>, target: Position) -> bool {
        let (dx, dy) = (target.x - self.origin.x, target.y - self.origin.y);
        let g = gcd(dx.unsigned_abs(), dy.unsigned_abs()) as i32;
        let direction = (dx / g, dy / g);

        let obstacle = match cache.get(&direction) {
            Some(&distance) => distance,
            None => {
                let distance = trace_ray(self.level, self.origin, direction);
                self.rays_traced += 1;
                cache.insert(direction, distance);
                distance
            }
        };

        self.origin.euclid(target) < obstacle
    }

    pub fn origin(&self) -> Position {
        self.origin
    }

    pub fn level(&self) -> &'a LevelMap {
        self.level
    }

    pub fn entry(&self, position: Position) -> Option<&FieldEntry<'a>> {
        self.entries.get(&position)
    }

    /// BFS distance, or [`UNREACHABLE`].
    pub fn distance(&self, position: Position) -> u32 {
        self.entries
            .get(&position)
            .map_or(UNREACHABLE, |entry| entry.distance)
    }

    pub fn is_reachable(&self, position: Position) -> bool {
        self.entries.contains_key(&position)
    }

    /// Line of sight from the origin; unreachable tiles are never visible.
    pub fn has_line_of_sight(&self, position: Position) -> bool {
        self.entries
            .get(&position)
            .is_some_and(|entry| entry.line_of_sight)
    }

    /// Reachable tiles ordered by distance, then row, then column.
    pub fn reachable(&self) -> Vec<(Position, &FieldEntry<'a>)> {
        let mut tiles: Vec<_> = self.entries.iter().map(|(p, e)| (*p, e)).collect();
        tiles.sort_unstable_by_key(|(p, e)| (e.distance, p.y, p.x));
        tiles
    }

    /// Number of reachable tiles, origin included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct rays traced while building the field (cache misses).
    pub fn rays_traced(&self) -> usize {
        self.rays_traced
    }

    /// Text dump of the field, one character per tile.
    ///
    /// `@` origin, `#` blocked, `?` unreachable, the last digit of the
    /// distance for visible tiles and `~` for reachable but hidden ones.
    pub fn render_ascii(&self) -> String {
        let mut out = String::new();
        for y in 0..self.level.height as i32 {
            for x in 0..self.level.width as i32 {
                let pos = Position::new(x, y);
                let ch = match self.entries.get(&pos) {
                    _ if pos == self.origin => '@',
                    Some(entry) if entry.line_of_sight => {
                        char::from_digit(entry.distance % 10, 10).unwrap_or('*')
                    }
                    Some(_) => '~',
                    None if !self.level.is_walkable(pos) => '#',
                    None => '?',
                };
                out.push(ch);
            }
            let _ = writeln!(out);
        }
        out
    }
}

/// Steps along `direction` from `origin` until leaving the map or hitting a
/// non-walkable tile and returns the Euclidean distance to that cell.
///
/// The origin cell itself is never tested.
fn trace_ray(level: &LevelMap, origin: Position, direction: (i32, i32)) -> f32 {
    let dx = direction.0.abs();
    let dy = -direction.1.abs();
    let sx = direction.0.signum();
    let sy = direction.1.signum();
    let mut err = dx + dy;
    let mut cell = origin;

    loop {
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            cell.x += sx;
        }
        if e2 <= dx {
            err += dx;
            cell.y += sy;
        }
        if !level.in_bounds(cell) || !level.is_walkable(cell) {
            return origin.euclid(cell);
        }
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_is_zero_and_visible() {
        let level = LevelMap::from_ascii(0, &["###", "#.#", "###"]);
        let field = DistanceField::compute(&level, Position::new(1, 1));
        let origin = field.entry(Position::new(1, 1)).unwrap();

        assert_eq!(origin.distance, 0);
        assert!(origin.line_of_sight);
        assert_eq!(field.len(), 1);
    }

    #[test]
    fn open_three_by_three() {
        let level = LevelMap::open(0, 3, 3);
        let field = DistanceField::compute(&level, Position::new(1, 1));

        assert_eq!(field.distance(Position::new(0, 0)), 2);
        assert!(field.has_line_of_sight(Position::new(0, 0)));
        assert_eq!(field.len(), 9);
    }

    #[test]
    fn walls_block_paths_and_sight() {
        let level = LevelMap::from_ascii(
            0,
            &[
                ".....", //
                ".###.", //
                "..@..", //
            ],
        );
        // '@' is not a terrain character; the origin tile is unknown terrain.
        let field = DistanceField::compute(&level, Position::new(2, 2));

        assert_eq!(field.distance(Position::new(2, 0)), 6);
        assert!(!field.has_line_of_sight(Position::new(2, 0)));
        assert!(field.has_line_of_sight(Position::new(0, 2)));
    }

    #[test]
    fn enclosed_tiles_are_unreachable() {
        let level = LevelMap::from_ascii(0, &["..#.", "..#."]);
        let field = DistanceField::compute(&level, Position::new(0, 0));

        assert_eq!(field.distance(Position::new(3, 0)), UNREACHABLE);
        assert!(!field.is_reachable(Position::new(3, 1)));
        assert!(!field.has_line_of_sight(Position::new(3, 1)));
    }

    #[test]
    fn distance_matches_shortest_path_around_wall() {
        let level = LevelMap::from_ascii(0, &["....", ".##.", "...."]);
        let field = DistanceField::compute(&level, Position::new(0, 1));

        assert_eq!(field.distance(Position::new(3, 1)), 5);
        for (pos, entry) in field.reachable() {
            if entry.distance == 0 {
                continue;
            }
            let best_neighbor = pos
                .neighbors()
                .iter()
                .map(|n| field.distance(*n))
                .min()
                .unwrap();
            assert_eq!(entry.distance, best_neighbor + 1, "at {pos}");
        }
    }

    #[test]
    fn colinear_tiles_share_one_ray() {
        let level = LevelMap::open(0, 9, 1);
        let field = DistanceField::compute(&level, Position::new(0, 0));

        assert_eq!(field.len(), 9);
        assert_eq!(field.rays_traced(), 1);
    }

    #[test]
    fn ray_stops_at_map_edge() {
        let level = LevelMap::open(0, 4, 1);
        assert_eq!(trace_ray(&level, Position::new(0, 0), (1, 0)), 4.0);
    }

    #[test]
    fn gcd_reduces_directions() {
        assert_eq!(gcd(4, 6), 2);
        assert_eq!(gcd(0, 5), 5);
        assert_eq!(gcd(0, 0), 1);
    }

    #[test]
    fn ascii_dump_marks_origin() {
        let level = LevelMap::from_ascii(0, &["..#"]);
        let field = DistanceField::compute(&level, Position::new(0, 0));
        assert_eq!(field.render_ascii(), "@1#\n");
    }
}
