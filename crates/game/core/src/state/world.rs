//! Per-tick world snapshot: levels, tiles and their occupants.
//!
//! A snapshot is immutable once built and is shared read-only by every
//! decision taken during the tick.

use std::collections::HashMap;

use bitflags::bitflags;

use crate::error::SnapshotError;
use crate::state::{Monster, Player, Position, Tick};

bitflags! {
    /// Terrain flags of a tile.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TileFlags: u8 {
        /// Walkable and transparent.
        const FREE   = 1 << 0;
        const WALL   = 1 << 1;
        const STAIRS = 1 << 2;
        const SPAWN  = 1 << 3;
        const DOOR   = 1 << 4;
    }
}

/// One grid cell with its occupants.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Tile {
    pub position: Position,
    pub flags: TileFlags,
    pub players: Vec<Player>,
    pub monsters: Vec<Monster>,
}

impl Tile {
    pub fn new(position: Position, flags: TileFlags) -> Self {
        Self {
            position,
            flags,
            ..Self::default()
        }
    }

    pub fn is_free(&self) -> bool {
        self.flags.contains(TileFlags::FREE)
    }

    pub fn is_stairs_or_spawn(&self) -> bool {
        self.flags.intersects(TileFlags::STAIRS | TileFlags::SPAWN)
    }

    pub fn is_occupied(&self) -> bool {
        !self.players.is_empty() || !self.monsters.is_empty()
    }

    #[must_use]
    pub fn with_player(mut self, player: Player) -> Self {
        self.players.push(player);
        self
    }

    #[must_use]
    pub fn with_monster(mut self, monster: Monster) -> Self {
        self.monsters.push(monster);
        self
    }
}

/// One dungeon level.
///
/// Tiles are indexed by position. Positions absent from the index are
/// unknown terrain; path search treats them as walkable.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "LevelRepr", into = "LevelRepr"))]
pub struct LevelMap {
    pub level: i32,
    pub width: u32,
    pub height: u32,
    tiles: HashMap<Position, Tile>,
}

impl LevelMap {
    pub fn new(level: i32, width: u32, height: u32) -> Self {
        Self {
            level,
            width,
            height,
            tiles: HashMap::new(),
        }
    }

    /// Fully open `width × height` level, handy for tools and tests.
    pub fn open(level: i32, width: u32, height: u32) -> Self {
        let mut map = Self::new(level, width, height);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                map.insert(Tile::new(Position::new(x, y), TileFlags::FREE));
            }
        }
        map
    }

    /// Builds a level from ASCII rows.
    ///
    /// `#` wall, `.` floor, `>` stairs, `S` spawn, `+` door, space unknown.
    pub fn from_ascii(level: i32, rows: &[&str]) -> Self {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let mut map = Self::new(level, width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let flags = match ch {
                    '#' => TileFlags::WALL,
                    '.' => TileFlags::FREE,
                    '>' => TileFlags::FREE | TileFlags::STAIRS,
                    'S' => TileFlags::FREE | TileFlags::SPAWN,
                    '+' => TileFlags::DOOR,
                    _ => continue,
                };
                map.insert(Tile::new(Position::new(x as i32, y as i32), flags));
            }
        }
        map
    }

    /// Inserts or replaces the tile at its position.
    pub fn insert(&mut self, tile: Tile) -> Option<Tile> {
        self.tiles.insert(tile.position, tile)
    }

    pub fn tile(&self, position: Position) -> Option<&Tile> {
        self.tiles.get(&position)
    }

    pub fn tile_mut(&mut self, position: Position) -> Option<&mut Tile> {
        self.tiles.get_mut(&position)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }

    /// Returns true unless a tile is known and not free.
    pub fn is_walkable(&self, position: Position) -> bool {
        self.tile(position).is_none_or(Tile::is_free)
    }

    /// All monsters on this level with their positions.
    pub fn monsters(&self) -> impl Iterator<Item = (Position, &Monster)> {
        self.tiles
            .values()
            .flat_map(|tile| tile.monsters.iter().map(move |m| (tile.position, m)))
    }

    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.width == 0 || self.height == 0 {
            return Err(SnapshotError::InvalidDimensions {
                level: self.level,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Wire shape of [`LevelMap`]: tiles as a flat list.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
struct LevelRepr {
    level: i32,
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl From<LevelRepr> for LevelMap {
    fn from(repr: LevelRepr) -> Self {
        let mut map = LevelMap::new(repr.level, repr.width, repr.height);
        for tile in repr.tiles {
            map.insert(tile);
        }
        map
    }
}

impl From<LevelMap> for LevelRepr {
    fn from(map: LevelMap) -> Self {
        let mut tiles: Vec<Tile> = map.tiles.into_values().collect();
        tiles.sort_by_key(|t| (t.position.y, t.position.x));
        Self {
            level: map.level,
            width: map.width,
            height: map.height,
            tiles,
        }
    }
}

/// Everything the AI sees in one tick.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameSnapshot {
    pub tick: Tick,
    pub levels: Vec<LevelMap>,
}

impl GameSnapshot {
    pub fn new(tick: Tick) -> Self {
        Self {
            tick,
            levels: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: LevelMap) -> Self {
        self.levels.push(level);
        self
    }

    pub fn level(&self, level: i32) -> Result<&LevelMap, SnapshotError> {
        self.levels
            .iter()
            .find(|l| l.level == level)
            .ok_or(SnapshotError::UnknownLevel(level))
    }

    /// Level numbers, highest first.
    pub fn level_order(&self) -> Vec<i32> {
        let mut order: Vec<i32> = self.levels.iter().map(|l| l.level).collect();
        order.sort_unstable_by(|a, b| b.cmp(a));
        order
    }

    /// Every monster in the snapshot.
    pub fn monsters(&self) -> impl Iterator<Item = &Monster> {
        self.levels.iter().flat_map(|l| l.monsters().map(|(_, m)| m))
    }
}
