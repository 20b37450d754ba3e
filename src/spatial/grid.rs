//! Dungeon tile lattice
//!
//! Owns terrain, ownership, room tags and gold seams. The outer ring is
//! always rock, a square around the centre starts as claimed floor, and
//! everything else starts as dirt, some of it carrying a gold seam.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::Position;
use crate::dungeon::room::RoomType;

/// Default grid width in tiles
pub const GRID_WIDTH: i32 = 40;
/// Default grid height in tiles
pub const GRID_HEIGHT: i32 = 30;
/// Half-width of the floor square cleared around the centre (5x5)
pub const HEART_CLEAR_RADIUS: i32 = 2;
/// Gold from digging any dirt tile
pub const DIG_GOLD: u32 = 50;
/// Bonus gold from a dirt tile carrying a seam
pub const GOLD_SEAM_VALUE: u32 = 200;
/// Probability that a dirt tile carries a gold seam
pub const GOLD_SEAM_CHANCE: f64 = 0.05;

/// Orthogonal offsets in scan order: up, down, left, right
pub const DIRECTIONS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Terrain of a single tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Rock,
    Dirt,
    Floor,
    Water,
    Lava,
}

/// A single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    /// Room occupying this tile (back-reference only; rooms own themselves)
    pub room: RoomType,
    /// Claimed by the dungeon
    pub owned: bool,
    /// Only ever set on dirt
    pub gold_seam: bool,
}

impl Tile {
    pub const fn new(kind: TileKind) -> Self {
        Self {
            kind,
            room: RoomType::None,
            owned: false,
            gold_seam: false,
        }
    }

    /// Freshly dug or initially cleared floor
    pub const fn claimed_floor() -> Self {
        Self {
            kind: TileKind::Floor,
            room: RoomType::None,
            owned: true,
            gold_seam: false,
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::new(TileKind::Rock)
    }
}

/// Seeded linear-congruential generator used for reproducible seam layouts
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    /// Bits above 31 are folded into the 31-bit state
    pub fn new(seed: u64) -> Self {
        Self {
            state: (seed ^ (seed >> 31)) & 0x7fff_ffff,
        }
    }

    /// Next value in [0, 1]
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state.wrapping_mul(1_103_515_245).wrapping_add(12_345)) & 0x7fff_ffff;
        self.state as f64 / 0x7fff_ffff as f64
    }
}

/// Row-major tile lattice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Generate a standard-size dungeon.
    ///
    /// With a seed, gold-seam placement is exactly reproducible.
    pub fn generate(seed: Option<u64>) -> Self {
        Self::generate_sized(GRID_WIDTH, GRID_HEIGHT, seed)
    }

    /// Generate a dungeon of arbitrary size
    pub fn generate_sized(width: i32, height: i32, seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => {
                let mut lcg = Lcg::new(seed);
                Self::build(width, height, || lcg.next_f64())
            }
            None => {
                let mut rng = rand::thread_rng();
                Self::build(width, height, || rng.gen::<f64>())
            }
        }
    }

    fn build(width: i32, height: i32, mut roll: impl FnMut() -> f64) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let center = Position::new(width / 2, height / 2);
        let mut tiles = Vec::with_capacity((width * height) as usize);

        for y in 0..height {
            for x in 0..width {
                let tile = if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                    Tile::new(TileKind::Rock)
                } else if (x - center.x).abs() <= HEART_CLEAR_RADIUS
                    && (y - center.y).abs() <= HEART_CLEAR_RADIUS
                {
                    Tile::claimed_floor()
                } else {
                    Tile {
                        gold_seam: roll() < GOLD_SEAM_CHANCE,
                        ..Tile::new(TileKind::Dirt)
                    }
                };
                tiles.push(tile);
            }
        }

        Self {
            width,
            height,
            tiles,
        }
    }

    /// Grid filled with a single tile value (handy for open test maps)
    pub fn filled(width: i32, height: i32, tile: Tile) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            tiles: vec![tile; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Centre tile, where the dungeon heart sits
    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    #[inline]
    fn index(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| (pos.y * self.width + pos.x) as usize)
    }

    #[inline]
    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        self.index(pos).map(|i| &self.tiles[i])
    }

    #[inline]
    pub fn tile_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        match self.index(pos) {
            Some(i) => Some(&mut self.tiles[i]),
            None => None,
        }
    }

    /// Replace a tile; out-of-bounds writes are ignored
    pub fn set_tile(&mut self, pos: Position, tile: Tile) -> bool {
        match self.tile_mut(pos) {
            Some(slot) => {
                *slot = tile;
                true
            }
            None => false,
        }
    }

    pub fn kind_at(&self, pos: Position) -> Option<TileKind> {
        self.tile(pos).map(|t| t.kind)
    }

    /// Dig out a dirt tile, returning the gold it yields.
    ///
    /// Anything other than dirt is left untouched and yields 0.
    pub fn dig(&mut self, pos: Position) -> u32 {
        let Some(tile) = self.tile_mut(pos) else {
            return 0;
        };
        if tile.kind != TileKind::Dirt {
            return 0;
        }

        let gold = DIG_GOLD + if tile.gold_seam { GOLD_SEAM_VALUE } else { 0 };
        *tile = Tile::claimed_floor();
        gold
    }

    /// Only floor can be walked on
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.kind_at(pos) == Some(TileKind::Floor)
    }

    /// Only dirt can be dug
    pub fn is_diggable(&self, pos: Position) -> bool {
        self.kind_at(pos) == Some(TileKind::Dirt)
    }

    /// Walkable orthogonal neighbours
    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        DIRECTIONS
            .iter()
            .map(|&(dx, dy)| pos.offset(dx, dy))
            .filter(|&p| self.is_walkable(p))
            .collect()
    }

    /// In-bounds orthogonal neighbours regardless of terrain
    pub fn all_neighbors(&self, pos: Position) -> Vec<Position> {
        DIRECTIONS
            .iter()
            .map(|&(dx, dy)| pos.offset(dx, dy))
            .filter(|&p| self.in_bounds(p))
            .collect()
    }

    /// Iterate over every tile with its position, row by row
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Tile)> + '_ {
        let width = self.width;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, tile)| (Position::new(i as i32 % width, i as i32 / width), tile))
    }

    pub fn gold_seams(&self) -> Vec<Position> {
        self.iter()
            .filter(|(_, tile)| tile.gold_seam)
            .map(|(pos, _)| pos)
            .collect()
    }

    pub fn count_kind(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|t| t.kind == kind).count()
    }
}
