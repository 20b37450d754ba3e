//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulation time in seconds
pub type Seconds = f32;

/// Integer grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance (4-directional grid moves)
    pub fn manhattan(&self, other: &Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// True when `other` shares an edge with this tile
    pub fn is_adjacent(&self, other: &Self) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Unique identifier for imps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImpId(pub u32);

/// Unique identifier for creatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreatureId(pub u32);

/// Unique identifier for heroes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeroId(pub u32);

/// Reference to any HP-bearing entity in the dungeon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityRef {
    Heart,
    Imp(ImpId),
    Creature(CreatureId),
    Hero(HeroId),
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Heart => write!(f, "heart"),
            EntityRef::Imp(id) => write!(f, "imp-{}", id.0),
            EntityRef::Creature(id) => write!(f, "creature-{}", id.0),
            EntityRef::Hero(id) => write!(f, "hero-{}", id.0),
        }
    }
}

impl From<CreatureId> for EntityRef {
    fn from(id: CreatureId) -> Self {
        EntityRef::Creature(id)
    }
}

impl From<HeroId> for EntityRef {
    fn from(id: HeroId) -> Self {
        EntityRef::Hero(id)
    }
}

impl From<ImpId> for EntityRef {
    fn from(id: ImpId) -> Self {
        EntityRef::Imp(id)
    }
}

/// Hands out monotonic ids, one counter per entity kind.
///
/// Owned by whoever creates entities (normally `GameState`) so tests can
/// start from a known state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdAllocator {
    imps: u32,
    creatures: u32,
    heroes: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_imp(&mut self) -> ImpId {
        self.imps += 1;
        ImpId(self.imps)
    }

    pub fn next_creature(&mut self) -> CreatureId {
        self.creatures += 1;
        CreatureId(self.creatures)
    }

    pub fn next_hero(&mut self) -> HeroId {
        self.heroes += 1;
        HeroId(self.heroes)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
