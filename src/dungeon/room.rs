//! Room placement, removal and queries
//!
//! Rooms are fixed 3x3 blocks of claimed floor. The room list owns every
//! `Room`; tiles only carry the room tag.

use serde::{Deserialize, Serialize};

use crate::core::types::Position;
use crate::entity::creature::CreatureType;
use crate::spatial::grid::{Grid, TileKind};

/// Rooms are ROOM_SIZE x ROOM_SIZE tiles
pub const ROOM_SIZE: i32 = 3;

/// Type of room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoomType {
    #[default]
    None,
    Lair,
    Hatchery,
    Library,
    Training,
    Treasury,
    Workshop,
    Prison,
    Torture,
}

impl RoomType {
    /// Every room a player can build
    pub const BUILDABLE: [RoomType; 8] = [
        RoomType::Lair,
        RoomType::Hatchery,
        RoomType::Library,
        RoomType::Training,
        RoomType::Treasury,
        RoomType::Workshop,
        RoomType::Prison,
        RoomType::Torture,
    ];

    /// Rooms checked for creature attraction, in priority order
    pub const ATTRACTION_ORDER: [RoomType; 5] = [
        RoomType::Hatchery,
        RoomType::Library,
        RoomType::Training,
        RoomType::Workshop,
        RoomType::Torture,
    ];

    /// Gold needed to build this room
    pub fn cost(&self) -> u32 {
        match self {
            RoomType::None => 0,
            RoomType::Lair => 500,
            RoomType::Hatchery => 750,
            RoomType::Library => 1000,
            RoomType::Training => 1000,
            RoomType::Treasury => 250,
            RoomType::Workshop => 1500,
            RoomType::Prison => 750,
            RoomType::Torture => 1000,
        }
    }

    /// Creature drawn to the dungeon by this room
    pub fn attracts(&self) -> Option<CreatureType> {
        match self {
            RoomType::Hatchery => Some(CreatureType::Beetle),
            RoomType::Library => Some(CreatureType::Warlock),
            RoomType::Training => Some(CreatureType::Orc),
            RoomType::Workshop => Some(CreatureType::Troll),
            RoomType::Torture => Some(CreatureType::DarkAngel),
            RoomType::None
            | RoomType::Lair
            | RoomType::Treasury
            | RoomType::Prison => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RoomType::None => "None",
            RoomType::Lair => "Lair",
            RoomType::Hatchery => "Hatchery",
            RoomType::Library => "Library",
            RoomType::Training => "Training Room",
            RoomType::Treasury => "Treasury",
            RoomType::Workshop => "Workshop",
            RoomType::Prison => "Prison",
            RoomType::Torture => "Torture Chamber",
        }
    }
}

/// A placed room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub room_type: RoomType,
    /// Footprint, row by row from the top-left corner
    pub tiles: Vec<Position>,
    /// 0.0 to 1.0
    pub efficiency: f32,
}

impl Room {
    pub fn top_left(&self) -> Option<Position> {
        self.tiles.first().copied()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.tiles.contains(&pos)
    }
}

/// Efficiency from footprint size; a full 3x3 room is 1.0
pub fn room_efficiency(tile_count: usize) -> f32 {
    let full = (ROOM_SIZE * ROOM_SIZE) as f32;
    (tile_count as f32 / full).min(1.0)
}

fn footprint(top_left: Position) -> impl Iterator<Item = Position> {
    (0..ROOM_SIZE).flat_map(move |dy| (0..ROOM_SIZE).map(move |dx| top_left.offset(dx, dy)))
}

/// Whether a room of `room_type` fits with its top-left at `top_left`.
///
/// Every footprint tile must be in bounds, claimed floor, and room-free.
pub fn can_place_room(grid: &Grid, top_left: Position, room_type: RoomType) -> bool {
    if room_type == RoomType::None {
        return false;
    }

    footprint(top_left).all(|pos| {
        grid.tile(pos).is_some_and(|tile| {
            tile.kind == TileKind::Floor && tile.owned && tile.room == RoomType::None
        })
    })
}

/// Tag the footprint and record the room.
///
/// Does not validate; call `can_place_room` first.
pub fn place_room(grid: &mut Grid, rooms: &mut Vec<Room>, top_left: Position, room_type: RoomType) -> Room {
    let mut tiles = Vec::with_capacity((ROOM_SIZE * ROOM_SIZE) as usize);
    for pos in footprint(top_left) {
        if let Some(tile) = grid.tile_mut(pos) {
            tile.room = room_type;
            tiles.push(pos);
        }
    }

    let room = Room {
        room_type,
        efficiency: room_efficiency(tiles.len()),
        tiles,
    };
    rooms.push(room.clone());
    room
}

/// Remove the room covering `pos`, clearing its tags.
pub fn remove_room_at(grid: &mut Grid, rooms: &mut Vec<Room>, pos: Position) -> Option<Room> {
    let index = rooms.iter().position(|r| r.contains(pos))?;
    let room = rooms.remove(index);
    for tile_pos in &room.tiles {
        if let Some(tile) = grid.tile_mut(*tile_pos) {
            tile.room = RoomType::None;
        }
    }
    Some(room)
}

pub fn room_at(rooms: &[Room], pos: Position) -> Option<&Room> {
    rooms.iter().find(|r| r.contains(pos))
}

pub fn count_rooms(rooms: &[Room], room_type: RoomType) -> usize {
    rooms.iter().filter(|r| r.room_type == room_type).count()
}

pub fn rooms_of_type(rooms: &[Room], room_type: RoomType) -> impl Iterator<Item = &Room> {
    rooms.iter().filter(move |r| r.room_type == room_type)
}

pub fn is_inside_room(rooms: &[Room], pos: Position) -> bool {
    room_at(rooms, pos).is_some()
}

/// Summed efficiency of every room of a type
pub fn total_efficiency(rooms: &[Room], room_type: RoomType) -> f32 {
    rooms_of_type(rooms, room_type).map(|r| r.efficiency).sum()
}
