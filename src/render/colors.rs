//! Color lookups for tiles, rooms and agents

use crate::dungeon::room::RoomType;
use crate::entity::creature::CreatureType;
use crate::entity::hero::HeroType;
use crate::spatial::grid::TileKind;

/// RGBA color (0.0 to 1.0 per channel)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from a 0xRRGGBB value
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0), 1.0)
    }

    /// Back to 0xRRGGBB, alpha dropped
    pub fn to_hex(&self) -> u32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Darken color by a factor (0.0 = black, 1.0 = unchanged)
    pub fn darken(&self, factor: f32) -> Self {
        Self {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
            a: self.a,
        }
    }
}

/// Background color for the renderer
pub const BACKGROUND: Color = Color::new(0.04, 0.04, 0.07, 1.0);

pub fn tile_color(kind: TileKind) -> Color {
    Color::from_hex(match kind {
        TileKind::Rock => 0x1a1a2e,
        TileKind::Dirt => 0x4a3728,
        TileKind::Floor => 0x3a3a4a,
        TileKind::Water => 0x1a4a6a,
        TileKind::Lava => 0x8a2a1a,
    })
}

/// Floor tint for a room; plain floor has none
pub fn room_color(room_type: RoomType) -> Option<Color> {
    let hex = match room_type {
        RoomType::None => return None,
        RoomType::Lair => 0x2a2a4a,
        RoomType::Hatchery => 0x2a4a2a,
        RoomType::Library => 0x4a2a4a,
        RoomType::Training => 0x4a3a2a,
        RoomType::Treasury => 0x4a4a2a,
        RoomType::Workshop => 0x3a3a3a,
        RoomType::Prison => 0x2a2a2a,
        RoomType::Torture => 0x4a1a1a,
    };
    Some(Color::from_hex(hex))
}

pub fn creature_color(creature_type: CreatureType) -> Color {
    Color::from_hex(match creature_type {
        CreatureType::Imp => 0xff9900,      // Orange
        CreatureType::Beetle => 0x66aa33,
        CreatureType::Orc => 0x33aa33,
        CreatureType::Warlock => 0x9933ff,  // Violet
        CreatureType::Troll => 0x666666,
        CreatureType::DarkAngel => 0x333366,
    })
}

pub fn hero_color(hero_type: HeroType) -> Color {
    Color::from_hex(match hero_type {
        HeroType::Peasant => 0xccaa77,
        HeroType::Archer => 0x77cc77,
        HeroType::Knight => 0xaaaacc,
        HeroType::Wizard => 0x7777ff,
        HeroType::Lord => 0xffcc00,         // Gold
    })
}

/// Green above half health, yellow above a quarter, red below
pub fn hp_bar_color(ratio: f32) -> Color {
    if ratio > 0.5 {
        Color::from_hex(0x00cc00)
    } else if ratio > 0.25 {
        Color::from_hex(0xcccc00)
    } else {
        Color::from_hex(0xcc0000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_channels() {
        let c = Color::from_hex(0xff9900);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 0.6).abs() < 0.01);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.to_hex(), 0xff9900);
    }

    #[test]
    fn test_terrain_colors_distinct() {
        let kinds = [
            TileKind::Rock,
            TileKind::Dirt,
            TileKind::Floor,
            TileKind::Water,
            TileKind::Lava,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(tile_color(*a), tile_color(*b));
            }
        }
    }

    #[test]
    fn test_room_tints() {
        assert!(room_color(RoomType::None).is_none());
        assert_eq!(room_color(RoomType::Torture).map(|c| c.to_hex()), Some(0x4a1a1a));
    }

    #[test]
    fn test_hp_bar_thresholds() {
        assert_eq!(hp_bar_color(1.0).to_hex(), 0x00cc00);
        assert_eq!(hp_bar_color(0.5).to_hex(), 0xcccc00);
        assert_eq!(hp_bar_color(0.26).to_hex(), 0xcccc00);
        assert_eq!(hp_bar_color(0.25).to_hex(), 0xcc0000);
        assert_eq!(hp_bar_color(0.0).to_hex(), 0xcc0000);
    }

    #[test]
    fn test_darken() {
        let base = Color::new(1.0, 1.0, 1.0, 1.0);
        let dark = base.darken(0.6);
        assert!((dark.r - 0.6).abs() < 0.01);
        assert_eq!(dark.a, 1.0);
    }
}
