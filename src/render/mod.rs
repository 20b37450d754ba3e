//! Read-only view of the game for a renderer
//!
//! Nothing here modifies simulation state.

pub mod colors;

use crate::core::types::Position;
use crate::entity::creature::CreatureType;
use crate::entity::Combatant;
use crate::simulation::state::GameState;
use colors::{creature_color, hero_color, Color};

/// Lightweight snapshot of an agent for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSprite {
    pub position: Position,
    pub color: Color,
    /// 0.0 to 1.0
    pub health: f32,
}

/// Collects every visible agent into a reusable buffer.
/// Call this once per frame, passing the same buffer to avoid allocations.
pub fn collect_sprites(state: &GameState, buffer: &mut Vec<RenderSprite>) {
    buffer.clear();

    for imp in &state.imps {
        buffer.push(RenderSprite {
            position: imp.pos,
            color: creature_color(CreatureType::Imp),
            health: imp.hp_ratio(),
        });
    }

    for creature in state.creatures.iter().filter(|c| !c.is_dead()) {
        buffer.push(RenderSprite {
            position: creature.pos,
            color: creature_color(creature.creature_type),
            health: creature.hp_ratio(),
        });
    }

    for hero in state.heroes.iter().filter(|h| !h.is_dead()) {
        buffer.push(RenderSprite {
            position: hero.pos,
            color: hero_color(hero.hero_type),
            health: hero.hp_ratio(),
        });
    }
}
