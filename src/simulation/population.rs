//! Creature arrivals - attraction, respawn and prisoner conversion
//!
//! All three share the same gates: lair space and a free tile near the
//! heart. Respawn tickets and prisoners that fail a gate stay queued and are
//! retried every tick.

use crate::core::types::{CreatureId, Position};
use crate::dungeon::room::{count_rooms, RoomType};
use crate::entity::creature::{Creature, CreatureType};
use crate::simulation::events::GameEvent;
use crate::simulation::state::{DeadCreature, GameState, Prisoner};

/// Rings searched around the heart for a spawn tile
const SPAWN_SEARCH_RADIUS: i32 = 3;

/// First free walkable tile on the rings around the heart, nearest ring
/// first, each ring scanned row by row
pub fn find_creature_spawn_position(state: &GameState) -> Option<Position> {
    let heart = state.heart.pos;
    for radius in 1..=SPAWN_SEARCH_RADIUS {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx.abs() != radius && dy.abs() != radius {
                    continue;
                }
                let pos = heart.offset(dx, dy);
                if state.grid.is_walkable(pos) && !state.creatures.iter().any(|c| c.pos == pos) {
                    return Some(pos);
                }
            }
        }
    }
    None
}

fn add_creature(state: &mut GameState, creature_type: CreatureType, pos: Position) -> CreatureId {
    let id = state.ids.next_creature();
    state.creatures.push(Creature::new(id, creature_type, pos));
    state.stats.creatures_recruited += 1;
    id
}

/// Attract at most one creature drawn by the rooms built.
///
/// Needs a lair with space. Each attracting room type can bring in as many
/// creatures of its kind as there are rooms of that type; the first type
/// that is affordable and has a spawn tile wins.
pub fn try_attract_creature(state: &mut GameState, events: &mut Vec<GameEvent>) -> Option<CreatureId> {
    if !state.has_lair_space() {
        return None;
    }

    for room_type in RoomType::ATTRACTION_ORDER {
        let room_count = count_rooms(&state.rooms, room_type);
        if room_count == 0 {
            continue;
        }
        let Some(creature_type) = room_type.attracts() else {
            continue;
        };

        let existing = state
            .creatures
            .iter()
            .filter(|c| c.creature_type == creature_type)
            .count();
        if existing >= room_count {
            continue;
        }

        let cost = creature_type.stats().cost;
        if !state.economy.can_afford(cost) {
            continue;
        }

        let Some(pos) = find_creature_spawn_position(state) else {
            continue;
        };

        state.economy.spend_gold(cost);
        let id = add_creature(state, creature_type, pos);
        state.add_message(format!("A {} has arrived!", creature_type.name()));
        tracing::info!(creature = creature_type.name(), cost, %pos, "Creature arrived");
        events.push(GameEvent::CreatureArrived { id, creature_type });
        return Some(id);
    }

    None
}

/// Player message explaining why a respawn cannot happen this tick
fn respawn_blocker(state: &GameState, dead: &DeadCreature) -> Option<String> {
    let name = dead.creature_type.name();
    if !state.economy.can_afford(dead.cost) {
        Some(format!("Cannot afford to respawn {} ({} gold)", name, dead.cost))
    } else if !state.has_lair_space() {
        Some(format!("No lair space to respawn {}", name))
    } else if find_creature_spawn_position(state).is_none() {
        Some(format!("No valid position to respawn {}", name))
    } else {
        None
    }
}

/// Queue a fallen creature for respawn
pub fn queue_respawn(state: &mut GameState, creature_type: CreatureType) {
    let cost = (creature_type.stats().cost as f32 * state.config.respawn_cost_fraction).floor() as u32;
    state.dead_creatures.push(DeadCreature {
        creature_type,
        respawn_time: state.game_time + state.config.respawn_delay,
        cost,
        reported: false,
    });
}

/// Bring back every due creature that can be afforded and housed
pub fn process_respawns(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let queue = std::mem::take(&mut state.dead_creatures);
    let mut remaining = Vec::with_capacity(queue.len());

    for mut dead in queue {
        if state.game_time < dead.respawn_time {
            remaining.push(dead);
            continue;
        }

        if let Some(reason) = respawn_blocker(state, &dead) {
            tracing::debug!(creature = dead.creature_type.name(), %reason, "Respawn deferred");
            if !dead.reported {
                state.add_message(reason);
                dead.reported = true;
            }
            remaining.push(dead);
            continue;
        }

        let Some(pos) = find_creature_spawn_position(state) else {
            remaining.push(dead);
            continue;
        };
        state.economy.spend_gold(dead.cost);
        let id = add_creature(state, dead.creature_type, pos);
        state.add_message(format!(
            "{} has respawned! (-{} gold)",
            dead.creature_type.name(),
            dead.cost
        ));
        tracing::info!(creature = dead.creature_type.name(), cost = dead.cost, "Creature respawned");
        events.push(GameEvent::CreatureRespawned {
            id,
            creature_type: dead.creature_type,
            cost: dead.cost,
        });
    }

    state.dead_creatures = remaining;
}

/// Turn prisoners held long enough into dark angels.
///
/// Requires a torture chamber. Conversion is free.
pub fn process_prisoner_conversion(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.prisoners.is_empty() || !state.has_room(RoomType::Torture) {
        return;
    }

    let held = std::mem::take(&mut state.prisoners);
    let mut remaining: Vec<Prisoner> = Vec::with_capacity(held.len());

    for mut prisoner in held {
        if state.game_time - prisoner.capture_time < state.config.prison_convert_time {
            remaining.push(prisoner);
            continue;
        }

        let spawn = if state.has_lair_space() {
            find_creature_spawn_position(state)
        } else {
            None
        };
        let Some(pos) = spawn else {
            if !prisoner.reported {
                state.add_message("Prisoner ready to convert, but there is no room for a dark angel");
                prisoner.reported = true;
            }
            tracing::debug!(hero = prisoner.hero_type.name(), "Conversion deferred");
            remaining.push(prisoner);
            continue;
        };

        let id = add_creature(state, CreatureType::DarkAngel, pos);
        state.add_message("Prisoner converted to Dark Angel!");
        tracing::info!(hero = prisoner.hero_type.name(), "Prisoner converted");
        events.push(GameEvent::PrisonerConverted { id });
    }

    state.prisoners = remaining;
}
