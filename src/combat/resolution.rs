//! Combat resolution
//!
//! Range is Manhattan distance. Damage is attack times a uniform variance
//! in [0.8, 1.2], floored. Cooldown between attacks is 3 / speed seconds.
//! Creatures strike first each tick, then heroes.

use ahash::AHashMap;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::{CreatureId, EntityRef, HeroId, Position, Seconds};
use crate::entity::creature::Creature;
use crate::entity::heart::DungeonHeart;
use crate::entity::hero::{Hero, HeroTarget};
use crate::entity::Combatant;

pub const MIN_VARIANCE: f32 = 0.8;
pub const MAX_VARIANCE: f32 = 1.2;
/// Cooldown is this many seconds divided by speed
pub const COOLDOWN_BASE: f32 = 3.0;

/// One resolved attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatEvent {
    pub attacker: EntityRef,
    pub defender: EntityRef,
    pub damage: u32,
    pub defender_died: bool,
}

pub fn is_in_range(attacker: Position, defender: Position, range: u32) -> bool {
    attacker.manhattan(&defender) <= range
}

/// floor(atk * variance)
pub fn calculate_damage(atk: u32, variance: f32) -> u32 {
    (atk as f32 * variance).floor().max(0.0) as u32
}

/// Roll damage and apply it to `defender`. Returns the damage rolled.
pub fn process_attack<D, R>(atk: u32, defender: &mut D, rng: &mut R) -> u32
where
    D: Combatant + ?Sized,
    R: Rng,
{
    let variance = rng.gen_range(MIN_VARIANCE..=MAX_VARIANCE);
    let damage = calculate_damage(atk, variance);
    defender.apply_damage(damage as f32);
    damage
}

/// Seconds between attacks at a given speed
pub fn attack_cooldown(speed: f32) -> Seconds {
    if speed <= 0.0 {
        return Seconds::INFINITY;
    }
    COOLDOWN_BASE / speed
}

pub fn can_attack_now<C: Combatant + ?Sized>(entity: &C, speed: f32, now: Seconds) -> bool {
    now - entity.last_attack_time() >= attack_cooldown(speed)
}

/// Resolve every attack available this instant.
///
/// Targets that are gone or dead are cleared on the attacker. All creature
/// attacks resolve before any hero attack.
pub fn process_combat<R: Rng>(
    creatures: &mut [Creature],
    heroes: &mut [Hero],
    heart: &mut DungeonHeart,
    now: Seconds,
    rng: &mut R,
) -> Vec<CombatEvent> {
    let mut events = Vec::new();

    let hero_index: AHashMap<HeroId, usize> =
        heroes.iter().enumerate().map(|(i, h)| (h.id, i)).collect();

    // Creatures attack heroes
    for creature in creatures.iter_mut() {
        if creature.is_dead() {
            continue;
        }
        let Some(target_id) = creature.target else {
            continue;
        };
        let Some(hero) = hero_index.get(&target_id).and_then(|&i| heroes.get_mut(i)) else {
            creature.target = None;
            continue;
        };
        if hero.is_dead() {
            creature.target = None;
            continue;
        }
        if !is_in_range(creature.pos, hero.pos, creature.range()) {
            continue;
        }
        if !creature.can_attack(now) {
            continue;
        }

        let damage = process_attack(creature.attack(), &mut *hero, rng);
        creature.record_attack(now);
        events.push(CombatEvent {
            attacker: EntityRef::Creature(creature.id),
            defender: EntityRef::Hero(hero.id),
            damage,
            defender_died: hero.is_dead(),
        });
    }

    let creature_index: AHashMap<CreatureId, usize> =
        creatures.iter().enumerate().map(|(i, c)| (c.id, i)).collect();

    // Heroes attack creatures and the heart
    for hero in heroes.iter_mut() {
        if hero.is_dead() {
            continue;
        }
        let Some(target) = hero.target else {
            continue;
        };

        let defender: &mut dyn Combatant = match target {
            HeroTarget::Heart => &mut *heart,
            HeroTarget::Creature(id) => {
                match creature_index.get(&id).and_then(|&i| creatures.get_mut(i)) {
                    Some(creature) => creature,
                    None => {
                        hero.target = None;
                        continue;
                    }
                }
            }
        };
        if defender.is_dead() {
            hero.target = None;
            continue;
        }
        if !is_in_range(hero.pos, defender.position(), hero.range()) {
            continue;
        }
        if !hero.can_attack(now) {
            continue;
        }

        let damage = process_attack(hero.attack(), &mut *defender, rng);
        let defender_died = defender.is_dead();
        if target == HeroTarget::Heart {
            // The heart's timestamp tracks when it was last hit
            defender.set_last_attack_time(now);
        }
        hero.record_attack(now);
        events.push(CombatEvent {
            attacker: EntityRef::Hero(hero.id),
            defender: target.into(),
            damage,
            defender_died,
        });
    }

    events
}
