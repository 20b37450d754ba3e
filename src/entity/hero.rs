//! Heroes - wave-spawned intruders heading for the dungeon heart

use serde::{Deserialize, Serialize};

use crate::combat::resolution::attack_cooldown;
use crate::core::types::{CreatureId, EntityRef, HeroId, Position, Seconds};
use crate::entity::creature::Creature;
use crate::entity::heart::DungeonHeart;
use crate::entity::{Combatant, FLEE_HP_THRESHOLD};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeroType {
    Peasant,
    Archer,
    Knight,
    Wizard,
    Lord,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeroStats {
    pub hp: u32,
    pub atk: u32,
    pub speed: f32,
    /// Dropped when slain
    pub gold: u32,
    /// First wave this hero appears in
    pub min_wave: u32,
    pub range: u32,
}

impl HeroType {
    pub fn stats(&self) -> HeroStats {
        let (hp, atk, speed, gold, min_wave, range) = match self {
            HeroType::Peasant => (30, 8, 2.0, 50, 1, 1),
            HeroType::Archer => (25, 15, 1.5, 100, 2, 3),
            HeroType::Knight => (80, 20, 1.0, 200, 3, 1),
            HeroType::Wizard => (40, 30, 1.0, 300, 4, 3),
            HeroType::Lord => (150, 35, 1.5, 500, 5, 1),
        };
        HeroStats {
            hp,
            atk,
            speed,
            gold,
            min_wave,
            range,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HeroType::Peasant => "peasant",
            HeroType::Archer => "archer",
            HeroType::Knight => "knight",
            HeroType::Wizard => "wizard",
            HeroType::Lord => "lord",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HeroBehavior {
    #[default]
    Entering,
    Attacking,
    Fleeing,
}

/// What a hero can attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeroTarget {
    Heart,
    Creature(CreatureId),
}

impl From<HeroTarget> for EntityRef {
    fn from(target: HeroTarget) -> Self {
        match target {
            HeroTarget::Heart => EntityRef::Heart,
            HeroTarget::Creature(id) => EntityRef::Creature(id),
        }
    }
}

/// Pure behavior decision: flee when badly hurt, attack a target in range,
/// otherwise keep pushing in.
pub fn decide_behavior(hp_ratio: f32, has_target_in_range: bool) -> HeroBehavior {
    if hp_ratio < FLEE_HP_THRESHOLD {
        return HeroBehavior::Fleeing;
    }
    if has_target_in_range {
        return HeroBehavior::Attacking;
    }
    HeroBehavior::Entering
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub id: HeroId,
    pub hero_type: HeroType,
    pub pos: Position,
    pub hp: f32,
    pub max_hp: f32,
    pub last_attack_time: Seconds,
    pub behavior: HeroBehavior,
    pub target: Option<HeroTarget>,
    /// Movement accumulator in tiles
    pub move_progress: f32,
}

impl Hero {
    pub fn new(id: HeroId, hero_type: HeroType, pos: Position) -> Self {
        let hp = hero_type.stats().hp as f32;
        Self {
            id,
            hero_type,
            pos,
            hp,
            max_hp: hp,
            last_attack_time: 0.0,
            behavior: HeroBehavior::Entering,
            target: None,
            move_progress: 0.0,
        }
    }

    pub fn attack(&self) -> u32 {
        self.hero_type.stats().atk
    }

    pub fn speed(&self) -> f32 {
        self.hero_type.stats().speed
    }

    pub fn range(&self) -> u32 {
        self.hero_type.stats().range
    }

    pub fn gold_drop(&self) -> u32 {
        self.hero_type.stats().gold
    }

    pub fn is_ranged(&self) -> bool {
        self.range() > 1
    }

    pub fn wants_to_flee(&self) -> bool {
        self.hp_ratio() < FLEE_HP_THRESHOLD
    }

    /// Pick something to attack this tick.
    ///
    /// A live heart in range always wins, even over a closer creature.
    /// Otherwise the nearest live creature in range.
    pub fn choose_target(&self, creatures: &[Creature], heart: &DungeonHeart) -> Option<HeroTarget> {
        let range = self.range();

        if !heart.is_dead() && self.pos.manhattan(&heart.pos) <= range {
            return Some(HeroTarget::Heart);
        }

        let mut nearest = None;
        let mut nearest_dist = u32::MAX;
        for creature in creatures {
            if creature.is_dead() {
                continue;
            }
            let dist = self.pos.manhattan(&creature.pos);
            if dist <= range && dist < nearest_dist {
                nearest = Some(HeroTarget::Creature(creature.id));
                nearest_dist = dist;
            }
        }
        nearest
    }

    /// Absolute nearest live creature or heart, ignoring range.
    ///
    /// Used to decide where to walk. Creatures win ties with the heart.
    pub fn find_nearest_target(
        &self,
        creatures: &[Creature],
        heart: &DungeonHeart,
    ) -> Option<(HeroTarget, Position)> {
        let mut nearest = None;
        let mut nearest_dist = u32::MAX;

        for creature in creatures {
            if creature.is_dead() {
                continue;
            }
            let dist = self.pos.manhattan(&creature.pos);
            if dist < nearest_dist {
                nearest = Some((HeroTarget::Creature(creature.id), creature.pos));
                nearest_dist = dist;
            }
        }

        if !heart.is_dead() && self.pos.manhattan(&heart.pos) < nearest_dist {
            nearest = Some((HeroTarget::Heart, heart.pos));
        }

        nearest
    }

    pub fn determine_behavior(&self) -> HeroBehavior {
        decide_behavior(self.hp_ratio(), self.target.is_some())
    }

    pub fn can_attack(&self, now: Seconds) -> bool {
        now - self.last_attack_time >= attack_cooldown(self.speed())
    }

    pub fn record_attack(&mut self, now: Seconds) {
        self.last_attack_time = now;
    }
}
