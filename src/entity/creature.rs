//! Creatures - the dungeon's fighting population
//!
//! Behavior is not a stored state machine. It is recomputed every tick from
//! hp, hunger and target signals by `decide_behavior`.

use serde::{Deserialize, Serialize};

use crate::combat::resolution::attack_cooldown;
use crate::core::types::{CreatureId, HeroId, Position, Seconds};
use crate::dungeon::room::RoomType;
use crate::entity::hero::Hero;
use crate::entity::{nearest_alive, Combatant, FLEE_HP_THRESHOLD};

/// Hunger lost per second
pub const HUNGER_DECAY_RATE: f32 = 1.0;
/// Happiness lost per second
pub const HAPPINESS_DECAY_RATE: f32 = 0.05;
/// Go eat below this hunger
pub const HUNGER_THRESHOLD: f32 = 30.0;
pub const MAX_NEED: f32 = 100.0;
/// Training progress needed for one level
pub const TRAINING_PER_LEVEL: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreatureType {
    Imp,
    Beetle,
    Orc,
    Warlock,
    Troll,
    DarkAngel,
}

/// Fixed per-type stats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreatureStats {
    pub hp: u32,
    pub atk: u32,
    /// Tiles per second; also sets attack cooldown
    pub speed: f32,
    pub cost: u32,
    pub range: u32,
}

impl CreatureType {
    pub fn stats(&self) -> CreatureStats {
        let (hp, atk, speed, cost, range) = match self {
            CreatureType::Imp => (20, 5, 3.0, 0, 1),
            CreatureType::Beetle => (40, 10, 2.0, 100, 1),
            CreatureType::Orc => (60, 15, 1.5, 200, 1),
            CreatureType::Warlock => (35, 25, 1.0, 300, 3),
            CreatureType::Troll => (80, 12, 1.0, 250, 1),
            CreatureType::DarkAngel => (50, 20, 2.0, 500, 1),
        };
        CreatureStats {
            hp,
            atk,
            speed,
            cost,
            range,
        }
    }

    /// Room this creature works in, if any
    pub fn work_room(&self) -> Option<RoomType> {
        match self {
            CreatureType::Beetle => Some(RoomType::Hatchery),
            CreatureType::Orc => Some(RoomType::Training),
            CreatureType::Warlock => Some(RoomType::Library),
            CreatureType::Troll => Some(RoomType::Workshop),
            CreatureType::DarkAngel => Some(RoomType::Torture),
            CreatureType::Imp => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CreatureType::Imp => "imp",
            CreatureType::Beetle => "beetle",
            CreatureType::Orc => "orc",
            CreatureType::Warlock => "warlock",
            CreatureType::Troll => "troll",
            CreatureType::DarkAngel => "dark angel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CreatureBehavior {
    #[default]
    Idle,
    Working,
    Eating,
    Fighting,
    Fleeing,
}

/// Pure behavior decision, highest priority first:
/// flee when badly hurt, fight a targeted nearby enemy, eat when hungry
/// and food exists, otherwise idle.
pub fn decide_behavior(
    hp_ratio: f32,
    hunger: f32,
    has_enemy_nearby: bool,
    has_target: bool,
    has_food: bool,
) -> CreatureBehavior {
    if hp_ratio < FLEE_HP_THRESHOLD {
        return CreatureBehavior::Fleeing;
    }
    if has_enemy_nearby && has_target {
        return CreatureBehavior::Fighting;
    }
    if hunger < HUNGER_THRESHOLD && has_food {
        return CreatureBehavior::Eating;
    }
    CreatureBehavior::Idle
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub id: CreatureId,
    pub creature_type: CreatureType,
    pub pos: Position,
    pub hp: f32,
    pub max_hp: f32,
    pub last_attack_time: Seconds,
    pub behavior: CreatureBehavior,
    /// 0 = starving, 100 = full
    pub hunger: f32,
    /// 0 = miserable, 100 = content
    pub happiness: f32,
    pub level: u32,
    pub target: Option<HeroId>,
    /// 0 to 100, levels up at 100
    pub training_progress: f32,
    /// Movement accumulator in tiles
    pub move_progress: f32,
}

impl Creature {
    pub fn new(id: CreatureId, creature_type: CreatureType, pos: Position) -> Self {
        let hp = creature_type.stats().hp as f32;
        Self {
            id,
            creature_type,
            pos,
            hp,
            max_hp: hp,
            last_attack_time: 0.0,
            behavior: CreatureBehavior::Idle,
            hunger: MAX_NEED,
            happiness: MAX_NEED,
            level: 1,
            target: None,
            training_progress: 0.0,
            move_progress: 0.0,
        }
    }

    /// Base attack plus 10% per level above 1, floored
    pub fn attack(&self) -> u32 {
        let base = self.creature_type.stats().atk as f32;
        let bonus = self.level.saturating_sub(1) as f32 * 0.1;
        (base * (1.0 + bonus)).floor() as u32
    }

    pub fn speed(&self) -> f32 {
        self.creature_type.stats().speed
    }

    pub fn range(&self) -> u32 {
        self.creature_type.stats().range
    }

    /// Decay hunger and happiness over `dt` seconds
    pub fn update_needs(&mut self, dt: Seconds) {
        self.hunger = (self.hunger - HUNGER_DECAY_RATE * dt).max(0.0);
        self.happiness = (self.happiness - HAPPINESS_DECAY_RATE * dt).max(0.0);
    }

    pub fn is_hungry(&self) -> bool {
        self.hunger < HUNGER_THRESHOLD
    }

    pub fn wants_to_flee(&self) -> bool {
        self.hp_ratio() < FLEE_HP_THRESHOLD
    }

    pub fn determine_behavior(&self, has_enemy_nearby: bool, has_food: bool) -> CreatureBehavior {
        decide_behavior(
            self.hp_ratio(),
            self.hunger,
            has_enemy_nearby,
            self.target.is_some(),
            has_food,
        )
    }

    /// Gain a level: +10% max hp (floored) and a full heal
    pub fn level_up(&mut self) {
        self.level += 1;
        self.max_hp += (self.max_hp * 0.1).floor();
        self.hp = self.max_hp;
    }

    /// Add training progress; returns true if a level was gained.
    ///
    /// Progress resets to zero on level-up; any excess over 100 is dropped.
    pub fn train(&mut self, amount: f32, max_level: u32) -> bool {
        if self.level >= max_level {
            return false;
        }

        self.training_progress += amount;
        if self.training_progress >= TRAINING_PER_LEVEL {
            self.training_progress = 0.0;
            self.level_up();
            return true;
        }
        false
    }

    pub fn feed(&mut self, amount: f32) {
        self.hunger = (self.hunger + amount).min(MAX_NEED);
    }

    pub fn pay(&mut self, amount: f32) {
        self.happiness = (self.happiness + amount).min(MAX_NEED);
    }

    /// Nearest live hero by Manhattan distance
    pub fn find_nearest_enemy<'a>(&self, heroes: &'a [Hero]) -> Option<&'a Hero> {
        nearest_alive(self.pos, heroes)
    }

    pub fn can_attack(&self, now: Seconds) -> bool {
        now - self.last_attack_time >= attack_cooldown(self.speed())
    }

    pub fn record_attack(&mut self, now: Seconds) {
        self.last_attack_time = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::HeroId;
    use crate::entity::hero::HeroType;

    fn orc() -> Creature {
        Creature::new(CreatureId(1), CreatureType::Orc, Position::new(10, 10))
    }

    #[test]
    fn test_new_creature_uses_type_stats() {
        let c = orc();
        assert_eq!(c.hp, 60.0);
        assert_eq!(c.max_hp, 60.0);
        assert_eq!(c.level, 1);
        assert_eq!(c.hunger, 100.0);
        assert_eq!(c.happiness, 100.0);
        assert_eq!(c.behavior, CreatureBehavior::Idle);
        assert!(c.target.is_none());
    }

    #[test]
    fn test_attack_scales_with_level() {
        let mut c = orc();
        assert_eq!(c.attack(), 15);
        c.level = 2;
        // floor(15 * 1.1) = 16
        assert_eq!(c.attack(), 16);
        c.level = 5;
        // floor(15 * 1.4) = 21
        assert_eq!(c.attack(), 21);
    }

    #[test]
    fn test_needs_decay_and_floor() {
        let mut c = orc();
        c.update_needs(10.0);
        assert_eq!(c.hunger, 90.0);
        assert!((c.happiness - 99.5).abs() < 1e-4);

        c.update_needs(500.0);
        assert_eq!(c.hunger, 0.0);
        assert!(c.happiness >= 0.0);
    }

    #[test]
    fn test_flee_overrides_everything() {
        assert_eq!(decide_behavior(0.1, 0.0, true, true, true), CreatureBehavior::Fleeing);
    }

    #[test]
    fn test_fight_needs_enemy_and_target() {
        assert_eq!(decide_behavior(1.0, 100.0, true, true, false), CreatureBehavior::Fighting);
        assert_eq!(decide_behavior(1.0, 100.0, true, false, false), CreatureBehavior::Idle);
        assert_eq!(decide_behavior(1.0, 100.0, false, true, false), CreatureBehavior::Idle);
    }

    #[test]
    fn test_eat_needs_hunger_and_food() {
        assert_eq!(decide_behavior(1.0, 20.0, false, false, true), CreatureBehavior::Eating);
        assert_eq!(decide_behavior(1.0, 20.0, false, false, false), CreatureBehavior::Idle);
        assert_eq!(decide_behavior(1.0, 30.0, false, false, true), CreatureBehavior::Idle);
    }

    #[test]
    fn test_determine_behavior_reads_creature_state() {
        let mut c = orc();
        c.hp = 11.0;
        assert_eq!(c.determine_behavior(false, false), CreatureBehavior::Fleeing);
        c.hp = 60.0;
        c.target = Some(HeroId(4));
        assert_eq!(c.determine_behavior(true, false), CreatureBehavior::Fighting);
    }

    #[test]
    fn test_level_up() {
        let mut c = orc();
        c.hp = 5.0;
        c.level_up();
        assert_eq!(c.level, 2);
        assert_eq!(c.max_hp, 66.0);
        assert_eq!(c.hp, 66.0);
    }

    #[test]
    fn test_training_resets_progress_on_level_up() {
        let mut c = orc();
        assert!(!c.train(80.0, 10));
        assert_eq!(c.training_progress, 80.0);

        // 80 + 30 levels once and drops the extra 10
        assert!(c.train(30.0, 10));
        assert_eq!(c.level, 2);
        assert_eq!(c.training_progress, 0.0);
    }

    #[test]
    fn test_training_stops_at_max_level() {
        let mut c = orc();
        c.level = 10;
        assert!(!c.train(500.0, 10));
        assert_eq!(c.level, 10);
        assert_eq!(c.training_progress, 0.0);
    }

    #[test]
    fn test_feed_and_pay_clamp() {
        let mut c = orc();
        c.hunger = 90.0;
        c.happiness = 50.0;
        c.feed(30.0);
        c.pay(20.0);
        assert_eq!(c.hunger, 100.0);
        assert_eq!(c.happiness, 70.0);
    }

    #[test]
    fn test_find_nearest_enemy() {
        let c = orc();
        let heroes = vec![
            Hero::new(HeroId(1), HeroType::Knight, Position::new(20, 10)),
            Hero::new(HeroId(2), HeroType::Peasant, Position::new(12, 10)),
        ];
        assert_eq!(c.find_nearest_enemy(&heroes).map(|h| h.id), Some(HeroId(2)));
        assert!(c.find_nearest_enemy(&[]).is_none());
    }

    #[test]
    fn test_attack_cooldown_gate() {
        let mut c = orc();
        // Orc speed 1.5 -> 2 second cooldown
        c.record_attack(10.0);
        assert!(!c.can_attack(11.0));
        assert!(c.can_attack(12.0));
    }

    #[test]
    fn test_work_rooms() {
        assert_eq!(CreatureType::Orc.work_room(), Some(RoomType::Training));
        assert_eq!(CreatureType::Warlock.work_room(), Some(RoomType::Library));
        assert_eq!(CreatureType::Imp.work_room(), None);
    }
}
