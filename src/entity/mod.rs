//! Dungeon inhabitants and intruders
//!
//! Every agent carries a position, hit points and the time of its last
//! attack. `Combatant` exposes that shared core so combat, lava and
//! nearest-enemy scans work over any of them.

pub mod creature;
pub mod heart;
pub mod hero;
pub mod imp;

pub use creature::{Creature, CreatureBehavior, CreatureType};
pub use heart::DungeonHeart;
pub use hero::{Hero, HeroBehavior, HeroTarget, HeroType};
pub use imp::{DigTask, Imp, ImpOutcome, TaskKind};

use crate::core::types::{Position, Seconds};

/// Below this fraction of max hp an agent flees
pub const FLEE_HP_THRESHOLD: f32 = 0.2;

/// Anything with hit points that can attack or be attacked
pub trait Combatant {
    fn position(&self) -> Position;
    fn hp(&self) -> f32;
    fn max_hp(&self) -> f32;
    fn hp_mut(&mut self) -> &mut f32;
    fn last_attack_time(&self) -> Seconds;
    fn set_last_attack_time(&mut self, time: Seconds);

    fn is_dead(&self) -> bool {
        self.hp() <= 0.0
    }

    fn hp_ratio(&self) -> f32 {
        if self.max_hp() <= 0.0 {
            0.0
        } else {
            self.hp() / self.max_hp()
        }
    }

    /// Reduce hp, flooring at zero. Returns the hp actually removed.
    fn apply_damage(&mut self, amount: f32) -> f32 {
        let hp = self.hp_mut();
        let before = *hp;
        *hp = (*hp - amount.max(0.0)).max(0.0);
        before - *hp
    }
}

macro_rules! impl_combatant {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Combatant for $ty {
                fn position(&self) -> Position {
                    self.pos
                }

                fn hp(&self) -> f32 {
                    self.hp
                }

                fn max_hp(&self) -> f32 {
                    self.max_hp
                }

                fn hp_mut(&mut self) -> &mut f32 {
                    &mut self.hp
                }

                fn last_attack_time(&self) -> Seconds {
                    self.last_attack_time
                }

                fn set_last_attack_time(&mut self, time: Seconds) {
                    self.last_attack_time = time;
                }
            }
        )+
    };
}

impl_combatant!(Imp, Creature, Hero, DungeonHeart);

/// Charge a movement accumulator by `speed * dt` tiles.
///
/// Returns true once a full tile is available. The accumulator saturates at
/// one tile so an agent never moves more than one tile per tick; the caller
/// resets it to zero after actually stepping.
pub fn gain_movement(progress: &mut f32, speed: f32, dt: Seconds) -> bool {
    *progress = (*progress + speed * dt).min(1.0);
    *progress >= 1.0
}

/// Live candidate nearest to `from` by Manhattan distance.
///
/// Ties keep the earliest candidate.
pub fn nearest_alive<'a, T: Combatant>(
    from: Position,
    candidates: impl IntoIterator<Item = &'a T>,
) -> Option<&'a T>
where
    T: 'a,
{
    let mut nearest = None;
    let mut nearest_dist = u32::MAX;
    for candidate in candidates {
        if candidate.is_dead() {
            continue;
        }
        let dist = from.manhattan(&candidate.position());
        if dist < nearest_dist {
            nearest = Some(candidate);
            nearest_dist = dist;
        }
    }
    nearest
}
