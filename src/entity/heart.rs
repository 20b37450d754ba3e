//! The dungeon heart. Losing it ends the game.

use serde::{Deserialize, Serialize};

use crate::core::types::{Position, Seconds};

pub const HEART_HP: f32 = 1000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonHeart {
    pub pos: Position,
    pub hp: f32,
    pub max_hp: f32,
    /// Last time the heart was damaged; gates regeneration
    pub last_attack_time: Seconds,
}

impl DungeonHeart {
    pub fn new(pos: Position) -> Self {
        Self {
            pos,
            hp: HEART_HP,
            max_hp: HEART_HP,
            last_attack_time: 0.0,
        }
    }

    /// Regenerate `rate * dt` hp once `delay` has passed since the last hit.
    ///
    /// Returns the hp restored.
    pub fn regenerate(&mut self, now: Seconds, dt: Seconds, rate: f32, delay: Seconds) -> f32 {
        if now - self.last_attack_time < delay || self.hp >= self.max_hp {
            return 0.0;
        }
        let before = self.hp;
        self.hp = (self.hp + rate * dt).min(self.max_hp);
        self.hp - before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regen_waits_for_delay() {
        let mut heart = DungeonHeart::new(Position::new(20, 15));
        heart.hp = 500.0;
        heart.last_attack_time = 10.0;

        assert_eq!(heart.regenerate(14.0, 1.0, 1.0, 5.0), 0.0);
        assert_eq!(heart.hp, 500.0);

        assert_eq!(heart.regenerate(15.0, 2.0, 1.0, 5.0), 2.0);
        assert_eq!(heart.hp, 502.0);
    }

    #[test]
    fn test_regen_clamps_to_max() {
        let mut heart = DungeonHeart::new(Position::new(20, 15));
        heart.hp = 999.5;
        heart.regenerate(100.0, 1.0, 1.0, 5.0);
        assert_eq!(heart.hp, heart.max_hp);
        assert_eq!(heart.regenerate(101.0, 1.0, 1.0, 5.0), 0.0);
    }
}
