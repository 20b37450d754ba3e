//! Treasury - gold, capacity and creature wages

use serde::{Deserialize, Serialize};

use crate::core::types::Seconds;
use crate::dungeon::room::{count_rooms, Room, RoomType};
use crate::entity::creature::Creature;

pub const STARTING_GOLD: u32 = 2000;
pub const IMP_COST: u32 = 100;
/// Capacity with no treasury rooms
pub const BASE_TREASURY_CAPACITY: u32 = 1000;
pub const TREASURY_CAPACITY_PER_ROOM: u32 = 1000;
/// Fraction of a creature's cost paid per wage cycle
pub const WAGE_RATE: f32 = 0.1;

/// Dungeon treasury
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Economy {
    pub gold: u32,
    pub max_gold: u32,
    pub last_wage_time: Seconds,
}

impl Default for Economy {
    fn default() -> Self {
        Self::new(STARTING_GOLD)
    }
}

impl Economy {
    pub fn new(starting_gold: u32) -> Self {
        Self {
            gold: starting_gold,
            max_gold: BASE_TREASURY_CAPACITY,
            last_wage_time: 0.0,
        }
    }

    /// Add gold, clamping the treasury to capacity.
    ///
    /// Returns the change in gold, which is negative when the treasury
    /// was already over capacity.
    pub fn add_gold(&mut self, amount: u32) -> i64 {
        let before = self.gold;
        self.gold = self.gold.saturating_add(amount).min(self.max_gold);
        i64::from(self.gold) - i64::from(before)
    }

    /// Spend gold, returns true if successful. No mutation on failure.
    pub fn spend_gold(&mut self, amount: u32) -> bool {
        if !self.can_afford(amount) {
            return false;
        }
        self.gold -= amount;
        true
    }

    pub fn can_afford(&self, amount: u32) -> bool {
        self.gold >= amount
    }

    /// Gold that would be lost if `amount` were added now
    pub fn overflow(&self, amount: u32) -> u32 {
        self.gold.saturating_add(amount).saturating_sub(self.max_gold)
    }

    /// Recompute capacity from treasury rooms; excess gold is lost
    pub fn update_max_gold(&mut self, rooms: &[Room]) {
        self.max_gold = treasury_capacity(rooms);
        self.gold = self.gold.min(self.max_gold);
    }
}

pub fn treasury_capacity(rooms: &[Room]) -> u32 {
    let treasuries = count_rooms(rooms, RoomType::Treasury) as u32;
    BASE_TREASURY_CAPACITY + treasuries * TREASURY_CAPACITY_PER_ROOM
}

/// Wage owed by a single creature each cycle
pub fn wage_for(cost: u32) -> u32 {
    (cost as f32 * WAGE_RATE).floor() as u32
}

/// Sum of every creature's wage
pub fn calculate_wages(creatures: &[Creature]) -> u32 {
    creatures
        .iter()
        .map(|c| wage_for(c.creature_type.stats().cost))
        .sum()
}

/// Result of a wage cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WagePayment {
    pub paid: bool,
    pub amount: u32,
}

/// Pay wages if `interval` has elapsed since the last payment.
///
/// A shortfall drains the treasury to zero and reports `paid: false`.
pub fn process_wages(
    economy: &mut Economy,
    creatures: &[Creature],
    now: Seconds,
    interval: Seconds,
) -> WagePayment {
    if now - economy.last_wage_time < interval {
        return WagePayment { paid: true, amount: 0 };
    }

    let wages = calculate_wages(creatures);
    economy.last_wage_time = now;

    if wages == 0 {
        return WagePayment { paid: true, amount: 0 };
    }

    if economy.spend_gold(wages) {
        return WagePayment { paid: true, amount: wages };
    }

    let partial = economy.gold;
    economy.gold = 0;
    WagePayment {
        paid: false,
        amount: partial,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{CreatureId, Position};
    use crate::entity::creature::CreatureType;

    fn creature(creature_type: CreatureType) -> Creature {
        Creature::new(CreatureId(1), creature_type, Position::new(5, 5))
    }

    fn treasury() -> Room {
        Room {
            room_type: RoomType::Treasury,
            tiles: vec![Position::new(1, 1)],
            efficiency: 1.0,
        }
    }

    #[test]
    fn test_add_gold_caps_at_capacity() {
        let mut economy = Economy::new(900);
        assert_eq!(economy.add_gold(50), 50);
        assert_eq!(economy.add_gold(100), 50);
        assert_eq!(economy.gold, 1000);
        assert_eq!(economy.add_gold(10), 0);
    }

    #[test]
    fn test_add_gold_clamps_starting_surplus() {
        let mut economy = Economy::new(STARTING_GOLD);
        assert_eq!(economy.overflow(50), 1050);
        assert_eq!(economy.add_gold(50), -1000);
        assert_eq!(economy.gold, BASE_TREASURY_CAPACITY);
        assert_eq!(economy.gold, economy.max_gold);
    }

    #[test]
    fn test_spend_gold_is_all_or_nothing() {
        let mut economy = Economy::new(300);
        assert!(!economy.spend_gold(301));
        assert_eq!(economy.gold, 300);
        assert!(economy.spend_gold(300));
        assert_eq!(economy.gold, 0);
    }

    #[test]
    fn test_overflow() {
        let economy = Economy::new(900);
        assert_eq!(economy.overflow(50), 0);
        assert_eq!(economy.overflow(250), 150);
    }

    #[test]
    fn test_treasury_capacity_and_clamp() {
        let mut economy = Economy::new(0);
        let mut rooms = vec![treasury(), treasury()];
        economy.update_max_gold(&rooms);
        assert_eq!(economy.max_gold, 3000);

        economy.add_gold(2500);
        assert_eq!(economy.gold, 2500);

        rooms.pop();
        economy.update_max_gold(&rooms);
        assert_eq!(economy.max_gold, 2000);
        assert_eq!(economy.gold, 2000);
    }

    #[test]
    fn test_update_max_gold_clamps_without_shrink() {
        let mut economy = Economy::new(STARTING_GOLD);
        economy.update_max_gold(&[]);
        assert_eq!(economy.max_gold, BASE_TREASURY_CAPACITY);
        assert_eq!(economy.gold, BASE_TREASURY_CAPACITY);
    }

    #[test]
    fn test_calculate_wages() {
        let creatures = vec![
            creature(CreatureType::Beetle),
            creature(CreatureType::Warlock),
            creature(CreatureType::Imp),
        ];
        // 10 + 30 + 0
        assert_eq!(calculate_wages(&creatures), 40);
        assert_eq!(calculate_wages(&[]), 0);
    }

    #[test]
    fn test_wages_not_due() {
        let mut economy = Economy::new(500);
        economy.last_wage_time = 10.0;
        let creatures = vec![creature(CreatureType::Orc)];

        let result = process_wages(&mut economy, &creatures, 50.0, 60.0);
        assert_eq!(result, WagePayment { paid: true, amount: 0 });
        assert_eq!(economy.gold, 500);
        assert_eq!(economy.last_wage_time, 10.0);
    }

    #[test]
    fn test_wages_paid_in_full() {
        let mut economy = Economy::new(500);
        let creatures = vec![creature(CreatureType::Orc), creature(CreatureType::Troll)];

        let result = process_wages(&mut economy, &creatures, 60.0, 60.0);
        assert_eq!(result, WagePayment { paid: true, amount: 45 });
        assert_eq!(economy.gold, 455);
        assert_eq!(economy.last_wage_time, 60.0);
    }

    #[test]
    fn test_wage_shortfall_drains_treasury() {
        let mut economy = Economy::new(30);
        let creatures = vec![creature(CreatureType::DarkAngel)];

        let result = process_wages(&mut economy, &creatures, 61.0, 60.0);
        assert_eq!(result, WagePayment { paid: false, amount: 30 });
        assert_eq!(economy.gold, 0);
        assert_eq!(economy.last_wage_time, 61.0);
    }

    #[test]
    fn test_zero_wages_records_time() {
        let mut economy = Economy::new(30);
        let result = process_wages(&mut economy, &[], 70.0, 60.0);
        assert_eq!(result, WagePayment { paid: true, amount: 0 });
        assert_eq!(economy.last_wage_time, 70.0);
    }
}
