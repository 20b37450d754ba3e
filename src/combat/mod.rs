//! Attack resolution between creatures, heroes and the heart

pub mod resolution;

pub use resolution::{
    attack_cooldown, calculate_damage, can_attack_now, is_in_range, process_attack,
    process_combat, CombatEvent,
};
