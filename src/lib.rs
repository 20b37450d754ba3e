//! Underlord - tick-driven simulation core for a dungeon-management game

pub mod combat;
pub mod core;
pub mod dungeon;
pub mod entity;
pub mod render;
pub mod simulation;
pub mod spatial;
