//! Tile-by-tile movement shared by creatures and heroes

use crate::core::types::{Position, Seconds};
use crate::entity::gain_movement;
use crate::spatial::grid::Grid;
use crate::spatial::pathfinding::next_step;

/// Greedy orthogonal step toward `target` onto walkable ground, x first
fn greedy_step(grid: &Grid, from: Position, target: Position) -> Option<Position> {
    let dx = (target.x - from.x).signum();
    let dy = (target.y - from.y).signum();

    [(dx, 0), (0, dy)]
        .into_iter()
        .filter(|&(sx, sy)| sx != 0 || sy != 0)
        .map(|(sx, sy)| from.offset(sx, sy))
        .find(|&p| grid.is_walkable(p))
}

/// Move an agent at most one tile toward `target`.
///
/// Follows a fresh shortest path when one exists, otherwise tries a greedy
/// step. Stays put when neither works. Returns true if the agent moved.
pub fn step_toward(
    grid: &Grid,
    pos: &mut Position,
    progress: &mut f32,
    target: Position,
    speed: f32,
    dt: Seconds,
) -> bool {
    if *pos == target {
        return false;
    }
    if !gain_movement(progress, speed, dt) {
        return false;
    }

    let next = next_step(grid, *pos, target).or_else(|| greedy_step(grid, *pos, target));
    match next {
        Some(next) => {
            *pos = next;
            *progress = 0.0;
            true
        }
        None => false,
    }
}
