//! A* pathfinding over the dungeon grid
//!
//! 4-directional, unit step cost, Manhattan heuristic. Ties on f-cost are
//! broken by insertion order so a given grid always yields the same path.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ahash::AHashMap;

use crate::core::types::Position;
use crate::spatial::grid::Grid;

/// Node in the A* open set
#[derive(Debug, Clone, Copy)]
struct PathNode {
    pos: Position,
    g_cost: u32,
    f_cost: u32, // g_cost + heuristic
    seq: u64,
}

impl PartialEq for PathNode {
    fn eq(&self, other: &Self) -> bool {
        self.f_cost == other.f_cost && self.seq == other.seq
    }
}

impl Eq for PathNode {}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap: lowest f first, then earliest pushed
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Manhattan distance heuristic
pub fn heuristic(a: Position, b: Position) -> u32 {
    a.manhattan(&b)
}

/// Manhattan distance between two positions
pub fn distance(a: Position, b: Position) -> u32 {
    a.manhattan(&b)
}

/// Find a shortest path using A*.
///
/// The result runs from the step after `start` up to and including `end`.
/// Empty when `start == end`, when either endpoint is not walkable, or when
/// no path exists.
pub fn find_path(grid: &Grid, start: Position, end: Position) -> Vec<Position> {
    if start == end || !grid.is_walkable(end) || !grid.is_walkable(start) {
        return Vec::new();
    }

    let mut open_set = BinaryHeap::new();
    let mut came_from: AHashMap<Position, Position> = AHashMap::new();
    let mut g_scores: AHashMap<Position, u32> = AHashMap::new();
    let mut seq = 0u64;

    g_scores.insert(start, 0);
    open_set.push(PathNode {
        pos: start,
        g_cost: 0,
        f_cost: heuristic(start, end),
        seq,
    });

    while let Some(current) = open_set.pop() {
        if current.pos == end {
            return reconstruct_path(&came_from, start, end);
        }

        // Stale entry superseded by a cheaper route
        if g_scores.get(&current.pos).is_some_and(|&g| current.g_cost > g) {
            continue;
        }

        for neighbor in grid.neighbors(current.pos) {
            let tentative_g = current.g_cost + 1;
            let neighbor_g = g_scores.get(&neighbor).copied().unwrap_or(u32::MAX);

            if tentative_g < neighbor_g {
                came_from.insert(neighbor, current.pos);
                g_scores.insert(neighbor, tentative_g);

                seq += 1;
                open_set.push(PathNode {
                    pos: neighbor,
                    g_cost: tentative_g,
                    f_cost: tentative_g + heuristic(neighbor, end),
                    seq,
                });
            }
        }
    }

    Vec::new()
}

/// Walk came_from back to the start, excluding the start itself
fn reconstruct_path(
    came_from: &AHashMap<Position, Position>,
    start: Position,
    end: Position,
) -> Vec<Position> {
    let mut path = vec![end];
    let mut current = end;
    while let Some(&prev) = came_from.get(&current) {
        if prev == start {
            break;
        }
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Whether `end` can be reached from `start` (trivially true when equal)
pub fn has_path(grid: &Grid, start: Position, end: Position) -> bool {
    start == end || !find_path(grid, start, end).is_empty()
}

/// Candidate with the shortest path from `from`.
///
/// Standing on a candidate counts as reaching it immediately.
/// Runs one search per candidate, which is fine for tens of targets.
pub fn find_nearest_reachable(grid: &Grid, from: Position, targets: &[Position]) -> Option<Position> {
    let mut nearest = None;
    let mut nearest_len = usize::MAX;

    for &target in targets {
        if target == from {
            return Some(target);
        }
        let path = find_path(grid, from, target);
        if !path.is_empty() && path.len() < nearest_len {
            nearest = Some(target);
            nearest_len = path.len();
        }
    }

    nearest
}

/// First hop toward `to`, or None if unreachable or already there
pub fn next_step(grid: &Grid, from: Position, to: Position) -> Option<Position> {
    if from == to {
        return None;
    }
    find_path(grid, from, to).first().copied()
}
